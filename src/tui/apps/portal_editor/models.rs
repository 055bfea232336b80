use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::Msg;
use crate::editing::fields::{self, Accordion};
use crate::editing::{ElementEditor, FieldDef, HtmlMode, SettingsPanel, WidgetConfigSession};
use crate::portal::{BlockKind, BlockSection, MenuEntry, MenuKind, PortalConfig};
use crate::preview::{Device, PreviewPage};
use crate::tui::{Element, ListItem, ListState, TextAreaState, TextInputState, Theme};

/// Sidebar entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Portal,
    Header,
    Menu,
    Main,
    PlayerPage,
    Footer,
    Settings,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Portal,
        Section::Header,
        Section::Menu,
        Section::Main,
        Section::PlayerPage,
        Section::Footer,
        Section::Settings,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Portal => "portal",
            Section::Header => "header",
            Section::Menu => "menu",
            Section::Main => "main",
            Section::PlayerPage => "playerPage",
            Section::Footer => "footer",
            Section::Settings => "settings",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            Section::Portal => "General Settings",
            Section::Header => "Header",
            Section::Menu => "Navigation Menu",
            Section::Main => "Main Body Content",
            Section::PlayerPage => "Player Page",
            Section::Footer => "Footer Section",
            Section::Settings => "Page Styles",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Portal => "General Settings",
            Section::Header => "Header Configuration",
            Section::Menu => "Navigation Menu",
            Section::Main => "Main Body Content",
            Section::PlayerPage => "Player Page Content",
            Section::Footer => "Footer Section",
            Section::Settings => "Page Styles",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::Portal => "Manage the core identity, access controls, and player behavior of your portal.",
            Section::Header => "Customize the layout and content of your portal's header.",
            Section::Menu => "Configure navigation items and visual styling for the menu bar.",
            Section::Main => "Build the primary content area for the Portal Home page.",
            Section::PlayerPage => "Customize the content that appears below the video player on the playback page.",
            Section::Footer => "Edit the content and styling for the bottom of your pages.",
            Section::Settings => "Define global typography, colors, and layout settings for the entire portal.",
        }
    }

    pub fn block_section(&self) -> Option<BlockSection> {
        match self {
            Section::Header => Some(BlockSection::Header),
            Section::Main => Some(BlockSection::Main),
            Section::PlayerPage => Some(BlockSection::PlayerPage),
            Section::Footer => Some(BlockSection::Footer),
            _ => None,
        }
    }

    pub fn settings_panel(&self) -> Option<SettingsPanel> {
        match self {
            Section::Portal => Some(fields::portal_panel()),
            Section::Header => Some(fields::header_panel()),
            Section::Menu => Some(fields::menu_panel()),
            Section::Footer => Some(fields::footer_panel()),
            Section::Settings => Some(fields::page_panel()),
            Section::Main | Section::PlayerPage => None,
        }
    }
}

/// One line of the section panel
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Heading(String),
    /// Collapsible group header of the Page Styles accordion
    Group { index: usize, title: String },
    Field(FieldDef),
    Block { index: usize, id: String },
    AddBlock,
    MenuEntry { index: usize, id: String },
    AddMenuEntry,
    PlayerDefaultsCode,
    CopyPlayerDefaults,
    AdvancedConfiguration,
}

impl Row {
    pub fn is_heading(&self) -> bool {
        matches!(self, Row::Heading(_))
    }
}

/// Rows of `section` for the current document
pub fn section_rows(section: Section, config: &PortalConfig, accordion: &Accordion) -> Vec<Row> {
    let mut rows = Vec::new();

    if let Some(panel) = section.settings_panel() {
        let collapsible = section == Section::Settings;
        for (index, group) in panel.groups.into_iter().enumerate() {
            if collapsible {
                rows.push(Row::Group {
                    index,
                    title: group.title,
                });
                if !accordion.is_expanded(index) {
                    continue;
                }
            } else {
                rows.push(Row::Heading(group.title));
            }
            rows.extend(group.fields.into_iter().map(Row::Field));
        }
    }

    if section == Section::Portal {
        rows.push(Row::Heading("Player Defaults".to_string()));
        rows.push(Row::PlayerDefaultsCode);
        rows.push(Row::CopyPlayerDefaults);
        rows.push(Row::AdvancedConfiguration);
    }

    if let Some(block_section) = section.block_section() {
        rows.push(Row::Heading("Elements".to_string()));
        rows.extend(
            config
                .blocks(block_section)
                .iter()
                .enumerate()
                .map(|(index, block)| Row::Block {
                    index,
                    id: block.id.clone(),
                }),
        );
        rows.push(Row::AddBlock);
    }

    if section == Section::Menu {
        rows.push(Row::Heading("Menu Items".to_string()));
        rows.extend(config.menu.iter().enumerate().map(|(index, entry)| Row::MenuEntry {
            index,
            id: entry.id.clone(),
        }));
        rows.push(Row::AddMenuEntry);
    }

    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Typing into a colour, text or number field
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub field: FieldDef,
    pub value: String,
    pub input: TextInputState,
    pub error: Option<String>,
}

impl FieldInput {
    pub fn new(field: FieldDef, value: String) -> Self {
        Self {
            input: TextInputState::at_end(&value),
            field,
            value,
            error: None,
        }
    }
}

/// Inline editing of one menu row
#[derive(Debug, Clone)]
pub struct MenuEntryForm {
    pub id: String,
    pub kind: MenuKind,
    pub label: String,
    pub url: String,
    pub search_query: String,
    pub label_input: TextInputState,
    pub url_input: TextInputState,
    pub query_input: TextInputState,
}

impl MenuEntryForm {
    pub fn new(entry: &MenuEntry) -> Self {
        let search_query = entry.search_query.clone().unwrap_or_default();
        Self {
            id: entry.id.clone(),
            kind: entry.kind,
            label_input: TextInputState::at_end(&entry.label),
            url_input: TextInputState::at_end(&entry.url),
            query_input: TextInputState::at_end(&search_query),
            label: entry.label.clone(),
            url: entry.url.clone(),
            search_query,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElementForm {
    pub editor: ElementEditor,
    pub kinds: ListState,
    pub title_input: TextInputState,
    pub body: TextAreaState,
    pub error: Option<String>,
}

impl ElementForm {
    pub fn new(editor: ElementEditor) -> Self {
        let body = TextAreaState::from_text(&Self::body_text(&editor));
        Self {
            title_input: TextInputState::at_end(editor.title()),
            kinds: ListState::with_selection(),
            editor,
            body,
            error: None,
        }
    }

    /// What the body area shows: rich text in visual mode, raw markup otherwise
    pub fn body_text(editor: &ElementEditor) -> String {
        match (editor.kind(), editor.html_mode()) {
            (Some(BlockKind::Html), HtmlMode::Visual) => editor.visual_text(),
            _ => editor.body().to_string(),
        }
    }

    /// Reload the body area after the kind or the HTML mode changed
    pub fn reload_body(&mut self) {
        self.body = TextAreaState::from_text(&Self::body_text(&self.editor));
    }
}

/// Rows of the widget view's option list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetOption {
    SourceType,
    DisplayType,
    Size,
    Code,
}

impl WidgetOption {
    pub const ALL: [WidgetOption; 4] = [
        WidgetOption::SourceType,
        WidgetOption::DisplayType,
        WidgetOption::Size,
        WidgetOption::Code,
    ];
}

#[derive(Debug, Clone)]
pub struct WidgetForm {
    pub session: WidgetConfigSession,
    pub options: ListState,
    pub single_guid: TextInputState,
    pub single_alias: TextInputState,
    pub search_query: TextInputState,
    pub guid_list: TextInputState,
    pub json: TextAreaState,
    pub error: Option<String>,
}

impl WidgetForm {
    pub fn new(session: WidgetConfigSession) -> Self {
        let draft = session.draft();
        let at_end = |value: &Option<String>| TextInputState::at_end(value.as_deref().unwrap_or_default());
        Self {
            options: ListState::with_selection(),
            single_guid: at_end(&draft.single_guid),
            single_alias: at_end(&draft.single_alias),
            search_query: at_end(&draft.search_query),
            guid_list: at_end(&draft.guid_list),
            json: TextAreaState::from_text(session.mirror().text()),
            session,
            error: None,
        }
    }

    /// Show the regenerated JSON after a structured change
    pub fn sync_json(&mut self) {
        self.json.set_text(self.session.mirror().text());
    }

    pub fn selected_option(&self) -> Option<WidgetOption> {
        self.options.selected().and_then(|i| WidgetOption::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewState {
    pub device: Device,
    pub page: PreviewPage,
    pub scroll: u16,
}

pub enum Modal {
    FieldInput(FieldInput),
    Templates(ListState),
    MenuEntry(MenuEntryForm),
    Element(Box<ElementForm>),
    Widget(Box<WidgetForm>),
    Preview,
}

pub struct SidebarItem {
    pub section: Section,
    pub active: bool,
}

impl ListItem for SidebarItem {
    type Msg = Msg;

    fn to_element(&self, theme: &Theme, is_selected: bool) -> Element<Msg> {
        let fg = if self.active { theme.accent_primary } else { theme.text_primary };
        let mut style = Style::default().fg(fg);
        if self.active {
            style = style.add_modifier(Modifier::BOLD);
        }
        let marker = if self.active { "▸ " } else { "  " };

        let mut builder = Element::styled_text(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent_primary)),
            Span::styled(self.section.label(), style),
        ]));
        if is_selected {
            builder = builder.background(Style::default().bg(theme.bg_surface));
        }
        builder.build()
    }
}

/// A pre-rendered line; the section panel builds these from its rows
pub struct LineItem(pub Line<'static>);

impl ListItem for LineItem {
    type Msg = Msg;

    fn to_element(&self, theme: &Theme, is_selected: bool) -> Element<Msg> {
        let mut builder = Element::styled_text(self.0.clone());
        if is_selected {
            builder = builder.background(Style::default().bg(theme.bg_surface));
        }
        builder.build()
    }
}

/// Label plus muted detail, for choosers
pub struct ChoiceItem {
    pub label: String,
    pub detail: String,
}

impl ListItem for ChoiceItem {
    type Msg = Msg;

    fn to_element(&self, theme: &Theme, is_selected: bool) -> Element<Msg> {
        let label_color = if is_selected { theme.accent_primary } else { theme.text_primary };
        let mut builder = Element::styled_text(Line::from(vec![
            Span::styled(format!("  {:<18}", self.label), Style::default().fg(label_color)),
            Span::styled(self.detail.clone(), theme.hint()),
        ]));
        if is_selected {
            builder = builder.background(Style::default().bg(theme.bg_surface));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::starter_config;

    #[test]
    fn test_sidebar_order_matches_keys() {
        let keys: Vec<&str> = Section::ALL.iter().map(Section::key).collect();
        assert_eq!(keys, ["portal", "header", "menu", "main", "playerPage", "footer", "settings"]);
    }

    #[test]
    fn test_page_styles_show_only_expanded_group() {
        let config = starter_config();
        let collapsed = section_rows(Section::Settings, &config, &Accordion::default());
        assert_eq!(collapsed.len(), 3);
        assert!(collapsed.iter().all(|row| matches!(row, Row::Group { .. })));

        let open = section_rows(Section::Settings, &config, &Accordion::open(0));
        let fields = open.iter().filter(|row| matches!(row, Row::Field(_))).count();
        assert_eq!(fields, 4);
    }

    #[test]
    fn test_block_section_lists_elements_then_add() {
        let config = starter_config();
        let rows = section_rows(Section::Main, &config, &Accordion::default());
        assert_eq!(rows.first(), Some(&Row::Heading("Elements".to_string())));
        assert_eq!(rows.last(), Some(&Row::AddBlock));
        assert_eq!(rows.len(), config.main.len() + 2);
    }
}
