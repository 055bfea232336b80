use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::Msg;
use super::app::State;
use super::models::{
    ChoiceItem, ElementForm, FieldInput, LineItem, MenuEntryForm, Modal, Row, Section, SidebarItem, WidgetForm,
    WidgetOption,
};
use crate::editing::element_editor::{VIDEO_PLACEHOLDER_HINT, VIDEO_PLACEHOLDER_TITLE};
use crate::editing::player_defaults::PLAYER_DEFAULTS_FILE;
use crate::editing::widget_config::WIDGET_CONFIG_FILE;
use crate::editing::{FieldDef, FieldKind, HtmlMode, MenuTemplate, Step};
use crate::portal::{BlockKind, MenuKind, PortalConfig, SourceType};
use crate::preview;
use crate::tui::element::LinearBuilder;
use crate::tui::state::theme::swatch;
use crate::tui::{Alignment, Element, LayeredView, ListState, Theme};
use crate::{col, row, spacer, use_constraints};

pub fn render_view(state: &mut State, theme: &Theme) -> LayeredView<Msg> {
    let base = render_main(state, theme);
    let mut view = LayeredView::new(base);

    if let Some(modal) = &state.modal {
        let (element, alignment) = match modal {
            Modal::FieldInput(input) => (render_field_input(input, theme), Alignment::Center),
            Modal::Templates(list) => (render_templates(list, theme), Alignment::Center),
            Modal::MenuEntry(form) => (render_menu_entry(form, theme), Alignment::Center),
            Modal::Element(form) => (render_element_editor(form, theme), Alignment::Center),
            Modal::Widget(form) => (render_widget(form, theme), Alignment::Fill),
            Modal::Preview => (render_preview(state, theme), Alignment::Fill),
        };
        view = view.with_app_modal(element, alignment);
    }
    view
}

fn render_main(state: &State, theme: &Theme) -> Element<Msg> {
    use_constraints!();

    let sidebar_items: Vec<SidebarItem> = Section::ALL
        .iter()
        .map(|section| SidebarItem {
            section: *section,
            active: *section == state.section,
        })
        .collect();
    let sidebar = Element::panel(
        Element::list("sidebar", &sidebar_items, &state.sidebar, theme)
            .on_navigate(Msg::SidebarNavigate)
            .on_activate(Msg::SelectSection)
            .build(),
    )
    .title("Portal Sections")
    .build();

    let config = state.store.current();
    let lines: Vec<LineItem> = state
        .rows()
        .iter()
        .map(|row| LineItem(row_line(row, state, config, theme)))
        .collect();
    let rows = Element::panel(
        Element::list("rows", &lines, &state.rows, theme)
            .on_navigate(Msg::RowsNavigate)
            .on_activate(Msg::ActivateRow)
            .build(),
    )
    .title(state.section.title())
    .build();

    let header = Element::paragraph(vec![
        Line::from(Span::styled(state.section.title(), theme.heading())),
        Line::from(Span::styled(state.section.description(), theme.hint())),
    ]);

    let content = if state.section == Section::Portal && state.player_defaults.code_visible() {
        let json = Element::panel(
            Element::text_area("player-json", &state.player_json)
                .invalid(!state.player_defaults.mirror().is_valid())
                .on_event(Msg::PlayerJsonEvent)
                .build(),
        )
        .title(json_title(PLAYER_DEFAULTS_FILE, state.player_defaults.mirror().is_valid()))
        .build();
        col![
            header => Length(2),
            rows => Fill(2),
            json => Fill(1),
        ]
    } else {
        col![
            header => Length(2),
            rows => Fill(1),
        ]
    };

    row![
        sidebar => Length(26),
        content => Fill(1),
    ]
}

fn json_title(file: &str, valid: bool) -> String {
    if valid {
        file.to_string()
    } else {
        format!("{} (invalid JSON)", file)
    }
}

fn row_line(row: &Row, state: &State, config: &PortalConfig, theme: &Theme) -> Line<'static> {
    let text = Style::default().fg(theme.text_primary);
    let action = Style::default().fg(theme.accent_secondary);

    match row {
        Row::Heading(title) => Line::from(Span::styled(format!("─ {}", title), theme.heading())),
        Row::Group { index, title } => {
            let marker = if state.accordion.is_expanded(*index) { "▾" } else { "▸" };
            Line::from(Span::styled(format!("{} {}", marker, title), theme.heading()))
        }
        Row::Field(field) => field_line(field, config, theme),
        Row::Block { index, .. } => {
            let Some(block) = state
                .section
                .block_section()
                .and_then(|section| config.blocks(section).get(*index))
            else {
                return Line::default();
            };
            let mut spans = vec![
                Span::styled(format!("  {:>2}. ", index + 1), theme.hint()),
                Span::styled(format!("[{}] ", block.kind.label()), Style::default().fg(theme.accent_tertiary)),
                Span::styled(block.title.clone(), text),
            ];
            if block.is_video() {
                let summary = block
                    .video_config
                    .as_ref()
                    .map_or_else(|| "not configured".to_string(), |video| video.source_summary());
                spans.push(Span::styled(format!("  {}", summary), theme.hint()));
            }
            Line::from(spans)
        }
        Row::AddBlock => Line::from(Span::styled("  + Add element", action)),
        Row::MenuEntry { index, .. } => {
            let Some(entry) = config.menu.get(*index) else {
                return Line::default();
            };
            let (marker, label_style) = if entry.visible {
                ("●", text)
            } else {
                ("○", theme.hint().add_modifier(Modifier::CROSSED_OUT))
            };
            let detail = match entry.kind {
                MenuKind::SmartSearch => entry.search_query.clone().unwrap_or_default(),
                _ => entry.resolved_url(),
            };
            Line::from(vec![
                Span::styled(format!("  {} ", marker), Style::default().fg(theme.accent_success)),
                Span::styled(format!("{:<24}", entry.label), label_style),
                Span::styled(format!("{:<14}", entry.kind.label()), Style::default().fg(theme.accent_tertiary)),
                Span::styled(detail, theme.hint()),
            ])
        }
        Row::AddMenuEntry => Line::from(Span::styled("  + Add menu link", action)),
        Row::PlayerDefaultsCode => {
            let label = if state.player_defaults.code_visible() {
                "  { } Hide JSON configuration"
            } else {
                "  { } Show JSON configuration"
            };
            Line::from(Span::styled(label, action))
        }
        Row::CopyPlayerDefaults => Line::from(Span::styled("  Copy JSON to clipboard", action)),
        Row::AdvancedConfiguration => Line::from(vec![
            Span::styled("  Advanced Configuration ", action),
            Span::styled(state.studio.links.advanced_configuration_url.clone(), theme.hint()),
        ]),
    }
}

fn field_line(field: &FieldDef, config: &PortalConfig, theme: &Theme) -> Line<'static> {
    let value = field.display(config);
    let mut spans = vec![Span::styled(
        format!("  {:<30}", field.label),
        Style::default().fg(theme.text_secondary),
    )];

    match &field.kind {
        FieldKind::Bool => {
            let on = field.read(config).and_then(|v| v.as_bool()).unwrap_or(false);
            let (mark, color) = if on { ("[x]", theme.accent_success) } else { ("[ ]", theme.text_tertiary) };
            spans.push(Span::styled(mark, Style::default().fg(color)));
        }
        FieldKind::Choice { .. } => {
            spans.push(Span::styled(format!("‹ {} ›", value), Style::default().fg(theme.accent_primary)));
        }
        FieldKind::Color => {
            if let Some(color) = swatch(&value) {
                spans.push(Span::styled("██ ", Style::default().fg(color)));
            } else {
                spans.push(Span::styled("?? ", theme.error()));
            }
            spans.push(Span::styled(value, Style::default().fg(theme.text_primary)));
        }
        FieldKind::Number { min, max, .. } => {
            spans.push(Span::styled(value, Style::default().fg(theme.text_primary)));
            spans.push(Span::styled(format!("  ({}-{}, -/+)", min, max), theme.hint()));
        }
        FieldKind::Text { placeholder } => {
            if value.is_empty() {
                let hint = placeholder.clone().unwrap_or_default();
                spans.push(Span::styled(hint, theme.hint().add_modifier(Modifier::ITALIC)));
            } else {
                spans.push(Span::styled(value, Style::default().fg(theme.text_primary)));
            }
        }
    }
    Line::from(spans)
}

fn error_line(error: &Option<String>, theme: &Theme) -> Element<Msg> {
    match error {
        Some(message) => Element::styled(message.clone(), theme.error()),
        None => spacer!(),
    }
}

fn render_field_input(input: &FieldInput, theme: &Theme) -> Element<Msg> {
    use_constraints!();

    let field = &input.field;
    let mut text_input = Element::text_input("field-input", &input.value, &input.input).on_event(Msg::FieldInputEvent);
    if let FieldKind::Text {
        placeholder: Some(placeholder),
    } = &field.kind
    {
        text_input = text_input.placeholder(placeholder.clone());
    }

    let editor = if field.kind == FieldKind::Color {
        let sample = match swatch(&input.value) {
            Some(color) => Element::styled(" ████", Style::default().fg(color)),
            None => Element::styled(" ----", theme.hint()),
        };
        row![
            text_input.build() => Fill(1),
            sample => Length(5),
        ]
    } else {
        text_input.build()
    };

    let hint = match field.kind {
        FieldKind::Number { min, max, .. } => format!("Number {}-{}. Enter applies, Esc twice cancels.", min, max),
        _ => "Changes apply as you type. Enter closes.".to_string(),
    };

    Element::panel(col![
        Element::styled(field.description.clone(), theme.hint()) => Length(1),
        editor => Length(1),
        error_line(&input.error, theme) => Length(1),
        Element::styled(hint, theme.hint()) => Length(1),
    ])
    .title(field.label.clone())
    .width(64)
    .height(6)
    .build()
}

fn render_templates(list: &ListState, theme: &Theme) -> Element<Msg> {
    let items: Vec<ChoiceItem> = MenuTemplate::ALL
        .iter()
        .map(|template| {
            let entry = template.entry(String::new());
            ChoiceItem {
                label: template.label().to_string(),
                detail: format!("{} {}", entry.label, entry.url),
            }
        })
        .collect();

    Element::panel(
        Element::list("templates", &items, list, theme)
            .on_navigate(Msg::TemplatesNavigate)
            .on_activate(Msg::TemplateChosen)
            .build(),
    )
    .title("Add Menu Link")
    .width(56)
    .height(6)
    .build()
}

fn render_menu_entry(form: &MenuEntryForm, theme: &Theme) -> Element<Msg> {
    use_constraints!();

    let mut column = LinearBuilder::column()
        .add(Element::styled("Label", theme.hint()), Length(1))
        .add(
            Element::text_input("entry-label", &form.label, &form.label_input)
                .on_event(Msg::EntryLabelEvent)
                .build(),
            Length(1),
        );

    column = match form.kind {
        MenuKind::Custom => column.add(Element::styled("URL", theme.hint()), Length(1)).add(
            Element::text_input("entry-url", &form.url, &form.url_input)
                .placeholder("https://")
                .on_event(Msg::EntryUrlEvent)
                .build(),
            Length(1),
        ),
        MenuKind::SmartSearch => column.add(Element::styled("Search Query", theme.hint()), Length(1)).add(
            Element::text_input("entry-query", &form.search_query, &form.query_input)
                .placeholder("recent:all")
                .on_event(Msg::EntryQueryEvent)
                .build(),
            Length(1),
        ),
        MenuKind::Home | MenuKind::Favorites => {
            column.add(Element::styled("Links to a fixed portal page", theme.hint()), Length(1))
        }
    };

    Element::panel(column.build())
        .title(format!("{} Link", form.kind.label()))
        .width(60)
        .height(7)
        .build()
}

fn render_element_editor(form: &ElementForm, theme: &Theme) -> Element<Msg> {
    use_constraints!();

    let editor = &form.editor;
    let body = match editor.step() {
        Step::TypeSelection => {
            let items: Vec<ChoiceItem> = editor
                .available_kinds()
                .iter()
                .map(|kind| ChoiceItem {
                    label: kind.label().to_string(),
                    detail: kind.description().to_string(),
                })
                .collect();
            col![
                Element::styled(format!("Choose what to add to {}", editor.section()), theme.hint()) => Length(1),
                Element::list("element-kinds", &items, &form.kinds, theme)
                    .on_navigate(Msg::KindsNavigate)
                    .on_activate(Msg::KindChosen)
                    .build() => Fill(1),
                error_line(&form.error, theme) => Length(1),
            ]
        }
        Step::FieldEntry => {
            let title = Element::text_input("element-title", editor.title(), &form.title_input)
                .placeholder("Element title")
                .on_event(Msg::ElementTitleEvent)
                .build();

            let content = if editor.shows_video_placeholder() {
                Element::paragraph(vec![
                    Line::from(Span::styled(VIDEO_PLACEHOLDER_TITLE, theme.heading())),
                    Line::from(Span::styled(VIDEO_PLACEHOLDER_HINT, theme.hint())),
                ])
            } else {
                let mode = if editor.kind() == Some(BlockKind::Html) {
                    let (visual, code) = match editor.html_mode() {
                        HtmlMode::Visual => (theme.selected(), theme.hint()),
                        HtmlMode::Code => (theme.hint(), theme.selected()),
                    };
                    Line::from(vec![
                        Span::styled(" Visual ", visual),
                        Span::styled(" Code ", code),
                        Span::styled("  ^T switches", theme.hint()),
                    ])
                } else {
                    Line::from(Span::styled("Markdown", theme.hint()))
                };
                col![
                    Element::styled_text(mode).build() => Length(1),
                    Element::text_area("element-body", &form.body)
                        .on_event(Msg::ElementBodyEvent)
                        .build() => Fill(1),
                ]
            };

            col![
                Element::styled("Title", theme.hint()) => Length(1),
                title => Length(1),
                spacer!() => Length(1),
                content => Fill(1),
                error_line(&form.error, theme) => Length(1),
            ]
        }
    };

    Element::panel(body).title(editor.heading()).width(84).height(22).build()
}

fn render_widget(form: &WidgetForm, theme: &Theme) -> Element<Msg> {
    use_constraints!();

    let session = &form.session;
    let draft = session.draft();

    let option_items: Vec<ChoiceItem> = WidgetOption::ALL
        .iter()
        .map(|option| match option {
            WidgetOption::SourceType => ChoiceItem {
                label: "Source".to_string(),
                detail: format!("‹ {} ›", draft.source_type.label()),
            },
            WidgetOption::DisplayType => ChoiceItem {
                label: "Layout".to_string(),
                detail: format!("‹ {} › {}", draft.display_type.label(), draft.display_type.description()),
            },
            WidgetOption::Size => ChoiceItem {
                label: "Items".to_string(),
                detail: format!("{} (-/+)", draft.size),
            },
            WidgetOption::Code => ChoiceItem {
                label: "JSON".to_string(),
                detail: (if session.code_visible() { "shown" } else { "hidden" }).to_string(),
            },
        })
        .collect();
    let options = Element::list("widget-options", &option_items, &form.options, theme)
        .on_navigate(Msg::WidgetOptionsNavigate)
        .on_activate(Msg::WidgetOptionActivate)
        .build();

    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let source_fields = match draft.source_type {
        SourceType::Single => col![
            Element::styled("Video GUID", theme.hint()) => Length(1),
            Element::text_input("widget-guid", &text(&draft.single_guid), &form.single_guid)
                .on_event(Msg::WidgetGuidEvent)
                .build() => Length(1),
            Element::styled("Alias", theme.hint()) => Length(1),
            Element::text_input("widget-alias", &text(&draft.single_alias), &form.single_alias)
                .on_event(Msg::WidgetAliasEvent)
                .build() => Length(1),
        ],
        SourceType::Search => col![
            Element::styled("Search Query", theme.hint()) => Length(1),
            Element::text_input("widget-query", &text(&draft.search_query), &form.search_query)
                .placeholder("recent:all")
                .on_event(Msg::WidgetQueryEvent)
                .build() => Length(1),
        ],
        SourceType::List => col![
            Element::styled("GUID List (comma separated)", theme.hint()) => Length(1),
            Element::text_input("widget-list", &text(&draft.guid_list), &form.guid_list)
                .on_event(Msg::WidgetListEvent)
                .build() => Length(1),
        ],
    };

    let form_column = col![
        Element::styled(session.purpose().description(), theme.hint()) => Length(1),
        spacer!() => Length(1),
        options => Length(WidgetOption::ALL.len() as u16),
        spacer!() => Length(1),
        source_fields => Length(4),
        spacer!() => Length(1),
        Element::styled(format!("Editing {}", session.source()), theme.hint()) => Length(1),
        error_line(&form.error, theme) => Length(1),
    ];

    let body = if session.code_visible() {
        let valid = session.mirror().is_valid();
        let json = Element::panel(
            Element::text_area("widget-json", &form.json)
                .invalid(!valid)
                .on_event(Msg::WidgetJsonEvent)
                .build(),
        )
        .title(json_title(WIDGET_CONFIG_FILE, valid))
        .build();
        row![
            form_column => Fill(1),
            json => Fill(1),
        ]
    } else {
        form_column
    };

    Element::panel(Element::container(body).padding(1).build())
        .title(session.purpose().title())
        .build()
}

fn render_preview(state: &State, theme: &Theme) -> Element<Msg> {
    let config = state.store.current();
    let rendered = preview::render(config, state.preview.device, state.preview.page);

    let width = match rendered.content_width {
        Some(px) => format!("{}px", px),
        None => "full width".to_string(),
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Device ", theme.hint()),
            Span::styled(format!("{:<9}", state.preview.device.to_string()), theme.key()),
            Span::styled("Page ", theme.hint()),
            Span::styled(format!("{:<8}", state.preview.page.label()), theme.key()),
            Span::styled("Content ", theme.hint()),
            Span::styled(width, theme.key()),
        ]),
        Line::default(),
    ];

    for region in &rendered.outline {
        lines.push(Line::from(Span::styled(region.label.clone(), theme.heading())));
        if region.items.is_empty() {
            lines.push(Line::from(Span::styled("  (empty)", theme.hint())));
        }
        for item in &region.items {
            lines.push(Line::from(Span::styled(
                format!("  • {}", item),
                Style::default().fg(theme.text_primary),
            )));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Style sheet", theme.heading())));
    for css in rendered.stylesheet.to_css().lines() {
        lines.push(Line::from(Span::styled(format!("  {}", css), theme.hint())));
    }

    Element::panel(Element::Paragraph {
        lines,
        scroll: state.preview.scroll,
    })
    .title(format!("Preview: {}", config.portal_settings.title))
    .build()
}
