use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use portal_studio::editing::fields::page_panel;
use portal_studio::editing::menu::{self, MenuTemplate};
use portal_studio::editing::player_defaults::PlayerDefaultsPanel;
use portal_studio::editing::section::BlockList;
use portal_studio::editing::{ElementEditor, HtmlMode, WidgetConfigSession, WidgetSource};
use portal_studio::portal::{
    BlockKind, BlockSection, ContentBlock, DisplayType, EmbeddedVideoConfig, MenuKind, SourceType, starter_config,
};
use portal_studio::preview::{self, Device, PreviewPage, Region};
use portal_studio::store::{ConfigStore, SectionPatch, SettingsKey};

fn store() -> ConfigStore {
    ConfigStore::new(starter_config()).expect("starter document is valid")
}

#[test]
fn test_add_html_block_to_empty_main() -> Result<()> {
    let mut store = store();
    store.patch_section(SectionPatch::Main(Vec::new()))?;

    let mut editor = BlockList::new(BlockSection::Main).add();
    editor.select_kind(BlockKind::Html)?;
    editor.set_title("Intro");
    if editor.html_mode() == HtmlMode::Visual {
        editor.toggle_html_mode();
    }
    editor.set_body("<p>hi</p>");
    let id = editor.save(&mut store)?;

    let main = &store.current().main;
    assert_eq!(main.len(), 1);
    assert_eq!(main[0].id, id);
    assert_eq!(main[0].kind, BlockKind::Html);
    assert_eq!(main[0].title, "Intro");
    assert_eq!(main[0].body, "<p>hi</p>");
    assert!(main[0].video_config.is_none());
    Ok(())
}

#[test]
fn test_empty_title_blocks_save() -> Result<()> {
    let mut store = store();
    let before = store.get();

    let mut editor = ElementEditor::create(BlockSection::Main);
    editor.select_kind(BlockKind::Markdown)?;
    editor.set_body("# Heading");

    assert!(editor.save(&mut store).is_err());
    assert_eq!(store.current(), &before);
    Ok(())
}

#[test]
fn test_hidden_header_is_omitted_from_both_pages() -> Result<()> {
    let mut store = store();
    for page in [PreviewPage::Home, PreviewPage::Player] {
        assert!(preview::render(store.current(), Device::Desktop, page).has_region(Region::Header));
    }

    store.patch_settings_field(SettingsKey::Header, "visible", json!(false))?;
    assert!(!store.current().header_settings.visible);

    for page in [PreviewPage::Home, PreviewPage::Player] {
        let rendered = preview::render(store.current(), Device::Desktop, page);
        assert!(!rendered.has_region(Region::Header), "header still rendered on {}", page);
        assert!(!rendered.body.contains("<header"));
    }
    Ok(())
}

#[test]
fn test_add_then_delete_custom_menu_entry() -> Result<()> {
    let mut store = store();
    let original = store.current().menu.clone();

    let id = menu::add_entry(&mut store, MenuTemplate::Custom)?;
    assert_eq!(store.current().menu.len(), original.len() + 1);
    let added = store.current().find_menu_entry(&id).expect("entry was added");
    assert_eq!(added.kind, MenuKind::Custom);

    menu::delete_entry(&mut store, &id)?;
    assert_eq!(store.current().menu.as_slice(), original.as_slice());
    Ok(())
}

#[test]
fn test_element_gap_reaches_style_sheet() -> Result<()> {
    let mut store = store();
    let panel = page_panel();
    let gap = panel.field("elementGap").expect("layout group has elementGap");

    gap.write(&mut store, json!(64))?;

    assert_eq!(store.current().page_settings.element_gap, 64.0);
    let rendered = preview::render(store.current(), Device::Desktop, PreviewPage::Home);
    assert_eq!(rendered.stylesheet.element_gap, 64.0);
    assert!(rendered.stylesheet.to_css().contains("64px"));
    Ok(())
}

#[test]
fn test_widget_save_keeps_inactive_source_fields() -> Result<()> {
    let mut store = store();
    let mut block = ContentBlock::new("video-1", BlockKind::EmbeddedVideo, "Featured", "");
    block.video_config = Some(EmbeddedVideoConfig {
        source_type: SourceType::Single,
        single_guid: Some("guid-123".to_string()),
        guid_list: Some("a,b,c".to_string()),
        ..EmbeddedVideoConfig::default()
    });
    let mut main = store.current().main.as_ref().clone();
    main.push(block);
    store.patch_section(SectionPatch::Main(main))?;

    let source = WidgetSource::Block {
        section: BlockSection::Main,
        id: "video-1".to_string(),
    };
    let mut session = WidgetConfigSession::open(store.current(), source)?;
    session.set_source_type(SourceType::Search);
    session.set_search_query("trending:all");
    session.set_display_type(DisplayType::Carousel);
    session.set_size(5);
    session.save(&mut store)?;

    let (_, saved) = store.current().find_block("video-1").expect("block survives the save");
    assert_eq!(
        saved.video_config,
        Some(EmbeddedVideoConfig {
            source_type: SourceType::Search,
            single_guid: Some("guid-123".to_string()),
            single_alias: None,
            search_query: Some("trending:all".to_string()),
            guid_list: Some("a,b,c".to_string()),
            display_type: DisplayType::Carousel,
            size: 5,
        })
    );
    Ok(())
}

#[test]
fn test_widget_save_on_deleted_source_is_reported() -> Result<()> {
    let mut store = store();
    let id = menu::add_entry(&mut store, MenuTemplate::SmartSearch)?;
    let session = WidgetConfigSession::open(store.current(), WidgetSource::MenuEntry { id: id.clone() })?;

    menu::delete_entry(&mut store, &id)?;
    let before = store.get();

    assert!(session.save(&mut store).is_err());
    assert_eq!(store.current(), &before);
    Ok(())
}

#[test]
fn test_invalid_player_json_changes_nothing() {
    let mut store = store();
    let mut panel = PlayerDefaultsPanel::new(&store.current().portal_settings);
    let before = Arc::clone(&store.current().portal_settings);

    assert!(!panel.edit_json(&mut store, "{ \"autoPlay\": tru"));

    assert!(!panel.mirror().is_valid());
    assert_eq!(panel.mirror().text(), "{ \"autoPlay\": tru");
    assert!(Arc::ptr_eq(&before, &store.current().portal_settings));
}

#[test]
fn test_video_blocks_not_offered_on_player_page() {
    let editor = BlockList::new(BlockSection::PlayerPage).add();
    assert!(!editor.available_kinds().contains(&BlockKind::EmbeddedVideo));

    let editor = BlockList::new(BlockSection::Main).add();
    assert!(editor.available_kinds().contains(&BlockKind::EmbeddedVideo));
}

#[test]
fn test_imported_video_on_player_page_is_accepted() -> Result<()> {
    let mut config = starter_config();
    config.player_page = Arc::new(vec![ContentBlock::new("pv", BlockKind::EmbeddedVideo, "Clip", "")]);
    let mut store = ConfigStore::new(config)?;
    assert_eq!(store.current().player_page[0].kind, BlockKind::EmbeddedVideo);

    let blocks = vec![
        ContentBlock::new("a", BlockKind::Markdown, "Notes", "text"),
        ContentBlock::new("b", BlockKind::EmbeddedVideo, "Related", ""),
    ];
    store.patch_section(SectionPatch::PlayerPage(blocks))?;
    assert_eq!(store.current().player_page.len(), 2);
    Ok(())
}

#[test]
fn test_widget_save_keeps_last_valid_draft_while_json_is_broken() -> Result<()> {
    let mut store = store();
    let source = WidgetSource::Block {
        section: BlockSection::Main,
        id: "2".to_string(),
    };
    let mut session = WidgetConfigSession::open(store.current(), source)?;
    session.set_size(42);
    assert!(!session.edit_json("{"));
    assert!(!session.mirror().is_valid());

    session.save(&mut store)?;
    let (_, block) = store.current().find_block("2").expect("video block");
    assert_eq!(block.video_config.as_ref().map(|config| config.size), Some(42));
    Ok(())
}
