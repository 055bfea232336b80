use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

use portal_studio::editing::PlayerDefaults;
use portal_studio::editing::json_mirror::{JsonMirror, canonical};
use portal_studio::editing::sequence::{Direction, moved};
use portal_studio::portal::{
    BlockKind, ContentBlock, DisplayType, EmbeddedVideoConfig, MenuKind, PortalConfig, SourceType, starter_config,
};
use portal_studio::store::{ConfigStore, SectionPatch, SettingsKey};

fn block_kind() -> impl Strategy<Value = BlockKind> {
    prop_oneof![
        Just(BlockKind::Html),
        Just(BlockKind::Markdown),
        Just(BlockKind::EmbeddedVideo),
    ]
}

fn video_config() -> impl Strategy<Value = EmbeddedVideoConfig> {
    (
        prop_oneof![Just(SourceType::Single), Just(SourceType::Search), Just(SourceType::List)],
        proptest::option::of("[a-z0-9-]{1,12}"),
        proptest::option::of("[a-z:]{1,16}"),
        prop_oneof![
            Just(DisplayType::Player),
            Just(DisplayType::Grid),
            Just(DisplayType::Carousel),
            Just(DisplayType::Vertical),
            Just(DisplayType::Thumbnail),
        ],
        1u32..=100,
    )
        .prop_map(|(source_type, single_guid, search_query, display_type, size)| EmbeddedVideoConfig {
            source_type,
            single_guid,
            search_query,
            display_type,
            size,
            ..EmbeddedVideoConfig::default()
        })
}

fn blocks() -> impl Strategy<Value = Vec<ContentBlock>> {
    proptest::collection::vec(
        (block_kind(), "[A-Za-z ]{0,16}", "[a-z<>/ ]{0,32}", video_config()),
        0..6,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(index, (kind, title, body, video))| {
                let mut block = ContentBlock::new(format!("block-{}", index), kind, title, body);
                if kind == BlockKind::EmbeddedVideo {
                    block.video_config = Some(video);
                }
                block
            })
            .collect()
    })
}

fn document() -> impl Strategy<Value = PortalConfig> {
    (blocks(), any::<bool>(), 0u32..=120, "[a-z-]{1,12}").prop_map(|(main, visible, gap, alias)| {
        let mut config = starter_config();
        config.main = Arc::new(main);
        Arc::make_mut(&mut config.header_settings).visible = visible;
        Arc::make_mut(&mut config.page_settings).element_gap = f64::from(gap);
        Arc::make_mut(&mut config.portal_settings).alias = alias;
        config
    })
}

/// Names of the top-level subtrees that are the same allocation in both documents
fn shared(a: &PortalConfig, b: &PortalConfig) -> Vec<&'static str> {
    let mut names = Vec::new();
    let mut check = |name: &'static str, same: bool| {
        if same {
            names.push(name);
        }
    };
    check("header", Arc::ptr_eq(&a.header, &b.header));
    check("main", Arc::ptr_eq(&a.main, &b.main));
    check("playerPage", Arc::ptr_eq(&a.player_page, &b.player_page));
    check("footer", Arc::ptr_eq(&a.footer, &b.footer));
    check("menu", Arc::ptr_eq(&a.menu, &b.menu));
    check("headerSettings", Arc::ptr_eq(&a.header_settings, &b.header_settings));
    check("footerSettings", Arc::ptr_eq(&a.footer_settings, &b.footer_settings));
    check("menuSettings", Arc::ptr_eq(&a.menu_settings, &b.menu_settings));
    check("portalSettings", Arc::ptr_eq(&a.portal_settings, &b.portal_settings));
    check("pageSettings", Arc::ptr_eq(&a.page_settings, &b.page_settings));
    names
}

proptest! {
    #[test]
    fn test_move_swaps_neighbours(items in proptest::collection::vec(any::<u8>(), 0..12), index in 0usize..14) {
        let up = moved(&items, index, Direction::Up);
        if index == 0 || index >= items.len() {
            prop_assert!(up.is_none());
        } else {
            let mut expected = items.clone();
            expected.swap(index - 1, index);
            prop_assert_eq!(up, Some(expected));
        }

        let down = moved(&items, index, Direction::Down);
        if index + 1 >= items.len() {
            prop_assert!(down.is_none());
        } else {
            let mut expected = items.clone();
            expected.swap(index, index + 1);
            prop_assert_eq!(down, Some(expected));
        }
    }

    #[test]
    fn test_json_roundtrip(config in document()) {
        let text = serde_json::to_string(&config).unwrap();
        let parsed: PortalConfig = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, config);
    }

    #[test]
    fn test_section_patch_shares_other_subtrees(config in document(), replacement in blocks()) {
        let mut store = ConfigStore::new(config).unwrap();
        let before = store.get();

        store.patch_section(SectionPatch::Main(replacement)).unwrap();

        let after = store.get();
        let unchanged = shared(&before, &after);
        prop_assert!(!unchanged.contains(&"main"));
        prop_assert_eq!(unchanged.len(), 9);
    }

    #[test]
    fn test_nested_page_patch_shares_other_subtrees(config in document(), weight in 0u32..20) {
        let mut store = ConfigStore::new(config).unwrap();
        let before = store.get();

        store.patch_nested_page_setting("divider.weight", json!(weight)).unwrap();

        let after = store.get();
        prop_assert_eq!(after.page_settings.divider.weight, f64::from(weight));
        let unchanged = shared(&before, &after);
        prop_assert!(!unchanged.contains(&"pageSettings"));
        prop_assert_eq!(unchanged.len(), 9);
    }

    #[test]
    fn test_menu_field_patch_shares_other_subtrees(config in document(), visible in any::<bool>()) {
        let mut store = ConfigStore::new(config).unwrap();
        let before = store.get();

        store.patch_settings_field(SettingsKey::Menu, "visible", json!(visible)).unwrap();

        let after = store.get();
        prop_assert_eq!(after.menu_settings.visible, visible);
        let unchanged = shared(&before, &after);
        prop_assert!(!unchanged.contains(&"menuSettings"));
        prop_assert_eq!(unchanged.len(), 9);
    }

    #[test]
    fn test_rejected_patch_leaves_document_untouched(config in document()) {
        let mut store = ConfigStore::new(config).unwrap();
        let before = store.get();
        let revision = store.revision();

        let first = ContentBlock::new("same", BlockKind::Html, "One", "<p>one</p>");
        let twin = ContentBlock::new("same", BlockKind::Markdown, "Two", "");
        prop_assert!(store.patch_section(SectionPatch::Main(vec![first, twin])).is_err());

        prop_assert_eq!(shared(&before, &store.get()).len(), 10);
        prop_assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_player_defaults_mirror_is_stable(auto_play in any::<bool>(), loop_playback in any::<bool>(), muted in any::<bool>(), show_captions in any::<bool>()) {
        let defaults = PlayerDefaults { auto_play, loop_playback, muted, show_captions };
        let mut mirror = JsonMirror::from_value(&defaults);
        let text = mirror.text().to_string();

        let parsed = mirror.edit(text.clone());
        prop_assert_eq!(parsed.as_ref(), Some(&defaults));
        prop_assert_eq!(canonical(&defaults), text);
        prop_assert!(mirror.is_valid());
    }
}

#[test]
fn test_menu_kinds_survive_roundtrip() {
    let mut config = starter_config();
    let kinds: Vec<MenuKind> = config.menu.iter().map(|entry| entry.kind).collect();
    Arc::make_mut(&mut config.menu).reverse();

    let text = serde_json::to_string_pretty(&config).unwrap();
    let parsed: PortalConfig = serde_json::from_str(&text).unwrap();
    let reversed: Vec<MenuKind> = parsed.menu.iter().rev().map(|entry| entry.kind).collect();
    assert_eq!(reversed, kinds);
}
