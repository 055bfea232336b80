//! Structural markup for the preview regions.

use pulldown_cmark::{Options, Parser, html};
use std::fmt::Write;

use crate::portal::{BlockKind, ContentBlock, FooterSettings, HeaderSettings, MenuEntry, MenuSettings, Padding, PortalSettings};

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, opts);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Chrome padding for header and footer
pub fn region_padding(padding: Padding) -> &'static str {
    match padding {
        Padding::Compact => "1rem 2rem",
        Padding::Normal => "2rem",
        Padding::Spacious => "3rem 2rem",
    }
}

pub fn menu_padding(padding: Padding) -> &'static str {
    match padding {
        Padding::Compact => "0.5rem 2rem",
        Padding::Normal => "1rem 2rem",
        Padding::Spacious => "2rem 2rem",
    }
}

/// One content block. HTML is injected as authored; markdown is rendered;
/// embedded video becomes a placeholder carrying its config summary.
pub fn block(block: &ContentBlock) -> String {
    match block.kind {
        BlockKind::Html => format!(
            "<div class=\"prose\" data-block=\"{}\">{}</div>",
            escape_html(&block.id),
            block.body
        ),
        BlockKind::Markdown => format!(
            "<div class=\"prose\" data-block=\"{}\">{}</div>",
            escape_html(&block.id),
            markdown_to_html(&block.body)
        ),
        BlockKind::EmbeddedVideo => {
            let (display, summary) = match &block.video_config {
                Some(config) => (config.display_type.label(), config.source_summary()),
                None => ("Unconfigured", "no source configured".to_string()),
            };
            format!(
                "<div class=\"video-widget\" data-block=\"{}\"><div class=\"play\"></div>\
                 <h5>Qumu {} Widget</h5><p class=\"video-source\">{}</p></div>",
                escape_html(&block.id),
                escape_html(display),
                escape_html(&summary)
            )
        }
    }
}

pub fn blocks(blocks: &[ContentBlock]) -> String {
    blocks.iter().map(block).collect()
}

pub fn header(settings: &HeaderSettings, content: &[ContentBlock]) -> String {
    let position = if settings.is_sticky {
        "position: sticky; top: 0; z-index: 40;"
    } else {
        "position: relative;"
    };
    let mut out = String::new();
    let _ = write!(
        out,
        "<header class=\"portal-header\" style=\"{} background-color: {}; color: {}; border-bottom: 1px solid #e2e8f0;\">",
        position,
        escape_html(&settings.background_color),
        escape_html(&settings.text_color)
    );
    let _ = write!(
        out,
        "<div style=\"padding: {}; display: flex; flex-direction: column; align-items: {};\">",
        region_padding(settings.padding),
        settings.justification.flex_value()
    );

    if settings.show_logo || settings.show_search {
        out.push_str("<div class=\"header-bar\" style=\"width: 100%; display: flex; align-items: center; justify-content: space-between; margin-bottom: 1rem;\">");
        if settings.show_logo {
            if settings.logo_url.trim().is_empty() {
                out.push_str("<span class=\"logo-placeholder\">&#9638;</span>");
            } else {
                let _ = write!(
                    out,
                    "<img class=\"logo\" src=\"{}\" alt=\"Logo\" style=\"height: 2rem;\">",
                    escape_html(&settings.logo_url)
                );
            }
        }
        if settings.show_search {
            out.push_str("<input class=\"search\" type=\"text\" placeholder=\"Search...\" disabled style=\"max-width: 20rem; width: 100%; opacity: 0.5; border-radius: 9999px;\">");
        }
        out.push_str("</div>");
    }

    let _ = write!(out, "<div style=\"width: 100%;\">{}</div></div></header>", blocks(content));
    out
}

pub fn nav(settings: &MenuSettings, entries: &[MenuEntry]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<nav style=\"background-color: {};\"><ul style=\"display: flex; flex-wrap: wrap; gap: 2rem; list-style: none; margin: 0; padding: {}; justify-content: {};\">",
        escape_html(&settings.background_color),
        menu_padding(settings.padding),
        settings.justification.flex_value()
    );
    for entry in entries.iter().filter(|entry| entry.visible) {
        let _ = write!(
            out,
            "<li><a href=\"{}\" style=\"font-size: 0.875rem; font-weight: 700; text-transform: uppercase; letter-spacing: 0.1em;\">{}</a></li>",
            escape_html(&entry.resolved_url()),
            escape_html(&entry.label)
        );
    }
    out.push_str("</ul></nav>");
    out
}

pub fn portal_button() -> &'static str {
    "<div style=\"display: flex; justify-content: center; margin-top: 2rem;\"><button class=\"portal-btn\">Standard Portal Button</button></div>"
}

pub fn player_surface() -> &'static str {
    "<div class=\"player\" style=\"width: 100%; aspect-ratio: 16 / 9; background: #000; border-radius: 1.5rem; position: relative;\">\
     <div class=\"play\"></div>\
     <div style=\"position: absolute; bottom: 0; left: 0; right: 0; height: 0.5rem; background: #1e293b;\"><div style=\"height: 100%; width: 33%; background: #4f46e5;\"></div></div>\
     </div>"
}

/// Simulated metadata row: title, upload date, view count and likes
pub fn player_metadata(portal: &PortalSettings) -> String {
    let mut out = String::from(
        "<div class=\"player-meta\"><div><h2>Sample Presentation Title</h2><div class=\"meta-line\"><span>Uploaded: Dec 12, 2024</span>",
    );
    if portal.show_view_counts {
        out.push_str("<span> &bull; 1,245 Views</span>");
    }
    out.push_str("</div></div>");
    if portal.enable_likes {
        out.push_str("<button class=\"likes\">128 Likes</button>");
    }
    out.push_str("</div>");
    out
}

pub const SAMPLE_COMMENTS: [(&str, &str, &str); 2] = [
    ("John Doe", "2 hours ago", "This content was very helpful, thank you for sharing!"),
    ("Jane Smith", "Yesterday", "I loved the clear explanation in the second half of the video."),
];

pub fn comments() -> String {
    let mut out = format!("<section class=\"comments\"><h3>Comments ({})</h3>", SAMPLE_COMMENTS.len());
    for (author, when, text) in SAMPLE_COMMENTS {
        let _ = write!(
            out,
            "<div class=\"comment\"><strong>{}</strong> <small>{}</small><p><em>{}</em></p></div>",
            author, when, text
        );
    }
    out.push_str("</section>");
    out
}

pub fn footer(settings: &FooterSettings, content: &[ContentBlock]) -> String {
    format!(
        "<footer class=\"portal-footer\" style=\"background-color: {}; color: {}; border-top: 1px solid #e2e8f0;\">\
         <div style=\"padding: {}; display: flex; flex-direction: column; align-items: {};\"><div style=\"width: 100%;\">{}</div></div></footer>",
        escape_html(&settings.background_color),
        escape_html(&settings.text_color),
        region_padding(settings.padding),
        settings.justification.flex_value(),
        blocks(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{DisplayType, EmbeddedVideoConfig};

    #[test]
    fn test_markdown_block_is_rendered() {
        let md = ContentBlock::new("3", BlockKind::Markdown, "Intro", "### Welcome");
        assert!(block(&md).contains("<h3>Welcome</h3>"));
    }

    #[test]
    fn test_html_block_is_raw() {
        let html = ContentBlock::new("1", BlockKind::Html, "Header", "<h1>Portal Welcome</h1>");
        assert!(block(&html).contains("<h1>Portal Welcome</h1>"));
    }

    #[test]
    fn test_video_placeholder_summary() {
        let mut video = ContentBlock::new("2", BlockKind::EmbeddedVideo, "Featured", "");
        assert!(block(&video).contains("Qumu Unconfigured Widget"));
        video.video_config = Some(EmbeddedVideoConfig {
            display_type: DisplayType::Carousel,
            ..EmbeddedVideoConfig::for_search("trending:all")
        });
        let out = block(&video);
        assert!(out.contains("Qumu Carousel Widget"));
        assert!(out.contains("search &quot;trending:all&quot;"));
    }

    #[test]
    fn test_nav_skips_hidden_entries() {
        let entries = crate::portal::starter_config().menu.as_ref().clone();
        let mut hidden = entries.clone();
        hidden[1].visible = false;
        let out = nav(&MenuSettings::default(), &hidden);
        assert!(out.contains(">Home<"));
        assert!(!out.contains(">Videos<"));
    }

    #[test]
    fn test_metadata_flags() {
        let mut portal = PortalSettings::default();
        portal.show_view_counts = false;
        let out = player_metadata(&portal);
        assert!(!out.contains("1,245 Views"));
        assert!(out.contains("128 Likes"));
    }
}
