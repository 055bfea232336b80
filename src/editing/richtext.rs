//! Plain-text projection of HTML bodies for the visual editing mode.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::preview::markup::escape_html;

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>(\s*</p>)?|</(p|div|h[1-6]|li|blockquote|pre|tr)>").expect("block break pattern")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Text a reader would see, one line per block-level element
pub fn html_to_text(html: &str) -> String {
    let broken = BLOCK_BREAK.replace_all(html, "\n");
    let stripped = TAG.replace_all(&broken, "");
    let decoded = decode_entities(&stripped);

    let lines: Vec<&str> = decoded.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

/// Rewrite `original` after its visual text was edited to `text`.
///
/// Lines whose text still matches a block of `original`, in order, keep that
/// block's markup, so an untouched `<h1>` stays a heading. Other lines become
/// paragraphs.
pub fn apply_visual_edit(original: &str, text: &str) -> String {
    if html_to_text(original) == text {
        return original.to_string();
    }

    let blocks = split_blocks(original);
    let mut cursor = 0;
    let mut html = String::new();
    for line in text.lines() {
        let line = line.trim_end();
        let reused = if line.trim().is_empty() {
            None
        } else {
            blocks[cursor..]
                .iter()
                .position(|(block_text, _)| block_text == line)
                .map(|offset| cursor + offset)
        };
        match reused {
            Some(index) => {
                html.push_str(blocks[index].1);
                cursor = index + 1;
            }
            None => html.push_str(&paragraph(line)),
        }
    }
    html
}

/// Top-level blocks of `html` as (visible text, markup). Each block ends at a
/// block break; whitespace between blocks is dropped.
fn split_blocks(html: &str) -> Vec<(String, &str)> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let ends = BLOCK_BREAK.find_iter(html).map(|m| m.end()).chain(std::iter::once(html.len()));
    for end in ends {
        if end <= start {
            continue;
        }
        let markup = html[start..end].trim();
        start = end;
        let text = html_to_text(markup);
        if !text.is_empty() && !text.contains('\n') {
            blocks.push((text, markup));
        }
    }
    blocks
}

fn paragraph(line: &str) -> String {
    if line.trim().is_empty() {
        "<p><br></p>".to_string()
    } else {
        format!("<p>{}</p>", escape_html(line))
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&copy;", "\u{a9}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text() {
        assert_eq!(html_to_text("<h1>Portal Welcome</h1>"), "Portal Welcome");
        assert_eq!(html_to_text("<p>a</p><p>b &amp; c</p>"), "a\nb & c");
        assert_eq!(html_to_text("<p>&copy; 2024 Qumu Inc.</p>"), "\u{a9} 2024 Qumu Inc.");
    }

    #[test]
    fn test_new_lines_become_escaped_paragraphs() {
        assert_eq!(apply_visual_edit("", "a < b\n\nc"), "<p>a &lt; b</p><p><br></p><p>c</p>");
    }

    #[test]
    fn test_visual_edit_keeps_untouched_block_tags() {
        let original = "<h1>Portal Welcome</h1>\n<p>Old intro</p>";
        let edited = apply_visual_edit(original, "Portal Welcome\nNew intro & more");
        assert_eq!(edited, "<h1>Portal Welcome</h1><p>New intro &amp; more</p>");

        let appended = apply_visual_edit(original, "Portal Welcome\nOld intro\n\nThanks");
        assert_eq!(appended, "<h1>Portal Welcome</h1><p>Old intro</p><p><br></p><p>Thanks</p>");
    }

    #[test]
    fn test_visual_edit_without_changes_returns_original() {
        let original = "<div class=\"hero\"><h2>Hi <em>there</em></h2></div>";
        assert_eq!(apply_visual_edit(original, "Hi there"), original);
    }

    #[test]
    fn test_projection_of_generated_markup_is_stable() {
        let text = "first line\n\nsecond & last";
        assert_eq!(html_to_text(&apply_visual_edit("", text)), text);
    }
}
