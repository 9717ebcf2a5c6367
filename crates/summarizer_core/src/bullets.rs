//! Turns free-text summary/suggestion fields into discrete list items.
//!
//! The upstream generator mixes bullet glyphs, hyphens and numbered markers,
//! and leaks a few formatting artifacts. The split and discard rules below are
//! a literal contract with that output, not a general markdown parser.

use std::sync::LazyLock;

use regex::Regex;

pub const NOT_AVAILABLE: &str = "Not available.";

const COMBINED_OUTPUTS_HEADER: &str = "here are the combined outputs:";
const ARTIFACTS: [&str; 2] = ["**", "****"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulletBlock {
    /// The field was absent or empty.
    NotAvailable,
    /// Nothing survived filtering; the original text is shown as-is.
    Paragraph(String),
    List(Vec<String>),
}

pub fn format_bullets(text: Option<&str>) -> BulletBlock {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return BulletBlock::NotAvailable,
    };

    let items: Vec<String> = split_fragments(text)
        .into_iter()
        .map(trim_fragment)
        .filter(|fragment| keep_fragment(fragment))
        .map(ToOwned::to_owned)
        .collect();

    if items.is_empty() {
        BulletBlock::Paragraph(text.to_string())
    } else {
        BulletBlock::List(items)
    }
}

fn keep_fragment(fragment: &str) -> bool {
    !fragment.is_empty()
        && fragment.to_lowercase() != COMBINED_OUTPUTS_HEADER
        && !ARTIFACTS.contains(&fragment)
}

/// `\n` (with an optional preceding `\r`), `•`, `-`, or ASCII digits followed by `.`.
static BULLET_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n|•|-|[0-9]+\.").unwrap());

fn split_fragments(text: &str) -> Vec<&str> {
    BULLET_SPLIT.split(text).collect()
}

/// Whitespace plus the byte order mark, which `str::trim` keeps.
fn trim_fragment(fragment: &str) -> &str {
    fragment.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::{format_bullets, split_fragments, BulletBlock};
    use pretty_assertions::assert_eq;

    fn list(items: &[&str]) -> BulletBlock {
        BulletBlock::List(items.iter().map(|item| item.to_string()).collect())
    }

    #[test]
    fn absent_or_empty_is_not_available() {
        assert_eq!(format_bullets(None), BulletBlock::NotAvailable);
        assert_eq!(format_bullets(Some("")), BulletBlock::NotAvailable);
    }

    #[test]
    fn hyphen_lines_become_items() {
        assert_eq!(
            format_bullets(Some("- First item\n- Second item")),
            list(&["First item", "Second item"])
        );
    }

    #[test]
    fn bullet_glyphs_and_crlf_are_separators() {
        assert_eq!(
            format_bullets(Some("• alpha\r\n• beta\r\n")),
            list(&["alpha", "beta"])
        );
    }

    #[test]
    fn numbered_markers_are_separators() {
        assert_eq!(
            format_bullets(Some("1. one 2. two\n10. ten")),
            list(&["one", "two", "ten"])
        );
    }

    #[test]
    fn digits_without_period_stay_in_text() {
        assert_eq!(
            format_bullets(Some("Revenue grew 12 percent")),
            list(&["Revenue grew 12 percent"])
        );
    }

    #[test]
    fn decimals_and_hyphenated_words_are_split() {
        assert_eq!(
            format_bullets(Some("pi is 3.14 and well-known")),
            list(&["pi is", "14 and well", "known"])
        );
    }

    #[test]
    fn combined_outputs_header_is_dropped_in_any_case() {
        assert_eq!(
            format_bullets(Some("HERE ARE THE COMBINED OUTPUTS:\n• Real point")),
            list(&["Real point"])
        );
        assert_eq!(
            format_bullets(Some("Here are the combined outputs:\nReal point")),
            list(&["Real point"])
        );
    }

    #[test]
    fn asterisk_artifacts_are_dropped() {
        assert_eq!(
            format_bullets(Some("**\n• kept\n****\n***")),
            list(&["kept", "***"])
        );
    }

    #[test]
    fn all_discarded_falls_back_to_paragraph() {
        let text = "**\n - \n****";
        assert_eq!(
            format_bullets(Some(text)),
            BulletBlock::Paragraph(text.to_string())
        );
        assert_eq!(
            format_bullets(Some("   ")),
            BulletBlock::Paragraph("   ".to_string())
        );
    }

    #[test]
    fn split_keeps_leading_and_trailing_fragments() {
        assert_eq!(split_fragments("-a-"), vec!["", "a", ""]);
        assert_eq!(split_fragments("abc"), vec!["abc"]);
        assert_eq!(split_fragments("7."), vec!["", ""]);
        assert_eq!(split_fragments("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn non_ascii_digits_are_not_markers() {
        assert_eq!(
            format_bullets(Some("step ٣. next")),
            list(&["step ٣. next"])
        );
    }

    #[test]
    fn byte_order_mark_is_trimmed_like_whitespace() {
        assert_eq!(format_bullets(Some("\u{FEFF}\n- a")), list(&["a"]));
        assert_eq!(
            format_bullets(Some("\u{FEFF}first\u{FEFF}\n• second")),
            list(&["first", "second"])
        );
    }
}
