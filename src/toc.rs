//! Table-of-contents generation for long pages.

use once_cell::sync::Lazy;
use regex::Regex;

/// Title line placed above the generated bullet list.
pub const TOC_TITLE: &str = "# 📚 목차";

static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#+)\s+(.*?)$").expect("header line pattern is valid"));

/// Strips everything except word characters, whitespace and Hangul syllables,
/// then trims the result.
///
/// Emoji and punctuation added by the line rewrite are removed this way.
#[must_use]
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace() || ('가'..='힣').contains(&c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Builds a table of contents for every header in `content`.
///
/// Each header becomes a bullet indented by two spaces per level below the
/// first. The result ends with a divider and a blank line, ready to be
/// prepended to the page.
#[must_use]
pub fn create_table_of_contents(content: &str) -> String {
    let mut toc_lines = vec![format!("{TOC_TITLE}\n")];

    for caps in HEADER_LINE.captures_iter(content) {
        let level = caps[1].len();
        let indent = "  ".repeat(level - 1);
        toc_lines.push(format!("{indent}- {}", clean_title(&caps[2])));
    }

    toc_lines.push("\n---\n".to_string());
    toc_lines.join("\n") + "\n"
}

/// Returns how many bullets [`create_table_of_contents`] would emit.
#[must_use]
pub(crate) fn header_count(content: &str) -> usize {
    HEADER_LINE.find_iter(content).count()
}
