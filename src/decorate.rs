//! Page-level decoration applied after the line rewrite when splitting.

use once_cell::sync::Lazy;
use regex::Regex;

static IMPORTANT_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*중요\*\*: ([^\n]*)\n").expect("important note pattern is valid"));

static TIP_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*팁\*\*: ([^\n]*)\n").expect("tip pattern is valid"));

/// Adds Notion-specific decoration to an already rewritten page.
///
/// - Horizontal rules get a blank line on each side
/// - `**중요**: ...` becomes a warning callout
/// - `**팁**: ...` becomes an info callout
///
/// A note on the last line is only converted when a newline follows it.
#[must_use]
pub fn add_notion_features(content: &str) -> String {
    let content = content.replace("\n---\n", "\n\n---\n\n");
    let content = IMPORTANT_NOTE.replace_all(&content, "> ⚠️ **중요**: ${1}\n");
    let content = TIP_NOTE.replace_all(&content, "> 💡 **팁**: ${1}\n");
    content.into_owned()
}
