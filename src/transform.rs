//! Line-by-line rewriting of design-document markdown into Notion markdown.
//!
//! Each input line produces exactly one output string, which may itself span
//! several lines (code-block callouts, section callouts). Rules are tried in a
//! fixed priority order and the first one that applies wins:
//!
//! 1. Headers get an emoji chosen from [`HEADER_EMOJIS`]
//! 2. `sql`/`dart` fence openers become a quoted callout header plus a quoted fence
//! 3. A bare closing fence becomes a quoted fence when it closes a callout block
//! 4. Fixed bolded section labels become blank-line separated callouts
//! 5. `- **term**: rest` list items get an emoji from [`FEATURE_EMOJIS`]
//!
//! Anything else is returned unchanged. Matching is textual: a section label
//! inside a code sample still triggers rule 4.

use crate::emoji::{self, FEATURE_EMOJIS, HEADER_EMOJIS};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

const FENCE: &str = "```";

/// Recognized fence openers and the callout lines that replace them.
const CODE_CALLOUTS: &[(&str, &str)] = &[
    ("```sql", "> 💾 **데이터베이스 쿼리**\n> ```sql"),
    ("```dart", "> 📱 **Flutter/Dart 코드**\n> ```dart"),
];

/// Bolded section labels and their callout replacements.
const SECTION_CALLOUTS: &[(&str, &str)] = &[
    ("**UI/UX 구현 상세**", "\n> 🎨 **UI/UX 구현 상세**\n>"),
    ("**데이터베이스 상호작용**", "\n> 💾 **데이터베이스 상호작용**\n>"),
    ("**기능 및 로직**", "\n> ⚡ **기능 및 로직**\n>"),
    ("**BLoC 구조**", "\n> 🏗️ **BLoC 아키텍처**\n>"),
];

static FEATURE_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)- \*\*(.*?)\*\*:(.*)").expect("feature item pattern is valid"));

/// How bare closing fences are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceMode {
    /// Every bare fence is treated as closing a callout block.
    #[default]
    Lenient,
    /// Only a fence that closes a `sql`/`dart` block is quoted.
    Tracked,
}

/// Position of the line scanner relative to fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceState {
    /// Not inside any fenced block.
    #[default]
    Outside,
    /// Inside a block opened by a recognized (`sql`/`dart`) fence.
    InCallout,
    /// Inside a block opened by any other fence.
    InPlain,
}

/// Applies the rewrite rules to single lines or whole documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTransformer {
    mode: FenceMode,
}

impl LineTransformer {
    /// Creates a transformer with the given fence interpretation.
    #[must_use]
    pub const fn new(mode: FenceMode) -> Self {
        Self { mode }
    }

    /// Returns the fence mode in use.
    #[must_use]
    pub const fn mode(&self) -> FenceMode {
        self.mode
    }

    /// Rewrites every line of `content`.
    ///
    /// Lines are split on `\n` and joined back with `\n`, so untouched lines
    /// (trailing `\r` included) come out byte-identical.
    #[must_use]
    pub fn transform_document(&self, content: &str) -> String {
        let mut state = FenceState::default();
        let mut rewritten = 0usize;

        let lines: Vec<String> = content
            .split('\n')
            .map(|line| {
                let out = self.transform_line(line, &mut state);
                if out != line {
                    rewritten += 1;
                }
                out
            })
            .collect();

        debug!("Rewrote {} of {} lines", rewritten, lines.len());
        lines.join("\n")
    }

    /// Rewrites a single line, advancing the fence `state`.
    #[must_use]
    pub fn transform_line(&self, line: &str, state: &mut FenceState) -> String {
        if line.starts_with('#') {
            return convert_header(line);
        }

        if line.starts_with(FENCE) {
            if let Some(&(_, callout)) = CODE_CALLOUTS.iter().find(|(tag, _)| line.starts_with(tag)) {
                *state = FenceState::InCallout;
                trace!("Opened callout code block: {}", line);
                return callout.to_string();
            }

            if line == FENCE {
                let quote = self.closes_callout(*state);
                *state = match *state {
                    FenceState::Outside => FenceState::InPlain,
                    FenceState::InCallout | FenceState::InPlain => FenceState::Outside,
                };
                if quote {
                    return format!("> {FENCE}");
                }
                return line.to_string();
            }

            if *state == FenceState::Outside {
                *state = FenceState::InPlain;
            }
        }

        if let Some(&(_, callout)) = SECTION_CALLOUTS.iter().find(|(label, _)| line.contains(label)) {
            return callout.to_string();
        }

        if line.trim_start().starts_with("- **") {
            return convert_feature_item(line);
        }

        line.to_string()
    }

    const fn closes_callout(&self, state: FenceState) -> bool {
        match self.mode {
            FenceMode::Lenient => true,
            FenceMode::Tracked => matches!(state, FenceState::InCallout),
        }
    }
}

/// Rewrites a header line, keeping its level and prefixing a matching emoji.
fn convert_header(line: &str) -> String {
    let level = line.len() - line.trim_start_matches('#').len();
    let title = line[level..].trim();
    let emoji = emoji::lookup(HEADER_EMOJIS, title)
        .map(|e| format!("{e} "))
        .unwrap_or_default();

    format!("{} {emoji}{title}", &line[..level])
}

/// Inserts a feature emoji right before the bolded term of a list item.
fn convert_feature_item(line: &str) -> String {
    let Some(caps) = FEATURE_ITEM.captures(line) else {
        return line.to_string();
    };

    let indent = &caps[1];
    let term = &caps[2];
    let rest = &caps[3];
    let emoji = emoji::lookup(FEATURE_EMOJIS, term).unwrap_or("");

    format!("{indent}- {emoji}**{term}**:{rest}")
}
