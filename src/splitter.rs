use crate::{
    config::Config,
    decorate,
    toc,
    transform::LineTransformer,
};
use memchr::memmem;
use serde::Serialize;
use tracing::{debug, trace};

const SECTION_BOUNDARY: &[u8] = b"\n## ";
const SECTION_MARKER: &str = "## ";

/// A contiguous slice of the source document starting at a `## ` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Position among all sections, blank ones included (0-based)
    pub index: usize,

    /// Raw section text, header line first
    pub content: &'a str,
}

impl<'a> Section<'a> {
    /// Returns the header text when the section starts with a `## ` header.
    #[must_use]
    pub fn title(&self) -> Option<&'a str> {
        let rest = self.content.strip_prefix(SECTION_MARKER)?;
        let title = rest.split('\n').next().unwrap_or_default();
        (!title.is_empty()).then_some(title)
    }

    /// Returns true if the section holds nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Builds the output filename, e.g. `notion_page_03_로그인_화면.md`.
    #[must_use]
    pub fn file_name(&self, prefix: &str) -> String {
        match self.title() {
            Some(title) => {
                let clean = toc::clean_title(title).replace(' ', "_");
                format!("{prefix}_{:02}_{clean}.md", self.index)
            }
            None => format!("{prefix}_{:02}.md", self.index),
        }
    }
}

/// Splits `content` before every line starting with `## `.
///
/// The newline preceding a header is consumed so that each header is the
/// first line of its section and no other line is duplicated or dropped.
#[must_use]
pub fn split_sections(content: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut start = 0;

    for pos in memmem::find_iter(content.as_bytes(), SECTION_BOUNDARY) {
        sections.push(Section {
            index: sections.len(),
            content: &content[start..pos],
        });
        start = pos + 1;
    }

    sections.push(Section {
        index: sections.len(),
        content: &content[start..],
    });

    sections
}

/// A fully converted section, ready to be written.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Index of the source section (0-based, gaps where blank sections were skipped)
    pub index: usize,

    /// Output filename
    pub file_name: String,

    /// Raw `## ` header text, if any
    pub title: Option<String>,

    /// Converted markdown
    #[serde(skip)]
    pub content: String,

    /// Number of lines in the converted page, table of contents included
    pub lines: usize,

    /// Whether a table of contents was prepended
    pub has_toc: bool,
}

/// Result of splitting a document into pages.
#[derive(Debug, Clone, Default)]
pub struct SplitOutcome {
    /// Converted pages in document order
    pub pages: Vec<Page>,

    /// Number of whitespace-only sections that were skipped
    pub skipped: usize,
}

/// Splits a document into pages and converts each one.
#[derive(Debug, Clone)]
pub struct Splitter {
    transformer: LineTransformer,
    page_prefix: String,
    toc_threshold: usize,
}

impl Splitter {
    /// Creates a new splitter from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            transformer: LineTransformer::new(config.fence_mode),
            page_prefix: config.page_prefix.clone(),
            toc_threshold: config.toc_threshold,
        }
    }

    /// Splits `content` into sections and converts every non-blank one.
    ///
    /// Each page goes through the line rewrite, then decoration, and gets a
    /// table of contents when it has more lines than the threshold.
    #[must_use]
    pub fn split(&self, content: &str) -> SplitOutcome {
        let mut outcome = SplitOutcome::default();

        for section in split_sections(content) {
            if section.is_blank() {
                debug!("Skipping blank section {}", section.index);
                outcome.skipped += 1;
                continue;
            }
            outcome.pages.push(self.convert_section(&section));
        }

        debug!(
            "Split into {} pages ({} blank sections skipped)",
            outcome.pages.len(),
            outcome.skipped
        );

        outcome
    }

    /// Converts a single section into a page.
    fn convert_section(&self, section: &Section<'_>) -> Page {
        let processed = self.transformer.transform_document(section.content);
        let mut processed = decorate::add_notion_features(&processed);

        let line_count = processed.split('\n').count();
        let has_toc = line_count > self.toc_threshold;
        if has_toc {
            trace!(
                "Section {} has {} lines, adding table of contents with {} entries",
                section.index,
                line_count,
                toc::header_count(&processed)
            );
            processed = toc::create_table_of_contents(&processed) + &processed;
        }

        Page {
            index: section.index,
            file_name: section.file_name(&self.page_prefix),
            title: section.title().map(str::to_string),
            lines: processed.split('\n').count(),
            content: processed,
            has_toc,
        }
    }
}
