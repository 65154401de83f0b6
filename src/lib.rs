//! # notion-convert
//!
//! Converts a Korean app design document into markdown that imports cleanly
//! into Notion, either as one file or as one page per `## ` section.
//!
//! ## Features
//!
//! - Emoji-annotated headers and feature list items
//! - `sql`/`dart` code blocks and fixed section labels turned into callouts
//! - Page splitting with a table of contents for long pages
//! - Atomic file writes and a generated import guide
//!
//! ## Quick Start
//!
//! ```no_run
//! use notion_convert::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .input_path("design.md")
//!     .output_dir("./notion")
//!     .build()?;
//!
//! notion_convert::run(config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Transform**: rewrites the document line by line
//! 2. **Splitter**: cuts the document at `## ` headers and converts each section
//! 3. **Decorate / TOC**: adds callouts, divider spacing and tables of contents
//! 4. **Writer**: persists pages, the single file and the import guide

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod decorate;
mod error;
mod pipeline;
mod splitter;
mod template;
mod toc;
mod writer;

pub mod emoji;
pub mod transform;

pub use config::{Config, ConfigBuilder, DEFAULT_INPUT, INSTRUCTIONS_FILE, MANIFEST_FILE};
pub use decorate::add_notion_features;
pub use error::{Error, Result};
pub use pipeline::{ConversionStats, Pipeline};
pub use splitter::{split_sections, Page, Section, SplitOutcome, Splitter};
pub use toc::{clean_title, create_table_of_contents};
pub use transform::{FenceMode, FenceState, LineTransformer};

/// Runs a complete conversion with the given configuration.
///
/// Returns `Ok(None)` when the input file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The input cannot be read or is not UTF-8
/// - Any output file cannot be written
pub fn run(config: Config) -> Result<Option<ConversionStats>> {
    Pipeline::new(config)?.run()
}

/// Converts a whole document with the default rules, without decoration.
///
/// # Examples
///
/// ```
/// assert_eq!(notion_convert::convert_document("## 보안"), "## 🔐 보안");
/// ```
#[must_use]
pub fn convert_document(content: &str) -> String {
    LineTransformer::default().transform_document(content)
}
