use crate::error::{Error, Result};
use crate::transform::FenceMode;
use std::path::{Path, PathBuf};

/// Design document converted when no input path is given.
pub const DEFAULT_INPUT: &str = "에뷰리띵_플러터_앱_화면_상세_설계서.md";
const DEFAULT_PAGE_PREFIX: &str = "notion_page";
const DEFAULT_TOC_THRESHOLD: usize = 50;
const SINGLE_OUTPUT_SUFFIX: &str = "_notion.md";

/// Name of the generated import guide.
pub const INSTRUCTIONS_FILE: &str = "notion_import_instructions.md";

/// Name of the optional JSON manifest.
pub const MANIFEST_FILE: &str = "notion_manifest.json";

/// Configuration for a conversion run.
///
/// Use [`Config::builder()`] to construct a new configuration. The defaults
/// convert [`DEFAULT_INPUT`] in the current directory into a single file,
/// one file per `## ` section and the import guide.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Markdown document to convert
    pub input_path: PathBuf,

    /// Directory for page files, the import guide and the manifest
    pub output_dir: PathBuf,

    /// Explicit path for the whole-document output
    pub single_output: Option<PathBuf>,

    /// Filename prefix for page files
    pub page_prefix: String,

    /// Pages with more lines than this get a table of contents
    pub toc_threshold: usize,

    /// How bare closing fences are interpreted
    pub fence_mode: FenceMode,

    /// Write the whole-document conversion
    pub single_file: bool,

    /// Write one file per section
    pub split_pages: bool,

    /// Write the import guide
    pub write_instructions: bool,

    /// Write a JSON manifest describing the pages
    pub write_manifest: bool,

    /// Dry run mode (no file writes)
    pub dry_run: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use notion_convert::Config;
    ///
    /// let config = Config::builder()
    ///     .input_path("design.md")
    ///     .output_dir("pages")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The input file is not required to exist: a missing input is reported
    /// at run time and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The page prefix is empty or contains a path separator
    /// - The table of contents threshold is zero
    /// - Every output is disabled
    pub fn validate(&self) -> Result<()> {
        if self.page_prefix.is_empty() {
            return Err(Error::config("page_prefix must not be empty"));
        }

        if self.page_prefix.contains(['/', '\\']) {
            return Err(Error::config(format!(
                "page_prefix must be a plain file name, got '{}'",
                self.page_prefix
            )));
        }

        if self.toc_threshold == 0 {
            return Err(Error::config("toc_threshold must be greater than 0"));
        }

        if !self.single_file && !self.split_pages && !self.write_instructions {
            return Err(Error::config(
                "Nothing to do: enable the single file, page split or import guide output",
            ));
        }

        if self.write_manifest && !self.split_pages {
            tracing::warn!("write_manifest has no pages to describe while split_pages is disabled");
        }

        Ok(())
    }

    /// Returns the path of the whole-document output.
    ///
    /// Defaults to `<input stem>_notion.md` next to the input.
    #[must_use]
    pub fn single_output_path(&self) -> PathBuf {
        if let Some(ref path) = self.single_output {
            return path.clone();
        }

        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = self.input_path.parent().unwrap_or_else(|| Path::new(""));
        parent.join(format!("{stem}{SINGLE_OUTPUT_SUFFIX}"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            single_output: None,
            page_prefix: DEFAULT_PAGE_PREFIX.to_string(),
            toc_threshold: DEFAULT_TOC_THRESHOLD,
            fence_mode: FenceMode::default(),
            single_file: true,
            split_pages: true,
            write_instructions: true,
            write_manifest: false,
            dry_run: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    single_output: Option<PathBuf>,
    page_prefix: Option<String>,
    toc_threshold: Option<usize>,
    fence_mode: Option<FenceMode>,
    single_file: Option<bool>,
    split_pages: Option<bool>,
    write_instructions: Option<bool>,
    write_manifest: bool,
    dry_run: bool,
}

impl ConfigBuilder {
    /// Sets the document to convert.
    #[must_use]
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Sets the directory for page files and the import guide.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Overrides the whole-document output path.
    #[must_use]
    pub fn single_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.single_output = Some(path.into());
        self
    }

    /// Sets the page filename prefix.
    #[must_use]
    pub fn page_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.page_prefix = Some(prefix.into());
        self
    }

    /// Sets the line count above which a page gets a table of contents.
    #[must_use]
    pub fn toc_threshold(mut self, lines: usize) -> Self {
        self.toc_threshold = Some(lines);
        self
    }

    /// Sets the closing fence interpretation.
    #[must_use]
    pub fn fence_mode(mut self, mode: FenceMode) -> Self {
        self.fence_mode = Some(mode);
        self
    }

    /// Enables or disables the whole-document output.
    #[must_use]
    pub fn single_file(mut self, enabled: bool) -> Self {
        self.single_file = Some(enabled);
        self
    }

    /// Enables or disables per-section pages.
    #[must_use]
    pub fn split_pages(mut self, enabled: bool) -> Self {
        self.split_pages = Some(enabled);
        self
    }

    /// Enables or disables the import guide.
    #[must_use]
    pub fn write_instructions(mut self, enabled: bool) -> Self {
        self.write_instructions = Some(enabled);
        self
    }

    /// Enables or disables the JSON manifest.
    #[must_use]
    pub fn write_manifest(mut self, enabled: bool) -> Self {
        self.write_manifest = enabled;
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            input_path: self.input_path.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            single_output: self.single_output,
            page_prefix: self
                .page_prefix
                .unwrap_or_else(|| DEFAULT_PAGE_PREFIX.to_string()),
            toc_threshold: self.toc_threshold.unwrap_or(DEFAULT_TOC_THRESHOLD),
            fence_mode: self.fence_mode.unwrap_or_default(),
            single_file: self.single_file.unwrap_or(true),
            split_pages: self.split_pages.unwrap_or(true),
            write_instructions: self.write_instructions.unwrap_or(true),
            write_manifest: self.write_manifest,
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::builder().build().unwrap();

        assert_eq!(config.input_path, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.page_prefix, "notion_page");
        assert_eq!(config.toc_threshold, 50);
        assert_eq!(config.fence_mode, FenceMode::Lenient);
        assert!(config.single_file && config.split_pages && config.write_instructions);
        assert!(!config.write_manifest);
    }

    #[test]
    fn test_missing_input_is_valid() {
        let result = Config::builder()
            .input_path("/nonexistent/path/that/should/not/exist.md")
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_single_output_path_from_stem() {
        let config = Config::builder().input_path("docs/설계서.md").build().unwrap();
        assert_eq!(config.single_output_path(), PathBuf::from("docs/설계서_notion.md"));

        let config = Config::builder().input_path("plain").build().unwrap();
        assert_eq!(config.single_output_path(), PathBuf::from("plain_notion.md"));
    }

    #[test]
    fn test_single_output_override() {
        let config = Config::builder().single_output("out/all.md").build().unwrap();
        assert_eq!(config.single_output_path(), PathBuf::from("out/all.md"));
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(Config::builder().page_prefix("").build().unwrap_err().is_config());
        assert!(Config::builder().page_prefix("a/b").build().is_err());
    }

    #[test]
    fn test_invalid_toc_threshold() {
        assert!(Config::builder().toc_threshold(0).build().is_err());
    }

    #[test]
    fn test_nothing_to_do() {
        let result = Config::builder()
            .single_file(false)
            .split_pages(false)
            .write_instructions(false)
            .build();

        assert!(result.is_err());
    }
}
