use crate::{
    config::{Config, INSTRUCTIONS_FILE, MANIFEST_FILE},
    error::{Error, Result},
    splitter::Page,
};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Manifest describing one conversion run.
#[derive(Debug, Serialize)]
pub(crate) struct Manifest<'a> {
    /// Source document
    pub input: String,

    /// Whole-document output, if written
    pub single_file: Option<String>,

    /// Pages in document order
    pub pages: &'a [Page],

    /// Number of blank sections skipped
    pub skipped_sections: usize,

    /// Generation timestamp
    pub generated_at: String,
}

impl<'a> Manifest<'a> {
    pub(crate) fn new(
        input: &Path,
        single_file: Option<&Path>,
        pages: &'a [Page],
        skipped_sections: usize,
    ) -> Self {
        Self {
            input: input.display().to_string(),
            single_file: single_file.map(|p| p.display().to_string()),
            pages,
            skipped_sections,
            generated_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        }
    }
}

/// Writes converted output files with atomic operations.
pub(crate) struct Writer {
    output_dir: PathBuf,
}

impl Writer {
    /// Creates a new writer from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
        }
    }

    /// Writes every page into the output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or a
    /// file write fails.
    pub(crate) fn write_pages(&self, pages: &[Page]) -> Result<Vec<PathBuf>> {
        self.ensure_output_dir()?;

        info!("Writing {} pages to {}", pages.len(), self.output_dir.display());

        let mut written = Vec::with_capacity(pages.len());
        for page in pages {
            let path = self.output_dir.join(&page.file_name);
            write_file_atomic(&path, &page.content)?;
            debug!(
                "Wrote page {} ({} lines{}) to {}",
                page.index,
                page.lines,
                if page.has_toc { ", with TOC" } else { "" },
                path.display()
            );
            written.push(path);
        }

        Ok(written)
    }

    /// Writes the import guide.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub(crate) fn write_instructions(&self, content: &str) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join(INSTRUCTIONS_FILE);
        write_file_atomic(&path, content)?;
        debug!("Wrote import guide to {}", path.display());
        Ok(path)
    }

    /// Writes the JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub(crate) fn write_manifest(&self, manifest: &Manifest<'_>) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)?;
        write_file_atomic(&path, &json)?;
        info!("Wrote manifest to {}", path.display());
        Ok(path)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))
    }
}

/// Writes a file atomically, replacing any previous content.
///
/// # Process
///
/// 1. Writes content to a temporary sibling file
/// 2. Syncs the temporary file to disk
/// 3. Atomically renames it to the target path
///
/// # Errors
///
/// Returns an error if any step fails.
pub(crate) fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut temp_file = fs::File::create(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    drop(temp_file);

    fs::rename(&temp_path, path)
        .map_err(|e| Error::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config(output_dir: &Path) -> Config {
        Config::builder().output_dir(output_dir).build().unwrap()
    }

    fn create_test_page(index: usize, file_name: &str) -> Page {
        Page {
            index,
            file_name: file_name.to_string(),
            title: Some("보안".to_string()),
            content: "## 🔐 보안\n본문".to_string(),
            lines: 2,
            has_toc: false,
        }
    }

    #[test]
    fn test_writer_creates_output_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let output_dir = temp.child("output");

        let writer = Writer::new(&create_test_config(output_dir.path()));
        writer
            .write_pages(&[create_test_page(0, "notion_page_00_보안.md")])
            .unwrap();

        assert!(output_dir.path().is_dir());
    }

    #[test]
    fn test_writer_creates_page_files() {
        let temp = assert_fs::TempDir::new().unwrap();

        let writer = Writer::new(&create_test_config(temp.path()));
        let pages = [
            create_test_page(1, "notion_page_01_보안.md"),
            create_test_page(2, "notion_page_02_보안.md"),
        ];
        let written = writer.write_pages(&pages).unwrap();

        assert_eq!(written.len(), 2);
        temp.child("notion_page_01_보안.md").assert("## 🔐 보안\n본문");
        temp.child("notion_page_02_보안.md").assert("## 🔐 보안\n본문");
    }

    #[test]
    fn test_existing_file_is_overwritten_without_leftovers() {
        let temp = assert_fs::TempDir::new().unwrap();
        let existing = temp.child("notion_page_00_보안.md");
        existing.write_str("old content").unwrap();

        let writer = Writer::new(&create_test_config(temp.path()));
        writer
            .write_pages(&[create_test_page(0, "notion_page_00_보안.md")])
            .unwrap();

        existing.assert("## 🔐 보안\n본문");
        let entries = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_writer_creates_instructions() {
        let temp = assert_fs::TempDir::new().unwrap();
        let writer = Writer::new(&create_test_config(temp.path()));

        let path = writer.write_instructions("# guide\n").unwrap();

        assert!(path.ends_with(INSTRUCTIONS_FILE));
        temp.child(INSTRUCTIONS_FILE).assert("# guide\n");
    }

    #[test]
    fn test_writer_creates_manifest() {
        let temp = assert_fs::TempDir::new().unwrap();
        let writer = Writer::new(&create_test_config(temp.path()));
        let pages = [create_test_page(1, "notion_page_01_보안.md")];

        let manifest = Manifest::new(Path::new("doc.md"), None, &pages, 1);
        writer.write_manifest(&manifest).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.child(MANIFEST_FILE).path()).unwrap())
                .unwrap();
        assert_eq!(json["input"], "doc.md");
        assert_eq!(json["skipped_sections"], 1);
        assert_eq!(json["pages"][0]["file_name"], "notion_page_01_보안.md");
        assert!(json["pages"][0].get("content").is_none());
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/out.md");

        write_file_atomic(&path, "내용").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "내용");
    }
}
