use crate::{
    config::Config,
    error::{Error, Result},
    splitter::{SplitOutcome, Splitter},
    template::TemplateEngine,
    transform::LineTransformer,
    writer::{self, Manifest, Writer},
};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during a conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Size of the input document in bytes
    pub input_bytes: u64,

    /// Whole-document output path, if produced
    pub single_output: Option<PathBuf>,

    /// Page files produced, in document order
    pub pages: Vec<PathBuf>,

    /// Number of blank sections skipped while splitting
    pub skipped_sections: usize,

    /// Number of pages that received a table of contents
    pub toc_pages: usize,

    /// Import guide path, if produced
    pub instructions: Option<PathBuf>,

    /// Manifest path, if produced
    pub manifest: Option<PathBuf>,

    /// Whether file writes were skipped
    pub dry_run: bool,

    /// Time spent on the whole-document conversion
    pub convert_duration: Duration,

    /// Time spent splitting and converting pages
    pub split_duration: Duration,

    /// Total execution time
    pub duration: Duration,
}

impl ConversionStats {
    /// Returns the input size in kilobytes.
    #[must_use]
    pub fn input_kb(&self) -> f64 {
        self.input_bytes as f64 / 1024.0
    }

    /// Prints a human-readable summary and the Notion import steps to stdout.
    pub fn print_summary(&self) {
        println!("\n✅ 변환 완료!");
        if let Some(ref single) = self.single_output {
            println!("📁 단일 파일: {}", single.display());
        }
        println!("📚 페이지 파일들: {}개", self.pages.len());
        if self.toc_pages > 0 {
            println!("📑 목차가 추가된 페이지: {}개", self.toc_pages);
        }
        if self.dry_run {
            println!("⚠ 파일을 쓰지 않았습니다 (dry run)");
        }
        println!("⏱  {:.2}s", self.duration.as_secs_f64());

        println!("\n📋 Notion 가져오기 방법:");
        println!("1. Notion에서 새 페이지 생성");
        println!("2. '가져오기' 또는 'Import' 클릭");
        println!("3. 'Markdown' 선택");
        println!("4. 변환된 .md 파일 업로드");
        println!("5. 🎉 완료!");

        if let Some(ref guide) = self.instructions {
            println!("📋 가져오기 가이드: {}", guide.display());
        }
    }
}

/// Orchestrates a conversion run.
pub struct Pipeline {
    config: Config,
    transformer: LineTransformer,
    splitter: Splitter,
    writer: Writer,
    templates: TemplateEngine,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Template registration fails
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            transformer: LineTransformer::new(config.fence_mode),
            splitter: Splitter::new(&config),
            writer: Writer::new(&config),
            templates: TemplateEngine::new()?,
            config,
        })
    }

    /// Executes the conversion and returns statistics.
    ///
    /// Returns `Ok(None)` without producing any output when the input file
    /// does not exist.
    ///
    /// # Process
    ///
    /// 1. **Single file**: rewrites the whole document line by line
    /// 2. **Pages**: splits at `## ` headers, converts and decorates each section
    /// 3. **Guide**: renders the import instructions
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing any output fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use notion_convert::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .input_path("design.md")
    ///     .build()?;
    ///
    /// if let Some(stats) = Pipeline::new(config)?.run()? {
    ///     stats.print_summary();
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(input = %self.config.input_path.display()))]
    pub fn run(self) -> Result<Option<ConversionStats>> {
        let start_time = Instant::now();
        let input = &self.config.input_path;

        if !input.exists() {
            warn!("Input file not found, nothing to convert");
            println!("❌ 파일을 찾을 수 없습니다: {}", input.display());
            return Ok(None);
        }

        let input_bytes = fs::metadata(input)
            .map_err(|e| Error::io(input, e))?
            .len();

        let mut stats = ConversionStats {
            input_bytes,
            dry_run: self.config.dry_run,
            ..ConversionStats::default()
        };
        println!("📊 파일 크기: {:.1} KB", stats.input_kb());

        if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file writes");
        }

        if self.config.single_file {
            println!("\n🔄 옵션 1: 단일 파일 변환");
            let convert_start = Instant::now();
            stats.single_output = Some(self.convert_single()?);
            stats.convert_duration = convert_start.elapsed();
        }

        let mut outcome = SplitOutcome::default();
        if self.config.split_pages {
            println!("\n🔄 옵션 2: 여러 페이지로 분할");
            let split_start = Instant::now();
            outcome = self.create_pages()?;
            stats.skipped_sections = outcome.skipped;
            stats.toc_pages = outcome.pages.iter().filter(|p| p.has_toc).count();
            stats.pages = outcome
                .pages
                .iter()
                .map(|p| self.config.output_dir.join(&p.file_name))
                .collect();
            stats.split_duration = split_start.elapsed();
        }

        if self.config.write_instructions {
            let guide = self.templates.render_instructions(&self.config)?;
            stats.instructions = Some(if self.config.dry_run {
                self.config.output_dir.join(crate::config::INSTRUCTIONS_FILE)
            } else {
                self.writer.write_instructions(&guide)?
            });
        }

        if self.config.write_manifest && !self.config.dry_run {
            let manifest = Manifest::new(
                input,
                stats.single_output.as_deref(),
                &outcome.pages,
                outcome.skipped,
            );
            stats.manifest = Some(self.writer.write_manifest(&manifest)?);
        }

        stats.duration = start_time.elapsed();
        info!(
            "✓ Conversion completed in {:.2}s ({} pages)",
            stats.duration.as_secs_f64(),
            stats.pages.len()
        );

        Ok(Some(stats))
    }

    /// Converts the whole document into a single Notion file.
    fn convert_single(&self) -> Result<PathBuf> {
        let input = &self.config.input_path;
        let content = read_document(input)?;
        let converted = self.transformer.transform_document(&content);
        let output = self.config.single_output_path();

        if !self.config.dry_run {
            writer::write_file_atomic(&output, &converted)?;
        }

        println!("✅ Converted successfully!");
        println!("📁 Input: {}", input.display());
        println!("📁 Output: {}", output.display());
        println!("📄 Ready to import into Notion!");

        Ok(output)
    }

    /// Splits the document into pages and writes one file per page.
    fn create_pages(&self) -> Result<SplitOutcome> {
        let content = read_document(&self.config.input_path)?;
        let outcome = self.splitter.split(&content);

        if !self.config.dry_run {
            self.writer.write_pages(&outcome.pages)?;
        }

        for page in &outcome.pages {
            println!("📄 Created: {}", page.file_name);
        }

        Ok(outcome)
    }
}

/// Reads a UTF-8 document.
fn read_document(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::FenceMode;
    use assert_fs::prelude::*;

    const DOC: &str = "# 📱 설계서\n소개\n\n## 보안\n**중요**: 반드시 확인\n- **로그인 버튼**: 탭\n\n## 배포\n```sql\nSELECT 1;\n```\n";

    fn create_test_config(root: &Path) -> Config {
        Config::builder()
            .input_path(root.join("design.md"))
            .output_dir(root.join("out"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_basic_execution() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("design.md").write_str(DOC).unwrap();

        let stats = Pipeline::new(create_test_config(temp.path()))
            .unwrap()
            .run()
            .unwrap()
            .unwrap();

        assert_eq!(stats.input_bytes, DOC.len() as u64);
        assert_eq!(stats.pages.len(), 3);
        assert_eq!(stats.skipped_sections, 0);

        let single_text = fs::read_to_string(temp.child("design_notion.md").path()).unwrap();
        assert!(single_text.starts_with("# 📱 설계서\n소개\n\n## 🔐 보안\n"));
        assert!(single_text.contains("**중요**: 반드시 확인"));
        assert!(!single_text.contains("⚠️"));

        let out = temp.child("out");
        out.child("notion_page_00.md").assert("# 📱 설계서\n소개\n");
        let security = fs::read_to_string(out.child("notion_page_01_보안.md").path()).unwrap();
        assert_eq!(
            security,
            "## 🔐 보안\n> ⚠️ **중요**: 반드시 확인\n- 🔘**로그인 버튼**: 탭\n"
        );
        let deploy = fs::read_to_string(out.child("notion_page_02_배포.md").path()).unwrap();
        assert_eq!(
            deploy,
            "## 🚀 배포\n> 💾 **데이터베이스 쿼리**\n> ```sql\nSELECT 1;\n> ```\n"
        );
        assert!(out.child(crate::config::INSTRUCTIONS_FILE).path().exists());
        assert!(!out.child(crate::config::MANIFEST_FILE).path().exists());
    }

    #[test]
    fn test_pipeline_missing_input_is_soft() {
        let temp = assert_fs::TempDir::new().unwrap();

        let stats = Pipeline::new(create_test_config(temp.path()))
            .unwrap()
            .run()
            .unwrap();

        assert!(stats.is_none());
        assert!(!temp.child("out").path().exists());
        assert!(!temp.child("design_notion.md").path().exists());
    }

    #[test]
    fn test_pipeline_dry_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("design.md").write_str(DOC).unwrap();

        let config = Config::builder()
            .input_path(temp.path().join("design.md"))
            .output_dir(temp.path().join("out"))
            .write_manifest(true)
            .dry_run(true)
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run().unwrap().unwrap();

        assert!(stats.dry_run);
        assert_eq!(stats.pages.len(), 3);
        assert!(stats.manifest.is_none());
        assert!(!temp.child("out").path().exists());
        assert!(!temp.child("design_notion.md").path().exists());
    }

    #[test]
    fn test_pipeline_manifest_and_tracked_fences() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("design.md")
            .write_str("## 예약\n```bash\nls\n```\n")
            .unwrap();

        let config = Config::builder()
            .input_path(temp.path().join("design.md"))
            .output_dir(temp.path().join("out"))
            .fence_mode(FenceMode::Tracked)
            .write_manifest(true)
            .write_instructions(false)
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run().unwrap().unwrap();

        assert!(stats.instructions.is_none());
        let manifest = stats.manifest.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(manifest).unwrap()).unwrap();
        assert_eq!(json["pages"][0]["file_name"], "notion_page_00_예약.md");

        let single = fs::read_to_string(temp.child("design_notion.md").path()).unwrap();
        assert_eq!(single, "## 📅 예약\n```bash\nls\n```\n");
    }

    #[test]
    fn test_pipeline_rejects_invalid_utf8() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("design.md").write_binary(&[0xff, 0xfe, 0x00]).unwrap();

        let err = Pipeline::new(create_test_config(temp.path()))
            .unwrap()
            .run()
            .unwrap_err();

        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_stats_input_kb() {
        let stats = ConversionStats {
            input_bytes: 2048,
            ..ConversionStats::default()
        };
        assert!((stats.input_kb() - 2.0).abs() < f64::EPSILON);
    }
}
