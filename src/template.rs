use crate::{
    config::Config,
    error::{Error, Result},
};
use serde::Serialize;
use tera::{Context, Tera};

const INSTRUCTIONS_TEMPLATE: &str = "import_instructions.md";
const DEFAULT_DOCUMENT_TITLE: &str = "에뷰리띵 플러터 앱 설계서";

#[derive(Serialize)]
struct InstructionsContext<'a> {
    single_file: Option<String>,
    page_prefix: Option<&'a str>,
    document_title: String,
}

/// Template engine for the static import guide.
pub(crate) struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Creates a new template engine with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if template registration fails.
    pub(crate) fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template(
            INSTRUCTIONS_TEMPLATE,
            include_str!("../templates/import_instructions.tera"),
        )
        .map_err(|e| Error::template(INSTRUCTIONS_TEMPLATE, e))?;

        Ok(Self { tera })
    }

    /// Renders the import guide for the outputs enabled in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub(crate) fn render_instructions(&self, config: &Config) -> Result<String> {
        let single_file = config.single_file.then(|| {
            config
                .single_output_path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let document_title = config
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().replace('_', " "))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_TITLE.to_string());

        let ctx = InstructionsContext {
            single_file,
            page_prefix: config.split_pages.then_some(config.page_prefix.as_str()),
            document_title,
        };

        let context = Context::from_serialize(&ctx)
            .map_err(|e| Error::template(INSTRUCTIONS_TEMPLATE, e))?;

        self.tera
            .render(INSTRUCTIONS_TEMPLATE, &context)
            .map_err(|e| Error::template(INSTRUCTIONS_TEMPLATE, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_guide_mentions_outputs() {
        let config = Config::default();
        let guide = TemplateEngine::new().unwrap().render_instructions(&config).unwrap();

        assert!(guide.starts_with("# 🚀 Notion 가져오기 가이드\n"));
        assert!(guide.contains("`에뷰리띵_플러터_앱_화면_상세_설계서_notion.md` - 전체 문서 (단일 파일)"));
        assert!(guide.contains("`notion_page_XX_*.md` - 섹션별 분할 파일들"));
        assert!(guide.contains("### 방법 1: 단일 페이지로 가져오기"));
        assert!(guide.contains("(\"에뷰리띵 플러터 앱 화면 상세 설계서\")"));
        assert!(guide.contains("## 💡 팁"));
    }

    #[test]
    fn test_guide_without_pages() {
        let config = Config::builder().split_pages(false).build().unwrap();
        let guide = TemplateEngine::new().unwrap().render_instructions(&config).unwrap();

        assert!(guide.contains("방법 1"));
        assert!(!guide.contains("방법 2"));
        assert!(!guide.contains("notion_page_XX"));
    }

    #[test]
    fn test_guide_uses_custom_names() {
        let config = Config::builder()
            .input_path("spec.md")
            .page_prefix("chapter")
            .single_file(false)
            .build()
            .unwrap();
        let guide = TemplateEngine::new().unwrap().render_instructions(&config).unwrap();

        assert!(!guide.contains("방법 1"));
        assert!(guide.contains("`chapter_XX_*.md`"));
        assert!(guide.contains("(\"spec\")"));
    }
}
