//! Renderers - trait-based output dialect dispatch.
//!
//! Both dialects render the same filtered model:
//!
//! - [`markdown::MarkdownRenderer`]: full document with a table of contents
//! - [`api_blueprint::ApiBlueprintRenderer`]: compact API Blueprint description

pub mod api_blueprint;
pub mod markdown;

use crate::configuration::{ControllerConfig, GlobalConfig, SerializerConfig};
use crate::translator::Translator;
use clap::ValueEnum;
use serde::Deserialize;

/// Output dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    /// Markdown with a table of contents
    #[default]
    Markdown,
    /// API Blueprint (format 1A)
    ApiBlueprint,
}

/// The final, nodoc-filtered model handed to a renderer
pub struct DocumentModel<'a> {
    pub global: &'a GlobalConfig,
    pub serializers: &'a [SerializerConfig],
    pub controllers: &'a [ControllerConfig],
}

impl DocumentModel<'_> {
    /// Title after fallback-filling; the application name if still unset
    pub fn title(&self) -> &str {
        self.global
            .title
            .as_deref()
            .unwrap_or(self.global.app_name.as_str())
    }

    pub fn preamble(&self) -> Option<&str> {
        self.global
            .preamble
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

/// Trait for rendering a documentation model into one output dialect.
pub trait Renderer {
    fn render(&self, model: &DocumentModel<'_>, translator: &Translator) -> String;
}

/// Create the renderer for the given dialect.
pub fn create_renderer(kind: RendererKind) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Markdown => Box::new(markdown::MarkdownRenderer),
        RendererKind::ApiBlueprint => Box::new(api_blueprint::ApiBlueprintRenderer),
    }
}

/// `#` repeated `depth` times, then the title
pub(crate) fn title_line(title: &str, depth: usize) -> String {
    format!("{} {}", "#".repeat(depth), title)
}
