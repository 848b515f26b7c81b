use std::fmt;

use marks::{Passage, ResolveOptions};
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::convert::{CmarkConverter, HtmlConverter};
use crate::document;
use crate::format::OutputFormat;
use crate::label::LabelMap;
use crate::verse::RenderContext;

/// Tunables shared by both output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// See [`ResolveOptions::overlap_keep_right`].
    pub overlap_keep_right: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            overlap_keep_right: true,
        }
    }
}

impl RenderOptions {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            overlap_keep_right: self.overlap_keep_right,
        }
    }
}

/// Renders passages into one output format.
///
/// A renderer holds no per-call state and never modifies the passages it
/// reads, so it can be shared between threads.
pub struct Renderer {
    format: OutputFormat,
    labels: LabelMap,
    options: RenderOptions,
    converter: Box<dyn HtmlConverter>,
}

impl Renderer {
    /// A renderer with the built-in labels for `format`.
    pub fn new(format: OutputFormat) -> Self {
        let labels = match format {
            OutputFormat::Markdown => LabelMap::markdown(),
            OutputFormat::Html => LabelMap::html(),
        };
        Renderer {
            format,
            labels,
            options: RenderOptions::default(),
            converter: Box::new(CmarkConverter),
        }
    }

    pub fn markdown() -> Self {
        Renderer::new(OutputFormat::Markdown)
    }

    pub fn html() -> Self {
        Renderer::new(OutputFormat::Html)
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = labels;
        self
    }

    /// Replace the Markdown to HTML converter. Only the HTML format uses it.
    pub fn with_converter(mut self, converter: impl HtmlConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, passage: &Passage) -> String {
        let marks = passage.all_marks();
        let _span = debug_span!(
            "render",
            format = ?self.format,
            verses = passage.verses.len(),
            marks = marks.len()
        )
        .entered();

        let ctx = RenderContext {
            format: self.format,
            labels: &self.labels,
            resolve: self.options.resolve_options(),
            converter: self.converter.as_ref(),
            passage,
            marks: &marks,
        };
        document::assemble(&ctx)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("format", &self.format)
            .field("labels", &self.labels)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

pub fn render_markdown(passage: &Passage) -> String {
    Renderer::markdown().render(passage)
}

pub fn render_html(passage: &Passage) -> String {
    Renderer::html().render(passage)
}
