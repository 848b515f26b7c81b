use std::sync::LazyLock;

use pulldown_cmark::{Options, Parser};
use regex::Regex;
use tracing::warn;

use crate::error::ConvertError;

/// Markdown to HTML conversion used by the HTML output path.
pub trait HtmlConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError>;
}

/// CommonMark with tables, strikethrough and task lists. Inline HTML in the
/// source passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkConverter;

impl HtmlConverter for CmarkConverter {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError> {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::write_html_fmt(&mut html, parser)?;
        Ok(html)
    }
}

static PARAGRAPH_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>|</p>\n?").expect("valid paragraph pattern"));

/// Convert `markdown` to HTML that can sit inside an inline context.
///
/// Paragraph wrappers are removed. If conversion fails the Markdown is used
/// as is.
pub fn to_fragment(converter: &dyn HtmlConverter, markdown: &str) -> String {
    let html = match converter.convert(markdown) {
        Ok(html) => html,
        Err(err) => {
            warn!(error = %err, "markdown conversion failed, keeping source text");
            markdown.to_string()
        }
    };
    PARAGRAPH_TAGS.replace_all(&html, "").into_owned()
}
