use thiserror::Error;

/// A Markdown to HTML conversion that did not produce output.
///
/// Rendering never fails on this: the caller keeps the unconverted Markdown.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("conversion failed: {0}")]
    Failed(String),
    #[error("could not write converted html")]
    Fmt(#[from] std::fmt::Error),
}
