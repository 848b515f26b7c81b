use std::ops::Range;
use std::path::Path;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use marks::Passage;
use thiserror::Error;

/// A passage file that could not be decoded.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid JSON passage: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML passage: {}", .0.message())]
    Toml(#[from] toml::de::Error),
}

impl InputError {
    /// Byte range of the offending input, when the decoder reports one.
    pub fn span(&self, source: &str) -> Option<Range<usize>> {
        match self {
            InputError::Json(err) if err.line() > 0 => {
                Some(char_span(source, line_column_offset(source, err.line(), err.column())))
            }
            InputError::Json(_) => None,
            InputError::Toml(err) => err.span(),
        }
    }

    pub fn to_diagnostic(&self, file_id: usize, source: &str) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(self.to_string());
        match self.span(source) {
            Some(span) => diagnostic.with_labels(vec![Label::primary(file_id, span)]),
            None => diagnostic,
        }
    }
}

/// Decode a passage. `.toml` files are TOML, everything else is JSON.
pub fn parse_passage(path: &Path, source: &str) -> Result<Passage, InputError> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        Ok(toml::from_str(source)?)
    } else {
        Ok(serde_json::from_str(source)?)
    }
}

/// Byte offset of a 1-based line and column.
fn line_column_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// The character at or before `offset`, as a byte range.
fn char_span(source: &str, offset: usize) -> Range<usize> {
    let mut start = offset.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}
