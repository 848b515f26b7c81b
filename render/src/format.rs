//! Format-specific document fragments.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Heading levels wrap around at this depth.
pub const MAX_HEADING_DEPTH: u32 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn verse_number(self, label: &str) -> String {
        format!("<sup><b>{label}</b></sup> ")
    }

    pub fn poetry(self, content: &str) -> String {
        match self {
            OutputFormat::Markdown => format!("\n> {content}\n>"),
            OutputFormat::Html => format!("\n<blockquote>{content}</blockquote>\n"),
        }
    }

    pub fn psalm_title(self, title: &str) -> String {
        match self {
            OutputFormat::Markdown => format!("*{title}*\n"),
            OutputFormat::Html => format!("<i>{title}</i>\n"),
        }
    }

    /// `level` wraps modulo [`MAX_HEADING_DEPTH`], so a level-6 heading has
    /// depth 0.
    pub fn heading(self, level: u32, content: &str) -> String {
        let depth = level % MAX_HEADING_DEPTH;
        match self {
            OutputFormat::Markdown => {
                format!("\n{} {content}\n", "#".repeat(depth as usize))
            }
            OutputFormat::Html => format!("\n<h{depth}>{content}</h{depth}>\n"),
        }
    }

    pub fn chapter_separator(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "\n\n---\n\n",
            OutputFormat::Html => "\n\n<hr>\n\n",
        }
    }

    /// Append the note list to the document body.
    pub fn append_notes(self, body: &mut String, entries: &[String]) {
        match self {
            OutputFormat::Markdown => body.push_str("\n\n"),
            OutputFormat::Html => body.push_str("<hr>\n\n<ol>"),
        }
        for entry in entries {
            body.push_str(entry);
            body.push_str("\n\n");
        }
        if self == OutputFormat::Html {
            body.push_str("</ol>");
        }
    }

    /// Whitespace and blockquote normalisation applied to the whole document.
    pub fn clean_up(self, document: &str) -> String {
        let cleaned = match self {
            OutputFormat::Markdown => {
                let merged = POETRY_BREAK.replace_all(document, ">\n>");
                let closed = POETRY_END.replace_all(&merged, "\n");
                EXTRA_NEWLINES.replace_all(&closed, "\n\n").into_owned()
            }
            OutputFormat::Html => {
                let tight = document.replace("\n</blockquote>", "</blockquote>");
                EXTRA_NEWLINES.replace_all(&tight, "\n\n").into_owned()
            }
        };
        cleaned.trim().to_string()
    }
}

// An empty quote line followed by more quote lines: one poetry block.
static POETRY_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>\n+>").expect("valid poetry break pattern"));
// An empty quote line followed by a blank line closes the block.
static POETRY_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>\n\n").expect("valid poetry end pattern"));
static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline pattern"));
