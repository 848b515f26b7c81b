//! Record shapes that predate [`Mark`]: notes and words-of-Jesus highlights
//! delivered as separate lists. They convert losslessly into marks, so the
//! rest of the pipeline only ever sees marks.

use serde::{Deserialize, Serialize};

use crate::mark::{Mark, MarkKind, TargetType};

/// A footnote or cross-reference anchored at a single code-point position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyFootnote {
    pub id: String,
    pub text: String,
    /// `"reference"`; any other value, including none, is a footnote.
    #[serde(rename = "type")]
    pub note_type: String,
    pub position: i64,
    pub sort_order: u32,
    pub chapter_id: String,
    pub verse_id: Option<String>,
    pub heading_id: Option<String>,
}

impl LegacyFootnote {
    /// `None` for a negative position.
    pub fn to_mark(&self) -> Option<Mark> {
        let position = usize::try_from(self.position).ok()?;
        let kind = if self.note_type == "reference" {
            MarkKind::Reference
        } else {
            MarkKind::Footnote
        };
        let (target_type, target_id) = match (&self.verse_id, &self.heading_id) {
            (Some(verse_id), _) => (TargetType::Verse, verse_id.as_str()),
            (None, Some(heading_id)) => (TargetType::Heading, heading_id.as_str()),
            (None, None) => (TargetType::Unspecified, ""),
        };

        Some(
            Mark::new(self.id.as_str(), kind, position..position)
                .with_content(self.text.as_str())
                .with_sort_order(self.sort_order)
                .on(target_type, target_id)
                .in_chapter(self.chapter_id.as_str()),
        )
    }
}

/// A words-of-Jesus quotation over `[text_start, text_end)` of a verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyWordsOfJesus {
    pub id: String,
    pub verse_id: String,
    pub text_start: i64,
    pub text_end: i64,
    pub quotation_text: String,
    pub sort_order: u32,
    pub chapter_id: String,
}

impl LegacyWordsOfJesus {
    /// `None` when either bound is negative.
    pub fn to_mark(&self) -> Option<Mark> {
        let start = usize::try_from(self.text_start).ok()?;
        let end = usize::try_from(self.text_end).ok()?;

        Some(
            Mark::new(self.id.as_str(), MarkKind::WordsOfJesus, start..end)
                .with_content(self.quotation_text.as_str())
                .with_sort_order(self.sort_order)
                .on(TargetType::Verse, self.verse_id.as_str())
                .in_chapter(self.chapter_id.as_str()),
        )
    }
}
