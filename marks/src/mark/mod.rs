pub mod kind;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::text::{char_len, slice_chars};

pub use kind::{MarkKind, TargetType};

/// A positional annotation over the text of one verse or heading.
///
/// Offsets count code points. `start_offset == end_offset` is a zero-width
/// mark (footnote and reference callouts); highlight spans such as words of
/// Jesus cover a range and carry the covered text as `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mark {
    /// Stable across resolution: split pieces keep their parent's id.
    pub id: String,
    pub kind: MarkKind,
    /// Footnote body, reference body, or the highlighted quotation.
    pub content: String,
    pub label: String,
    /// Appendix ordering key, assigned by the caller.
    pub sort_order: u32,
    pub start_offset: usize,
    pub end_offset: usize,
    pub target_type: TargetType,
    pub target_id: String,
    pub chapter_id: String,
}

impl Mark {
    pub fn new(id: impl Into<String>, kind: MarkKind, range: Range<usize>) -> Self {
        Mark {
            id: id.into(),
            kind,
            start_offset: range.start,
            end_offset: range.end,
            ..Mark::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn on(mut self, target_type: TargetType, target_id: impl Into<String>) -> Self {
        self.target_type = target_type;
        self.target_id = target_id.into();
        self
    }

    pub fn in_chapter(mut self, chapter_id: impl Into<String>) -> Self {
        self.chapter_id = chapter_id.into();
        self
    }

    pub fn is_zero_width(&self) -> bool {
        self.start_offset >= self.end_offset
    }

    /// Width in code points.
    pub fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    pub fn targets(&self, target_type: TargetType, target_id: &str) -> bool {
        self.target_type == target_type && self.target_id == target_id
    }

    /// Split into `[start, at)` and `[at, end)`. Both pieces keep every
    /// attribute except offsets and content; content is cut at the same
    /// code-point distance from the mark's start.
    pub fn split_at(&self, at: usize) -> (Mark, Mark) {
        let at = at.clamp(self.start_offset, self.end_offset.max(self.start_offset));
        let cut = at - self.start_offset;

        let head = Mark {
            end_offset: at,
            content: slice_chars(&self.content, 0, cut).to_string(),
            ..self.clone()
        };
        let tail = Mark {
            start_offset: at,
            content: slice_chars(&self.content, cut, char_len(&self.content)).to_string(),
            ..self.clone()
        };
        (head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_identity_and_cuts_content() {
        let mark = Mark::new("1", MarkKind::WordsOfJesus, 0..15)
            .with_content("The quick brown")
            .with_label("HIG1")
            .on(TargetType::Verse, "verse1");

        let (head, tail) = mark.split_at(4);
        assert_eq!(head.range(), 0..4);
        assert_eq!(head.content, "The ");
        assert_eq!(tail.range(), 4..15);
        assert_eq!(tail.content, "quick brown");
        for piece in [&head, &tail] {
            assert_eq!(piece.id, "1");
            assert_eq!(piece.label, "HIG1");
            assert!(piece.targets(TargetType::Verse, "verse1"));
        }
    }

    #[test]
    fn split_clamps_outside_points() {
        let mark = Mark::new("1", MarkKind::WordsOfJesus, 5..8).with_content("abc");
        let (head, tail) = mark.split_at(20);
        assert_eq!(head, mark);
        assert_eq!(tail.range(), 8..8);
        assert_eq!(tail.content, "");
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let mark: Mark = serde_json::from_str(
            r#"{"id":"fn1","kind":"MARK_KIND_FOOTNOTE","content":"God",
                "startOffset":17,"endOffset":20,
                "targetType":"MARK_TARGET_TYPE_VERSE","targetId":"GEN.1.1"}"#,
        )
        .unwrap();
        assert_eq!(mark.kind, MarkKind::Footnote);
        assert_eq!(mark.range(), 17..20);
        assert_eq!(mark.sort_order, 0);
        assert_eq!(mark.chapter_id, "");
        assert!(mark.targets(TargetType::Verse, "GEN.1.1"));
    }
}
