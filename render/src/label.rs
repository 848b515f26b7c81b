//! Per-kind label renderers.
//!
//! A label is the markup that replaces a mark's range in the text: a callout
//! for footnotes and references, a wrapper for words of Jesus. Appendix
//! entries are built here too so that every callout and its entry share one
//! key.

use std::fmt;

use marks::{Mark, MarkKind};

/// Renders a mark given its chapter id. Must be pure.
pub type LabelFn = fn(&Mark, &str) -> String;

/// Which renderer, if any, handles each mark kind.
///
/// Kinds without a renderer are skipped by the injector and leave the text
/// untouched.
#[derive(Clone, Copy, Default)]
pub struct LabelMap {
    footnote: Option<LabelFn>,
    reference: Option<LabelFn>,
    words_of_jesus: Option<LabelFn>,
    unspecified: Option<LabelFn>,
}

impl LabelMap {
    pub fn empty() -> Self {
        LabelMap::default()
    }

    pub fn with(mut self, kind: MarkKind, label: LabelFn) -> Self {
        *self.slot(kind) = Some(label);
        self
    }

    pub fn get(&self, kind: MarkKind) -> Option<LabelFn> {
        match kind {
            MarkKind::Footnote => self.footnote,
            MarkKind::Reference => self.reference,
            MarkKind::WordsOfJesus => self.words_of_jesus,
            MarkKind::Unspecified => self.unspecified,
        }
    }

    fn slot(&mut self, kind: MarkKind) -> &mut Option<LabelFn> {
        match kind {
            MarkKind::Footnote => &mut self.footnote,
            MarkKind::Reference => &mut self.reference,
            MarkKind::WordsOfJesus => &mut self.words_of_jesus,
            MarkKind::Unspecified => &mut self.unspecified,
        }
    }

    pub fn markdown() -> Self {
        LabelMap::empty()
            .with(MarkKind::Footnote, markdown_note)
            .with(MarkKind::Reference, markdown_note)
            .with(MarkKind::WordsOfJesus, words_of_jesus)
    }

    pub fn html() -> Self {
        LabelMap::empty()
            .with(MarkKind::Footnote, html_note)
            .with(MarkKind::Reference, html_note)
            .with(MarkKind::WordsOfJesus, words_of_jesus)
    }
}

impl fmt::Debug for LabelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = [
            MarkKind::Footnote,
            MarkKind::Reference,
            MarkKind::WordsOfJesus,
            MarkKind::Unspecified,
        ];
        f.debug_set()
            .entries(kinds.into_iter().filter(|kind| self.get(*kind).is_some()))
            .finish()
    }
}

/// The visible number of a note: `sortOrder + 1`, with `@` for references.
pub fn note_number(mark: &Mark) -> String {
    let suffix = if mark.kind == MarkKind::Reference { "@" } else { "" };
    format!("{}{suffix}", u64::from(mark.sort_order) + 1)
}

/// The anchor key shared by a callout and its appendix entry.
pub fn note_key(mark: &Mark, chapter_id: &str) -> String {
    format!("{}-{chapter_id}", note_number(mark))
}

fn markdown_note(mark: &Mark, chapter_id: &str) -> String {
    format!("[^{}]", note_key(mark, chapter_id))
}

fn html_note(mark: &Mark, chapter_id: &str) -> String {
    let key = note_key(mark, chapter_id);
    format!(
        r##"<sup><a href="#fn-{key}" id="fnref-{key}">{}</a></sup>"##,
        note_number(mark)
    )
}

fn words_of_jesus(mark: &Mark, _chapter_id: &str) -> String {
    format!("<b>{}</b>", mark.content)
}

/// Markdown footnote definition for `mark`, whose `content` is used as is.
pub fn markdown_entry(mark: &Mark) -> String {
    format!("[^{}]: {}", note_key(mark, &mark.chapter_id), mark.content)
}

/// HTML list item for `mark`. `content` must already be an HTML fragment.
pub fn html_entry(mark: &Mark) -> String {
    let key = note_key(mark, &mark.chapter_id);
    format!(
        r##"<li id="fn-{key}"><p>{} [<a href="#fnref-{key}">{}</a>]</p></li>"##,
        mark.content,
        note_number(mark)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use marks::TargetType;

    fn note(kind: MarkKind, sort_order: u32) -> Mark {
        Mark::new("n", kind, 4..4)
            .with_content("God")
            .with_sort_order(sort_order)
            .on(TargetType::Verse, "GEN.1.1")
            .in_chapter("GEN.1")
    }

    #[test]
    fn markdown_callouts() {
        let labels = LabelMap::markdown();
        let footnote = labels.get(MarkKind::Footnote).unwrap();
        let reference = labels.get(MarkKind::Reference).unwrap();
        assert_eq!(footnote(&note(MarkKind::Footnote, 0), "GEN.1"), "[^1-GEN.1]");
        assert_eq!(reference(&note(MarkKind::Reference, 2), "GEN.1"), "[^3@-GEN.1]");
    }

    #[test]
    fn html_callout_uses_one_number_everywhere() {
        let label = LabelMap::html().get(MarkKind::Reference).unwrap();
        assert_eq!(
            label(&note(MarkKind::Reference, 4), "MAT.5"),
            r##"<sup><a href="#fn-5@-MAT.5" id="fnref-5@-MAT.5">5@</a></sup>"##
        );
    }

    #[test]
    fn largest_sort_order_does_not_wrap() {
        let mark = note(MarkKind::Reference, u32::MAX);
        assert_eq!(note_number(&mark), "4294967296@");
        assert_eq!(markdown_entry(&mark), "[^4294967296@-GEN.1]: God");
    }

    #[test]
    fn entries_match_callouts() {
        let mark = note(MarkKind::Footnote, 0);
        assert_eq!(markdown_entry(&mark), "[^1-GEN.1]: God");
        assert_eq!(
            html_entry(&mark),
            r##"<li id="fn-1-GEN.1"><p>God [<a href="#fnref-1-GEN.1">1</a>]</p></li>"##
        );
    }

    #[test]
    fn unspecified_is_not_registered() {
        for labels in [LabelMap::markdown(), LabelMap::html()] {
            assert!(labels.get(MarkKind::Unspecified).is_none());
            assert!(labels.get(MarkKind::WordsOfJesus).is_some());
        }
        assert_eq!(
            format!("{:?}", LabelMap::empty().with(MarkKind::Footnote, words_of_jesus)),
            "{Footnote}"
        );
    }
}
