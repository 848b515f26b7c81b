//! Per-verse composition.
//!
//! A verse block is built inside out: labels go into the verse text, then
//! the verse number, the poetry wrapper, psalm titles and finally headings
//! are put around it.

use marks::{Heading, Mark, MarkKind, Passage, ResolveOptions, TargetType, Verse};

use crate::convert::{HtmlConverter, to_fragment};
use crate::format::OutputFormat;
use crate::inject::inject_labels;
use crate::label::LabelMap;

/// Selection order of verse marks. Marks that tie after resolution keep
/// this order.
const VERSE_KINDS: [MarkKind; 3] = [MarkKind::Footnote, MarkKind::Reference, MarkKind::WordsOfJesus];
const HEADING_KINDS: [MarkKind; 2] = [MarkKind::Footnote, MarkKind::Reference];

/// Borrowed state for one render call. Nothing in here is mutated.
pub(crate) struct RenderContext<'a> {
    pub format: OutputFormat,
    pub labels: &'a LabelMap,
    pub resolve: ResolveOptions,
    pub converter: &'a dyn HtmlConverter,
    pub passage: &'a Passage,
    pub marks: &'a [Mark],
}

impl RenderContext<'_> {
    /// Source text as the injector sees it. The HTML path converts first, so
    /// mark offsets address the converted fragment.
    pub fn prepare(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Markdown => text.to_string(),
            OutputFormat::Html => to_fragment(self.converter, text),
        }
    }

    fn select(&self, target_type: TargetType, target_id: &str, kinds: &[MarkKind]) -> Vec<Mark> {
        kinds
            .iter()
            .flat_map(|kind| {
                self.marks
                    .iter()
                    .filter(move |mark| mark.kind == *kind && mark.targets(target_type, target_id))
            })
            .cloned()
            .collect()
    }

    pub fn render_verse(&self, verse: &Verse) -> String {
        let marks = self.select(TargetType::Verse, &verse.id, &VERSE_KINDS);
        let mut block = inject_labels(
            &self.prepare(&verse.text),
            &marks,
            self.labels,
            &self.resolve,
        );

        if verse.opens_paragraph() {
            block.insert_str(0, &self.format.verse_number(&verse.label));
        }

        if verse.is_poetry {
            block = self.format.poetry(&block);
        }

        if verse.opens_chapter() {
            // Prepending in reverse leaves the first-declared title on top.
            for psalm in self
                .passage
                .psalms
                .iter()
                .rev()
                .filter(|psalm| psalm.chapter_id == verse.chapter_id)
            {
                let title = self.format.psalm_title(&self.prepare(&psalm.title));
                block.insert_str(0, &title);
            }
        }

        let headings: Vec<&Heading> = self.passage.headings_for(&verse.id).collect();
        for heading in headings.into_iter().rev() {
            block.insert_str(0, &self.render_heading(heading));
        }

        block
    }

    fn render_heading(&self, heading: &Heading) -> String {
        let marks = self.select(TargetType::Heading, &heading.id, &HEADING_KINDS);
        let content = inject_labels(
            &self.prepare(&heading.content),
            &marks,
            self.labels,
            &self.resolve,
        );
        self.format.heading(heading.level, &content)
    }
}
