//! Document assembly: joins verse blocks into paragraphs and chapters and
//! appends the note list.

use std::borrow::Cow;
use std::collections::HashSet;

use marks::Mark;

use crate::format::OutputFormat;
use crate::label::{html_entry, markdown_entry};
use crate::verse::RenderContext;

pub(crate) fn assemble(ctx: &RenderContext<'_>) -> String {
    let mut body = String::new();
    let mut chapter: Option<&str> = None;
    let mut paragraph = 0;

    for verse in &ctx.passage.verses {
        let joiner = match chapter {
            Some(current) if current != verse.chapter_id => ctx.format.chapter_separator(),
            _ if verse.paragraph_number > paragraph => "\n\n",
            _ => " ",
        };
        body.push_str(joiner);
        body.push_str(&ctx.render_verse(verse));

        chapter = Some(&verse.chapter_id);
        paragraph = verse.paragraph_number;
    }

    ctx.format.append_notes(&mut body, &note_entries(ctx));
    ctx.format.clean_up(&body)
}

/// One entry per distinct footnote or reference whose target is rendered,
/// ordered by kind and then sort order.
fn note_entries(ctx: &RenderContext<'_>) -> Vec<String> {
    let mut notes: Vec<&Mark> = ctx
        .marks
        .iter()
        .filter(|mark| mark.kind.is_note())
        .filter(|mark| ctx.passage.has_target(mark.target_type, &mark.target_id))
        .collect();
    notes.sort_by_key(|mark| (mark.kind, mark.sort_order));

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(notes.len());
    for mark in notes {
        let entry = note_entry(ctx, mark);
        if seen.insert(entry.clone()) {
            entries.push(entry);
        }
    }
    entries
}

fn note_entry(ctx: &RenderContext<'_>, mark: &Mark) -> String {
    match ctx.format {
        OutputFormat::Markdown => markdown_entry(mark),
        OutputFormat::Html => {
            let mark = match ctx.prepare(&mark.content) {
                content if content == mark.content => Cow::Borrowed(mark),
                content => Cow::Owned(Mark {
                    content,
                    ..mark.clone()
                }),
            };
            html_entry(&mark)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::CmarkConverter;
    use crate::label::LabelMap;
    use marks::{Heading, MarkKind, Passage, ResolveOptions, TargetType, Verse};

    fn verse(id: &str, chapter: &str, paragraph: u32, index: u32, text: &str) -> Verse {
        Verse {
            label: id.rsplit('.').next().unwrap_or_default().to_string(),
            chapter_id: chapter.into(),
            paragraph_number: paragraph,
            paragraph_index: index,
            sub_verse_index: 0,
            ..Verse::new(id, text)
        }
    }

    fn assemble_markdown(passage: &Passage) -> String {
        let labels = LabelMap::markdown();
        let ctx = RenderContext {
            format: OutputFormat::Markdown,
            labels: &labels,
            resolve: ResolveOptions::default(),
            converter: &CmarkConverter,
            passage,
            marks: &passage.marks,
        };
        assemble(&ctx)
    }

    #[test]
    fn paragraphs_and_chapters() {
        let passage = Passage {
            verses: vec![
                verse("RUT.1.22", "RUT.1", 0, 0, "So Naomi returned."),
                verse("RUT.1.23", "RUT.1", 0, 1, "They came to Bethlehem."),
                verse("RUT.2.1", "RUT.2", 0, 0, "Now Naomi had a relative."),
                verse("RUT.2.2", "RUT.2", 1, 0, "And Ruth said."),
            ],
            ..Passage::default()
        };
        assert_eq!(
            assemble_markdown(&passage),
            "<sup><b>22</b></sup> So Naomi returned. <sup><b>23</b></sup> They came to Bethlehem.\
             \n\n---\n\n\
             <sup><b>1</b></sup> Now Naomi had a relative.\
             \n\n\
             <sup><b>2</b></sup> And Ruth said."
        );
    }

    #[test]
    fn notes_are_sorted_filtered_and_deduplicated() {
        let note = |id: &str, kind, sort_order, target_type, target: &str, content: &str| {
            Mark::new(id, kind, 0..0)
                .with_content(content)
                .with_sort_order(sort_order)
                .on(target_type, target)
                .in_chapter("GEN.1")
        };
        let passage = Passage {
            verses: vec![verse("GEN.1.1", "GEN.1", 0, 0, "In the beginning")],
            headings: vec![Heading {
                id: "h1".into(),
                content: "Creation".into(),
                level: 1,
                target_verse_id: "GEN.1.1".into(),
            }],
            marks: vec![
                note("r0", MarkKind::Reference, 0, TargetType::Verse, "GEN.1.1", "Jn 1:1"),
                note("f1", MarkKind::Footnote, 1, TargetType::Verse, "GEN.1.1", "Or when"),
                note("f0", MarkKind::Footnote, 0, TargetType::Heading, "h1", "Heb. bara"),
                note("f0b", MarkKind::Footnote, 0, TargetType::Verse, "GEN.1.1", "Heb. bara"),
                note("gone", MarkKind::Footnote, 7, TargetType::Verse, "GEN.2.1", "Elsewhere"),
            ],
            ..Passage::default()
        };

        let labels = LabelMap::markdown();
        let ctx = RenderContext {
            format: OutputFormat::Markdown,
            labels: &labels,
            resolve: ResolveOptions::default(),
            converter: &CmarkConverter,
            passage: &passage,
            marks: &passage.marks,
        };
        assert_eq!(
            note_entries(&ctx),
            vec![
                "[^1-GEN.1]: Heb. bara",
                "[^2-GEN.1]: Or when",
                "[^1@-GEN.1]: Jn 1:1",
            ]
        );
    }

    #[test]
    fn html_note_content_is_converted() {
        let passage = Passage {
            verses: vec![verse("GEN.1.1", "GEN.1", 0, 0, "In the beginning")],
            marks: vec![
                Mark::new("f", MarkKind::Footnote, 3..3)
                    .with_content("Or *when*")
                    .on(TargetType::Verse, "GEN.1.1")
                    .in_chapter("GEN.1"),
            ],
            ..Passage::default()
        };
        let labels = LabelMap::html();
        let ctx = RenderContext {
            format: OutputFormat::Html,
            labels: &labels,
            resolve: ResolveOptions::default(),
            converter: &CmarkConverter,
            passage: &passage,
            marks: &passage.marks,
        };
        assert_eq!(
            note_entries(&ctx),
            vec![r##"<li id="fn-1-GEN.1"><p>Or <em>when</em> [<a href="#fnref-1-GEN.1">1</a>]</p></li>"##]
        );
    }
}
