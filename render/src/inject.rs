//! Label injection.
//!
//! Marks are applied from the end of the text towards its start. Replacing
//! a range only moves text to its right, and everything to the right has
//! already been written, so the offsets of marks still waiting stay valid.
//! A span that encloses already-written labels is located through the list
//! of applied edits, which are kept in original coordinates.

use std::cmp::Reverse;

use marks::text::{char_len, replace_chars, slice_chars};
use marks::{Mark, ResolveOptions, resolve_marks};
use tracing::{trace, warn};

use crate::label::LabelMap;

/// A range of the original text replaced by `len` code points of markup.
#[derive(Debug, Clone, Copy)]
struct Edit {
    start: usize,
    end: usize,
    len: usize,
}

impl Edit {
    fn is_point(&self) -> bool {
        self.start == self.end
    }

    fn delta(&self) -> isize {
        self.len as isize - (self.end - self.start) as isize
    }
}

/// Which side of a point label an offset falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    Before,
    After,
}

#[derive(Debug, Default)]
struct Edits(Vec<Edit>);

impl Edits {
    /// Where original offset `at` sits in the edited text.
    fn locate(&self, at: usize, bias: Bias) -> usize {
        let shift: isize = self
            .0
            .iter()
            .filter(|edit| {
                edit.end < at || (edit.end == at && (!edit.is_point() || bias == Bias::After))
            })
            .map(Edit::delta)
            .sum();
        at.saturating_add_signed(shift)
    }

    /// Edits strictly inside the span `[start, end)`. Point labels on the
    /// span's boundaries stay outside its markup.
    fn is_inside(edit: &Edit, start: usize, end: usize) -> bool {
        start <= edit.start
            && edit.end <= end
            && !(edit.is_point() && (edit.start == start || edit.start == end))
    }

    fn has_inside(&self, start: usize, end: usize) -> bool {
        self.0.iter().any(|edit| Self::is_inside(edit, start, end))
    }

    fn replace_inside(&mut self, edit: Edit) {
        self.0
            .retain(|applied| !Self::is_inside(applied, edit.start, edit.end));
        self.0.push(edit);
    }
}

/// Render `marks` into `text` using the renderers in `labels`.
///
/// Marks are resolved first. Each mark's range is replaced by its label;
/// point marks insert without removing anything. Marks whose kind has no
/// renderer leave the text as is. A start offset past the end of the text
/// appends the label; an end offset past it is clamped.
pub fn inject_labels(
    text: &str,
    marks: &[Mark],
    labels: &LabelMap,
    options: &ResolveOptions,
) -> String {
    let mut resolved = resolve_marks(marks, options);
    // Descending start, narrower first; identical ranges end up in reverse
    // input order so that point labels sharing an offset read in input order.
    resolved.reverse();
    resolved.sort_by_key(|mark| (Reverse(mark.start_offset), mark.end_offset));

    let text_len = char_len(text);
    let mut out = text.to_string();
    let mut edits = Edits::default();

    for mark in &resolved {
        let Some(render) = labels.get(mark.kind) else {
            trace!(id = %mark.id, kind = ?mark.kind, "no label renderer, skipping");
            continue;
        };

        if mark.start_offset > text_len {
            warn!(
                id = %mark.id,
                start = mark.start_offset,
                len = text_len,
                "mark starts past the end of its text, appending label"
            );
        }
        let start = mark.start_offset.min(text_len);
        let end = mark.end_offset.clamp(start, text_len);

        let (from, to) = if start == end {
            let at = edits.locate(start, Bias::Before);
            (at, at)
        } else {
            (
                edits.locate(start, Bias::After),
                edits.locate(end, Bias::Before),
            )
        };

        let label = if start < end && edits.has_inside(start, end) {
            let live = Mark {
                content: slice_chars(&out, from, to).to_string(),
                ..mark.clone()
            };
            render(&live, &mark.chapter_id)
        } else {
            render(mark, &mark.chapter_id)
        };

        replace_chars(&mut out, from, to, &label);
        edits.replace_inside(Edit {
            start,
            end,
            len: char_len(&label),
        });
    }

    out
}
