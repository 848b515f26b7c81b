//! Overlap resolution.
//!
//! Two spans may be disjoint or nested; a partial overlap (`a` starts inside
//! `b` and ends outside it) cannot be rendered as balanced markup. Resolution
//! splits one side of every partial overlap so that the result only contains
//! disjoint or nested spans.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::mark::Mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
    /// When two spans partially overlap, keep the later-starting one whole
    /// and split the earlier one. `false` keeps the earlier one whole.
    pub overlap_keep_right: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            overlap_keep_right: true,
        }
    }
}

impl ResolveOptions {
    pub fn keep_left() -> Self {
        ResolveOptions {
            overlap_keep_right: false,
        }
    }
}

/// `mark` starts first and ends strictly inside `later`.
///
/// A shared start is containment, not a crossing.
fn crosses_end(mark: &Mark, later: &Mark) -> bool {
    mark.start_offset < later.start_offset
        && later.start_offset < mark.end_offset
        && mark.end_offset < later.end_offset
}

/// Split partially overlapping marks until every pair is disjoint or nested.
///
/// Pieces keep the id and every other attribute of the mark they came from;
/// only offsets and content change. The result is ordered by
/// `(start_offset, end_offset)`; unsplit marks sharing both offsets keep their
/// input order.
pub fn resolve_marks(marks: &[Mark], options: &ResolveOptions) -> Vec<Mark> {
    if marks.len() <= 1 {
        return marks.to_vec();
    }

    let mut pending: Vec<&Mark> = marks.iter().collect();
    pending.sort_by(|a, b| b.start_offset.cmp(&a.start_offset));

    // Everything in `kept` starts at or after the mark being placed.
    let mut kept: Vec<Mark> = Vec::with_capacity(marks.len());
    for mark in pending {
        if options.overlap_keep_right {
            place_keeping_right(&mut kept, mark);
        } else {
            place_keeping_left(&mut kept, mark);
        }
    }

    kept.sort_by_key(|mark| (mark.start_offset, mark.end_offset));
    kept
}

fn place_keeping_right(kept: &mut Vec<Mark>, mark: &Mark) {
    let mut piece = mark.clone();
    loop {
        let cut = kept
            .iter()
            .filter(|later| crosses_end(&piece, later))
            .map(|later| later.start_offset)
            .min();

        let Some(cut) = cut else {
            kept.push(piece);
            return;
        };

        trace!(id = %piece.id, at = cut, "splitting earlier mark");
        let (head, tail) = piece.split_at(cut);
        kept.push(head);
        piece = tail;
    }
}

fn place_keeping_left(kept: &mut Vec<Mark>, mark: &Mark) {
    let mut overlaps = Vec::new();
    for later in kept.iter_mut() {
        if !crosses_end(mark, later) {
            continue;
        }

        trace!(id = %later.id, at = mark.end_offset, "splitting later mark");
        let (overlap, rest) = later.split_at(mark.end_offset);
        *later = rest;
        overlaps.push(overlap);
    }
    kept.append(&mut overlaps);
    kept.push(mark.clone());
}
