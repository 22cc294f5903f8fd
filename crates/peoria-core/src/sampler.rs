//! Random hidden-hole recommendation.
//!
//! Each nine contributes one par 3, one par 5 and four par 4s, which on a
//! conventional par-72 layout gives 12 holes totalling par 48.
use std::ops::Range;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::course::{
    BACK_NINE, FRONT_NINE, HiddenHoleSet, HoleLayout, STANDARD_HIDDEN_COUNT, STANDARD_HIDDEN_PAR,
};

/// (par, holes taken) per nine.
const PICKS_PER_NINE: [(u8, usize); 3] = [(3, 1), (5, 1), (4, 4)];

/// Shuffle the holes of `par` within `range` and keep the first `count`.
fn pick_by_par<R: Rng + ?Sized>(
    layout: &HoleLayout,
    range: Range<usize>,
    par: u8,
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut candidates = layout.holes_with_par(range, par);
    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}

/// Recommend hidden holes using the thread-local RNG.
pub fn recommend_hidden_holes(layout: &HoleLayout) -> HiddenHoleSet {
    recommend_hidden_holes_with(layout, &mut rand::rng())
}

/// Recommend hidden holes drawing randomness from `rng`.
///
/// When a nine lacks enough holes of some par the selection is topped up
/// with random unselected holes from the whole course, and a warning is
/// logged because the par-48 total no longer holds. The result is sorted.
pub fn recommend_hidden_holes_with<R: Rng + ?Sized>(
    layout: &HoleLayout,
    rng: &mut R,
) -> HiddenHoleSet {
    let mut selected: Vec<usize> = Vec::with_capacity(STANDARD_HIDDEN_COUNT);
    for nine in [FRONT_NINE, BACK_NINE] {
        for (par, count) in PICKS_PER_NINE {
            selected.extend(pick_by_par(layout, nine.clone(), par, count, rng));
        }
    }

    if selected.len() < STANDARD_HIDDEN_COUNT {
        tracing::warn!(
            selected = selected.len(),
            "non-standard hole layout, hidden holes cannot total par {STANDARD_HIDDEN_PAR}; \
             filling remaining slots at random"
        );
        let mut remaining: Vec<usize> = FRONT_NINE
            .chain(BACK_NINE)
            .filter(|h| !selected.contains(h))
            .collect();
        remaining.shuffle(rng);
        let needed = STANDARD_HIDDEN_COUNT - selected.len();
        selected.extend(remaining.into_iter().take(needed));
    }

    selected.sort_unstable();
    HiddenHoleSet(selected)
}
