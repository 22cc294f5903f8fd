use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of holes on a regulation course.
pub const HOLE_COUNT: usize = 18;

/// Holes in the front nine ("out").
pub const FRONT_NINE: Range<usize> = 0..9;

/// Holes in the back nine ("in").
pub const BACK_NINE: Range<usize> = 9..18;

/// Hidden holes picked by the standard recommendation.
pub const STANDARD_HIDDEN_COUNT: usize = 12;

/// Par sum of a standard hidden-hole selection.
pub const STANDARD_HIDDEN_PAR: u32 = 48;

/// Par for each of the 18 holes, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleLayout(pub [u8; HOLE_COUNT]);

impl HoleLayout {
    /// Par 72 layout with two par 3s and two par 5s in each half.
    pub const STANDARD: Self = Self([4, 4, 3, 5, 4, 4, 3, 5, 4, 4, 4, 3, 5, 4, 4, 3, 5, 4]);

    /// Par for a hole, `None` for an index past the 18th hole.
    pub fn par_of(&self, hole: usize) -> Option<u8> {
        self.0.get(hole).copied()
    }

    /// Course par (sum of all 18 pars).
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&p| u32::from(p)).sum()
    }

    /// Sets the par of one hole. Returns false for an out-of-range hole.
    pub fn set_par(&mut self, hole: usize, par: u8) -> bool {
        match self.0.get_mut(hole) {
            Some(slot) => {
                *slot = par;
                true
            },
            None => false,
        }
    }

    /// Hole indices within `range` whose par equals `par`.
    pub fn holes_with_par(&self, range: Range<usize>, par: u8) -> Vec<usize> {
        range.filter(|&h| self.0[h] == par).collect()
    }
}

impl Default for HoleLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Indices of the holes whose scores feed the handicap.
///
/// Order carries no meaning to the engine. Indices past the last hole are
/// kept as given and skipped wherever the set is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenHoleSet(pub Vec<usize>);

impl HiddenHoleSet {
    /// The selection a new competition starts with (par 48 on the standard layout).
    pub fn standard() -> Self {
        Self(vec![0, 2, 4, 6, 8, 10, 9, 11, 13, 15, 16, 17])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, hole: usize) -> bool {
        self.0.contains(&hole)
    }

    /// In-range hole indices, in stored order.
    pub fn holes(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied().filter(|&h| h < HOLE_COUNT)
    }

    /// Removes `hole` if hidden, otherwise adds it and re-sorts ascending.
    /// Returns whether the hole is hidden afterwards.
    pub fn toggle(&mut self, hole: usize) -> bool {
        if self.contains(hole) {
            self.0.retain(|&h| h != hole);
            false
        } else {
            self.0.push(hole);
            self.0.sort_unstable();
            true
        }
    }

    /// Sum of pars over the in-range hidden holes.
    pub fn par_total(&self, layout: &HoleLayout) -> u32 {
        self.holes()
            .filter_map(|h| layout.par_of(h))
            .map(u32::from)
            .sum()
    }

    /// Whether this is a full standard selection: 12 holes totalling par 48.
    pub fn is_standard(&self, layout: &HoleLayout) -> bool {
        self.holes().count() == STANDARD_HIDDEN_COUNT
            && self.par_total(layout) == STANDARD_HIDDEN_PAR
    }
}

impl From<Vec<usize>> for HiddenHoleSet {
    fn from(holes: Vec<usize>) -> Self {
        Self(holes)
    }
}
