//! Ranking engine: eligible players -> ordered results with position ranks.
//!
//! Pure function of its inputs. Callers that want rank movement keep the
//! previous result set and pass it back in; see [`Leaderboard`].
use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::CompetitionConfig;
use crate::handicap::scorecard;
use crate::player::{Player, PlayerId};

/// 1-based finishing position.
pub type Rank = u32;

/// One ranked line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub player_name: String,
    pub gross: u64,
    pub hidden_total: u64,
    #[serde(alias = "hdcp")]
    pub handicap: f64,
    pub net: f64,
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_rank: Option<Rank>,
}

/// Orders older players first, then younger, then players with no age.
fn compare_age(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Same notion of equality as `==`, so 0.0 and -0.0 tie.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Net, then handicap, then age (older first), then gross.
fn compare_entries(a: &(PlayerResult, Option<u32>), b: &(PlayerResult, Option<u32>)) -> Ordering {
    compare_f64(a.0.net, b.0.net)
        .then_with(|| compare_f64(a.0.handicap, b.0.handicap))
        .then_with(|| compare_age(a.1, b.1))
        .then_with(|| a.0.gross.cmp(&b.0.gross))
}

/// Players sharing a rank must match on these; age only orders.
fn shares_rank(a: &PlayerResult, b: &PlayerResult) -> bool {
    a.net == b.net && a.handicap == b.handicap && a.gross == b.gross
}

/// Rank every complete player.
///
/// Incomplete players are left out entirely. Equal (net, handicap, gross)
/// share a rank and the next distinct line takes its 1-based position, so a
/// tie for 2nd is followed by 4th. `previous_rank` is copied by player id
/// from `previous` when given.
pub fn rank(
    players: &[Player],
    config: &CompetitionConfig,
    previous: Option<&[PlayerResult]>,
) -> Vec<PlayerResult> {
    let mut entries: Vec<(PlayerResult, Option<u32>)> = players
        .iter()
        .filter(|p| p.is_complete())
        .map(|p| {
            let card = scorecard(p, config);
            let result = PlayerResult {
                player_id: p.id.clone(),
                player_name: p.name.clone(),
                gross: card.gross,
                hidden_total: card.hidden_total,
                handicap: card.handicap,
                net: card.net,
                rank: 0,
                previous_rank: None,
            };
            (result, p.age)
        })
        .collect();

    // Stable: fully tied players keep input order.
    entries.sort_by(compare_entries);

    let previous_ranks: HashMap<&PlayerId, Rank> = previous
        .unwrap_or_default()
        .iter()
        .map(|r| (&r.player_id, r.rank))
        .collect();

    let mut results: Vec<PlayerResult> = Vec::with_capacity(entries.len());
    for (position, (mut result, _)) in entries.into_iter().enumerate() {
        result.rank = match results.last() {
            Some(prev) if shares_rank(prev, &result) => prev.rank,
            _ => position as Rank + 1,
        };
        result.previous_rank = previous_ranks.get(&result.player_id).copied();
        results.push(result);
    }
    results
}

/// Rank of the runner-up to last place ("booby"), found as the second entry
/// when results are ordered by rank descending. `None` below two results.
pub fn booby_rank(results: &[PlayerResult]) -> Option<Rank> {
    if results.len() < 2 {
        return None;
    }
    let mut ranks: Vec<Rank> = results.iter().map(|r| r.rank).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks.get(1).copied()
}

/// Highest rank value present.
pub fn last_rank(results: &[PlayerResult]) -> Option<Rank> {
    results.iter().map(|r| r.rank).max()
}

/// Movement relative to the previous calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankChange {
    Up,
    Down,
    Same,
}

impl RankChange {
    /// `None` when the result has no previous rank to compare against.
    pub fn of(result: &PlayerResult) -> Option<Self> {
        let previous = result.previous_rank?;
        Some(match result.rank.cmp(&previous) {
            Ordering::Less => Self::Up,
            Ordering::Greater => Self::Down,
            Ordering::Equal => Self::Same,
        })
    }
}

/// Prize classification shown next to a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Winner,
    RunnerUp,
    Third,
    Booby,
    Last,
}

impl Standing {
    /// Podium positions take precedence over booby, booby over last.
    pub fn classify(rank: Rank, booby: Option<Rank>, last: Option<Rank>) -> Option<Self> {
        match rank {
            1 => Some(Self::Winner),
            2 => Some(Self::RunnerUp),
            3 => Some(Self::Third),
            r if Some(r) == booby => Some(Self::Booby),
            r if Some(r) == last => Some(Self::Last),
            _ => None,
        }
    }
}

/// Caller-side holder of the last result set, so each recalculation
/// reports movement against the one before it.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    results: Vec<PlayerResult>,
    calculated: bool,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-rank and remember the output for the next call. The first call
    /// carries no previous ranks.
    pub fn recalculate(&mut self, players: &[Player], config: &CompetitionConfig) -> &[PlayerResult] {
        let previous = self.calculated.then_some(self.results.as_slice());
        let next = rank(players, config, previous);
        self.results = next;
        self.calculated = true;
        &self.results
    }

    pub fn results(&self) -> &[PlayerResult] {
        &self.results
    }

    /// Forget history so the next calculation starts fresh.
    pub fn reset(&mut self) {
        self.results.clear();
        self.calculated = false;
    }
}
