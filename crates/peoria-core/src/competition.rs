use serde::{Deserialize, Serialize};

use crate::config::CompetitionConfig;
use crate::player::{Player, PlayerId};
use crate::ranking::rank;
use crate::time::timestamp_now;

/// Working snapshot of a competition: the configuration plus every player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompetitionState {
    pub config: CompetitionConfig,
    pub players: Vec<Player>,
}

impl CompetitionState {
    pub fn new(config: CompetitionConfig) -> Self {
        Self {
            config,
            players: Vec::new(),
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Append a player with an empty score card. Blank names are rejected.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let player = Player::new(name);
        let id = player.id.clone();
        self.players.push(player);
        Some(id)
    }

    pub fn remove_player(&mut self, id: &PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| &p.id != id);
        self.players.len() != before
    }

    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.name = name.to_string();
                true
            },
            None => false,
        }
    }

    /// False when the player is unknown or the hole is past the 18th.
    pub fn set_score(&mut self, id: &PlayerId, hole: usize, strokes: u32) -> bool {
        self.player_mut(id)
            .is_some_and(|p| p.set_score(hole, strokes))
    }

    pub fn set_age(&mut self, id: &PlayerId, age: Option<u32>) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.age = age;
                true
            },
            None => false,
        }
    }

    /// Players with a full score card.
    pub fn eligible_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_complete()).count()
    }

    /// Back to the default configuration with no players.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A competition stored in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCompetition {
    pub id: String,
    pub name: String,
    pub date: String,
    pub config: CompetitionConfig,
    pub players: Vec<Player>,
}

impl SavedCompetition {
    /// Snapshot `state` under a fresh id and the current time.
    pub fn new(name: impl Into<String>, state: &CompetitionState) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            date: timestamp_now(),
            config: state.config.clone(),
            players: state.players.clone(),
        }
    }

    pub fn state(&self) -> CompetitionState {
        CompetitionState {
            config: self.config.clone(),
            players: self.players.clone(),
        }
    }

    /// One-line summary of the winner for history listings.
    pub fn winner_summary(&self) -> Option<String> {
        winner_summary(&self.config, &self.players)
    }
}

/// "`name` (Net `net`)" for the first-ranked player, if anyone is ranked.
pub fn winner_summary(config: &CompetitionConfig, players: &[Player]) -> Option<String> {
    let results = rank(players, config, None);
    let winner = results.iter().find(|r| r.rank == 1)?;
    Some(format!("{} (Net {:.1})", winner.player_name, winner.net))
}
