//! Hidden-hole (Peoria-style) handicap scoring.
//!
//! The ranking engine turns players and a [`config::CompetitionConfig`] into
//! ranked [`ranking::PlayerResult`]s; the sampler picks hidden holes. Neither
//! keeps state between calls and neither does I/O.

pub mod competition;
pub mod config;
pub mod course;
pub mod handicap;
pub mod player;
pub mod ranking;
pub mod sampler;
pub mod time;

pub use competition::{CompetitionState, SavedCompetition, winner_summary};
pub use config::{CompetitionConfig, ConfigError, HandicapCap, HandicapLimits, RoundingMode};
pub use course::{HOLE_COUNT, HiddenHoleSet, HoleLayout};
pub use player::{Player, PlayerId};
pub use ranking::{
    Leaderboard, PlayerResult, Rank, RankChange, Standing, booby_rank, last_rank, rank,
};
pub use sampler::{recommend_hidden_holes, recommend_hidden_holes_with};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::competition::CompetitionState;
    use crate::config::CompetitionConfig;
    use crate::course::HOLE_COUNT;
    use crate::player::{Player, PlayerId};

    /// A player with every hole at `strokes`, id `p<n>` and name `Player<n>`.
    pub fn flat_player(n: usize, strokes: u32) -> Player {
        Player {
            id: PlayerId(format!("p{n}")),
            name: format!("Player{n}"),
            scores: vec![strokes; HOLE_COUNT],
            age: None,
        }
    }

    /// `n` complete players at 4, 5, 6... strokes per hole, in that order.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n).map(|i| flat_player(i + 1, 4 + i as u32)).collect()
    }

    /// Default configuration with `n` ranked players.
    pub fn make_state(n: usize) -> CompetitionState {
        CompetitionState {
            config: CompetitionConfig::default(),
            players: make_players(n),
        }
    }
}
