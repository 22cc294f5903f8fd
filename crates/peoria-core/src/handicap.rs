//! Per-player handicap derivation.
//!
//! handicap = (hidden total x hidden weight - course par) x multiplier,
//! taken to one decimal by the configured rounding mode and capped from above.
use crate::config::CompetitionConfig;
use crate::player::Player;

/// Derived figures for one eligible player, before ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorecard {
    pub gross: u64,
    pub hidden_total: u64,
    pub handicap: f64,
    pub net: f64,
}

/// Stroke count on a hidden hole, cut at double par when enabled.
pub fn counted_strokes(strokes: u32, par: u8, double_par_cut: bool) -> u32 {
    if double_par_cut {
        strokes.min(u32::from(par) * 2)
    } else {
        strokes
    }
}

/// Sum of counted strokes over the hidden holes. Hidden indices past the
/// score card or the layout contribute nothing.
pub fn hidden_total(scores: &[u32], config: &CompetitionConfig) -> u64 {
    config
        .hidden_holes
        .holes()
        .filter_map(|hole| {
            let strokes = *scores.get(hole)?;
            let par = config.par.par_of(hole)?;
            Some(u64::from(counted_strokes(
                strokes,
                par,
                config.limits.double_par_cut,
            )))
        })
        .sum()
}

/// Handicap before rounding and capping.
pub fn raw_handicap(hidden_total: u64, config: &CompetitionConfig) -> f64 {
    let course_par = f64::from(config.par.total());
    (hidden_total as f64 * config.hidden_weight - course_par) * config.multiplier
}

/// Rounded and capped handicap for a hidden-hole total.
pub fn handicap(hidden_total: u64, config: &CompetitionConfig) -> f64 {
    let rounded = config
        .rounding_mode
        .to_tenths(raw_handicap(hidden_total, config));
    config.limits.max_handicap.apply(rounded)
}

/// Drop float noise below 1e-10 without otherwise rounding.
fn strip_noise(value: f64) -> f64 {
    (value * 1e10).round() / 1e10
}

/// Gross, hidden total, handicap and net for a player. Does not check
/// completeness; the ranking engine filters first.
pub fn scorecard(player: &Player, config: &CompetitionConfig) -> Scorecard {
    let gross: u64 = player.scores.iter().map(|&s| u64::from(s)).sum();
    let hidden_total = hidden_total(&player.scores, config);
    let handicap = handicap(hidden_total, config);
    Scorecard {
        gross,
        hidden_total,
        handicap,
        // Equal nets must compare equal; a cap off the tenths grid is kept as is.
        net: strip_noise(gross as f64 - handicap),
    }
}
