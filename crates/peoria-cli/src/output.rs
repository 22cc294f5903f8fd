//! Output formatting: terminal tables and JSON.
use std::fmt::Write;

use serde::Serialize;

use peoria_core::{
    CompetitionConfig, CompetitionState, HOLE_COUNT, HandicapCap, PlayerResult, Rank, RankChange,
    SavedCompetition, Standing, booby_rank, last_rank,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLeaderboard<'a> {
    results: &'a [PlayerResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    booby_rank: Option<Rank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_rank: Option<Rank>,
}

fn movement(result: &PlayerResult) -> &'static str {
    match RankChange::of(result) {
        Some(RankChange::Up) => "↑",
        Some(RankChange::Down) => "↓",
        Some(RankChange::Same) => "→",
        None => "",
    }
}

fn badge(standing: Option<Standing>) -> &'static str {
    match standing {
        Some(Standing::Winner) => "1st",
        Some(Standing::RunnerUp) => "2nd",
        Some(Standing::Third) => "3rd",
        Some(Standing::Booby) => "booby",
        Some(Standing::Last) => "last",
        None => "",
    }
}

fn cap_label(cap: HandicapCap) -> String {
    if let Some((_, label)) = HandicapCap::PRESETS.iter().find(|(preset, _)| *preset == cap) {
        return (*label).to_string();
    }
    match cap {
        HandicapCap::Unlimited => "unlimited".to_string(),
        HandicapCap::Max(max) => format!("{max}"),
    }
}

/// Ranked results as a table, with movement arrows and prize badges.
pub fn leaderboard_table(results: &[PlayerResult], show_hidden_total: bool) -> String {
    if results.is_empty() {
        return "No players with a complete score card.".to_string();
    }

    let name_width = results
        .iter()
        .map(|r| r.player_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6); // at least "Player"
    let booby = booby_rank(results);
    let last = last_rank(results);

    let mut out = String::new();
    let hidden_header = if show_hidden_total { " | Hidden" } else { "" };
    let _ = writeln!(
        out,
        "Rank |   | {:<name_width$} | Gross{hidden_header} |  Hdcp |   Net |",
        "Player"
    );
    let hidden_rule = if show_hidden_total { "-|-------" } else { "" };
    let _ = writeln!(
        out,
        "-----|---|-{}-|------{hidden_rule}-|-------|-------|------",
        "-".repeat(name_width)
    );

    for r in results {
        let hidden = if show_hidden_total {
            format!(" | {:>6}", r.hidden_total)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{:>4} | {:<1} | {:<name_width$} | {:>5}{hidden} | {:>5.1} | {:>5.1} | {}",
            r.rank,
            movement(r),
            r.player_name,
            r.gross,
            r.handicap,
            r.net,
            badge(Standing::classify(r.rank, booby, last)),
        );
    }
    let _ = write!(out, "\n{} players ranked", results.len());
    out
}

/// Ranked results as JSON, including the booby and last ranks.
pub fn leaderboard_json(results: &[PlayerResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonLeaderboard {
        results,
        booby_rank: booby_rank(results),
        last_rank: last_rank(results),
    })
}

/// Every player with out/in/total strokes and how much of the card is entered.
pub fn player_table(state: &CompetitionState) -> String {
    if state.players.is_empty() {
        return "No players yet.".to_string();
    }

    let name_width = state
        .players
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$} | Out |  In | Total | Age | Holes | Id",
        "Name"
    );
    let _ = writeln!(
        out,
        "{}-|-----|-----|-------|-----|-------|----",
        "-".repeat(name_width)
    );
    for p in &state.players {
        let entered = p.scores.iter().filter(|&&s| s > 0).count();
        let age = p.age.map(|a| a.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<name_width$} | {:>3} | {:>3} | {:>5} | {:>3} | {:>2}/{HOLE_COUNT} | {}",
            p.name,
            p.out_total(),
            p.in_total(),
            p.total(),
            age,
            entered,
            p.id,
        );
    }
    let _ = write!(
        out,
        "\n{} players, {} with a complete card",
        state.players.len(),
        state.eligible_count()
    );
    out
}

/// Human-readable configuration. Holes are shown 1-based.
pub fn config_summary(config: &CompetitionConfig) -> String {
    let mut out = String::new();

    let holes: Vec<String> = (1..=HOLE_COUNT).map(|h| format!("{h:>2}")).collect();
    let pars: Vec<String> = config.par.0.iter().map(|p| format!("{p:>2}")).collect();
    let marks: Vec<String> = (0..HOLE_COUNT)
        .map(|h| if config.hidden_holes.contains(h) { " *" } else { "  " }.to_string())
        .collect();
    let _ = writeln!(out, "Hole   {}", holes.join(" "));
    let _ = writeln!(out, "Par    {}  (total {})", pars.join(" "), config.par.total());
    let _ = writeln!(out, "Hidden {}", marks.join(" "));

    let mut hidden_holes: Vec<usize> = config.hidden_holes.holes().collect();
    hidden_holes.sort_unstable();
    let hidden: Vec<String> = hidden_holes.iter().map(|h| (h + 1).to_string()).collect();
    let standard = if config.hidden_holes.is_standard(&config.par) {
        ""
    } else {
        " (non-standard)"
    };
    let _ = writeln!(
        out,
        "Hidden holes: {} [{} holes, par {}]{standard}",
        hidden.join(", "),
        config.hidden_holes.len(),
        config.hidden_holes.par_total(&config.par),
    );
    let _ = writeln!(out, "Hidden weight: {}", config.hidden_weight);
    let _ = writeln!(out, "Multiplier: {}", config.multiplier);
    let _ = writeln!(
        out,
        "Double-par cut: {}",
        if config.limits.double_par_cut { "on" } else { "off" }
    );
    let _ = writeln!(out, "Handicap cap: {}", cap_label(config.limits.max_handicap));
    let _ = write!(out, "Rounding: {:?}", config.rounding_mode);
    out
}

/// Saved competitions, newest first, with each winner.
pub fn history_table(entries: &[SavedCompetition]) -> String {
    if entries.is_empty() {
        return "No saved competitions.".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let winner = entry
            .winner_summary()
            .unwrap_or_else(|| "no complete cards".to_string());
        let _ = writeln!(
            out,
            "{}  {}  {} ({} players)  winner: {}",
            entry.id,
            entry.date,
            entry.name,
            entry.players.len(),
            winner
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHistoryEntry<'a> {
    id: &'a str,
    name: &'a str,
    date: &'a str,
    players: usize,
    winner: Option<String>,
}

pub fn history_json(entries: &[SavedCompetition]) -> Result<String, serde_json::Error> {
    let rows: Vec<JsonHistoryEntry<'_>> = entries
        .iter()
        .map(|e| JsonHistoryEntry {
            id: &e.id,
            name: &e.name,
            date: &e.date,
            players: e.players.len(),
            winner: e.winner_summary(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// One multiplier step of a sweep.
#[derive(Debug, Serialize)]
pub struct SweepStep {
    pub multiplier: f64,
    pub results: Vec<PlayerResult>,
}

pub fn sweep_table(steps: &[SweepStep], show_hidden_total: bool) -> String {
    let mut out = String::new();
    for step in steps {
        let _ = writeln!(out, "== Multiplier {:.2}", step.multiplier);
        let _ = writeln!(
            out,
            "{}\n",
            leaderboard_table(&step.results, show_hidden_total)
        );
    }
    out.truncate(out.trim_end().len());
    out
}
