use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use peoria_core::{
    CompetitionState, HOLE_COUNT, HandicapCap, Leaderboard, PlayerId, SavedCompetition, rank,
    recommend_hidden_holes, recommend_hidden_holes_with,
};
use peoria_store::{
    HistoryStore, StateStore, default_export_name, export_to_file, import_from_file,
};

use crate::error::CliError;
use crate::output::{self, SweepStep};
use crate::settings::{self, DEFAULT_SETTINGS_FILE, PeoriaSettings};
use crate::{
    Command, ConfigCommand, HistoryCommand, PlayerCommand, RankArgs, RecommendArgs, SweepArgs,
};

/// Upper bound on the number of steps a single sweep may produce.
const MAX_SWEEP_STEPS: usize = 1000;

/// Everything a command needs: settings and the stores under the data directory.
pub struct Context {
    pub settings: PeoriaSettings,
    settings_path: PathBuf,
    state: StateStore,
    history: HistoryStore,
}

impl Context {
    pub fn new(settings: PeoriaSettings, settings_path: Option<PathBuf>) -> Self {
        let data_dir = settings.data_dir();
        Self {
            settings_path: settings_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE)),
            state: StateStore::new(&data_dir),
            history: HistoryStore::new(&data_dir),
            settings,
        }
    }

    /// The working competition, or a fresh one from the settings defaults.
    fn load_state(&self) -> CompetitionState {
        self.state
            .load()
            .unwrap_or_else(|| self.settings.new_competition())
    }

    fn save_state(&self, state: &CompetitionState) -> Result<(), CliError> {
        self.state.save(state)?;
        Ok(())
    }

    fn json(&self, flag: bool) -> bool {
        flag || self.settings.display.json
    }
}

/// Execute one command and return what should be printed.
pub fn run(ctx: &Context, command: Command) -> Result<String, CliError> {
    match command {
        Command::Init => init(ctx),
        Command::Rank(args) => rank_players(ctx, args),
        Command::Sweep(args) => sweep(ctx, args),
        Command::Recommend(args) => recommend(ctx, args),
        Command::Config(cmd) => config(ctx, cmd),
        Command::Player(cmd) => player(ctx, cmd),
        Command::History(cmd) => history(ctx, cmd),
        Command::Export { path } => {
            let state = ctx.load_state();
            let path = path.unwrap_or_else(|| PathBuf::from(default_export_name()));
            export_to_file(&state, &path)?;
            Ok(format!("Exported {} players to {}", state.players.len(), path.display()))
        },
        Command::Import { path } => {
            let state = import_from_file(&path)?;
            replace_state(ctx, &state)?;
            Ok(format!("Imported {} players from {}", state.players.len(), path.display()))
        },
        Command::Clear => {
            ctx.state.clear()?;
            Ok("Working competition cleared.".to_string())
        },
    }
}

/// Swap in a different competition. Stored results belong to the old one.
fn replace_state(ctx: &Context, state: &CompetitionState) -> Result<(), CliError> {
    ctx.state.clear()?;
    ctx.save_state(state)
}

fn init(ctx: &Context) -> Result<String, CliError> {
    let mut lines = Vec::new();
    if ctx.settings_path.exists() {
        lines.push(format!(
            "Settings already exist at {}",
            ctx.settings_path.display()
        ));
    } else {
        settings::create_default_settings(&ctx.settings_path)?;
        lines.push(format!("Created {}", ctx.settings_path.display()));
    }

    if ctx.state.load().is_none() {
        ctx.save_state(&ctx.settings.new_competition())?;
        lines.push(format!(
            "Started an empty competition in {}",
            ctx.settings.data_dir().display()
        ));
    }
    Ok(lines.join("\n"))
}

fn rank_players(ctx: &Context, args: RankArgs) -> Result<String, CliError> {
    let from_file = args.input.is_some();
    let mut state = match &args.input {
        Some(path) => import_from_file(path)?,
        None => ctx.load_state(),
    };
    if let Some(multiplier) = args.multiplier {
        state.config.multiplier = multiplier;
    }
    state.config.validate()?;

    // Movement is tracked only for the stored competition under its own config.
    let tracked = !from_file && args.multiplier.is_none();
    let previous = if tracked { ctx.state.load_results() } else { None };
    let results = rank(&state.players, &state.config, previous.as_deref());
    if tracked {
        ctx.state.save_results(&results)?;
    }
    tracing::debug!(
        ranked = results.len(),
        players = state.players.len(),
        "Ranked competition"
    );

    if ctx.json(args.json) {
        Ok(output::leaderboard_json(&results)?)
    } else {
        Ok(output::leaderboard_table(
            &results,
            ctx.settings.display.show_hidden_total,
        ))
    }
}

/// Multipliers from `from` to `to` inclusive, `step` apart.
fn sweep_values(from: f64, to: f64, step: f64) -> Result<Vec<f64>, CliError> {
    if !from.is_finite() || !to.is_finite() || !step.is_finite() || step <= 0.0 {
        return Err(CliError::InvalidArgument(
            "sweep needs finite bounds and a positive step".to_string(),
        ));
    }
    if from > to {
        return Err(CliError::InvalidArgument(format!(
            "--from ({from}) must not exceed --to ({to})"
        )));
    }
    // Tolerate float drift so the upper bound is included.
    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    if count > MAX_SWEEP_STEPS {
        return Err(CliError::InvalidArgument(format!(
            "sweep would take {count} steps (limit {MAX_SWEEP_STEPS})"
        )));
    }
    Ok((0..count)
        .map(|i| ((from + step * i as f64) * 1e9).round() / 1e9)
        .collect())
}

fn sweep(ctx: &Context, args: SweepArgs) -> Result<String, CliError> {
    let mut state = ctx.load_state();
    let multipliers = sweep_values(args.from, args.to, args.step)?;

    let mut leaderboard = Leaderboard::new();
    let mut steps = Vec::with_capacity(multipliers.len());
    for multiplier in multipliers {
        state.config.multiplier = multiplier;
        state.config.validate()?;
        let results = leaderboard.recalculate(&state.players, &state.config).to_vec();
        steps.push(SweepStep {
            multiplier,
            results,
        });
    }

    if ctx.json(args.json) {
        Ok(serde_json::to_string_pretty(&steps)?)
    } else {
        Ok(output::sweep_table(
            &steps,
            ctx.settings.display.show_hidden_total,
        ))
    }
}

fn recommend(ctx: &Context, args: RecommendArgs) -> Result<String, CliError> {
    let mut state = ctx.load_state();
    let hidden = match args.seed {
        Some(seed) => {
            recommend_hidden_holes_with(&state.config.par, &mut StdRng::seed_from_u64(seed))
        },
        None => recommend_hidden_holes(&state.config.par),
    };

    let holes: Vec<String> = hidden.holes().map(|h| (h + 1).to_string()).collect();
    let mut out = format!(
        "Hidden holes: {} (par {})",
        holes.join(", "),
        hidden.par_total(&state.config.par)
    );
    if args.apply {
        state.config.hidden_holes = hidden;
        ctx.save_state(&state)?;
        out.push_str("\nApplied to the working competition.");
    }
    Ok(out)
}

/// 1-based hole number from the command line to an index.
fn hole_index(hole: usize) -> Result<usize, CliError> {
    if (1..=HOLE_COUNT).contains(&hole) {
        Ok(hole - 1)
    } else {
        Err(CliError::InvalidArgument(format!(
            "hole must be between 1 and {HOLE_COUNT}, got {hole}"
        )))
    }
}

fn parse_cap(value: &str) -> Result<HandicapCap, CliError> {
    if value.eq_ignore_ascii_case("unlimited") || value.eq_ignore_ascii_case("none") {
        return Ok(HandicapCap::Unlimited);
    }
    value
        .parse::<f64>()
        .map(HandicapCap::from_value)
        .map_err(|_| CliError::InvalidArgument(format!("invalid handicap cap \"{value}\"")))
}

fn config(ctx: &Context, cmd: ConfigCommand) -> Result<String, CliError> {
    let mut state = ctx.load_state();
    let message = match cmd {
        ConfigCommand::Show { json } => {
            return if ctx.json(json) {
                Ok(serde_json::to_string_pretty(&state.config)?)
            } else {
                Ok(output::config_summary(&state.config))
            };
        },
        ConfigCommand::SetMultiplier { value } => {
            state.config.multiplier = value;
            format!("Multiplier set to {value}")
        },
        ConfigCommand::SetWeight { value } => {
            state.config.hidden_weight = value;
            format!("Hidden weight set to {value}")
        },
        ConfigCommand::SetCap { value } => {
            state.config.limits.max_handicap = parse_cap(&value)?;
            format!("Handicap cap set to {value}")
        },
        ConfigCommand::SetRounding { mode } => {
            state.config.rounding_mode = mode;
            format!("Rounding set to {mode:?}")
        },
        ConfigCommand::SetPar { hole, par } => {
            let index = hole_index(hole)?;
            if !(3..=5).contains(&par) {
                return Err(CliError::InvalidArgument(format!(
                    "par must be 3, 4 or 5, got {par}"
                )));
            }
            state.config.par.set_par(index, par);
            format!("Hole {hole} is now par {par}")
        },
        ConfigCommand::ToggleHole { hole } => {
            let hidden = state.config.hidden_holes.toggle(hole_index(hole)?);
            let total = state.config.hidden_holes.par_total(&state.config.par);
            let mut msg = format!(
                "Hole {hole} is {} ({} hidden holes, par {total})",
                if hidden { "hidden" } else { "open" },
                state.config.hidden_holes.len()
            );
            if !state.config.hidden_holes.is_standard(&state.config.par) {
                msg.push_str("\nNote: a standard selection is 12 holes totalling par 48");
            }
            msg
        },
        ConfigCommand::DoubleParCut { enabled } => {
            state.config.limits.double_par_cut = enabled;
            format!(
                "Double-par cut {}",
                if enabled { "enabled" } else { "disabled" }
            )
        },
        ConfigCommand::Reset => {
            state.config = ctx.settings.defaults.config();
            "Configuration reset to defaults".to_string()
        },
    };

    state.config.validate()?;
    ctx.save_state(&state)?;
    Ok(message)
}

/// Find a player by exact id, falling back to exact name.
fn resolve_player(state: &CompetitionState, key: &str) -> Result<PlayerId, CliError> {
    let id = PlayerId::from(key);
    if state.player(&id).is_some() {
        return Ok(id);
    }
    let mut matches = state.players.iter().filter(|p| p.name == key);
    match (matches.next(), matches.next()) {
        (Some(p), None) => Ok(p.id.clone()),
        (Some(_), Some(_)) => Err(CliError::AmbiguousPlayer(key.to_string())),
        (None, _) => Err(CliError::UnknownPlayer(key.to_string())),
    }
}

fn player(ctx: &Context, cmd: PlayerCommand) -> Result<String, CliError> {
    let mut state = ctx.load_state();
    let message = match cmd {
        PlayerCommand::List { json } => {
            return if ctx.json(json) {
                Ok(serde_json::to_string_pretty(&state.players)?)
            } else {
                Ok(output::player_table(&state))
            };
        },
        PlayerCommand::Add { name, age } => {
            let id = state
                .add_player(&name)
                .ok_or_else(|| CliError::InvalidArgument("player name is empty".to_string()))?;
            if age.is_some() {
                state.set_age(&id, age);
            }
            format!("Added {} ({id})", name.trim())
        },
        PlayerCommand::Remove { player } => {
            let id = resolve_player(&state, &player)?;
            state.remove_player(&id);
            format!("Removed {player}")
        },
        PlayerCommand::Rename { player, name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::InvalidArgument("player name is empty".to_string()));
            }
            let id = resolve_player(&state, &player)?;
            state.rename_player(&id, name);
            format!("Renamed {player} to {name}")
        },
        PlayerCommand::Score {
            player,
            strokes,
            hole,
        } => {
            let id = resolve_player(&state, &player)?;
            let start = hole_index(hole)?;
            if start + strokes.len() > HOLE_COUNT {
                return Err(CliError::InvalidArgument(format!(
                    "{} scores starting at hole {hole} run past hole {HOLE_COUNT}",
                    strokes.len()
                )));
            }
            for (offset, &s) in strokes.iter().enumerate() {
                state.set_score(&id, start + offset, s);
            }
            let complete = state.player(&id).is_some_and(|p| p.is_complete());
            format!(
                "Recorded {} holes for {player}{}",
                strokes.len(),
                if complete { " (card complete)" } else { "" }
            )
        },
        PlayerCommand::Age { player, age } => {
            let id = resolve_player(&state, &player)?;
            state.set_age(&id, age);
            match age {
                Some(age) => format!("{player} is {age}"),
                None => format!("Cleared age for {player}"),
            }
        },
    };

    ctx.save_state(&state)?;
    Ok(message)
}

fn history(ctx: &Context, cmd: HistoryCommand) -> Result<String, CliError> {
    match cmd {
        HistoryCommand::List { json } => {
            let entries = ctx.history.list()?;
            if ctx.json(json) {
                Ok(output::history_json(&entries)?)
            } else {
                Ok(output::history_table(&entries))
            }
        },
        HistoryCommand::Save { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::InvalidArgument(
                    "competition name is empty".to_string(),
                ));
            }
            let saved = SavedCompetition::new(name, &ctx.load_state());
            let id = saved.id.clone();
            ctx.history.save(saved)?;
            Ok(format!("Saved \"{name}\" as {id}"))
        },
        HistoryCommand::Load { id } => {
            let saved = ctx.history.get(&id)?;
            saved.config.validate()?;
            replace_state(ctx, &saved.state())?;
            Ok(format!("Loaded \"{}\" ({} players)", saved.name, saved.players.len()))
        },
        HistoryCommand::Delete { id } => {
            if ctx.history.delete(&id)? {
                Ok(format!("Deleted {id}"))
            } else {
                Err(peoria_store::StoreError::NotFound(id).into())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peoria_store::state::RESULTS_FILE;

    /// Fresh scratch directory removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("peoria-cli-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn ctx_in(dir: &ScratchDir) -> Context {
        let settings = PeoriaSettings {
            data_dir: dir.0.display().to_string(),
            ..PeoriaSettings::default()
        };
        Context::new(settings, Some(dir.0.join("peoria.toml")))
    }

    fn add_with_card(ctx: &Context, name: &str, strokes: u32) {
        run(
            ctx,
            Command::Player(PlayerCommand::Add {
                name: name.to_string(),
                age: None,
            }),
        )
        .unwrap();
        run(
            ctx,
            Command::Player(PlayerCommand::Score {
                player: name.to_string(),
                strokes: vec![strokes; HOLE_COUNT],
                hole: 1,
            }),
        )
        .unwrap();
    }

    fn rank_cmd(multiplier: Option<f64>, json: bool) -> Command {
        Command::Rank(RankArgs {
            input: None,
            multiplier,
            json,
        })
    }

    #[test]
    fn second_rank_shows_movement() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 4);
        add_with_card(&ctx, "Ozaki", 5);

        let first = run(&ctx, rank_cmd(None, false)).unwrap();
        assert!(first.contains("Aoki"));
        assert!(!first.contains('→'));

        let second = run(&ctx, rank_cmd(None, false)).unwrap();
        assert!(second.contains('→'));
    }

    #[test]
    fn what_if_multiplier_leaves_results_untouched() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 4);
        run(&ctx, rank_cmd(Some(0.5), false)).unwrap();
        assert!(!dir.0.join(RESULTS_FILE).exists());
        run(&ctx, rank_cmd(None, false)).unwrap();
        assert!(dir.0.join(RESULTS_FILE).exists());
    }

    #[test]
    fn rank_json_lists_complete_players_only() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 5);
        run(
            &ctx,
            Command::Player(PlayerCommand::Add {
                name: "Late".to_string(),
                age: Some(40),
            }),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&run(&ctx, rank_cmd(None, true)).unwrap()).unwrap();
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["playerName"], "Aoki");
        assert_eq!(results[0]["net"], 75.6);
    }

    #[test]
    fn rank_rejects_invalid_multiplier() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        let err = run(&ctx, rank_cmd(Some(f64::NAN), false)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn score_past_last_hole_is_rejected() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 4);
        let err = run(
            &ctx,
            Command::Player(PlayerCommand::Score {
                player: "Aoki".to_string(),
                strokes: vec![4; 3],
                hole: 17,
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn partial_score_entry_starts_at_hole() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 4);
        run(
            &ctx,
            Command::Player(PlayerCommand::Score {
                player: "Aoki".to_string(),
                strokes: vec![6, 7],
                hole: 17,
            }),
        )
        .unwrap();
        let state = ctx.load_state();
        assert_eq!(&state.players[0].scores[15..], &[4, 6, 7]);
    }

    #[test]
    fn players_resolve_by_id_or_unique_name() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        for _ in 0..2 {
            run(
                &ctx,
                Command::Player(PlayerCommand::Add {
                    name: "Aoki".to_string(),
                    age: None,
                }),
            )
            .unwrap();
        }
        let state = ctx.load_state();
        assert!(matches!(
            resolve_player(&state, "Aoki"),
            Err(CliError::AmbiguousPlayer(_))
        ));
        assert!(matches!(
            resolve_player(&state, "Nobody"),
            Err(CliError::UnknownPlayer(_))
        ));
        let id = state.players[1].id.clone();
        assert_eq!(resolve_player(&state, &id.0).unwrap(), id);

        run(&ctx, Command::Player(PlayerCommand::Remove { player: id.0 })).unwrap();
        assert_eq!(ctx.load_state().players.len(), 1);
    }

    #[test]
    fn invalid_config_change_is_not_saved() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        let err = run(
            &ctx,
            Command::Config(ConfigCommand::SetWeight { value: 0.0 }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!((ctx.load_state().config.hidden_weight - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn toggle_hole_warns_about_non_standard_selection() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        let msg = run(&ctx, Command::Config(ConfigCommand::ToggleHole { hole: 1 })).unwrap();
        assert!(msg.contains("Hole 1 is open (11 hidden holes, par 44)"));
        assert!(msg.contains("Note"));
        assert!(!ctx.load_state().config.hidden_holes.contains(0));

        let msg = run(&ctx, Command::Config(ConfigCommand::ToggleHole { hole: 1 })).unwrap();
        assert!(msg.contains("Hole 1 is hidden"));
        assert!(!msg.contains("Note"));
    }

    #[test]
    fn cap_and_rounding_changes_persist() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        run(
            &ctx,
            Command::Config(ConfigCommand::SetCap {
                value: "36".to_string(),
            }),
        )
        .unwrap();
        run(
            &ctx,
            Command::Config(ConfigCommand::SetRounding {
                mode: peoria_core::RoundingMode::Ceil,
            }),
        )
        .unwrap();
        let config = ctx.load_state().config;
        assert_eq!(config.limits.max_handicap, HandicapCap::Max(36.0));
        assert_eq!(config.rounding_mode, peoria_core::RoundingMode::Ceil);

        run(&ctx, Command::Config(ConfigCommand::Reset)).unwrap();
        assert_eq!(ctx.load_state().config, ctx.settings.defaults.config());
    }

    #[test]
    fn set_par_checks_par_value() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        let err = run(
            &ctx,
            Command::Config(ConfigCommand::SetPar { hole: 2, par: 7 }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(ref msg) if msg.contains("got 7")));
        assert_eq!(ctx.load_state().config.par.par_of(1), Some(4));

        let err = run(
            &ctx,
            Command::Config(ConfigCommand::SetPar { hole: 19, par: 4 }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(ref msg) if msg.contains("between 1 and")));

        run(&ctx, Command::Config(ConfigCommand::SetPar { hole: 2, par: 5 })).unwrap();
        assert_eq!(ctx.load_state().config.par.par_of(1), Some(5));
    }

    #[test]
    fn parse_cap_values() {
        assert_eq!(parse_cap("unlimited").unwrap(), HandicapCap::Unlimited);
        assert_eq!(parse_cap("999").unwrap(), HandicapCap::Unlimited);
        assert_eq!(parse_cap("40").unwrap(), HandicapCap::Max(40.0));
        assert!(parse_cap("forty").is_err());
    }

    #[test]
    fn hole_numbers_are_one_based() {
        assert_eq!(hole_index(1).unwrap(), 0);
        assert_eq!(hole_index(18).unwrap(), 17);
        assert!(hole_index(0).is_err());
        assert!(hole_index(19).is_err());
    }

    #[test]
    fn seeded_recommendation_applies() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        let out = run(
            &ctx,
            Command::Recommend(RecommendArgs {
                apply: true,
                seed: Some(21),
            }),
        )
        .unwrap();
        assert!(out.contains("(par 48)"));

        let config = ctx.load_state().config;
        let expected = recommend_hidden_holes_with(&config.par, &mut StdRng::seed_from_u64(21));
        assert_eq!(config.hidden_holes, expected);
    }

    #[test]
    fn sweep_values_include_upper_bound() {
        let values = sweep_values(0.0, 1.0, 0.1).unwrap();
        assert_eq!(values.len(), 11);
        assert_eq!(values[3], 0.3);
        assert_eq!(values[10], 1.0);
        assert_eq!(sweep_values(0.8, 0.8, 0.1).unwrap(), vec![0.8]);
        assert!(sweep_values(1.0, 0.0, 0.1).is_err());
        assert!(sweep_values(0.0, 1.0, 0.0).is_err());
        assert!(sweep_values(0.0, 1e6, 0.1).is_err());
    }

    #[test]
    fn sweep_prints_each_multiplier() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 4);
        add_with_card(&ctx, "Ozaki", 5);
        let out = run(
            &ctx,
            Command::Sweep(SweepArgs {
                from: 0.5,
                to: 1.0,
                step: 0.5,
                json: false,
            }),
        )
        .unwrap();
        assert!(out.contains("== Multiplier 0.50"));
        assert!(out.contains("== Multiplier 1.00"));
        // The working multiplier is untouched
        assert!((ctx.load_state().config.multiplier - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn history_save_load_round_trip() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 5);
        run(
            &ctx,
            Command::History(HistoryCommand::Save {
                name: "Spring cup".to_string(),
            }),
        )
        .unwrap();
        run(&ctx, Command::Clear).unwrap();
        assert!(ctx.load_state().players.is_empty());

        let listing = run(&ctx, Command::History(HistoryCommand::List { json: false })).unwrap();
        assert!(listing.contains("Spring cup"));
        assert!(listing.contains("Aoki (Net 75.6)"));

        let id = ctx.history.list().unwrap()[0].id.clone();
        run(&ctx, Command::History(HistoryCommand::Load { id: id.clone() })).unwrap();
        assert_eq!(ctx.load_state().players[0].name, "Aoki");

        run(&ctx, Command::History(HistoryCommand::Delete { id: id.clone() })).unwrap();
        let err = run(&ctx, Command::History(HistoryCommand::Delete { id })).unwrap_err();
        assert!(matches!(err, CliError::Store(peoria_store::StoreError::NotFound(_))));
    }

    #[test]
    fn export_then_import_restores_players() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        add_with_card(&ctx, "Aoki", 4);
        let path = dir.0.join("cup.json");
        run(&ctx, Command::Export { path: Some(path.clone()) }).unwrap();
        run(&ctx, Command::Clear).unwrap();

        let msg = run(&ctx, Command::Import { path }).unwrap();
        assert!(msg.starts_with("Imported 1 players"));
        assert_eq!(ctx.load_state().players[0].name, "Aoki");
    }

    #[test]
    fn init_writes_settings_once() {
        let dir = ScratchDir::new();
        let ctx = ctx_in(&dir);
        let out = run(&ctx, Command::Init).unwrap();
        assert!(out.contains("Created"));
        assert!(dir.0.join("peoria.toml").exists());
        assert!(ctx.state.load().is_some());

        let out = run(&ctx, Command::Init).unwrap();
        assert!(out.contains("already exist"));
    }
}
