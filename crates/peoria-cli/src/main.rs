mod commands;
mod error;
mod output;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use peoria_core::RoundingMode;

use crate::commands::Context;
use crate::settings::PeoriaSettings;

#[derive(Parser)]
#[command(
    name = "peoria",
    version,
    about = "Hidden-hole (Peoria) handicap ranking for golf competitions"
)]
pub struct Cli {
    /// Directory for the working competition and history (overrides settings)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Settings file (default: ./peoria.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default settings file and start an empty competition
    Init,
    /// Rank every player with a complete score card
    Rank(RankArgs),
    /// Re-rank across a range of multipliers and show how places move
    Sweep(SweepArgs),
    /// Suggest a random standard set of hidden holes
    Recommend(RecommendArgs),
    /// Show or change the competition configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Manage players and their score cards
    #[command(subcommand)]
    Player(PlayerCommand),
    /// Saved competitions
    #[command(subcommand)]
    History(HistoryCommand),
    /// Write the working competition to a JSON file
    Export {
        /// Output file (default: peoria-<timestamp>.json)
        path: Option<PathBuf>,
    },
    /// Replace the working competition with one read from a JSON file
    Import { path: PathBuf },
    /// Discard the working competition and its last results
    Clear,
}

#[derive(clap::Args, Debug)]
pub struct RankArgs {
    /// Rank a competition file instead of the working competition
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Use this multiplier for this run only
    #[arg(long, allow_hyphen_values = true)]
    pub multiplier: Option<f64>,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct SweepArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub from: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub to: f64,

    #[arg(long, default_value_t = 0.1)]
    pub step: f64,

    /// Output JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct RecommendArgs {
    /// Store the suggestion as the competition's hidden holes
    #[arg(long)]
    pub apply: bool,

    /// Seed for a reproducible suggestion
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current configuration
    Show {
        #[arg(long)]
        json: bool,
    },
    SetMultiplier {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Weight applied to the hidden-hole total
    SetWeight { value: f64 },
    /// Handicap cap: a number, or "unlimited"
    SetCap { value: String },
    /// round, floor or ceil
    SetRounding { mode: RoundingMode },
    /// Change the par of a hole (1-18)
    SetPar { hole: usize, par: u8 },
    /// Hide or reveal a hole (1-18)
    ToggleHole { hole: usize },
    /// Count strokes above double par as double par (on/off)
    DoubleParCut {
        #[arg(value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
    /// Back to the default configuration; players are kept
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommand {
    Add {
        name: String,
        #[arg(long)]
        age: Option<u32>,
    },
    /// Remove a player (by id or name)
    Remove { player: String },
    Rename { player: String, name: String },
    /// Enter strokes starting at --hole (default 1); 0 clears a hole
    Score {
        player: String,
        #[arg(required = true, num_args = 1..)]
        strokes: Vec<u32>,
        #[arg(long, default_value_t = 1)]
        hole: usize,
    },
    /// Set the tie-break age; omit to clear it
    Age { player: String, age: Option<u32> },
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    List {
        #[arg(long)]
        json: bool,
    },
    /// Save the working competition under a name
    Save { name: String },
    /// Make a saved competition the working one
    Load { id: String },
    Delete { id: String },
}

fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = PeoriaSettings::load(cli.settings.as_deref());
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.display().to_string();
    }
    if let Err(e) = settings.validate() {
        bail(e);
    }

    let ctx = Context::new(settings, cli.settings);
    match commands::run(&ctx, cli.command) {
        Ok(out) => {
            if !out.is_empty() {
                println!("{out}");
            }
        },
        Err(e) => bail(e),
    }
}
