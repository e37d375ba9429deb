//! CLI frontend for the Roundkeeper tabletop aid.

mod commands;
mod statblock;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rk",
    about = "Roundkeeper — initiative tracking and monster statblocks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice expression like 2d6+3
    Roll {
        /// The expression to roll
        expression: String,

        /// Seed for a reproducible roll (default: entropy)
        #[arg(short, long)]
        seed: Option<i64>,
    },

    /// Run the interactive initiative tracker
    Track {
        /// Encounter seed; the same seed replays the same rolls
        #[arg(short, long, default_value = "42")]
        seed: i64,
    },

    /// Generate a monster statblock for a challenge rating
    Generate {
        /// Target challenge rating (0, 0.125, 0.25, 0.5, 1, 2, ...)
        #[arg(long)]
        cr: f64,

        /// Monster name
        #[arg(long, default_value = "Custom Monster")]
        name: String,

        /// Archetype to apply: sneak
        #[arg(long)]
        archetype: Option<String>,

        /// Emit JSON instead of a rendered statblock
        #[arg(long)]
        json: bool,
    },

    /// Work with the pre-split SRD reference catalog
    Srd {
        #[command(subcommand)]
        command: SrdCommands,
    },
}

#[derive(Subcommand)]
enum SrdCommands {
    /// Split bulk SRD arrays into per-entry files plus an index
    Split {
        /// Bulk monster JSON array
        monsters: PathBuf,

        /// Bulk spell JSON array (optional)
        spells: Option<PathBuf>,

        /// Output directory for the catalog
        #[arg(short, long)]
        out: PathBuf,
    },

    /// List the monsters in a catalog
    List {
        /// Catalog directory (as produced by `rk srd split`)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Render one monster statblock from a catalog
    Show {
        /// The monster's index name, e.g. goblin
        index: String,

        /// Catalog directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll { expression, seed } => commands::roll::run(&expression, seed),
        Commands::Track { seed } => commands::track::run(seed),
        Commands::Generate {
            cr,
            name,
            archetype,
            json,
        } => commands::generate::run(cr, &name, archetype.as_deref(), json),
        Commands::Srd { command } => match command {
            SrdCommands::Split {
                monsters,
                spells,
                out,
            } => commands::srd::split(&monsters, spells.as_deref(), &out),
            SrdCommands::List { dir } => commands::srd::list(&dir),
            SrdCommands::Show { index, dir } => commands::srd::show(&dir, &index),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
