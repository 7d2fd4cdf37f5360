//! CLI argument parsing for the Fuwakuru terminal front end.

use clap::{Parser, Subcommand, ValueEnum};
use fuwakuru_logic::board::Island;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuwakuru", about = "Gamified gymnastics training tracker", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Island argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IslandArg {
    Mat,
    Vault,
}

impl From<IslandArg> for Island {
    fn from(arg: IslandArg) -> Self {
        match arg {
            IslandArg::Mat => Island::Mat,
            IslandArg::Vault => Island::Vault,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the selectable characters
    Characters,

    /// Select a character without starting
    Choose {
        /// Character id (chara1..chara10)
        character: String,
    },

    /// Save name and character and start the adventure
    Start {
        /// Player name
        #[arg(short, long)]
        name: String,

        /// Character id; defaults to the currently selected one
        #[arg(short = 'C', long)]
        character: Option<String>,
    },

    /// Show an island's technique boards
    Board {
        #[arg(value_enum)]
        island: IslandArg,

        /// Show locked rows past the next open technique
        #[arg(short, long)]
        all: bool,
    },

    /// Open a technique page
    #[command(alias = "show")]
    Technique {
        /// Technique id
        id: String,
    },

    /// Mark a checkpoint of a technique as done
    Check {
        /// Technique id
        id: String,

        /// Checkpoint number, starting at 1
        number: usize,
    },

    /// Show the HUD
    Hud {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve where navigating to a path lands
    Go {
        /// Route path, e.g. /mat-island or /technique/front-roll
        path: String,
    },

    /// Clear the current player's progress on one island
    ResetIsland {
        #[arg(value_enum)]
        island: IslandArg,
    },

    /// Delete all tracker data from every storage scope
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export tracker data to a snapshot file
    Export {
        /// Output file
        file: PathBuf,
    },

    /// Import tracker data from a snapshot file
    Import {
        /// Input file
        file: PathBuf,
    },

    /// Check the technique catalog for problems
    Catalog,
}
