//! Fuwakuru terminal front end.

use clap::Parser;
use colored::*;
use eyre::{eyre, Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};

mod cli;
mod config;

use cli::{Cli, Command};
use config::Config;
use fuwakuru_core::engine::Tracker;
use fuwakuru_core::tracker::ClearOutcome;
use fuwakuru_logic::board::{Island, RowStatus, StageBoard};
use fuwakuru_logic::catalog::validate_catalog;
use fuwakuru_logic::characters::{self, ROSTER};
use fuwakuru_logic::hud::HudSnapshot;
use fuwakuru_logic::routes::{exit_route, Route};
use fuwakuru_logic::unlock::TechniqueState;

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("Using data directory {}", config.data_dir.display());

    let storage = config.open_storage()?;
    let catalog = config.catalog()?;
    let mut tracker = Tracker::new(storage, catalog);

    match cli.command {
        Some(cmd) => run_command(&mut tracker, cmd),
        None => show_hud(&tracker.hud()),
    }
}

fn run_command(tracker: &mut Tracker, cmd: Command) -> Result<()> {
    match cmd {
        Command::Characters => {
            let selected = tracker.identity().character_id;
            for c in ROSTER.iter() {
                let marker = if selected.as_deref() == Some(c.id) { "*" } else { " " };
                if c.furigana.is_empty() {
                    println!("{} {:<8} {}", marker, c.id, c.name);
                } else {
                    println!("{} {:<8} {}（{}）", marker, c.id, c.name, c.furigana);
                }
            }
            Ok(())
        }
        Command::Choose { character } => {
            let c = characters::find(&character).ok_or_else(|| eyre!("Unknown character: {}", character))?;
            tracker.choose_character(c.id, c.img);
            println!("{} Selected {}", "→".blue(), c.name);
            Ok(())
        }
        Command::Start { name, character } => {
            let identity = tracker.identity();
            let (id, img) = match character {
                Some(id) => {
                    let c = characters::find(&id).ok_or_else(|| eyre!("Unknown character: {}", id))?;
                    (Some(c.id.to_string()), Some(c.img.to_string()))
                }
                None => (identity.character_id, identity.character_img),
            };
            let profile = tracker.start_adventure(&name, id.as_deref(), img.as_deref())?;
            println!("{} Adventure started as {}", "✓".green(), profile.as_str().bold());
            Ok(())
        }
        Command::Board { island, all } => {
            ensure_entry(tracker, island_route(island.into()))?;
            let island: Island = island.into();
            println!("{}\n", island.title().bold());
            for board in tracker.boards(island) {
                print_board(&board, all);
            }
            Ok(())
        }
        Command::Technique { id } => {
            ensure_entry(tracker, Route::Technique(id.clone()))?;
            let view = tracker.open_technique(&id)?;
            let t = &view.technique;
            println!("{} ({})", t.title.bold(), t.stage.title());
            if let Some(video) = &t.video {
                println!("  video: {}", video);
            }
            let state = match view.state() {
                TechniqueState::Cleared => "CLEARED".green(),
                TechniqueState::Open => "OPEN".yellow(),
                TechniqueState::Locked => "LOCKED".red(),
            };
            println!("  {}\n", state);
            for (i, (text, done)) in t.checkpoints.iter().zip(&view.checks).enumerate() {
                let mark = if *done { "[x]".green() } else { "[ ]".normal() };
                println!("  {} {}. {}", mark, i + 1, text);
            }
            println!("\n  back: {}", exit_route(t));
            Ok(())
        }
        Command::Check { id, number } => {
            ensure_entry(tracker, Route::Technique(id.clone()))?;
            let index = number.checked_sub(1).ok_or_else(|| eyre!("Checkpoint numbers start at 1"))?;
            match tracker.clear_checkpoint(&id, index)? {
                ClearOutcome::AlreadyDone => {
                    println!("{} Checkpoint {} is already done", "!".yellow(), number);
                }
                ClearOutcome::Cleared(done) => {
                    println!("{} Level up! Now level {}", "✓".green(), done.level);
                    if done.technique_cleared {
                        println!("{} Technique cleared!", "★".yellow());
                    }
                    if let Some(reward) = done.reward {
                        println!("{} New friend: {}", "♪".magenta(), reward.label());
                    }
                }
            }
            Ok(())
        }
        Command::Hud { json } => {
            let hud = tracker.hud();
            if json {
                println!("{}", serde_json::to_string_pretty(&hud)?);
                Ok(())
            } else {
                show_hud(&hud)
            }
        }
        Command::Go { path } => {
            let requested = Route::parse(&path);
            let landed = tracker.navigate(requested.clone());
            if landed == requested {
                println!("{}", landed);
            } else {
                println!("{} {} → {}", "!".yellow(), requested, landed);
            }
            Ok(())
        }
        Command::ResetIsland { island } => {
            ensure_entry(tracker, island_route(island.into()))?;
            let island: Island = island.into();
            tracker.reset_island(island);
            println!("{} Progress on {} cleared", "✓".green(), island.title());
            Ok(())
        }
        Command::Reset { yes } => {
            if !yes && !confirm("Delete all Fuwakuru data? [y/N] ")? {
                println!("Cancelled");
                return Ok(());
            }
            let report = tracker.reset_all()?;
            println!("{} Removed {} entries", "✓".green(), report.deleted);
            if let Some(n) = report.cache_cleared {
                println!("  cleared {} cached assets", n);
            }
            Ok(())
        }
        Command::Export { file } => {
            let out = fs::File::create(&file).context(format!("Failed to create {}", file.display()))?;
            let count = tracker.save(io::BufWriter::new(out))?;
            println!("{} Exported {} entries to {}", "✓".green(), count, file.display());
            Ok(())
        }
        Command::Import { file } => {
            let input = fs::File::open(&file).context(format!("Failed to open {}", file.display()))?;
            let count = tracker.load(io::BufReader::new(input))?;
            println!("{} Imported {} entries", "✓".green(), count);
            Ok(())
        }
        Command::Catalog => {
            let problems = validate_catalog(&tracker.catalog);
            if problems.is_empty() {
                println!("{} {} techniques, no problems", "✓".green(), tracker.catalog.len());
                return Ok(());
            }
            for p in &problems {
                println!("{} {:?}", "✗".red(), p);
            }
            Err(eyre!("{} catalog problems", problems.len()))
        }
    }
}

fn island_route(island: Island) -> Route {
    match island {
        Island::Mat => Route::MatIsland,
        Island::Vault => Route::VaultIsland,
    }
}

/// Fail unless the player may enter `route`.
fn ensure_entry(tracker: &Tracker, route: Route) -> Result<()> {
    match tracker.navigate(route.clone()) {
        landed if landed == route => Ok(()),
        Route::CharacterSelect => Err(eyre!("Enter a name and choose a character first (fuwakuru start)")),
        Route::NotFound => Err(eyre!("No such page: {}", route)),
        other => Err(eyre!("Redirected to {}", other)),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn print_board(board: &StageBoard, all: bool) {
    println!(
        "{}  {}/{} ({}%)",
        board.title.bold(),
        board.cleared,
        board.total,
        board.percent()
    );
    let rows = if all { &board.rows[..] } else { board.visible_rows() };
    for row in rows {
        let badge = match row.status {
            RowStatus::Cleared => row.status.badge().green(),
            RowStatus::New => row.status.badge().yellow(),
            RowStatus::Open => row.status.badge().normal(),
            RowStatus::Locked => row.status.badge().dimmed(),
        };
        println!("  {}. {:<10} {} ({})", row.order, badge, row.title, row.technique_id);
    }
    println!();
}

fn show_hud(hud: &HudSnapshot) -> Result<()> {
    println!("{}  Lv.{}  [{}]", hud.name.bold(), hud.level, hud.avatar);
    println!(
        "  companions {}  medals {}  cleared {}",
        hud.companions, hud.medals, hud.cleared_total
    );
    if !hud.thumbnails.is_empty() {
        let labels: Vec<&str> = hud.thumbnails.iter().map(|t| t.label.as_str()).collect();
        let more = if hud.overflow > 0 {
            format!(" +{}", hud.overflow)
        } else {
            String::new()
        };
        println!("  {}{}", labels.join(" "), more);
    }
    Ok(())
}
