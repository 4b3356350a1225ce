use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tarot_days::game::{save, simulate, SimReport, Strategy};
use tarot_days::{logger, GameSettings, LifeState, Variant};

/// Play Tarot Days with a fixed strategy and report how it went.
#[derive(Parser, Debug)]
#[command(name = "tarot-days", version, about)]
struct Cli {
    /// Settings file (TOML). Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Strategy::Worker)]
    strategy: Strategy,

    /// Override the game variant from the settings file.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Days to play at most.
    #[arg(short, long, default_value_t = 30)]
    days: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Continue from a save file instead of a new game.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final state to this save file.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::debug!(?cli, "starting");

    let mut settings = match &cli.config {
        Some(path) => GameSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };
    if let Some(variant) = cli.variant {
        settings.game.variant = variant;
    }

    let mut state = LifeState::new(settings, cli.seed);
    if let Some(path) = &cli.load {
        save::load_from_file(&mut state, path)
            .with_context(|| format!("loading save {}", path.display()))?;
    }

    let report = simulate(&mut state, cli.strategy, cli.days, cli.seed);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = &cli.save {
        save::save_to_file(&state, path)
            .with_context(|| format!("writing save {}", path.display()))?;
    }
    Ok(())
}

fn print_report(report: &SimReport) {
    let hud = &report.hud;
    println!(
        "Tarot Days: {:?} strategy, {:?} mode, seed {}",
        report.strategy, report.variant, report.seed
    );
    println!(
        "Day {} | ${} | Fatigue {}/{}",
        hud.day, hud.money, hud.fatigue, hud.max_fatigue
    );
    if !hud.effects.is_empty() {
        println!("Active cards: {} [{}]", hud.effects, hud.effect_symbols.join(" "));
    }
    if let Some(gallery) = &hud.gallery {
        println!(
            "Gallery: {} in storage, {}/{} displayed, {} rented",
            gallery.inventory, gallery.displayed, gallery.max_display, gallery.rented
        );
    }
    match (&hud.cleared_with, report.cleared_on_day) {
        (Some(gift), Some(day)) => println!("Cleared on day {} with a {}!", day, gift),
        (Some(gift), None) => println!("Already cleared with a {}.", gift),
        _ => println!("Not cleared after {} days.", report.days_played),
    }

    let s = &report.stats;
    println!(
        "Earned ${} | Spent ${} | Shifts {} | Readings {} | Spins {} | Mole rounds {} | Paintings {} (sold {})",
        s.total_earned,
        s.total_spent,
        s.work_sessions,
        s.fortunes_drawn,
        s.slot_spins,
        s.mole_rounds,
        s.paintings_created,
        s.paintings_sold
    );
    println!("Recent:");
    for line in &report.log_tail {
        println!("  {}", line);
    }
}
