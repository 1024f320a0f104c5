//! Army gauntlet CLI.
//!
//! Builds candidate armies worth a fixed budget and plays every pair against
//! each other, once as attacker and once as defender.
//!
//! Usage:
//!   cargo run --release --bin gauntlet -- [OPTIONS]
//!
//! Modes:
//!   single  one army per unit type, as many units as the budget buys
//!   mixed   every mix of unit types that spends the budget

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use battle_odds::gauntlet::{armies_within_budget, round_robin, single_type_armies, Standing};
use battle_odds::{BattleConfig, BattleError, StatTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Single,
    Mixed,
}

#[derive(Parser, Debug)]
#[command(name = "gauntlet", version, about = "Rank armies of equal cost head to head")]
struct Args {
    /// Budget every army is built from
    #[arg(short, long, default_value_t = 20)]
    budget: u32,

    /// How candidate armies are generated
    #[arg(short, long, value_enum, default_value = "single")]
    mode: Mode,

    /// Rounds fought per battle before it is scored as unresolved
    #[arg(short, long, default_value_t = 5)]
    rounds: u32,

    /// Battles evaluated in parallel
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Unit stat table (JSON); defaults to the built-in roster
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Only print the best K armies
    #[arg(long)]
    top: Option<usize>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), BattleError> {
    let stats = match &args.stats {
        Some(path) => StatTable::load(path)?,
        None => StatTable::builtin(),
    };
    let armies = match args.mode {
        Mode::Single => single_type_armies(&stats, args.budget),
        Mode::Mixed => armies_within_budget(&stats, args.budget),
    };
    tracing::info!(candidates = armies.len(), budget = args.budget, "generated armies");

    let config = BattleConfig {
        max_rounds: args.rounds,
        threads: args.threads.max(1),
        ..BattleConfig::default()
    };
    let standings = round_robin(&armies, &stats, &config)?;
    let shown = args.top.unwrap_or(standings.len()).min(standings.len());
    print_standings(&standings[..shown]);
    Ok(())
}

fn print_standings(standings: &[Standing]) {
    let width = standings
        .iter()
        .map(|s| s.army.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Army".len());
    println!(
        "{:<width$}  {:>9}  {:>9}  {:>9}",
        "Army",
        "Attack %",
        "Defend %",
        "Combined",
        width = width
    );
    for s in standings {
        println!(
            "{:<width$}  {:>9.2}  {:>9.2}  {:>9.2}",
            s.army.to_string(),
            s.attack_win_rate,
            s.defense_win_rate,
            s.combined_win_rate,
            width = width
        );
    }
}
