//! battle-odds -- exact win probabilities for a single battle.
//!
//! Usage:
//!   battle-odds --attacker "Infantry=3,Artillery=1" --defender "Infantry=2" [OPTIONS]
//!
//! Logs go to stderr (filter with `RUST_LOG`); results go to stdout.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Serialize;

use battle_odds::{simulate_battle, Army, BattleConfig, BattleError, BattleRequest, BattleResult, StatTable};

#[derive(Parser, Debug)]
#[command(name = "battle-odds", version, about = "Exact victory probabilities for dice battles")]
struct Args {
    /// Attacking army, e.g. "Infantry=3,Tank=1"
    #[arg(short, long, default_value = "")]
    attacker: String,

    /// Defending army, e.g. "Infantry=2"
    #[arg(short, long, default_value = "")]
    defender: String,

    /// Rounds fought before the battle is scored as unresolved
    #[arg(short, long, default_value_t = battle_odds::battle::DEFAULT_MAX_ROUNDS)]
    rounds: u32,

    /// Resolve the defender's volley first within each round
    #[arg(long)]
    defender_first: bool,

    /// Explore the full recursion tree without caching equivalent states
    #[arg(long)]
    no_memo: bool,

    /// Worker threads for the opening volley's branches
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Unit stat table (JSON); defaults to the built-in roster
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Print the result as a single JSON object
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    request: &'a BattleRequest,
    result: &'a BattleResult,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
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
    let attackers: Army = args.attacker.parse()?;
    let defenders: Army = args.defender.parse()?;
    let request = BattleRequest::new(attackers, defenders).with_config(BattleConfig {
        max_rounds: args.rounds,
        attacker_first: !args.defender_first,
        memoize: !args.no_memo,
        threads: args.threads.max(1),
    });

    let result = simulate_battle(&request, &stats)?;

    if args.json {
        let report = Report {
            request: &request,
            result: &result,
        };
        let line = serde_json::to_string(&report).expect("report serializes to JSON");
        println!("{}", line);
        return Ok(());
    }

    let outcomes = &result.outcomes;
    println!("attacker: {}", display_army(&request.attackers));
    println!("defender: {}", display_army(&request.defenders));
    println!("rounds: {}", request.config.max_rounds);
    println!("attacker wins: {:.2}%", result.attacker_win * 100.0);
    println!("defender wins: {:.2}%", result.defender_win * 100.0);
    println!("unresolved: {:.2}%", result.unresolved_mass * 100.0);
    println!(
        "branches: {} (attacker {}, defender {}, unresolved {})",
        outcomes.branches, outcomes.attacker_wins, outcomes.defender_wins, outcomes.unresolved
    );
    Ok(())
}

fn display_army(army: &Army) -> String {
    if army.is_empty() {
        "-".to_string()
    } else {
        army.to_string()
    }
}
