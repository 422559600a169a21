use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use telestrations_rs::cli::{PlayerInstance, StatisticsAccumulator, create_player, print_player_help};
use telestrations_rs::game::{Game, GameConfig};
use telestrations_rs::observation_from_state;
use telestrations_rs::types::PlayerId;
use tracing::{info, warn};

#[derive(Debug, Parser, Clone)]
#[command(name = "telestrations-sim")]
#[command(about = "Relay simulator - run word/drawing chains between bot players")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Comma-separated player codes (e.g., R,R,E or E,E,E,E)
    #[arg(long, default_value = "R,R,R")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file holding a game config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each finished game as JSON
    #[arg(long)]
    dump: bool,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,

    /// Log round-by-round progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "info" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if args.help_players {
        print_player_help();
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => serde_json::from_str::<GameConfig>(&fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    config.validate()?;

    let mut seats: Vec<(PlayerId, PlayerInstance)> = Vec::new();
    for (idx, code) in args.players.split(',').enumerate() {
        match create_player(code) {
            Some(player) => seats.push((PlayerId::new(format!("{}{}", player.name(), idx + 1)), player)),
            None => {
                eprintln!("Error: Unknown player code '{}'", code);
                eprintln!("Use --help-players to see available codes");
                std::process::exit(1);
            }
        }
    }
    if seats.len() < config.min_players {
        eprintln!("Error: Need at least {} players, got {}", config.min_players, seats.len());
        std::process::exit(1);
    }

    info!(games = args.num, players = seats.len(), "starting simulation");
    let mut stats = StatisticsAccumulator::new();

    for game_idx in 0..args.num {
        let mut rng = StdRng::seed_from_u64(args.seed + u64::from(game_idx));
        let start = Instant::now();
        let mut game = Game::new(config.clone());
        let status = game.play(&seats, &mut rng)?;
        let duration = start.elapsed();
        if !game.is_over() {
            warn!(game = %game.id, status = %status, "game stalled before finishing");
        }

        stats.after(&game, duration);

        if args.dump {
            println!("{}", serde_json::to_string_pretty(&observation_from_state(&game.state))?);
        } else {
            let seating = seats.iter().map(|(id, _)| id).join(",");
            println!(
                "Game {:>4}: Seating=[{}], Status={}, Rounds={:>3}, Duration={:?}",
                game_idx + 1,
                seating,
                status,
                game.state.round(),
                duration
            );
        }
    }

    print_summary(&stats);
    Ok(())
}

fn print_summary(stats: &StatisticsAccumulator) {
    let stats = &stats.stats;
    println!("\n{}", "=".repeat(60));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Total Games: {}", stats.games);
    println!("  Completed: {}", stats.completed);
    println!("  Avg Rounds: {:.2}", stats.get_avg_rounds());
    println!("  Avg Chain Length: {:.2}", stats.get_avg_chain_len());
    println!("  Intact Chains: {:.1}%", stats.get_intact_rate() * 100.0);
    println!("  Avg Duration: {:.2?}", stats.get_avg_duration());
}
