#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use seabattle::{
    generate_field, init_logging, parse_position, simulation::play_match, GameConfig,
    DEFAULT_BOARD_SIZE,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run engine-versus-engine matches and print a JSON report per match.
    Simulate {
        #[arg(long, default_value_t = 1)]
        games: u64,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
    },
    /// Decode a cell reference such as "d 7" or "к десять".
    Parse { text: Vec<String> },
    /// Print a randomly generated fleet placement.
    Field {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
    },
}

#[cfg(feature = "std")]
fn base_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::random())
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    use rand::{rngs::SmallRng, SeedableRng};

    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { games, seed, size } => {
            let config = GameConfig::default().with_size(size);
            config.validate()?;
            let seed = base_seed(seed);
            log::info!("simulating {} games from seed {}", games, seed);
            for game in 0..games {
                let a = seed.wrapping_add(2 * game);
                let report = play_match(&config, a, a.wrapping_add(1))?;
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        Commands::Parse { text } => {
            let text = text.join(" ");
            let pos = parse_position(&text)?;
            println!("{}", pos);
        }
        Commands::Field { seed, size } => {
            let config = GameConfig::default().with_size(size);
            config.validate()?;
            let mut rng = SmallRng::seed_from_u64(base_seed(seed));
            let board = generate_field(size, &config.fleet, &mut rng)?;
            println!("{}", board);
        }
    }
    Ok(())
}
