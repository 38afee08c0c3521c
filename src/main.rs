#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging,
    player::{cli::print_match, run_match},
    AiPlayer, CliPlayer, Match, Mode,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

/// Hard stop for unattended games.
#[cfg(feature = "std")]
const MAX_TURNS: u32 = 500;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum ModeArg {
    /// Player 2 is the computer.
    Single,
    /// Two humans share the terminal.
    Two,
}

#[cfg(feature = "std")]
impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Single => Mode::Single,
            ModeArg::Two => Mode::TwoPlayer,
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play in the terminal.
    Play {
        #[arg(long, value_enum, default_value_t = ModeArg::Single)]
        mode: ModeArg,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Let the computer play both sides.
    Watch {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = MAX_TURNS)]
        max_turns: u32,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { mode, seed } => {
            let mut rng = make_rng(seed);
            let mut game = Match::new();
            game.restart(mode.into(), &mut rng)
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("MELEE AT SEA - type 'help' for commands.");

            // Both hot-seat players share the terminal.
            let mut seat = CliPlayer::new();
            let winner = run_match(&mut game, &mut seat, None, &mut rng, u32::MAX)?;
            if winner.is_none() {
                println!("Match abandoned.");
            }
        }
        Commands::Watch { seed, max_turns } => {
            println!("Starting AI vs AI game...");
            let mut rng = make_rng(seed);
            let mut game = Match::new();
            game.restart(Mode::Single, &mut rng)
                .map_err(|e| anyhow::anyhow!(e))?;
            let mut ai = AiPlayer::verbose();
            let winner = run_match(&mut game, &mut ai, None, &mut rng, max_turns)?;
            print_match(&game);
            match winner {
                Some(side) => println!("{} wins after {} turns.", side, game.turn_number()),
                None => println!("No winner after {} turns.", max_turns),
            }
        }
    }
    Ok(())
}
