use broadside::{player::run_match, AiPlayer, Match, Mode, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

const MAX_TURNS: u32 = 500;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <setup-seed> <play-seed>", args[0]);
        std::process::exit(1);
    }
    let setup_seed: u64 = args[1].parse()?;
    let play_seed: u64 = args[2].parse()?;

    let mut setup_rng = SmallRng::seed_from_u64(setup_seed);
    let mut play_rng = SmallRng::seed_from_u64(play_seed);

    let mut game = Match::new();
    game.restart(Mode::Single, &mut setup_rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    let mut p1 = AiPlayer::new();
    let winner = run_match(&mut game, &mut p1, None, &mut play_rng, MAX_TURNS)?;

    let fleet = game.fleet();
    let result = json!({
        "player1": {
            "alive": fleet.alive_count(Side::A),
            "guns": fleet.alive(Side::A).map(|(_, v)| v.total_weapons() as u32).sum::<u32>(),
        },
        "player2": {
            "alive": fleet.alive_count(Side::B),
            "guns": fleet.alive(Side::B).map(|(_, v)| v.total_weapons() as u32).sum::<u32>(),
        },
        "turns": game.turn_number(),
        "winner": winner.map(|side| match side {
            Side::A => "player1",
            Side::B => "player2",
        }),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
