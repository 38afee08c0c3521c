use broadside::player::run_match;
use broadside::{
    AiPlayer, Cell, Fleet, GameStatus, Grid, Match, Mode, Orientation, Phase, Player, Side,
    Vessel, VesselId,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const MAX_TURNS: u32 = 400;

fn check_outcome(game: &Match, winner: Option<Side>) {
    match winner {
        Some(side) => {
            assert_eq!(game.winner(), Some(side));
            assert_eq!(game.fleet().alive_count(side.opponent()), 0);
            assert!(game.fleet().alive_count(side) > 0);
        }
        None => {
            assert!(game.turn_number() > MAX_TURNS);
            assert_eq!(game.status(), GameStatus::InProgress);
        }
    }
}

#[test]
fn test_ai_seat_against_automated_side() {
    for seed in [123, 7, 2024] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Match::new();
        game.restart(Mode::Single, &mut rng).unwrap();
        let mut p1 = AiPlayer::new();
        let winner = run_match(&mut game, &mut p1, None, &mut rng, MAX_TURNS).unwrap();
        check_outcome(&game, winner);
    }
}

#[test]
fn test_two_ai_seats_hot_seat() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut game = Match::new();
    game.restart(Mode::TwoPlayer, &mut rng).unwrap();
    let mut p1 = AiPlayer::new();
    let mut p2 = AiPlayer::new();
    let winner = run_match(&mut game, &mut p1, Some(&mut p2 as &mut dyn Player), &mut rng, MAX_TURNS).unwrap();
    check_outcome(&game, winner);
    assert_ne!(game.phase(), Phase::AiTurn);
}

#[test]
fn test_same_seeds_replay_the_same_match() {
    let play = |seed: u64| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Match::new();
        game.restart(Mode::Single, &mut rng).unwrap();
        let winner = run_match(&mut game, &mut AiPlayer::new(), None, &mut rng, MAX_TURNS).unwrap();
        (winner, game.turn_number(), game.fleet().clone())
    };
    assert_eq!(play(31), play(31));
}

#[test]
fn test_unstarted_match_is_an_error() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = Match::new();
    assert!(run_match(&mut game, &mut AiPlayer::new(), None, &mut rng, MAX_TURNS).is_err());
}

#[test]
fn test_ai_seat_carries_out_its_maneuver() {
    let mut fleet = Fleet::new(Grid::default());
    for (side, x, y, orientation) in [
        (Side::A, 2, 10, Orientation::Right),
        (Side::B, 15, 5, Orientation::Left),
    ] {
        fleet
            .place(Vessel::new(side, 3, Cell::new(x, y), orientation).unwrap())
            .unwrap();
    }
    let mut game = Match::with_fleet(Mode::Single, fleet);
    let start = game.fleet().get(VesselId(0)).unwrap().pose();

    let mut rng = SmallRng::seed_from_u64(21);
    AiPlayer::new().take_turn(&mut game, &mut rng).unwrap();

    assert_eq!(game.phase(), Phase::AiTurn);
    let ship = game.fleet().get(VesselId(0)).unwrap();
    assert_ne!(ship.pose(), start);
    assert!(ship.has_moved);
}
