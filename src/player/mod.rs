//! Player trait, implementations and the match driver
//!
//! - AiPlayer: drives a human seat with the decision procedure
//! - CliPlayer: interactive text front-end
//! - run_match: alternates seats and the automated side until game over

use rand::rngs::SmallRng;

use crate::game::{Match, Phase};
use crate::common::{GameEvent, Side};

/// Something that can play one side's turn through the command surface.
pub trait Player {
    /// Issue commands for the active side until its turn is handed off.
    fn take_turn(&mut self, game: &mut Match, rng: &mut SmallRng) -> anyhow::Result<()>;

    /// Receive events raised since the previous notification.
    fn observe(&mut self, _game: &Match, _events: &[GameEvent]) {}

    /// Receive one line of the automated side's turn log.
    fn announce(&mut self, _line: &str) {}

    /// `true` once the player has asked to leave the match.
    fn wants_quit(&self) -> bool {
        false
    }
}

pub mod ai;
pub use ai::AiPlayer;

pub mod cli;
pub use cli::CliPlayer;

/// Play `game` to the end, or until `max_turns` have started.
///
/// `side_b` is only consulted in two-player mode and falls back to `side_a`
/// when absent, as on a shared hot-seat terminal. In single mode the
/// automated side plays itself. Returns the winner, or `None` if the turn
/// cap was reached or a player quit.
pub fn run_match(
    game: &mut Match,
    side_a: &mut dyn Player,
    mut side_b: Option<&mut dyn Player>,
    rng: &mut SmallRng,
    max_turns: u32,
) -> anyhow::Result<Option<Side>> {
    loop {
        if game.turn_number() > max_turns {
            log::warn!("turn cap {} reached without a winner", max_turns);
            return Ok(None);
        }
        match game.phase() {
            Phase::Title => return Err(anyhow::anyhow!("match has not been started")),
            Phase::GameOver { loser } => return Ok(Some(loser.opponent())),
            Phase::AiTurn => {
                let log = game.play_ai_turn(rng).unwrap_or_default();
                for line in &log {
                    side_a.announce(line);
                }
            }
            Phase::Select(side) | Phase::Maneuver(side) | Phase::Fire(side) => {
                let player: &mut dyn Player = match side {
                    Side::A => &mut *side_a,
                    Side::B => match side_b.as_deref_mut() {
                        Some(p) => p,
                        None => &mut *side_a,
                    },
                };
                let turn = game.turn_number();
                player.take_turn(game, rng)?;
                if player.wants_quit() {
                    return Ok(None);
                }
                if game.phase().active_side() == Some(side) && game.turn_number() == turn {
                    return Err(anyhow::anyhow!("{} did not finish the turn", side));
                }
            }
        }
        let events = game.drain_events();
        side_a.observe(game, &events);
        if let Some(p) = side_b.as_deref_mut() {
            p.observe(game, &events);
        }
    }
}
