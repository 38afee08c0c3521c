use log::{info, warn};
use rand::rngs::SmallRng;

use crate::ai::{plan_turn, Action, Maneuver};
use crate::common::GameEvent;
use crate::game::{Match, Phase};

use super::cli::print_match;
use super::Player;

/// Seat filled by the decision procedure, acting through the same commands a
/// human would issue.
pub struct AiPlayer {
    verbose: bool,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// An AI seat that prints the board and the automated log as play goes on.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AiPlayer {
    fn take_turn(&mut self, game: &mut Match, rng: &mut SmallRng) -> anyhow::Result<()> {
        let Phase::Select(side) = game.phase() else {
            return Err(anyhow::anyhow!("AI seat asked to move in {:?}", game.phase()));
        };
        let Some(plan) = plan_turn(game.fleet(), side, rng) else {
            game.end_phase();
            return Ok(());
        };
        let bow = game
            .fleet()
            .get(plan.vessel)
            .map(|v| v.bow())
            .ok_or_else(|| anyhow::anyhow!("planned vessel {:?} missing", plan.vessel))?;
        if game.select_vessel(bow) != Some(plan.vessel) {
            return Err(anyhow::anyhow!("could not select {:?} at {}", plan.vessel, bow));
        }
        let maneuvered = match plan.action {
            Action::Maneuver(Maneuver::Move(m)) => game.move_selected(m),
            Action::Maneuver(Maneuver::Turn(r)) => game.rotate_selected(r),
            Action::Broadside | Action::Hold => true,
        };
        if !maneuvered {
            warn!("{} planned {:?} for {:?} but it was rejected", side, plan.action, plan.vessel);
        }
        game.confirm_maneuver();
        if plan.action == Action::Broadside {
            let hits = game.fire_broadside().unwrap_or_default();
            info!("{} broadside from {:?}: {} hit(s)", side, plan.vessel, hits.len());
        } else {
            info!("{} {:?} with {:?}", side, plan.action, plan.vessel);
        }
        // A decisive broadside leaves the match in game over.
        if matches!(game.phase(), Phase::Fire(_)) {
            game.end_phase();
        }
        Ok(())
    }

    fn observe(&mut self, game: &Match, events: &[GameEvent]) {
        if self.verbose && !events.is_empty() {
            let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
            println!("[{}]", names.join(", "));
            print_match(game);
        }
    }

    fn announce(&mut self, line: &str) {
        if self.verbose {
            println!("⚓ {}", line);
        }
    }
}
