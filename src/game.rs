//! Turn controller: which side may act, with which vessel, in which phase.

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, info};
use rand::Rng;

use crate::ai::{execute_plan, plan_turn};
use crate::combat::{self, BroadsideHit, Shot};
use crate::common::{Cell, GameEvent, Movement, Orientation, Rotation, SetupError, Side};
use crate::fleet::{Fleet, VesselId};
use crate::grid::Grid;
use crate::vessel::Vessel;

/// Who controls side B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Side B is played by the decision procedure.
    Single,
    /// Both sides are human, alternating on one machine.
    TwoPlayer,
}

/// Turn phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Title,
    Select(Side),
    Maneuver(Side),
    Fire(Side),
    AiTurn,
    GameOver { loser: Side },
}

impl Phase {
    /// Side whose vessels may be mutated in this phase.
    pub fn active_side(self) -> Option<Side> {
        match self {
            Phase::Select(s) | Phase::Maneuver(s) | Phase::Fire(s) => Some(s),
            Phase::AiTurn => Some(Side::B),
            Phase::Title | Phase::GameOver { .. } => None,
        }
    }
}

/// Current status of a match from side A's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// A match: roster plus explicit turn state.
pub struct Match {
    mode: Mode,
    phase: Phase,
    fleet: Fleet,
    selected: Option<VesselId>,
    turn: u32,
    events: Vec<GameEvent>,
    ai_log: Vec<String>,
}

impl Match {
    /// A match sitting on the title screen with an empty board.
    pub fn new() -> Self {
        Self {
            mode: Mode::Single,
            phase: Phase::Title,
            fleet: Fleet::new(Grid::default()),
            selected: None,
            turn: 0,
            events: Vec::new(),
            ai_log: Vec::new(),
        }
    }

    /// Start a match on an existing roster, side A to move.
    pub fn with_fleet(mode: Mode, fleet: Fleet) -> Self {
        let mut game = Self::new();
        game.begin(mode, fleet);
        game
    }

    /// Throw away the current match and deal a fresh standard lineup.
    pub fn restart<R: Rng + ?Sized>(&mut self, mode: Mode, rng: &mut R) -> Result<(), SetupError> {
        let fleet = Fleet::standard(Grid::default(), rng)?;
        self.begin(mode, fleet);
        Ok(())
    }

    fn begin(&mut self, mode: Mode, fleet: Fleet) {
        self.mode = mode;
        self.fleet = fleet;
        self.selected = None;
        self.turn = 1;
        self.events.clear();
        self.ai_log.clear();
        self.events.push(GameEvent::Placed);
        self.start_turn(Side::A);
        info!("new {:?} match with {} vessels", mode, self.fleet.len());
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_side(&self) -> Option<Side> {
        self.phase.active_side()
    }

    pub fn selected(&self) -> Option<VesselId> {
        self.selected
    }

    pub fn selected_vessel(&self) -> Option<&Vessel> {
        self.selected.and_then(|id| self.fleet.get(id))
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Completed handoffs plus one.
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Log lines of the most recent automated turn.
    pub fn ai_log(&self) -> &[String] {
        &self.ai_log
    }

    /// Events raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn status(&self) -> GameStatus {
        match self.phase {
            Phase::GameOver { loser: Side::B } => GameStatus::Won,
            Phase::GameOver { loser: Side::A } => GameStatus::Lost,
            _ => GameStatus::InProgress,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { loser } => Some(loser.opponent()),
            _ => None,
        }
    }

    /// Fire zones of the selected vessel, for highlighting.
    pub fn selected_fire_zones(&self) -> Vec<Cell> {
        self.selected_vessel()
            .map(|v| combat::side_fire_zones(self.fleet.grid(), v).into_iter().collect())
            .unwrap_or_default()
    }

    /// Select the active side's alive vessel covering `cell` and move on to
    /// the maneuver phase.
    pub fn select_vessel(&mut self, cell: Cell) -> Option<VesselId> {
        let Phase::Select(side) = self.phase else {
            return None;
        };
        let id = self.fleet.vessel_at(cell)?;
        let vessel = self.fleet.get(id)?;
        if vessel.side() != side || vessel.is_selected {
            return None;
        }
        self.fleet.clear_selection();
        if let Some(v) = self.fleet.get_mut(id) {
            v.is_selected = true;
        }
        self.selected = Some(id);
        self.phase = Phase::Maneuver(side);
        self.events.push(GameEvent::Select);
        debug!("{} selected {:?}", side, id);
        Some(id)
    }

    /// Move the selected vessel one cell.
    pub fn move_selected(&mut self, movement: Movement) -> bool {
        let Some(id) = self.maneuvering() else {
            return false;
        };
        if !self.fleet.move_vessel(id, movement) {
            return false;
        }
        self.mark_moved(id);
        self.events.push(GameEvent::Moved);
        true
    }

    /// Turn the selected vessel a quarter turn.
    pub fn rotate_selected(&mut self, rotation: Rotation) -> bool {
        let Some(id) = self.maneuvering() else {
            return false;
        };
        if !self.fleet.rotate_vessel(id, rotation) {
            return false;
        }
        self.mark_moved(id);
        self.events.push(GameEvent::Rotated);
        true
    }

    /// Shift the selected vessel one cell in a board direction, whatever
    /// its heading.
    pub fn nudge_selected(&mut self, direction: Orientation) -> bool {
        let Some(id) = self.maneuvering() else {
            return false;
        };
        let (dx, dy) = direction.vector();
        if !self.fleet.move_absolute(id, dx, dy) {
            return false;
        }
        self.mark_moved(id);
        self.events.push(GameEvent::Moved);
        true
    }

    fn maneuvering(&self) -> Option<VesselId> {
        match self.phase {
            Phase::Maneuver(_) => self.selected,
            _ => None,
        }
    }

    fn mark_moved(&mut self, id: VesselId) {
        if let Some(v) = self.fleet.get_mut(id) {
            v.has_moved = true;
        }
    }

    /// Lock in the maneuver and move on to the fire phase.
    pub fn confirm_maneuver(&mut self) -> bool {
        match self.phase {
            Phase::Maneuver(side) => {
                self.phase = Phase::Fire(side);
                true
            }
            _ => false,
        }
    }

    /// Drop the selection without confirming and go back to selecting.
    ///
    /// Only a vessel that has not yet moved can be put back. Once confirmed
    /// it is committed for the rest of the turn.
    pub fn deselect(&mut self) -> bool {
        let Phase::Maneuver(side) = self.phase else {
            return false;
        };
        if self.selected_vessel().is_some_and(|v| v.has_moved) {
            debug!("{} tried to deselect a vessel that already moved", side);
            return false;
        }
        self.fleet.clear_selection();
        self.selected = None;
        self.phase = Phase::Select(side);
        true
    }

    fn firing(&self) -> Option<(Side, VesselId)> {
        let Phase::Fire(side) = self.phase else {
            return None;
        };
        let id = self.selected?;
        let vessel = self.fleet.get(id)?;
        (vessel.is_alive() && !vessel.has_fired).then_some((side, id))
    }

    /// Fire both flanks of the selected vessel. Allowed once per turn.
    pub fn fire_broadside(&mut self) -> Option<Vec<BroadsideHit>> {
        let (side, id) = self.firing()?;
        let hits = combat::fire_broadside(&mut self.fleet, id);
        if let Some(v) = self.fleet.get_mut(id) {
            v.has_fired = true;
        }
        self.events.push(GameEvent::Fired);
        if hits.is_empty() {
            self.events.push(GameEvent::Missed);
        }
        for hit in &hits {
            self.events.push(if hit.destroyed {
                GameEvent::Destroyed
            } else {
                GameEvent::Hit
            });
        }
        if !hits.is_empty() {
            self.check_game_over(side);
        }
        Some(hits)
    }

    /// Fire a single aimed shot from the selected vessel. Allowed once per turn.
    pub fn fire_at(&mut self, cell: Cell) -> Option<Shot> {
        let (side, id) = self.firing()?;
        let vessel = self.fleet.get(id)?;
        if !combat::side_fire_zones(self.fleet.grid(), vessel).contains(&cell) {
            return None;
        }
        let shot = combat::fire_at(&mut self.fleet, id, cell);
        if let Some(v) = self.fleet.get_mut(id) {
            v.has_fired = true;
        }
        self.events.push(GameEvent::Fired);
        self.events.push(match shot {
            Shot { hit: None, .. } => GameEvent::Missed,
            Shot { destroyed: true, .. } => GameEvent::Destroyed,
            Shot { .. } => GameEvent::Hit,
        });
        if shot.hit.is_some() {
            self.check_game_over(side);
        }
        Some(shot)
    }

    /// Finish the current phase.
    ///
    /// In the select phase this passes the turn, in the maneuver phase it
    /// confirms, and in the fire phase it hands over to the other side.
    pub fn end_phase(&mut self) -> bool {
        match self.phase {
            Phase::Select(side) | Phase::Fire(side) => {
                self.hand_off(side);
                true
            }
            Phase::Maneuver(_) => self.confirm_maneuver(),
            Phase::Title | Phase::AiTurn | Phase::GameOver { .. } => false,
        }
    }

    fn hand_off(&mut self, from: Side) {
        self.fleet.clear_selection();
        self.selected = None;
        match (from, self.mode) {
            (Side::A, Mode::Single) => {
                self.fleet.reset_turn(Side::B);
                self.phase = Phase::AiTurn;
            }
            (side, _) => {
                self.turn += 1;
                self.start_turn(side.opponent());
            }
        }
    }

    fn start_turn(&mut self, side: Side) {
        self.fleet.reset_turn(side);
        self.phase = Phase::Select(side);
        debug!("turn {}: {} to move", self.turn, side);
    }

    /// Run the automated side's whole turn at once.
    ///
    /// Returns the log lines to reveal, or `None` outside the automated phase.
    pub fn play_ai_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<String>> {
        if self.phase != Phase::AiTurn {
            return None;
        }
        self.ai_log.clear();
        if let Some(plan) = plan_turn(&self.fleet, Side::B, rng) {
            info!("automated side plans {:?}", plan);
            let line = execute_plan(&mut self.fleet, plan);
            self.ai_log.push(line);
        }
        if !self.check_game_over(Side::B) {
            self.turn += 1;
            self.start_turn(Side::A);
        }
        Some(self.ai_log.clone())
    }

    /// End the match if a side has no alive vessels left.
    ///
    /// When both fleets are gone at once the acting side loses.
    fn check_game_over(&mut self, acting: Side) -> bool {
        let a_alive = self.fleet.alive_count(Side::A) > 0;
        let b_alive = self.fleet.alive_count(Side::B) > 0;
        let loser = match (a_alive, b_alive) {
            (true, true) => return false,
            (false, false) => acting,
            (true, false) => Side::B,
            (false, true) => Side::A,
        };
        self.fleet.clear_selection();
        self.selected = None;
        self.phase = Phase::GameOver { loser };
        self.events.push(if loser == Side::B {
            GameEvent::Victory
        } else {
            GameEvent::Defeat
        });
        info!("game over after {} turns: {} wins", self.turn, loser.opponent());
        true
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skirmish() -> Match {
        let mut fleet = Fleet::new(Grid::default());
        for (side, x, y, orientation) in [
            (Side::A, 5, 5, Orientation::Right),
            (Side::B, 2, 6, Orientation::Left),
        ] {
            let vessel = Vessel::new(side, 3, Cell::new(x, y), orientation).unwrap();
            fleet.place(vessel).unwrap();
        }
        Match::with_fleet(Mode::TwoPlayer, fleet)
    }

    #[test]
    fn test_mutual_annihilation_goes_against_the_acting_side() {
        let mut game = skirmish();
        for id in [VesselId(0), VesselId(1)] {
            game.fleet.get_mut(id).unwrap().take_damage_by(2);
        }
        assert!(game.check_game_over(Side::A));
        assert_eq!(game.phase(), Phase::GameOver { loser: Side::A });
        assert_eq!(game.winner(), Some(Side::B));
        assert_eq!(game.drain_events().last(), Some(&GameEvent::Defeat));

        let mut game = skirmish();
        for id in [VesselId(0), VesselId(1)] {
            game.fleet.get_mut(id).unwrap().take_damage_by(2);
        }
        assert!(game.check_game_over(Side::B));
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.drain_events().last(), Some(&GameEvent::Victory));
    }

    #[test]
    fn test_no_game_over_while_both_sides_float() {
        let mut game = skirmish();
        assert!(!game.check_game_over(Side::A));
        assert_eq!(game.phase(), Phase::Select(Side::A));
    }
}
