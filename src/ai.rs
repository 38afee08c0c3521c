// Decision procedure for the automated side.
// One vessel, one action per turn. Candidate maneuvers are scored on
// hypothetical poses; the live roster is only touched by `execute_plan`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::combat::{fire_broadside, side_fire_zones, targets_in_range};
use crate::common::{Movement, Rotation, Side};
use crate::config::{CLOSING_RANGE, SCORE_PER_EXPOSED_CELL, SCORE_PER_TARGET_CELL};
use crate::fleet::{Fleet, VesselId};
use crate::vessel::{Pose, Vessel};

/// The six single-step primitives a vessel can try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    Move(Movement),
    Turn(Rotation),
}

impl Maneuver {
    pub const ALL: [Maneuver; 6] = [
        Maneuver::Move(Movement::Forward),
        Maneuver::Move(Movement::Backward),
        Maneuver::Move(Movement::StrafeLeft),
        Maneuver::Move(Movement::StrafeRight),
        Maneuver::Turn(Rotation::Clockwise),
        Maneuver::Turn(Rotation::CounterClockwise),
    ];

    /// Pose reached from `pose` by this maneuver.
    pub fn apply(self, pose: Pose) -> Pose {
        match self {
            Maneuver::Move(m) => pose.moved(m),
            Maneuver::Turn(r) => pose.rotated(r),
        }
    }
}

/// What the chosen vessel will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Broadside,
    Maneuver(Maneuver),
    Hold,
}

/// The single action committed for one automated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    pub vessel: VesselId,
    pub action: Action,
}

/// Tactical value of `vessel` standing where it stands.
///
/// +10 per opposing cell it could hit, -5 per own cell inside any opposing
/// fire zone, plus a closing bonus of `max(0, 10 - distance)` per opposing
/// vessel measured bow to bow.
pub fn score_pose(vessel: &Vessel, fleet: &Fleet) -> i32 {
    let mut score: i32 = targets_in_range(vessel, fleet)
        .iter()
        .map(|t| t.hit_cells.len() as i32 * SCORE_PER_TARGET_CELL)
        .sum();

    let hull = vessel.occupied_cells();
    for (_, enemy) in fleet.alive(vessel.side().opponent()) {
        let zones = side_fire_zones(fleet.grid(), enemy);
        let exposed = hull.iter().filter(|c| zones.contains(c)).count() as i32;
        score += exposed * SCORE_PER_EXPOSED_CELL;
        score += (CLOSING_RANGE - vessel.bow().manhattan(enemy.bow())).max(0);
    }
    score
}

/// Best legal maneuver for `id`, visiting the primitives in shuffled order.
///
/// Ties keep the first one visited. Poses scoring below zero are never
/// chosen, so a vessel pinned in a bad spot may get `None`.
pub fn best_maneuver<R: Rng + ?Sized>(
    fleet: &Fleet,
    id: VesselId,
    rng: &mut R,
) -> Option<(Maneuver, i32)> {
    let vessel = fleet.get(id)?;
    let mut order = Maneuver::ALL;
    order.shuffle(rng);

    let mut best: Option<(Maneuver, i32)> = None;
    let mut best_score = -1;
    for maneuver in order {
        let pose = maneuver.apply(vessel.pose());
        if !fleet.can_take_pose(id, pose) {
            continue;
        }
        let score = score_pose(&vessel.at_pose(pose), fleet);
        if score > best_score {
            best_score = score;
            best = Some((maneuver, score));
        }
    }
    best
}

/// Choose the acting vessel and its action for `side`.
///
/// Vessels are visited in shuffled order. The first one with a target fires;
/// failing that, the first with a beneficial maneuver moves; failing that, a
/// random alive vessel takes whatever its search found, possibly nothing.
/// Returns `None` only when `side` has no alive vessels.
pub fn plan_turn<R: Rng + ?Sized>(fleet: &Fleet, side: Side, rng: &mut R) -> Option<Plan> {
    let mut candidates: Vec<VesselId> = fleet.alive(side).map(|(id, _)| id).collect();
    if candidates.is_empty() {
        return None;
    }
    candidates.shuffle(rng);

    let mut fallback_move: Option<Plan> = None;
    for &id in &candidates {
        let Some(vessel) = fleet.get(id) else { continue };
        if !targets_in_range(vessel, fleet).is_empty() {
            debug!("{:?} has targets, firing", id);
            return Some(Plan {
                vessel: id,
                action: Action::Broadside,
            });
        }
        if fallback_move.is_none() {
            if let Some((maneuver, score)) = best_maneuver(fleet, id, rng) {
                debug!("{:?} best maneuver {:?} scores {}", id, maneuver, score);
                fallback_move = Some(Plan {
                    vessel: id,
                    action: Action::Maneuver(maneuver),
                });
            }
        }
    }
    if fallback_move.is_some() {
        return fallback_move;
    }

    let &id = candidates.choose(rng)?;
    let action = best_maneuver(fleet, id, rng)
        .map(|(m, _)| Action::Maneuver(m))
        .unwrap_or(Action::Hold);
    Some(Plan { vessel: id, action })
}

/// Carry out `plan` on the roster and describe what happened.
pub fn execute_plan(fleet: &mut Fleet, plan: Plan) -> String {
    match plan.action {
        Action::Broadside => {
            let hits = fire_broadside(fleet, plan.vessel);
            if let Some(v) = fleet.get_mut(plan.vessel) {
                v.has_fired = true;
            }
            if hits.is_empty() {
                String::from("Enemy ship fired but missed!")
            } else {
                let parts: Vec<&str> = hits
                    .iter()
                    .map(|h| if h.destroyed { "destroyed a ship" } else { "hit a ship" })
                    .collect();
                format!("Enemy fired: {}!", parts.join(", "))
            }
        }
        Action::Maneuver(maneuver) => {
            let moved = match maneuver {
                Maneuver::Move(m) => fleet.move_vessel(plan.vessel, m),
                Maneuver::Turn(r) => fleet.rotate_vessel(plan.vessel, r),
            };
            if !moved {
                return String::from("Enemy ship held position");
            }
            if let Some(v) = fleet.get_mut(plan.vessel) {
                v.has_moved = true;
            }
            match maneuver {
                Maneuver::Move(_) => String::from("Enemy ship advanced"),
                Maneuver::Turn(_) => String::from("Enemy ship maneuvered"),
            }
        }
        Action::Hold => String::from("Enemy ship held position"),
    }
}
