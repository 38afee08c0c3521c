//! Broadside targeting and damage resolution.
//!
//! Guns sit on the body segments of a hull, one per flank per segment,
//! starting behind the bow. They reach exactly one cell sideways; nothing
//! fires along the bow/stern line.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use log::debug;

use crate::common::Cell;
use crate::fleet::{Fleet, VesselId};
use crate::grid::Grid;
use crate::vessel::Vessel;

/// An opposing vessel inside a fire zone and the hull cells exposed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub vessel: VesselId,
    pub hit_cells: Vec<Cell>,
}

/// Outcome of a single aimed shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub hit: Option<VesselId>,
    pub destroyed: bool,
}

impl Shot {
    const MISS: Shot = Shot {
        hit: None,
        destroyed: false,
    };
}

/// One vessel struck by a broadside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadsideHit {
    pub vessel: VesselId,
    pub destroyed: bool,
}

/// Cells `vessel` can fire into.
pub fn side_fire_zones(grid: &Grid, vessel: &Vessel) -> BTreeSet<Cell> {
    let offsets: [(i32, i32); 2] = if vessel.orientation().is_vertical() {
        [(-1, 0), (1, 0)]
    } else {
        [(0, -1), (0, 1)]
    };
    let hull = vessel.occupied_cells();
    vessel
        .armed_segments()
        .filter_map(|i| hull.get(i).copied())
        .flat_map(|segment| offsets.map(|o| segment + o))
        .filter(|&cell| grid.is_valid(cell))
        .collect()
}

/// Alive opposing vessels whose hulls intersect `attacker`'s fire zones.
pub fn targets_in_range(attacker: &Vessel, fleet: &Fleet) -> Vec<Target> {
    let zones = side_fire_zones(fleet.grid(), attacker);
    if zones.is_empty() {
        return Vec::new();
    }
    fleet
        .iter()
        .filter(|(_, v)| v.side() != attacker.side() && v.is_alive())
        .filter_map(|(id, v)| {
            let hit_cells: Vec<Cell> = v
                .occupied_cells()
                .into_iter()
                .filter(|c| zones.contains(c))
                .collect();
            (!hit_cells.is_empty()).then_some(Target {
                vessel: id,
                hit_cells,
            })
        })
        .collect()
}

/// Fire one shot from `attacker` at `cell`.
///
/// Cells outside the attacker's zones, or held by no opposing alive vessel,
/// are misses.
pub fn fire_at(fleet: &mut Fleet, attacker: VesselId, cell: Cell) -> Shot {
    let Some(shooter) = fleet.get(attacker).copied() else {
        return Shot::MISS;
    };
    if !side_fire_zones(fleet.grid(), &shooter).contains(&cell) {
        return Shot::MISS;
    }
    let victim = fleet
        .iter()
        .find(|(_, v)| v.side() != shooter.side() && v.is_alive() && v.occupies(cell))
        .map(|(id, _)| id);
    match victim.and_then(|id| fleet.get_mut(id).map(|v| (id, v))) {
        Some((id, v)) => {
            let destroyed = v.take_damage();
            debug!("{:?} shot {} hit {:?} (destroyed: {})", attacker, cell, id, destroyed);
            Shot {
                hit: Some(id),
                destroyed,
            }
        }
        None => Shot::MISS,
    }
}

/// Fire both flanks of `attacker`. Every opposing vessel in range takes
/// exactly one point of damage, however many of its cells are exposed.
pub fn fire_broadside(fleet: &mut Fleet, attacker: VesselId) -> Vec<BroadsideHit> {
    let Some(shooter) = fleet.get(attacker).copied() else {
        return Vec::new();
    };
    if shooter.weapons_per_flank() == 0 {
        return Vec::new();
    }
    let targets = targets_in_range(&shooter, fleet);
    let mut hits = Vec::with_capacity(targets.len());
    for target in targets {
        if let Some(v) = fleet.get_mut(target.vessel) {
            let destroyed = v.take_damage();
            hits.push(BroadsideHit {
                vessel: target.vessel,
                destroyed,
            });
        }
    }
    debug!("{:?} broadside: {} hit(s)", attacker, hits.len());
    hits
}
