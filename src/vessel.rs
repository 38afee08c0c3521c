//! Vessel definitions: pose, hull projection and damage.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Cell, Movement, Orientation, Rotation, SetupError, Side};
use crate::config::{MAX_VESSEL_LENGTH, MIN_VESSEL_LENGTH};

/// Bow position and heading, actual or hypothetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub bow: Cell,
    pub orientation: Orientation,
}

impl Pose {
    pub const fn new(bow: Cell, orientation: Orientation) -> Self {
        Self { bow, orientation }
    }

    /// Pose after a single-cell translation.
    pub fn moved(self, movement: Movement) -> Pose {
        Pose::new(self.bow + movement.delta(self.orientation), self.orientation)
    }

    /// Pose after a quarter turn about the bow.
    pub fn rotated(self, rotation: Rotation) -> Pose {
        Pose::new(self.bow, self.orientation.rotated(rotation))
    }

    /// Hull cells of a vessel of `length` at this pose, bow first.
    pub fn hull(self, length: u8) -> Vec<Cell> {
        let dir = self.orientation.vector();
        (0..length as i32).map(|i| self.bow.offset(dir, -i)).collect()
    }
}

/// A warship. Its occupied cells are derived from the pose, never stored.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Vessel {
    pose: Pose,
    length: u8,
    side: Side,
    weapons_per_flank: u8,
    max_weapons_per_flank: u8,
    pub has_moved: bool,
    pub has_fired: bool,
    pub is_selected: bool,
}

impl Vessel {
    /// Build a fresh vessel. Each flank starts with `length - 1` guns.
    pub fn new(side: Side, length: u8, bow: Cell, orientation: Orientation) -> Result<Self, SetupError> {
        if !(MIN_VESSEL_LENGTH..=MAX_VESSEL_LENGTH).contains(&length) {
            return Err(SetupError::InvalidLength(length));
        }
        Ok(Vessel {
            pose: Pose::new(bow, orientation),
            length,
            side,
            weapons_per_flank: length - 1,
            max_weapons_per_flank: length - 1,
            has_moved: false,
            has_fired: false,
            is_selected: false,
        })
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn bow(&self) -> Cell {
        self.pose.bow
    }

    pub fn orientation(&self) -> Orientation {
        self.pose.orientation
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn weapons_per_flank(&self) -> u8 {
        self.weapons_per_flank
    }

    pub fn max_weapons_per_flank(&self) -> u8 {
        self.max_weapons_per_flank
    }

    /// Guns on both flanks combined.
    pub fn total_weapons(&self) -> u8 {
        self.weapons_per_flank * 2
    }

    pub fn is_alive(&self) -> bool {
        self.weapons_per_flank > 0
    }

    /// Cells covered by the hull, bow first.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        self.pose.hull(self.length)
    }

    /// Cells the hull would cover at `pose`.
    pub fn would_occupy(&self, pose: Pose) -> Vec<Cell> {
        pose.hull(self.length)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupied_cells().contains(&cell)
    }

    /// Copy of this vessel standing at `pose`. Used to evaluate hypothetical
    /// placements without touching the live roster.
    pub fn at_pose(&self, pose: Pose) -> Vessel {
        Vessel { pose, ..*self }
    }

    /// Overwrite the pose. Callers check legality first.
    pub(crate) fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Knock out one gun per flank. Returns `true` if the vessel is now sunk.
    pub fn take_damage(&mut self) -> bool {
        self.take_damage_by(1)
    }

    /// Knock out `amount` guns per flank. Sinking is irreversible.
    pub fn take_damage_by(&mut self, amount: u8) -> bool {
        self.weapons_per_flank = self.weapons_per_flank.saturating_sub(amount);
        self.weapons_per_flank == 0
    }

    /// Body segments that still carry a gun on each flank: `1..=min(weapons, length - 1)`.
    pub fn armed_segments(&self) -> core::ops::RangeInclusive<usize> {
        let armed = self.weapons_per_flank.min(self.length - 1) as usize;
        1..=armed
    }

    /// Clear the per-turn flags.
    pub fn reset_turn(&mut self) {
        self.has_moved = false;
        self.has_fired = false;
        self.is_selected = false;
    }
}

impl fmt::Debug for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vessel {{ side: {:?}, length: {}, bow: {}, orientation: {:?}, weapons: {}/{} }}",
            self.side,
            self.length,
            self.pose.bow,
            self.pose.orientation,
            self.weapons_per_flank,
            self.max_weapons_per_flank,
        )
    }
}
