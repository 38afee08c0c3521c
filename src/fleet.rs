//! The roster of every vessel on the board and the collision rules that
//! keep alive hulls from sharing a cell.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{Cell, Movement, Orientation, Rotation, SetupError, Side};
use crate::config::{lineup_lengths, LINEUP_ROWS, PLACEMENT_ATTEMPTS};
use crate::grid::Grid;
use crate::vessel::{Pose, Vessel};

/// Stable handle to a vessel in a [`Fleet`]. Sunk vessels keep their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselId(pub usize);

/// All vessels of both sides on one grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Fleet {
    grid: Grid,
    vessels: Vec<Vessel>,
}

impl Fleet {
    /// Create an empty roster on `grid`.
    pub fn new(grid: Grid) -> Self {
        Fleet {
            grid,
            vessels: Vec::new(),
        }
    }

    /// Standard opening: each side gets the shuffled lineup on shuffled even
    /// rows, side A against the left edge facing right, side B against the
    /// right edge facing left.
    pub fn standard<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Result<Self, SetupError> {
        let mut fleet = Fleet::new(grid);
        for side in [Side::A, Side::B] {
            let mut lengths = lineup_lengths();
            lengths.shuffle(rng);
            let mut rows = LINEUP_ROWS;
            rows.shuffle(rng);
            for (i, &length) in lengths.iter().enumerate() {
                let y = rows[i % rows.len()];
                let (bow, orientation) = match side {
                    Side::A => (Cell::new(length as i32 - 1, y), Orientation::Right),
                    Side::B => (Cell::new(grid.columns() - length as i32, y), Orientation::Left),
                };
                fleet.place(Vessel::new(side, length, bow, orientation)?)?;
            }
        }
        debug!("standard lineup placed: {} vessels", fleet.len());
        Ok(fleet)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    pub fn get(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(id.0)
    }

    pub fn get_mut(&mut self, id: VesselId) -> Option<&mut Vessel> {
        self.vessels.get_mut(id.0)
    }

    /// Every vessel with its id, sunk ones included.
    pub fn iter(&self) -> impl Iterator<Item = (VesselId, &Vessel)> {
        self.vessels.iter().enumerate().map(|(i, v)| (VesselId(i), v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (VesselId, &mut Vessel)> {
        self.vessels.iter_mut().enumerate().map(|(i, v)| (VesselId(i), v))
    }

    /// Alive vessels belonging to `side`.
    pub fn alive(&self, side: Side) -> impl Iterator<Item = (VesselId, &Vessel)> {
        self.iter().filter(move |(_, v)| v.side() == side && v.is_alive())
    }

    pub fn alive_count(&self, side: Side) -> usize {
        self.alive(side).count()
    }

    /// Alive vessel covering `cell`, if any.
    pub fn vessel_at(&self, cell: Cell) -> Option<VesselId> {
        self.iter()
            .find(|(_, v)| v.is_alive() && v.occupies(cell))
            .map(|(id, _)| id)
    }

    /// Add a vessel to the roster after checking bounds and overlap.
    pub fn place(&mut self, vessel: Vessel) -> Result<VesselId, SetupError> {
        let cells = vessel.occupied_cells();
        if !cells.iter().all(|&c| self.grid.is_valid(c)) {
            return Err(SetupError::OutOfBounds);
        }
        if self.collides(None, &cells) {
            return Err(SetupError::Overlaps);
        }
        let id = VesselId(self.vessels.len());
        trace!("placed {:?} as {:?}", vessel, id);
        self.vessels.push(vessel);
        Ok(id)
    }

    /// Random legal pose for a vessel of `length` in `side`'s half of the board.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        side: Side,
        length: u8,
    ) -> Result<Pose, SetupError> {
        let columns = self.grid.columns();
        let half = columns / 2;
        let (min_x, max_x) = match side {
            Side::A => (0, half - 2),
            Side::B => (half + 2, columns - 1),
        };
        if min_x > max_x {
            return Err(SetupError::UnableToPlace);
        }
        let probe = Vessel::new(side, length, Cell::new(0, 0), Orientation::Up)?;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
            let bow = Cell::new(
                rng.random_range(min_x..=max_x),
                rng.random_range(0..self.grid.rows()),
            );
            let pose = Pose::new(bow, orientation);
            let cells = probe.would_occupy(pose);
            let in_half = cells.iter().all(|c| (min_x..=max_x).contains(&c.x));
            if in_half && self.can_place(&cells) {
                return Ok(pose);
            }
        }
        Err(SetupError::UnableToPlace)
    }

    /// `true` iff every cell is on the grid and clear of all alive vessels.
    pub fn can_place(&self, cells: &[Cell]) -> bool {
        cells.iter().all(|&c| self.grid.is_valid(c)) && !self.collides(None, cells)
    }

    /// `true` iff `id` could stand on `cells`: all on the grid and none
    /// covered by another alive vessel.
    pub fn can_occupy(&self, id: VesselId, cells: &[Cell]) -> bool {
        cells.iter().all(|&c| self.grid.is_valid(c)) && !self.collides(Some(id), cells)
    }

    /// `true` iff `id` could legally stand at `pose`.
    pub fn can_take_pose(&self, id: VesselId, pose: Pose) -> bool {
        match self.get(id) {
            Some(v) => self.can_occupy(id, &v.would_occupy(pose)),
            None => false,
        }
    }

    fn collides(&self, ignore: Option<VesselId>, cells: &[Cell]) -> bool {
        self.iter()
            .filter(|(id, v)| Some(*id) != ignore && v.is_alive())
            .any(|(_, v)| v.occupied_cells().iter().any(|c| cells.contains(c)))
    }

    /// Translate a vessel by one cell. Illegal moves leave it untouched.
    pub fn move_vessel(&mut self, id: VesselId, movement: Movement) -> bool {
        let Some(pose) = self.get(id).map(|v| v.pose().moved(movement)) else {
            return false;
        };
        self.commit_pose(id, pose)
    }

    /// Rotate a vessel a quarter turn about its bow. Illegal turns leave it untouched.
    pub fn rotate_vessel(&mut self, id: VesselId, rotation: Rotation) -> bool {
        let Some(pose) = self.get(id).map(|v| v.pose().rotated(rotation)) else {
            return false;
        };
        self.commit_pose(id, pose)
    }

    /// Nudge a vessel by an absolute screen offset, keeping its heading.
    pub fn move_absolute(&mut self, id: VesselId, dx: i32, dy: i32) -> bool {
        let Some(pose) = self
            .get(id)
            .map(|v| Pose::new(v.bow() + (dx, dy), v.orientation()))
        else {
            return false;
        };
        self.commit_pose(id, pose)
    }

    fn commit_pose(&mut self, id: VesselId, pose: Pose) -> bool {
        match self.get(id) {
            Some(v) if v.is_alive() => {}
            _ => return false,
        }
        if !self.can_take_pose(id, pose) {
            trace!("{:?} rejected pose {:?}", id, pose);
            return false;
        }
        if let Some(v) = self.get_mut(id) {
            v.set_pose(pose);
        }
        true
    }

    /// Clear per-turn flags on every vessel of `side`.
    pub fn reset_turn(&mut self, side: Side) {
        for (_, v) in self.iter_mut().filter(|(_, v)| v.side() == side) {
            v.reset_turn();
        }
    }

    /// Drop the selection mark from every vessel.
    pub fn clear_selection(&mut self) {
        for (_, v) in self.iter_mut() {
            v.is_selected = false;
        }
    }
}

impl fmt::Debug for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fleet")
            .field("grid", &self.grid)
            .field("vessels", &self.vessels)
            .finish()
    }
}
