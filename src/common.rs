//! Common types for the naval engine: cells, headings, teams, commands,
//! setup errors and the named events consumed by front-ends.

use core::fmt;
use core::ops::{Add, Sub};

/// A grid coordinate. `x` grows to the right, `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Taxicab distance between two cells.
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Cell displaced by `k` steps of `(dx, dy)`.
    pub fn offset(self, (dx, dy): (i32, i32), k: i32) -> Cell {
        Cell::new(self.x + dx * k, self.y + dy * k)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl Add<(i32, i32)> for Cell {
    type Output = Cell;

    fn add(self, delta: (i32, i32)) -> Cell {
        self.offset(delta, 1)
    }
}

impl Sub<(i32, i32)> for Cell {
    type Output = Cell;

    fn sub(self, delta: (i32, i32)) -> Cell {
        self.offset(delta, -1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Heading of a vessel, clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Unit vector the bow points along.
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Orientation::Up => (0, 1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, -1),
            Orientation::Left => (-1, 0),
        }
    }

    pub const fn degrees(self) -> u16 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 90,
            Orientation::Down => 180,
            Orientation::Left => 270,
        }
    }

    pub fn from_degrees(degrees: i32) -> Orientation {
        match degrees.rem_euclid(360) {
            90 => Orientation::Right,
            180 => Orientation::Down,
            270 => Orientation::Left,
            _ => Orientation::Up,
        }
    }

    pub fn rotated(self, direction: Rotation) -> Orientation {
        let step = match direction {
            Rotation::Clockwise => 90,
            Rotation::CounterClockwise => -90,
        };
        Orientation::from_degrees(self.degrees() as i32 + step)
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Orientation::Up | Orientation::Down)
    }
}

/// One of the two competing factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "Player 1"),
            Side::B => write!(f, "Player 2"),
        }
    }
}

/// Single-cell translation relative to the vessel's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl Movement {
    pub const ALL: [Movement; 4] = [
        Movement::Forward,
        Movement::Backward,
        Movement::StrafeLeft,
        Movement::StrafeRight,
    ];

    /// Displacement produced by this movement for a vessel facing `orientation`.
    pub const fn delta(self, orientation: Orientation) -> (i32, i32) {
        let (fx, fy) = orientation.vector();
        match (self, orientation) {
            (Movement::Forward, _) => (fx, fy),
            (Movement::Backward, _) => (-fx, -fy),
            (Movement::StrafeLeft, Orientation::Up) => (-1, 0),
            (Movement::StrafeLeft, Orientation::Right) => (0, 1),
            (Movement::StrafeLeft, Orientation::Down) => (1, 0),
            (Movement::StrafeLeft, Orientation::Left) => (0, -1),
            (Movement::StrafeRight, Orientation::Up) => (1, 0),
            (Movement::StrafeRight, Orientation::Right) => (0, -1),
            (Movement::StrafeRight, Orientation::Down) => (-1, 0),
            (Movement::StrafeRight, Orientation::Left) => (0, 1),
        }
    }
}

/// Quarter turn direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Errors returned while setting up a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Vessel length outside 2..=4.
    InvalidLength(u8),
    /// A hull cell falls outside the grid.
    OutOfBounds,
    /// The placement overlaps an alive vessel.
    Overlaps,
    /// Random placement gave up after the attempt cap.
    UnableToPlace,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidLength(len) => write!(f, "Vessel length {} is not in 2..=4", len),
            SetupError::OutOfBounds => write!(f, "Vessel placement is out of bounds"),
            SetupError::Overlaps => write!(f, "Vessel placement overlaps another vessel"),
            SetupError::UnableToPlace => write!(f, "Unable to place vessel"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SetupError {}

/// Fire-and-forget notifications for audio and log layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    Moved,
    Rotated,
    Fired,
    Hit,
    Missed,
    Destroyed,
    Victory,
    Defeat,
    Select,
    Placed,
}

impl GameEvent {
    pub const fn name(self) -> &'static str {
        match self {
            GameEvent::Moved => "moved",
            GameEvent::Rotated => "rotated",
            GameEvent::Fired => "fired",
            GameEvent::Hit => "hit",
            GameEvent::Missed => "missed",
            GameEvent::Destroyed => "destroyed",
            GameEvent::Victory => "victory",
            GameEvent::Defeat => "defeat",
            GameEvent::Select => "select",
            GameEvent::Placed => "placed",
        }
    }
}
