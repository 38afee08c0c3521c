pub const GRID_COLUMNS: i32 = 20;
pub const GRID_ROWS: i32 = 15;

pub const MIN_VESSEL_LENGTH: u8 = 2;
pub const MAX_VESSEL_LENGTH: u8 = 4;

/// Vessel lengths and how many of each every side fields.
pub const LINEUP: [(u8, usize); 3] = [(2, 2), (3, 3), (4, 2)];

/// Number of vessels per side in the standard lineup.
pub const VESSELS_PER_SIDE: usize = 2 + 3 + 2;

/// Rows the standard lineup draws from, spaced so parallel hulls never touch.
pub const LINEUP_ROWS: [i32; 7] = [0, 2, 4, 6, 8, 10, 12];

/// Attempts made by random placement before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Score per opposing cell the candidate pose could hit.
pub const SCORE_PER_TARGET_CELL: i32 = 10;
/// Score per own cell left inside an opposing fire zone.
pub const SCORE_PER_EXPOSED_CELL: i32 = -5;
/// Closing bonus is `max(0, CLOSING_RANGE - distance)` per opposing vessel.
pub const CLOSING_RANGE: i32 = 10;

/// Expand the lineup into one length per vessel.
pub fn lineup_lengths() -> [u8; VESSELS_PER_SIDE] {
    let mut lengths = [0u8; VESSELS_PER_SIDE];
    let mut i = 0;
    for &(length, count) in LINEUP.iter() {
        for _ in 0..count {
            lengths[i] = length;
            i += 1;
        }
    }
    lengths
}
