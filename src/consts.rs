use crate::snake::{Cell, Direction};

/// Grid width in cells.
pub const GRID_WIDTH: i16 = 25;
/// Grid height in cells, header and footer rows included.
pub const GRID_HEIGHT: i16 = 25;

/// Rows 0..HEADER_ROWS hold the score bar.
pub const HEADER_ROWS: i16 = 2;
/// Rows FOOTER_TOP..GRID_HEIGHT hold the key help.
pub const FOOTER_TOP: i16 = 23;

pub const MIN_X: i16 = 0;
pub const MAX_X: i16 = GRID_WIDTH - 1;
pub const MIN_Y: i16 = HEADER_ROWS;
pub const MAX_Y: i16 = FOOTER_TOP - 1;

// Half-open ranges. The last column is never picked.
pub const APPLE_X_RANGE: std::ops::Range<i16> = 0..23;
pub const APPLE_Y_RANGE: std::ops::Range<i16> = 2..23;

pub const START_BODY: [Cell; 3] = [Cell::new(0, 2), Cell::new(0, 3), Cell::new(0, 4)];
pub const START_DIRECTION: Direction = Direction::Right;

pub const TICK_INTERVAL_MS: u64 = 100;
