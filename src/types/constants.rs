/// Fraction of a cell used to nudge a grid-line sample into the cell being entered.
pub const EPSILON_RATIO: f32 = 0.1;

/// Direction components at or below this magnitude are treated as exactly zero.
pub const DIRECTION_EPSILON: f32 = 1e-6;

pub const EMPTY: u8 = 0;
pub const SOLID: u8 = 1;

pub const LAYOUT_SOLID: char = '#';
pub const LAYOUT_EMPTY: char = '.';

pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
