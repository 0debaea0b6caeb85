pub mod grid2d;
pub mod traits;

pub use grid2d::Grid2d;
pub use traits::{Grid, Occupancy};
