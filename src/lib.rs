pub mod grid;
pub mod loaders;
pub mod raycast;
pub mod types;

pub use grid::{Grid, Grid2d, Occupancy};
pub use loaders::tile_map::{TileMap, load_tile_map, parse_layout};
pub use raycast::{CastResult, Ray, Raycaster};
pub use types::{Bounds, MapInfo, RaycastError};
