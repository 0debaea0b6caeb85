pub mod tile_map;
