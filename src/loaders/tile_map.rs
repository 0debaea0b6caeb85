//! Tile maps described by a YAML file.
//!
//! The YAML carries the cell size and either an inline `layout` or an `image` next to it:
//!
//! ```yaml
//! cell_size: 10.0
//! layout: |
//!   #######
//!   #.....#
//!   #######
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::grid::Grid2d;
use crate::raycast::Raycaster;
use crate::types::{
    DEFAULT_OCCUPIED_THRESH, EMPTY, LAYOUT_EMPTY, LAYOUT_SOLID, MapInfo, RaycastError, SOLID,
};

/// A grid of tile values together with its world geometry.
#[derive(Debug, Clone)]
pub struct TileMap {
    pub info: MapInfo,
    pub grid: Grid2d<u8>,
}

impl TileMap {
    pub fn new(grid: Grid2d<u8>, cell_size: f32) -> Result<Self, RaycastError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RaycastError::InvalidCellSize(cell_size));
        }

        Ok(Self {
            info: MapInfo::new(grid.rows(), grid.cols(), cell_size),
            grid,
        })
    }

    /// Caster over this map where every non-zero tile blocks.
    pub fn raycaster(&self) -> Result<Raycaster<'_, Grid2d<u8>>, RaycastError> {
        Raycaster::new(&self.grid, self.info.cell_size)
    }
}

#[derive(Debug, Deserialize)]
struct TileMapMetadata {
    cell_size: f32,
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    occupied_thresh: f32,
    #[serde(default = "default_negate")]
    negate: Negate,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Negate {
    Bool(bool),
    Int(i32),
}

impl Negate {
    fn is_negated(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
        }
    }
}

fn default_negate() -> Negate {
    Negate::Bool(false)
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

pub fn load_tile_map(yaml_path: impl AsRef<Path>) -> Result<TileMap, RaycastError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let metadata: TileMapMetadata = serde_yaml::from_str(&yaml_str)?;

    let grid = match (&metadata.layout, &metadata.image) {
        (Some(layout), None) => parse_layout(layout)?,
        (None, Some(image)) => grid_from_image(
            &resolve_image_path(yaml_path, image),
            metadata.occupied_thresh,
            metadata.negate.is_negated(),
        )?,
        (Some(_), Some(_)) => {
            return Err(RaycastError::InvalidMetadata(
                "layout and image are mutually exclusive".to_string(),
            ));
        }
        (None, None) => {
            return Err(RaycastError::InvalidMetadata(
                "one of layout or image is required".to_string(),
            ));
        }
    };

    let map = TileMap::new(grid, metadata.cell_size)?;
    info!(
        path = %yaml_path.display(),
        rows = map.info.rows,
        cols = map.info.cols,
        cell_size = map.info.cell_size,
        "loaded tile map"
    );
    Ok(map)
}

/// Parse a text layout into tile values.
///
/// `#` is solid, `.` and space are empty and digits store their own value. Blank lines are
/// skipped; every other line is one row and all rows must be equally wide.
pub fn parse_layout(layout: &str) -> Result<Grid2d<u8>, RaycastError> {
    let rows = layout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, glyph)| parse_glyph(glyph, row, col))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Err(RaycastError::InvalidMetadata(
            "layout has no rows".to_string(),
        ));
    }

    Grid2d::from_rows(rows)
}

fn parse_glyph(glyph: char, row: usize, col: usize) -> Result<u8, RaycastError> {
    match glyph {
        LAYOUT_SOLID => Ok(SOLID),
        LAYOUT_EMPTY | ' ' => Ok(EMPTY),
        _ => glyph
            .to_digit(10)
            .map(|digit| digit as u8)
            .ok_or_else(|| {
                RaycastError::InvalidMetadata(format!(
                    "unexpected glyph {glyph:?} at row {row}, column {col}"
                ))
            }),
    }
}

/// Image row 0 becomes grid row 0; dark pixels are solid.
fn grid_from_image(
    image_path: &Path,
    occupied_thresh: f32,
    negate: bool,
) -> Result<Grid2d<u8>, RaycastError> {
    let rgba = image::open(image_path)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let [r, g, b, _] = rgba.get_pixel(x, y).0;
            let mut lightness = (r as f32 + g as f32 + b as f32) / (3.0 * 255.0);
            if negate {
                lightness = 1.0 - lightness;
            }
            let darkness = 1.0 - lightness;
            data.push(if darkness >= occupied_thresh { SOLID } else { EMPTY });
        }
    }

    Grid2d::new(height, width, data)
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyphs_row_major() {
        let grid = parse_layout("#.3\n. #\n").expect("layout should parse");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.data(), &[SOLID, EMPTY, 3, EMPTY, EMPTY, SOLID]);
    }

    #[test]
    fn skips_blank_lines_and_carriage_returns() {
        let grid = parse_layout("\n##\r\n\n#.\r\n").expect("layout should parse");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(1, 1), Some(&EMPTY));
    }

    #[test]
    fn rejects_unknown_glyph() {
        let err = parse_layout("#x#").unwrap_err();
        assert!(matches!(err, RaycastError::InvalidMetadata(msg) if msg.contains("'x'")));
    }

    #[test]
    fn rejects_ragged_layout() {
        let err = parse_layout("###\n##").unwrap_err();
        assert!(matches!(err, RaycastError::InvalidMetadata(_)));
    }

    #[test]
    fn rejects_empty_layout() {
        assert!(matches!(
            parse_layout("\n\n"),
            Err(RaycastError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn tile_map_validates_cell_size() {
        let grid = parse_layout("#").expect("layout should parse");
        assert!(matches!(
            TileMap::new(grid, 0.0),
            Err(RaycastError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn relative_image_resolves_next_to_yaml() {
        let resolved = resolve_image_path(Path::new("maps/room.yaml"), "room.pgm");
        assert_eq!(resolved, PathBuf::from("maps/room.pgm"));
    }
}
