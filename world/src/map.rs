//! Fixed-width tile grid the simulation walks on.

use glam::Vec2;
use skirmish_core::{RandomSource, TileCode, NO_TILE};
use thiserror::Error;

/// Highest tile code produced by random generation.
const GENERATED_TILE_MAX: TileCode = 3;

/// Largest number of tiles a generated or filled map may hold.
pub const MAX_TILES: usize = 1 << 24;

/// Reasons a tile map cannot be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// A map needs at least one column.
    #[error("tile map width must be non-zero")]
    ZeroWidth,
    /// The tile count does not fill whole rows.
    #[error("{tiles} tiles cannot be laid out in rows of {width}")]
    RaggedTiles {
        /// Number of tiles supplied.
        tiles: usize,
        /// Requested row width.
        width: usize,
    },
    /// Generation was asked for a map without any tile.
    #[error("cannot generate a {width}x{height} map")]
    EmptyDimensions {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// The requested dimensions exceed [`MAX_TILES`].
    #[error("a {width}x{height} map exceeds the limit of {MAX_TILES} tiles")]
    TooLarge {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
}

fn bounded_tile_count(width: usize, height: usize) -> Result<usize, MapError> {
    width
        .checked_mul(height)
        .filter(|count| *count <= MAX_TILES)
        .ok_or(MapError::TooLarge { width, height })
}

/// Row-major grid of tile codes.
///
/// The height is derived from the tile count. [`NO_TILE`] marks a tile that
/// cannot be walked on. Maps are immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    tiles: Vec<TileCode>,
    width: usize,
}

impl TileMap {
    /// Wraps pre-computed tiles laid out in rows of `width`.
    pub fn from_tiles(tiles: Vec<TileCode>, width: usize) -> Result<Self, MapError> {
        if width == 0 {
            return Err(MapError::ZeroWidth);
        }
        if tiles.len() % width != 0 {
            return Err(MapError::RaggedTiles {
                tiles: tiles.len(),
                width,
            });
        }
        Ok(Self { tiles, width })
    }

    /// Builds a map where every tile carries `code`.
    pub fn filled(width: usize, height: usize, code: TileCode) -> Result<Self, MapError> {
        let count = bounded_tile_count(width, height)?;
        Self::from_tiles(vec![code; count], width)
    }

    /// Draws one tile code in `0..=3` per tile, row by row.
    ///
    /// Roughly a quarter of the generated tiles end up as [`NO_TILE`].
    pub fn generate(
        width: usize,
        height: usize,
        random: &mut dyn RandomSource,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyDimensions { width, height });
        }
        let count = bounded_tile_count(width, height)?;
        let mut tiles = Vec::with_capacity(count);
        for _ in 0..count {
            tiles.push(random.generate_i32(0, GENERATED_TILE_MAX));
        }
        Self::from_tiles(tiles, width)
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of tile rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.tiles.len() / self.width
    }

    /// All tile codes in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[TileCode] {
        &self.tiles
    }

    /// Tile code at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn tile_at(&self, x: usize, y: usize) -> Option<TileCode> {
        if x >= self.width {
            return None;
        }
        let index = y.checked_mul(self.width)?.checked_add(x)?;
        self.tiles.get(index).copied()
    }

    /// Reports whether the tile at `x`, `y` exists and can be walked on.
    #[must_use]
    pub fn is_walkable_tile(&self, x: usize, y: usize) -> bool {
        self.tile_at(x, y).is_some_and(|tile| tile != NO_TILE)
    }

    /// Tile containing a world-space point, or `None` outside the grid.
    ///
    /// Uses floor division, so points left of or above the origin map to
    /// negative indices and are rejected.
    #[must_use]
    pub fn tile_index_of(&self, point: Vec2, tile_length: f32) -> Option<(usize, usize)> {
        let column = (point.x / tile_length).floor();
        let row = (point.y / tile_length).floor();
        if !(column >= 0.0 && row >= 0.0) {
            return None;
        }
        if column >= self.width as f32 || row >= self.height() as f32 {
            return None;
        }
        Some((column as usize, row as usize))
    }

    /// Centre of tile `x`, `y` in world space.
    #[must_use]
    pub fn tile_center(x: usize, y: usize, tile_length: f32) -> Vec2 {
        Vec2::new(
            x as f32 * tile_length + tile_length / 2.0,
            y as f32 * tile_length + tile_length / 2.0,
        )
    }

    /// Number of tiles that can be walked on.
    #[must_use]
    pub fn walkable_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile != NO_TILE).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ChaChaRandom, ScriptedRandom};

    #[test]
    fn height_is_derived_from_tile_count() {
        let map = TileMap::from_tiles(vec![0; 12], 4).expect("valid map");
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 3);
    }

    #[test]
    fn rejects_zero_width_and_ragged_rows() {
        assert_eq!(TileMap::from_tiles(vec![0; 4], 0), Err(MapError::ZeroWidth));
        assert_eq!(
            TileMap::from_tiles(vec![0; 5], 2),
            Err(MapError::RaggedTiles { tiles: 5, width: 2 })
        );
    }

    #[test]
    fn tile_lookup_is_row_major() {
        let map = TileMap::from_tiles(vec![0, 1, 2, 3, 0, 1], 3).expect("valid map");
        assert_eq!(map.tile_at(2, 0), Some(2));
        assert_eq!(map.tile_at(0, 1), Some(3));
        assert_eq!(map.tile_at(3, 0), None);
        assert_eq!(map.tile_at(0, 2), None);
        assert!(!map.is_walkable_tile(0, 1));
        assert!(map.is_walkable_tile(1, 1));
    }

    #[test]
    fn generation_draws_one_code_per_tile_in_order() {
        let mut random = ScriptedRandom::new([0, 3, 1, 2, 3, 0]);
        let map = TileMap::generate(3, 2, &mut random).expect("valid map");
        assert_eq!(map.tiles(), &[0, 3, 1, 2, 3, 0]);
        assert_eq!(random.draws(), 6);
        assert_eq!(map.walkable_tile_count(), 4);
    }

    #[test]
    fn generation_rejects_empty_dimensions() {
        let mut random = ChaChaRandom::from_seed(3);
        assert_eq!(
            TileMap::generate(0, 5, &mut random),
            Err(MapError::EmptyDimensions {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn oversized_maps_are_rejected_before_drawing() {
        let mut random = ScriptedRandom::minimums();
        assert_eq!(
            TileMap::generate(usize::MAX, 2, &mut random),
            Err(MapError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
        assert_eq!(
            TileMap::generate(MAX_TILES, 2, &mut random),
            Err(MapError::TooLarge {
                width: MAX_TILES,
                height: 2
            })
        );
        assert_eq!(random.draws(), 0);
        assert!(matches!(
            TileMap::filled(usize::MAX, usize::MAX, 0),
            Err(MapError::TooLarge { .. })
        ));
    }

    #[test]
    fn generated_codes_stay_in_range() {
        let mut random = ChaChaRandom::from_seed(11);
        let map = TileMap::generate(40, 40, &mut random).expect("valid map");
        assert!(map.tiles().iter().all(|tile| (0..=3).contains(tile)));
        assert!(map.walkable_tile_count() < map.tiles().len());
    }

    #[test]
    fn point_lookup_uses_floor_division() {
        let map = TileMap::filled(4, 4, 0).expect("valid map");
        assert_eq!(map.tile_index_of(Vec2::new(0.0, 0.0), 32.0), Some((0, 0)));
        assert_eq!(map.tile_index_of(Vec2::new(31.9, 64.0), 32.0), Some((0, 2)));
        assert_eq!(map.tile_index_of(Vec2::new(-0.1, 5.0), 32.0), None);
        assert_eq!(map.tile_index_of(Vec2::new(128.0, 5.0), 32.0), None);
        assert_eq!(map.tile_index_of(Vec2::new(5.0, f32::NAN), 32.0), None);
    }

    #[test]
    fn tile_center_is_half_a_tile_in() {
        assert_eq!(TileMap::tile_center(2, 1, 32.0), Vec2::new(80.0, 48.0));
    }
}
