//! Tilemap component for grid-based road surfaces.
//!
//! A tilemap is anchored at its center: local (0, 0) is the middle of the grid.
//! Row 0 is the bottom row, column 0 is the leftmost column.
//! An empty cell (`None`) is off-road.

use glam::Vec2;

/// A single tile in the tilemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Tile group the cell was painted with (asphalt, kerb, ...).
    pub group: char,
}

impl Tile {
    pub fn new(group: char) -> Self {
        Self { group }
    }
}

/// Tilemap component for grid lookups.
///
/// Tiles are stored in row-major order: index = row * columns + column
#[derive(Debug, Clone)]
pub struct TilemapComponent {
    /// Width of the tilemap in tiles.
    pub columns: u32,
    /// Height of the tilemap in tiles.
    pub rows: u32,
    /// Size of each tile in world units.
    pub tile_size: f32,
    tiles: Vec<Option<Tile>>,
}

impl TilemapComponent {
    /// Create a new empty tilemap.
    pub fn new(columns: u32, rows: u32, tile_size: f32) -> Self {
        let count = (columns * rows) as usize;
        Self {
            columns,
            rows,
            tile_size,
            tiles: vec![None; count],
        }
    }

    /// Build a tilemap from text rows, top row first.
    /// `.` and spaces are empty cells; any other character becomes a tile of that group.
    /// Short rows are padded with empty cells.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Self {
        let height = rows.len() as u32;
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0) as u32;

        let mut map = Self::new(width, height, tile_size);
        for (i, line) in rows.iter().enumerate() {
            let row = height - 1 - i as u32;
            for (column, ch) in line.as_ref().chars().enumerate() {
                if ch != '.' && ch != ' ' {
                    map.set(column as u32, row, Some(Tile::new(ch)));
                }
            }
        }
        map
    }

    /// Get the tile at (column, row). Out-of-range cells are empty.
    pub fn tile_at(&self, column: u32, row: u32) -> Option<&Tile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles[(row * self.columns + column) as usize].as_ref()
    }

    /// Set the tile at (column, row).
    pub fn set(&mut self, column: u32, row: u32, tile: Option<Tile>) {
        if column < self.columns && row < self.rows {
            self.tiles[(row * self.columns + column) as usize] = tile;
        }
    }

    /// Size of the whole grid in world units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.tile_size,
            self.rows as f32 * self.tile_size,
        )
    }

    /// Local-space bounds (min inclusive, max exclusive).
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = self.size() / 2.0;
        (-half, half)
    }

    /// Whether a local-space point lies on the grid.
    pub fn contains(&self, local: Vec2) -> bool {
        let (min, max) = self.bounds();
        local.x >= min.x && local.y >= min.y && local.x < max.x && local.y < max.y
    }

    /// Map a local-space point to its (column, row) cell.
    pub fn grid_cell(&self, local: Vec2) -> Option<(u32, u32)> {
        if !self.contains(local) {
            return None;
        }
        let from_corner = local + self.size() / 2.0;
        let column = ((from_corner.x / self.tile_size) as u32).min(self.columns - 1);
        let row = ((from_corner.y / self.tile_size) as u32).min(self.rows - 1);
        Some((column, row))
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}
