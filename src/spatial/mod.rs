//! Grid geometry - row-major coordinates and 4-neighbor adjacency

use serde::{Deserialize, Serialize};

/// Column/row position of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: usize,
    pub y: usize,
}

/// Dimensions of a grid, with linear coordinate `x + y * width`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    width: usize,
    height: usize,
}

impl GridShape {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }

    /// Convert tile position to linear coordinate
    pub fn pos_to_coord(&self, pos: TilePos) -> Option<usize> {
        if pos.x < self.width && pos.y < self.height {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// Convert linear coordinate to position
    pub fn coord_to_pos(&self, coord: usize) -> Option<TilePos> {
        if coord < self.tile_count() {
            Some(TilePos {
                x: coord % self.width,
                y: coord / self.width,
            })
        } else {
            None
        }
    }

    /// In-bounds 4-neighbors of `coord`, ordered up, down, left, right
    pub fn neighbors(&self, coord: usize) -> Vec<usize> {
        let mut neighbors = Vec::with_capacity(4);
        let column = coord % self.width;

        // Up
        if coord >= self.width {
            neighbors.push(coord - self.width);
        }
        // Down
        if coord + self.width < self.tile_count() {
            neighbors.push(coord + self.width);
        }
        // Left
        if column != 0 {
            neighbors.push(coord - 1);
        }
        // Right
        if column != self.width - 1 {
            neighbors.push(coord + 1);
        }

        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let shape = GridShape::new(10, 5);

        assert_eq!(shape.width(), 10);
        assert_eq!(shape.height(), 5);
        assert_eq!(shape.tile_count(), 50);
    }

    #[test]
    fn test_pos_coord_conversion() {
        let shape = GridShape::new(10, 5);

        let pos = TilePos { x: 3, y: 2 };
        let coord = shape.pos_to_coord(pos).unwrap();
        assert_eq!(coord, 23);

        assert_eq!(shape.coord_to_pos(coord), Some(pos));
        assert_eq!(shape.coord_to_pos(50), None);
        assert_eq!(shape.pos_to_coord(TilePos { x: 10, y: 0 }), None);
    }

    #[test]
    fn test_neighbors() {
        let shape = GridShape::new(4, 3);

        // Top-left corner: down, right
        assert_eq!(shape.neighbors(0), vec![4, 1]);
        // Top-right corner: down, left
        assert_eq!(shape.neighbors(3), vec![7, 2]);
        // Middle: up, down, left, right
        assert_eq!(shape.neighbors(5), vec![1, 9, 4, 6]);
        // Bottom edge
        assert_eq!(shape.neighbors(10), vec![6, 9, 11]);
    }

    #[test]
    fn test_degenerate_shapes() {
        assert!(GridShape::new(1, 1).neighbors(0).is_empty());
        assert_eq!(GridShape::new(2, 1).neighbors(0), vec![1]);
        assert_eq!(GridShape::new(1, 3).neighbors(1), vec![0, 2]);
    }
}
