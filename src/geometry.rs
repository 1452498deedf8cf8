use serde::Serialize;

use crate::board::GRID_SIDE;
use crate::error::{BoardError, Result};
use crate::types::GridPosition;

const CHIP_RADIUS_RATIO: f64 = 0.04;
const LABEL_INSET: f64 = 2.0;

/// Pixel measurements derived from the outer board size.
///
/// Nothing here touches entities or indexing; a view layer can call it with
/// just a size and a grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    size: f64,
}

/// A point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Geometry {
    pub fn new(size: f64) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(BoardError::InvalidSize { size });
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Width and height of one grid square.
    pub fn cell_extent(&self) -> f64 {
        self.size / GRID_SIDE as f64
    }

    /// Top-left corner of a square.
    /// The inner traversal axis (`row`) runs along x, the outer (`column`) along y.
    pub fn cell_origin(&self, position: GridPosition) -> Point {
        let extent = self.cell_extent();
        Point {
            x: position.row as f64 * extent,
            y: position.column as f64 * extent,
        }
    }

    /// Centre of chips and crown, relative to the cell origin.
    pub fn chip_center(&self) -> Point {
        let half = self.cell_extent() / 2.0;
        Point { x: half, y: half }
    }

    /// Radius shared by both chips and the crown ring.
    pub fn chip_radius(&self) -> f64 {
        self.size * CHIP_RADIUS_RATIO
    }

    /// Baseline anchor of the index label, relative to the cell origin.
    pub fn label_anchor(&self) -> Point {
        Point {
            x: LABEL_INSET,
            y: self.cell_extent() - LABEL_INSET,
        }
    }
}
