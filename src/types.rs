use serde::{Deserialize, Serialize};

use crate::board::{GRID_SIDE, PLAYABLE_CELLS};
use crate::error::{BoardError, Result};

/// A grid coordinate. Both components are in `0..10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub column: u8,
    pub row: u8,
}

impl GridPosition {
    /// Checked constructor for positions coming from outside the crate.
    pub fn new(column: i64, row: i64) -> Result<Self> {
        let side = GRID_SIDE as i64;
        if !(0..side).contains(&column) || !(0..side).contains(&row) {
            return Err(BoardError::PositionOutOfRange { column, row });
        }
        Ok(Self {
            column: column as u8,
            row: row as u8,
        })
    }

    /// Offset of this position in column-outer traversal order (0..100).
    pub fn traversal_offset(self) -> usize {
        self.column as usize * GRID_SIDE + self.row as usize
    }
}

/// Index of a playable cell, always in `0..50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CellIndex(u8);

impl CellIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < PLAYABLE_CELLS {
            Ok(Self(index as u8))
        } else {
            Err(BoardError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
            })
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Human-facing 1-based number shown on the cell.
    pub fn label(self) -> u8 {
        self.0 + 1
    }

    /// All indices in ascending order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..PLAYABLE_CELLS as u8).map(CellIndex)
    }

    pub(crate) fn from_raw(index: u8) -> Self {
        debug_assert!((index as usize) < PLAYABLE_CELLS);
        Self(index)
    }
}

/// Conversion used by every index-addressed accessor.
/// Contract: values outside `0..50`, negatives included, yield `IndexOutOfRange`.
pub trait IntoCellIndex {
    fn into_cell_index(self) -> Result<CellIndex>;
}

impl IntoCellIndex for CellIndex {
    fn into_cell_index(self) -> Result<CellIndex> {
        Ok(self)
    }
}

impl IntoCellIndex for usize {
    fn into_cell_index(self) -> Result<CellIndex> {
        CellIndex::new(self)
    }
}

impl IntoCellIndex for u8 {
    fn into_cell_index(self) -> Result<CellIndex> {
        CellIndex::new(self as usize)
    }
}

impl IntoCellIndex for u32 {
    fn into_cell_index(self) -> Result<CellIndex> {
        (self as i64).into_cell_index()
    }
}

impl IntoCellIndex for i32 {
    fn into_cell_index(self) -> Result<CellIndex> {
        (self as i64).into_cell_index()
    }
}

impl IntoCellIndex for i64 {
    fn into_cell_index(self) -> Result<CellIndex> {
        if (0..PLAYABLE_CELLS as i64).contains(&self) {
            Ok(CellIndex(self as u8))
        } else {
            Err(BoardError::IndexOutOfRange { index: self })
        }
    }
}

/// Chip variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Black,
    White,
}

/// Per-cell state handed to a view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellState {
    pub index: CellIndex,
    pub label: String,
    pub column: u8,
    pub row: u8,
    pub black: bool,
    pub white: bool,
    pub crown: bool,
}

/// Serializable picture of a populated board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub size: f64,
    pub generation: u64,
    /// Contract: exactly 50 entries, ordered by cell index.
    pub cells: Vec<CellState>,
}
