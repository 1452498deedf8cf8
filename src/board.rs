use once_cell::sync::Lazy;

use crate::error::Result;
use crate::types::{CellIndex, GridPosition, IntoCellIndex};

pub const GRID_SIDE: usize = 10;
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;
pub const PLAYABLE_CELLS: usize = 50;

static TABLES: Lazy<Tables> = Lazy::new(Tables::build);

/// What occupies one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Dark square carrying a cell, two chips, a crown and a label.
    Playable(CellIndex),
    /// Light square with no entities and no index.
    Filler,
}

impl Surface {
    pub fn index(self) -> Option<CellIndex> {
        match self {
            Surface::Playable(index) => Some(index),
            Surface::Filler => None,
        }
    }

    pub fn is_playable(self) -> bool {
        matches!(self, Surface::Playable(_))
    }
}

/// Dark-square predicate: `(row + column % 2) % 2 == 1`.
pub fn is_playable(position: GridPosition) -> bool {
    (position.row as usize + position.column as usize % 2) % 2 == 1
}

/// All 100 positions, column-outer and row-inner. This order defines the
/// cell numbering and must not change.
pub fn traversal() -> impl Iterator<Item = GridPosition> {
    (0..GRID_SIDE as u8)
        .flat_map(|column| (0..GRID_SIDE as u8).map(move |row| GridPosition { column, row }))
}

/// Grid position of a cell index.
pub fn position_of(index: impl IntoCellIndex) -> Result<GridPosition> {
    let index = index.into_cell_index()?;
    Ok(TABLES.positions[index.get()])
}

/// Inverse of [`position_of`]. Returns `None` for filler squares and for
/// positions off the grid.
pub fn index_at(position: GridPosition) -> Option<CellIndex> {
    if position.column as usize >= GRID_SIDE || position.row as usize >= GRID_SIDE {
        return None;
    }
    TABLES.indices[position.traversal_offset()]
}

pub fn surface_at(position: GridPosition) -> Surface {
    index_at(position).map_or(Surface::Filler, Surface::Playable)
}

/// Positions of cells 0..50 in index order.
pub fn positions() -> &'static [GridPosition; PLAYABLE_CELLS] {
    &TABLES.positions
}

struct Tables {
    positions: [GridPosition; PLAYABLE_CELLS],
    indices: [Option<CellIndex>; GRID_CELLS],
}

impl Tables {
    fn build() -> Self {
        let mut positions = [GridPosition { column: 0, row: 0 }; PLAYABLE_CELLS];
        let mut indices = [None; GRID_CELLS];
        let mut next = 0u8;

        for position in traversal() {
            if !is_playable(position) {
                continue;
            }
            positions[next as usize] = position;
            indices[position.traversal_offset()] = Some(CellIndex::from_raw(next));
            next += 1;
        }

        debug_assert_eq!(next as usize, PLAYABLE_CELLS);
        Self { positions, indices }
    }
}
