use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod types;
pub mod wasm;

pub use board::{GRID_SIDE, PLAYABLE_CELLS, Surface};
pub use error::{BoardError, LayoutError, Result};
pub use geometry::{Geometry, Point};
pub use model::{BoardConfig, BoardModel, Cell, Chip, Crown, EntityId, Label, Placement};
pub use types::{BoardSnapshot, CellIndex, CellState, ChipColor, GridPosition, IntoCellIndex};
pub use wasm::WasmBoard;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
