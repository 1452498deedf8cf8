use serde::Deserialize;
use tracing::{debug, trace};

use crate::board::{self, PLAYABLE_CELLS, Surface};
use crate::error::{BoardError, Result};
use crate::geometry::Geometry;
use crate::types::{BoardSnapshot, CellIndex, CellState, ChipColor, GridPosition, IntoCellIndex};

pub const DEFAULT_SIZE: f64 = 500.0;

/// Construction parameters, deserializable from a host-provided config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub size: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

/// Identity of an entity: the reset that created it and the cell it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    pub generation: u64,
    pub index: CellIndex,
}

/// Static 1-based number drawn on a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The paintable surface of a playable square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: EntityId,
    position: GridPosition,
    label: Label,
}

impl Cell {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn index(&self) -> CellIndex {
        self.id.index
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

/// Visual handle of a piece that may sit on a cell. Which piece actually
/// occupies the cell is up to the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    id: EntityId,
    color: ChipColor,
    visible: bool,
}

impl Chip {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn color(&self) -> ChipColor {
        self.color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// King marker. Not tied to chip visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crown {
    id: EntityId,
    visible: bool,
}

impl Crown {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// One of the 100 grid squares together with what was placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: GridPosition,
    pub surface: Surface,
}

#[derive(Debug, Clone)]
struct Entities {
    cells: Vec<Cell>,
    black_chips: Vec<Chip>,
    white_chips: Vec<Chip>,
    crowns: Vec<Crown>,
    placements: Vec<Placement>,
}

impl Entities {
    fn build(generation: u64) -> Self {
        let mut cells = Vec::with_capacity(PLAYABLE_CELLS);
        let mut black_chips = Vec::with_capacity(PLAYABLE_CELLS);
        let mut white_chips = Vec::with_capacity(PLAYABLE_CELLS);
        let mut crowns = Vec::with_capacity(PLAYABLE_CELLS);
        let mut placements = Vec::with_capacity(board::GRID_CELLS);
        let mut next = 0u8;

        for position in board::traversal() {
            let surface = if board::is_playable(position) {
                let id = EntityId {
                    generation,
                    index: CellIndex::from_raw(next),
                };
                cells.push(Cell {
                    id,
                    position,
                    label: Label {
                        text: id.index.label().to_string(),
                    },
                });
                black_chips.push(Chip {
                    id,
                    color: ChipColor::Black,
                    visible: false,
                });
                white_chips.push(Chip {
                    id,
                    color: ChipColor::White,
                    visible: false,
                });
                crowns.push(Crown { id, visible: false });
                next += 1;
                Surface::Playable(id.index)
            } else {
                Surface::Filler
            };
            placements.push(Placement { position, surface });
        }

        debug_assert_eq!(cells.len(), PLAYABLE_CELLS);
        Self {
            cells,
            black_chips,
            white_chips,
            crowns,
            placements,
        }
    }
}

/// Owner of the 50 indexed cells and their chips, crowns and labels.
#[derive(Debug, Clone)]
pub struct BoardModel {
    geometry: Geometry,
    generation: u64,
    entities: Option<Entities>,
}

impl BoardModel {
    /// Builds a fully populated board.
    pub fn new(size: f64) -> Result<Self> {
        let mut model = Self::unpopulated(size)?;
        model.reset();
        Ok(model)
    }

    pub fn from_config(config: BoardConfig) -> Result<Self> {
        Self::new(config.size)
    }

    /// Board with no entities yet. Every accessor fails with
    /// `UninitializedAccess` until [`BoardModel::reset`] runs.
    pub fn unpopulated(size: f64) -> Result<Self> {
        let geometry = Geometry::new(size)?;
        trace!(size, "board created without entities");
        Ok(Self {
            geometry,
            generation: 0,
            entities: None,
        })
    }

    /// Discards every entity and rebuilds all 50 cells with hidden chips and
    /// crowns. The new set replaces the old one in a single assignment.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        let entities = Entities::build(generation);

        self.entities = Some(entities);
        self.generation = generation;
        debug!(generation, size = self.geometry.size(), "board reset");
    }

    pub fn size(&self) -> f64 {
        self.geometry.size()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Number of resets performed so far; 0 while unpopulated.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_populated(&self) -> bool {
        self.entities.is_some()
    }

    pub fn cell(&self, index: impl IntoCellIndex) -> Result<&Cell> {
        let index = index.into_cell_index()?;
        Ok(&self.populated()?.cells[index.get()])
    }

    pub fn black_chip(&self, index: impl IntoCellIndex) -> Result<&Chip> {
        self.chip(ChipColor::Black, index)
    }

    pub fn white_chip(&self, index: impl IntoCellIndex) -> Result<&Chip> {
        self.chip(ChipColor::White, index)
    }

    pub fn chip(&self, color: ChipColor, index: impl IntoCellIndex) -> Result<&Chip> {
        let index = index.into_cell_index()?;
        let entities = self.populated()?;
        let chips = match color {
            ChipColor::Black => &entities.black_chips,
            ChipColor::White => &entities.white_chips,
        };
        Ok(&chips[index.get()])
    }

    pub fn crown(&self, index: impl IntoCellIndex) -> Result<&Crown> {
        let index = index.into_cell_index()?;
        Ok(&self.populated()?.crowns[index.get()])
    }

    pub fn black_chip_mut(&mut self, index: impl IntoCellIndex) -> Result<&mut Chip> {
        self.chip_mut(ChipColor::Black, index)
    }

    pub fn white_chip_mut(&mut self, index: impl IntoCellIndex) -> Result<&mut Chip> {
        self.chip_mut(ChipColor::White, index)
    }

    pub fn chip_mut(&mut self, color: ChipColor, index: impl IntoCellIndex) -> Result<&mut Chip> {
        let index = index.into_cell_index()?;
        let entities = self.populated_mut()?;
        let chips = match color {
            ChipColor::Black => &mut entities.black_chips,
            ChipColor::White => &mut entities.white_chips,
        };
        Ok(&mut chips[index.get()])
    }

    pub fn crown_mut(&mut self, index: impl IntoCellIndex) -> Result<&mut Crown> {
        let index = index.into_cell_index()?;
        Ok(&mut self.populated_mut()?.crowns[index.get()])
    }

    pub fn cells(&self) -> Result<&[Cell]> {
        Ok(&self.populated()?.cells)
    }

    pub fn black_chips(&self) -> Result<&[Chip]> {
        Ok(&self.populated()?.black_chips)
    }

    pub fn white_chips(&self) -> Result<&[Chip]> {
        Ok(&self.populated()?.white_chips)
    }

    pub fn crowns(&self) -> Result<&[Crown]> {
        Ok(&self.populated()?.crowns)
    }

    /// All 100 squares in reset order, fillers included.
    pub fn placements(&self) -> Result<&[Placement]> {
        Ok(&self.populated()?.placements)
    }

    pub fn snapshot(&self) -> Result<BoardSnapshot> {
        let entities = self.populated()?;
        let cells = entities
            .cells
            .iter()
            .zip(&entities.black_chips)
            .zip(&entities.white_chips)
            .zip(&entities.crowns)
            .map(|(((cell, black), white), crown)| CellState {
                index: cell.index(),
                label: cell.label.text.clone(),
                column: cell.position.column,
                row: cell.position.row,
                black: black.visible,
                white: white.visible,
                crown: crown.visible,
            })
            .collect();

        Ok(BoardSnapshot {
            size: self.size(),
            generation: self.generation,
            cells,
        })
    }

    fn populated(&self) -> Result<&Entities> {
        self.entities.as_ref().ok_or(BoardError::UninitializedAccess)
    }

    fn populated_mut(&mut self) -> Result<&mut Entities> {
        self.entities.as_mut().ok_or(BoardError::UninitializedAccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(model: &BoardModel) -> Vec<(CellIndex, GridPosition, bool, bool, bool)> {
        (0..PLAYABLE_CELLS)
            .map(|i| {
                let cell = model.cell(i).unwrap();
                (
                    cell.index(),
                    cell.position(),
                    model.black_chip(i).unwrap().is_visible(),
                    model.white_chip(i).unwrap().is_visible(),
                    model.crown(i).unwrap().is_visible(),
                )
            })
            .collect()
    }

    #[test]
    fn new_board_has_fifty_cells_in_every_collection() {
        let model = BoardModel::new(500.0).unwrap();

        assert_eq!(model.cells().unwrap().len(), 50);
        assert_eq!(model.black_chips().unwrap().len(), 50);
        assert_eq!(model.white_chips().unwrap().len(), 50);
        assert_eq!(model.crowns().unwrap().len(), 50);
        assert_eq!(model.size(), 500.0);
        assert_eq!(model.generation(), 1);
    }

    #[test]
    fn every_index_starts_hidden_with_one_based_label() {
        let model = BoardModel::new(500.0).unwrap();

        for i in 0..PLAYABLE_CELLS {
            let cell = model.cell(i).unwrap();
            assert_eq!(cell.index().get(), i);
            assert_eq!(cell.label().text(), (i + 1).to_string());
            assert_eq!(model.black_chip(i).unwrap().color(), ChipColor::Black);
            assert_eq!(model.white_chip(i).unwrap().color(), ChipColor::White);
            assert!(!model.black_chip(i).unwrap().is_visible());
            assert!(!model.white_chip(i).unwrap().is_visible());
            assert!(!model.crown(i).unwrap().is_visible());
        }
    }

    #[test]
    fn entities_of_one_index_share_identity_and_position() {
        let model = BoardModel::new(500.0).unwrap();

        for i in 0..PLAYABLE_CELLS {
            let id = model.cell(i).unwrap().id();
            assert_eq!(model.black_chip(i).unwrap().id(), id);
            assert_eq!(model.white_chip(i).unwrap().id(), id);
            assert_eq!(model.crown(i).unwrap().id(), id);
            assert_eq!(
                model.cell(i).unwrap().position(),
                board::position_of(i).unwrap()
            );
        }
    }

    #[test]
    fn out_of_range_indices_fail_for_every_accessor() {
        let mut model = BoardModel::new(500.0).unwrap();
        let fifty = BoardError::IndexOutOfRange { index: 50 };
        let minus_one = BoardError::IndexOutOfRange { index: -1 };

        assert_eq!(model.cell(50).unwrap_err(), fifty);
        assert_eq!(model.black_chip(50).unwrap_err(), fifty);
        assert_eq!(model.white_chip(50).unwrap_err(), fifty);
        assert_eq!(model.crown(50).unwrap_err(), fifty);
        assert_eq!(model.cell(-1).unwrap_err(), minus_one);
        assert_eq!(model.black_chip(-1).unwrap_err(), minus_one);
        assert_eq!(model.white_chip(-1).unwrap_err(), minus_one);
        assert_eq!(model.crown(-1).unwrap_err(), minus_one);
        assert_eq!(model.crown_mut(50usize).unwrap_err(), fifty);
        assert_eq!(model.black_chip_mut(-1).unwrap_err(), minus_one);
    }

    #[test]
    fn reset_discards_visibility_changes() {
        let mut model = BoardModel::new(500.0).unwrap();
        model.black_chip_mut(5).unwrap().set_visible(true);
        model.crown_mut(5).unwrap().set_visible(true);
        assert!(model.black_chip(5).unwrap().is_visible());

        model.reset();

        assert!(!model.black_chip(5).unwrap().is_visible());
        assert!(!model.crown(5).unwrap().is_visible());
    }

    #[test]
    fn second_reset_yields_fresh_but_identical_structure() {
        let mut model = BoardModel::new(500.0).unwrap();
        let before_ids: Vec<EntityId> = model.cells().unwrap().iter().map(Cell::id).collect();
        let before = structure(&model);

        model.reset();
        model.reset();

        let after_ids: Vec<EntityId> = model.cells().unwrap().iter().map(Cell::id).collect();
        assert_eq!(structure(&model), before);
        assert!(before_ids.iter().zip(&after_ids).all(|(a, b)| a != b));
        assert_eq!(model.generation(), 3);
        assert_eq!(after_ids[0].generation, 3);
    }

    #[test]
    fn unpopulated_board_fails_until_reset() {
        let mut model = BoardModel::unpopulated(500.0).unwrap();

        assert!(!model.is_populated());
        assert_eq!(model.cell(0).unwrap_err(), BoardError::UninitializedAccess);
        assert_eq!(model.black_chip(0).unwrap_err(), BoardError::UninitializedAccess);
        assert_eq!(model.white_chip(0).unwrap_err(), BoardError::UninitializedAccess);
        assert_eq!(model.crown(0).unwrap_err(), BoardError::UninitializedAccess);
        assert_eq!(model.cells().unwrap_err(), BoardError::UninitializedAccess);
        assert_eq!(model.snapshot().unwrap_err(), BoardError::UninitializedAccess);

        model.reset();

        assert!(model.is_populated());
        assert_eq!(model.cell(0).unwrap().position(), GridPosition { column: 0, row: 1 });
    }

    #[test]
    fn invalid_size_is_rejected() {
        assert_eq!(
            BoardModel::new(0.0).unwrap_err(),
            BoardError::InvalidSize { size: 0.0 }
        );
    }

    #[test]
    fn placements_cover_grid_and_tag_fillers() {
        let model = BoardModel::new(500.0).unwrap();
        let placements = model.placements().unwrap();

        assert_eq!(placements.len(), 100);
        assert_eq!(placements.iter().filter(|p| p.surface.is_playable()).count(), 50);
        assert_eq!(placements[0].surface, Surface::Filler);
        assert_eq!(placements[1].surface.index().map(CellIndex::get), Some(0));
        for placement in placements {
            assert_eq!(placement.surface, board::surface_at(placement.position));
        }
    }

    #[test]
    fn snapshot_reflects_external_toggles() {
        let mut model = BoardModel::new(500.0).unwrap();
        model.white_chip_mut(27).unwrap().set_visible(true);
        model.crown_mut(27).unwrap().set_visible(true);

        let snapshot = model.snapshot().unwrap();

        assert_eq!(snapshot.cells.len(), 50);
        assert_eq!(snapshot.generation, 1);
        let cell = &snapshot.cells[27];
        assert_eq!(cell.label, "28");
        assert_eq!((cell.column, cell.row), (5, 4));
        assert!(cell.white && cell.crown && !cell.black);
        assert_eq!(snapshot.cells.iter().filter(|c| c.white).count(), 1);
    }

    #[test]
    fn config_defaults_to_five_hundred() {
        let config: BoardConfig = serde_json::from_str("{}").unwrap();
        let model = BoardModel::from_config(config).unwrap();

        assert_eq!(model.size(), DEFAULT_SIZE);

        let config: BoardConfig = serde_json::from_str(r#"{"size": 320}"#).unwrap();
        assert_eq!(BoardModel::from_config(config).unwrap().geometry().cell_extent(), 32.0);
    }

    #[test]
    fn boards_are_independent() {
        let mut a = BoardModel::new(500.0).unwrap();
        let b = BoardModel::new(300.0).unwrap();
        a.black_chip_mut(0).unwrap().set_visible(true);

        assert!(!b.black_chip(0).unwrap().is_visible());
    }
}
