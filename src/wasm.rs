use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::board;
use crate::geometry::Point;
use crate::layout;
use crate::model::BoardModel;
use crate::types::{ChipColor, GridPosition};

/// Board handle owned by the JavaScript view layer.
#[wasm_bindgen]
pub struct WasmBoard {
    model: BoardModel,
}

#[wasm_bindgen]
impl WasmBoard {
    #[wasm_bindgen(constructor)]
    pub fn new(size: f64) -> Result<WasmBoard, JsError> {
        Ok(Self {
            model: BoardModel::new(size)?,
        })
    }

    pub fn reset(&mut self) {
        self.model.reset();
    }

    pub fn size(&self) -> f64 {
        self.model.size()
    }

    pub fn generation(&self) -> f64 {
        self.model.generation() as f64
    }

    #[wasm_bindgen(js_name = cellCount)]
    pub fn cell_count(&self) -> Result<usize, JsError> {
        Ok(self.model.cells()?.len())
    }

    pub fn label(&self, index: i32) -> Result<String, JsError> {
        Ok(self.model.cell(index)?.label().text().to_string())
    }

    /// `{ column, row }` of a cell.
    pub fn position(&self, index: i32) -> Result<JsValue, JsError> {
        let position = self.model.cell(index)?.position();
        Ok(serde_wasm_bindgen::to_value(&position)?)
    }

    /// Cell index under a grid square, or `undefined` for a light square.
    #[wasm_bindgen(js_name = indexAt)]
    pub fn index_at(&self, column: i32, row: i32) -> Result<Option<u8>, JsError> {
        let position = GridPosition::new(column.into(), row.into())?;
        Ok(board::index_at(position).map(|index| index.get() as u8))
    }

    #[wasm_bindgen(js_name = isBlackVisible)]
    pub fn is_black_visible(&self, index: i32) -> Result<bool, JsError> {
        Ok(self.model.black_chip(index)?.is_visible())
    }

    #[wasm_bindgen(js_name = setBlackVisible)]
    pub fn set_black_visible(&mut self, index: i32, visible: bool) -> Result<(), JsError> {
        self.set_chip_visible(ChipColor::Black, index, visible)
    }

    #[wasm_bindgen(js_name = isWhiteVisible)]
    pub fn is_white_visible(&self, index: i32) -> Result<bool, JsError> {
        Ok(self.model.white_chip(index)?.is_visible())
    }

    #[wasm_bindgen(js_name = setWhiteVisible)]
    pub fn set_white_visible(&mut self, index: i32, visible: bool) -> Result<(), JsError> {
        self.set_chip_visible(ChipColor::White, index, visible)
    }

    #[wasm_bindgen(js_name = isCrownVisible)]
    pub fn is_crown_visible(&self, index: i32) -> Result<bool, JsError> {
        Ok(self.model.crown(index)?.is_visible())
    }

    #[wasm_bindgen(js_name = setCrownVisible)]
    pub fn set_crown_visible(&mut self, index: i32, visible: bool) -> Result<(), JsError> {
        self.model.crown_mut(index)?.set_visible(visible);
        Ok(())
    }

    /// Whole-board state for rendering.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        let snapshot = self.model.snapshot()?;
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }

    /// Pixel measurements for the current size.
    pub fn geometry(&self) -> Result<JsValue, JsError> {
        let geometry = self.model.geometry();
        let value = serde_wasm_bindgen::to_value(&GeometryView {
            cell_extent: geometry.cell_extent(),
            chip_radius: geometry.chip_radius(),
            chip_center: geometry.chip_center(),
            label_anchor: geometry.label_anchor(),
        })?;
        Ok(value)
    }

    #[wasm_bindgen(js_name = layoutChecksum)]
    pub fn layout_checksum() -> u32 {
        layout::checksum()
    }

    #[wasm_bindgen(js_name = layoutDescriptor)]
    pub fn layout_descriptor() -> Vec<u8> {
        layout::encode()
    }

    #[wasm_bindgen(js_name = verifyLayout)]
    pub fn verify_layout(descriptor: &[u8]) -> Result<(), JsError> {
        Ok(layout::verify(descriptor)?)
    }
}

impl WasmBoard {
    fn set_chip_visible(&mut self, color: ChipColor, index: i32, visible: bool) -> Result<(), JsError> {
        self.model.chip_mut(color, index)?.set_visible(visible);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeometryView {
    cell_extent: f64,
    chip_radius: f64,
    chip_center: Point,
    label_anchor: Point,
}
