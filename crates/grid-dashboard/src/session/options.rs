//! Static configuration handed to the grid surface.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::breakpoint::Breakpoint;
use crate::config::schema::GridConfig;

/// How the surface compacts widgets after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactType {
    /// Widgets float upward to fill gaps.
    Vertical,
    /// Widgets float left to fill gaps.
    Horizontal,
}

/// Everything the grid surface needs besides the layout itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    /// Activation width per breakpoint, in pixels.
    pub breakpoints: BTreeMap<Breakpoint, u32>,
    /// Column count per breakpoint.
    pub cols: BTreeMap<Breakpoint, u32>,
    /// Pixel height of one grid row.
    pub row_height: u32,
    /// Horizontal and vertical gap between widgets, in pixels.
    pub margin: [u32; 2],
    /// Horizontal and vertical padding inside the container, in pixels.
    pub container_padding: [u32; 2],
    /// Compaction direction.
    pub compact_type: CompactType,
    /// CSS selector of the element that starts a drag.
    pub draggable_handle: String,
    /// When `false`, dragged widgets push others out of the way.
    pub prevent_collision: bool,
    /// Widgets can be dragged.
    pub is_draggable: bool,
    /// Widgets can be resized.
    pub is_resizable: bool,
}

impl GridOptions {
    /// Builds options from the `[grid]` config section.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            row_height: config.row_height,
            margin: config.margin,
            container_padding: config.container_padding,
            ..Self::default()
        }
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        let defaults = GridConfig::default();
        Self {
            breakpoints: Breakpoint::ALL
                .into_iter()
                .map(|bp| (bp, bp.min_width()))
                .collect(),
            cols: Breakpoint::ALL
                .into_iter()
                .map(|bp| (bp, bp.columns()))
                .collect(),
            row_height: defaults.row_height,
            margin: defaults.margin,
            container_padding: defaults.container_padding,
            compact_type: CompactType::Vertical,
            draggable_handle: ".drag-handle".to_string(),
            prevent_collision: false,
            is_draggable: true,
            is_resizable: true,
        }
    }
}
