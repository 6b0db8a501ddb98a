use egui::{Color32, Pos2};

use crate::shape::DEFAULT_GRID_SIZE;

/// The active creation tool: which shape variant a gesture on empty canvas
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Point,
    Rectangle,
    Ellipse,
    Polygon,
}

/// Drawing configuration read by the interaction machine when committing
/// new shapes. Created with the canvas and mutated only through explicit
/// editor setters; never ambient global state.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub active_tool: ToolKind,
    pub color: Color32,
    pub line_width: f32,
    pub snap_to_grid: bool,
    pub grid_size: f32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            active_tool: ToolKind::Rectangle,
            color: Color32::RED,
            line_width: 2.0,
            snap_to_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl ToolConfig {
    /// Round `pos` to the nearest grid multiple when snapping is on.
    ///
    /// Applied only to the moving endpoint of a drag, so toggling snapping
    /// mid-drag never jumps a shape's existing geometry.
    pub fn snapped(&self, pos: Pos2) -> Pos2 {
        if !self.snap_to_grid || self.grid_size <= 0.0 {
            return pos;
        }
        Pos2::new(
            (pos.x / self.grid_size).round() * self.grid_size,
            (pos.y / self.grid_size).round() * self.grid_size,
        )
    }
}
