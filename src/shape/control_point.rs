use egui::Pos2;

/// Semantic role of a control point, which determines how a drag on it
/// reshapes the owning shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPointKind {
    /// Free resize; the opposite corner stays anchored.
    Corner,
    /// Axis-constrained resize; only one edge moves.
    EdgeMidpoint,
    /// Moves a single polygon vertex.
    Vertex,
    /// Moves the whole (point) shape.
    Center,
}

/// A draggable handle on a shape's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Index into the shape's control-point sequence, stable per variant.
    pub index: usize,
    pub position: Pos2,
    pub kind: ControlPointKind,
}

impl ControlPoint {
    pub fn new(index: usize, position: Pos2, kind: ControlPointKind) -> Self {
        Self {
            index,
            position,
            kind,
        }
    }

    pub fn contains(&self, pos: Pos2, tolerance: f32) -> bool {
        self.position.distance(pos) <= tolerance
    }
}
