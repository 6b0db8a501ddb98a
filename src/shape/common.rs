/// Minimum pick radius so zero-area shapes (points, degenerate rects)
/// stay selectable regardless of line width.
pub const MIN_PICK_RADIUS: f32 = 5.0;

/// Distance within which a pointer position grabs a control point.
pub const CONTROL_POINT_TOLERANCE: f32 = 12.0;

/// Drawn size of a control-point handle.
pub const CONTROL_POINT_SIZE: f32 = 8.0;

/// Clicking this close to a polygon's first vertex closes the polygon.
pub const POLYGON_SNAP_DISTANCE: f32 = 15.0;

/// A polygon with fewer vertices than this is rejected at construction.
pub const POLYGON_MIN_VERTICES: usize = 3;

/// Extra stroke width applied when a shape is hovered.
pub const HOVER_WIDTH_INCREASE: f32 = 2.0;

/// Grid cell size used until the host configures one.
pub const DEFAULT_GRID_SIZE: f32 = 10.0;
