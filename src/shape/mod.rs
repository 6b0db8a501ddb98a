use egui::{Color32, Pos2, Rect, Vec2};

pub(crate) mod common;
mod control_point;

pub use common::{
    CONTROL_POINT_SIZE, CONTROL_POINT_TOLERANCE, DEFAULT_GRID_SIZE, HOVER_WIDTH_INCREASE,
    MIN_PICK_RADIUS, POLYGON_MIN_VERTICES, POLYGON_SNAP_DISTANCE,
};
pub use control_point::{ControlPoint, ControlPointKind};

/// Unique, immutable identifier of a shape for its lifetime in the store.
pub type ShapeId = u64;

/// Shape-type tag matching the geometry variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Point,
    Rectangle,
    Ellipse,
    Polygon,
}

/// Error returned when constructing a polygon with too few vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("polygon requires at least {POLYGON_MIN_VERTICES} vertices, got {0}")]
pub struct DegeneratePolygon(pub usize);

/// Variant geometry of an annotation shape.
///
/// Invariants held by construction and by every geometry operation:
/// rectangle extents and ellipse radii are never negative, and polygons
/// carry at least [`POLYGON_MIN_VERTICES`] vertices (closed implicitly,
/// last connecting back to first).
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Point { position: Pos2 },
    Rectangle { origin: Pos2, size: Vec2 },
    Ellipse { center: Pos2, radii: Vec2 },
    Polygon { vertices: Vec<Pos2> },
}

impl ShapeGeometry {
    pub fn point(position: Pos2) -> Self {
        Self::Point { position }
    }

    /// Rectangle spanned by two opposite corners, normalized so the stored
    /// size is non-negative.
    pub fn rectangle(a: Pos2, b: Pos2) -> Self {
        let rect = Rect::from_two_pos(a, b);
        Self::Rectangle {
            origin: rect.min,
            size: rect.size(),
        }
    }

    /// Ellipse inscribed in the rectangle spanned by two opposite corners.
    pub fn ellipse(a: Pos2, b: Pos2) -> Self {
        let rect = Rect::from_two_pos(a, b);
        Self::Ellipse {
            center: rect.center(),
            radii: rect.size() * 0.5,
        }
    }

    pub fn polygon(vertices: Vec<Pos2>) -> Result<Self, DegeneratePolygon> {
        if vertices.len() < POLYGON_MIN_VERTICES {
            return Err(DegeneratePolygon(vertices.len()));
        }
        Ok(Self::Polygon { vertices })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point { .. } => ShapeKind::Point,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Ellipse { .. } => ShapeKind::Ellipse,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Exact axis-aligned bounding box, derived from the current geometry.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Point { position } => Rect::from_min_max(*position, *position),
            Self::Rectangle { origin, size } => Rect::from_min_size(*origin, *size),
            Self::Ellipse { center, radii } => Rect::from_center_size(*center, *radii * 2.0),
            Self::Polygon { vertices } => {
                let mut min = vertices[0];
                let mut max = vertices[0];
                for v in &vertices[1..] {
                    min.x = min.x.min(v.x);
                    min.y = min.y.min(v.y);
                    max.x = max.x.max(v.x);
                    max.y = max.y.max(v.y);
                }
                Rect::from_min_max(min, max)
            }
        }
    }

    /// Point-in-shape or point-near-stroke test.
    pub fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        match self {
            Self::Point { position } => position.distance(pos) <= tolerance,
            Self::Rectangle { .. } => self.bounds().expand(tolerance).contains(pos),
            Self::Ellipse { center, radii } => {
                let dx = (pos.x - center.x) / (radii.x + tolerance);
                let dy = (pos.y - center.y) / (radii.y + tolerance);
                dx * dx + dy * dy <= 1.0
            }
            Self::Polygon { vertices } => {
                point_in_polygon(pos, vertices) || near_polygon_edge(pos, vertices, tolerance)
            }
        }
    }

    /// Ordered control points; index and role are fixed per variant.
    pub fn control_points(&self) -> Vec<ControlPoint> {
        use ControlPointKind::*;
        match self {
            Self::Point { position } => vec![ControlPoint::new(0, *position, Center)],
            Self::Rectangle { .. } | Self::Ellipse { .. } => {
                let r = self.bounds();
                let mut points = vec![
                    ControlPoint::new(0, r.left_top(), Corner),
                    ControlPoint::new(1, r.right_top(), Corner),
                    ControlPoint::new(2, r.right_bottom(), Corner),
                    ControlPoint::new(3, r.left_bottom(), Corner),
                ];
                if matches!(self, Self::Rectangle { .. }) {
                    points.extend([
                        ControlPoint::new(4, r.center_top(), EdgeMidpoint),
                        ControlPoint::new(5, r.right_center(), EdgeMidpoint),
                        ControlPoint::new(6, r.center_bottom(), EdgeMidpoint),
                        ControlPoint::new(7, r.left_center(), EdgeMidpoint),
                    ]);
                }
                points
            }
            Self::Polygon { vertices } => vertices
                .iter()
                .enumerate()
                .map(|(i, v)| ControlPoint::new(i, *v, Vertex))
                .collect(),
        }
    }

    /// Geometry after dragging control point `control` to `new_pos`.
    ///
    /// Pure; never produces negative extents (a rectangle drag crossing the
    /// opposite edge flips the anchor instead). An out-of-range index leaves
    /// the geometry unchanged.
    pub fn resized(&self, control: usize, new_pos: Pos2) -> Self {
        match self {
            Self::Point { .. } => {
                if control == 0 {
                    Self::Point { position: new_pos }
                } else {
                    self.clone()
                }
            }
            Self::Rectangle { .. } => {
                let r = self.bounds();
                let (mut min, mut max) = (r.min, r.max);
                match control {
                    0 => min = new_pos,
                    1 => {
                        max.x = new_pos.x;
                        min.y = new_pos.y;
                    }
                    2 => max = new_pos,
                    3 => {
                        min.x = new_pos.x;
                        max.y = new_pos.y;
                    }
                    4 => min.y = new_pos.y,
                    5 => max.x = new_pos.x,
                    6 => max.y = new_pos.y,
                    7 => min.x = new_pos.x,
                    _ => return self.clone(),
                }
                Self::rectangle(min, max)
            }
            Self::Ellipse { .. } => {
                let r = self.bounds();
                let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()];
                if control >= corners.len() {
                    return self.clone();
                }
                let anchor = corners[(control + 2) % 4];
                Self::ellipse(anchor, new_pos)
            }
            Self::Polygon { vertices } => {
                let mut vertices = vertices.clone();
                if let Some(v) = vertices.get_mut(control) {
                    *v = new_pos;
                }
                Self::Polygon { vertices }
            }
        }
    }

    /// Pure translation of every coordinate by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        match self {
            Self::Point { position } => Self::Point {
                position: *position + delta,
            },
            Self::Rectangle { origin, size } => Self::Rectangle {
                origin: *origin + delta,
                size: *size,
            },
            Self::Ellipse { center, radii } => Self::Ellipse {
                center: *center + delta,
                radii: *radii,
            },
            Self::Polygon { vertices } => Self::Polygon {
                vertices: vertices.iter().map(|v| *v + delta).collect(),
            },
        }
    }
}

/// A typed geometric annotation with identity, style and z-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry: ShapeGeometry,
    pub color: Color32,
    pub line_width: f32,
    /// Insertion order; drives stacking for rendering and hit-testing.
    pub z: u32,
    pub selected: bool,
    pub hovered: bool,
}

impl Shape {
    pub fn new(id: ShapeId, geometry: ShapeGeometry, color: Color32, line_width: f32, z: u32) -> Self {
        Self {
            id,
            geometry,
            color,
            line_width,
            z,
            selected: false,
            hovered: false,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// Pick tolerance for this shape: line width, floored so thin and
    /// zero-area shapes remain selectable.
    pub fn pick_tolerance(&self) -> f32 {
        self.line_width.max(MIN_PICK_RADIUS)
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.geometry.hit_test(pos, self.pick_tolerance())
    }

    pub fn control_points(&self) -> Vec<ControlPoint> {
        self.geometry.control_points()
    }

    /// Control point under `pos`, if any, within the standard grab tolerance.
    pub fn control_point_at(&self, pos: Pos2) -> Option<ControlPoint> {
        self.control_points()
            .into_iter()
            .find(|cp| cp.contains(pos, CONTROL_POINT_TOLERANCE))
    }

    /// Copy with transient flags cleared, suitable for operation snapshots.
    pub fn detached(&self) -> Self {
        Self {
            selected: false,
            hovered: false,
            ..self.clone()
        }
    }
}

/// Ray-casting containment test for an implicitly closed polygon.
fn point_in_polygon(pos: Pos2, vertices: &[Pos2]) -> bool {
    let n = vertices.len();
    if n < POLYGON_MIN_VERTICES {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > pos.y) != (b.y > pos.y) {
            let x = (b.x - a.x) * (pos.y - a.y) / (b.y - a.y) + a.x;
            if pos.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn near_polygon_edge(pos: Pos2, vertices: &[Pos2], tolerance: f32) -> bool {
    let n = vertices.len();
    (0..n).any(|i| point_to_segment_distance(pos, vertices[i], vertices[(i + 1) % n]) <= tolerance)
}

fn point_to_segment_distance(pos: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return pos.distance(a);
    }
    let t = ((pos - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    pos.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn polygon_needs_three_vertices() {
        let two = vec![pos2(0.0, 0.0), pos2(10.0, 0.0)];
        assert_eq!(ShapeGeometry::polygon(two), Err(DegeneratePolygon(2)));

        let three = vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0)];
        assert!(ShapeGeometry::polygon(three).is_ok());
    }

    #[test]
    fn rectangle_is_normalized_from_any_corner_pair() {
        let g = ShapeGeometry::rectangle(pos2(20.0, 30.0), pos2(5.0, 10.0));
        let ShapeGeometry::Rectangle { origin, size } = g else {
            panic!("expected rectangle");
        };
        assert_eq!(origin, pos2(5.0, 10.0));
        assert_eq!(size, Vec2::new(15.0, 20.0));
    }

    #[test]
    fn segment_distance_handles_degenerate_segment() {
        let d = point_to_segment_distance(pos2(3.0, 4.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
