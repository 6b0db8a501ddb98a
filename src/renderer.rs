use egui::{Color32, Painter, Pos2, Rect, Shape as PaintShape, Stroke, Vec2};

use crate::editor::CanvasEditor;
use crate::shape::{
    Shape, ShapeGeometry, CONTROL_POINT_SIZE, HOVER_WIDTH_INCREASE,
};
use crate::state::GesturePreview;

/// Number of segments used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 64;

/// Render collaborator: draws the store's shapes, the selected shape's
/// control points, and the in-progress gesture preview with an egui painter.
///
/// Purely a consumer of the core: it reads the shape list and preview each
/// frame and never mutates the document.
pub struct CanvasRenderer {
    origin: Vec2,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self { origin: Vec2::ZERO }
    }

    /// Canvas-to-screen offset for this frame.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn paint(&self, painter: &Painter, canvas_rect: Rect, editor: &CanvasEditor) {
        if editor.config().snap_to_grid {
            self.paint_grid(painter, canvas_rect, editor.config().grid_size);
        }

        let preview = editor.preview();
        let reshaping = match &preview {
            Some(GesturePreview::Reshape { id, .. }) => Some(*id),
            _ => None,
        };

        for shape in editor.store().shapes_ordered() {
            // The dragged shape is drawn from the preview geometry instead.
            if Some(shape.id) == reshaping {
                continue;
            }
            self.paint_shape(painter, shape);
        }

        match preview {
            Some(GesturePreview::New {
                geometry,
                color,
                line_width,
            }) => {
                self.paint_geometry(painter, &geometry, Stroke::new(line_width, color));
            }
            Some(GesturePreview::Reshape { id, geometry }) => {
                if let Some(shape) = editor.store().get(id) {
                    let stroke = Stroke::new(shape.line_width, shape.color);
                    self.paint_geometry(painter, &geometry, stroke);
                }
            }
            Some(GesturePreview::Polygon {
                vertices,
                cursor,
                closing,
            }) => {
                self.paint_open_polygon(painter, &vertices, cursor, closing, editor);
            }
            None => {}
        }

        if let Some(shape) = editor.store().selected_shape() {
            self.paint_control_points(painter, shape, editor.hovered_control());
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.origin
    }

    fn paint_grid(&self, painter: &Painter, rect: Rect, grid_size: f32) {
        if grid_size <= 0.0 {
            return;
        }
        let stroke = Stroke::new(0.5, Color32::from_gray(80));
        let mut x = rect.min.x;
        while x <= rect.max.x {
            painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
            x += grid_size;
        }
        let mut y = rect.min.y;
        while y <= rect.max.y {
            painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
            y += grid_size;
        }
    }

    fn paint_shape(&self, painter: &Painter, shape: &Shape) {
        let mut width = shape.line_width;
        if shape.hovered {
            width += HOVER_WIDTH_INCREASE;
        }
        self.paint_geometry(painter, &shape.geometry, Stroke::new(width, shape.color));
    }

    fn paint_geometry(&self, painter: &Painter, geometry: &ShapeGeometry, stroke: Stroke) {
        match geometry {
            ShapeGeometry::Point { position } => {
                painter.circle_filled(self.to_screen(*position), stroke.width + 2.0, stroke.color);
            }
            ShapeGeometry::Rectangle { .. } => {
                let bounds = geometry.bounds().translate(self.origin);
                painter.rect_stroke(bounds, 0.0, stroke);
            }
            ShapeGeometry::Ellipse { center, radii } => {
                let center = self.to_screen(*center);
                let points: Vec<Pos2> = (0..=ELLIPSE_SEGMENTS)
                    .map(|i| {
                        let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                        Pos2::new(center.x + radii.x * t.cos(), center.y + radii.y * t.sin())
                    })
                    .collect();
                painter.add(PaintShape::line(points, stroke));
            }
            ShapeGeometry::Polygon { vertices } => {
                let points: Vec<Pos2> = vertices.iter().map(|v| self.to_screen(*v)).collect();
                painter.add(PaintShape::closed_line(points, stroke));
            }
        }
    }

    fn paint_open_polygon(
        &self,
        painter: &Painter,
        vertices: &[Pos2],
        cursor: Option<Pos2>,
        closing: bool,
        editor: &CanvasEditor,
    ) {
        let config = editor.config();
        let stroke = Stroke::new(config.line_width, config.color);
        let mut points: Vec<Pos2> = vertices.iter().map(|v| self.to_screen(*v)).collect();
        if let Some(cursor) = cursor {
            points.push(self.to_screen(cursor));
        }
        painter.add(PaintShape::line(points, stroke));

        // Highlight the start vertex when the cursor has snapped onto it.
        if let Some(first) = vertices.first() {
            let radius = if closing { 6.0 } else { 4.0 };
            painter.circle_stroke(self.to_screen(*first), radius, stroke);
        }
    }

    fn paint_control_points(&self, painter: &Painter, shape: &Shape, hovered: Option<usize>) {
        for cp in shape.control_points() {
            let size = if hovered == Some(cp.index) {
                CONTROL_POINT_SIZE * 1.5
            } else {
                CONTROL_POINT_SIZE
            };
            let rect = Rect::from_center_size(self.to_screen(cp.position), Vec2::splat(size));
            painter.rect_filled(rect, 1.0, Color32::WHITE);
            painter.rect_stroke(rect, 1.0, Stroke::new(1.0, Color32::DARK_GRAY));
        }
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}
