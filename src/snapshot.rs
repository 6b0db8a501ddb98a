use egui::{pos2, vec2, Color32};
use serde::{Deserialize, Serialize};

use crate::shape::{Shape, ShapeGeometry, ShapeId, POLYGON_MIN_VERTICES};

/// Errors from validating an imported snapshot. No partial mutation ever
/// occurs: the first invalid record rejects the whole import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("duplicate shape id {0} in snapshot")]
    DuplicateId(ShapeId),
    #[error("polygon record {id} has {count} vertices; at least {POLYGON_MIN_VERTICES} required")]
    DegeneratePolygon { id: ShapeId, count: usize },
    #[error("record {id} contains a non-finite coordinate")]
    NonFinite { id: ShapeId },
}

/// Geometry in flat serializable form. The tag doubles as the shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryRecord {
    Point { x: f32, y: f32 },
    Rectangle { x: f32, y: f32, width: f32, height: f32 },
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Polygon { vertices: Vec<[f32; 2]> },
}

/// One exported shape: identity, geometry and style, no transient flags and
/// no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: ShapeId,
    pub geometry: GeometryRecord,
    /// RGBA, straight (unmultiplied) channels.
    pub color: [u8; 4],
    pub line_width: f32,
    pub z: u32,
}

impl ShapeRecord {
    pub fn from_shape(shape: &Shape) -> Self {
        let geometry = match &shape.geometry {
            ShapeGeometry::Point { position } => GeometryRecord::Point {
                x: position.x,
                y: position.y,
            },
            ShapeGeometry::Rectangle { origin, size } => GeometryRecord::Rectangle {
                x: origin.x,
                y: origin.y,
                width: size.x,
                height: size.y,
            },
            ShapeGeometry::Ellipse { center, radii } => GeometryRecord::Ellipse {
                cx: center.x,
                cy: center.y,
                rx: radii.x,
                ry: radii.y,
            },
            ShapeGeometry::Polygon { vertices } => GeometryRecord::Polygon {
                vertices: vertices.iter().map(|v| [v.x, v.y]).collect(),
            },
        };
        let [r, g, b, a] = shape.color.to_srgba_unmultiplied();
        Self {
            id: shape.id,
            geometry,
            color: [r, g, b, a],
            line_width: shape.line_width,
            z: shape.z,
        }
    }

    /// Validate and rebuild the shape. Rectangle and ellipse extents are
    /// normalized; a degenerate polygon or non-finite coordinate rejects
    /// the record.
    pub fn into_shape(&self) -> Result<Shape, SnapshotError> {
        let geometry = match &self.geometry {
            GeometryRecord::Point { x, y } => {
                self.check_finite(&[*x, *y])?;
                ShapeGeometry::point(pos2(*x, *y))
            }
            GeometryRecord::Rectangle { x, y, width, height } => {
                self.check_finite(&[*x, *y, *width, *height])?;
                ShapeGeometry::rectangle(pos2(*x, *y), pos2(x + width, y + height))
            }
            GeometryRecord::Ellipse { cx, cy, rx, ry } => {
                self.check_finite(&[*cx, *cy, *rx, *ry])?;
                ShapeGeometry::Ellipse {
                    center: pos2(*cx, *cy),
                    radii: vec2(rx.abs(), ry.abs()),
                }
            }
            GeometryRecord::Polygon { vertices } => {
                if vertices.len() < POLYGON_MIN_VERTICES {
                    return Err(SnapshotError::DegeneratePolygon {
                        id: self.id,
                        count: vertices.len(),
                    });
                }
                for v in vertices {
                    self.check_finite(v)?;
                }
                ShapeGeometry::Polygon {
                    vertices: vertices.iter().map(|[x, y]| pos2(*x, *y)).collect(),
                }
            }
        };
        let [r, g, b, a] = self.color;
        Ok(Shape::new(
            self.id,
            geometry,
            Color32::from_rgba_unmultiplied(r, g, b, a),
            self.line_width,
            self.z,
        ))
    }

    fn check_finite(&self, values: &[f32]) -> Result<(), SnapshotError> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(SnapshotError::NonFinite { id: self.id })
        }
    }
}

/// Serialize a snapshot to JSON, matching the document persistence format.
pub fn to_json(records: &[ShapeRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

pub fn from_json(json: &str) -> serde_json::Result<Vec<ShapeRecord>> {
    serde_json::from_str(json)
}
