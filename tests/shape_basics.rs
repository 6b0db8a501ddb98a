use eframe_annotate::shape::{ControlPointKind, Shape, ShapeGeometry, ShapeKind};
use egui::{pos2, vec2, Color32};

fn rect_shape() -> Shape {
    Shape::new(
        1,
        ShapeGeometry::rectangle(pos2(10.0, 20.0), pos2(50.0, 60.0)),
        Color32::RED,
        2.0,
        0,
    )
}

#[test]
fn bounds_are_tight_for_every_variant() {
    let point = ShapeGeometry::point(pos2(5.0, 7.0));
    assert_eq!(point.bounds().min, pos2(5.0, 7.0));
    assert_eq!(point.bounds().size(), vec2(0.0, 0.0));

    let rect = ShapeGeometry::rectangle(pos2(10.0, 20.0), pos2(50.0, 60.0));
    assert_eq!(rect.bounds().min, pos2(10.0, 20.0));
    assert_eq!(rect.bounds().max, pos2(50.0, 60.0));

    let ellipse = ShapeGeometry::ellipse(pos2(0.0, 0.0), pos2(20.0, 10.0));
    assert_eq!(ellipse.bounds().min, pos2(0.0, 0.0));
    assert_eq!(ellipse.bounds().max, pos2(20.0, 10.0));

    let polygon = ShapeGeometry::polygon(vec![
        pos2(0.0, 0.0),
        pos2(30.0, 5.0),
        pos2(15.0, 25.0),
    ])
    .unwrap();
    assert_eq!(polygon.bounds().min, pos2(0.0, 0.0));
    assert_eq!(polygon.bounds().max, pos2(30.0, 25.0));
}

#[test]
fn zero_area_point_remains_selectable() {
    let shape = Shape::new(1, ShapeGeometry::point(pos2(100.0, 100.0)), Color32::RED, 1.0, 0);
    // Pick tolerance is floored, so a nearby click still hits.
    assert!(shape.hit_test(pos2(103.0, 100.0)));
    assert!(!shape.hit_test(pos2(120.0, 100.0)));
}

#[test]
fn polygon_hit_test_inside_and_near_edge() {
    let shape = Shape::new(
        1,
        ShapeGeometry::polygon(vec![pos2(0.0, 0.0), pos2(40.0, 0.0), pos2(20.0, 40.0)]).unwrap(),
        Color32::GREEN,
        2.0,
        0,
    );
    assert!(shape.hit_test(pos2(20.0, 10.0))); // interior
    assert!(shape.hit_test(pos2(20.0, -3.0))); // near the top edge
    assert!(!shape.hit_test(pos2(-20.0, -20.0)));
}

#[test]
fn control_point_counts_and_roles() {
    let rect = rect_shape();
    let points = rect.control_points();
    assert_eq!(points.len(), 8);
    assert_eq!(
        points.iter().filter(|cp| cp.kind == ControlPointKind::Corner).count(),
        4
    );
    assert_eq!(
        points
            .iter()
            .filter(|cp| cp.kind == ControlPointKind::EdgeMidpoint)
            .count(),
        4
    );

    let ellipse = Shape::new(
        2,
        ShapeGeometry::ellipse(pos2(0.0, 0.0), pos2(10.0, 10.0)),
        Color32::RED,
        1.0,
        1,
    );
    assert_eq!(ellipse.control_points().len(), 4);
    assert!(ellipse
        .control_points()
        .iter()
        .all(|cp| cp.kind == ControlPointKind::Corner));

    let polygon = Shape::new(
        3,
        ShapeGeometry::polygon(vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(5.0, 8.0)]).unwrap(),
        Color32::RED,
        1.0,
        2,
    );
    let cps = polygon.control_points();
    assert_eq!(cps.len(), 3);
    assert!(cps.iter().all(|cp| cp.kind == ControlPointKind::Vertex));
    assert_eq!(cps[2].position, pos2(5.0, 8.0));
}

#[test]
fn rectangle_resize_never_produces_negative_extents() {
    let rect = ShapeGeometry::rectangle(pos2(10.0, 10.0), pos2(50.0, 50.0));

    // Drag every corner and edge far past the opposite side.
    for control in 0..8 {
        let resized = rect.resized(control, pos2(200.0, -100.0));
        let ShapeGeometry::Rectangle { size, .. } = resized else {
            panic!("resize changed the variant");
        };
        assert!(size.x >= 0.0 && size.y >= 0.0, "control {control}: {size:?}");
    }

    // Dragging the top-left corner past the bottom-right flips the anchor.
    let flipped = rect.resized(0, pos2(80.0, 90.0));
    let ShapeGeometry::Rectangle { origin, size } = flipped else {
        panic!("expected rectangle");
    };
    assert_eq!(origin, pos2(50.0, 50.0));
    assert_eq!(size, vec2(30.0, 40.0));
}

#[test]
fn edge_midpoint_resize_is_axis_constrained() {
    let rect = ShapeGeometry::rectangle(pos2(0.0, 0.0), pos2(40.0, 40.0));
    // Right edge midpoint (index 5): only the width may change.
    let resized = rect.resized(5, pos2(60.0, 999.0));
    let ShapeGeometry::Rectangle { origin, size } = resized else {
        panic!("expected rectangle");
    };
    assert_eq!(origin, pos2(0.0, 0.0));
    assert_eq!(size, vec2(60.0, 40.0));
}

#[test]
fn polygon_resize_moves_only_the_targeted_vertex() {
    let polygon =
        ShapeGeometry::polygon(vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(5.0, 8.0)]).unwrap();
    let resized = polygon.resized(1, pos2(20.0, 2.0));
    let ShapeGeometry::Polygon { vertices } = resized else {
        panic!("expected polygon");
    };
    assert_eq!(vertices, vec![pos2(0.0, 0.0), pos2(20.0, 2.0), pos2(5.0, 8.0)]);
}

#[test]
fn translate_shifts_all_coordinates() {
    let polygon =
        ShapeGeometry::polygon(vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(5.0, 8.0)]).unwrap();
    let moved = polygon.translated(vec2(3.0, -2.0));
    assert_eq!(moved.bounds().min, pos2(3.0, -2.0));

    let ellipse = ShapeGeometry::ellipse(pos2(0.0, 0.0), pos2(10.0, 10.0));
    let moved = ellipse.translated(vec2(5.0, 5.0));
    let ShapeGeometry::Ellipse { center, radii } = moved else {
        panic!("expected ellipse");
    };
    assert_eq!(center, pos2(10.0, 10.0));
    assert_eq!(radii, vec2(5.0, 5.0));
}

#[test]
fn kind_matches_variant() {
    assert_eq!(rect_shape().kind(), ShapeKind::Rectangle);
    assert_eq!(
        ShapeGeometry::point(pos2(0.0, 0.0)).kind(),
        ShapeKind::Point
    );
}
