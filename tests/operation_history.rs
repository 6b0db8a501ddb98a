use eframe_annotate::command::{Operation, OperationHistory};
use eframe_annotate::document::DocumentStore;
use eframe_annotate::event::EventBus;
use eframe_annotate::shape::{Shape, ShapeGeometry};
use egui::{pos2, vec2, Color32};

fn empty_store() -> DocumentStore {
    DocumentStore::new(EventBus::new())
}

fn test_shape(id: u64, z: u32) -> Shape {
    Shape::new(
        id,
        ShapeGeometry::rectangle(pos2(10.0 * z as f32, 10.0), pos2(10.0 * z as f32 + 20.0, 30.0)),
        Color32::RED,
        2.0,
        z,
    )
}

fn snapshot(store: &DocumentStore) -> Vec<Shape> {
    store.shapes_ordered().into_iter().cloned().collect()
}

#[test]
fn apply_then_inverse_restores_prior_state() {
    let ops = [
        Operation::Create {
            shape: test_shape(10, 5),
        },
        Operation::Delete {
            shape: test_shape(1, 0),
        },
        Operation::Move {
            id: 2,
            delta: vec2(7.0, -3.0),
        },
        Operation::Resize {
            id: 2,
            control: 2,
            old: test_shape(2, 1).geometry,
            new: ShapeGeometry::rectangle(pos2(10.0, 10.0), pos2(90.0, 90.0)),
        },
        Operation::Batch(vec![
            Operation::Delete {
                shape: test_shape(2, 1),
            },
            Operation::Delete {
                shape: test_shape(1, 0),
            },
        ]),
    ];

    for op in ops {
        let mut store = empty_store();
        for z in 0..3 {
            store.insert(test_shape(z as u64 + 1, z)).unwrap();
        }
        let before = snapshot(&store);

        op.apply(&mut store).unwrap();
        op.inverted().apply(&mut store).unwrap();

        assert_eq!(snapshot(&store), before, "{op:?}");
    }
}

#[test]
fn undo_then_redo_is_a_noop_on_final_state() {
    let mut store = empty_store();
    let mut history = OperationHistory::new();

    history
        .record_and_apply(
            Operation::Create {
                shape: test_shape(1, 0),
            },
            &mut store,
        )
        .unwrap();
    history
        .record_and_apply(
            Operation::Move {
                id: 1,
                delta: vec2(5.0, 5.0),
            },
            &mut store,
        )
        .unwrap();

    let final_state = snapshot(&store);
    assert!(history.undo(&mut store));
    assert!(history.redo(&mut store));
    assert_eq!(snapshot(&store), final_state);
}

#[test]
fn new_operation_truncates_redo_tail() {
    let mut store = empty_store();
    let mut history = OperationHistory::new();

    history
        .record_and_apply(
            Operation::Create {
                shape: test_shape(1, 0),
            },
            &mut store,
        )
        .unwrap();
    history
        .record_and_apply(
            Operation::Create {
                shape: test_shape(2, 1),
            },
            &mut store,
        )
        .unwrap();

    assert!(history.undo(&mut store));
    assert!(history.can_redo());

    history
        .record_and_apply(
            Operation::Create {
                shape: test_shape(3, 2),
            },
            &mut store,
        )
        .unwrap();

    // The undone create of shape 2 is gone for good.
    assert!(!history.can_redo());
    assert_eq!(history.len(), 2);
    assert!(store.get(2).is_none());
    assert!(store.get(3).is_some());
}

#[test]
fn undo_and_redo_with_empty_history_are_silent_noops() {
    let mut store = empty_store();
    let mut history = OperationHistory::new();

    assert!(!history.undo(&mut store));
    assert!(!history.redo(&mut store));
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn batch_delete_is_atomic_under_undo() {
    let mut store = empty_store();
    let mut history = OperationHistory::new();
    for z in 0..3 {
        history
            .record_and_apply(
                Operation::Create {
                    shape: test_shape(z as u64 + 1, z),
                },
                &mut store,
            )
            .unwrap();
    }
    let before = snapshot(&store);

    // Deletes in top-down order, as clear-all records them.
    let batch = Operation::Batch(vec![
        Operation::Delete {
            shape: test_shape(3, 2),
        },
        Operation::Delete {
            shape: test_shape(2, 1),
        },
        Operation::Delete {
            shape: test_shape(1, 0),
        },
    ]);
    history.record_and_apply(batch, &mut store).unwrap();
    assert!(store.is_empty());

    // One undo restores all three, with their original ids and z-order.
    assert!(history.undo(&mut store));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn clear_drops_history_without_touching_the_store() {
    let mut store = empty_store();
    let mut history = OperationHistory::new();
    history
        .record_and_apply(
            Operation::Create {
                shape: test_shape(1, 0),
            },
            &mut store,
        )
        .unwrap();

    history.clear();
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert_eq!(store.len(), 1);
}

#[test]
fn move_inverse_negates_the_delta() {
    let op = Operation::Move {
        id: 7,
        delta: vec2(4.0, -9.0),
    };
    let Operation::Move { id, delta } = op.inverted() else {
        panic!("inverse of move is a move");
    };
    assert_eq!(id, 7);
    assert_eq!(delta, vec2(-4.0, 9.0));
}

#[test]
fn resize_inverse_swaps_geometries() {
    let old = ShapeGeometry::rectangle(pos2(0.0, 0.0), pos2(10.0, 10.0));
    let new = ShapeGeometry::rectangle(pos2(0.0, 0.0), pos2(40.0, 40.0));
    let op = Operation::Resize {
        id: 1,
        control: 2,
        old: old.clone(),
        new: new.clone(),
    };
    let Operation::Resize {
        old: inv_old,
        new: inv_new,
        ..
    } = op.inverted()
    else {
        panic!("inverse of resize is a resize");
    };
    assert_eq!(inv_old, new);
    assert_eq!(inv_new, old);
}
