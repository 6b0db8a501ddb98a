mod machine;

pub use machine::{DragKind, GesturePreview, InteractionMachine};
