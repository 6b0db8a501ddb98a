#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod document;
pub mod editor;
pub mod event;
pub mod id_generator;
pub mod input;
pub mod renderer;
pub mod shape;
pub mod snapshot;
pub mod state;
pub mod tools;

pub use app::AnnotateApp;
pub use command::{Operation, OperationHistory};
pub use document::{DocumentStore, StoreError};
pub use editor::{CanvasEditor, ImportJsonError};
pub use event::{CanvasEvent, EventBus, EventHandler};
pub use input::{InputEvent, InputTranslator};
pub use renderer::CanvasRenderer;
pub use shape::{
    ControlPoint, ControlPointKind, Shape, ShapeGeometry, ShapeId, ShapeKind,
};
pub use snapshot::{GeometryRecord, ShapeRecord, SnapshotError};
pub use state::{DragKind, GesturePreview, InteractionMachine};
pub use tools::{ToolConfig, ToolKind};
