mod bus;
mod events;

pub use bus::{EventBus, EventHandler};
pub use events::CanvasEvent;
