pub mod actions;
pub mod engine;
pub mod events;

pub use actions::{invest, reset};
pub use engine::TriggerEngine;
pub use events::AutomationEvent;
