pub mod events;
pub mod task;

pub use events::*;
