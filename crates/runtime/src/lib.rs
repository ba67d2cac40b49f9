pub mod event_bus;
pub mod update;

pub use event_bus::*;
pub use update::*;
