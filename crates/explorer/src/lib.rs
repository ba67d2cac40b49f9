pub mod basket;
pub mod bootstrap;
pub mod comparison;
pub mod config;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod ports;
pub mod reconciler;
pub mod summary;

#[cfg(test)]
mod testing;

pub use basket::SelectionBasket;
pub use bootstrap::build_store;
pub use comparison::{ComparisonPhase, ComparisonPoint, ComparisonSession, ScheduledReset};
pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use explorer::{Explorer, Rendered};
pub use filter::{FilterContext, FilterState};
pub use ports::*;
pub use summary::SummaryView;
