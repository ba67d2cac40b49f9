pub mod country;
pub mod family;
pub mod occurrence;
pub mod period;
pub mod query;
pub mod selection;
pub mod store;

pub use country::*;
pub use family::*;
pub use occurrence::*;
pub use period::*;
pub use query::{OccurrenceQuery, QueryOutcome, query_occurrences};
pub use selection::SelectionSet;
pub use store::*;
