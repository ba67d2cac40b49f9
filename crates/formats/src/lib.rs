pub mod countries;
pub mod error;
pub mod ingest;
pub mod occurrences;

pub use countries::*;
pub use error::DecodeError;
pub use ingest::*;
pub use occurrences::*;
