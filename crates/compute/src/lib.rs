pub mod analysis;

pub use analysis::abundance::{SpeciesCount, top_species};
pub use analysis::temporal::TemporalAnalysis;
