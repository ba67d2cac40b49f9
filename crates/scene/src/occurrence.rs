use std::fmt;

use foundation::math::LatLng;
use foundation::time::AgeSpan;
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Genus placeholder the dataset uses for unidentified finds.
pub const UNIDENTIFIED_GENUS: &str = "Não identificado";

/// Dense index of an occurrence in the `DataStore`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccurrenceId(pub u32);

impl OccurrenceId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Selection identity of an occurrence: genus plus species (empty when
/// unknown). Not unique across the dataset: every occurrence of a taxon
/// shares its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesKey {
    pub genus: String,
    pub species: String,
}

impl SpeciesKey {
    pub fn new(genus: impl Into<String>, species: Option<&str>) -> Self {
        Self {
            genus: genus.into(),
            species: species.unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for SpeciesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.species.is_empty() {
            f.write_str(&self.genus)
        } else {
            write!(f, "{} {}", self.genus, self.species)
        }
    }
}

/// One fossil find. Read-only after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub genus: String,
    pub species: Option<String>,
    pub family: Option<String>,
    pub formation: String,
    pub period: Period,
    pub age: AgeSpan,
    pub position: LatLng,
    pub image_url: Option<String>,
}

impl Occurrence {
    pub fn species_key(&self) -> SpeciesKey {
        SpeciesKey::new(self.genus.clone(), self.species.as_deref())
    }

    /// `Genus species`, or just the genus when the species is unknown.
    pub fn display_name(&self) -> String {
        self.species_key().to_string()
    }

    pub fn is_identified(&self) -> bool {
        self.genus != UNIDENTIFIED_GENUS
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.family.as_deref() == Some(family)
    }
}
