use foundation::math::LatLng;
use geo::{Contains, MultiPolygon};

/// Feature id of Antarctica in the country geography.
pub const ANTARCTICA_ID: &str = "ATA";
/// Occurrences at or south of this latitude belong to Antarctica.
pub const ANTARCTICA_MAX_LAT: f64 = -60.0;

/// Select value meaning "no country filter".
pub const ALL_COUNTRIES: &str = "all";

/// A country region from the boundary collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    pub id: String,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

impl CountryFeature {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        geometry: MultiPolygon<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry,
        }
    }

    /// Stand-in used when the boundary collection has no Antarctica feature.
    pub fn antarctica() -> Self {
        Self::new(ANTARCTICA_ID, "Antarctica", MultiPolygon::new(Vec::new()))
    }

    pub fn is_antarctica(&self) -> bool {
        self.id == ANTARCTICA_ID
    }

    /// Membership test. Antarctica is decided by latitude alone; everything
    /// else is a point-in-polygon test.
    pub fn contains(&self, at: LatLng) -> bool {
        if self.is_antarctica() {
            return in_antarctica(at);
        }
        self.geometry.contains(&at.to_point())
    }
}

pub fn in_antarctica(at: LatLng) -> bool {
    at.lat <= ANTARCTICA_MAX_LAT
}

/// Country dimension of the filter state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountryFilter {
    #[default]
    All,
    Region(String),
}

impl CountryFilter {
    /// Parses a country select value. Empty, `all` and the legacy `todos`
    /// sentinel all mean no filter.
    pub fn from_select_value(value: &str) -> Self {
        match value.trim() {
            "" | ALL_COUNTRIES | "todos" => CountryFilter::All,
            id => CountryFilter::Region(id.to_string()),
        }
    }

    pub fn region_id(&self) -> Option<&str> {
        match self {
            CountryFilter::All => None,
            CountryFilter::Region(id) => Some(id),
        }
    }

    pub fn select_value(&self) -> &str {
        self.region_id().unwrap_or(ALL_COUNTRIES)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CountryFilter::All)
    }
}
