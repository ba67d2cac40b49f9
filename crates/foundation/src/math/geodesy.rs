use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `geo` points are x = longitude, y = latitude.
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl From<LatLng> for Point<f64> {
    fn from(p: LatLng) -> Self {
        p.to_point()
    }
}

/// Great-circle (haversine) distance in kilometers on the mean Earth sphere
/// (radius 6371.0088 km).
pub fn great_circle_km(from: LatLng, to: LatLng) -> f64 {
    Haversine::distance(from.to_point(), to.to_point()) / 1000.0
}
