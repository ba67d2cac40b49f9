use serde::{Deserialize, Serialize};

use crate::math::LatLng;

/// Axis-aligned lon/lat box in degrees, used to frame rendered markers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLatBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LonLatBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn from_point(p: LatLng) -> Self {
        Self::new(p, p)
    }

    /// Smallest box containing every point, `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut out = Self::from_point(iter.next()?);
        for p in iter {
            out.extend(p);
        }
        Some(out)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    /// Grows the box by `ratio` of its height and width on every side.
    pub fn pad(self, ratio: f64) -> Self {
        let dlat = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let dlng = (self.north_east.lng - self.south_west.lng).abs() * ratio;
        Self {
            south_west: LatLng::new(self.south_west.lat - dlat, self.south_west.lng - dlng),
            north_east: LatLng::new(self.north_east.lat + dlat, self.north_east.lng + dlng),
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }
}
