//! Geological time primitives. All values are millions of years before present (Ma).

use serde::{Deserialize, Serialize};

/// Oldest age the range control can express.
pub const FULL_RANGE_MAX_MA: f64 = 450.0;
/// Youngest age the range control can express.
pub const FULL_RANGE_MIN_MA: f64 = 0.0;

/// Age range of a single occurrence, oldest first.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgeSpan {
    pub start: f64,
    pub end: f64,
}

impl AgeSpan {
    /// Builds a span, ordering the bounds so `start >= end`.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            start: a.max(b),
            end: a.min(b),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.start - self.end).max(0.0)
    }
}

/// Time filter window `[max, min]`.
///
/// Invariant: `max >= min`. Constructors reorder their inputs, so callers may
/// pass the two slider handles in either order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct AgeWindow {
    max: f64,
    min: f64,
}

impl AgeWindow {
    /// The full supported range, `[450, 0]`.
    pub const FULL: AgeWindow = AgeWindow {
        max: FULL_RANGE_MAX_MA,
        min: FULL_RANGE_MIN_MA,
    };

    pub fn new(a: f64, b: f64) -> Self {
        Self {
            max: a.max(b),
            min: a.min(b),
        }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// Overlap test, not containment: a span passes when any part of it falls
    /// inside the window, bounds inclusive.
    pub fn overlaps(&self, span: AgeSpan) -> bool {
        span.end <= self.max && span.start >= self.min
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for AgeWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<[f64; 2]> for AgeWindow {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<AgeWindow> for [f64; 2] {
    fn from(w: AgeWindow) -> Self {
        [w.max, w.min]
    }
}

impl From<AgeSpan> for AgeWindow {
    fn from(span: AgeSpan) -> Self {
        Self::new(span.start, span.end)
    }
}
