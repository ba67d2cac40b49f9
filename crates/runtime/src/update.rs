use serde::Serialize;

/// The control a user-initiated update came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Startup,
    Legend,
    CountrySelect,
    FamilySelect,
    RangeControl,
    Reset,
    ComparisonClosed,
}

/// Tag carried by every filter mutation.
///
/// Programmatic updates are produced by the explorer itself (for example
/// after writing new bounds into the range control) and must never re-trigger
/// the derivation that caused them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateSource {
    UserInitiated(Origin),
    Programmatic,
}

impl UpdateSource {
    pub fn user(origin: Origin) -> Self {
        UpdateSource::UserInitiated(origin)
    }

    pub fn is_programmatic(self) -> bool {
        matches!(self, UpdateSource::Programmatic)
    }

    /// Whether an update from this source may recompute the range-control
    /// bounds. A change made on the range control itself keeps the user's
    /// window, and closing a comparison restores the last applied rendering
    /// as it was.
    pub fn may_derive_range(self) -> bool {
        match self {
            UpdateSource::UserInitiated(origin) => {
                !matches!(origin, Origin::RangeControl | Origin::ComparisonClosed)
            }
            UpdateSource::Programmatic => false,
        }
    }
}
