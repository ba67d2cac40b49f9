use std::fmt;

use foundation::time::AgeWindow;
use serde::{Deserialize, Serialize};

/// Geological period keys as they appear in the dataset, plus `Other` for
/// anything that does not map to one of the twelve named periods.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Period {
    Quaternario,
    Neogeno,
    Paleogeno,
    Cretaceo,
    Jurassico,
    Triassico,
    Permiano,
    Carbonifero,
    Devoniano,
    Siluriano,
    Ordoviciano,
    Cambriano,
    Other,
}

impl Period {
    /// The twelve named periods, youngest first.
    pub const NAMED: [Period; 12] = [
        Period::Quaternario,
        Period::Neogeno,
        Period::Paleogeno,
        Period::Cretaceo,
        Period::Jurassico,
        Period::Triassico,
        Period::Permiano,
        Period::Carbonifero,
        Period::Devoniano,
        Period::Siluriano,
        Period::Ordoviciano,
        Period::Cambriano,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Period::Quaternario => "quaternario",
            Period::Neogeno => "neogeno",
            Period::Paleogeno => "paleogeno",
            Period::Cretaceo => "cretaceo",
            Period::Jurassico => "jurassico",
            Period::Triassico => "triassico",
            Period::Permiano => "permiano",
            Period::Carbonifero => "carbonifero",
            Period::Devoniano => "devoniano",
            Period::Siluriano => "siluriano",
            Period::Ordoviciano => "ordoviciano",
            Period::Cambriano => "cambriano",
            Period::Other => "outro",
        }
    }

    /// Unknown keys map to `Other`. Matching ignores case and surrounding
    /// whitespace, since legend element ids are upper-cased in places.
    pub fn from_key(key: &str) -> Period {
        let key = key.trim().to_lowercase();
        Period::NAMED
            .into_iter()
            .find(|p| p.key() == key)
            .unwrap_or(Period::Other)
    }

    pub fn is_named(self) -> bool {
        self != Period::Other
    }

    /// Key with the first letter upper-cased, e.g. `Cretaceo`.
    pub fn display_name(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Canonical `[start, end]` range of the period. `Other` spans the full
    /// supported window.
    pub fn canonical_range(self) -> AgeWindow {
        match self {
            Period::Quaternario => AgeWindow::new(2.58, 0.0),
            Period::Neogeno => AgeWindow::new(23.03, 2.58),
            Period::Paleogeno => AgeWindow::new(66.0, 23.03),
            Period::Cretaceo => AgeWindow::new(145.0, 66.0),
            Period::Jurassico => AgeWindow::new(201.3, 145.0),
            Period::Triassico => AgeWindow::new(251.9, 201.3),
            Period::Permiano => AgeWindow::new(298.9, 251.9),
            Period::Carbonifero => AgeWindow::new(358.9, 298.9),
            Period::Devoniano => AgeWindow::new(419.2, 358.9),
            Period::Siluriano => AgeWindow::new(443.8, 419.2),
            Period::Ordoviciano => AgeWindow::new(485.4, 443.8),
            Period::Cambriano => AgeWindow::new(541.0, 485.4),
            Period::Other => AgeWindow::FULL,
        }
    }

    /// Filter semantics: a named period matches itself only; `Other` matches
    /// every occurrence whose period is not one of the named twelve.
    pub fn admits(self, occurrence_period: Period) -> bool {
        match self {
            Period::Other => !occurrence_period.is_named(),
            named => occurrence_period == named,
        }
    }
}

impl From<String> for Period {
    fn from(s: String) -> Self {
        Period::from_key(&s)
    }
}

impl From<Period> for &'static str {
    fn from(p: Period) -> Self {
        p.key()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
