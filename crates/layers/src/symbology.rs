use scene::Period;
use serde::Serialize;

/// Fill colour of markers whose period has no legend entry.
pub const DEFAULT_PERIOD_COLOR: &str = "#ff9900";
/// Colour shared by comparison highlights and the distance line.
pub const COMPARISON_COLOR: &str = "#ffeb3b";

/// Legend colour of a period.
pub fn period_color(period: Period) -> &'static str {
    match period {
        Period::Cretaceo => "#ff0800",
        Period::Jurassico => "#5cb85c",
        Period::Triassico => "#5bc0de",
        Period::Cambriano => "#8D6F3B",
        Period::Ordoviciano => "#A7A6A8",
        Period::Siluriano => "#C1D18A",
        Period::Devoniano => "#D78B2E",
        Period::Carbonifero => "#4D887C",
        Period::Permiano => "#A22225",
        Period::Paleogeno => "#ffe600",
        Period::Neogeno => "#ff00c8ff",
        Period::Quaternario => "#ff006f",
        Period::Other => DEFAULT_PERIOD_COLOR,
    }
}

/// Circle-marker options, serialized with the field names the map surface
/// expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke: bool,
    pub color: String,
    pub weight: f64,
}

impl MarkerStyle {
    pub fn occurrence(period: Period) -> Self {
        Self {
            radius: 6.0,
            fill_color: period_color(period).to_string(),
            fill_opacity: 0.8,
            stroke: true,
            color: "white".to_string(),
            weight: 1.5,
        }
    }

    pub fn comparison_highlight() -> Self {
        Self {
            radius: 8.0,
            fill_color: COMPARISON_COLOR.to_string(),
            fill_opacity: 0.7,
            stroke: true,
            color: COMPARISON_COLOR.to_string(),
            weight: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub dash_array: Option<String>,
}

impl LineStyle {
    pub fn distance() -> Self {
        Self {
            color: COMPARISON_COLOR.to_string(),
            weight: 3.0,
            dash_array: Some("5, 10".to_string()),
        }
    }
}
