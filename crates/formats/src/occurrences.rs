use foundation::math::LatLng;
use foundation::time::AgeSpan;
use scene::{Occurrence, Period, UNIDENTIFIED_GENUS};
use serde::Deserialize;

use crate::error::DecodeError;

/// Family values the dataset uses to mean "no family".
pub const FAMILY_SENTINELS: [&str; 3] = ["Não definido", "Não catalogada", "NO_FAMILY_SPECIFIED"];

/// Top-level dataset response.
#[derive(Debug, Deserialize)]
pub struct OccurrencePayload {
    pub dados_processados: Vec<OccurrenceRecord>,
}

/// Ages arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AgeValue {
    Number(f64),
    Text(String),
}

impl AgeValue {
    fn to_ma(&self) -> Option<f64> {
        let v = match self {
            AgeValue::Number(n) => *n,
            AgeValue::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OccurrenceRecord {
    #[serde(rename = "genero", default)]
    pub genus: String,
    #[serde(rename = "especie", default)]
    pub species: Option<String>,
    #[serde(rename = "familia", default)]
    pub family: Option<String>,
    #[serde(rename = "formacao", default)]
    pub formation: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "inicio")]
    pub start: AgeValue,
    #[serde(rename = "fim")]
    pub end: AgeValue,
    #[serde(rename = "periodo", default)]
    pub period: Option<String>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl OccurrenceRecord {
    pub fn into_occurrence(self, index: usize) -> Result<Occurrence, DecodeError> {
        let invalid = |reason: &str| DecodeError::InvalidOccurrence {
            index,
            reason: reason.to_string(),
        };
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(invalid("non-finite coordinates"));
        }
        let start = self.start.to_ma().ok_or_else(|| invalid("unreadable start age"))?;
        let end = self.end.to_ma().ok_or_else(|| invalid("unreadable end age"))?;

        let genus = match self.genus.trim() {
            "" => UNIDENTIFIED_GENUS.to_string(),
            g => g.to_string(),
        };
        let family =
            non_empty(self.family).filter(|f| !FAMILY_SENTINELS.contains(&f.as_str()));

        Ok(Occurrence {
            genus,
            species: non_empty(self.species),
            family,
            formation: non_empty(self.formation).unwrap_or_default(),
            period: self
                .period
                .as_deref()
                .map(Period::from_key)
                .unwrap_or(Period::Other),
            age: AgeSpan::new(start, end),
            position: LatLng::new(self.lat, self.lng),
            image_url: non_empty(self.image),
        })
    }
}

/// Decodes the `{ "dados_processados": [...] }` response body.
pub fn decode_occurrences(payload: &str) -> Result<Vec<Occurrence>, DecodeError> {
    let payload: OccurrencePayload = serde_json::from_str(payload)?;
    payload
        .dados_processados
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_occurrence(index))
        .collect()
}
