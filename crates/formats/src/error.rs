use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    #[error("invalid occurrence at index {index}: {reason}")]
    InvalidOccurrence { index: usize, reason: String },
}
