use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error(transparent)]
    Decode(#[from] formats::DecodeError),

    #[error("the dataset contains no occurrences")]
    EmptyDataset,

    #[error("no boundary geometry for country {0}")]
    MissingGeometryForCountry(String),

    #[error("no species selected")]
    NoOccurrencesInBasket,

    #[error("invalid explorer config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl ExplorerError {
    /// Startup failures replace the whole page. Everything else is reported
    /// for the operation only.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExplorerError::FetchFailure { .. }
                | ExplorerError::Decode(_)
                | ExplorerError::EmptyDataset
                | ExplorerError::InvalidConfig(_)
        )
    }
}
