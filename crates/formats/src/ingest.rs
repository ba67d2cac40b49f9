use scene::DataStore;
use tracing::info;

use crate::countries::decode_countries;
use crate::error::DecodeError;
use crate::occurrences::decode_occurrences;

/// Builds the read-only store from the two startup response bodies.
pub fn ingest_store(dataset_body: &str, countries_body: &str) -> Result<DataStore, DecodeError> {
    let occurrences = decode_occurrences(dataset_body)?;
    let countries = decode_countries(countries_body)?;
    info!(
        occurrences = occurrences.len(),
        countries = countries.len(),
        "decoded startup payloads"
    );
    Ok(DataStore::new(occurrences, countries))
}
