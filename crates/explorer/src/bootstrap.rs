use formats::ingest_store;
use scene::DataStore;
use tracing::info;

use crate::error::ExplorerError;

/// Builds the store from the two startup response bodies. An empty dataset is
/// a startup failure.
pub fn build_store(dataset_body: &str, countries_body: &str) -> Result<DataStore, ExplorerError> {
    let store = ingest_store(dataset_body, countries_body)?;
    if store.is_empty() {
        return Err(ExplorerError::EmptyDataset);
    }
    info!(
        occurrences = store.len(),
        families = store.families().len(),
        "occurrence store ready"
    );
    Ok(store)
}

/// Text shown in place of the page when startup fails.
pub fn fatal_message(err: &ExplorerError) -> String {
    format!("Could not load the fossil map: {err}")
}
