//! Fetch-and-ingest of single models and concurrent batches.
//!
//! A batch dispatches every model at once on the calling task and drives all
//! of them to completion. The first failure (in completion order) is what the
//! caller sees, but siblings keep running: a failed batch may still have
//! registered some models with the loaders, and nothing is rolled back.

use crate::error::ModelLoadError;
use crate::fetch::HttpFetch;
use crate::loader::{FragmentsIngest, IfcIngest};
use crate::model::{effective_name, ModelDescriptor, ModelFormat};
use futures::stream::{FuturesUnordered, StreamExt};

/// Fetches an IFC model and hands it to the IFC loader with eager spatial structure.
pub async fn load_ifc_from_url(
    fetch: &dyn HttpFetch,
    ifc: &dyn IfcIngest,
    url: &str,
    name: Option<&str>,
) -> Result<(), ModelLoadError> {
    let result = async {
        let bytes = fetch.get(url).await?;
        let name = effective_name(url, name);
        ifc.load(bytes, true, &name)
            .await
            .map_err(|source| ModelLoadError::IngestionFailure {
                url: url.to_string(),
                source,
            })?;
        Ok::<_, ModelLoadError>(name)
    }
    .await;
    report(ModelFormat::Ifc, url, result)
}

/// Fetches a Fragments model and registers it under its effective name.
pub async fn load_fragments_from_url(
    fetch: &dyn HttpFetch,
    fragments: &dyn FragmentsIngest,
    url: &str,
    name: Option<&str>,
) -> Result<(), ModelLoadError> {
    let result = async {
        let bytes = fetch.get(url).await?;
        let name = effective_name(url, name);
        fragments
            .load(bytes, &name)
            .await
            .map_err(|source| ModelLoadError::IngestionFailure {
                url: url.to_string(),
                source,
            })?;
        Ok::<_, ModelLoadError>(name)
    }
    .await;
    report(ModelFormat::Fragments, url, result)
}

/// Loads one descriptor with the loader matching its format.
pub async fn load_one_model(
    model: &ModelDescriptor,
    fetch: &dyn HttpFetch,
    ifc: &dyn IfcIngest,
    fragments: &dyn FragmentsIngest,
) -> Result<(), ModelLoadError> {
    match model.format() {
        ModelFormat::Ifc => load_ifc_from_url(fetch, ifc, model.url(), model.name()).await,
        ModelFormat::Fragments => {
            load_fragments_from_url(fetch, fragments, model.url(), model.name()).await
        }
    }
}

/// Loads all descriptors concurrently and returns how many were loaded.
///
/// Every load is started before any is awaited and all are driven to
/// completion, even after a failure. On failure the first error to complete
/// is returned as `BatchFailure`; loads that succeeded stay registered.
pub async fn load_models(
    models: &[ModelDescriptor],
    fetch: &dyn HttpFetch,
    ifc: &dyn IfcIngest,
    fragments: &dyn FragmentsIngest,
) -> Result<usize, ModelLoadError> {
    let mut pending: FuturesUnordered<_> = models
        .iter()
        .map(|model| load_one_model(model, fetch, ifc, fragments))
        .collect();

    let mut first_error: Option<ModelLoadError> = None;
    let mut failed = 0usize;
    while let Some(result) = pending.next().await {
        if let Err(e) = result {
            failed += 1;
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    match first_error {
        Some(e) => {
            tracing::debug!(
                total = models.len(),
                failed,
                "batch load failed, first failure: {}",
                e.url()
            );
            Err(ModelLoadError::BatchFailure(Box::new(e)))
        }
        None => {
            tracing::info!(count = models.len(), "all models loaded: {}", models.len());
            Ok(models.len())
        }
    }
}

/// Emits the per-model record: info on success, error on failure.
fn report(
    format: ModelFormat,
    url: &str,
    result: Result<String, ModelLoadError>,
) -> Result<(), ModelLoadError> {
    match result {
        Ok(name) => {
            tracing::info!(%format, %url, %name, "model loaded: {} from {}", name, url);
            Ok(())
        }
        Err(e) => {
            tracing::error!(%format, %url, "failed to load model from {}: {}", url, DisplayChain(&e));
            Err(e)
        }
    }
}

/// Formats an error with its source chain, `a: b: c`.
struct DisplayChain<'a>(&'a (dyn std::error::Error + 'static));

impl std::fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(s) = source {
            write!(f, ": {}", s)?;
            source = s.source();
        }
        Ok(())
    }
}
