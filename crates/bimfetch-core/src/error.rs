//! Error taxonomy for descriptor construction and model loading.

use thiserror::Error;

/// Boxed source error carried by transport and ingestion failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Rejected descriptor input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("model url must not be empty")]
    EmptyUrl,
}

/// Failure while fetching or ingesting a model.
///
/// Every variant is logged once where it is detected and then returned to the
/// caller unchanged; nothing in this crate retries or recovers.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The server answered with a non-2xx status.
    #[error("failed to fetch model {url}: {status_text}")]
    InvalidResponse {
        url: String,
        status: u32,
        status_text: String,
    },

    /// The transfer itself failed (DNS, connect, reset, bad URL).
    #[error("network failure fetching {url}")]
    NetworkFailure {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The external loader rejected the bytes.
    #[error("loader rejected model {url}")]
    IngestionFailure {
        url: String,
        #[source]
        source: BoxError,
    },

    /// First failure seen during a batch load. Later failures are not aggregated.
    #[error("batch load failed")]
    BatchFailure(#[source] Box<ModelLoadError>),
}

impl ModelLoadError {
    /// URL of the model that failed.
    pub fn url(&self) -> &str {
        match self {
            ModelLoadError::InvalidResponse { url, .. }
            | ModelLoadError::NetworkFailure { url, .. }
            | ModelLoadError::IngestionFailure { url, .. } => url,
            ModelLoadError::BatchFailure(inner) => inner.url(),
        }
    }

    /// The underlying per-model error, unwrapping `BatchFailure`.
    pub fn root_cause(&self) -> &ModelLoadError {
        match self {
            ModelLoadError::BatchFailure(inner) => inner.root_cause(),
            other => other,
        }
    }
}
