//! HTTP GET of model files.
//!
//! [`HttpFetch`] is the seam the loaders fetch through; [`CurlFetcher`] is the
//! libcurl-backed implementation used outside tests.

mod curl_fetch;
mod status;

pub use curl_fetch::CurlFetcher;
pub use status::parse_status_line;

use crate::error::ModelLoadError;
use async_trait::async_trait;

/// Fetches the full body of a URL.
///
/// Implementations return `InvalidResponse` for non-2xx statuses and
/// `NetworkFailure` for transport errors. No retries.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ModelLoadError>;
}

/// Status text for an HTTP status: the server's reason phrase, or `HTTP <code>`.
pub(crate) fn status_text(code: u32, reason: Option<&str>) -> String {
    match reason.map(str::trim) {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => format!("HTTP {}", code),
    }
}
