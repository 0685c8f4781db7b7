//! libcurl-backed [`HttpFetch`].

use super::{parse_status_line, status_text, HttpFetch};
use crate::config::FetchConfig;
use crate::error::ModelLoadError;
use anyhow::Context;
use async_trait::async_trait;
use std::str;
use std::time::Duration;
use url::Url;

/// GETs model files with libcurl on tokio's blocking pool.
///
/// Follows redirects. With no timeouts configured a stalled server stalls the
/// caller; set `timeout_secs` in `[fetch]` to bound it.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl CurlFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &FetchConfig) -> anyhow::Result<Self> {
        let base_url = cfg
            .base_url
            .as_deref()
            .map(|u| Url::parse(u).with_context(|| format!("invalid base_url {}", u)))
            .transpose()?;
        Ok(Self {
            base_url,
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Base URL relative model URLs are joined onto.
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL to request, joining relative URLs onto the base.
    pub fn resolve_url(&self, url: &str) -> Result<Url, ModelLoadError> {
        let parsed = match (Url::parse(url), &self.base_url) {
            (Ok(u), _) => Ok(u),
            (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => base.join(url),
            (Err(e), _) => Err(e),
        };
        parsed.map_err(|e| ModelLoadError::NetworkFailure {
            url: url.to_string(),
            source: Box::new(e),
        })
    }
}

#[async_trait]
impl HttpFetch for CurlFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ModelLoadError> {
        let target = self.resolve_url(url)?;
        let original = url.to_string();
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.get_blocking(&original, target.as_str()))
            .await
            .map_err(|e| ModelLoadError::NetworkFailure {
                url: url.to_string(),
                source: Box::new(e),
            })?
    }
}

impl CurlFetcher {
    /// Performs the GET on the current thread. `url` is the caller's URL, used in errors.
    fn get_blocking(&self, url: &str, target: &str) -> Result<Vec<u8>, ModelLoadError> {
        let network = |e: curl::Error| ModelLoadError::NetworkFailure {
            url: url.to_string(),
            source: Box::new(e),
        };

        let mut body: Vec<u8> = Vec::new();
        let mut status_reason: Option<String> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(target).map_err(network)?;
        easy.follow_location(true).map_err(network)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t).map_err(network)?;
        }
        if let Some(t) = self.timeout {
            easy.timeout(t).map_err(network)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    // Redirects produce several status lines; the last one wins.
                    if let Ok(line) = str::from_utf8(data) {
                        if let Some((_, reason)) = parse_status_line(line) {
                            status_reason = reason;
                        }
                    }
                    true
                })
                .map_err(network)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(network)?;
            transfer.perform().map_err(network)?;
        }

        // Non-HTTP schemes (file://) report 0.
        let code = easy.response_code().map_err(network)?;
        if code != 0 && !(200..300).contains(&code) {
            return Err(ModelLoadError::InvalidResponse {
                url: url.to_string(),
                status: code,
                status_text: status_text(code, status_reason.as_deref()),
            });
        }

        Ok(body)
    }
}
