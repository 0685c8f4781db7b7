//! Subcommand implementations.

use super::SessionArgs;
use anyhow::{Context, Result};
use bimfetch_core::checksum::sha256_path;
use bimfetch_core::config::{self, ViewerConfig};
use bimfetch_core::fetch::CurlFetcher;
use bimfetch_core::query::query_from_page_url;
use bimfetch_core::storage::{ModelStore, StoredModel};
use bimfetch_core::{load_models, model_name_from_url, resolve_models, ModelDescriptor};
use std::path::Path;

/// Config from `--config`, else the XDG default (created on first run).
pub(super) fn load_config(session: &SessionArgs) -> Result<ViewerConfig> {
    let cfg = match &session.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

/// Query string from `--query` or `--page-url`; empty when neither is given.
pub(super) fn session_query(session: &SessionArgs) -> String {
    match (&session.query, &session.page_url) {
        (Some(q), _) => q.clone(),
        (None, Some(page)) => query_from_page_url(page),
        (None, None) => String::new(),
    }
}

pub(super) fn resolve_session(session: &SessionArgs) -> Result<Vec<ModelDescriptor>> {
    let cfg = load_config(session)?;
    let models = resolve_models(&cfg, &session_query(session));
    tracing::debug!("resolved {} models", models.len());
    Ok(models)
}

pub(super) fn run_resolve(session: &SessionArgs, json: bool) -> Result<()> {
    let models = resolve_session(session)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }
    for m in &models {
        println!("{}\t{}\t{}", m.format(), m.effective_name(), m.url());
    }
    Ok(())
}

pub(super) async fn run_fetch(session: &SessionArgs, out: &Path, base_url: Option<&str>) -> Result<()> {
    let cfg = load_config(session)?;
    let models = resolve_models(&cfg, &session_query(session));
    if models.is_empty() {
        println!("no models to load");
        return Ok(());
    }

    let mut fetch_cfg = cfg.fetch_config();
    if let Some(base) = base_url {
        fetch_cfg.base_url = Some(base.to_string());
    }
    let fetcher = CurlFetcher::from_config(&fetch_cfg)?;
    let store = ModelStore::open(out)?;

    let result = load_models(&models, &fetcher, &store, &store).await;

    for m in store.models() {
        verify_stored(&m)?;
        println!(
            "{}\t{}\t{} bytes\t{}\t{}",
            m.format,
            m.name,
            m.size,
            m.sha256,
            m.path.display()
        );
    }

    let count = result.with_context(|| {
        format!(
            "{} of {} models stored in {}",
            store.len(),
            models.len(),
            store.dir().display()
        )
    })?;
    println!("loaded {} models into {}", count, store.dir().display());
    Ok(())
}

/// Re-hashes a stored file and checks it against the digest taken at ingest.
pub(super) fn verify_stored(model: &StoredModel) -> Result<()> {
    let on_disk = sha256_path(&model.path)?;
    if on_disk != model.sha256 {
        anyhow::bail!(
            "checksum mismatch for {}: stored {} but file has {}",
            model.path.display(),
            model.sha256,
            on_disk
        );
    }
    Ok(())
}

pub(super) fn run_name(url: &str) {
    println!("{}", model_name_from_url(url));
}
