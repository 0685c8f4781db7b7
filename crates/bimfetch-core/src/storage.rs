//! Directory-backed model store.
//!
//! Implements both loader capabilities by writing each ingested model to
//! `<dir>/<name>.<ext>`. Writes go to a per-ingest `.part` temp file first
//! and are renamed into place, so a partially written model never carries the
//! final name. Concurrent ingests of the same name each get their own temp
//! file; the last rename wins and its record replaces the earlier one.

use crate::checksum::sha256_hex;
use crate::loader::{FragmentsIngest, IfcIngest, IngestError};
use crate::model::ModelFormat;
use crate::url_model::{sanitize_file_stem, DEFAULT_MODEL_NAME};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file of ingest `seq`: `a.ifc` → `a.ifc.<seq>.part`.
pub fn temp_path(final_path: &Path, seq: u64) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(format!(".{}{}", seq, TEMP_SUFFIX));
    PathBuf::from(o)
}

/// One model held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredModel {
    pub name: String,
    pub format: ModelFormat,
    pub path: PathBuf,
    pub size: u64,
    pub sha256: String,
}

/// Model registry persisted as plain files in one directory.
#[derive(Debug)]
pub struct ModelStore {
    dir: PathBuf,
    models: Mutex<Vec<StoredModel>>,
    next_temp: AtomicU64,
    /// Serializes rename + registry update so the registry matches the file on disk.
    commit: tokio::sync::Mutex<()>,
}

impl ModelStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create model dir {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            models: Mutex::new(Vec::new()),
            next_temp: AtomicU64::new(0),
            commit: tokio::sync::Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot of the registry in ingestion order.
    pub fn models(&self) -> Vec<StoredModel> {
        self.registry().clone()
    }

    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }

    /// Final path a model with this name and format is written to.
    pub fn path_for(&self, name: &str, format: ModelFormat) -> PathBuf {
        let stem = sanitize_file_stem(name);
        let stem = if stem.is_empty() { DEFAULT_MODEL_NAME } else { stem.as_str() };
        self.dir.join(format!("{}.{}", stem, format.extension()))
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, Vec<StoredModel>> {
        self.models.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn store(&self, bytes: Vec<u8>, format: ModelFormat, name: &str) -> Result<(), IngestError> {
        if bytes.is_empty() {
            return Err(format!("empty {} payload for model {}", format, name).into());
        }

        let final_path = self.path_for(name, format);
        let tp = temp_path(&final_path, self.next_temp.fetch_add(1, Ordering::Relaxed));
        if let Err(e) = tokio::fs::write(&tp, &bytes).await {
            let _ = tokio::fs::remove_file(&tp).await;
            return Err(e.into());
        }

        let _commit = self.commit.lock().await;
        if let Err(e) = tokio::fs::rename(&tp, &final_path).await {
            let _ = tokio::fs::remove_file(&tp).await;
            return Err(e.into());
        }

        let record = StoredModel {
            name: name.to_string(),
            format,
            path: final_path,
            size: bytes.len() as u64,
            sha256: sha256_hex(&bytes),
        };
        tracing::debug!(path = %record.path.display(), size = record.size, "stored model {}", name);

        let mut registry = self.registry();
        if let Some(existing) = registry.iter_mut().find(|m| m.path == record.path) {
            tracing::warn!("model {} replaced {}", name, existing.path.display());
            *existing = record;
        } else {
            registry.push(record);
        }
        Ok(())
    }
}

#[async_trait]
impl IfcIngest for ModelStore {
    async fn load(
        &self,
        bytes: Vec<u8>,
        _build_spatial_structure: bool,
        name: &str,
    ) -> Result<(), IngestError> {
        self.store(bytes, ModelFormat::Ifc, name).await
    }
}

#[async_trait]
impl FragmentsIngest for ModelStore {
    async fn load(&self, bytes: Vec<u8>, model_id: &str) -> Result<(), IngestError> {
        self.store(bytes, ModelFormat::Fragments, model_id).await
    }
}
