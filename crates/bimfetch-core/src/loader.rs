//! Capability traits for the externally owned model loaders.
//!
//! The geometry engine owns both services. This crate only receives shared
//! references and calls their ingestion entry points; it never constructs,
//! stores, or tears them down.

use async_trait::async_trait;

/// Error reported by a loader when it rejects a model.
pub type IngestError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// IFC ingestion service.
#[async_trait]
pub trait IfcIngest: Send + Sync {
    /// Parses and registers an IFC model.
    ///
    /// `build_spatial_structure` asks the loader to build the spatial tree
    /// eagerly instead of on first use.
    async fn load(
        &self,
        bytes: Vec<u8>,
        build_spatial_structure: bool,
        name: &str,
    ) -> Result<(), IngestError>;
}

/// Fragments ingestion service; `model_id` is the key the model is registered under.
#[async_trait]
pub trait FragmentsIngest: Send + Sync {
    async fn load(&self, bytes: Vec<u8>, model_id: &str) -> Result<(), IngestError>;
}
