//! Recording test doubles for the two loader capabilities.

use async_trait::async_trait;
use bimfetch_core::{FragmentsIngest, IfcIngest, IngestError};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfcCall {
    pub name: String,
    pub build_spatial_structure: bool,
    pub bytes: Vec<u8>,
}

/// IFC loader that records every accepted model. Payloads equal to
/// `reject` are refused with an error.
#[derive(Default)]
pub struct RecordingIfc {
    pub calls: Mutex<Vec<IfcCall>>,
    pub reject: Option<Vec<u8>>,
}

impl RecordingIfc {
    pub fn rejecting(payload: &[u8]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject: Some(payload.to_vec()),
        }
    }

    pub fn registry_len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.name.clone()).collect()
    }
}

#[async_trait]
impl IfcIngest for RecordingIfc {
    async fn load(
        &self,
        bytes: Vec<u8>,
        build_spatial_structure: bool,
        name: &str,
    ) -> Result<(), IngestError> {
        if self.reject.as_deref() == Some(bytes.as_slice()) {
            return Err(format!("unsupported IFC schema in {}", name).into());
        }
        self.calls.lock().unwrap().push(IfcCall {
            name: name.to_string(),
            build_spatial_structure,
            bytes,
        });
        Ok(())
    }
}

/// Fragments loader that records `(model_id, bytes)`.
#[derive(Default)]
pub struct RecordingFragments {
    pub calls: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingFragments {
    pub fn registry_len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }
}

#[async_trait]
impl FragmentsIngest for RecordingFragments {
    async fn load(&self, bytes: Vec<u8>, model_id: &str) -> Result<(), IngestError> {
        self.calls.lock().unwrap().push((model_id.to_string(), bytes));
        Ok(())
    }
}
