//! Model descriptors: which file to fetch and which loader receives it.

use crate::error::DescriptorError;
use crate::url_model::model_name_from_url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// File format of a model, selecting the loader that ingests its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFormat {
    #[serde(rename = "ifc")]
    Ifc,
    #[serde(rename = "frag")]
    Fragments,
}

impl ModelFormat {
    /// Infers the format from a URL: `.frag` (any case) is Fragments, anything else is IFC.
    pub fn infer_from_url(url: &str) -> Self {
        if ends_with_ignore_ascii_case(url, ".frag") {
            ModelFormat::Fragments
        } else {
            ModelFormat::Ifc
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ModelFormat::Ifc => "ifc",
            ModelFormat::Fragments => "frag",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One model to load: `{url, type, name?}`.
///
/// Immutable once built. The display name is resolved lazily at load time
/// (see [`ModelDescriptor::effective_name`]), never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct ModelDescriptor {
    url: String,
    #[serde(rename = "type")]
    format: ModelFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ModelDescriptor {
    pub fn new(url: impl Into<String>, format: ModelFormat) -> Result<Self, DescriptorError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DescriptorError::EmptyUrl);
        }
        Ok(Self {
            url,
            format,
            name: None,
        })
    }

    /// Attaches an explicit display name. Empty names are treated as absent.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn format(&self) -> ModelFormat {
        self.format
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Explicit name if set, otherwise the name derived from the URL.
    pub fn effective_name(&self) -> String {
        effective_name(&self.url, self.name.as_deref())
    }
}

/// Supplied name if non-empty, otherwise [`model_name_from_url`].
pub(crate) fn effective_name(url: &str, name: Option<&str>) -> String {
    match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => model_name_from_url(url),
    }
}

/// Unvalidated config entry shape.
#[derive(Deserialize)]
struct RawDescriptor {
    url: String,
    #[serde(rename = "type")]
    format: ModelFormat,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawDescriptor> for ModelDescriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        let desc = ModelDescriptor::new(raw.url, raw.format)?;
        Ok(match raw.name {
            Some(name) => desc.with_name(name),
            None => desc,
        })
    }
}

pub(crate) fn ends_with_ignore_ascii_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
