//! Model naming from URLs.
//!
//! Derives the display name a model gets when its descriptor carries none,
//! and sanitizes names for use as file stems in the model store.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_file_stem;

use crate::model::ends_with_ignore_ascii_case;

/// Name used when the URL yields nothing usable.
pub const DEFAULT_MODEL_NAME: &str = "model";

/// Extensions stripped from the last path segment.
const MODEL_EXTENSIONS: [&str; 2] = [".ifc", ".frag"];

/// Derives a display name for a model URL.
///
/// Takes the last path segment (parsed URL, or naive `/` split when the
/// string is not an absolute URL) and strips one trailing `.ifc` or `.frag`
/// in any case. Never fails; falls back to `"model"` when nothing is left.
///
/// # Examples
///
/// - `model_name_from_url("https://x.com/models/Edificio.ifc")` → `"Edificio"`
/// - `model_name_from_url("/models/estructura.FRAG")` → `"estructura"`
/// - `model_name_from_url("https://x.com/")` → `"model"`
pub fn model_name_from_url(url: &str) -> String {
    let segment = last_path_segment(url);
    let stem = strip_model_extension(&segment);
    if stem.is_empty() {
        DEFAULT_MODEL_NAME.to_string()
    } else {
        stem.to_string()
    }
}

fn strip_model_extension(segment: &str) -> &str {
    for ext in MODEL_EXTENSIONS {
        if ends_with_ignore_ascii_case(segment, ext) {
            return &segment[..segment.len() - ext.len()];
        }
    }
    segment
}
