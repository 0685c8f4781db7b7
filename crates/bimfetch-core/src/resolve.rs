//! Final model list for a viewer session: static config merged with the query string.

use crate::config::ViewerConfig;
use crate::model::ModelDescriptor;
use crate::query::parse_models_from_query_string;

/// Resolves the ordered list of models to load.
///
/// - `auto_load_initial_models = false`: config models never contribute.
/// - `url_params_override_config = true` and the query names at least one
///   model: query models only.
/// - Otherwise: config models (if auto-load) followed by query models.
///
/// Pure function of its inputs; order is preserved and nothing is deduplicated.
pub fn resolve_models(config: &ViewerConfig, query: &str) -> Vec<ModelDescriptor> {
    let from_query = parse_models_from_query_string(query);

    if config.url_params_override_config && !from_query.is_empty() {
        return from_query;
    }

    let mut models = Vec::with_capacity(config.initial_models.len() + from_query.len());
    if config.auto_load_initial_models {
        models.extend(config.initial_models.iter().cloned());
    }
    models.extend(from_query);
    models
}
