//! Model lists from page query strings.
//!
//! Three parameters are recognized, read in this order and concatenated:
//!
//! - `model=<csv>`: format inferred per URL (`.frag` → Fragments, else IFC)
//! - `ifc=<csv>`: every URL loaded as IFC
//! - `frag=<csv>`: every URL loaded as Fragments
//!
//! Example: `?model=a.ifc,b.frag&ifc=c.ifc`.

use crate::model::{ModelDescriptor, ModelFormat};
use url::form_urlencoded;

/// How a query parameter assigns formats to its URLs.
#[derive(Debug, Clone, Copy)]
enum FormatRule {
    Infer,
    Force(ModelFormat),
}

/// Parameter order determines load order across sources.
const PARAMS: [(&str, FormatRule); 3] = [
    ("model", FormatRule::Infer),
    ("ifc", FormatRule::Force(ModelFormat::Ifc)),
    ("frag", FormatRule::Force(ModelFormat::Fragments)),
];

/// Parses model descriptors from a query string (with or without leading `?`).
///
/// Absent or empty parameters contribute nothing. Tokens are trimmed and empty
/// tokens skipped. URLs are not validated here; a bad URL fails when fetched.
/// Duplicates are kept.
pub fn parse_models_from_query_string(query: &str) -> Vec<ModelDescriptor> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut models = Vec::new();

    for (param, rule) in PARAMS {
        let Some(value) = first_param(query, param) else {
            continue;
        };
        for token in value.split(',').map(str::trim) {
            let format = match rule {
                FormatRule::Infer => ModelFormat::infer_from_url(token),
                FormatRule::Force(format) => format,
            };
            // Only empty tokens are rejected.
            if let Ok(desc) = ModelDescriptor::new(token, format) {
                models.push(desc);
            }
        }
    }

    models
}

/// Query component of a full page URL, or `""` when absent or unparseable.
pub fn query_from_page_url(page_url: &str) -> String {
    url::Url::parse(page_url)
        .ok()
        .and_then(|u| u.query().map(str::to_string))
        .unwrap_or_default()
}

/// Decoded value of the first occurrence of `name`, like `URLSearchParams.get`.
fn first_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(models: &[ModelDescriptor]) -> Vec<(&str, ModelFormat)> {
        models.iter().map(|m| (m.url(), m.format())).collect()
    }

    #[test]
    fn model_param_infers_format_in_order() {
        let models = parse_models_from_query_string("model=a.ifc,b.frag");
        assert_eq!(
            pairs(&models),
            vec![("a.ifc", ModelFormat::Ifc), ("b.frag", ModelFormat::Fragments)]
        );
        assert!(models.iter().all(|m| m.name().is_none()));
    }

    #[test]
    fn ifc_param_forces_ifc() {
        let models = parse_models_from_query_string("ifc=x.frag");
        assert_eq!(pairs(&models), vec![("x.frag", ModelFormat::Ifc)]);
    }

    #[test]
    fn frag_param_forces_fragments() {
        let models = parse_models_from_query_string("frag=x.ifc,y");
        assert_eq!(
            pairs(&models),
            vec![("x.ifc", ModelFormat::Fragments), ("y", ModelFormat::Fragments)]
        );
    }

    #[test]
    fn sources_concatenate_model_then_ifc_then_frag() {
        let models = parse_models_from_query_string("?frag=f.frag&ifc=i.ifc&model=m.FRAG");
        assert_eq!(
            pairs(&models),
            vec![
                ("m.FRAG", ModelFormat::Fragments),
                ("i.ifc", ModelFormat::Ifc),
                ("f.frag", ModelFormat::Fragments),
            ]
        );
    }

    #[test]
    fn tokens_are_trimmed_and_decoded() {
        let models = parse_models_from_query_string(
            "model=%20https%3A%2F%2Fx.com%2Fa.ifc%20,+b.frag",
        );
        assert_eq!(
            pairs(&models),
            vec![
                ("https://x.com/a.ifc", ModelFormat::Ifc),
                ("b.frag", ModelFormat::Fragments)
            ]
        );
    }

    #[test]
    fn absent_or_empty_params_contribute_nothing() {
        assert!(parse_models_from_query_string("").is_empty());
        assert!(parse_models_from_query_string("?").is_empty());
        assert!(parse_models_from_query_string("view=3d&model=").is_empty());
        assert!(parse_models_from_query_string("model=,, ,").is_empty());
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let models = parse_models_from_query_string("ifc=a.ifc,,b.ifc,");
        assert_eq!(
            pairs(&models),
            vec![("a.ifc", ModelFormat::Ifc), ("b.ifc", ModelFormat::Ifc)]
        );
    }

    #[test]
    fn first_occurrence_wins() {
        let models = parse_models_from_query_string("ifc=a.ifc&ifc=b.ifc");
        assert_eq!(pairs(&models), vec![("a.ifc", ModelFormat::Ifc)]);
    }

    #[test]
    fn duplicates_and_malformed_urls_are_kept() {
        let models = parse_models_from_query_string("model=a.ifc&ifc=a.ifc,ht!tp::bad");
        assert_eq!(
            pairs(&models),
            vec![
                ("a.ifc", ModelFormat::Ifc),
                ("a.ifc", ModelFormat::Ifc),
                ("ht!tp::bad", ModelFormat::Ifc),
            ]
        );
    }

    #[test]
    fn query_from_page_url_extracts_search() {
        assert_eq!(
            query_from_page_url("https://viewer.example.com/?model=a.ifc&frag=b.frag"),
            "model=a.ifc&frag=b.frag"
        );
        assert_eq!(query_from_page_url("https://viewer.example.com/"), "");
        assert_eq!(query_from_page_url("not a url"), "");
    }
}
