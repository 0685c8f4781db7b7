//! Last path segment of a model URL.

/// Returns the last `/`-separated segment of the URL path.
///
/// Absolute URLs are parsed so query and fragment are excluded. Anything the
/// `url` crate rejects (relative paths, bare file names, garbage) is split on
/// `/` as-is. A trailing slash yields an empty segment.
pub fn last_path_segment(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => last_piece(parsed.path()).to_string(),
        Err(_) => last_piece(url).to_string(),
    }
}

fn last_piece(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or("")
}
