//! HTTP status line parsing.

/// Parses `HTTP/1.1 404 Not Found` into `(404, Some("Not Found"))`.
///
/// Returns `None` for lines that are not status lines (ordinary headers).
/// HTTP/2 status lines carry no reason phrase.
pub fn parse_status_line(line: &str) -> Option<(u32, Option<String>)> {
    let line = line.trim_end();
    let rest = line.strip_prefix("HTTP/")?;
    let mut parts = rest.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.parse::<u32>().ok()?;
    let reason = parts
        .next()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    Some((code, reason))
}
