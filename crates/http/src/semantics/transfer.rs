//! Token matching for comma-separated list fields (`Transfer-Encoding`,
//! `Connection`, `Proxy-Connection`).

/// True if `list` contains `token` as a whole comma-delimited element,
/// compared case-insensitively with surrounding whitespace ignored. A token
/// embedded in a longer element (`chunked-ish`) never matches.
pub(crate) fn has_token(list: &str, token: &str) -> bool {
    list.split(',').any(|element| element.trim().eq_ignore_ascii_case(token))
}
