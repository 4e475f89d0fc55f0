//! Content metadata fields: `Content-Type` and `Content-Length`.

use indexmap::IndexMap;

use crate::protocol::SyntaxError;

/// A parsed `Content-Type` value.
///
/// The value splits on `;`: the first segment is `main/sub` (the subtype
/// may be missing entirely), the rest are `key=value` parameters kept in
/// header order. All tokens are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub main_type: String,
    pub sub_type: Option<String>,
    pub parameters: IndexMap<String, String>,
}

impl MediaType {
    /// The `main/sub` form, or just the main type when no subtype exists.
    pub fn essence(&self) -> String {
        match &self.sub_type {
            Some(sub) => format!("{}/{}", self.main_type, sub),
            None => self.main_type.clone(),
        }
    }
}

/// Splits a `Content-Type` value. Never fails: a parameter without `=`
/// keeps its trimmed text as the key with an empty value.
pub(crate) fn parse_media_type(value: &str) -> MediaType {
    let mut segments = value.split(';');
    let type_token = segments.next().unwrap_or_default();

    let (main_type, sub_type) = match type_token.split_once('/') {
        Some((main, sub)) => (main.trim().to_owned(), Some(sub.trim().to_owned())),
        None => (type_token.trim().to_owned(), None),
    };

    let mut parameters = IndexMap::new();
    for param in segments {
        let (key, param_value) = param.split_once('=').unwrap_or((param, ""));
        parameters.insert(key.trim().to_owned(), param_value.trim().to_owned());
    }

    MediaType { main_type, sub_type, parameters }
}

/// Composes `"<type>; k1=v1; k2=v2"` for storage.
pub(crate) fn format_media_type(media_type: &str, params: &[(&str, &str)]) -> String {
    let mut value = media_type.to_owned();
    for (key, param_value) in params {
        value.push_str("; ");
        value.push_str(key);
        value.push('=');
        value.push_str(param_value);
    }
    value
}

/// Extracts the leading digit run of a `Content-Length` value.
///
/// No digits at the front (after optional leading whitespace), or a run
/// that overflows `u64`, is a syntax error.
pub(crate) fn parse_content_length(value: &str) -> Result<u64, SyntaxError> {
    let trimmed = value.trim_start();
    let digits = &trimmed[..trimmed.bytes().take_while(|b| b.is_ascii_digit()).count()];
    if digits.is_empty() {
        return Err(SyntaxError::content_length(format!("no digits in '{value}'")));
    }
    digits.parse().map_err(|_| SyntaxError::content_length(format!("value '{value}' does not fit in u64")))
}
