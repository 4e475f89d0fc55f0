//! Typed views over the header store.
//!
//! [`SemanticHeaders`] is an extension trait over every
//! [`HeaderBearer`](crate::protocol::HeaderBearer): it parses and composes
//! the structurally complex fields — byte ranges, content metadata,
//! transfer/connection tokens, credentials — going exclusively through the
//! store's public contract. Parsing grammars live in the submodules; the
//! trait methods bind them to the concrete field names.
//!
//! Accessors for parseable fields return `Ok(None)` when the field is
//! absent and a [`SyntaxError`] when it is present but malformed; stored
//! values are never auto-corrected.

use indexmap::IndexMap;

use crate::protocol::{FieldValue, HeaderBearer, SyntaxError, ValidationError};

pub(crate) mod auth;
pub(crate) mod content;
pub mod form;
pub(crate) mod range;
pub(crate) mod transfer;

pub use content::MediaType;
pub use range::ByteRangeSpec;
pub use range::ContentRange;

const RANGE: &str = "range";
const CONTENT_LENGTH: &str = "content-length";
const CONTENT_RANGE: &str = "content-range";
const CONTENT_TYPE: &str = "content-type";
const TRANSFER_ENCODING: &str = "transfer-encoding";
const CONNECTION: &str = "connection";
const PROXY_CONNECTION: &str = "proxy-connection";
const AUTHORIZATION: &str = "authorization";
const PROXY_AUTHORIZATION: &str = "proxy-authorization";

/// Semantic accessors available on any header bearer.
pub trait SemanticHeaders: HeaderBearer {
    /// The parsed `Range` field, in field order.
    fn range(&self) -> Result<Option<Vec<ByteRangeSpec>>, SyntaxError> {
        match self.header(RANGE) {
            Some(value) => range::parse_byte_ranges(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Replaces the `Range` field with a single spec; `None` deletes it.
    ///
    /// A bounded spec with `first > last` is rejected before anything is
    /// stored. Negative positions cannot be expressed.
    fn set_range(&mut self, spec: Option<ByteRangeSpec>) -> Result<(), ValidationError> {
        let Some(spec) = spec else {
            self.delete_header(RANGE);
            return Ok(());
        };

        if let ByteRangeSpec::FromTo(first, last) = spec {
            if first > last {
                return Err(ValidationError::invalid_range_spec(format!(
                    "last-byte-pos {last} is less than first-byte-pos {first}"
                )));
            }
        }
        self.set_header(RANGE, Some(FieldValue::Scalar(format!("bytes={spec}"))))
    }

    /// Replaces the `Range` field from a signed length: positive `n`
    /// selects the first `n` bytes (`0-(n-1)`), negative `n` the last
    /// `|n|` bytes (`-|n|`). Zero selects nothing and is rejected.
    fn set_range_length(&mut self, n: i64) -> Result<(), ValidationError> {
        let spec = match n {
            1.. => ByteRangeSpec::FromTo(0, n.unsigned_abs() - 1),
            0 => return Err(ValidationError::invalid_range_spec("zero-length range selects nothing")),
            _ => ByteRangeSpec::Suffix(n.unsigned_abs()),
        };
        self.set_range(Some(spec))
    }

    /// The `Content-Length` field as an integer.
    fn content_length(&self) -> Result<Option<u64>, SyntaxError> {
        match self.header(CONTENT_LENGTH) {
            Some(value) => content::parse_content_length(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Stores a decimal `Content-Length`; `None` deletes the field.
    fn set_content_length(&mut self, length: Option<u64>) -> Result<(), ValidationError> {
        self.set_header(CONTENT_LENGTH, length.map(|n| FieldValue::Scalar(n.to_string())))
    }

    /// True when `Transfer-Encoding` lists the `chunked` token. Detection
    /// only; chunk framing happens in the transmission layer.
    fn is_chunked(&self) -> bool {
        self.header(TRANSFER_ENCODING).is_some_and(|value| transfer::has_token(&value, "chunked"))
    }

    /// The parsed `Content-Range` field.
    fn content_range(&self) -> Result<Option<ContentRange>, SyntaxError> {
        match self.header(CONTENT_RANGE) {
            Some(value) => range::parse_content_range(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Number of bytes the `Content-Range` span covers.
    fn range_length(&self) -> Result<Option<u64>, SyntaxError> {
        Ok(self.content_range()?.map(|range| range.length()))
    }

    /// The full parsed `Content-Type` value.
    fn media_type(&self) -> Option<MediaType> {
        self.header(CONTENT_TYPE).map(|value| content::parse_media_type(&value))
    }

    /// The `main/sub` form of the content type, without parameters.
    fn content_type(&self) -> Option<String> {
        self.media_type().map(|media| media.essence())
    }

    fn main_type(&self) -> Option<String> {
        self.media_type().map(|media| media.main_type)
    }

    fn sub_type(&self) -> Option<String> {
        self.media_type().and_then(|media| media.sub_type)
    }

    /// Content-type parameters in header order.
    fn type_params(&self) -> Option<IndexMap<String, String>> {
        self.media_type().map(|media| media.parameters)
    }

    /// Stores `"<type>; k1=v1; k2=v2"` as the `Content-Type` value.
    fn set_content_type(&mut self, media_type: &str, params: &[(&str, &str)]) -> Result<(), ValidationError> {
        self.set_header(CONTENT_TYPE, Some(FieldValue::Scalar(content::format_media_type(media_type, params))))
    }

    /// Stores basic-auth credentials under `Authorization`.
    fn basic_auth(&mut self, account: &str, password: &str) -> Result<(), ValidationError> {
        self.set_header(AUTHORIZATION, Some(FieldValue::Scalar(auth::basic_credentials(account, password))))
    }

    /// Stores basic-auth credentials under `Proxy-Authorization`.
    fn proxy_basic_auth(&mut self, account: &str, password: &str) -> Result<(), ValidationError> {
        self.set_header(PROXY_AUTHORIZATION, Some(FieldValue::Scalar(auth::basic_credentials(account, password))))
    }

    /// True when `Connection` or `Proxy-Connection` carries a `close`
    /// token.
    fn connection_close(&self) -> bool {
        self.connection_has_token("close")
    }

    /// True when `Connection` or `Proxy-Connection` carries a `keep-alive`
    /// token.
    fn connection_keep_alive(&self) -> bool {
        self.connection_has_token("keep-alive")
    }

    #[doc(hidden)]
    fn connection_has_token(&self, token: &str) -> bool {
        [CONNECTION, PROXY_CONNECTION].iter().any(|name| {
            self.header_values(name)
                .is_some_and(|values| values.iter().any(|value| transfer::has_token(value, token)))
        })
    }
}

impl<T: HeaderBearer> SemanticHeaders for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Request;

    fn request() -> Request {
        Request::new("GET", "/resource")
    }

    #[test]
    fn range_round_trip() {
        let mut req = request();
        req.set_range(Some(ByteRangeSpec::FromTo(0, 1023))).unwrap();

        assert_eq!(req.header("Range").as_deref(), Some("bytes=0-1023"));
        assert_eq!(req.range().unwrap().unwrap(), [ByteRangeSpec::FromTo(0, 1023)]);
    }

    #[test]
    fn range_open_and_suffix_forms() {
        let mut req = request();
        req.set_range(Some(ByteRangeSpec::From(500))).unwrap();
        assert_eq!(req.header("range").as_deref(), Some("bytes=500-"));

        req.set_range(Some(ByteRangeSpec::Suffix(500))).unwrap();
        assert_eq!(req.header("range").as_deref(), Some("bytes=-500"));
    }

    #[test]
    fn set_range_rejects_inverted_span() {
        let mut req = request();
        let err = req.set_range(Some(ByteRangeSpec::FromTo(10, 5))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRangeSpec { .. }));
        assert!(!req.has_header("range"));
    }

    #[test]
    fn set_range_none_deletes() {
        let mut req = request();
        req.set_range(Some(ByteRangeSpec::FromTo(0, 9))).unwrap();
        req.set_range(None).unwrap();
        assert!(!req.has_header("Range"));
    }

    #[test]
    fn set_range_length_signs() {
        let mut req = request();
        req.set_range_length(1024).unwrap();
        assert_eq!(req.header("range").as_deref(), Some("bytes=0-1023"));

        req.set_range_length(-500).unwrap();
        assert_eq!(req.header("range").as_deref(), Some("bytes=-500"));

        assert!(req.set_range_length(0).is_err());
    }

    #[test]
    fn absent_range_is_none() {
        assert_eq!(request().range().unwrap(), None);
    }

    #[test]
    fn content_length_accessors() {
        let mut req = request();
        assert_eq!(req.content_length().unwrap(), None);

        req.set_content_length(Some(42)).unwrap();
        assert_eq!(req.header("Content-Length").as_deref(), Some("42"));
        assert_eq!(req.content_length().unwrap(), Some(42));

        req.set_header("content-length", Some(FieldValue::from("forty-two"))).unwrap();
        assert!(req.content_length().is_err());

        req.set_content_length(None).unwrap();
        assert!(!req.has_header("content-length"));
    }

    #[test]
    fn chunked_detection() {
        let mut req = request();
        assert!(!req.is_chunked());

        req.set_header("Transfer-Encoding", Some(FieldValue::from("gzip, chunked"))).unwrap();
        assert!(req.is_chunked());

        req.set_header("Transfer-Encoding", Some(FieldValue::from("chunked-ish"))).unwrap();
        assert!(!req.is_chunked());
    }

    #[test]
    fn content_range_accessors() {
        let mut req = request();
        req.set_header("Content-Range", Some(FieldValue::from("bytes 0-499/1234"))).unwrap();

        let range = req.content_range().unwrap().unwrap();
        assert_eq!((range.first, range.last, range.total), (0, 499, Some(1234)));
        assert_eq!(req.range_length().unwrap(), Some(500));

        req.set_header("Content-Range", Some(FieldValue::from("pages 1-2/3"))).unwrap();
        assert!(req.content_range().is_err());
    }

    #[test]
    fn content_type_accessors() {
        let mut req = request();
        assert_eq!(req.content_type(), None);
        assert_eq!(req.main_type(), None);
        assert_eq!(req.sub_type(), None);
        assert_eq!(req.type_params(), None);

        req.set_header("Content-Type", Some(FieldValue::from("text/html; charset=utf-8"))).unwrap();
        assert_eq!(req.content_type().as_deref(), Some("text/html"));
        assert_eq!(req.main_type().as_deref(), Some("text"));
        assert_eq!(req.sub_type().as_deref(), Some("html"));
        assert_eq!(req.type_params().unwrap().get("charset").map(String::as_str), Some("utf-8"));
    }

    #[test]
    fn set_content_type_composes_params() {
        let mut req = request();
        req.set_content_type("multipart/form-data", &[("boundary", "xyz")]).unwrap();
        assert_eq!(req.header("content-type").as_deref(), Some("multipart/form-data; boundary=xyz"));
    }

    #[test]
    fn basic_auth_fields() {
        let mut req = request();
        req.basic_auth("Aladdin", "open sesame").unwrap();
        req.proxy_basic_auth("proxy", "secret").unwrap();

        assert_eq!(req.header("Authorization").as_deref(), Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="));
        assert_eq!(req.header("Proxy-Authorization").as_deref(), Some("Basic cHJveHk6c2VjcmV0"));
    }

    #[test]
    fn connection_token_scan() {
        let mut req = request();
        assert!(!req.connection_close());
        assert!(!req.connection_keep_alive());

        req.set_header("Connection", Some(FieldValue::from(" Keep-Alive , TE"))).unwrap();
        assert!(req.connection_keep_alive());
        assert!(!req.connection_close());

        let mut req = request();
        req.set_header("Proxy-Connection", Some(FieldValue::from("Close"))).unwrap();
        assert!(req.connection_close());

        let mut req = request();
        req.set_header("Connection", Some(FieldValue::from("close-notify"))).unwrap();
        assert!(!req.connection_close());
    }
}
