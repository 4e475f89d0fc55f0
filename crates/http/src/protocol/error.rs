//! Error types for the header field core.
//!
//! Two independent families cover everything this crate can fail on:
//!
//! - [`ValidationError`]: structural or argument validation at the point of
//!   insertion (CR/LF in a field value, unsupported form encoding, invalid
//!   range arguments). The store is never modified when one is returned.
//! - [`SyntaxError`]: a stored header value does not match the grammar a
//!   semantic accessor expects (Range, Content-Length, Content-Range).
//!
//! [`HeaderError`] wraps both for callers that funnel them through one type.
//!
//! [`ProtocolError`] is different in kind: it classifies a *protocol level*
//! failure observed by the transmission layer (this crate never raises one)
//! and carries the response that triggered it, so dispatch code can branch
//! on the classification and inspect the response without re-parsing.

use thiserror::Error;
use triomphe::Arc;

use crate::protocol::Response;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("validation error: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("header syntax error: {source}")]
    Syntax {
        #[from]
        source: SyntaxError,
    },
}

/// Rejected input on the mutation side of the store and its accessors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("header field value cannot include CR/LF: {value:?}")]
    ProhibitedValue { value: String },

    #[error("invalid byte-range spec: {reason}")]
    InvalidRangeSpec { reason: String },

    #[error("invalid form encoding: {enctype:?}")]
    InvalidFormEncoding { enctype: String },

    #[error("form encoding failed: {source}")]
    FormEncoding {
        #[from]
        source: serde_urlencoded::ser::Error,
    },
}

impl ValidationError {
    pub fn prohibited_value<S: ToString>(value: S) -> Self {
        Self::ProhibitedValue { value: value.to_string() }
    }

    pub fn invalid_range_spec<S: ToString>(reason: S) -> Self {
        Self::InvalidRangeSpec { reason: reason.to_string() }
    }

    pub fn invalid_form_encoding<S: ToString>(enctype: S) -> Self {
        Self::InvalidFormEncoding { enctype: enctype.to_string() }
    }
}

/// A stored header value failed to parse in a semantic accessor.
///
/// Values are never auto-corrected: the accessor that detected the mismatch
/// reports it and leaves the stored value as is.
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("invalid Range header: {reason}")]
    Range { reason: String },

    #[error("invalid Content-Length header: {reason}")]
    ContentLength { reason: String },

    #[error("invalid Content-Range header: {reason}")]
    ContentRange { reason: String },
}

impl SyntaxError {
    pub fn range<S: ToString>(reason: S) -> Self {
        Self::Range { reason: reason.to_string() }
    }

    pub fn content_length<S: ToString>(reason: S) -> Self {
        Self::ContentLength { reason: reason.to_string() }
    }

    pub fn content_range<S: ToString>(reason: S) -> Self {
        Self::ContentRange { reason: reason.to_string() }
    }
}

/// Classification of a protocol failure.
///
/// The tag is the retry contract: [`Retriable`](ProtocolErrorKind::Retriable)
/// means the originating operation may be re-attempted unmodified,
/// [`ClientException`](ProtocolErrorKind::ClientException) and
/// [`Fatal`](ProtocolErrorKind::Fatal) mean it must not be, and
/// [`Generic`](ProtocolErrorKind::Generic) leaves the policy to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolErrorKind {
    Generic,
    Retriable,
    ClientException,
    Fatal,
}

/// A classified protocol failure raised by the transmission layer.
///
/// Constructed once per failing exchange and immutable afterwards. The error
/// holds a shared reference to the response that triggered it; it does not
/// manage the response's lifetime beyond that association.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProtocolError {
    kind: ProtocolErrorKind,
    message: String,
    response: Arc<Response>,
}

/// Names of the structured fields a [`ProtocolError`] exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolField {
    Message,
    Response,
}

/// A borrowed view of a single [`ProtocolError`] field.
#[derive(Debug, Clone, Copy)]
pub enum ProtocolFieldRef<'a> {
    Message(&'a str),
    Response(&'a Response),
}

impl ProtocolError {
    fn new(kind: ProtocolErrorKind, message: impl Into<String>, response: Arc<Response>) -> Self {
        Self { kind, message: message.into(), response }
    }

    /// An unspecified protocol failure; retry policy is caller-defined.
    pub fn generic(message: impl Into<String>, response: Arc<Response>) -> Self {
        Self::new(ProtocolErrorKind::Generic, message, response)
    }

    /// The originating operation may safely be retried unmodified.
    pub fn retriable(message: impl Into<String>, response: Arc<Response>) -> Self {
        Self::new(ProtocolErrorKind::Retriable, message, response)
    }

    /// The response indicates a client-side condition that a plain retry
    /// will not fix.
    pub fn client_exception(message: impl Into<String>, response: Arc<Response>) -> Self {
        Self::new(ProtocolErrorKind::ClientException, message, response)
    }

    /// Unrecoverable; the caller should abort.
    pub fn fatal(message: impl Into<String>, response: Arc<Response>) -> Self {
        Self::new(ProtocolErrorKind::Fatal, message, response)
    }

    pub fn kind(&self) -> ProtocolErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The response associated with this failure.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// True only for [`ProtocolErrorKind::Retriable`].
    pub fn is_retriable(&self) -> bool {
        self.kind == ProtocolErrorKind::Retriable
    }

    /// Selective field extraction for dispatch code.
    ///
    /// Returns the requested fields in the order requested, so a caller can
    /// destructure only the message, only the response, or both.
    pub fn fields(&self, requested: &[ProtocolField]) -> Vec<(ProtocolField, ProtocolFieldRef<'_>)> {
        requested
            .iter()
            .map(|&field| {
                let value = match field {
                    ProtocolField::Message => ProtocolFieldRef::Message(&self.message),
                    ProtocolField::Response => ProtocolFieldRef::Response(&self.response),
                };
                (field, value)
            })
            .collect()
    }
}
