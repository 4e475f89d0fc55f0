//! Form bodies: immediate urlencoding and deferred staging.
//!
//! Two paths exist for form parameters. `set_form_data` on a request
//! urlencodes immediately and stages the result as a literal body. A
//! [`FormStage`] instead records the parameter set and the requested
//! encoding verbatim; the transmission layer renders the multipart or
//! urlencoded bytes when the message is actually sent, which is the only
//! place boundary generation and charset handling can happen.

use serde::Serialize;

use crate::protocol::ValidationError;

/// The two supported form encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEncoding {
    UrlEncoded,
    Multipart,
}

impl FormEncoding {
    /// Resolves a content-type token, compared case-insensitively against
    /// the two supported encodings. Anything else is `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref()) {
            Some(Self::UrlEncoded)
        } else if token.eq_ignore_ascii_case(mime::MULTIPART_FORM_DATA.as_ref()) {
            Some(Self::Multipart)
        } else {
            None
        }
    }

    /// The canonical media type of this encoding.
    pub fn mime(self) -> mime::Mime {
        match self {
            Self::UrlEncoded => mime::APPLICATION_WWW_FORM_URLENCODED,
            Self::Multipart => mime::MULTIPART_FORM_DATA,
        }
    }
}

/// Rendering options recorded with a staged form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Multipart boundary; generated by the renderer when absent.
    pub boundary: Option<String>,
    /// Charset for part bodies.
    pub charset: Option<String>,
}

/// A form parameter set staged for deferred rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStage {
    pub params: Vec<(String, String)>,
    pub encoding: FormEncoding,
    pub options: FormOptions,
}

/// Urlencodes `params` into a query string, then substitutes `separator`
/// for `&` when a custom one is requested. Values are percent-encoded
/// first, so the substitution can never touch value content.
pub(crate) fn encode_urlencoded<P: Serialize>(params: P, separator: &str) -> Result<String, ValidationError> {
    let query = serde_urlencoded::to_string(params)?;
    if separator == "&" {
        Ok(query)
    } else {
        Ok(query.replace('&', separator))
    }
}
