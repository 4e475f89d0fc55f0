//! Request message type.
//!
//! Owns the header fields plus the *staged* body of an outgoing request.
//! Staging means the request records what the body should be — a literal
//! string, or a form parameter set with a requested encoding — and the
//! transmission layer renders the actual bytes when the message is sent.

use serde::Serialize;

use crate::protocol::{FieldMap, FieldValue, HeaderBearer, ValidationError};
use crate::semantics::form::{self, FormEncoding, FormOptions, FormStage};
use crate::semantics::SemanticHeaders;

/// A request message owning its header fields and staged body.
///
/// At most one of the literal body and the form stage is present at a time;
/// setting either clears the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    target: String,
    fields: FieldMap,
    body: Option<String>,
    form: Option<FormStage>,
}

impl Request {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self { method: method.into(), target: target.into(), fields: FieldMap::new(), body: None, form: None }
    }

    /// Builds a request with an initial header field collection, applying
    /// the bulk-initialization rules of [`FieldMap::from_fields`].
    pub fn with_fields<I, K>(
        method: impl Into<String>,
        target: impl Into<String>,
        fields: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Option<FieldValue>)>,
        K: Into<String>,
    {
        let mut request = Self::new(method, target);
        request.fields.reset(fields)?;
        Ok(request)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The staged literal body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Stages a literal body, discarding any staged form.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
        self.form = None;
    }

    /// The staged form parameter set, if any.
    pub fn form(&self) -> Option<&FormStage> {
        self.form.as_ref()
    }

    /// Urlencodes `params`, stages the result as the body, and sets the
    /// content type to `application/x-www-form-urlencoded`.
    pub fn set_form_data<P: Serialize>(&mut self, params: P) -> Result<(), ValidationError> {
        self.set_form_data_with_separator(params, "&")
    }

    /// Like [`set_form_data`](Self::set_form_data), but joins the encoded
    /// pairs with `separator` instead of `&`. Substitution happens after
    /// percent-encoding, so a literal `&` inside a value is never touched.
    pub fn set_form_data_with_separator<P: Serialize>(
        &mut self,
        params: P,
        separator: &str,
    ) -> Result<(), ValidationError> {
        let query = form::encode_urlencoded(params, separator)?;
        self.body = Some(query);
        self.form = None;

        let media = FormEncoding::UrlEncoded.mime();
        self.set_content_type(media.as_ref(), &[])
    }

    /// Records a form parameter set for deferred encoding.
    ///
    /// `enctype` must be one of the two supported tokens, compared
    /// case-insensitively: `application/x-www-form-urlencoded` or
    /// `multipart/form-data`. Anything else is rejected without touching
    /// the message. Nothing is rendered here; the transmission layer reads
    /// the stage back through [`form`](Self::form) when it builds the body.
    pub fn set_form(
        &mut self,
        params: Vec<(String, String)>,
        enctype: &str,
        options: FormOptions,
    ) -> Result<(), ValidationError> {
        let encoding =
            FormEncoding::from_token(enctype).ok_or_else(|| ValidationError::invalid_form_encoding(enctype))?;

        self.body = None;
        self.form = Some(FormStage { params, encoding, options });

        let media = encoding.mime();
        self.set_content_type(media.as_ref(), &[])
    }
}

impl HeaderBearer for Request {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }
}
