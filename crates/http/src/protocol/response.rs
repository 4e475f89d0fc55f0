//! Response message type.
//!
//! Carries the status line data and the header fields of a received
//! response. Body transport belongs to the transmission layer; what this
//! type exists for is header access through [`HeaderBearer`] and status
//! inspection by consumers of the classified protocol errors.

use crate::protocol::{FieldMap, FieldValue, HeaderBearer, ValidationError};

/// A response message owning its header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    reason: String,
    fields: FieldMap,
}

impl Response {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self { status, reason: reason.into(), fields: FieldMap::new() }
    }

    /// Builds a response with an initial header field collection, applying
    /// the bulk-initialization rules of [`FieldMap::from_fields`].
    pub fn with_fields<I, K>(status: u16, reason: impl Into<String>, fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Option<FieldValue>)>,
        K: Into<String>,
    {
        Ok(Self { status, reason: reason.into(), fields: FieldMap::from_fields(fields)? })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl HeaderBearer for Response {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }
}
