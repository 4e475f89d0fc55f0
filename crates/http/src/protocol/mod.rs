//! Core protocol abstractions of the message semantic layer.
//!
//! The protocol module holds the data structures everything else builds on:
//!
//! - **Field storage** ([`field_map`]): the ordered, case-insensitive,
//!   multi-valued header store
//!   - [`FieldMap`]: the store itself
//!   - [`FieldValue`]: tagged input accepted by mutation operations
//!
//! - **Message types** ([`request`], [`response`]): owners of one store each
//!   - [`Request`]: outgoing message with staged body/form
//!   - [`Response`]: received message with status line data
//!
//! - **The bearer contract** ([`bearer`]):
//!   - [`HeaderBearer`]: store access shared by both message types, the
//!     seam the semantic accessors attach to
//!
//! - **Errors** ([`error`]):
//!   - [`ValidationError`] / [`SyntaxError`] / [`HeaderError`]: the two
//!     local failure families and their umbrella
//!   - [`ProtocolError`]: the classified protocol failure taxonomy with its
//!     structured-field view

mod field_map;
pub use field_map::FieldMap;
pub use field_map::FieldValue;

mod bearer;
pub use bearer::HeaderBearer;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod error;
pub use error::HeaderError;
pub use error::ProtocolError;
pub use error::ProtocolErrorKind;
pub use error::ProtocolField;
pub use error::ProtocolFieldRef;
pub use error::SyntaxError;
pub use error::ValidationError;
