//! The semantic core of an HTTP message.
//!
//! This crate is the in-memory data layer a request/response library builds
//! on: header field storage with strict validation, typed accessors for the
//! structurally complex fields, and a classified protocol-error taxonomy.
//! It performs no I/O — sockets, connection lifecycle, TLS and request
//! dispatch belong to the transmission layer that owns instances of these
//! types.
//!
//! # Example
//!
//! ```
//! use mezzo_http::protocol::{HeaderBearer, Request};
//! use mezzo_http::semantics::{ByteRangeSpec, SemanticHeaders};
//!
//! let mut request = Request::new("GET", "/archive.tar");
//! request.set_range(Some(ByteRangeSpec::FromTo(0, 1023))).unwrap();
//! assert_eq!(request.header("Range").as_deref(), Some("bytes=0-1023"));
//!
//! let specs = request.range().unwrap().unwrap();
//! assert_eq!(specs, [ByteRangeSpec::FromTo(0, 1023)]);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`protocol`]: the field store ([`protocol::FieldMap`]), the message
//!   types owning it ([`protocol::Request`], [`protocol::Response`]), the
//!   [`protocol::HeaderBearer`] contract they share, and the error types
//!   including the [`protocol::ProtocolError`] taxonomy
//! - [`semantics`]: the [`semantics::SemanticHeaders`] accessors — byte
//!   ranges, content metadata, transfer and connection tokens, basic-auth,
//!   form staging
//! - [`codec`]: the header wire serializer consumed by the transmission
//!   layer
//!
//! # Guarantees
//!
//! - Field lookup is case-insensitive everywhere; stored keys are
//!   canonical lowercase and iteration preserves insertion order.
//! - No stored value ever contains a raw CR or LF byte, so serialized
//!   header lines cannot be corrupted by stored values.
//! - Semantic accessors never auto-correct: a malformed stored value
//!   produces a syntax error, not a guess.
//! - Nothing here retries anything; retry policy belongs to the callers
//!   reading [`protocol::ProtocolErrorKind`].

pub mod codec;
pub mod protocol;
pub mod semantics;
