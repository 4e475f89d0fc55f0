//! Basic authentication credential encoding
//! ([RFC 7617](https://tools.ietf.org/html/rfc7617)).

use base64ct::{Base64, Encoding};

/// Composes `Basic <base64(account:password)>`.
pub(crate) fn basic_credentials(account: &str, password: &str) -> String {
    format!("Basic {}", Base64::encode_string(format!("{account}:{password}").as_bytes()))
}
