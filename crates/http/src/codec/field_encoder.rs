//! Wire serialization of a header field store.
//!
//! Produces the header block the transmission layer writes after the start
//! line: one `Name: value1, value2\r\n` line per field in store order,
//! display-capitalized names, then the blank line ending the block. The
//! store's CR/LF validation is what makes this safe — no value written
//! here can break the line structure.

use bytes::{BufMut, BytesMut};

use crate::protocol::FieldMap;

/// Initial buffer size reserved for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder turning a [`FieldMap`] into raw header bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldEncoder;

impl FieldEncoder {
    /// Writes the complete header block, including the terminating blank
    /// line, into `dst`.
    pub fn encode(&self, fields: &FieldMap, dst: &mut BytesMut) {
        dst.reserve(INIT_HEADER_SIZE);

        for (name, value) in fields.iter_capitalized() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
    }
}
