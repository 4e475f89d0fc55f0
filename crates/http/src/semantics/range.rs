//! Byte-range grammars: the `Range` request field and the `Content-Range`
//! response field.
//!
//! The `Range` side implements the byte-ranges-specifier of
//! [RFC 7233 Section 2.1](https://tools.ietf.org/html/rfc7233#section-2.1)
//! for the `bytes` unit: `bytes=<spec>(,<spec>)*` where each spec is
//! `first-last`, `first-` or `-suffix`. The `Content-Range` side parses
//! `bytes <first>-<last>/<total|*>`.

use std::fmt;

use crate::protocol::SyntaxError;

/// One byte-range-spec of a `Range` field.
///
/// Positions are inclusive byte offsets; a suffix spec names a trailing
/// length instead of positions. Negative positions are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRangeSpec {
    /// `first-last`, both inclusive, `first <= last`.
    FromTo(u64, u64),
    /// `first-`: from `first` to the end of the representation.
    From(u64),
    /// `-suffix`: the last `suffix` bytes.
    Suffix(u64),
}

impl fmt::Display for ByteRangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromTo(first, last) => write!(f, "{first}-{last}"),
            Self::From(first) => write!(f, "{first}-"),
            Self::Suffix(suffix) => write!(f, "-{suffix}"),
        }
    }
}

/// The range actually carried by a `Content-Range` field: an inclusive
/// span and the total representation length, `None` when the total was
/// sent as `*` (unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub first: u64,
    pub last: u64,
    pub total: Option<u64>,
}

impl ContentRange {
    /// Number of bytes the span covers.
    pub fn length(&self) -> u64 {
        self.last - self.first + 1
    }
}

/// Parses a `Range` field value into its ordered byte-range-specs.
///
/// Whitespace is tolerated around the comma separators, nowhere else.
/// A set that reduces to exactly one zero-length suffix spec selects
/// nothing and is rejected.
pub(crate) fn parse_byte_ranges(value: &str) -> Result<Vec<ByteRangeSpec>, SyntaxError> {
    let Some(set) = value.strip_prefix("bytes=") else {
        return Err(SyntaxError::range(format!("missing bytes unit in '{value}'")));
    };

    let mut specs = Vec::new();
    for spec in set.split(',') {
        specs.push(parse_spec(spec.trim(), value)?);
    }

    if specs == [ByteRangeSpec::Suffix(0)] {
        return Err(SyntaxError::range("sole suffix-byte-range-spec has zero suffix-length"));
    }
    Ok(specs)
}

fn parse_spec(spec: &str, value: &str) -> Result<ByteRangeSpec, SyntaxError> {
    if let Some(suffix) = spec.strip_prefix('-') {
        let suffix = parse_pos(suffix)
            .ok_or_else(|| SyntaxError::range(format!("invalid suffix-byte-range-spec in '{value}'")))?;
        return Ok(ByteRangeSpec::Suffix(suffix));
    }

    let Some((first, last)) = spec.split_once('-') else {
        return Err(SyntaxError::range(format!("invalid byte-range-spec in '{value}'")));
    };

    let first =
        parse_pos(first).ok_or_else(|| SyntaxError::range(format!("invalid first-byte-pos in '{value}'")))?;

    if last.is_empty() {
        return Ok(ByteRangeSpec::From(first));
    }

    let last = parse_pos(last).ok_or_else(|| SyntaxError::range(format!("invalid last-byte-pos in '{value}'")))?;
    if first > last {
        return Err(SyntaxError::range(format!(
            "last-byte-pos must be greater than or equal to first-byte-pos in '{value}'"
        )));
    }
    Ok(ByteRangeSpec::FromTo(first, last))
}

/// Parses a `Content-Range` field value. The `bytes` unit is matched
/// case-insensitively and must be followed by whitespace.
pub(crate) fn parse_content_range(value: &str) -> Result<ContentRange, SyntaxError> {
    let malformed = || SyntaxError::content_range(format!("unparseable value '{value}'"));

    let (unit, rest) = value.split_at_checked(5).ok_or_else(malformed)?;
    if !unit.eq_ignore_ascii_case("bytes") {
        return Err(malformed());
    }
    let spans = rest.trim_start_matches([' ', '\t']);
    if spans.len() == rest.len() {
        // no whitespace after the unit
        return Err(malformed());
    }

    let (span, total) = spans.split_once('/').ok_or_else(malformed)?;
    let (first, last) = span.split_once('-').ok_or_else(malformed)?;

    let first = parse_pos(first).ok_or_else(malformed)?;
    let last = parse_pos(last).ok_or_else(malformed)?;
    let total = match total {
        "*" => None,
        digits => Some(parse_pos(digits).ok_or_else(malformed)?),
    };

    if first > last {
        return Err(SyntaxError::content_range(format!(
            "last-byte-pos must be greater than or equal to first-byte-pos in '{value}'"
        )));
    }
    Ok(ContentRange { first, last, total })
}

/// A non-empty run of ASCII digits; anything else (signs, whitespace,
/// overflow) is a mismatch.
fn parse_pos(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
