//! Case-insensitive, multi-valued header field storage.
//!
//! [`FieldMap`] is the canonical store behind every message object. Field
//! names are canonicalized to their ASCII-lowercase form at every boundary,
//! so lookups never depend on the spelling used at insertion; iteration
//! preserves the insertion order of distinct fields and the append order of
//! values within a field.
//!
//! Values are validated on the way in: a value containing a raw CR or LF
//! byte is rejected before anything is stored, which is what allows the
//! wire serializer to emit `Name: value\r\n` lines without inspecting the
//! store again.
//!
//! # Example
//!
//! ```
//! use mezzo_http::protocol::{FieldMap, FieldValue};
//!
//! let mut fields = FieldMap::new();
//! fields.set("Content-Type", Some(FieldValue::from("text/html"))).unwrap();
//! assert_eq!(fields.get("content-type").as_deref(), Some("text/html"));
//!
//! fields.add("Accept-Encoding", FieldValue::from(vec!["gzip".to_owned(), "br".to_owned()])).unwrap();
//! assert_eq!(fields.get("accept-encoding").as_deref(), Some("gzip, br"));
//! ```

use indexmap::IndexMap;
use tracing::debug;

use crate::protocol::ValidationError;

/// A header field value before expansion into stored strings.
///
/// `set`, `add` and the bulk constructors accept one scalar, an ordered
/// sequence, or a name/value mapping; sequences and mappings flatten
/// recursively into the stored value list in traversal order, a mapping
/// entry contributing its name followed by its expanded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    Sequence(Vec<FieldValue>),
    Mapping(Vec<(String, FieldValue)>),
}

impl FieldValue {
    fn expand_into(self, out: &mut Vec<String>) {
        match self {
            Self::Scalar(value) => out.push(value),
            Self::Sequence(items) => {
                for item in items {
                    item.expand_into(out);
                }
            }
            Self::Mapping(pairs) => {
                for (name, value) in pairs {
                    out.push(name);
                    value.expand_into(out);
                }
            }
        }
    }

    fn into_values(self) -> Vec<String> {
        let mut values = Vec::new();
        self.expand_into(&mut values);
        values
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Sequence(values.into_iter().map(Self::Scalar).collect())
    }
}

impl From<&[&str]> for FieldValue {
    fn from(values: &[&str]) -> Self {
        Self::Sequence(values.iter().map(|v| Self::from(*v)).collect())
    }
}

impl From<Vec<(String, String)>> for FieldValue {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Mapping(pairs.into_iter().map(|(name, value)| (name, Self::Scalar(value))).collect())
    }
}

/// Ordered, case-insensitive, multi-valued header field store.
///
/// Invariants upheld by every operation:
/// - the stored key is always the lowercased field name, unique under
///   case-insensitive comparison;
/// - stored values never contain CR or LF;
/// - a present key has at least one value; removing the last value removes
///   the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: IndexMap<String, Vec<String>>,
}

impl FieldMap {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an ordered field collection.
    ///
    /// See [`reset`](Self::reset) for the handling of absent values,
    /// duplicates, and whitespace.
    pub fn from_fields<I, K>(fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Option<FieldValue>)>,
        K: Into<String>,
    {
        let mut map = Self::new();
        map.reset(fields)?;
        Ok(map)
    }

    /// Replaces all entries with the given field collection.
    ///
    /// An entry with an absent value is skipped with a diagnostic. A name
    /// repeated later in the collection overwrites the earlier values, also
    /// with a diagnostic rather than an error. Each expanded scalar is
    /// trimmed of leading and trailing whitespace before validation, which
    /// `set` and `add` do not do.
    pub fn reset<I, K>(&mut self, fields: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (K, Option<FieldValue>)>,
        K: Into<String>,
    {
        self.fields.clear();
        for (name, value) in fields {
            let name = name.into();
            let Some(value) = value else {
                debug!(field = %name, "skipping header field without a value");
                continue;
            };

            let values: Vec<String> = value.into_values().iter().map(|v| v.trim().to_owned()).collect();
            validate(&values)?;
            if values.is_empty() {
                continue;
            }

            if self.fields.insert(canonical(&name), values).is_some() {
                debug!(field = %name, "duplicated header field, overwriting previous values");
            }
        }
        Ok(())
    }

    /// All values of a field joined with `", "`, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<String> {
        self.fields.get(&canonical(name)).map(|values| values.join(", "))
    }

    /// A copy of the raw value list of a field, or `None` if absent.
    pub fn get_all(&self, name: &str) -> Option<Vec<String>> {
        self.fields.get(&canonical(name)).cloned()
    }

    /// Replaces the values of a field; `None` deletes it.
    ///
    /// Values are stored as given, without trimming. If any expanded value
    /// contains CR or LF nothing is changed and a validation error is
    /// returned.
    pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), ValidationError> {
        let Some(value) = value else {
            self.delete(name);
            return Ok(());
        };

        let values = value.into_values();
        validate(&values)?;

        let key = canonical(name);
        if values.is_empty() {
            self.fields.shift_remove(&key);
        } else {
            self.fields.insert(key, values);
        }
        Ok(())
    }

    /// Appends to the values of a field, creating it if absent.
    ///
    /// Same expansion and validation rules as [`set`](Self::set).
    pub fn add(&mut self, name: &str, value: FieldValue) -> Result<(), ValidationError> {
        let values = value.into_values();
        validate(&values)?;
        if values.is_empty() {
            return Ok(());
        }

        self.fields.entry(canonical(name)).or_default().extend(values);
        Ok(())
    }

    /// Removes a field, returning its values if it was present.
    pub fn delete(&mut self, name: &str) -> Option<Vec<String>> {
        self.fields.shift_remove(&canonical(name))
    }

    /// True if the field is present, under any spelling.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&canonical(name))
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(canonical name, joined value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.fields.iter().map(|(name, values)| (name.as_str(), values.join(", ")))
    }

    /// Iterates `(display name, joined value)`, the form the wire
    /// serializer writes.
    pub fn iter_capitalized(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.fields.iter().map(|(name, values)| (capitalize(name), values.join(", ")))
    }

    /// Canonical field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Display-capitalized field names in insertion order.
    pub fn capitalized_names(&self) -> impl Iterator<Item = String> + '_ {
        self.fields.keys().map(|name| capitalize(name))
    }

    /// Joined values in field insertion order.
    pub fn values(&self) -> impl Iterator<Item = String> + '_ {
        self.fields.values().map(|values| values.join(", "))
    }

    /// A copy of the whole store, canonical keys to raw value lists.
    pub fn to_map(&self) -> IndexMap<String, Vec<String>> {
        self.fields.clone()
    }
}

fn canonical(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn validate(values: &[String]) -> Result<(), ValidationError> {
    for value in values {
        if value.bytes().any(|b| b == b'\r' || b == b'\n') {
            return Err(ValidationError::prohibited_value(value));
        }
    }
    Ok(())
}

/// Display form of a canonical name: the first letter of each `-` separated
/// segment upper-cased, e.g. `content-type` becomes `Content-Type`. Never
/// used for lookup.
pub(crate) fn capitalize(name: &str) -> String {
    let mut display = String::with_capacity(name.len());
    for (i, segment) in name.split('-').enumerate() {
        if i > 0 {
            display.push('-');
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            display.push(first.to_ascii_uppercase());
            display.push_str(chars.as_str());
        }
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut fields = FieldMap::new();
        fields.set("Content-Type", Some(FieldValue::from("text/plain"))).unwrap();

        assert_eq!(fields.get("CONTENT-TYPE"), fields.get("content-type"));
        assert_eq!(fields.get("cOnTeNt-TyPe").as_deref(), Some("text/plain"));
        assert!(fields.contains("CoNtEnT-tYpE"));
    }

    #[test]
    fn set_overwrites_and_keeps_position() {
        let mut fields = FieldMap::new();
        fields.set("Host", Some(FieldValue::from("a"))).unwrap();
        fields.set("Accept", Some(FieldValue::from("*/*"))).unwrap();
        fields.set("HOST", Some(FieldValue::from("b"))).unwrap();

        assert_eq!(fields.get("host").as_deref(), Some("b"));
        assert_eq!(fields.names().collect::<Vec<_>>(), ["host", "accept"]);
    }

    #[test]
    fn set_none_deletes() {
        let mut fields = FieldMap::new();
        fields.set("X-Trace", Some(FieldValue::from("abc"))).unwrap();
        fields.set("x-trace", None).unwrap();

        assert!(!fields.contains("X-Trace"));
        assert_eq!(fields.get("X-Trace"), None);
    }

    #[test]
    fn add_appends_in_order() {
        let mut fields = FieldMap::new();
        fields.add("Accept-Encoding", FieldValue::from("gzip")).unwrap();
        fields.add("accept-encoding", FieldValue::from("br")).unwrap();

        assert_eq!(fields.get("Accept-Encoding").as_deref(), Some("gzip, br"));
        assert_eq!(fields.get_all("Accept-Encoding").unwrap(), ["gzip", "br"]);
    }

    #[test]
    fn sequence_and_mapping_expansion() {
        let mut fields = FieldMap::new();
        fields.set("X-List", Some(FieldValue::from(vec!["a".to_owned(), "b".to_owned()]))).unwrap();
        assert_eq!(fields.get_all("X-List").unwrap(), ["a", "b"]);

        fields
            .set(
                "X-Pairs",
                Some(FieldValue::from(vec![
                    ("left".to_owned(), "1".to_owned()),
                    ("right".to_owned(), "2".to_owned()),
                ])),
            )
            .unwrap();
        assert_eq!(fields.get_all("X-Pairs").unwrap(), ["left", "1", "right", "2"]);
    }

    #[test]
    fn empty_expansion_leaves_no_key() {
        let mut fields = FieldMap::new();
        fields.set("X-Empty", Some(FieldValue::Sequence(vec![]))).unwrap();
        assert!(!fields.contains("X-Empty"));

        fields.set("X-Empty", Some(FieldValue::from("kept"))).unwrap();
        fields.set("X-Empty", Some(FieldValue::Sequence(vec![]))).unwrap();
        assert!(!fields.contains("X-Empty"));
    }

    #[test]
    fn crlf_is_rejected_and_state_unchanged() {
        let mut fields = FieldMap::new();
        fields.set("X-Token", Some(FieldValue::from("before"))).unwrap();

        let err = fields.set("X-Token", Some(FieldValue::from("bad\r\nInjected: yes"))).unwrap_err();
        assert!(matches!(err, ValidationError::ProhibitedValue { .. }));
        assert_eq!(fields.get("X-Token").as_deref(), Some("before"));

        let err = fields.add("X-Token", FieldValue::from("also\nbad")).unwrap_err();
        assert!(matches!(err, ValidationError::ProhibitedValue { .. }));
        assert_eq!(fields.get_all("X-Token").unwrap(), ["before"]);
    }

    #[test]
    fn reset_trims_scalars() {
        let fields = FieldMap::from_fields([("User-Agent", Some(FieldValue::from("  curl/8.0  ")))]).unwrap();
        assert_eq!(fields.get("user-agent").as_deref(), Some("curl/8.0"));
    }

    #[test]
    fn reset_skips_absent_values() {
        let fields = FieldMap::from_fields([
            ("Foo", Some(FieldValue::from("Bar"))),
            ("Skipped", None),
            ("Baz", Some(FieldValue::from("Bat"))),
        ])
        .unwrap();

        assert_eq!(fields.len(), 2);
        assert!(!fields.contains("Skipped"));
    }

    #[test]
    fn reset_duplicate_overwrites() {
        let fields = FieldMap::from_fields([
            ("Accept", Some(FieldValue::from("text/html"))),
            ("ACCEPT", Some(FieldValue::from("application/json"))),
        ])
        .unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("accept").as_deref(), Some("application/json"));
    }

    #[test]
    fn iteration_order_and_capitalization() {
        let fields = FieldMap::from_fields([
            ("Foo", Some(FieldValue::from("Bar"))),
            ("Baz", Some(FieldValue::from("Bat"))),
        ])
        .unwrap();

        let headers: Vec<(String, String)> =
            fields.iter().map(|(name, value)| (name.to_owned(), value)).collect();
        assert_eq!(headers, [("foo".to_owned(), "Bar".to_owned()), ("baz".to_owned(), "Bat".to_owned())]);

        assert_eq!(fields.capitalized_names().collect::<Vec<_>>(), ["Foo", "Baz"]);
        assert_eq!(fields.values().collect::<Vec<_>>(), ["Bar", "Bat"]);

        // a fresh call restarts from the beginning
        assert_eq!(fields.iter().count(), 2);
        assert_eq!(fields.iter().count(), 2);
    }

    #[test]
    fn capitalize_display_form() {
        assert_eq!(capitalize("content-type"), "Content-Type");
        assert_eq!(capitalize("etag"), "Etag");
        assert_eq!(capitalize("x-forwarded-for"), "X-Forwarded-For");
    }

    #[test]
    fn to_map_is_a_copy() {
        let mut fields = FieldMap::new();
        fields.add("Via", FieldValue::from("1.1 edge")).unwrap();

        let mut snapshot = fields.to_map();
        snapshot.get_mut("via").unwrap().push("tampered".to_owned());

        assert_eq!(fields.get_all("via").unwrap(), ["1.1 edge"]);
    }

    #[test]
    fn get_all_is_a_copy() {
        let mut fields = FieldMap::new();
        fields.add("Warning", FieldValue::from("199 misc")).unwrap();

        let mut copy = fields.get_all("warning").unwrap();
        copy.push("tampered".to_owned());

        assert_eq!(fields.get_all("warning").unwrap(), ["199 misc"]);
    }
}
