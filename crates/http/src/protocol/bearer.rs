//! The header-bearing contract shared by request and response messages.
//!
//! Both message types own a [`FieldMap`] by composition and expose it
//! through this trait, so everything written against `HeaderBearer` — the
//! semantic accessors in particular — works on either side of an exchange
//! without knowing which one it has.

use crate::protocol::{FieldMap, FieldValue, ValidationError};

/// Access to a message's header fields.
///
/// Only the two accessors are required; every other method delegates to the
/// owned [`FieldMap`] and follows its contract.
pub trait HeaderBearer {
    fn fields(&self) -> &FieldMap;

    fn fields_mut(&mut self) -> &mut FieldMap;

    /// All values of a field joined with `", "`, or `None` if absent.
    fn header(&self, name: &str) -> Option<String> {
        self.fields().get(name)
    }

    /// A copy of the raw value list of a field, or `None` if absent.
    fn header_values(&self, name: &str) -> Option<Vec<String>> {
        self.fields().get_all(name)
    }

    /// Replaces the values of a field; `None` deletes it.
    fn set_header(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), ValidationError> {
        self.fields_mut().set(name, value)
    }

    /// Appends to the values of a field, creating it if absent.
    fn add_header(&mut self, name: &str, value: FieldValue) -> Result<(), ValidationError> {
        self.fields_mut().add(name, value)
    }

    /// Removes a field, returning its values if it was present.
    fn delete_header(&mut self, name: &str) -> Option<Vec<String>> {
        self.fields_mut().delete(name)
    }

    /// True if the field is present, under any spelling.
    fn has_header(&self, name: &str) -> bool {
        self.fields().contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        fields: FieldMap,
    }

    impl HeaderBearer for Probe {
        fn fields(&self) -> &FieldMap {
            &self.fields
        }

        fn fields_mut(&mut self) -> &mut FieldMap {
            &mut self.fields
        }
    }

    #[test]
    fn delegation_reaches_the_store() {
        let mut probe = Probe { fields: FieldMap::new() };

        probe.set_header("Server", Some(FieldValue::from("probe/1"))).unwrap();
        assert!(probe.has_header("SERVER"));
        assert_eq!(probe.header("server").as_deref(), Some("probe/1"));

        probe.add_header("server", FieldValue::from("probe/2")).unwrap();
        assert_eq!(probe.header_values("Server").unwrap(), ["probe/1", "probe/2"]);

        assert_eq!(probe.delete_header("sErVeR").unwrap(), ["probe/1", "probe/2"]);
        assert!(!probe.has_header("server"));
    }
}
