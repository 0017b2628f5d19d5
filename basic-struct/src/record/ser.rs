use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Record;

/// A record serializes as a map of field name to value in declared order.
///
/// Nested records serialize the same way, so the type name is not part of
/// the encoded form.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
