use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};

use super::Record;

use crate::{schema::Schema, value::Value};

/// Type name given to records deserialized from a document.
const DECODED_TYPE_NAME: &str = "Record";

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of field names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut entries: IndexMap<String, Value> =
            IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            // A duplicate key keeps its first position and takes the last
            // value.
            entries.insert(name, value);
        }

        let schema = Schema::ordered(DECODED_TYPE_NAME, entries.keys().map(String::as_str))
            .map_err(A::Error::custom)?;
        let values = entries.into_values().collect();

        Ok(Record { schema, values })
    }
}

/// A record deserializes from a map document by declaring an ad-hoc schema
/// from the document's top-level keys, in as-encountered order.
///
/// Deserialization does not recurse: nested maps stay [`Value::Map`], they do
/// not become records.
impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
