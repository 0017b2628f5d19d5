use serde::{Deserialize, Serialize};

use super::Record;

use crate::{schema::Schema, value::Value};

/// A serializable snapshot of every field of a [`Record`].
///
/// This is the extension point a generic persistence mechanism consumes: the
/// byte encoding itself is out of scope here. The captured values are
/// untyped, so a self-describing serialization format is required to bring a
/// state back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    entries: Vec<(String, Value)>,
}

impl RecordState {
    /// The captured `(name, value)` pairs in declared field order.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(entry, value)| (entry == name).then_some(value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for RecordState {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(entries: I) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl Record {
    /// Captures every field value into a [`RecordState`].
    pub fn capture(&self) -> RecordState {
        self.iter()
            .map(|(name, value)| (name.to_owned(), value.clone()))
            .collect()
    }

    /// Reapplies captured values to this record.
    ///
    /// Entries whose name the schema does not declare are ignored; declared
    /// fields absent from the state keep their current value.
    pub fn restore(&mut self, state: &RecordState) {
        for (name, value) in &state.entries {
            if let Ok(slot) = self.get_mut(name) {
                *slot = value.clone();
            }
        }
    }

    /// Reconstructs a record from a captured state without re-running
    /// construction-time default filling: declared fields absent from the
    /// state are null, not their declared defaults.
    pub fn from_state(schema: Schema, state: &RecordState) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| state.get(field.name()).cloned().unwrap_or(Value::Null))
            .collect();
        Self { schema, values }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    use crate::record::CopyMode;

    fn foo_of(x: impl Into<Value>, y: impl Into<Value>) -> Record {
        let schema = Schema::ordered("Foo", ["x", "y"]).unwrap();
        Record::from_positional(schema, [x.into(), y.into()]).unwrap()
    }

    /// Captures, round-trips the state through a self-describing format, and
    /// reconstructs, like a generic persistence mechanism would.
    fn persist_round_trip(record: &Record) -> anyhow::Result<Record> {
        let bytes = serde_json::to_vec(&record.capture())?;
        let state: RecordState = serde_json::from_slice(&bytes)?;
        Ok(Record::from_state(record.schema().clone(), &state))
    }

    #[test]
    fn capture_restore_round_trip() -> anyhow::Result<()> {
        for record in [
            foo_of(1, 2),
            foo_of(Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]), 4),
            foo_of(
                Value::from(BTreeMap::from([
                    ("a".to_owned(), Value::from(1)),
                    ("b".to_owned(), Value::from(2)),
                ])),
                4,
            ),
        ] {
            let mut blank = Record::new(record.schema().clone());
            blank.restore(&record.capture());
            assert_eq!(blank, record);

            let restored = persist_round_trip(&record)?;
            assert_eq!(
                restored.to_ordered_map(CopyMode::Shared),
                record.to_ordered_map(CopyMode::Shared)
            );
        }
        Ok(())
    }

    #[test]
    fn restore_ignores_undeclared_names() -> anyhow::Result<()> {
        let other = Record::from_positional(
            Schema::ordered("Other", ["y", "z"])?,
            [Value::from("kept"), Value::from("dropped")],
        )?;

        let mut record = foo_of(1, 2);
        record.restore(&other.capture());

        assert_eq!(record.get("x"), Ok(&Value::from(1)));
        assert_eq!(record.get("y"), Ok(&Value::from("kept")));
        Ok(())
    }

    #[test]
    fn from_state_bypasses_default_filling() -> anyhow::Result<()> {
        let schema = Schema::with_defaults("Foo", [("x", Value::from(0)), ("y", Value::from(9))])?;

        let state: RecordState = [("x".to_owned(), Value::from(1))].into_iter().collect();
        let record = Record::from_state(schema, &state);

        assert_eq!(record.get("x"), Ok(&Value::from(1)));
        assert_eq!(record.get("y"), Ok(&Value::Null));
        Ok(())
    }
}
