//! Tree-format (JSON) boundary.
//!
//! Encoding and decoding are intentionally asymmetric, matching the
//! historical behavior of this format:
//!
//! - [`encode`] recurses into nested records, so a record field serializes as
//!   a plain object and its type name is lost.
//! - [`decode`] declares an ad-hoc record type from the document's top-level
//!   keys and does not recurse: nested objects stay [`Value::Map`]s. Callers
//!   wanting nested records must decode them individually.
//!
//! All errors are [`serde_json`]'s own, returned unchanged.
//!
//! [`Value::Map`]: crate::value::Value::Map

use crate::record::Record;

/// Encodes a record as a JSON document string.
pub fn encode(record: &Record) -> serde_json::Result<String> {
    serde_json::to_string(record)
}

/// Encodes a record as a pretty-printed JSON document string.
pub fn encode_pretty(record: &Record) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

/// Encodes a record as an in-memory JSON document.
pub fn encode_value(record: &Record) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(record)
}

/// Decodes a JSON object document into a record with an ad-hoc schema.
pub fn decode(json: &str) -> serde_json::Result<Record> {
    serde_json::from_str(json)
}

/// Decodes an in-memory JSON object document into a record.
pub fn decode_value(json: serde_json::Value) -> serde_json::Result<Record> {
    serde_json::from_value(json)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    use crate::{
        record::CopyMode,
        schema::Schema,
        value::Value,
    };

    fn foo_of(x: impl Into<Value>, y: impl Into<Value>) -> Record {
        let schema = Schema::ordered("Foo", ["x", "y"]).unwrap();
        Record::from_positional(schema, [x.into(), y.into()]).unwrap()
    }

    fn assert_round_trips(record: &Record) {
        let decoded = decode(&encode(record).unwrap()).unwrap();
        assert_eq!(
            decoded.to_ordered_map(CopyMode::Shared),
            record.to_ordered_map(CopyMode::Shared)
        );
    }

    #[test]
    fn round_trips() {
        assert_round_trips(&foo_of(1, 2));
        assert_round_trips(&foo_of(
            Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]),
            4,
        ));
        assert_round_trips(&foo_of(
            Value::from(BTreeMap::from([
                ("a".to_owned(), Value::from(1)),
                ("b".to_owned(), Value::from(2)),
            ])),
            4,
        ));
    }

    #[test]
    fn encode_keeps_declaration_order() -> anyhow::Result<()> {
        let record = Record::from_positional(
            Schema::ordered("Rec", ["b", "a"])?,
            [Value::from(1), Value::from("s")],
        )?;

        assert_eq!(encode(&record)?, r#"{"b":1,"a":"s"}"#);
        Ok(())
    }

    #[test]
    fn encode_recurses_into_nested_records() -> anyhow::Result<()> {
        let inner = foo_of(1, 2);
        let outer = Record::from_named(
            Schema::ordered("Outer", ["inner", "tag"])?,
            [("inner", Value::from(inner)), ("tag", Value::from("t"))],
        )?;

        assert_eq!(encode(&outer)?, r#"{"inner":{"x":1,"y":2},"tag":"t"}"#);
        Ok(())
    }

    #[test]
    fn decode_does_not_recurse() -> anyhow::Result<()> {
        let decoded = decode(r#"{"inner":{"x":1,"y":2},"tag":"t"}"#)?;

        assert_eq!(decoded.schema().name(), "Record");
        let inner = decoded.get("inner")?;
        assert_eq!(
            inner,
            &Value::from(BTreeMap::from([
                ("x".to_owned(), Value::from(1)),
                ("y".to_owned(), Value::from(2)),
            ]))
        );
        Ok(())
    }

    #[test]
    fn decode_uses_as_encountered_field_order() -> anyhow::Result<()> {
        let decoded = decode(r#"{"b": 1, "a": 2, "b": 3}"#)?;

        // The duplicate key keeps its first position and the last value.
        let pairs: Vec<_> = decoded.iter().collect();
        assert_eq!(pairs, [("b", &Value::from(3)), ("a", &Value::from(2))]);
        Ok(())
    }

    #[test]
    fn decode_rejects_non_object_documents() {
        assert!(decode("[1, 2]").is_err());
        assert!(decode("42").is_err());
        assert!(decode("not json at all").is_err());
    }

    #[test]
    fn non_finite_floats_follow_the_encoder() -> anyhow::Result<()> {
        // serde_json renders non-finite floats as null; that behavior is
        // passed through untranslated.
        let record = foo_of(f64::NAN, 1);
        assert_eq!(encode(&record)?, r#"{"x":null,"y":1}"#);
        Ok(())
    }

    #[test]
    fn decode_value_accepts_in_memory_documents() -> anyhow::Result<()> {
        let decoded = decode_value(serde_json::json!({"x": 1, "y": [true, null]}))?;

        assert_eq!(decoded.get("x")?, &Value::from(1));
        assert_eq!(
            decoded.get("y")?,
            &Value::from(vec![Value::from(true), Value::Null])
        );
        Ok(())
    }
}
