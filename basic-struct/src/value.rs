pub mod number;

mod convert;
mod de;
mod ser;

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt::{self, Write},
    hash::{Hash, Hasher},
    sync::Arc,
};

pub use number::Number;

use crate::record::Record;

/// A dynamically typed field value.
///
/// Compound variants share their storage through [`Arc`], so cloning a value
/// never copies a list, map, or record; [`Value::deep_copy`] produces a value
/// with fresh storage instead.
///
/// Values of the same [`ValueKind`] compare structurally. Values of different
/// kinds are never equal and are incomparable: [`PartialOrd::partial_cmp`]
/// returns [`None`], which callers must check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    List(Arc<Vec<Value>>),
    Map(Arc<BTreeMap<String, Value>>),
    Record(Arc<Record>),
}

/// Discriminates the kinds of [`Value`], used as a hash tag and for
/// diagnostics.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
    Record,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Record(_) => ValueKind::Record,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns a value sharing no compound storage with `self`.
    ///
    /// Lists, maps, and records are cloned recursively into fresh
    /// allocations. Strings are immutable and stay shared.
    pub fn deep_copy(&self) -> Self {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => self.clone(),
            Value::List(values) => {
                Value::List(Arc::new(values.iter().map(Value::deep_copy).collect()))
            }
            Value::Map(entries) => Value::Map(Arc::new(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.deep_copy()))
                    .collect(),
            )),
            Value::Record(record) => Value::Record(Arc::new(record.deep_copy())),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => ValueKind::Null.hash(state),
            Value::Bool(value) => {
                ValueKind::Bool.hash(state);
                value.hash(state);
            }
            Value::Number(value) => {
                ValueKind::Number.hash(state);
                value.hash(state);
            }
            Value::String(value) => {
                ValueKind::String.hash(state);
                value.hash(state);
            }
            Value::List(values) => {
                ValueKind::List.hash(state);
                values.hash(state);
            }
            Value::Map(entries) => {
                ValueKind::Map.hash(state);
                entries.hash(state);
            }
            Value::Record(record) => {
                ValueKind::Record.hash(state);
                record.hash(state);
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(lhs), Value::Bool(rhs)) => Some(lhs.cmp(rhs)),
            (Value::Number(lhs), Value::Number(rhs)) => Some(lhs.cmp(rhs)),
            (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
            (Value::List(lhs), Value::List(rhs)) => partial_cmp_lists(lhs, rhs),
            (Value::Map(lhs), Value::Map(rhs)) => partial_cmp_maps(lhs, rhs),
            (Value::Record(lhs), Value::Record(rhs)) => lhs.partial_cmp(rhs),
            _ => None,
        }
    }
}

/// Lexicographic list comparison; an incomparable element pair makes the
/// lists incomparable.
fn partial_cmp_lists(lhs: &[Value], rhs: &[Value]) -> Option<Ordering> {
    for (lhs, rhs) in lhs.iter().zip(rhs) {
        match lhs.partial_cmp(rhs)? {
            Ordering::Equal => continue,
            ordering => return Some(ordering),
        }
    }
    Some(lhs.len().cmp(&rhs.len()))
}

/// Lexicographic comparison over the key-sorted entry sequences.
fn partial_cmp_maps(
    lhs: &BTreeMap<String, Value>,
    rhs: &BTreeMap<String, Value>,
) -> Option<Ordering> {
    for ((lhs_key, lhs_value), (rhs_key, rhs_value)) in lhs.iter().zip(rhs) {
        match lhs_key.cmp(rhs_key) {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
        match lhs_value.partial_cmp(rhs_value)? {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
    }
    Some(lhs.len().cmp(&rhs.len()))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Number(value) => write!(f, "{value}"),
            Value::String(value) => write_quoted(f, value),
            Value::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_str("}")
            }
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, string: &str) -> fmt::Result {
    f.write_str("'")?;
    for char in string.chars() {
        match char {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            char => f.write_char(char)?,
        }
    }
    f.write_str("'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: impl IntoIterator<Item = Value>) -> Value {
        Value::from(values.into_iter().collect::<Vec<_>>())
    }

    #[test]
    fn different_kinds_are_incomparable() {
        let number = Value::from(1);
        let string = Value::from("1");

        assert_ne!(number, string);
        assert_ne!(string, number);
        assert_eq!(number.partial_cmp(&string), None);
        assert_eq!(string.partial_cmp(&number), None);
        assert_eq!(Value::Null.partial_cmp(&Value::from(false)), None);
    }

    #[test]
    fn lists_compare_lexicographically() {
        let short = list([Value::from(1), Value::from(2)]);
        let long = list([Value::from(1), Value::from(2), Value::from(0)]);
        let bigger = list([Value::from(1), Value::from(3)]);

        assert_eq!(short.partial_cmp(&long), Some(Ordering::Less));
        assert_eq!(bigger.partial_cmp(&long), Some(Ordering::Greater));
        assert_eq!(short.partial_cmp(&short.clone()), Some(Ordering::Equal));

        let mixed = list([Value::from(1), Value::from("two")]);
        assert_eq!(short.partial_cmp(&mixed), None);
    }

    #[test]
    fn maps_compare_by_sorted_entries() {
        let lhs = Value::from(BTreeMap::from([
            ("a".to_owned(), Value::from(1)),
            ("b".to_owned(), Value::from(2)),
        ]));
        let rhs = Value::from(BTreeMap::from([
            ("a".to_owned(), Value::from(1)),
            ("b".to_owned(), Value::from(3)),
        ]));

        assert_eq!(lhs.partial_cmp(&rhs), Some(Ordering::Less));
        assert_eq!(rhs.partial_cmp(&lhs), Some(Ordering::Greater));
    }

    #[test]
    fn display_formats() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(2.0).to_string(), "2.0");
        assert_eq!(Value::from("it's").to_string(), r"'it\'s'");
        assert_eq!(
            list([Value::from(1), Value::from("a")]).to_string(),
            "[1, 'a']"
        );
        assert_eq!(
            Value::from(BTreeMap::from([("a".to_owned(), Value::from(1))])).to_string(),
            "{'a': 1}"
        );
    }

    #[test]
    fn deep_copy_detaches_storage() {
        let original = list([Value::from(1)]);
        let shared = original.clone();
        let deep = original.deep_copy();

        assert_eq!(original, shared);
        assert_eq!(original, deep);

        let (Value::List(original), Value::List(shared), Value::List(deep)) =
            (&original, &shared, &deep)
        else {
            panic!("lists expected");
        };
        assert!(Arc::ptr_eq(original, shared));
        assert!(!Arc::ptr_eq(original, deep));
    }
}
