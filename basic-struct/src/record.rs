mod de;
mod ser;
mod state;

use std::{cmp::Ordering, collections::HashMap, fmt, iter, slice, sync::Arc};

use indexmap::IndexMap;
use thiserror::Error;

pub use state::RecordState;

use crate::{
    schema::{FieldDef, Schema},
    value::Value,
};

/// An instance of a [`Schema`]: exactly one [`Value`] per declared field.
///
/// Records of the same schema compare as their field-value tuples in declared
/// order; records of different schemas are unequal and incomparable
/// ([`PartialOrd::partial_cmp`] returns [`None`]).
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Record {
    schema: Schema,
    values: Vec<Value>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Positional values need an ordered declaration to bind against.
    #[error("{type_name} declares an unordered field set; positional values are not supported")]
    PositionalOnUnordered { type_name: Arc<str> },
    #[error("{type_name} has no field named {field:?}")]
    UnknownField { type_name: Arc<str>, field: Arc<str> },
}

/// Controls whether mapping snapshots share compound value storage with the
/// record or deep-copy it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMode {
    Shared,
    Deep,
}

impl Record {
    /// Creates a record with every field set to its declared default, or
    /// null.
    pub fn new(schema: Schema) -> Self {
        let values = schema.fields().iter().map(FieldDef::fill_value).collect();
        Self { schema, values }
    }

    /// Creates a record from values bound to fields in declared order.
    ///
    /// Surplus values beyond the declared fields are dropped. Fails if the
    /// schema is an unordered declaration.
    pub fn from_positional<P>(schema: Schema, positional: P) -> Result<Self, RecordError>
    where
        P: IntoIterator<Item = Value>,
    {
        Self::from_args(schema, positional, iter::empty())
    }

    /// Creates a record from values bound by field name.
    pub fn from_named<'a, N>(schema: Schema, named: N) -> Result<Self, RecordError>
    where
        N: IntoIterator<Item = (&'a str, Value)>,
    {
        Self::from_args(schema, iter::empty(), named)
    }

    /// Creates a record from positional and named values at once.
    ///
    /// Positional values bind first; a named value for the same field
    /// overwrites it. Every field left unset receives its declared default,
    /// or null.
    pub fn from_args<'a, P, N>(schema: Schema, positional: P, named: N) -> Result<Self, RecordError>
    where
        P: IntoIterator<Item = Value>,
        N: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut slots: Vec<Option<Value>> = vec![None; schema.len()];

        let mut positional = positional.into_iter();
        if schema.is_ordered() {
            for (slot, value) in slots.iter_mut().zip(&mut positional) {
                *slot = Some(value);
            }
        } else if positional.next().is_some() {
            return Err(RecordError::PositionalOnUnordered {
                type_name: Arc::from(schema.name()),
            });
        }

        for (name, value) in named {
            let index = schema.position(name).ok_or_else(|| RecordError::UnknownField {
                type_name: Arc::from(schema.name()),
                field: Arc::from(name),
            })?;
            slots[index] = Some(value);
        }

        let values = slots
            .into_iter()
            .zip(schema.fields())
            .map(|(slot, field)| slot.unwrap_or_else(|| field.fill_value()))
            .collect();

        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up a field value by name.
    pub fn get(&self, name: &str) -> Result<&Value, RecordError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| self.unknown_field(name))?;
        Ok(&self.values[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Value, RecordError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| self.unknown_field(name))?;
        Ok(&mut self.values[index])
    }

    /// Replaces a field value. The value itself is not validated.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), RecordError> {
        *self.get_mut(name)? = value;
        Ok(())
    }

    /// The field values in declared order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates over `(name, value)` pairs in declared order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            fields: self.schema.fields().iter(),
            values: self.values.iter(),
        }
    }

    /// An unordered `field -> value` snapshot.
    pub fn to_map(&self, mode: CopyMode) -> HashMap<String, Value> {
        self.iter()
            .map(|(name, value)| (name.to_owned(), mode.apply(value)))
            .collect()
    }

    /// A `field -> value` snapshot preserving declared field order.
    pub fn to_ordered_map(&self, mode: CopyMode) -> IndexMap<String, Value> {
        self.iter()
            .map(|(name, value)| (name.to_owned(), mode.apply(value)))
            .collect()
    }

    /// Returns a record sharing no compound value storage with `self`.
    pub fn deep_copy(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            values: self.values.iter().map(Value::deep_copy).collect(),
        }
    }

    fn unknown_field(&self, name: &str) -> RecordError {
        RecordError::UnknownField {
            type_name: Arc::from(self.schema.name()),
            field: Arc::from(name),
        }
    }
}

impl CopyMode {
    fn apply(self, value: &Value) -> Value {
        match self {
            CopyMode::Shared => value.clone(),
            CopyMode::Deep => value.deep_copy(),
        }
    }
}

impl PartialOrd for Record {
    /// Lexicographic comparison of the field-value tuples.
    ///
    /// Records of different schemas, and field pairs of incomparable kinds,
    /// yield [`None`].
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.schema != other.schema {
            return None;
        }

        for (lhs, rhs) in self.values.iter().zip(&other.values) {
            match lhs.partial_cmp(rhs)? {
                Ordering::Equal => continue,
                ordering => return Some(ordering),
            }
        }
        Some(Ordering::Equal)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema.name())?;
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

pub struct Iter<'a> {
    fields: slice::Iter<'a, FieldDef>,
    values: slice::Iter<'a, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.fields.next()?.name(), self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
