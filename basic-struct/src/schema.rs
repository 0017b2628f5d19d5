use std::sync::Arc;

use thiserror::Error;

use crate::value::Value;

/// A single declared field: its name and, for mapping declarations, the
/// default a missing construction argument falls back to.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FieldDef {
    name: Arc<str>,
    default: Option<Value>,
}

impl FieldDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The value a field takes when construction leaves it unset.
    pub(crate) fn fill_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate field name {0:?}")]
    DuplicateField(Arc<str>),
}

/// The field declaration of a record type.
///
/// Declared once, immutable afterwards, and cheap to clone. Field order is
/// stable and defines the tuple representation used by construction,
/// comparison, hashing, and iteration.
///
/// [Unordered](Schema::unordered) declarations store their fields sorted by
/// name for determinism and reject positional construction.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Schema {
    name: Arc<str>,
    fields: Arc<[FieldDef]>,
    ordered: bool,
}

impl Schema {
    /// A sequence declaration: ordered field names without defaults.
    pub fn ordered<N, S, I>(name: N, field_names: I) -> Result<Self, SchemaError>
    where
        N: Into<Arc<str>>,
        S: Into<Arc<str>>,
        I: IntoIterator<Item = S>,
    {
        Self::build(
            name.into(),
            field_names
                .into_iter()
                .map(|name| FieldDef {
                    name: name.into(),
                    default: None,
                })
                .collect(),
            true,
        )
    }

    /// A mapping declaration: ordered field names with declared defaults.
    pub fn with_defaults<N, S, I>(name: N, fields: I) -> Result<Self, SchemaError>
    where
        N: Into<Arc<str>>,
        S: Into<Arc<str>>,
        I: IntoIterator<Item = (S, Value)>,
    {
        Self::build(
            name.into(),
            fields
                .into_iter()
                .map(|(name, default)| FieldDef {
                    name: name.into(),
                    default: Some(default),
                })
                .collect(),
            true,
        )
    }

    /// A set declaration: field names without a meaningful order.
    ///
    /// Records over such a schema cannot be constructed positionally.
    pub fn unordered<N, S, I>(name: N, field_names: I) -> Result<Self, SchemaError>
    where
        N: Into<Arc<str>>,
        S: Into<Arc<str>>,
        I: IntoIterator<Item = S>,
    {
        let mut fields: Vec<FieldDef> = field_names
            .into_iter()
            .map(|name| FieldDef {
                name: name.into(),
                default: None,
            })
            .collect();
        fields.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));

        Self::build(name.into(), fields, false)
    }

    fn build(name: Arc<str>, fields: Vec<FieldDef>, ordered: bool) -> Result<Self, SchemaError> {
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|earlier| earlier.name == field.name) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self {
            name,
            fields: fields.into(),
            ordered,
        })
    }

    /// The record type name, used by the textual representation.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the declaration has a meaningful field order; positional
    /// construction is only permitted if it does.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// The position of a declared field name, if any.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| &*field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_fields_are_rejected() {
        let result = Schema::ordered("Foo", ["x", "y", "x"]);
        assert_eq!(result, Err(SchemaError::DuplicateField("x".into())));
    }

    #[test]
    fn declaration_order_is_kept() {
        let schema = Schema::with_defaults("Foo", [("b", Value::from(1)), ("a", Value::Null)])
            .unwrap();

        let names: Vec<_> = schema.fields().iter().map(FieldDef::name).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(schema.fields()[0].default(), Some(&Value::from(1)));
        assert!(schema.is_ordered());
    }

    #[test]
    fn unordered_declarations_sort_their_fields() {
        let schema = Schema::unordered("Foo", ["y", "x"]).unwrap();

        let names: Vec<_> = schema.fields().iter().map(FieldDef::name).collect();
        assert_eq!(names, ["x", "y"]);
        assert!(!schema.is_ordered());
    }

    #[test]
    fn position_lookup() {
        let schema = Schema::ordered("Foo", ["x", "y"]).unwrap();

        assert_eq!(schema.position("y"), Some(1));
        assert_eq!(schema.position("z"), None);
        assert!(schema.contains("x"));
        assert_eq!(schema.len(), 2);
    }
}
