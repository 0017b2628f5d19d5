use std::{collections::BTreeMap, sync::Arc};

use super::{Number, Value};

use crate::record::Record;

macro_rules! impl_from_int_for_value {
    ( $( $T:ty ),* ) => { $(
        impl From<$T> for Value {
            fn from(value: $T) -> Self {
                Self::Number(Number::Int(value.into()))
            }
        }
    )* };
}

impl_from_int_for_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(Number::from(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(Arc::new(value))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Map(Arc::new(value))
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(Arc::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<Value> for bool {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(value) => Ok(value),
            value => Err(value),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => number.as_i64().ok_or(Value::Number(number)),
            value => Err(value),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => Ok(number.as_f64()),
            value => Err(value),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(value) => Ok(value.as_ref().to_owned()),
            value => Err(value),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = &'a Value;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(value) => Ok(value),
            value => Err(value),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(values) => {
                Ok(Arc::try_unwrap(values).unwrap_or_else(|arc| (*arc).clone()))
            }
            value => Err(value),
        }
    }
}

impl TryFrom<Value> for BTreeMap<String, Value> {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(entries) => {
                Ok(Arc::try_unwrap(entries).unwrap_or_else(|arc| (*arc).clone()))
            }
            value => Err(value),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Record(record) => {
                Ok(Arc::try_unwrap(record).unwrap_or_else(|arc| (*arc).clone()))
            }
            value => Err(value),
        }
    }
}
