//! Converts a heterogeneous sequence of [`Value`]s into the monomorphic
//! vector a chosen L1 codec consumes.

use crate::error::{Result, TypeCoercionSnafu};
use crate::value::Value;

pub fn to_i64_vec(values: &[Value]) -> Result<Vec<i64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            Value::Integer(i) => Ok(*i),
            Value::Real(f) => Ok(*f as i64),
            _ => TypeCoercionSnafu {
                index,
                target: "i64",
            }
            .fail(),
        })
        .collect()
}

pub fn to_f64_vec(values: &[Value]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            Value::Integer(i) => Ok(*i as f64),
            Value::Real(f) => Ok(*f),
            _ => TypeCoercionSnafu {
                index,
                target: "f64",
            }
            .fail(),
        })
        .collect()
}

pub fn to_string_vec(values: &[Value]) -> Result<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            Value::Text(s) => Ok(s.clone()),
            _ => TypeCoercionSnafu {
                index,
                target: "String",
            }
            .fail(),
        })
        .collect()
}

pub fn to_bool_vec(values: &[Value]) -> Result<Vec<bool>> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            Value::Boolean(b) => Ok(*b),
            Value::Integer(i) => Ok(*i != 0),
            Value::Real(f) => Ok(*f != 0.0),
            _ => TypeCoercionSnafu {
                index,
                target: "bool",
            }
            .fail(),
        })
        .collect()
}
