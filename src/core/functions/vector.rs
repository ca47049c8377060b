// src/core/functions/vector.rs

//! Column vectors passed to and from scalar functions.

use crate::core::ClusterHashError;
use bytes::Bytes;
use strum_macros::Display;

/// The type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogicalType {
    Varchar,
    Integer,
}

/// A batch of values for one argument. `None` rows are NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vector {
    Varchar(Vec<Option<Bytes>>),
    Integer(Vec<Option<i32>>),
}

impl Vector {
    /// Builds a VARCHAR column from non-null keys.
    pub fn varchar<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Bytes>,
    {
        Vector::Varchar(keys.into_iter().map(|k| Some(k.into())).collect())
    }

    /// Builds an INTEGER column from non-null values.
    pub fn integer<I: IntoIterator<Item = i32>>(values: I) -> Self {
        Vector::Integer(values.into_iter().map(Some).collect())
    }

    /// An INTEGER column repeating `value` for `rows` rows, for constant arguments.
    pub fn constant_integer(value: i32, rows: usize) -> Self {
        Vector::Integer(vec![Some(value); rows])
    }

    pub fn logical_type(&self) -> LogicalType {
        match self {
            Vector::Varchar(_) => LogicalType::Varchar,
            Vector::Integer(_) => LogicalType::Integer,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Vector::Varchar(v) => v.len(),
            Vector::Integer(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_varchar(&self) -> Result<&[Option<Bytes>], ClusterHashError> {
        match self {
            Vector::Varchar(v) => Ok(v.as_slice()),
            other => Err(wrong_type(LogicalType::Varchar, other.logical_type())),
        }
    }

    pub fn as_integer(&self) -> Result<&[Option<i32>], ClusterHashError> {
        match self {
            Vector::Integer(v) => Ok(v.as_slice()),
            other => Err(wrong_type(LogicalType::Integer, other.logical_type())),
        }
    }
}

impl From<Vec<Option<Bytes>>> for Vector {
    fn from(values: Vec<Option<Bytes>>) -> Self {
        Vector::Varchar(values)
    }
}

impl From<Vec<Option<i32>>> for Vector {
    fn from(values: Vec<Option<i32>>) -> Self {
        Vector::Integer(values)
    }
}

fn wrong_type(expected: LogicalType, got: LogicalType) -> ClusterHashError {
    ClusterHashError::WrongType(format!("expected a {expected} column, got {got}"))
}
