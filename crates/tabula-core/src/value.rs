use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A decoded column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Str(String),
}

impl Value {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Float(_) => None,
            Value::Str(s) => Some(s),
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// An ordered projection of decoded values: a row's features or its target.
///
/// `Float` is used when every projected column is a float column, `Mixed`
/// otherwise. Equality compares decoded values, so the two variants compare
/// equal when their contents match.
#[derive(Debug, Clone)]
pub enum Slice {
    Float(Vec<f64>),
    Mixed(Vec<Value>),
}

/// The decoded values a model predicts or compares against.
pub type Target = Slice;

impl Slice {
    pub fn len(&self) -> usize {
        match self {
            Slice::Float(values) => values.len(),
            Slice::Mixed(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Slice::Float(values) => values.get(index).copied().map(Value::Float),
            Slice::Mixed(values) => values.get(index).cloned(),
        }
    }

    /// True when every entry is a float, whichever variant holds them.
    pub fn all_floats(&self) -> bool {
        match self {
            Slice::Float(_) => true,
            Slice::Mixed(values) => values.iter().all(Value::is_float),
        }
    }

    /// The entries as floats, borrowed when possible.
    ///
    /// Returns `None` if any entry is a string.
    pub fn floats(&self) -> Option<Cow<'_, [f64]>> {
        match self {
            Slice::Float(values) => Some(Cow::Borrowed(values)),
            Slice::Mixed(values) => values
                .iter()
                .map(Value::as_float)
                .collect::<Option<Vec<f64>>>()
                .map(Cow::Owned),
        }
    }

    pub fn to_values(&self) -> Vec<Value> {
        match self {
            Slice::Float(values) => values.iter().copied().map(Value::Float).collect(),
            Slice::Mixed(values) => values.clone(),
        }
    }
}

fn floats_match_values(floats: &[f64], values: &[Value]) -> bool {
    floats.len() == values.len()
        && floats
            .iter()
            .zip(values)
            .all(|(&a, b)| matches!(b, Value::Float(v) if *v == a))
}

impl PartialEq for Slice {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Slice::Float(a), Slice::Float(b)) => a == b,
            (Slice::Mixed(a), Slice::Mixed(b)) => a == b,
            (Slice::Float(a), Slice::Mixed(b)) | (Slice::Mixed(b), Slice::Float(a)) => {
                floats_match_values(a, b)
            }
        }
    }
}

impl From<Vec<f64>> for Slice {
    fn from(values: Vec<f64>) -> Self {
        Slice::Float(values)
    }
}

impl From<Vec<Value>> for Slice {
    fn from(values: Vec<Value>) -> Self {
        Slice::Mixed(values)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.to_values().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
