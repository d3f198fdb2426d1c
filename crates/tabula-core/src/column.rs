use std::collections::HashMap;

use crate::error::{DataError, DataResult};
use crate::value::Value;

/// How a column's values map to and from the uniform `f64` raw encoding.
///
/// Float columns store the parsed value as-is. String columns intern each
/// distinct string under a sequential code, starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Float,
    String(StringEncoding),
}

/// Bidirectional `string <-> code` mapping owned by a string column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringEncoding {
    codes: HashMap<String, usize>,
    values: Vec<String>,
}

impl StringEncoding {
    pub fn new() -> Self {
        StringEncoding {
            codes: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Number of distinct strings seen so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Code of `value`, allocating the next one on first sight.
    pub fn persist(&mut self, value: &str) -> f64 {
        if let Some(&code) = self.codes.get(value) {
            return code as f64;
        }
        let code = self.values.len();
        self.values.push(value.to_string());
        self.codes.insert(value.to_string(), code);
        code as f64
    }

    /// Code of `value` if it was persisted before.
    pub fn code(&self, value: &str) -> Option<f64> {
        self.codes.get(value).map(|&code| code as f64)
    }

    /// Reverse lookup of a persisted code.
    pub fn value(&self, raw: f64) -> DataResult<&str> {
        if raw < 0.0 || raw.fract() != 0.0 {
            return Err(DataError::UnknownCode { code: raw });
        }
        self.values
            .get(raw as usize)
            .map(String::as_str)
            .ok_or(DataError::UnknownCode { code: raw })
    }
}

impl ColumnType {
    /// Type a column from one representative value.
    ///
    /// Numeric text gives a float column, anything else a fresh string
    /// column. Numeric text that overflows `f64` is an error.
    pub fn infer(value: &str) -> DataResult<ColumnType> {
        match parse_float(value) {
            Ok(_) => Ok(ColumnType::Float),
            Err(DataError::InvalidFloat { .. }) => Ok(ColumnType::String(StringEncoding::new())),
            Err(e) => Err(e),
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ColumnType::Float)
    }

    /// Encode `value`, interning it first if this is a string column.
    pub fn persist_raw_from_string(&mut self, value: &str) -> DataResult<f64> {
        match self {
            ColumnType::Float => parse_float(value),
            ColumnType::String(encoding) => Ok(encoding.persist(value)),
        }
    }

    /// Decode a raw value back to its natural representation.
    pub fn value_from_raw(&self, raw: f64) -> DataResult<Value> {
        match self {
            ColumnType::Float => Ok(Value::Float(raw)),
            ColumnType::String(encoding) => encoding.value(raw).map(Value::from),
        }
    }
}

/// Infer one column type per entry of a representative (usually the first) data row.
pub fn infer_column_types<S: AsRef<str>>(row: &[S]) -> DataResult<Vec<ColumnType>> {
    row.iter().map(|value| ColumnType::infer(value.as_ref())).collect()
}

/// Parse a 64-bit float, telling syntax errors apart from overflow.
///
/// `str::parse` saturates overflowing input to infinity, so an infinite
/// result is only accepted when the text spells infinity explicitly.
pub fn parse_float(value: &str) -> DataResult<f64> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_infinite() && !spells_infinity(value) => {
            Err(DataError::FloatOutOfRange {
                value: value.to_string(),
            })
        }
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(DataError::InvalidFloat {
            value: value.to_string(),
        }),
    }
}

fn spells_infinity(value: &str) -> bool {
    let unsigned = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
