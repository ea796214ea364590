//! Conversions between Polars values and SQLite values.

use polars::prelude::{AnyValue, Column, IntoColumn, NamedFrom, Series};
use rusqlite::types::Value as SqlValue;

/// Converts a Polars AnyValue into the SQLite value stored for it.
///
/// Integers stay integers, floats become REAL (NaN is stored as NULL),
/// booleans become 0/1 and anything without a native SQLite form is stored
/// as its display text.
pub(crate) fn any_to_sql(value: AnyValue<'_>) -> SqlValue {
    match value {
        AnyValue::Null => SqlValue::Null,
        AnyValue::Boolean(b) => SqlValue::Integer(i64::from(b)),
        AnyValue::String(s) => SqlValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => SqlValue::Text(s.to_string()),
        AnyValue::Binary(b) => SqlValue::Blob(b.to_vec()),
        AnyValue::BinaryOwned(b) => SqlValue::Blob(b),
        AnyValue::Float32(v) => real(f64::from(v)),
        AnyValue::Float64(v) => real(v),
        AnyValue::Int64(v) => SqlValue::Integer(v),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(int) => SqlValue::Integer(int),
            Err(_) => SqlValue::Real(v as f64),
        },
        other if other.dtype().is_integer() => other
            .extract::<i64>()
            .map_or(SqlValue::Null, SqlValue::Integer),
        other => SqlValue::Text(other.to_string()),
    }
}

fn real(v: f64) -> SqlValue {
    if v.is_nan() {
        SqlValue::Null
    } else {
        SqlValue::Real(v)
    }
}

/// Storage classes seen in one result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Empty,
    Integer,
    Numeric,
    Text,
    Mixed,
}

impl ColumnKind {
    fn observe(self, value: &SqlValue) -> Self {
        use ColumnKind::{Empty, Integer, Mixed, Numeric, Text};
        match (self, value) {
            (kind, SqlValue::Null) => kind,
            (Empty | Integer, SqlValue::Integer(_)) => Integer,
            (Empty | Integer | Numeric, SqlValue::Integer(_) | SqlValue::Real(_)) => Numeric,
            (Empty | Text, SqlValue::Text(_)) => Text,
            _ => Mixed,
        }
    }
}

/// Renders a SQLite value as text; blobs become lowercase hex and reals keep
/// a fractional part so they stay distinct from integers.
pub(crate) fn sql_to_text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Null => None,
        SqlValue::Integer(v) => Some(v.to_string()),
        SqlValue::Real(v) => Some(format!("{v:?}")),
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Blob(b) => Some(hex::encode(b)),
    }
}

/// Builds a Polars column from the values SQLite returned for it.
///
/// Integer-only columns become Int64, integer/real columns Float64, and
/// everything else (text, blobs, mixed classes, all-NULL) a String column.
pub(crate) fn sql_column(name: &str, values: &[SqlValue]) -> Column {
    let kind = values
        .iter()
        .fold(ColumnKind::Empty, |kind, value| kind.observe(value));

    let series = match kind {
        ColumnKind::Integer => {
            let ints: Vec<Option<i64>> = values
                .iter()
                .map(|value| match value {
                    SqlValue::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), ints)
        }
        ColumnKind::Numeric => {
            let floats: Vec<Option<f64>> = values
                .iter()
                .map(|value| match value {
                    SqlValue::Integer(v) => Some(*v as f64),
                    SqlValue::Real(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), floats)
        }
        ColumnKind::Empty | ColumnKind::Text | ColumnKind::Mixed => {
            let texts: Vec<Option<String>> = values.iter().map(sql_to_text).collect();
            Series::new(name.into(), texts)
        }
    };
    series.into_column()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn test_any_to_sql_scalars() {
        assert_eq!(any_to_sql(AnyValue::Null), SqlValue::Null);
        assert_eq!(any_to_sql(AnyValue::Int64(7)), SqlValue::Integer(7));
        assert_eq!(any_to_sql(AnyValue::Int32(-3)), SqlValue::Integer(-3));
        assert_eq!(any_to_sql(AnyValue::Float64(2.5)), SqlValue::Real(2.5));
        assert_eq!(any_to_sql(AnyValue::Float64(f64::NAN)), SqlValue::Null);
        assert_eq!(any_to_sql(AnyValue::Boolean(true)), SqlValue::Integer(1));
        assert_eq!(
            any_to_sql(AnyValue::String("US_CA")),
            SqlValue::Text("US_CA".to_string())
        );
    }

    #[test]
    fn test_any_to_sql_large_unsigned_becomes_real() {
        assert_eq!(any_to_sql(AnyValue::UInt64(5)), SqlValue::Integer(5));
        assert_eq!(
            any_to_sql(AnyValue::UInt64(u64::MAX)),
            SqlValue::Real(u64::MAX as f64)
        );
    }

    #[test]
    fn test_integer_column() {
        let column = sql_column("n", &[SqlValue::Integer(1), SqlValue::Null]);
        assert_eq!(column.dtype(), &DataType::Int64);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_numeric_column_widens_to_float() {
        let column = sql_column("x", &[SqlValue::Integer(1), SqlValue::Real(1.5)]);
        assert_eq!(column.dtype(), &DataType::Float64);
    }

    #[test]
    fn test_mixed_column_is_text() {
        let column = sql_column(
            "m",
            &[
                SqlValue::Integer(1),
                SqlValue::Text("a".to_string()),
                SqlValue::Blob(vec![0xab, 0x01]),
            ],
        );
        assert_eq!(column.dtype(), &DataType::String);
        let values: Vec<Option<&str>> = column.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("1"), Some("a"), Some("ab01")]);
    }

    #[test]
    fn test_reals_in_text_column_keep_fraction() {
        let column = sql_column(
            "m",
            &[
                SqlValue::Integer(1),
                SqlValue::Real(1.0),
                SqlValue::Real(2.5),
                SqlValue::Text("n/a".to_string()),
            ],
        );
        let values: Vec<Option<&str>> = column.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("1"), Some("1.0"), Some("2.5"), Some("n/a")]);
    }

    #[test]
    fn test_all_null_column_is_text() {
        let column = sql_column("z", &[SqlValue::Null, SqlValue::Null]);
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column.null_count(), 2);
    }
}
