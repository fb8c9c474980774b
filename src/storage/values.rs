//! Conversions between JSON values, SQLite values and Rust scalars.
//!
//! Dataset columns are loosely typed (numbers are often stored as text), so
//! reads coerce: anything that does not parse becomes `None`.

use rusqlite::types::Value as SqlValue;
use serde_json::Value as JsonValue;

/// JSON value from stats.nba.com → SQLite value
pub fn json_to_sql(value: &JsonValue) -> SqlValue {
    match value {
        JsonValue::Null => SqlValue::Null,
        JsonValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        JsonValue::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Declared SQLite type for a column, from its first non-null value
pub fn declared_type<'a>(values: impl Iterator<Item = &'a JsonValue>) -> &'static str {
    for value in values {
        match value {
            JsonValue::Null => continue,
            JsonValue::Bool(_) => return "INTEGER",
            JsonValue::Number(n) if n.is_i64() => return "INTEGER",
            JsonValue::Number(_) => return "REAL",
            _ => return "TEXT",
        }
    }
    ""
}

pub fn sql_to_f64(value: &SqlValue) -> Option<f64> {
    match value {
        SqlValue::Integer(i) => Some(*i as f64),
        SqlValue::Real(f) if f.is_finite() => Some(*f),
        SqlValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Integer view; reals and numeric text count only when they have no fraction
pub fn sql_to_i64(value: &SqlValue) -> Option<i64> {
    match value {
        SqlValue::Integer(i) => Some(*i),
        SqlValue::Text(s) if s.trim().parse::<i64>().is_ok() => s.trim().parse().ok(),
        other => sql_to_f64(other)
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64),
    }
}

pub fn sql_to_text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Integer(i) => Some(i.to_string()),
        SqlValue::Real(f) => Some(f.to_string()),
        SqlValue::Null | SqlValue::Blob(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_to_sql() {
        assert_eq!(json_to_sql(&json!(null)), SqlValue::Null);
        assert_eq!(json_to_sql(&json!(true)), SqlValue::Integer(1));
        assert_eq!(json_to_sql(&json!(2544)), SqlValue::Integer(2544));
        assert_eq!(json_to_sql(&json!(0.476)), SqlValue::Real(0.476));
        assert_eq!(
            json_to_sql(&json!("2023-24")),
            SqlValue::Text("2023-24".to_string())
        );
        assert_eq!(
            json_to_sql(&json!([1, 2])),
            SqlValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn test_declared_type_skips_nulls() {
        let values = [json!(null), json!(12.5), json!(3)];
        assert_eq!(declared_type(values.iter()), "REAL");

        let values = [json!(null), json!(null)];
        assert_eq!(declared_type(values.iter()), "");

        let values = [json!("Made")];
        assert_eq!(declared_type(values.iter()), "TEXT");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(sql_to_i64(&SqlValue::Text(" 4 ".into())), Some(4));
        assert_eq!(sql_to_i64(&SqlValue::Text("4.0".into())), Some(4));
        assert_eq!(sql_to_i64(&SqlValue::Real(4.5)), None);
        assert_eq!(sql_to_i64(&SqlValue::Text("".into())), None);
        assert_eq!(sql_to_f64(&SqlValue::Text("26".into())), Some(26.0));
        assert_eq!(sql_to_f64(&SqlValue::Text("n/a".into())), None);
        assert_eq!(sql_to_f64(&SqlValue::Null), None);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(sql_to_text(&SqlValue::Integer(3)), Some("3".to_string()));
        assert_eq!(sql_to_text(&SqlValue::Null), None);
    }
}
