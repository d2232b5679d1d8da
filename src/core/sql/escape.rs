//! Conversion of [`Value`]s into SQL literals.
use crate::core::db::Dialect;
use crate::core::value::Value;

/// Renders a value as a literal that is safe to splice into SQL text.
///
/// Numbers are unquoted, `Null` is the `NULL` keyword, text is quoted with
/// embedded single quotes doubled. For embedded dialects every colon in text is
/// written as `\:`.
pub fn escape(value: &Value, dialect: Dialect) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => float_literal(*f),
        Value::Text(s) => {
            let quoted = double_quotes(s);
            if dialect.is_embedded() {
                format!("'{}'", quoted.replace(':', "\\:"))
            } else {
                format!("'{}'", quoted)
            }
        }
    }
}

/// Literal used on the right-hand side of a filter equality.
///
/// Integers go in raw; every other value is quoted. Text is written exactly as
/// [`escape`] writes it, so a stored value and a filter on it agree for every
/// dialect. Floats keep their fractional part inside the quotes. Callers
/// handle `Null` as `IS NULL`.
pub fn filter_literal(value: &Value, dialect: Dialect) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => format!("'{:?}'", f),
        Value::Float(f) => float_literal(*f),
        Value::Text(_) => escape(value, dialect),
        Value::Null => "'NULL'".to_string(),
    }
}

fn double_quotes(s: &str) -> String {
    s.replace('\'', "''")
}

fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "'NaN'".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "'Infinity'".to_string()
        } else {
            "'-Infinity'".to_string()
        }
    } else {
        // Debug keeps a fractional part (1.0 rather than 1)
        format!("{:?}", f)
    }
}
