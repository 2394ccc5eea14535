use crate::common::*;

use std::cmp::Ordering;

/* Markers treated as an absent value when reading tabular text */
pub const MISSING_MARKERS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /* integral column, kept exact beyond f64 precision */
    Integer(i64),
    Number(f64),
    Text(String),
    Missing,
}

#[doc = "Formats a number the way it was most likely written: integral values without a fraction."]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    #[doc = "Display label used for category axes, legends and de-duplication."]
    pub fn label(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(t) => t.clone(),
            CellValue::Missing => String::new(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Integer(i) => json!(*i),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    json!(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
            CellValue::Text(t) => Value::String(t.clone()),
            CellValue::Missing => Value::Null,
        }
    }

    #[doc = r#"
        Exact equality against a filter value sent by a client.

        Text compares as text. Numbers compare numerically, and a string target against a
        numeric cell is parsed first, since select boxes send every option back as a string.
    "#]
    pub fn matches(&self, target: &Value) -> bool {
        match (self, target) {
            (CellValue::Text(t), Value::String(s)) => t == s,
            (CellValue::Text(t), Value::Number(n)) => n
                .as_f64()
                .map(|n| *t == format_number(n))
                .unwrap_or(false),
            (CellValue::Text(t), Value::Bool(b)) => *t == b.to_string(),
            (CellValue::Integer(i), Value::Number(n)) => match n.as_i64() {
                Some(v) => v == *i,
                None => n.as_f64() == Some(*i as f64),
            },
            (CellValue::Integer(i), Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(v) => v == *i,
                Err(_) => s.trim().parse::<f64>().ok() == Some(*i as f64),
            },
            (CellValue::Number(x), Value::Number(n)) => n.as_f64() == Some(*x),
            (CellValue::Number(x), Value::String(s)) => s.trim().parse::<f64>().ok() == Some(*x),
            (CellValue::Missing, Value::Null) => true,
            _ => false,
        }
    }

    #[doc = "Ascending order used for pivot keys: numbers first (numerically), then text, then missing."]
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        if let (CellValue::Integer(a), CellValue::Integer(b)) = (self, other) {
            return a.cmp(b);
        }

        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (self, other) {
                (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
                (CellValue::Text(_), _) => Ordering::Less,
                (_, CellValue::Text(_)) => Ordering::Greater,
                _ => Ordering::Equal,
            },
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_serialize_as_integers() {
        assert_eq!(CellValue::Number(45000.0).to_json(), json!(45000));
        assert_eq!(CellValue::Number(0.15).to_json(), json!(0.15));
        assert_eq!(CellValue::Missing.to_json(), Value::Null);
    }

    #[test]
    fn large_integers_stay_exact() {
        let id: CellValue = CellValue::Integer(1234567890123456789);
        assert_eq!(id.to_json(), json!(1234567890123456789i64));
        assert_eq!(id.label(), "1234567890123456789");
        assert!(id.matches(&json!("1234567890123456789")));
        assert!(!id.matches(&json!("1234567890123456788")));
        assert_eq!(
            id.sort_cmp(&CellValue::Integer(1234567890123456788)),
            Ordering::Greater
        );
    }

    #[test]
    fn string_filter_value_matches_numeric_cell() {
        assert!(CellValue::Number(2023.0).matches(&json!("2023")));
        assert!(CellValue::Number(2023.0).matches(&json!(2023)));
        assert!(!CellValue::Number(2023.0).matches(&json!("2024")));
    }

    #[test]
    fn text_matching_is_exact() {
        assert!(CellValue::Text("North".into()).matches(&json!("North")));
        assert!(!CellValue::Text("North".into()).matches(&json!("north")));
        assert!(!CellValue::Text("Northwest".into()).matches(&json!("North")));
    }

    #[test]
    fn numbers_sort_before_text() {
        let mut cells = vec![
            CellValue::Text("b".into()),
            CellValue::Number(3.0),
            CellValue::Missing,
            CellValue::Integer(2),
            CellValue::Text("a".into()),
            CellValue::Number(-1.0),
        ];
        cells.sort_by(|a, b| a.sort_cmp(b));
        let labels: Vec<String> = cells.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["-1", "2", "3", "a", "b", ""]);
    }
}
