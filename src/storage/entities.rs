use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of work an entry is logged under. The set is closed, the order of the variants is the
/// order categories are reported in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Development,
    Design,
    Meetings,
    Research,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Development => "development",
            Category::Design => "design",
            Category::Meetings => "meetings",
            Category::Research => "research",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single logged piece of work. This is what is stored on disk by the local store, returned by
/// the remote api, and written into exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// Assigned by the remote api. Entries kept locally never have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub date: NaiveDate,
    pub hours: Hours,
    pub category: Category,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl WorkLogEntry {
    pub fn with_id(self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

/// Body of a creation request. Also what the `log` command collects from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkLog {
    pub date: NaiveDate,
    pub hours: f64,
    pub category: Category,
    pub description: String,
}

impl From<NewWorkLog> for WorkLogEntry {
    fn from(
        NewWorkLog {
            date,
            hours,
            category,
            description,
        }: NewWorkLog,
    ) -> Self {
        WorkLogEntry {
            id: None,
            date,
            hours: hours.into(),
            category,
            description,
            created_at: None,
        }
    }
}

/// Hours of an entry exactly as they were stored. Collections written by other tools may hold text
/// or nothing at all here, so the value is kept untouched and only converted by [Hours::value].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(Value);

impl Hours {
    /// Reads the stored value the way a numeric conversion would. Numbers pass through, numeric
    /// text is parsed, blank text and `null` count as 0, anything unreadable is NaN.
    pub fn value(&self) -> f64 {
        to_number(&self.0)
    }
}

impl From<f64> for Hours {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.,
        Value::Bool(v) => f64::from(u8::from(*v)),
        Value::Number(v) => v.as_f64().unwrap_or(f64::NAN),
        Value::String(v) => parse_number(v),
        // Arrays convert through their text form, which is only a number with a single element
        Value::Array(items) => match items.as_slice() {
            [] | [Value::Null] => 0.,
            [item @ (Value::Number(_) | Value::String(_) | Value::Array(_))] => to_number(item),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return u128::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
    }

    // Rust also accepts spellings like "inf" or "nan", those are not numbers here
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}
