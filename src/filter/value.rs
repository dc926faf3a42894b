use chrono::{DateTime, SecondsFormat, Utc};

/// A typed comparison literal.
///
/// The variant fixes the wire key the literal is sent under, so a filter
/// built from an `i64` always compiles to `valueInt` and one built from a
/// `bool` always compiles to `valueBoolean`. Conversions follow this
/// precedence when classifying a plain value: text, then integer, then
/// float, then boolean, then date, with text as the fallback for anything
/// string-like.
///
/// # Examples
///
/// ```
/// use sprig::filter::FilterValue;
///
/// let text = FilterValue::from("apple");
/// let count = FilterValue::from(42);
///
/// assert_eq!(text.key(), "valueText");
/// assert_eq!(count.key(), "valueInt");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Text literal (`valueText`)
    Text(String),

    /// Integer literal (`valueInt`)
    Int(i64),

    /// Floating-point literal (`valueNumber`)
    Number(f64),

    /// Boolean literal (`valueBoolean`)
    Boolean(bool),

    /// Instant in time, rendered as RFC 3339 (`valueDate`)
    Date(DateTime<Utc>),

    /// List of text values for membership checks (`valueText`)
    TextList(Vec<String>),
}

impl FilterValue {
    /// The wire key this literal is sent under.
    pub fn key(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "valueText",
            FilterValue::Int(_) => "valueInt",
            FilterValue::Number(_) => "valueNumber",
            FilterValue::Boolean(_) => "valueBoolean",
            FilterValue::Date(_) => "valueDate",
            FilterValue::TextList(_) => "valueText",
        }
    }

    /// The literal as a JSON value, as it appears in a node record.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FilterValue::Text(s) => serde_json::Value::String(s.clone()),
            FilterValue::Int(n) => serde_json::Value::from(*n),
            FilterValue::Number(n) => serde_json::Value::from(*n),
            FilterValue::Boolean(b) => serde_json::Value::Bool(*b),
            FilterValue::Date(d) => serde_json::Value::String(rfc3339(d)),
            FilterValue::TextList(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

/// RFC 3339 rendering used on the wire for date literals.
pub(crate) fn rfc3339(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Int(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Int(n as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(d: DateTime<Utc>) -> Self {
        FilterValue::Date(d)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        FilterValue::TextList(items)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(items: Vec<&str>) -> Self {
        FilterValue::TextList(items.into_iter().map(String::from).collect())
    }
}
