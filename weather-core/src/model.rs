use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Default strftime pattern for list dates (US-style `1/5/2025`).
///
/// The OS locale is not consulted; other locales set `date_format` in the config.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Shown in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_KEYS: &[&str] = &["date", "Date", "DateOnly"];
const TEMPERATURE_C_KEYS: &[&str] = &["temperatureC", "TemperatureC"];
const SUMMARY_KEYS: &[&str] = &["summary", "Summary"];
const TEMPERATURE_F_KEYS: &[&str] = &["temperatureF", "TemperatureF"];

/// One forecast record in canonical shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    pub date: String,
    pub temperature_c: f64,
    pub summary: String,
    pub temperature_f: Option<f64>,
}

impl Forecast {
    /// Map a loosely-typed backend record onto the canonical shape.
    ///
    /// Lower-camel keys win over capitalized ones; a `null` value falls
    /// through to the next key. Anything that is not an object yields the
    /// all-default forecast.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            date: first_string(obj, DATE_KEYS).unwrap_or_default(),
            temperature_c: first_number(obj, TEMPERATURE_C_KEYS).unwrap_or(0.0),
            summary: first_string(obj, SUMMARY_KEYS).unwrap_or_default(),
            temperature_f: first_number(obj, TEMPERATURE_F_KEYS),
        }
    }

    /// Fahrenheit temperature: the provided value, or derived from Celsius.
    pub fn fahrenheit(&self) -> f64 {
        self.temperature_f
            .unwrap_or_else(|| derive_fahrenheit(self.temperature_c))
    }

    /// The raw date formatted for display in the local time zone.
    pub fn display_date(&self, format: &str) -> String {
        match parse_date(&self.date) {
            Some(date) => date.format(format).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }
}

/// `round(32 + c / 0.5556)`, with halves rounded toward positive infinity.
pub fn derive_fahrenheit(celsius: f64) -> f64 {
    (32.0 + celsius / 0.5556 + 0.5).floor()
}

/// Normalize a decoded response body. Order and length are preserved.
///
/// Returns `None` when the body is not a JSON array.
pub fn normalize_response(body: &Value) -> Option<Vec<Forecast>> {
    body.as_array()
        .map(|items| items.iter().map(Forecast::from_value).collect())
}

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    first_present(obj, keys).and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
