//! Core data types for hydroponic sensor readings
//!
//! This module defines the fundamental types shared by the client, the CSV
//! bridge and the API server:
//! - `Reading`: One set of measurements taken from the nutrient solution
//! - `ReadingId`: Client-generated identifier (numeric or free text)
//! - `Metric`: The five measured quantities and how to read them off a `Reading`

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a reading.
///
/// Generated ids are the creation time in milliseconds. Ids read from CSV
/// files are kept verbatim, so the id is stored as text and written back to
/// JSON as a number when it is a canonical unsigned integer. Ids that arrived
/// as JSON numbers (negative and fractional ones included) are written back as
/// numbers too. Equality and hashing look at the text only.
#[derive(Debug, Clone)]
pub struct ReadingId {
    text: String,
    numeric: bool,
}

impl ReadingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            numeric: false,
        }
    }

    /// Generate an id from the current time
    pub fn generate() -> Self {
        Self {
            text: Utc::now().timestamp_millis().to_string(),
            numeric: true,
        }
    }

    fn from_number(text: String) -> Self {
        Self {
            text,
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for ReadingId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ReadingId {}

impl std::hash::Hash for ReadingId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for ReadingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for ReadingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Ok(n) = self.text.parse::<u64>() {
            if n.to_string() == self.text {
                return serializer.serialize_u64(n);
            }
        }
        if self.numeric {
            if let Ok(n) = self.text.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
            if let Ok(f) = self.text.parse::<f64>() {
                if f.is_finite() {
                    return serializer.serialize_f64(f);
                }
            }
        }
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ReadingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(u64),
            Negative(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self::from_number(n.to_string()),
            RawId::Negative(n) => Self::from_number(n.to_string()),
            RawId::Float(f) => Self::from_number(f.to_string()),
            RawId::Text(s) => Self::new(s),
        })
    }
}

/// A single set of sensor measurements
///
/// `humidity` and `dissolved_oxy` are optional because CSV imports do not
/// carry them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: ReadingId,
    /// ISO 8601 timestamp, kept as received
    pub timestamp: String,
    /// Solution temperature in °C
    pub temperature: f64,
    pub ph: f64,
    /// Total dissolved solids in ppm
    pub tds: f64,
    /// Relative humidity in %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Dissolved oxygen in mg/L
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissolved_oxy: Option<f64>,
}

impl Reading {
    /// Create a reading with the core measurements
    pub fn new(
        id: ReadingId,
        timestamp: impl Into<String>,
        temperature: f64,
        ph: f64,
        tds: f64,
    ) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            temperature,
            ph,
            tds,
            humidity: None,
            dissolved_oxy: None,
        }
    }

    /// Builder method: set humidity
    pub fn humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    /// Builder method: set dissolved oxygen
    pub fn dissolved_oxy(mut self, dissolved_oxy: f64) -> Self {
        self.dissolved_oxy = Some(dissolved_oxy);
        self
    }

    /// Parsed timestamp, `None` if the stored text is not a recognized format
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Value of one metric on this reading
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Ph => Some(self.ph),
            Metric::Tds => Some(self.tds),
            Metric::Temperature => Some(self.temperature),
            Metric::Humidity => self.humidity,
            Metric::DissolvedOxygen => self.dissolved_oxy,
        }
    }

    /// True when every present measurement is a finite number
    pub fn is_finite(&self) -> bool {
        Metric::ALL
            .iter()
            .filter_map(|m| self.value(*m))
            .all(f64::is_finite)
    }
}

/// Current time formatted the way readings store it
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp string
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// The measured quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "tds")]
    Tds,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "humidity")]
    Humidity,
    #[serde(rename = "dissolvedOxy")]
    DissolvedOxygen,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Ph,
        Metric::Tds,
        Metric::Temperature,
        Metric::Humidity,
        Metric::DissolvedOxygen,
    ];

    /// Field name used in JSON and CSV
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Ph => "ph",
            Metric::Tds => "tds",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::DissolvedOxygen => "dissolvedOxy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Tds => "TDS",
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::DissolvedOxygen => "Dissolved Oxygen",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Ph => "",
            Metric::Tds => "ppm",
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::DissolvedOxygen => "mg/L",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.key().to_lowercase() == needle || m.label().to_lowercase() == needle)
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_json_field_names() {
        let reading = Reading::new(ReadingId::new("1700000000000"), "2024-01-15T10:00:00.000Z", 22.0, 7.0, 500.0)
            .humidity(60.0)
            .dissolved_oxy(6.0);

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["id"], serde_json::json!(1700000000000u64));
        assert_eq!(json["dissolvedOxy"], serde_json::json!(6.0));
        assert_eq!(json["humidity"], serde_json::json!(60.0));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let reading = Reading::new(ReadingId::new("abc"), "2024-01-15", 20.0, 6.0, 800.0);
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["id"], serde_json::json!("abc"));
        assert!(json.get("humidity").is_none());
        assert!(json.get("dissolvedOxy").is_none());
    }

    #[test]
    fn test_id_accepts_number_or_string() {
        let from_int: Reading = serde_json::from_str(
            r#"{"id": 42, "timestamp": "2024-01-15", "temperature": 1, "ph": 2, "tds": 3}"#,
        )
        .unwrap();
        assert_eq!(from_int.id.as_str(), "42");

        let from_text: Reading = serde_json::from_str(
            r#"{"id": "r-7", "timestamp": "2024-01-15", "temperature": 1, "ph": 2, "tds": 3}"#,
        )
        .unwrap();
        assert_eq!(from_text.id.as_str(), "r-7");
        assert_eq!(from_text.humidity, None);
    }

    #[test]
    fn test_numeric_ids_stay_numbers() {
        let negative: ReadingId = serde_json::from_str("-5").unwrap();
        assert_eq!(negative.as_str(), "-5");
        assert_eq!(serde_json::to_value(&negative).unwrap(), serde_json::json!(-5));

        let fractional: ReadingId = serde_json::from_str("1705312800000.42").unwrap();
        assert_eq!(fractional.as_str(), "1705312800000.42");
        assert_eq!(
            serde_json::to_value(&fractional).unwrap(),
            serde_json::json!(1705312800000.42)
        );

        // Same text typed in as a string stays a string.
        let text: ReadingId = serde_json::from_str(r#""-5""#).unwrap();
        assert_eq!(serde_json::to_value(&text).unwrap(), serde_json::json!("-5"));
        assert_eq!(text, negative);
    }

    #[test]
    fn test_leading_zero_id_stays_text() {
        let json = serde_json::to_value(ReadingId::new("007")).unwrap();
        assert_eq!(json, serde_json::json!("007"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00.000Z").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_some());
        assert!(parse_timestamp("2024-01-15").is_some());
        assert!(parse_timestamp("yesterday").is_none());

        let midnight = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_metric_values() {
        let reading = Reading::new(ReadingId::generate(), now_timestamp(), 22.0, 7.0, 500.0);

        assert_eq!(reading.value(Metric::Ph), Some(7.0));
        assert_eq!(reading.value(Metric::Temperature), Some(22.0));
        assert_eq!(reading.value(Metric::Humidity), None);
        assert!(reading.is_finite());
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("ph".parse::<Metric>().unwrap(), Metric::Ph);
        assert_eq!("dissolvedOxy".parse::<Metric>().unwrap(), Metric::DissolvedOxygen);
        assert_eq!("Dissolved Oxygen".parse::<Metric>().unwrap(), Metric::DissolvedOxygen);
        assert!("salinity".parse::<Metric>().is_err());
    }
}
