//! Entry form validation
//!
//! The entry form holds six raw text fields. Validation walks a fixed list of
//! rules and stops at the first failure, so the user only ever sees one message.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{now_timestamp, Reading, ReadingId};

/// Raw entry form contents, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingForm {
    pub date: String,
    pub ph: String,
    pub tds: String,
    pub temperature: String,
    pub humidity: String,
    pub dissolved_oxy: String,
}

impl Default for ReadingForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl ReadingForm {
    /// Empty form with today's date filled in
    pub fn blank() -> Self {
        Self {
            date: Utc::now().format("%Y-%m-%d").to_string(),
            ph: String::new(),
            tds: String::new(),
            temperature: String::new(),
            humidity: String::new(),
            dissolved_oxy: String::new(),
        }
    }

    /// Validate the form, returning the parsed measurements
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        let fields = [
            &self.date,
            &self.ph,
            &self.tds,
            &self.temperature,
            &self.humidity,
            &self.dissolved_oxy,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        let ph = parse_number(&self.ph)
            .filter(|v| (0.0..=14.0).contains(v))
            .ok_or(ValidationError::Ph)?;

        let tds = parse_number(&self.tds)
            .filter(|v| *v >= 0.0)
            .ok_or(ValidationError::Tds)?;

        let temperature = parse_number(&self.temperature).ok_or(ValidationError::Temperature)?;

        let humidity = parse_number(&self.humidity)
            .filter(|v| (0.0..=100.0).contains(v))
            .ok_or(ValidationError::Humidity)?;

        let dissolved_oxy = parse_number(&self.dissolved_oxy)
            .filter(|v| *v >= 0.0)
            .ok_or(ValidationError::DissolvedOxygen)?;

        Ok(ValidatedForm {
            ph,
            tds,
            temperature,
            humidity,
            dissolved_oxy,
        })
    }
}

/// Measurements that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedForm {
    pub ph: f64,
    pub tds: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub dissolved_oxy: f64,
}

impl ValidatedForm {
    /// Build a reading stamped with a fresh id and the current time
    pub fn into_reading(self) -> Reading {
        Reading::new(
            ReadingId::generate(),
            now_timestamp(),
            self.temperature,
            self.ph,
            self.tds,
        )
        .humidity(self.humidity)
        .dissolved_oxy(self.dissolved_oxy)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// First rule the form broke
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields (Date, pH, TDS, Temperature, Humidity, Dissolved Oxygen).")]
    MissingFields,

    #[error("pH must be a number between 0 and 14.")]
    Ph,

    #[error("TDS must be a positive number.")]
    Tds,

    #[error("Temperature must be a number.")]
    Temperature,

    #[error("Humidity must be a number between 0 and 100.")]
    Humidity,

    #[error("Dissolved Oxygen must be a positive number.")]
    DissolvedOxygen,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ReadingForm {
        ReadingForm {
            date: "2024-01-15".to_string(),
            ph: "7".to_string(),
            tds: "500".to_string(),
            temperature: "22".to_string(),
            humidity: "60".to_string(),
            dissolved_oxy: "6".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let validated = valid_form().validate().unwrap();
        assert_eq!(validated.ph, 7.0);
        assert_eq!(validated.tds, 500.0);

        let reading = validated.into_reading();
        assert_eq!(reading.temperature, 22.0);
        assert_eq!(reading.humidity, Some(60.0));
        assert_eq!(reading.dissolved_oxy, Some(6.0));
        assert!(reading.recorded_at().is_some());
    }

    #[test]
    fn test_ph_out_of_range() {
        let mut form = valid_form();
        form.ph = "15".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Ph));

        form.ph = "-1".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Ph));

        form.ph = "14".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_missing_field_reported_first() {
        let mut form = valid_form();
        form.temperature = String::new();
        form.ph = "99".to_string();

        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
        assert!(err.to_string().starts_with("Please fill in all required fields"));
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = valid_form();
        form.date = "   ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_non_numeric_values() {
        let mut form = valid_form();
        form.temperature = "warm".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Temperature));

        let mut form = valid_form();
        form.tds = "inf".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Tds));
    }

    #[test]
    fn test_negative_temperature_allowed() {
        let mut form = valid_form();
        form.temperature = "-4.5".to_string();
        assert_eq!(form.validate().unwrap().temperature, -4.5);
    }

    #[test]
    fn test_humidity_and_oxygen_rules() {
        let mut form = valid_form();
        form.humidity = "100.1".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Humidity));

        let mut form = valid_form();
        form.dissolved_oxy = "-0.5".to_string();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Dissolved Oxygen must be a positive number.");
    }

    #[test]
    fn test_blank_form_has_today() {
        let form = ReadingForm::blank();
        assert!(chrono::NaiveDate::parse_from_str(&form.date, "%Y-%m-%d").is_ok());
        assert!(form.ph.is_empty());
    }
}
