use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of forecast data as served by the weather backend.
///
/// Example backend JSON:
/// `{"date":"2024-01-01","temperatureC":20,"summary":"Mild"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: String,
}

impl Forecast {
    /// Fahrenheit equivalent of `temperature_c` (F = C×9/5+32), rounded
    /// half away from zero. Integer Celsius scaled by 9/5 never lands on
    /// an exact half, so the rounding direction is unobservable.
    pub fn temperature_f(&self) -> i32 {
        (f64::from(self.temperature_c) * 9.0 / 5.0 + 32.0).round() as i32
    }
}

/// Row rendered to callers of the listing endpoint, carrying the derived
/// Fahrenheit value alongside the stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: String,
}

impl From<&Forecast> for ForecastRow {
    fn from(forecast: &Forecast) -> Self {
        Self {
            date: forecast.date,
            temperature_c: forecast.temperature_c,
            temperature_f: forecast.temperature_f(),
            summary: forecast.summary.clone(),
        }
    }
}
