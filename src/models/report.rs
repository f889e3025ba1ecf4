use super::{Measurement, Prediction};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything shown for one completed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub measurement: Measurement,
    pub prediction: Prediction,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    pub fn new(city: &str, measurement: Measurement, prediction: Prediction) -> Self {
        Self {
            city: title_case(city),
            measurement,
            prediction,
            fetched_at: Utc::now(),
        }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            self.city.clone(),
            format!("Temperature: {} °C", self.measurement.temperature_c),
            format!("Humidity: {}%", self.measurement.humidity),
            format!("Cloudiness: {}%", self.measurement.cloudiness),
            format!(
                "Rain Score: {} (1=Low, 2=Moderate, 3=High)",
                self.prediction.rain_score
            ),
            format!("Cloudiness Score: {}", self.prediction.cloudiness_score),
            format!("Prediction: {}", self.prediction.likelihood),
        ]
    }

    /// One sentence suitable for text-to-speech.
    pub fn spoken_summary(&self) -> String {
        format!(
            "In {}, there is a {} with a rain score of {}.",
            self.city,
            self.prediction.likelihood.as_str().to_lowercase(),
            self.prediction.rain_score
        )
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
