use serde::Serialize;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// A single current-conditions observation for one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Relative humidity, 0-100 %
    pub humidity: f64,
    /// Cloud cover, 0-100 %
    pub cloudiness: f64,
    pub temperature_c: f64,
}

impl Measurement {
    pub fn new(humidity: f64, cloudiness: f64, temperature_c: f64) -> Self {
        Self {
            humidity,
            cloudiness,
            temperature_c,
        }
    }

    /// Build a measurement from raw OpenWeatherMap values (temperature in Kelvin).
    pub fn from_kelvin(humidity: f64, cloudiness: f64, temp_k: f64) -> Self {
        Self::new(
            humidity,
            cloudiness,
            round_to_tenth(kelvin_to_celsius(temp_k)),
        )
    }
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
