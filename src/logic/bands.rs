/// Humidity above this is "high"
pub const HUMIDITY_HIGH_ABOVE: f64 = 80.0;
/// Lower bound (inclusive) of the moderate humidity band
pub const HUMIDITY_MODERATE_MIN: f64 = 60.0;
/// Cloud cover above this is "high"
pub const CLOUD_HIGH_ABOVE: f64 = 70.0;
/// Lower bound (inclusive) of the moderate cloud band
pub const CLOUD_MODERATE_MIN: f64 = 50.0;
/// Inclusive temperature window (°C) for the high-confidence rule
pub const RAIN_TEMP_MIN_C: f64 = 20.0;
pub const RAIN_TEMP_MAX_C: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityBand {
    Low,
    Moderate,
    High,
}

impl HumidityBand {
    pub fn of(humidity: f64) -> Self {
        if humidity > HUMIDITY_HIGH_ABOVE {
            HumidityBand::High
        } else if (HUMIDITY_MODERATE_MIN..=HUMIDITY_HIGH_ABOVE).contains(&humidity) {
            HumidityBand::Moderate
        } else {
            HumidityBand::Low
        }
    }

    /// Moderate or high humidity
    pub fn is_elevated(&self) -> bool {
        matches!(self, HumidityBand::Moderate | HumidityBand::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudBand {
    Low,
    Moderate,
    High,
}

impl CloudBand {
    pub fn of(cloudiness: f64) -> Self {
        if cloudiness > CLOUD_HIGH_ABOVE {
            CloudBand::High
        } else if (CLOUD_MODERATE_MIN..=CLOUD_HIGH_ABOVE).contains(&cloudiness) {
            CloudBand::Moderate
        } else {
            CloudBand::Low
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, CloudBand::Moderate | CloudBand::High)
    }
}

pub fn is_rain_temperature(temperature_c: f64) -> bool {
    (RAIN_TEMP_MIN_C..=RAIN_TEMP_MAX_C).contains(&temperature_c)
}
