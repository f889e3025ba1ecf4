use super::Rule;
use crate::logic::bands::{is_rain_temperature, CloudBand, HumidityBand};
use crate::models::{Measurement, Prediction, RainLikelihood};

/// High chance of rain
///
/// Conditions (all required):
/// - Humidity >80%
/// - Cloud cover >70%
/// - Temperature between 20°C and 35°C inclusive
///
/// Scores: rain 3, cloudiness 2
pub struct HighChanceRule;

impl Rule for HighChanceRule {
    fn id(&self) -> &'static str {
        "high_chance"
    }

    fn name(&self) -> &'static str {
        "High Chance of Rain"
    }

    fn evaluate(&self, m: &Measurement) -> Option<Prediction> {
        let saturated = HumidityBand::of(m.humidity) == HumidityBand::High
            && CloudBand::of(m.cloudiness) == CloudBand::High;

        if saturated && is_rain_temperature(m.temperature_c) {
            Some(Prediction::new(RainLikelihood::High, 3, 2.0))
        } else {
            None
        }
    }
}
