use super::Rule;
use crate::logic::bands::CloudBand;
use crate::models::{Measurement, Prediction, RainLikelihood};

/// Low chance of rain - fallback that always matches.
///
/// Scores: rain 1, cloudiness 0.5 when cover is moderate (50-70%), else 0
pub struct LowChanceRule;

impl Rule for LowChanceRule {
    fn id(&self) -> &'static str {
        "low_chance"
    }

    fn name(&self) -> &'static str {
        "Low Chance of Rain"
    }

    fn evaluate(&self, m: &Measurement) -> Option<Prediction> {
        Some(self.classify(m))
    }
}

impl LowChanceRule {
    pub fn classify(&self, m: &Measurement) -> Prediction {
        let cloudiness_score = if CloudBand::of(m.cloudiness) == CloudBand::Moderate {
            0.5
        } else {
            0.0
        };
        Prediction::new(RainLikelihood::Low, 1, cloudiness_score)
    }
}
