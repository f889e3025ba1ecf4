use super::Rule;
use crate::logic::bands::{CloudBand, HumidityBand};
use crate::models::{Measurement, Prediction, RainLikelihood};

/// Moderate chance of rain
///
/// Conditions:
/// - Humidity moderate (60-80%) or high (>80%)
/// - Cloud cover moderate (50-70%) or high (>70%)
///
/// Evaluated after the high-chance rule, so it also catches humid overcast
/// readings outside the warm window.
///
/// Scores: rain 2, cloudiness 1 when cover is high, else 0.5
pub struct ModerateChanceRule;

impl Rule for ModerateChanceRule {
    fn id(&self) -> &'static str {
        "moderate_chance"
    }

    fn name(&self) -> &'static str {
        "Moderate Chance of Rain"
    }

    fn evaluate(&self, m: &Measurement) -> Option<Prediction> {
        let clouds = CloudBand::of(m.cloudiness);
        if !HumidityBand::of(m.humidity).is_elevated() || !clouds.is_elevated() {
            return None;
        }

        let cloudiness_score = if clouds == CloudBand::High { 1.0 } else { 0.5 };
        Some(Prediction::new(
            RainLikelihood::Moderate,
            2,
            cloudiness_score,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloudiness_score_follows_cloud_band() {
        let high_cover = ModerateChanceRule
            .evaluate(&Measurement::new(65.0, 71.0, 10.0))
            .unwrap();
        assert_eq!(high_cover.cloudiness_score, 1.0);

        let moderate_cover = ModerateChanceRule
            .evaluate(&Measurement::new(65.0, 70.0, 10.0))
            .unwrap();
        assert_eq!(moderate_cover.cloudiness_score, 0.5);
    }

    #[test]
    fn needs_both_elevated() {
        assert!(ModerateChanceRule
            .evaluate(&Measurement::new(59.0, 90.0, 25.0))
            .is_none());
        assert!(ModerateChanceRule
            .evaluate(&Measurement::new(90.0, 49.0, 25.0))
            .is_none());
    }

    #[test]
    fn ignores_temperature() {
        let cold = ModerateChanceRule.evaluate(&Measurement::new(70.0, 60.0, -15.0));
        let hot = ModerateChanceRule.evaluate(&Measurement::new(70.0, 60.0, 45.0));
        assert_eq!(cold, hot);
        assert!(cold.is_some());
    }
}
