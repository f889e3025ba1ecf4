use super::{
    high_chance::HighChanceRule, low_chance::LowChanceRule, moderate_chance::ModerateChanceRule,
    Rule,
};
use crate::models::{Measurement, Prediction};

/// Ordered rain rules; the first rule that matches decides the prediction.
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        // Order matters: the bands overlap and earlier rules take precedence
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HighChanceRule),
            Box::new(ModerateChanceRule),
            Box::new(LowChanceRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, measurement: &Measurement) -> Prediction {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(measurement))
            .unwrap_or_else(|| LowChanceRule.classify(measurement))
    }

    /// Id of the rule that decides `measurement`.
    pub fn matching_rule(&self, measurement: &Measurement) -> &'static str {
        self.rules
            .iter()
            .find(|rule| rule.evaluate(measurement).is_some())
            .map(|rule| rule.id())
            .unwrap_or_else(|| LowChanceRule.id())
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify raw humidity %, cloud cover % and temperature °C.
pub fn predict(humidity: f64, cloudiness: f64, temperature_c: f64) -> Prediction {
    RulesEngine::new().evaluate(&Measurement::new(humidity, cloudiness, temperature_c))
}
