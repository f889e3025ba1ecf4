pub mod engine;
pub mod high_chance;
pub mod low_chance;
pub mod moderate_chance;

pub use engine::{predict, RulesEngine};

use crate::models::{Measurement, Prediction};

/// Trait for rain-likelihood rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a prediction if its conditions are met
    fn evaluate(&self, measurement: &Measurement) -> Option<Prediction>;
}
