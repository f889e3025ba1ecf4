pub mod bands;
pub mod prediction_task;
pub mod rules;

pub use prediction_task::{PredictionRunner, RequestToken, TaskEvent};
pub use rules::{predict, RulesEngine};
