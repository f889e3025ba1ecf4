pub mod dialog;
pub mod gauge;
pub mod input;
pub mod score_chart;

pub use dialog::{DialogKind, DialogWidget};
pub use gauge::{cloudiness_gauge, humidity_gauge, temperature_gauge};
pub use input::InputWidget;
pub use score_chart::ScoreChart;
