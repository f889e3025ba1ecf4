pub mod measurement;
pub mod prediction;
pub mod report;

pub use measurement::*;
pub use prediction::*;
pub use report::*;
