pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::Measurement;
use std::future::Future;

/// Source of current-conditions measurements for a city.
pub trait WeatherSource: Send + Sync + 'static {
    fn fetch_current(&self, city: &str) -> impl Future<Output = Result<Measurement>> + Send;
}
