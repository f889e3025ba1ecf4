use crate::datasources::WeatherSource;
use crate::error::Result;
use crate::logic::RulesEngine;
use crate::models::WeatherReport;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one request started by [`PredictionRunner::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub generation: u64,
}

/// Completion message sent by a background request.
#[derive(Debug)]
pub struct TaskEvent {
    pub generation: u64,
    pub city: String,
    pub outcome: Result<WeatherReport>,
}

/// Runs fetch + predict off the UI task, one request at a time.
///
/// Starting a request aborts the previous one, and every event carries the
/// generation it was started with so late results from superseded or
/// cancelled requests are dropped instead of overwriting newer ones.
pub struct PredictionRunner<S: WeatherSource> {
    source: Arc<S>,
    engine: Arc<RulesEngine>,
    tx: mpsc::UnboundedSender<TaskEvent>,
    rx: mpsc::UnboundedReceiver<TaskEvent>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl<S: WeatherSource> PredictionRunner<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            engine: Arc::new(RulesEngine::new()),
            tx,
            rx,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn start(&mut self, city: &str) -> RequestToken {
        if self.is_running() {
            tracing::debug!("Superseding request generation {}", self.generation);
        }
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let city = city.to_string();
        let source = Arc::clone(&self.source);
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();

        tracing::info!("Starting prediction for {:?} (generation {})", city, generation);

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = source.fetch_current(&city).await.map(|measurement| {
                tracing::debug!(
                    "{:?} decided by rule {}",
                    measurement,
                    engine.matching_rule(&measurement)
                );
                let prediction = engine.evaluate(&measurement);
                WeatherReport::new(&city, measurement, prediction)
            });

            if let Err(ref e) = outcome {
                tracing::warn!("Weather fetch for {:?} failed: {}", city, e);
            }

            // Receiver only goes away when the runner is dropped
            let _ = tx.send(TaskEvent {
                generation,
                city,
                outcome,
            });
        }));

        self.current()
    }

    /// Abort the in-flight request. Returns false when nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                // Anything the aborted task already sent is now stale
                self.generation += 1;
                tracing::info!("Prediction request cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn current(&self) -> RequestToken {
        RequestToken {
            generation: self.generation,
        }
    }

    /// Next current event without waiting; stale events are discarded.
    pub fn try_next(&mut self) -> Option<TaskEvent> {
        while let Ok(event) = self.rx.try_recv() {
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
        None
    }

    /// Wait for the in-flight request to finish. `None` when nothing is running.
    pub async fn next(&mut self) -> Option<TaskEvent> {
        loop {
            if let Some(event) = self.try_next() {
                return Some(event);
            }
            if self.in_flight.is_none() {
                return None;
            }

            let event = self.rx.recv().await?;
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
    }

    fn accept(&mut self, event: TaskEvent) -> Option<TaskEvent> {
        if event.generation != self.generation {
            tracing::debug!(
                "Discarding stale result for {:?} (generation {}, current {})",
                event.city,
                event.generation,
                self.generation
            );
            return None;
        }
        self.in_flight = None;
        Some(event)
    }
}

impl<S: WeatherSource> Drop for PredictionRunner<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::RainwatchError;
    use crate::models::{Measurement, RainLikelihood};
    use std::collections::HashMap;
    use std::time::Duration;

    /// Canned measurements per city with an optional delay.
    pub(crate) struct StubSource {
        cities: HashMap<&'static str, (Duration, Measurement)>,
    }

    impl StubSource {
        pub(crate) fn new() -> Self {
            Self {
                cities: HashMap::new(),
            }
        }

        pub(crate) fn with_city(
            mut self,
            city: &'static str,
            delay_ms: u64,
            measurement: Measurement,
        ) -> Self {
            self.cities
                .insert(city, (Duration::from_millis(delay_ms), measurement));
            self
        }
    }

    impl WeatherSource for StubSource {
        async fn fetch_current(&self, city: &str) -> Result<Measurement> {
            match self.cities.get(city) {
                Some((delay, measurement)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(*measurement)
                }
                None => Err(RainwatchError::NotFound(city.to_string())),
            }
        }
    }

    fn runner() -> PredictionRunner<StubSource> {
        let source = StubSource::new()
            .with_city("Paris", 0, Measurement::new(65.0, 55.0, 22.0))
            .with_city("Mumbai", 0, Measurement::new(90.0, 80.0, 29.0))
            .with_city("Slowtown", 300, Measurement::new(10.0, 10.0, 10.0));
        PredictionRunner::new(Arc::new(source))
    }

    #[tokio::test]
    async fn completes_with_report() {
        let mut runner = runner();
        let token = runner.start("paris");
        assert_eq!(token, runner.current());

        // Unknown casing is passed through to the source untouched
        let event = runner.next().await.unwrap();
        assert_eq!(event.generation, token.generation);
        assert!(matches!(event.outcome, Err(RainwatchError::NotFound(_))));

        let token = runner.start("Paris");
        let event = runner.next().await.unwrap();
        assert_eq!(event.generation, token.generation);
        let report = event.outcome.unwrap();
        assert_eq!(report.city, "Paris");
        assert_eq!(report.prediction.likelihood, RainLikelihood::Moderate);
        assert_eq!(report.prediction.rain_score, 2);
        assert_eq!(report.prediction.cloudiness_score, 0.5);
        assert!(!runner.is_running());
    }

    #[tokio::test]
    async fn newer_request_supersedes_older() {
        let mut runner = runner();
        let first = runner.start("Slowtown");
        let second = runner.start("Mumbai");
        assert!(second.generation > first.generation);

        let event = runner.next().await.unwrap();
        assert_eq!(event.generation, second.generation);
        assert_eq!(event.city, "Mumbai");
        assert_eq!(
            event.outcome.unwrap().prediction.likelihood,
            RainLikelihood::High
        );

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(runner.try_next().is_none());
        assert!(runner.next().await.is_none());
    }

    #[tokio::test]
    async fn stale_events_are_discarded() {
        let mut runner = runner();
        let first = runner.start("Paris");
        // Let the first request deliver before it is superseded
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = runner.start("Mumbai");

        let event = runner.next().await.unwrap();
        assert_ne!(event.generation, first.generation);
        assert_eq!(event.generation, second.generation);
        assert_eq!(event.city, "Mumbai");
    }

    #[tokio::test]
    async fn accept_rejects_old_generation() {
        let mut runner = runner();
        runner.start("Paris");
        runner.start("Mumbai");

        let stale = TaskEvent {
            generation: 1,
            city: "Paris".into(),
            outcome: Err(RainwatchError::NotFound("Paris".into())),
        };
        assert!(runner.accept(stale).is_none());
        assert!(runner.in_flight.is_some());
    }

    #[tokio::test]
    async fn cancel_aborts_in_flight() {
        let mut runner = runner();
        runner.start("Slowtown");
        assert!(runner.is_running());

        assert!(runner.cancel());
        assert!(!runner.is_running());
        assert!(!runner.cancel());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(runner.try_next().is_none());
        assert!(runner.next().await.is_none());
    }
}
