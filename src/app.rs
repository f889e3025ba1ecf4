use crate::config::Config;
use crate::datasources::WeatherSource;
use crate::logic::{PredictionRunner, TaskEvent};
use crate::models::WeatherReport;
use crate::ui::components::DialogKind;
use crate::voice::{speak_in_background, Speaker};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch weather data.\nCheck city name or API key.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn warning(title: &str, message: &str) -> Self {
        Self {
            kind: DialogKind::Warning,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: DialogKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// What the results panel is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading { city: String },
    Ready(WeatherReport),
}

/// City text field; the cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub value: String,
    pub cursor: usize,
}

impl InputState {
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Replace the text and move the cursor to the end.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.end();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn city(&self) -> &str {
        self.value.trim()
    }
}

pub struct App<S: WeatherSource> {
    pub should_quit: bool,
    pub config: Config,

    // Screen state
    pub input: InputState,
    pub phase: Phase,
    pub dialog: Option<Dialog>,
    pub backdrop: Option<String>,

    // Services
    runner: PredictionRunner<S>,
    speaker: Arc<dyn Speaker>,
    voice_task: Option<JoinHandle<()>>,

    // UI state
    pub status_message: Option<String>,
}

impl<S: WeatherSource> App<S> {
    pub fn new(config: Config, source: Arc<S>, speaker: Arc<dyn Speaker>) -> Self {
        let backdrop = config.ui.load_backdrop();

        Self {
            should_quit: false,
            config,
            input: InputState::default(),
            phase: Phase::Idle,
            dialog: None,
            backdrop,
            runner: PredictionRunner::new(source),
            speaker,
            voice_task: None,
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.runner.cancel();
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn dismiss_dialog(&mut self) -> bool {
        self.dialog.take().is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.phase {
            Phase::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// Start a prediction for the typed city, or warn when it is blank.
    pub fn submit(&mut self) {
        let city = self.input.city().to_string();
        if city.is_empty() {
            self.dialog = Some(Dialog::warning("Input", EMPTY_CITY_MESSAGE));
            return;
        }

        self.runner.start(&city);
        self.phase = Phase::Loading { city };
        self.set_status("Fetching data...");
    }

    /// Abort the in-flight request and return to an empty panel.
    pub fn cancel_request(&mut self) -> bool {
        if !self.runner.cancel() {
            return false;
        }
        self.phase = Phase::Idle;
        self.set_status("Request cancelled");
        true
    }

    /// Clear the city and the results panel for another query.
    pub fn reset_results(&mut self) {
        self.runner.cancel();
        self.input.clear();
        self.phase = Phase::Idle;
        self.clear_status();
    }

    /// Apply any finished request. Returns true when the screen changed.
    pub fn poll_results(&mut self) -> bool {
        match self.runner.try_next() {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Wait for the in-flight request, for use outside the draw loop.
    pub async fn wait_for_result(&mut self) -> bool {
        match self.runner.next().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, event: TaskEvent) {
        match event.outcome {
            Ok(report) => {
                self.set_status(&format!(
                    "Prediction for {} updated {}",
                    report.city,
                    report.fetched_at.format("%H:%M:%S UTC")
                ));
                self.phase = Phase::Ready(report);
            }
            Err(e) => {
                tracing::debug!("Showing generic fetch error for {:?}: {}", event.city, e);
                self.phase = Phase::Idle;
                self.clear_status();
                self.dialog = Some(Dialog::error("Error", FETCH_FAILED_MESSAGE));
            }
        }
    }

    /// Speak the current report's summary in the background.
    pub fn speak(&mut self) {
        let text = match self.report() {
            Some(report) => report.spoken_summary(),
            None => {
                self.set_status("Nothing to speak yet");
                return;
            }
        };

        if self.voice_task.as_ref().is_some_and(|t| !t.is_finished()) {
            self.set_status("Already speaking");
            return;
        }

        if !self.config.voice.enabled {
            self.set_status("Voice output is disabled in config");
        } else {
            self.set_status("Speaking...");
        }
        self.voice_task = Some(speak_in_background(Arc::clone(&self.speaker), text));
    }

    /// Wait for the current utterance to finish, if any.
    pub async fn wait_for_speech(&mut self) {
        if let Some(task) = self.voice_task.take() {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::prediction_task::tests::StubSource;
    use crate::models::{Measurement, RainLikelihood};
    use crate::voice::Speaker;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSpeaker {
        spoken: Mutex<Vec<String>>,
    }

    impl Speaker for RecordingSpeaker {
        fn speak(&self, text: &str) -> crate::error::Result<()> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn app_with(speaker: Arc<RecordingSpeaker>) -> App<StubSource> {
        let source = StubSource::new()
            .with_city("Paris", 0, Measurement::new(65.0, 55.0, 22.0))
            .with_city("Slowtown", 300, Measurement::new(90.0, 90.0, 25.0))
            .with_city("new york", 0, Measurement::new(85.0, 75.0, 24.5));
        App::new(Config::default(), Arc::new(source), speaker)
    }

    fn type_city(app: &mut App<StubSource>, city: &str) {
        app.input.set(city);
    }

    #[test]
    fn input_editing_handles_multibyte() {
        let mut input = InputState::default();
        for c in "Zrich".chars() {
            input.insert(c);
        }
        input.home();
        input.right();
        input.insert('ü');
        assert_eq!(input.value, "Zürich");
        assert_eq!(input.cursor, 2);

        input.backspace();
        assert_eq!(input.value, "Zrich");
        input.end();
        input.delete();
        assert_eq!(input.value, "Zrich");
        input.left();
        input.delete();
        assert_eq!(input.value, "Zric");
    }

    #[test]
    fn city_is_trimmed() {
        let mut input = InputState::default();
        for c in "  Paris ".chars() {
            input.insert(c);
        }
        assert_eq!(input.city(), "Paris");
    }

    #[tokio::test]
    async fn empty_city_warns_without_request() {
        let mut app = app_with(Arc::new(RecordingSpeaker::default()));
        type_city(&mut app, "   ");
        app.submit();

        let dialog = app.dialog.clone().unwrap();
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.message, EMPTY_CITY_MESSAGE);
        assert_eq!(app.phase, Phase::Idle);
        assert!(!app.wait_for_result().await);

        assert!(app.dismiss_dialog());
        assert!(!app.dismiss_dialog());
    }

    #[tokio::test]
    async fn successful_prediction_shows_report() {
        let mut app = app_with(Arc::new(RecordingSpeaker::default()));
        type_city(&mut app, "  Paris ");
        app.submit();
        assert!(app.is_loading());

        assert!(app.wait_for_result().await);
        let report = app.report().unwrap();
        assert_eq!(report.city, "Paris");
        assert_eq!(report.measurement.temperature_c, 22.0);
        assert_eq!(report.prediction.likelihood, RainLikelihood::Moderate);
        assert!(app.dialog.is_none());

        // The typed name is what gets fetched; the report shows it title-cased
        type_city(&mut app, "new york");
        app.submit();
        assert!(app.wait_for_result().await);
        let report = app.report().unwrap();
        assert_eq!(report.city, "New York");
        assert_eq!(report.prediction.likelihood, RainLikelihood::High);
    }

    #[tokio::test]
    async fn failed_fetch_shows_generic_error() {
        let mut app = app_with(Arc::new(RecordingSpeaker::default()));
        type_city(&mut app, "Atlantis");
        app.submit();

        assert!(app.wait_for_result().await);
        let dialog = app.dialog.clone().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(dialog.message, FETCH_FAILED_MESSAGE);
        assert_eq!(app.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn later_request_wins_over_slower_earlier_one() {
        let mut app = app_with(Arc::new(RecordingSpeaker::default()));
        type_city(&mut app, "Slowtown");
        app.submit();
        type_city(&mut app, "Paris");
        app.submit();

        assert!(app.wait_for_result().await);
        assert_eq!(app.report().unwrap().city, "Paris");

        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        assert!(!app.poll_results());
        assert_eq!(app.report().unwrap().city, "Paris");
    }

    #[tokio::test]
    async fn cancel_returns_to_idle() {
        let mut app = app_with(Arc::new(RecordingSpeaker::default()));
        type_city(&mut app, "Slowtown");
        app.submit();

        assert!(app.cancel_request());
        assert_eq!(app.phase, Phase::Idle);
        assert!(!app.cancel_request());
        assert!(!app.wait_for_result().await);
    }

    #[tokio::test]
    async fn speak_uses_injected_speaker() {
        let speaker = Arc::new(RecordingSpeaker::default());
        let mut app = app_with(Arc::clone(&speaker));

        app.speak();
        app.wait_for_speech().await;
        assert!(speaker.spoken.lock().unwrap().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Nothing to speak yet"));

        type_city(&mut app, "Paris");
        app.submit();
        app.wait_for_result().await;
        app.speak();
        app.wait_for_speech().await;

        let spoken = speaker.spoken.lock().unwrap();
        assert_eq!(
            spoken.as_slice(),
            ["In Paris, there is a moderate chance of rain with a rain score of 2."]
        );
    }

    #[tokio::test]
    async fn reset_clears_results() {
        let mut app = app_with(Arc::new(RecordingSpeaker::default()));
        type_city(&mut app, "Paris");
        app.submit();
        app.wait_for_result().await;
        assert!(app.report().is_some());

        app.reset_results();
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.report().is_none());
        assert_eq!(app.input.city(), "");
        assert_eq!(app.input.cursor, 0);
    }
}
