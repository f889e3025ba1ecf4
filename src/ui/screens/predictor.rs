use crate::app::{Dialog, InputState, Phase};
use crate::models::WeatherReport;
use crate::ui::components::{
    cloudiness_gauge, humidity_gauge, temperature_gauge, DialogWidget, InputWidget, ScoreChart,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct PredictorScreen<'a> {
    pub input: &'a InputState,
    pub phase: &'a Phase,
    pub backdrop: Option<&'a str>,
    pub dialog: Option<&'a Dialog>,
    pub status_message: Option<&'a str>,
}

impl<'a> PredictorScreen<'a> {
    pub fn new(input: &'a InputState, phase: &'a Phase) -> Self {
        Self {
            input,
            phase,
            backdrop: None,
            dialog: None,
            status_message: None,
        }
    }

    pub fn with_backdrop(mut self, backdrop: Option<&'a str>) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn with_dialog(mut self, dialog: Option<&'a Dialog>) -> Self {
        self.dialog = dialog;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for PredictorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // City input
                Constraint::Min(12),   // Results
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        InputWidget::new("City", &self.input.value)
            .placeholder("Type a city and press Enter")
            .focused(self.dialog.is_none())
            .cursor(self.input.cursor)
            .render(chunks[1], buf);

        self.render_results(chunks[2], buf);
        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);

        if let Some(dialog) = self.dialog {
            DialogWidget::new(dialog.kind, &dialog.title, &dialog.message).render(area, buf);
        }
    }
}

impl PredictorScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Rainwatch", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let para = Paragraph::new(Span::styled(
            "Rain likelihood from current humidity, cloud cover and temperature",
            Theme::subtitle(),
        ))
        .block(block);
        para.render(area, buf);
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Results")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(backdrop) = self.backdrop {
            let art: Vec<Line> = backdrop
                .lines()
                .map(|l| Line::from(Span::styled(l, Theme::dim())))
                .collect();
            Paragraph::new(art).render(inner, buf);
        }

        match self.phase {
            Phase::Idle => {
                let hint = Paragraph::new(Span::styled(
                    "Enter a city name to predict rain",
                    Theme::dim(),
                ))
                .alignment(Alignment::Center);
                hint.render(centre_row(inner), buf);
            }
            Phase::Loading { city } => {
                let loading = Paragraph::new(Line::from(vec![
                    Span::styled("Fetching data", Theme::highlight()),
                    Span::styled(format!(" for {}...", city), Theme::dim()),
                ]))
                .alignment(Alignment::Center);
                loading.render(centre_row(inner), buf);
            }
            Phase::Ready(report) => self.render_report(report, inner, buf),
        }
    }

    fn render_report(&self, report: &WeatherReport, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Gauges
                Constraint::Min(8),    // Summary and chart
            ])
            .split(area);

        let gauges = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(rows[0]);

        let m = &report.measurement;
        temperature_gauge("Temperature", Some(m.temperature_c)).render(gauges[0], buf);
        humidity_gauge("Humidity", Some(m.humidity)).render(gauges[1], buf);
        cloudiness_gauge("Cloudiness", Some(m.cloudiness)).render(gauges[2], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);

        self.render_summary(report, body[0], buf);
        ScoreChart::new(Some(&report.prediction)).render(body[1], buf);
    }

    fn render_summary(&self, report: &WeatherReport, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let mut lines: Vec<Line> = Vec::new();
        let mut summary = report.summary_lines().into_iter();

        if let Some(city) = summary.next() {
            lines.push(Line::from(Span::styled(city, Theme::header())));
        }
        for line in summary {
            lines.push(Line::from(Span::styled(line, Theme::normal())));
        }

        let likelihood = report.prediction.likelihood;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            likelihood.as_str(),
            Style::default().fg(likelihood.color()),
        )));

        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = match self.phase {
                Phase::Ready(_) => Theme::success(),
                _ => Theme::warning(),
            };
            let para = Paragraph::new(Span::styled(msg, style));
            para.render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Predict ", Theme::nav_label()),
            Span::styled("[^S]", Theme::nav_key()),
            Span::styled("Speak ", Theme::nav_label()),
            Span::styled("[^R]", Theme::nav_key()),
            Span::styled("Predict again ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Cancel/Quit ", Theme::nav_label()),
            Span::styled("[^C]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(area, buf);
    }
}

fn centre_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Measurement, Prediction, RainLikelihood};

    fn render_text(screen: PredictorScreen<'_>) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_screen_prompts_for_city() {
        let input = InputState::default();
        let text = render_text(PredictorScreen::new(&input, &Phase::Idle));
        assert!(text.contains("Rainwatch"));
        assert!(text.contains("Enter a city name to predict rain"));
    }

    #[test]
    fn loading_screen_names_city() {
        let input = InputState::default();
        let phase = Phase::Loading {
            city: "Paris".into(),
        };
        let text = render_text(PredictorScreen::new(&input, &phase));
        assert!(text.contains("Fetching data for Paris..."));
    }

    #[test]
    fn ready_screen_shows_summary() {
        let input = InputState::default();
        let report = WeatherReport::new(
            "paris",
            Measurement::new(65.0, 55.0, 22.0),
            Prediction::new(RainLikelihood::Moderate, 2, 0.5),
        );
        let phase = Phase::Ready(report);
        let text = render_text(PredictorScreen::new(&input, &phase));
        assert!(text.contains("Paris"));
        assert!(text.contains("Cloudiness Score: 0.5"));
        assert!(text.contains("Prediction: Moderate chance of Rain"));
    }

    #[test]
    fn dialog_is_drawn_on_top() {
        let input = InputState::default();
        let dialog = Dialog::warning("Input", "Please enter a city name.");
        let text = render_text(
            PredictorScreen::new(&input, &Phase::Idle).with_dialog(Some(&dialog)),
        );
        assert!(text.contains("Please enter a city name."));
    }

    #[test]
    fn missing_backdrop_still_renders() {
        let input = InputState::default();
        let text = render_text(PredictorScreen::new(&input, &Phase::Idle).with_backdrop(None));
        assert!(text.contains("Results"));

        let text = render_text(
            PredictorScreen::new(&input, &Phase::Idle).with_backdrop(Some("~~ clouds ~~")),
        );
        assert!(text.contains("~~ clouds ~~"));
    }
}
