use crate::models::Prediction;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

/// Top of the fixed y-axis
pub const SCORE_AXIS_MAX: f64 = 3.0;
/// Bar values are integers, so scores are drawn in tenths
const SCALE: f64 = 10.0;
const AXIS_WIDTH: u16 = 3;

/// Two-bar chart of the rain score and cloudiness score on a fixed 0-3 axis.
pub struct ScoreChart<'a> {
    prediction: Option<&'a Prediction>,
}

impl<'a> ScoreChart<'a> {
    pub fn new(prediction: Option<&'a Prediction>) -> Self {
        Self { prediction }
    }
}

fn scaled(score: f64) -> u64 {
    (score.clamp(0.0, SCORE_AXIS_MAX) * SCALE).round() as u64
}

impl Widget for ScoreChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Rain Reasoning Scores", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let prediction = match self.prediction {
            Some(p) => p,
            None => {
                Paragraph::new(Span::styled("No prediction yet", Theme::dim()))
                    .render(inner, buf);
                return;
            }
        };

        if inner.width <= AXIS_WIDTH + 4 || inner.height < 3 {
            return;
        }

        let axis_area = Rect {
            width: AXIS_WIDTH,
            // Bottom row holds the bar labels
            height: inner.height - 1,
            ..inner
        };
        render_axis(axis_area, buf);

        let chart_area = Rect {
            x: inner.x + AXIS_WIDTH,
            width: inner.width - AXIS_WIDTH,
            ..inner
        };
        let bar_width = ((chart_area.width.saturating_sub(6)) / 2).clamp(3, 18);

        let bars = [
            Bar::default()
                .value(scaled(f64::from(prediction.rain_score)))
                .text_value(prediction.rain_score.to_string())
                .label(Line::from("Rain Score"))
                .style(Style::default().fg(Theme::RAIN_BAR))
                .value_style(Theme::selected()),
            Bar::default()
                .value(scaled(prediction.cloudiness_score))
                .text_value(prediction.cloudiness_score.to_string())
                .label(Line::from("Cloudiness Score"))
                .style(Style::default().fg(Theme::CLOUD_BAR))
                .value_style(Theme::selected()),
        ];

        BarChart::default()
            .bar_width(bar_width)
            .bar_gap(4)
            .max(scaled(SCORE_AXIS_MAX))
            .data(BarGroup::default().bars(&bars))
            .render(chart_area, buf);
    }
}

/// Axis labels 3, 2, 1, 0 from top to bottom.
fn render_axis(area: Rect, buf: &mut Buffer) {
    let span = area.height.saturating_sub(1);
    for tick in 0..=SCORE_AXIS_MAX as u16 {
        let offset = span * (SCORE_AXIS_MAX as u16 - tick) / SCORE_AXIS_MAX as u16;
        buf.set_string(area.x, area.y + offset, format!("{:>2}", tick), Theme::dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RainLikelihood;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn scores_scale_to_axis() {
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(0.5), 5);
        assert_eq!(scaled(3.0), 30);
        assert_eq!(scaled(7.0), 30);
    }

    #[test]
    fn renders_placeholder_without_prediction() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        ScoreChart::new(None).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No prediction yet"));
    }

    #[test]
    fn renders_axis_and_title() {
        let prediction = Prediction::new(RainLikelihood::High, 3, 2.0);
        let area = Rect::new(0, 0, 50, 14);
        let mut buf = Buffer::empty(area);
        ScoreChart::new(Some(&prediction)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Rain Reasoning Scores"));
        let axis: String = (1..13)
            .map(|y| buf[(2, y)].symbol().to_string())
            .collect::<String>()
            .replace(' ', "");
        assert_eq!(axis, "3210");
    }
}
