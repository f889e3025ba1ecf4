use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RainLikelihood {
    Low,
    Moderate,
    High,
}

impl RainLikelihood {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainLikelihood::Low => "Low chance of Rain",
            RainLikelihood::Moderate => "Moderate chance of Rain",
            RainLikelihood::High => "High chance of Rain",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            RainLikelihood::Low => Color::Green,
            RainLikelihood::Moderate => Color::Yellow,
            RainLikelihood::High => Color::LightBlue,
        }
    }
}

impl std::fmt::Display for RainLikelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the rain rules for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub likelihood: RainLikelihood,
    /// 1 = Low, 2 = Moderate, 3 = High
    pub rain_score: u8,
    /// One of 0, 0.5, 1 or 2
    pub cloudiness_score: f64,
}

impl Prediction {
    pub fn new(likelihood: RainLikelihood, rain_score: u8, cloudiness_score: f64) -> Self {
        Self {
            likelihood,
            rain_score,
            cloudiness_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likelihood_labels() {
        assert_eq!(RainLikelihood::Low.as_str(), "Low chance of Rain");
        assert_eq!(RainLikelihood::Moderate.as_str(), "Moderate chance of Rain");
        assert_eq!(RainLikelihood::High.to_string(), "High chance of Rain");
    }

    #[test]
    fn likelihood_ordering() {
        assert!(RainLikelihood::Low < RainLikelihood::Moderate);
        assert!(RainLikelihood::Moderate < RainLikelihood::High);
    }

    #[test]
    fn whole_scores_display_without_fraction() {
        let low = Prediction::new(RainLikelihood::Low, 1, 0.0);
        let moderate = Prediction::new(RainLikelihood::Moderate, 2, 0.5);
        let high = Prediction::new(RainLikelihood::High, 3, 2.0);
        assert_eq!(low.cloudiness_score.to_string(), "0");
        assert_eq!(moderate.cloudiness_score.to_string(), "0.5");
        assert_eq!(high.cloudiness_score.to_string(), "2");
    }
}
