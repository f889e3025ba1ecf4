use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rainwatch", version, about = "Rain likelihood predictor TUI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict rain for one city and print the result
    Predict {
        /// City name, e.g. "Paris" or "Rio de Janeiro"
        city: String,

        /// Also speak the summary
        #[arg(long)]
        speak: bool,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate config and test the OpenWeatherMap connection
    Check,
    /// Run interactive setup
    Init,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
