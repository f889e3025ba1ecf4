mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;
mod voice;

use anyhow::Context;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::{OpenWeatherMapClient, WeatherSource};
use logic::RulesEngine;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::PredictorScreen;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let tui = cli.command.is_none();
    init_logging(&cli, tui);

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive().context("Setup failed")?;
            Ok(())
        }
        Some(Commands::Check) => run_check(&cli).await,
        Some(Commands::Predict {
            ref city,
            speak,
            json,
        }) => {
            let config = load_config_or_exit(&cli);
            run_predict(config, city, speak, json).await
        }
        None => {
            let config = load_config_or_exit(&cli);
            run_tui(config).await
        }
    }
}

/// Log to stderr, or to a file while the TUI owns the terminal.
fn init_logging(cli: &Cli, tui: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));

    if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let log_file = Config::log_path().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(Into::into)
    });

    match log_file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

fn load_config_or_exit(cli: &Cli) -> Config {
    match Config::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "Copy config/config.yaml.example to config/config.yaml, run `rainwatch init`, or set {}",
                config::API_KEY_ENV
            );
            std::process::exit(1);
        }
    }
}

async fn run_check(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_ref()).context("Configuration is invalid")?;
    println!("Configuration: OK");
    println!("  {:?}", config.openweathermap);

    if let Some(path) = &config.ui.backdrop {
        let status = if config.ui.load_backdrop().is_some() {
            "found"
        } else {
            "missing (panel drawn without it)"
        };
        println!("  backdrop {}: {}", path.display(), status);
    }

    let rules: Vec<_> = RulesEngine::new()
        .list_rules()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    println!("  rules: {}", rules.join(" > "));

    let client = OpenWeatherMapClient::new(config.openweathermap.clone())?;
    match client.test_connection().await {
        Ok(true) => {
            println!("OpenWeatherMap: OK");
            Ok(())
        }
        Ok(false) => anyhow::bail!("OpenWeatherMap: request rejected, check the API key"),
        Err(e) => anyhow::bail!("OpenWeatherMap: {}", e),
    }
}

async fn run_predict(
    config: Config,
    city: &str,
    speak: bool,
    json: bool,
) -> anyhow::Result<()> {
    let client = Arc::new(OpenWeatherMapClient::new(config.openweathermap.clone())?);
    let speaker = voice::speaker_from_config(&config.voice);
    let mut app = App::new(config, client, speaker);

    app.input.set(city);
    app.submit();
    if app.is_loading() {
        app.wait_for_result().await;
    }

    if let Some(dialog) = app.dialog.take() {
        anyhow::bail!("{}", dialog.message.replace('\n', " "));
    }
    let report = app
        .report()
        .context("Prediction task ended without a result")?;

    if json {
        let out = serde_json::to_string_pretty(report).context("Failed to encode report")?;
        println!("{}", out);
    } else {
        for line in report.summary_lines() {
            println!("{}", line);
        }
    }

    if speak {
        app.speak();
        app.wait_for_speech().await;
        if !app.config.voice.enabled {
            eprintln!("Voice output is disabled in config");
        }
    }

    Ok(())
}

async fn run_tui(config: Config) -> anyhow::Result<()> {
    let client = Arc::new(OpenWeatherMapClient::new(config.openweathermap.clone())?);
    let speaker = voice::speaker_from_config(&config.voice);
    let mut app = App::new(config, client, speaker);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B, S>(terminal: &mut Terminal<B>, app: &mut App<S>) -> anyhow::Result<()>
where
    B: ratatui::backend::Backend,
    B::Error: Send + Sync + 'static,
    S: WeatherSource,
{
    loop {
        terminal.draw(|f| {
            let screen = PredictorScreen::new(&app.input, &app.phase)
                .with_backdrop(app.backdrop.as_deref())
                .with_dialog(app.dialog.as_ref())
                .with_status(app.status_message.as_deref());
            f.render_widget(screen, f.area());
        })?;

        // Poll with a timeout so finished requests are picked up promptly
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        app.poll_results();

        if app.should_quit {
            break;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}

fn handle_key<S: WeatherSource>(app: &mut App<S>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit(),
            KeyCode::Char('s') => app.speak(),
            KeyCode::Char('r') => app.reset_results(),
            _ => {}
        }
        return;
    }

    // A dialog blocks the rest of the screen until dismissed
    if app.dialog.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_dialog();
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Esc if app.is_loading() => {
            app.cancel_request();
        }
        KeyCode::Esc => app.quit(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.left(),
        KeyCode::Right => app.input.right(),
        KeyCode::Home => app.input.home(),
        KeyCode::End => app.input.end(),
        KeyCode::Char(c) => app.input.insert(c),
        _ => {}
    }
}
