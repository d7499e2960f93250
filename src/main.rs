use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs, io, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Terminal dashboard for SDG topic-modeling analyses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <temp dir>/sdgdash-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (j/k)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Analysis API base URL, overrides the config file
    #[arg(long)]
    base_url: Option<String>,
}

mod app;
mod handlers;
mod ui;

use sdgdash::api::AnalysisClient;
use sdgdash::cache::CacheDb;
use sdgdash::config::Config;
use sdgdash::model::{self, JobState};
use sdgdash::services::{self, AnalysisJobTracker, ApiRequest, ApiResponse};

pub struct App {
    pub model: model::Model,

    cache: CacheDb,
    tracker: AnalysisJobTracker<AnalysisClient>,
    job_rx: watch::Receiver<JobState>,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    api_rx: mpsc::UnboundedReceiver<ApiResponse>,

    base_url: String,
}

impl App {
    async fn new(config: Config, config_path: Option<String>) -> Result<Self> {
        let client = AnalysisClient::new(config.base_url.clone(), config.api_token.clone());
        let base_url = client.base_url().to_string();
        info!("Using analysis API at {}", base_url);

        let cache = CacheDb::new().context("Failed to open history cache")?;

        let mut model = model::Model::new(config.vim_mode, config.form_defaults());
        model.ui.config_path = config_path;

        // Show the last known documents until the backend answers
        match cache.get_documents() {
            Ok(documents) if !documents.is_empty() => {
                debug!("Loaded {} cached documents", documents.len());
                model.documents.replace_documents(documents, true);
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to read cached documents: {:#}", e),
        }

        let tracker = AnalysisJobTracker::new(Arc::new(client.clone()), config.tracker_options());
        let job_rx = tracker.subscribe();

        let (api_tx, api_rx) = services::api::spawn_api_service(client);

        let mut app = App {
            model,
            cache,
            tracker,
            job_rx,
            api_tx,
            api_rx,
            base_url,
        };
        app.refresh_documents();

        Ok(app)
    }

    fn handle_api_response(&mut self, response: ApiResponse) {
        handlers::handle_api_response(self, response);
    }

    fn handle_job_update(&mut self, state: JobState) {
        handlers::handle_job_update(self, state);
    }
}

#[cfg(test)]
impl App {
    /// App over an in-memory cache and an unreachable backend; nothing is spawned.
    /// Returns the receiving end of the API queue alongside it.
    pub(crate) fn for_tests() -> (Self, mpsc::UnboundedReceiver<ApiRequest>) {
        let client = AnalysisClient::new("http://127.0.0.1:1/api", None);
        let tracker = AnalysisJobTracker::new(Arc::new(client), Default::default());
        let job_rx = tracker.subscribe();
        let (api_tx, requests) = mpsc::unbounded_channel();
        let (_responses, api_rx) = mpsc::unbounded_channel();

        let mut model = model::Model::new(false, (5, 200));
        model.documents.replace_documents(
            vec![
                sdgdash::api::DocumentSummary {
                    id: "doc_1".to_string(),
                    name: "water_report.csv".to_string(),
                },
                sdgdash::api::DocumentSummary {
                    id: "doc_2".to_string(),
                    name: "energy_report.csv".to_string(),
                },
            ],
            false,
        );

        let app = App {
            model,
            cache: CacheDb::new_in_memory().expect("in-memory cache"),
            tracker,
            job_rx,
            api_tx,
            api_rx,
            base_url: "http://127.0.0.1:1/api".to_string(),
        };
        (app, requests)
    }
}

/// Determine the config file path with fallback logic
///
/// Running without any config file is allowed; every key has a default.
fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    // Try ~/.config/sdgdash/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("sdgdash").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

/// Log to a file; the terminal belongs to the dashboard
fn setup_logging(debug: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    if !debug {
        return Ok(());
    }

    let log_path = std::env::temp_dir().join("sdgdash-debug.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open debug log {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("sdgdash=debug"))
        .with_writer(Arc::new(file))
        .with_target(false)
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.debug)?;
    debug!("Debug mode enabled");

    let config_path = get_config_path(args.config)?;

    let mut config = match &config_path {
        Some(path) => {
            debug!("Loading config from: {:?}", path);
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Config::from_yaml(&text).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => {
            debug!("No config file found, using defaults");
            Config::default()
        }
    };

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let config_path_str = config_path.map(|p| p.display().to_string());
    let mut app = App::new(config, config_path_str).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Polling stops before the terminal is handed back
    app.tracker.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.should_dismiss_toast() {
            app.model.dismiss_toast();
        }

        if app.model.ui.should_quit {
            info!("Quitting");
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        // Only the newest job snapshot matters; intermediate ones may be skipped
        if app.job_rx.has_changed().unwrap_or(false) {
            let state = app.job_rx.borrow_and_update().clone();
            app.handle_job_update(state);
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handlers::handle_key(app, key)?;
                }
            }
        }
    }

    Ok(())
}
