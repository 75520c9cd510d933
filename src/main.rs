use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use amwatch::backend::{BackendClient, ImportSession, Submitter};
use amwatch::source::ProbeSource;
use amwatch::ui::{self, Theme};
use amwatch::{
    events, App, FileSource, HttpSource, HttpSubmitter, Labels, MeasurementRegistry, Notice,
    OfflineSubmitter, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "amwatch")]
#[command(about = "Terminal management panel for active monitoring probes")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the configuration)
    #[arg(long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Read the probe list from a JSON file instead of the backend
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Reload interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Start with the table searched for this host
    #[arg(long)]
    host: Option<String>,

    /// Upload a configuration JSON file to the backend and exit
    #[arg(short, long, conflicts_with = "file")]
    import: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint.clone() {
        settings.endpoint = endpoint;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }
    if let Some(log_file) = args.log_file.clone() {
        settings.log_file = Some(log_file);
    }

    if let Some(path) = &settings.log_file {
        init_logging(path)?;
    }

    let registry = match &settings.registry {
        Some(path) => MeasurementRegistry::load(path)?,
        None => MeasurementRegistry::builtin(),
    };
    let labels = Labels::with_overrides(&settings.labels);

    let runtime = tokio::runtime::Runtime::new()?;
    let client = BackendClient::builder()
        .endpoint(settings.endpoint.clone())
        .csrf(settings.csrf.clone())
        .paths((&settings.paths).into())
        .timeout(settings.timeout())
        .build();

    // Handle import mode (non-interactive)
    if let Some(path) = &args.import {
        return runtime.block_on(import_config(client, &settings.csrf, path));
    }

    let (source, submitter): (Box<dyn ProbeSource>, Box<dyn Submitter>) = match &args.file {
        Some(path) => (
            Box::new(FileSource::new(path)),
            Box::new(OfflineSubmitter::new()),
        ),
        None => (
            Box::new(HttpSource::new(client.clone(), runtime.handle().clone())),
            Box::new(HttpSubmitter::new(client, runtime.handle().clone())),
        ),
    };

    let mut app = App::new(source, submitter, registry, labels);
    app.theme = Theme::auto_detect();
    app.notice = Notice::new(settings.notice_delay());
    if let Some(host) = &args.host {
        app.set_search(host);
    }

    info!(source = app.source_description(), "starting");
    let result = run_tui(&mut app, settings.refresh_interval());
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Upload a configuration file, printing the result.
async fn import_config(client: BackendClient, csrf: &str, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str::<serde_json::Value>(&json)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let mut session = ImportSession::new(client, csrf);
    let response = session.import(&json).await?;
    if !response.success {
        anyhow::bail!(
            "import rejected: {}",
            response.message.as_deref().unwrap_or("no reason given")
        );
    }
    println!("Imported configuration from: {}", path.display());
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(app: &mut App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    app.request_reload();

    let result = run_app(&mut terminal, app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        app.tick(Instant::now())?;

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, ui::middle_band(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Filter bar
                Constraint::Min(8),    // Probe table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::menu::render_bar(frame, app, chunks[1]);
            ui::probes::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            ui::menu::render_popup(frame, app, chunks[1]);
            ui::dialog::render_overlay(frame, app, area);
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + filter bar (1) + table border (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                _ => {}
            }
        }

        // Periodic reload
        if last_refresh.elapsed() >= refresh_interval {
            app.request_reload();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
