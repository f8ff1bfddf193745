//! Dog Saga - random dog photos in the terminal
//!
//! Runtime wiring:
//! - `Store` with a pure reducer and `LoggingMiddleware`
//! - `EffectStore` watching for fetch requests
//! - `EffectRuntime` polling input, routing actions and redrawing on store
//!   notifications
//! - `EffectRunner` spawning HTTP requests through the `TaskManager`
//!
//! # Usage
//!
//! ```sh
//! cargo run -p dog-saga
//!
//! # Fetch immediately and log to a file
//! cargo run -p dog-saga -- --fetch-on-start --log-file /tmp/dog-saga.log
//!
//! # Abort an in-flight request when a new one is made
//! cargo run -p dog-saga -- --cancel-stale
//! ```

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dog_saga::{
    Action, AppState, DEFAULT_ENDPOINT, DogApi, DogUi, EffectRunner, FetchPolicy, reducer, watch,
};
use dog_saga_core::{EffectRuntime, EffectStore, LoggingMiddleware, PollerConfig, Store};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Random dog photos, one request at a time (or several)
#[derive(Parser, Debug)]
#[command(name = "dog-saga")]
#[command(about = "Fetch random dog photos from the Dog CEO API")]
struct Args {
    /// Random image endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Abort an in-flight request when a new one is made
    #[arg(long)]
    cancel_stale: bool,

    /// Request a photo as soon as the app starts
    #[arg(long)]
    fetch_on_start: bool,

    /// Milliseconds between input polls
    #[arg(long, default_value = "16")]
    tick_ms: u64,

    /// Write logs to this file (stdout belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        setup_tracing(path)?;
    }

    let policy = if args.cancel_stale {
        FetchPolicy::LatestOnly
    } else {
        FetchPolicy::Concurrent
    };
    let api = DogApi::new(args.endpoint);
    tracing::info!(?policy, endpoint = %api.endpoint(), "Starting dog-saga");
    let runner = EffectRunner::new(api, policy);
    let poller = PollerConfig {
        loop_sleep: Duration::from_millis(args.tick_ms),
        ..PollerConfig::default()
    };

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, runner, poller, args.fetch_on_start).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "dog-saga exited with an error");
    }
    result
}

fn setup_tracing(path: &Path) -> io::Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dog_saga=debug,dog_saga_core=debug"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    runner: EffectRunner,
    poller: PollerConfig,
    fetch_on_start: bool,
) -> io::Result<()> {
    let store = Store::with_middleware(AppState::default(), reducer, LoggingMiddleware::new());
    let mut runtime =
        EffectRuntime::from_store(EffectStore::from_store(store, watch)).with_event_poller(poller);

    if fetch_on_start {
        runtime.enqueue(Action::DogFetch);
    }

    let ui = RefCell::new(DogUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| runner.handle(effect, ctx.tasks()),
        )
        .await
}
