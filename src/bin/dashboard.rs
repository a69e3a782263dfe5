//! # Binary: Shadow IT Dashboard
//!
//! ## Responsibility
//! Entry point for the terminal dashboard. Resolves configuration, wires the
//! HTTP gateway into the workflow controller, and runs the event loop.
//!
//! ## Usage
//! ```bash
//! cargo run --bin shadow-dashboard
//! cargo run --bin shadow-dashboard -- --api-url http://inventory.internal:5000
//! cargo run --bin shadow-dashboard -- --config dashboard.toml
//! ```
//!
//! ## Guarantees
//! - Terminal state always restored on exit, even on panic
//! - Network work runs on background tasks; the UI never blocks on a request

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::info;

use shadow_inventory::config::loader;
use shadow_inventory::tui::app::App;
use shadow_inventory::tui::events::{apply_event, poll_event, Command, InputEvent};
use shadow_inventory::tui::ui;
use shadow_inventory::{
    init_tracing, Controller, DashboardError, Gateway, HttpTransport, Notifier, WorkflowEvent,
};

const USAGE: &str = "\
Usage: shadow-dashboard [--config <path>] [--api-url <url>]

Options:
  --config <path>   TOML configuration file
  --api-url <url>   Inventory API base URL (overrides SHADOW_API_URL)
  -h, --help        Print this help";

/// CLI arguments for the dashboard binary.
#[derive(Debug, Default)]
struct CliArgs {
    /// Optional TOML configuration file.
    config: Option<PathBuf>,
    /// API base URL override.
    api_url: Option<String>,
    /// Print usage and exit.
    help: bool,
}

/// Parses command-line arguments. Unknown arguments are ignored.
fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => cli.config = iter.next().map(PathBuf::from),
            "--api-url" => cli.api_url = iter.next().cloned(),
            "-h" | "--help" => cli.help = true,
            _ => {}
        }
    }
    cli
}

/// Sets up the terminal for TUI rendering.
///
/// # Errors
/// Returns `io::Error` if terminal initialization fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restores the terminal to its original state.
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config =
        loader::resolve(cli.config.as_deref(), cli.api_url).map_err(DashboardError::from)?;
    init_tracing(config.logging.file.as_deref())?;
    info!(base_url = %config.api.base_url, "starting dashboard");

    let notifier = Notifier::new(config.ui.notice_ttl());
    let transport =
        HttpTransport::new(config.api.base_url.clone()).with_timeout(config.api.timeout());
    let controller = Controller::new(Gateway::new(Arc::new(transport), notifier.clone()));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Install panic hook that restores terminal before printing panic message
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(notifier, config.ui.tick_rate());

    let result = run(&mut terminal, &mut app, &rt, &controller);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Dashboard error: {}", e);
        std::process::exit(1);
    }

    info!("dashboard exited");
    Ok(())
}

/// Runs the event loop until the user quits.
///
/// Background requests only make progress while the runtime is driven, so
/// each iteration parks on the workflow channel for one tick before reading
/// input.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rt: &Runtime,
    controller: &Controller,
) -> Result<(), DashboardError> {
    let _guard = rt.enter();
    let (tx, mut rx) = mpsc::unbounded_channel::<WorkflowEvent>();

    app.dashboard.begin_load();
    controller.spawn_load(tx.clone());

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let tick = app.tick_rate;
        let settled = rt.block_on(async { tokio::time::timeout(tick, rx.recv()).await });
        if let Ok(Some(event)) = settled {
            if app.dashboard.handle(event) {
                app.dashboard.begin_load();
                controller.spawn_load(tx.clone());
            }
        }

        loop {
            let event = poll_event(Duration::ZERO, app);
            if event == InputEvent::None {
                break;
            }
            match apply_event(app, event) {
                Some(Command::Reload) => controller.spawn_load(tx.clone()),
                Some(Command::Resolve(call)) => controller.spawn_resolve(call, tx.clone()),
                None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
