//! Signal simulator TUI.
//!
//! Screens:
//! 1. Pairs: pick a currency pair
//! 2. Timeframe: pick a 5/10/15/30 second cycle
//! 3. Analysis: simulated progress bar
//! 4. Signal: the random draw, with chart and strength meter

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use signalsim_core::clock::SessionClock;
use signalsim_core::{Session, SimConfig};
use signalsim_tui::{AppState, handle_key, logging, ui};

const POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let log_path = logging::default_log_path();
    if let Err(e) = logging::init(&log_path) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let config_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("signalsim")
        .join("config.toml");
    let config = match SimConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "bad config, using defaults");
            SimConfig::default()
        }
    };

    let session = Session::new(config, SessionClock::local_now());
    info!(seed = session.seed(), variant = ?session.flow().variant(), "session started");
    let mut app = AppState::new(session);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Unmount cancels every timer even when the loop bailed out.
    app.quit();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut last = Instant::now();
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(POLL)? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;
        app.tick(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    }
    info!("session ended");
    Ok(())
}
