//! Terminal UI for noughts

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{action_for_key, move_cursor, Action};

use crate::config::AppConfig;
use crate::session::EngineTicket;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Runs the TUI until the user quits.
pub async fn run(config: AppConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.session_settings());
    let res = run_game(&mut terminal, &mut app, config.thinking_delay()).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(scores = ?app.session().scores(), "Session ended");
    res
}

/// Draw, schedule engine turns and dispatch keys until quit.
#[instrument(skip_all, fields(delay_ms = delay.as_millis() as u64))]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    delay: Duration,
) -> Result<()> {
    let (ticket_tx, mut ticket_rx) = mpsc::unbounded_channel::<EngineTicket>();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        if let Some(ticket) = app.start_engine_turn() {
            debug!(?ticket, "Scheduling engine move");
            let tx = ticket_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // Receiver is gone only after the loop exits.
                let _ = tx.send(ticket);
            });
        }

        while let Ok(ticket) = ticket_rx.try_recv() {
            app.finish_engine_turn(ticket)?;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }
    }
}
