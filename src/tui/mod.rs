//! Interactive terminal dashboard.
//!
//! Renders the job list, a log overlay for one selected job, and the five
//! pipeline stage actions. A poll tick refreshes the job list every few
//! seconds; the tick lives inside the event loop, so leaving the dashboard
//! tears it down with everything else.

mod app;
mod input;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::MissedTickBehavior;

use crate::api::JobsApi;
use app::TuiApp;

/// Run the dashboard against the given backend client.
pub async fn run<C: JobsApi>(client: C, poll_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = TuiApp::new(client);
    let result = run_app(&mut terminal, &mut app, poll_interval).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_app<C: JobsApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp<C>,
    poll_interval: Duration,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The interval's first tick fires immediately: that is the initial fetch.
    ticker.tick().await;
    app.init().await;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    if let Some(action) = input::handle_event(event) {
                        app.handle_action(action).await;
                    }
                }
                Some(Err(e)) => {
                    return Err(e).context("Failed to read terminal events");
                }
                None => break,
            },
            _ = ticker.tick() => app.poll_tick().await,
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
