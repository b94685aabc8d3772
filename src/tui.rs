//! Terminal setup, teardown and event polling
//!
//! Mouse capture is on for the whole session: motion events drive the
//! card hover highlight.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// What the loop should handle next
#[derive(Debug)]
pub enum TuiEvent {
    Input(Event),
    /// The tick interval elapsed
    Tick,
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub tick_rate: Duration,
    last_tick: Instant,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).context("failed to create terminal")?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            last_tick: Instant::now(),
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Switch to raw mode on the alternate screen and restore the terminal
    /// if anything panics afterwards
    pub fn enter(&mut self) -> Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .context("failed to enter alternate screen")?;
        self.terminal.clear()?;
        self.last_tick = Instant::now();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        restore_terminal()
    }

    /// Wait for input until the next tick is due.
    ///
    /// A tick is produced once per `tick_rate` even while input keeps
    /// arriving, so pointer motion can't stall job polling.
    pub fn next_event(&mut self) -> Result<TuiEvent> {
        loop {
            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if timeout.is_zero() {
                self.last_tick = Instant::now();
                return Ok(TuiEvent::Tick);
            }

            if event::poll(timeout)? {
                let event = event::read()?;
                // Key release/repeat events are reported on some platforms
                if let Event::Key(key) = &event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                return Ok(TuiEvent::Input(event));
            }
        }
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;
    Ok(())
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
