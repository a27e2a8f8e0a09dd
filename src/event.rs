use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::app::{App, KeyOutcome};
use crate::ui;

/// Draws, then blocks for exactly one event, until the user quits.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == KeyOutcome::Quit {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }
}
