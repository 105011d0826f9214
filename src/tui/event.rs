//! Event handling for the TUI.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use super::app::{App, ChartTab};

/// PageUp/PageDown move this many slider steps.
const COARSE_STEPS: i32 = 10;

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Form navigation
        KeyCode::Down | KeyCode::Char('j') => app.next_field(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_field(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.adjust(1),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust(-1),
        KeyCode::PageUp => app.adjust(COARSE_STEPS),
        KeyCode::PageDown => app.adjust(-COARSE_STEPS),
        KeyCode::Char('r') => app.reset(),

        // Chart tabs
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.previous_tab(),
        KeyCode::Char(c @ '1'..='3') => app.current_tab = ChartTab::from_num(c as u8 - b'0'),

        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
