//! Keyboard Input Handler
//!
//! Handles all keyboard input and user interactions.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sdgdash::logic;
use sdgdash::Focus;

use crate::App;

/// Handle keyboard input
///
/// Processes all keyboard events and dispatches to appropriate actions.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    let vim_mode = app.model.ui.vim_mode;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.model.ui.should_quit = true;
        }

        // Document selection
        KeyCode::Up => app.move_selection(false),
        KeyCode::Down => app.move_selection(true),
        KeyCode::Char('k') if vim_mode => app.move_selection(false),
        KeyCode::Char('j') if vim_mode => app.move_selection(true),

        KeyCode::Tab => {
            app.model.analysis.focus = logic::ui::cycle_focus(app.model.analysis.focus);
        }

        // Number fields
        KeyCode::Left | KeyCode::Char('-') => app.model.analysis.step_focused(-1),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            app.model.analysis.step_focused(1)
        }
        KeyCode::PageDown => app.model.analysis.step_focused(-10),
        KeyCode::PageUp => app.model.analysis.step_focused(10),
        KeyCode::Char(c) if c.is_ascii_digit() && app.model.analysis.focus != Focus::Documents => {
            if let Some(digit) = c.to_digit(10) {
                app.model.analysis.type_digit(digit);
            }
        }
        KeyCode::Backspace => app.model.analysis.erase_digit(),

        KeyCode::Enter => app.start_analysis(),
        KeyCode::Char('r') => app.reset_analysis(),
        KeyCode::Char('l') => app.load_latest(),
        KeyCode::Char('R') => app.refresh_documents(),

        _ => {}
    }

    Ok(())
}
