use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::Message => handle_message_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Viewed date
        KeyCode::Left => {
            app.shift_viewed_date(-1);
            Ok(false)
        }
        KeyCode::Right => {
            app.shift_viewed_date(1);
            Ok(false)
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.view_today();
            Ok(false)
        }

        // Task actions
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char(' ') | KeyCode::Enter => {
            app.complete_selected();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Views
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.toggle_filter();
            Ok(false)
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.toggle_view();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the message modal is open
fn handle_message_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_message();
    }
    Ok(false)
}

/// Handle keys in input form mode (adding or editing a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Any key clears a previous rejection shown under the form
    app.message = None;

    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab | KeyCode::Down => app.input_form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.input_form_prev_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}
