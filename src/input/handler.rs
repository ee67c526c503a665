use crate::app::AppState;
use crate::domain::{Screen, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => match app.screen {
            Screen::Planner => handle_planner(app, key),
            Screen::Timer => handle_timer(app, key),
        },
        UiMode::AddingTask => handle_input_form(app, key),
        UiMode::Generating => Ok(false), // blocking overlay, input suspended
        UiMode::Message => {
            app.dismiss_message();
            Ok(false)
        }
    }
}

/// Keys on the planner screen
fn handle_planner(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_up()?;
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_down()?;
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        // Browse day history
        KeyCode::Left => {
            app.select_prev_day();
            Ok(false)
        }
        KeyCode::Right => {
            app.select_next_day();
            Ok(false)
        }

        // Start the timer for the selected task
        KeyCode::Enter => {
            app.open_timer_for_selected();
            Ok(false)
        }

        // Adjust the available-time hint
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_available_time(true);
            Ok(false)
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.adjust_available_time(false);
            Ok(false)
        }

        // Add a task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Delete the selected task
        KeyCode::Char('x') | KeyCode::Char('X') => {
            app.delete_selected()?;
            Ok(false)
        }

        // Ask the scheduler for an optimized plan
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.generate_schedule();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Keys on the timer screen
fn handle_timer(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char(' ') => {
            app.timer_toggle();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.timer_reset();
            Ok(false)
        }
        KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('F') => {
            app.finish_timer()?;
            Ok(false)
        }
        // Back to the planner; the task stays pending
        KeyCode::Esc => {
            app.abandon_timer();
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        _ => Ok(false),
    }
}

/// Keys while the add-task form is open
fn handle_input_form(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Tab => {
            app.input_form_toggle_field();
            Ok(false)
        }
        KeyCode::Left => {
            if on_subject_field(app) {
                app.input_form_cycle_subject(false);
            }
            Ok(false)
        }
        KeyCode::Right => {
            if on_subject_field(app) {
                app.input_form_cycle_subject(true);
            }
            Ok(false)
        }
        KeyCode::Enter => {
            app.submit_input_form()?;
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn on_subject_field(app: &AppState) -> bool {
    app.input_form
        .as_ref()
        .map(|form| form.editing_field == 1)
        .unwrap_or(false)
}
