pub mod calendar_pane;
pub mod done_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod planner_pane;
pub mod progress_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::{Screen, UiMode};
use calendar_pane::render_calendar_pane;
use done_pane::render_done_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::{create_planner_layout, create_timer_layout};
use modal::{render_generating_overlay, render_message_modal};
use planner_pane::render_planner_pane;
use progress_pane::render_progress_pane;
use ratatui::Frame;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();

    match app.screen {
        Screen::Planner => {
            let layout = create_planner_layout(size);

            render_keybindings(f, app.screen, layout.keybindings_area);
            render_planner_pane(f, app, layout.list_area);
            render_done_pane(f, app, layout.done_area);
            render_calendar_pane(f, app, layout.calendar_area);
            render_progress_pane(f, app, layout.progress_area);
        }
        Screen::Timer => {
            let layout = create_timer_layout(size);

            render_keybindings(f, app.screen, layout.keybindings_area);
            render_timer_pane(f, app, layout.timer_area);
        }
    }

    // Overlays
    if app.ui_mode == UiMode::AddingTask {
        render_input_form(f, app, size);
    }

    if app.ui_mode == UiMode::Generating {
        render_generating_overlay(f, size);
    }

    if app.message.is_some() {
        render_message_modal(f, app, size);
    }
}
