use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Planner screen layout
pub struct PlannerLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub done_area: Rect,
    pub calendar_area: Rect,
    pub progress_area: Rect,
}

/// Create the planner layout
/// - Top bar: keybindings (1 row)
/// - Left column: pending list above the done pane
/// - Right column: calendar above the progress gauge
pub fn create_planner_layout(area: Rect) -> PlannerLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Task lists
            Constraint::Percentage(35), // Calendar + progress
        ])
        .split(content_area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Pending list
            Constraint::Percentage(40), // Done pane
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Calendar pane
            Constraint::Length(3), // Progress gauge
        ])
        .split(columns[1]);

    PlannerLayout {
        keybindings_area,
        list_area: left[0],
        done_area: left[1],
        calendar_area: right[0],
        progress_area: right[1],
    }
}

/// Timer screen layout: hint bar on top, the countdown fills the rest
pub struct TimerLayout {
    pub keybindings_area: Rect,
    pub timer_area: Rect,
}

pub fn create_timer_layout(area: Rect) -> TimerLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    TimerLayout {
        keybindings_area: chunks[0],
        timer_area: chunks[1],
    }
}

/// Create centered modal area (input form, messages, overlays)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_planner_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_planner_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert!(layout.list_area.height > 0);
        assert!(layout.done_area.height > 0);
        assert!(layout.calendar_area.height > 0);
        assert_eq!(layout.progress_area.height, 3);
    }

    #[test]
    fn test_create_timer_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_timer_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.timer_area.height, 49);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 12);
    }
}
