use crate::app::AppState;
use crate::timer::TimerState;
use crate::ui::styles::{
    border_style, default_style, hint_style, overtime_style, paused_style, running_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the countdown screen for the task being timed
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(session) = &app.timer else {
        return;
    };

    let state = session.engine.state();
    let (badge, badge_style) = if session.engine.is_overtime() {
        ("⏰ OVERTIME", overtime_style())
    } else {
        match state {
            TimerState::Idle => ("READY", hint_style()),
            TimerState::Running => ("⏱ RUNNING", running_style()),
            TimerState::Paused => ("⏸ PAUSED", paused_style()),
            TimerState::Finished => ("✓ FINISHED", title_style()),
        }
    };

    let countdown_style = if session.engine.is_overtime() {
        overtime_style()
    } else {
        default_style()
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(session.task_title.clone(), title_style())),
        Line::raw(""),
        Line::from(Span::styled(badge.to_string(), badge_style)),
        Line::raw(""),
        Line::from(Span::styled(
            session.engine.remaining_formatted(),
            countdown_style,
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("worked so far: {}", session.engine.elapsed_formatted()),
            hint_style(),
        )),
    ];

    if session.engine.is_overtime() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Over the estimate — finish when you're done!".to_string(),
            hint_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Focus Time ", title_style())),
        );

    f.render_widget(paragraph, area);
}
