use crate::app::AppState;
use crate::domain::{format_minutes, Task};
use crate::ui::styles::{
    border_style, break_style, default_style, selected_style, subject_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Create a line for a pending task
fn create_task_line(task: &Task, selected: bool) -> Line {
    let base = if selected {
        selected_style()
    } else if task.is_break {
        break_style()
    } else {
        default_style()
    };

    let mut spans = Vec::new();
    spans.push(Span::styled(format!(" {} ", task.emoji), base));
    spans.push(Span::styled(task.title.clone(), base));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("[{}]", task.subject),
        if selected { base } else { subject_style() },
    ));
    spans.push(Span::styled(
        format!("  {}", format_minutes(task.estimated_minutes)),
        base,
    ));

    Line::from(spans)
}

/// Render the pending task list for the active day
pub fn render_planner_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let pending = app.store.pending();

    let items: Vec<ListItem> = pending
        .iter()
        .enumerate()
        .map(|(idx, task)| ListItem::new(create_task_line(task, idx == app.selected_index)))
        .collect();

    let mut title = format!(" {} — {} to do ", app.store.active_day(), pending.len());
    if let Some(minutes) = app.available_time_minutes {
        title.push_str(&format!("({} available) ", format_minutes(minutes)));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
