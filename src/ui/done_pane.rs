use crate::app::AppState;
use crate::domain::Task;
use crate::timer::format_elapsed;
use crate::ui::styles::{border_style, default_style, done_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Create a line for a completed task
fn create_done_line(task: &Task) -> Line {
    let mut spans = Vec::new();

    spans.push(Span::styled(" ✓ ".to_string(), done_style()));
    spans.push(Span::styled(task.title.clone(), default_style()));

    if let Some(secs) = task.actual_duration_seconds {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("({} / {})", format_elapsed(secs), task.estimate_formatted()),
            done_style(),
        ));
    }

    Line::from(spans)
}

/// Render the completed tasks pane
pub fn render_done_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let completed = app.store.completed();

    let items: Vec<ListItem> = completed
        .iter()
        .map(|task| ListItem::new(create_done_line(task)))
        .collect();

    let title = format!(" Done ({}) ", completed.len());

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
