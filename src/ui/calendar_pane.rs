use crate::app::AppState;
use crate::ui::styles::{active_day_style, border_style, default_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the recorded days with their task counts
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let active = app.store.active_day().to_string();
    let mut items: Vec<ListItem> = Vec::new();

    for (day, count) in app.store.recorded_days() {
        let is_active = day == active;
        let marker = if is_active { "▶ " } else { "  " };
        let style = if is_active {
            active_day_style()
        } else {
            default_style()
        };

        let line = Line::from(vec![
            Span::styled(marker.to_string(), style),
            Span::styled(day.to_string(), style),
            Span::styled(
                format!("  {} task{}", count, if count == 1 { "" } else { "s" }),
                hint_style(),
            ),
        ]);
        items.push(ListItem::new(line));
    }

    if items.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "  No days recorded yet".to_string(),
            hint_style(),
        ))));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Calendar ", title_style())),
    );

    f.render_widget(list, area);
}
