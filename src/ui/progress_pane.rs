use crate::app::AppState;
use crate::ui::styles::{border_style, gauge_style, title_style};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// Render the day's progress gauge
pub fn render_progress_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let percent = app.store.progress_percent();

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Progress ", title_style())),
        )
        .gauge_style(gauge_style())
        .percent(percent.round().clamp(0.0, 100.0) as u16)
        .label(format!("{:.0}%", percent));

    f.render_widget(gauge, area);
}
