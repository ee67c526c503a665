use crate::domain::Screen;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current screen
pub fn render_keybindings(f: &mut Frame, screen: Screen, area: Rect) {
    let hints = match screen {
        Screen::Planner => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Shift+↑/↓ reorder   "),
            Span::raw("←/→ day   "),
            Span::raw("Enter timer   "),
            Span::raw("a add   "),
            Span::raw("x delete   "),
            Span::raw("g schedule   "),
            Span::raw("+/- time   "),
            Span::raw("q quit"),
        ]),
        Screen::Timer => Line::from(vec![
            Span::raw(" Space start/pause   "),
            Span::raw("r reset   "),
            Span::raw("Enter finish   "),
            Span::raw("Esc back   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
