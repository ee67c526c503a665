use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the blocking overlay shown while the scheduler is thinking
pub fn render_generating_overlay(f: &mut Frame, area: Rect) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(""),
        Line::from(Span::styled(
            "✨ Building your schedule...",
            modal_title_style(),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "This only takes a moment",
            hint_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Please Wait ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the motivational message modal
pub fn render_message_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(message) = &app.message else {
        return;
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(""),
        Line::from(Span::styled(message.text.clone(), modal_title_style())),
        Line::raw(""),
        Line::from(Span::styled("press any key", hint_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" 🌟 ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
