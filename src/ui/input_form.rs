use crate::app::AppState;
use crate::domain::SubjectPreset;
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

/// Render the input form for adding a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();

        // Title field
        lines.push(Line::raw(""));
        let title_label = if form.editing_field == 0 {
            "Title: (editing)"
        } else {
            "Title:"
        };
        lines.push(Line::raw(title_label));

        let title_line = Line::from(vec![
            Span::raw("> "),
            Span::styled(&form.title, modal_title_style()),
            if form.editing_field == 0 {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]);
        lines.push(title_line);
        lines.push(Line::raw(""));

        // Subject field
        let subject_label = if form.editing_field == 1 {
            "Subject: (←/→ to change)"
        } else {
            "Subject:"
        };
        lines.push(Line::raw(subject_label));

        let preset = form.subject_preset();
        let subject_text = if preset == SubjectPreset::Custom {
            format!("{} {} \"{}\"", preset.emoji(), preset.name(), form.custom_subject)
        } else {
            format!("{} {}", preset.emoji(), preset.name())
        };
        let subject_line = Line::from(vec![
            Span::raw("> "),
            Span::styled(subject_text, modal_title_style()),
            if form.editing_field == 1 && preset == SubjectPreset::Custom {
                Span::styled("█", modal_title_style())
            } else {
                Span::raw("")
            },
        ]);
        lines.push(subject_line);
        lines.push(Line::raw(""));

        // Minutes field
        let minutes_label = if form.editing_field == 2 {
            "Minutes (1-480): (editing)"
        } else {
            "Minutes (1-480):"
        };
        lines.push(Line::raw(minutes_label));

        let minutes_line = Line::from(vec![
            Span::raw("> "),
            Span::styled(&form.minutes, modal_title_style()),
            if form.editing_field == 2 {
                Span::styled("█", modal_title_style())
            } else {
                Span::raw("")
            },
        ]);
        lines.push(minutes_line);
        lines.push(Line::raw(""));

        // Instructions; Enter only submits once the fields pass
        let submit_hint = if form.is_valid() {
            "Tab to switch fields  ·  Enter to add  ·  Esc to cancel"
        } else {
            "Tab to switch fields  ·  Esc to cancel  (fill in title and minutes)"
        };
        lines.push(Line::from(Span::styled(submit_hint, hint_style())));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Add Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
