use crate::app::{AppState, FormKind};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let height = (form.fields.len() as u16) * 2 + 6;
    let modal_area = create_modal_area(area, height);
    f.render_widget(Clear, modal_area);

    let title_text = match form.kind {
        FormKind::Add => " Add Task ",
        FormKind::Edit(_) => " Edit Task ",
    };

    let mut lines = vec![Line::raw("")];
    for (idx, field) in form.fields.iter().enumerate() {
        let editing = idx == form.editing_field;
        lines.push(Line::raw(if editing {
            format!("{}: (editing)", field.label)
        } else {
            format!("{}:", field.label)
        }));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(field.value.as_str(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style())
            } else {
                Span::raw("")
            },
        ]));
    }

    lines.push(Line::raw(""));
    if let Some(message) = &app.message {
        lines.push(Line::styled(message.as_str(), error_style()));
    }
    lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
