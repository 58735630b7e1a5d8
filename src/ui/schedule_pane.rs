use crate::app::AppState;
use crate::domain::{date_context, hour_slots, Task, TaskState};
use crate::ui::styles::{
    border_style, completed_style, current_hour_style, default_style, missed_style, pending_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn state_style(state: TaskState) -> Style {
    match state {
        TaskState::Pending => pending_style(),
        TaskState::Completed => completed_style(),
        TaskState::Missed => missed_style(),
    }
}

/// One line per hour; `current_hour` is highlighted when viewing today
fn hour_lines(slots: &[Vec<&Task>], current_hour: Option<u32>) -> Vec<Line<'static>> {
    slots
        .iter()
        .enumerate()
        .map(|(hour, tasks)| {
            let is_current = current_hour == Some(hour as u32);
            let label_style = if is_current {
                current_hour_style()
            } else {
                default_style()
            };

            let mut spans = vec![Span::styled(format!("{:02}:00 │ ", hour), label_style)];
            for (i, task) in tasks.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(", "));
                }
                spans.push(Span::styled(task.title.clone(), state_style(task.state)));
            }
            Line::from(spans)
        })
        .collect()
}

/// First line to show so the highlighted hour stays in view
fn scroll_offset(focus: Option<u32>, visible: usize, total: usize) -> usize {
    let Some(focus) = focus else {
        return 0;
    };
    let max_offset = total.saturating_sub(visible);
    (focus as usize).saturating_sub(2).min(max_offset)
}

/// Render the 24-hour schedule for the viewed date
pub fn render_schedule_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = app.now();
    let current_hour = (app.viewed_date == now.date).then(|| now.hour());

    let slots = hour_slots(app.tasks(), app.viewed_date);
    let lines = hour_lines(&slots, current_hour);

    let empty_note = if slots.iter().all(Vec::is_empty) {
        "No tasks scheduled for this date"
    } else {
        ""
    };
    let mut all_lines = vec![
        Line::styled(date_context(app.viewed_date, now.date), pending_style()),
        Line::styled(empty_note, pending_style()),
    ];
    let visible = (area.height.saturating_sub(2) as usize).saturating_sub(all_lines.len());
    let offset = scroll_offset(current_hour, visible, lines.len());
    all_lines.extend(lines.into_iter().skip(offset).take(visible));

    let title = format!(" Schedule • {} ", app.viewed_date.format("%a %b %d %Y"));
    let paragraph = Paragraph::new(all_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}
