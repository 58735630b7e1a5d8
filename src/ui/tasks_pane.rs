use crate::app::AppState;
use crate::domain::{state_badge, task_actions, Now, Task, TaskFilter, TaskState};
use crate::report::format_minutes;
use crate::ui::styles::{
    border_style, completed_style, critical_style, default_style, missed_style, pending_style,
    selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Which actions a row offers, e.g. `complete · edit`
fn actions_label(task: &Task, now: &Now) -> String {
    let actions = task_actions(task, now);
    let mut labels = Vec::new();
    if actions.complete {
        labels.push("complete");
    }
    if actions.edit {
        labels.push("edit");
    }
    if labels.is_empty() {
        "locked".to_string()
    } else {
        labels.join(" · ")
    }
}

/// Text cells of one table row
fn row_cells(task: &Task, now: &Now, show_date: bool) -> Vec<String> {
    let when = if show_date {
        format!("{} {}", task.date.format("%m-%d"), task.time_range())
    } else {
        task.time_range()
    };
    vec![
        state_badge(task.state).to_string(),
        when,
        task.title.clone(),
        task.category.name().to_string(),
        task.priority.name().to_string(),
        format_minutes(task.estimated_minutes),
        actions_label(task, now),
    ]
}

/// Render the task table for the viewed date (or all dates)
pub fn render_tasks_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = app.now();
    let show_date = app.filter == TaskFilter::All;
    let tasks = app.visible_tasks();

    let title = match app.filter {
        TaskFilter::ViewedDate => format!(" Tasks • {} ", app.viewed_date.format("%Y-%m-%d")),
        TaskFilter::All => " Tasks • all dates ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let empty = Paragraph::new("No tasks. Press 'a' to add one.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = tasks
        .iter()
        .map(|task| {
            let badge_style = match task.state {
                TaskState::Pending => pending_style(),
                TaskState::Completed => completed_style(),
                TaskState::Missed => missed_style(),
            };
            let cells = row_cells(task, &now, show_date);
            Row::new(cells.into_iter().enumerate().map(|(i, text)| match i {
                0 => Cell::from(text).style(badge_style),
                2 if task.is_critical => Cell::from(format!("! {}", text)).style(critical_style()),
                _ => Cell::from(text),
            }))
        })
        .collect();

    let when_width = if show_date { 19 } else { 13 };
    let widths = [
        Constraint::Length(2),
        Constraint::Length(when_width),
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(17),
    ];

    let header = Row::new(["", "When", "Title", "Category", "Prio", "Est", "Actions"])
        .style(title_style());
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(default_style())
        .highlight_style(selected_style());

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(table, area, &mut state);
}
