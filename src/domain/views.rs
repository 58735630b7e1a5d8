use super::enums::{TaskFilter, TaskState};
use super::lifecycle::{can_complete, can_edit};
use super::task::Task;
use super::time::{time_to_minutes, Now};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Tasks to list, ordered by date then start time
///
/// Tasks whose start time does not parse sort after the rest of their day,
/// keeping their stored order.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: TaskFilter, viewed: NaiveDate) -> Vec<&'a Task> {
    let mut rows: Vec<&Task> = tasks
        .iter()
        .filter(|t| filter == TaskFilter::All || t.date == viewed)
        .collect();
    rows.sort_by_key(|t| (t.date, start_key(t)));
    rows
}

/// Group a day's tasks into 24 hour slots by start hour
///
/// Tasks with an unparseable start time are left out.
pub fn hour_slots(tasks: &[Task], date: NaiveDate) -> Vec<Vec<&Task>> {
    let mut slots: Vec<Vec<&Task>> = vec![Vec::new(); 24];
    for task in tasks.iter().filter(|t| t.date == date) {
        if let Some(start) = time_to_minutes(slot_time(task)) {
            slots[(start / 60) as usize].push(task);
        }
    }
    slots
}

/// Helper line describing the viewed date relative to today
pub fn date_context(viewed: NaiveDate, today: NaiveDate) -> &'static str {
    match viewed.cmp(&today) {
        Ordering::Equal => "Today's schedule • Current hour highlighted",
        Ordering::Less => "Past date • Tasks locked",
        Ordering::Greater => "Future date • Tasks pending",
    }
}

/// Glyph for a task's state
pub fn state_badge(state: TaskState) -> &'static str {
    match state {
        TaskState::Pending => "○",
        TaskState::Completed => "✓",
        TaskState::Missed => "✗",
    }
}

/// Which actions the presentation should enable for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskActions {
    pub complete: bool,
    pub edit: bool,
}

pub fn task_actions(task: &Task, now: &Now) -> TaskActions {
    TaskActions {
        complete: can_complete(task, now),
        edit: can_edit(task, now),
    }
}

/// `(false, minutes)` for a valid start, `(true, 0)` otherwise
fn start_key(task: &Task) -> (bool, u32) {
    match time_to_minutes(slot_time(task)) {
        Some(minutes) => (false, minutes),
        None => (true, 0),
    }
}

fn slot_time(task: &Task) -> &str {
    if task.start_time.is_empty() {
        "00:00"
    } else {
        &task.start_time
    }
}
