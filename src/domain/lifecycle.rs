//! Task lifecycle: pending -> {completed, missed}, plus the edit/completion
//! eligibility windows that gate user actions.

use super::enums::TaskState;
use super::store::TaskStore;
use super::task::{NewTask, Task, TaskError};
use super::time::{compare_times, Now};
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Flip overdue pending tasks to `Missed`
///
/// A pending task is overdue when its date is before today, or it is today
/// and the current minute is past its end time. Tasks without a parseable
/// end time are left alone. Any task whose lock disagrees with its state
/// (e.g. a stored record missing `locked`) is re-locked or unlocked to match.
/// Returns whether anything changed.
pub fn recompute_states(tasks: &mut [Task], now: &Now) -> bool {
    let mut changed = false;

    for task in tasks.iter_mut() {
        let should_lock = task.state.is_resolved();
        if task.locked != should_lock {
            warn!(id = %task.id, state = ?task.state, "repairing task lock");
            task.locked = should_lock;
            changed = true;
        }

        if task.state != TaskState::Pending {
            continue;
        }
        let Some(end_minutes) = task.end_minutes() else {
            continue;
        };

        let overdue = match task.date.cmp(&now.date) {
            Ordering::Greater => false,
            Ordering::Less => true,
            Ordering::Equal => now.minutes > end_minutes,
        };

        if overdue {
            task.resolve(TaskState::Missed);
            debug!(id = %task.id, title = %task.title, "task missed");
            changed = true;
        }
    }

    changed
}

/// Whether the task's title and estimate may still be changed
pub fn can_edit(task: &Task, now: &Now) -> bool {
    if task.locked {
        return false;
    }
    match task.date.cmp(&now.date) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => task
            .start_minutes()
            .is_some_and(|start| now.minutes < start),
    }
}

/// Whether the task may be marked completed
///
/// Future-dated tasks are completable at any time of day.
pub fn can_complete(task: &Task, now: &Now) -> bool {
    if task.state != TaskState::Pending || task.locked {
        return false;
    }
    if task.date < now.date {
        return false;
    }
    let Some(end_minutes) = task.end_minutes() else {
        return false;
    };
    !(task.date == now.date && now.minutes > end_minutes)
}

/// Validate input and append a new pending task dated `date`
pub fn create_task(store: &mut TaskStore, input: NewTask, date: NaiveDate) -> Result<Uuid, TaskError> {
    validate_title(&input.title)?;
    if input.start_time.trim().is_empty() || input.end_time.trim().is_empty() {
        return Err(TaskError::InvalidInput(
            "Start and end time are required.".to_string(),
        ));
    }
    if compare_times(&input.start_time, &input.end_time) != Ordering::Less {
        return Err(TaskError::InvalidInput(
            "End time must be after start time.".to_string(),
        ));
    }
    validate_minutes(input.estimated_minutes)?;

    let task = Task::new(input, date);
    let id = task.id;
    info!(id = %id, title = %task.title, date = %task.date, "task created");
    store.push(task);
    Ok(id)
}

/// Mark a task completed and lock it
pub fn complete_task(store: &mut TaskStore, id: Uuid, now: &Now) -> Result<(), TaskError> {
    let task = store
        .get_mut(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

    if !can_complete(task, now) {
        return Err(TaskError::NotEligible(
            "Task cannot be completed (missed or locked).".to_string(),
        ));
    }

    task.resolve(TaskState::Completed);
    info!(id = %id, title = %task.title, "task completed");
    Ok(())
}

/// Change the title and estimate of an editable task
pub fn edit_task(
    store: &mut TaskStore,
    id: Uuid,
    title: &str,
    estimated_minutes: f64,
    now: &Now,
) -> Result<(), TaskError> {
    let task = store
        .get_mut(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

    if !can_edit(task, now) {
        return Err(TaskError::NotEligible(
            "Task cannot be edited after start time or once locked.".to_string(),
        ));
    }
    validate_title(title)?;
    validate_minutes(estimated_minutes)?;

    task.title = title.trim().to_string();
    task.estimated_minutes = estimated_minutes;
    info!(id = %id, "task edited");
    Ok(())
}

/// Remove a task regardless of its state or lock
pub fn delete_task(store: &mut TaskStore, id: Uuid) -> Result<Task, TaskError> {
    let task = store
        .remove(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    info!(id = %id, title = %task.title, "task deleted");
    Ok(task)
}

fn validate_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::InvalidInput("Title is required.".to_string()));
    }
    Ok(())
}

fn validate_minutes(minutes: f64) -> Result<(), TaskError> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(TaskError::InvalidInput(
            "Estimated duration must be positive.".to_string(),
        ));
    }
    Ok(())
}
