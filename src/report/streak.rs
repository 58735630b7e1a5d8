use crate::domain::time::shift_date;
use crate::domain::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Consecutive-day streak of days with at least one resolved task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Streak {
    pub current_streak: u32,
    /// Highest current streak ever observed; never decreases
    pub longest_streak: u32,
    /// Date of the most recent recomputation
    pub last_date: Option<NaiveDate>,
}

/// Recompute the streak from scratch
///
/// Walks back from `today` one day at a time while each day has a completed
/// or missed task. A day with only pending tasks (or none) ends the walk, so
/// the count is zero when today has nothing resolved yet.
pub fn recompute_streak(tasks: &[Task], today: NaiveDate, prior_longest: u32) -> Streak {
    let resolved_days: HashSet<NaiveDate> = tasks
        .iter()
        .filter(|t| t.is_resolved())
        .map(|t| t.date)
        .collect();

    let mut current_streak = 0;
    let mut day = today;
    while resolved_days.contains(&day) {
        current_streak += 1;
        day = shift_date(day, -1);
    }

    Streak {
        current_streak,
        longest_streak: prior_longest.max(current_streak),
        last_date: Some(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::fixtures::task_on;
    use crate::domain::time::{format_iso, parse_iso_date};
    use crate::domain::TaskState;

    const TODAY: &str = "2024-03-03";

    fn today() -> NaiveDate {
        parse_iso_date(TODAY).unwrap()
    }

    /// One resolved task on each of the last `days` days, skipping `gaps`
    fn history(days: i64, gaps: &[i64]) -> Vec<Task> {
        (0..days)
            .filter(|offset| !gaps.contains(offset))
            .map(|offset| {
                let state = if offset % 2 == 0 {
                    TaskState::Completed
                } else {
                    TaskState::Missed
                };
                task_on(&format_iso(shift_date(today(), -offset)), state)
            })
            .collect()
    }

    #[test]
    fn test_seven_consecutive_days() {
        let streak = recompute_streak(&history(7, &[]), today(), 0);
        assert_eq!(streak.current_streak, 7);
        assert_eq!(streak.longest_streak, 7);
        assert_eq!(streak.last_date, Some(today()));
    }

    #[test]
    fn test_gap_breaks_streak() {
        let streak = recompute_streak(&history(7, &[3]), today(), 0);
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        // 2024-03-03 back through 2024-02-27
        let streak = recompute_streak(&history(6, &[]), today(), 0);
        assert_eq!(streak.current_streak, 6);
    }

    #[test]
    fn test_today_without_resolved_task_is_zero() {
        let mut tasks = history(5, &[0]);
        tasks.push(task_on(TODAY, TaskState::Pending));
        let streak = recompute_streak(&tasks, today(), 2);
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 2);
    }

    #[test]
    fn test_longest_never_decreases() {
        let mut prior = 0;
        let mut tasks = Vec::new();
        for offset in (0..10).rev() {
            let day = shift_date(today(), -offset);
            tasks.push(task_on(&format_iso(day), TaskState::Completed));
            let streak = recompute_streak(&tasks, day, prior);
            assert!(streak.current_streak <= streak.longest_streak);
            assert!(streak.longest_streak >= prior);
            prior = streak.longest_streak;
        }
        assert_eq!(prior, 10);

        // A later gap resets the current count but keeps the record
        let later = shift_date(today(), 2);
        tasks.push(task_on(&format_iso(later), TaskState::Missed));
        let streak = recompute_streak(&tasks, later, prior);
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 10);
    }

    #[test]
    fn test_order_of_tasks_is_irrelevant() {
        let mut tasks = history(4, &[]);
        let forward = recompute_streak(&tasks, today(), 0);
        tasks.reverse();
        assert_eq!(recompute_streak(&tasks, today(), 0), forward);
    }
}
