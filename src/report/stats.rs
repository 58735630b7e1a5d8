//! Completion analytics over the task history. Everything here is a pure
//! read of the tasks plus a reference date.

use crate::domain::time::{days_between, month_day_label, month_index, month_name, shift_date, year};
use crate::domain::{Category, Task, TaskState};
use chrono::NaiveDate;

/// Days covered by the weekly consistency series
pub const WEEK_DAYS: u32 = 7;

/// Completed vs missed counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub completed: usize,
    pub missed: usize,
}

impl Tally {
    fn record(&mut self, task: &Task) {
        match task.state {
            TaskState::Completed => self.completed += 1,
            TaskState::Missed => self.missed += 1,
            TaskState::Pending => {}
        }
    }

    fn of<'a>(tasks: impl Iterator<Item = &'a Task>) -> Self {
        let mut tally = Self::default();
        for task in tasks {
            tally.record(task);
        }
        tally
    }

    /// Completed plus missed
    pub fn resolved(&self) -> usize {
        self.completed + self.missed
    }

    /// Completed share of resolved tasks, as a rounded percentage
    pub fn rate(&self) -> u32 {
        completion_rate(self.completed, self.resolved())
    }
}

/// `round(numerator / denominator * 100)`, or 0 for an empty denominator
pub fn completion_rate(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u32
}

/// Counts over a trailing window ending on (and including) a reference date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: usize,
    pub completed: usize,
    pub missed: usize,
    pub rate: u32,
}

/// One point of the weekly consistency series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRate {
    pub date: NaiveDate,
    /// `MM-DD`
    pub label: String,
    pub rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub minutes: f64,
}

/// Completion figures for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyRate {
    /// Zero-based month index
    pub month: usize,
    pub name: &'static str,
    pub tally: Tally,
    pub rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthScore {
    pub month: usize,
    pub name: &'static str,
    pub rate: u32,
}

/// Year-level aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyReport {
    pub year: i32,
    pub total_planned: usize,
    pub total_completed: usize,
    /// Tasks that are both missed and flagged critical
    pub missed_critical: usize,
    /// Best month among those with resolved tasks; first wins ties
    pub strongest: Option<MonthScore>,
    /// Worst month among those with resolved tasks; first wins ties
    pub weakest: Option<MonthScore>,
    /// `round(completed / planned * 100)`; pending tasks count as planned
    pub average_completion: u32,
}

/// First day of a trailing window, or `None` for an empty window
fn window_start(end: NaiveDate, window_days: u32) -> Option<NaiveDate> {
    (window_days > 0).then(|| shift_date(end, -(i64::from(window_days) - 1)))
}

fn in_window(task: &Task, end: NaiveDate, window_days: u32) -> bool {
    (0..i64::from(window_days)).contains(&days_between(task.date, end))
}

/// Completed and missed tasks on a single date
pub fn day_tally(tasks: &[Task], date: NaiveDate) -> Tally {
    Tally::of(tasks.iter().filter(|t| t.date == date))
}

/// Totals over the `window_days` days ending on `today`
pub fn rolling_window_summary(tasks: &[Task], today: NaiveDate, window_days: u32) -> RollingSummary {
    let in_range: Vec<&Task> = tasks
        .iter()
        .filter(|t| in_window(t, today, window_days))
        .collect();
    let tally = Tally::of(in_range.iter().copied());

    RollingSummary {
        start: window_start(today, window_days).unwrap_or(today),
        end: today,
        total: in_range.len(),
        completed: tally.completed,
        missed: tally.missed,
        rate: tally.rate(),
    }
}

/// Per-day completion rate for the 7 days ending on `today`, oldest first
pub fn weekly_consistency_series(tasks: &[Task], today: NaiveDate) -> Vec<DailyRate> {
    (0..i64::from(WEEK_DAYS))
        .rev()
        .map(|offset| {
            let date = shift_date(today, -offset);
            DailyRate {
                date,
                label: month_day_label(date),
                rate: day_tally(tasks, date).rate(),
            }
        })
        .collect()
}

fn category_totals<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Category::all()
        .iter()
        .map(|&category| CategoryTotal {
            category,
            minutes: 0.0,
        })
        .collect();
    for task in tasks {
        totals[task.category.index()].minutes += task.estimated_minutes;
    }
    totals
}

/// Estimated minutes per category over the trailing window
pub fn category_time_totals(tasks: &[Task], today: NaiveDate, window_days: u32) -> Vec<CategoryTotal> {
    category_totals(tasks.iter().filter(|t| in_window(t, today, window_days)))
}

/// Completion rate for each of the 12 months of `year`
pub fn monthly_consistency_series(tasks: &[Task], for_year: i32) -> Vec<MonthlyRate> {
    let mut tallies = [Tally::default(); 12];
    for task in tasks.iter().filter(|t| year(t.date) == for_year) {
        tallies[month_index(task.date)].record(task);
    }

    tallies
        .iter()
        .enumerate()
        .map(|(month, tally)| MonthlyRate {
            month,
            name: month_name(month),
            tally: *tally,
            rate: tally.rate(),
        })
        .collect()
}

/// Estimated minutes per category across the whole year
pub fn yearly_category_totals(tasks: &[Task], for_year: i32) -> Vec<CategoryTotal> {
    category_totals(tasks.iter().filter(|t| year(t.date) == for_year))
}

pub fn yearly_report(tasks: &[Task], for_year: i32) -> YearlyReport {
    let in_year: Vec<&Task> = tasks.iter().filter(|t| year(t.date) == for_year).collect();

    let total_planned = in_year.len();
    let total_completed = in_year
        .iter()
        .filter(|t| t.state == TaskState::Completed)
        .count();
    let missed_critical = in_year
        .iter()
        .filter(|t| t.state == TaskState::Missed && t.is_critical)
        .count();

    let mut strongest: Option<MonthScore> = None;
    let mut weakest: Option<MonthScore> = None;
    for month in monthly_consistency_series(tasks, for_year) {
        if month.tally.resolved() == 0 {
            continue;
        }
        let score = MonthScore {
            month: month.month,
            name: month.name,
            rate: month.rate,
        };
        if strongest.map_or(true, |best| score.rate > best.rate) {
            strongest = Some(score);
        }
        if weakest.map_or(true, |worst| score.rate < worst.rate) {
            weakest = Some(score);
        }
    }

    YearlyReport {
        year: for_year,
        total_planned,
        total_completed,
        missed_critical,
        strongest,
        weakest,
        average_completion: completion_rate(total_completed, total_planned),
    }
}
