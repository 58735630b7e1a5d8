use super::stats::{
    category_time_totals, day_tally, monthly_consistency_series, rolling_window_summary,
    weekly_consistency_series, yearly_category_totals, yearly_report, CategoryTotal, DailyRate,
    MonthlyRate, RollingSummary, Tally, YearlyReport,
};
use super::streak::Streak;
use crate::domain::Task;
use chrono::NaiveDate;

/// Everything the summary pane shows for the viewed date
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub streak: Streak,
    /// Completed/missed on the viewed date
    pub day: Tally,
    pub rolling: RollingSummary,
    pub weekly: Vec<DailyRate>,
    pub categories: Vec<CategoryTotal>,
}

/// Everything the yearly view shows
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyOverview {
    pub report: YearlyReport,
    pub monthly: Vec<MonthlyRate>,
    pub categories: Vec<CategoryTotal>,
}

pub fn build_dashboard(tasks: &[Task], streak: Streak, viewed: NaiveDate, window_days: u32) -> Dashboard {
    Dashboard {
        streak,
        day: day_tally(tasks, viewed),
        rolling: rolling_window_summary(tasks, viewed, window_days),
        weekly: weekly_consistency_series(tasks, viewed),
        categories: category_time_totals(tasks, viewed, window_days),
    }
}

pub fn build_yearly_overview(tasks: &[Task], year: i32) -> YearlyOverview {
    YearlyOverview {
        report: yearly_report(tasks, year),
        monthly: monthly_consistency_series(tasks, year),
        categories: yearly_category_totals(tasks, year),
    }
}
