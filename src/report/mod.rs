pub mod dashboard;
pub mod generator;
pub mod stats;
pub mod streak;

pub use dashboard::{build_dashboard, build_yearly_overview, Dashboard, YearlyOverview};
pub use generator::{format_minutes, format_month_score, generate_report};
pub use stats::{CategoryTotal, DailyRate, MonthlyRate, RollingSummary, Tally, YearlyReport};
pub use streak::{recompute_streak, Streak};
