use crate::domain::time::format_iso;
use crate::domain::Task;
use crate::persistence::{atomic_write, report_file};
use crate::report::stats::{
    monthly_consistency_series, rolling_window_summary, yearly_category_totals, yearly_report,
    CategoryTotal, MonthScore,
};
use crate::report::Streak;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Format minutes as "Xh Ym" or "Xm" for display
pub fn format_minutes(minutes: f64) -> String {
    let total_mins = minutes.max(0.0).round() as i64;
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// "Mar (100%)", or "—" when no month qualifies
pub fn format_month_score(score: Option<MonthScore>) -> String {
    match score {
        Some(score) => format!("{} ({}%)", score.name, score.rate),
        None => "—".to_string(),
    }
}

fn push_category_table(report: &mut String, totals: &[CategoryTotal]) {
    report.push_str("| Category | Estimated time |\n");
    report.push_str("|---|---|\n");
    for total in totals {
        report.push_str(&format!(
            "| {} | {} |\n",
            total.category.name(),
            format_minutes(total.minutes)
        ));
    }
    report.push('\n');
}

/// Build the markdown report for `year`
pub fn render_report(
    tasks: &[Task],
    streak: &Streak,
    year: i32,
    today: NaiveDate,
    window_days: u32,
) -> String {
    let yearly = yearly_report(tasks, year);
    let monthly = monthly_consistency_series(tasks, year);
    let categories = yearly_category_totals(tasks, year);
    let rolling = rolling_window_summary(tasks, today, window_days);

    let mut report = String::new();

    report.push_str(&format!("# Yearly Report - {}\n\n", year));
    report.push_str(&format!("_Generated {}_\n\n", format_iso(today)));

    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Tasks planned:** {}\n", yearly.total_planned));
    report.push_str(&format!("- **Tasks completed:** {}\n", yearly.total_completed));
    report.push_str(&format!("- **Critical tasks missed:** {}\n", yearly.missed_critical));
    report.push_str(&format!(
        "- **Strongest month:** {}\n",
        format_month_score(yearly.strongest)
    ));
    report.push_str(&format!(
        "- **Weakest month:** {}\n",
        format_month_score(yearly.weakest)
    ));
    report.push_str(&format!(
        "- **Average completion:** {}%\n\n",
        yearly.average_completion
    ));

    report.push_str("## Streak\n\n");
    report.push_str(&format!("- **Current:** {} days\n", streak.current_streak));
    report.push_str(&format!("- **Longest:** {} days\n\n", streak.longest_streak));

    report.push_str("## Monthly Consistency\n\n");
    report.push_str("| Month | Completed | Missed | Rate |\n");
    report.push_str("|---|---|---|---|\n");
    for month in &monthly {
        report.push_str(&format!(
            "| {} | {} | {} | {}% |\n",
            month.name, month.tally.completed, month.tally.missed, month.rate
        ));
    }
    report.push('\n');

    report.push_str("## Time by Category\n\n");
    push_category_table(&mut report, &categories);

    report.push_str(&format!(
        "## Last {} Days ({} to {})\n\n",
        window_days,
        format_iso(rolling.start),
        format_iso(rolling.end)
    ));
    report.push_str(&format!("- **Tasks:** {}\n", rolling.total));
    report.push_str(&format!("- **Completed:** {}\n", rolling.completed));
    report.push_str(&format!("- **Missed:** {}\n", rolling.missed));
    report.push_str(&format!("- **Completion rate:** {}%\n", rolling.rate));

    report
}

/// Write the yearly report to `output_path` or `<data_dir>/report-YYYY.md`
pub fn generate_report(
    data_dir: &Path,
    tasks: &[Task],
    streak: &Streak,
    year: i32,
    today: NaiveDate,
    window_days: u32,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report = render_report(tasks, streak, year, today, window_days);
    let output = output_path.unwrap_or_else(|| report_file(data_dir, year));
    atomic_write(&output, &report)?;
    Ok(output)
}
