use crate::app::AppState;
use crate::report::{format_minutes, format_month_score, MonthlyRate, YearlyOverview};
use crate::ui::styles::{bar_style, border_style, missed_style, title_style};
use crate::ui::summary_pane::{category_bars, category_caption};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

fn report_lines(overview: &YearlyOverview) -> Vec<Line<'static>> {
    let report = &overview.report;
    let total_minutes: f64 = overview.categories.iter().map(|c| c.minutes).sum();
    vec![
        Line::from(vec![
            Span::styled("Planned: ", title_style()),
            Span::raw(format!("{}   ", report.total_planned)),
            Span::styled("Completed: ", title_style()),
            Span::raw(format!("{}   ", report.total_completed)),
            Span::styled("Average: ", title_style()),
            Span::raw(format!("{}%", report.average_completion)),
        ]),
        Line::from(vec![
            Span::styled("Missed critical: ", title_style()),
            Span::styled(report.missed_critical.to_string(), missed_style()),
        ]),
        Line::from(vec![
            Span::styled("Strongest month: ", title_style()),
            Span::raw(format!("{}   ", format_month_score(report.strongest))),
            Span::styled("Weakest month: ", title_style()),
            Span::raw(format_month_score(report.weakest)),
        ]),
        Line::from(vec![
            Span::styled("Time spent: ", title_style()),
            Span::raw(format_minutes(total_minutes)),
        ]),
    ]
}

/// Bars for the twelve monthly completion rates
fn month_bars(monthly: &[MonthlyRate]) -> Vec<(&'static str, u64)> {
    monthly
        .iter()
        .map(|month| (month.name, u64::from(month.rate)))
        .collect()
}

/// Render the yearly overview
pub fn render_yearly_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let overview = &app.yearly;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Year {} ", overview.report.year),
            title_style(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(55),
            Constraint::Min(0),
        ])
        .split(inner);
    f.render_widget(Paragraph::new(report_lines(overview)), rows[0]);

    let months = month_bars(&overview.monthly);
    let monthly_chart = BarChart::default()
        .block(Block::default().title(Span::styled("Monthly consistency (%)", title_style())))
        .data(months.as_slice())
        .max(100)
        .bar_width(4)
        .bar_gap(1)
        .bar_style(bar_style());
    f.render_widget(monthly_chart, rows[1]);

    let categories = category_bars(&overview.categories);
    let category_chart = BarChart::default()
        .block(Block::default().title(Span::styled(
            format!("Time by category · {}", category_caption(&overview.categories)),
            title_style(),
        )))
        .data(categories.as_slice())
        .bar_width(8)
        .bar_gap(2)
        .bar_style(bar_style());
    f.render_widget(category_chart, rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::fixtures::task_on;
    use crate::domain::TaskState;
    use crate::report::build_yearly_overview;

    #[test]
    fn test_month_bars_cover_year() {
        let tasks = vec![
            task_on("2024-03-05", TaskState::Completed),
            task_on("2024-03-06", TaskState::Missed),
        ];
        let overview = build_yearly_overview(&tasks, 2024);
        let bars = month_bars(&overview.monthly);

        assert_eq!(bars.len(), 12);
        assert_eq!(bars[0], ("Jan", 0));
        assert_eq!(bars[2], ("Mar", 50));
    }

    #[test]
    fn test_report_lines_without_data() {
        let overview = build_yearly_overview(&[], 2024);
        let lines = report_lines(&overview);
        let text: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Strongest month: —   Weakest month: —");
    }
}
