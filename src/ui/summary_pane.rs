use crate::app::AppState;
use crate::report::{format_minutes, CategoryTotal, Dashboard, DailyRate};
use crate::ui::styles::{bar_style, border_style, completed_style, missed_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

fn stat_lines(dashboard: &Dashboard) -> Vec<Line<'static>> {
    let streak = &dashboard.streak;
    let rolling = &dashboard.rolling;
    vec![
        Line::from(vec![
            Span::styled("Streak: ", title_style()),
            Span::raw(format!(
                "{} day(s)   (longest {})",
                streak.current_streak, streak.longest_streak
            )),
        ]),
        Line::from(vec![
            Span::styled("Day: ", title_style()),
            Span::styled(format!("✓ {} completed", dashboard.day.completed), completed_style()),
            Span::raw("   "),
            Span::styled(format!("✗ {} missed", dashboard.day.missed), missed_style()),
        ]),
        Line::from(vec![
            Span::styled("Window: ", title_style()),
            Span::raw(format!(
                "{} → {}   {} tasks   {} completed   {} missed   {}%",
                rolling.start.format("%m-%d"),
                rolling.end.format("%m-%d"),
                rolling.total,
                rolling.completed,
                rolling.missed,
                rolling.rate
            )),
        ]),
    ]
}

/// Bars for the daily completion rates
pub(crate) fn rate_bars(series: &[DailyRate]) -> Vec<(&str, u64)> {
    series
        .iter()
        .map(|point| (point.label.as_str(), u64::from(point.rate)))
        .collect()
}

/// Bars for category minutes, rounded to whole minutes
pub(crate) fn category_bars(totals: &[CategoryTotal]) -> Vec<(&'static str, u64)> {
    totals
        .iter()
        .map(|total| (total.category.name(), total.minutes.max(0.0).round() as u64))
        .collect()
}

pub(crate) fn category_caption(totals: &[CategoryTotal]) -> String {
    totals
        .iter()
        .map(|total| format!("{} {}", total.category.name(), format_minutes(total.minutes)))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Render streak, counts and the two charts for the viewed date
pub fn render_summary_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let dashboard = &app.dashboard;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Summary ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);
    f.render_widget(Paragraph::new(stat_lines(dashboard)), rows[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let weekly = rate_bars(&dashboard.weekly);
    let weekly_chart = BarChart::default()
        .block(Block::default().title(Span::styled("Consistency (7 days, %)", title_style())))
        .data(weekly.as_slice())
        .max(100)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(bar_style());
    f.render_widget(weekly_chart, charts[0]);

    let categories = category_bars(&dashboard.categories);
    let category_chart = BarChart::default()
        .block(Block::default().title(Span::styled(
            format!("Time · {}", category_caption(&dashboard.categories)),
            title_style(),
        )))
        .data(categories.as_slice())
        .bar_width(8)
        .bar_gap(1)
        .bar_style(bar_style());
    f.render_widget(category_chart, charts[1]);
}
