use crate::domain::View;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub schedule_area: Option<Rect>,
    pub tasks_area: Option<Rect>,
    pub summary_area: Option<Rect>,
    pub yearly_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Schedule view: Schedule (30%) | Tasks above Summary (70%)
/// - Yearly view: the whole content area
pub fn create_layout(area: Rect, view: View) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];

    match view {
        View::Yearly => MainLayout {
            keybindings_area,
            schedule_area: None,
            tasks_area: None,
            summary_area: None,
            yearly_area: Some(content_area),
        },
        View::Schedule => {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(30), // Hourly schedule
                    Constraint::Percentage(70), // Tasks and summary
                ])
                .split(content_area);

            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(55), // Task table
                    Constraint::Percentage(45), // Summary
                ])
                .split(horizontal[1]);

            MainLayout {
                keybindings_area,
                schedule_area: Some(horizontal[0]),
                tasks_area: Some(right[0]),
                summary_area: Some(right[1]),
                yearly_area: None,
            }
        }
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
