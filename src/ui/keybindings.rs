use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hint text for the current mode
pub fn hints(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ↑/↓ select   a add   e edit   d complete   x delete   ←/→ day   t today   f filter   y yearly   q quit"
        }
        UiMode::AddingTask | UiMode::EditingTask => {
            " Tab/Shift+Tab field   Enter submit   Esc cancel"
        }
        UiMode::Message => " Enter/Esc dismiss",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(mode))).style(hint_style());
    f.render_widget(paragraph, area);
}
