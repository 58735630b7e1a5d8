pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod schedule_pane;
pub mod styles;
pub mod summary_pane;
pub mod tasks_pane;
pub mod yearly_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_message_modal;
use ratatui::Frame;
use schedule_pane::render_schedule_pane;
use summary_pane::render_summary_pane;
use tasks_pane::render_tasks_pane;
use yearly_pane::render_yearly_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.view);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    if let Some(area) = layout.schedule_area {
        render_schedule_pane(f, app, area);
    }
    if let Some(area) = layout.tasks_area {
        render_tasks_pane(f, app, area);
    }
    if let Some(area) = layout.summary_area {
        render_summary_pane(f, app, area);
    }
    if let Some(area) = layout.yearly_area {
        render_yearly_pane(f, app, area);
    }

    // Form errors render inside the form; the modal is for everything else
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    } else if app.ui_mode == UiMode::Message {
        render_message_modal(f, app, size);
    }
}
