pub mod enums;
pub mod lifecycle;
pub mod store;
pub mod task;
pub mod time;
pub mod views;

pub use enums::{Category, Priority, TaskFilter, TaskState, UiMode, View};
pub use store::TaskStore;
pub use task::{NewTask, Task, TaskError};
pub use time::{Clock, Now, SystemClock};
pub use views::{date_context, hour_slots, state_badge, task_actions, visible_tasks, TaskActions};
