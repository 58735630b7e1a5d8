use super::kv::KeyValueStore;
use crate::domain::Task;
use crate::report::Streak;
use anyhow::Result;
use serde_json::Value;
use tracing::warn;

/// Key of the serialized task list
pub const TASKS_KEY: &str = "tasks";
/// Key of the serialized streak record
pub const STREAK_KEY: &str = "streak";

/// Load the task list, falling back to empty on missing or corrupt data
///
/// Records that fail to decode are skipped; the rest still load.
pub fn load_tasks(kv: &dyn KeyValueStore) -> Vec<Task> {
    let Some(raw) = kv.get(TASKS_KEY) else {
        return Vec::new();
    };

    let records = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            warn!("Task record is not a list, starting fresh");
            return Vec::new();
        }
        Err(e) => {
            warn!("Task record is corrupted, starting fresh: {}", e);
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!("Skipping malformed task record #{}: {}", index, e);
                None
            }
        })
        .collect()
}

pub fn save_tasks(kv: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string(tasks)?;
    kv.set(TASKS_KEY, &json)
}

/// Load the streak, falling back to zero values on missing or corrupt data
pub fn load_streak(kv: &dyn KeyValueStore) -> Streak {
    let Some(raw) = kv.get(STREAK_KEY) else {
        return Streak::default();
    };

    match serde_json::from_str::<Streak>(&raw) {
        Ok(streak) => streak,
        Err(e) => {
            warn!("Streak record is corrupted, starting fresh: {}", e);
            Streak::default()
        }
    }
}

pub fn save_streak(kv: &mut dyn KeyValueStore, streak: &Streak) -> Result<()> {
    let json = serde_json::to_string(streak)?;
    kv.set(STREAK_KEY, &json)
}
