use super::task::{Task, TaskError};
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Ordered collection of tasks
///
/// Mutation goes through the lifecycle operations; persistence is the
/// session's job.
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Wrap loaded tasks, dropping any that reuse an earlier id
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(tasks.len());
        for task in tasks {
            if seen.insert(task.id) {
                unique.push(task);
            } else {
                warn!(id = %task.id, "dropping task with duplicate id");
            }
        }
        Self { tasks: unique }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub(crate) fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn remove(&mut self, id: Uuid) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Resolve a full id or a unique id prefix (hyphens ignored)
    pub fn resolve_id(&self, query: &str) -> Result<Uuid, TaskError> {
        let query = query.trim();
        if let Ok(id) = Uuid::parse_str(query) {
            return self
                .get(id)
                .map(|t| t.id)
                .ok_or_else(|| TaskError::NotFound(query.to_string()));
        }

        let needle: String = query
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();
        if needle.is_empty() {
            return Err(TaskError::NotFound(query.to_string()));
        }

        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id),
            (Some(_), Some(_)) => Err(TaskError::InvalidInput(format!(
                "Id prefix '{}' matches more than one task",
                query
            ))),
            _ => Err(TaskError::NotFound(query.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::fixtures::task_on;
    use crate::domain::TaskState;

    #[test]
    fn test_new_drops_duplicate_ids() {
        let task = task_on("2024-03-10", TaskState::Pending);
        let mut copy = task.clone();
        copy.title = "Copy".to_string();
        let store = TaskStore::new(vec![task.clone(), copy]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title, task.title);
    }

    #[test]
    fn test_push_get_remove() {
        let mut store = TaskStore::default();
        assert!(store.is_empty());

        let task = task_on("2024-03-10", TaskState::Pending);
        let id = task.id;
        store.push(task);
        assert_eq!(store.get(id).map(|t| t.id), Some(id));

        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
        assert!(store.remove(id).is_none());
    }

    #[test]
    fn test_resolve_id_full_and_prefix() {
        let task = task_on("2024-03-10", TaskState::Pending);
        let id = task.id;
        let store = TaskStore::new(vec![task]);

        assert_eq!(store.resolve_id(&id.to_string()), Ok(id));
        assert_eq!(store.resolve_id(&id.simple().to_string()[..6]), Ok(id));
        assert_eq!(
            store.resolve_id(&id.simple().to_string()[..6].to_uppercase()),
            Ok(id)
        );
    }

    #[test]
    fn test_resolve_id_unknown() {
        let store = TaskStore::new(vec![task_on("2024-03-10", TaskState::Pending)]);
        assert!(matches!(
            store.resolve_id("not-a-real-id-zzz"),
            Err(TaskError::NotFound(_))
        ));
        assert!(matches!(store.resolve_id(""), Err(TaskError::NotFound(_))));
        assert!(matches!(
            store.resolve_id(&Uuid::new_v4().to_string()),
            Err(TaskError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_id_ambiguous_prefix() {
        let a = task_on("2024-03-10", TaskState::Pending);
        let mut b = task_on("2024-03-10", TaskState::Pending);
        // Force a shared first character
        let mut bytes = *b.id.as_bytes();
        bytes[0] = a.id.as_bytes()[0];
        b.id = Uuid::from_bytes(bytes);
        let prefix = a.id.simple().to_string()[..2].to_string();

        let store = TaskStore::new(vec![a, b]);
        assert!(matches!(
            store.resolve_id(&prefix),
            Err(TaskError::InvalidInput(_))
        ));
    }
}
