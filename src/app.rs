use crate::domain::lifecycle::{
    can_edit, complete_task, create_task, delete_task, edit_task, recompute_states,
};
use crate::domain::time::{shift_date, today, year};
use crate::domain::{
    visible_tasks, Category, Clock, NewTask, Now, Priority, Task, TaskError, TaskFilter, TaskState,
    TaskStore, UiMode, View,
};
use crate::notifications;
use crate::persistence::{load_streak, load_tasks, save_streak, save_tasks, KeyValueStore, Settings};
use crate::report::{build_dashboard, build_yearly_overview, recompute_streak, Dashboard, Streak, YearlyOverview};
use crate::ticker::MissWatcher;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// What the open form will do on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit(Uuid),
}

/// One labelled text field of the input form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Input form state for adding or editing tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub editing_field: usize,
}

impl InputFormState {
    fn add() -> Self {
        Self {
            kind: FormKind::Add,
            fields: vec![
                FormField::new("Title", ""),
                FormField::new("Category (Study/Health/Coding/Personal)", "Study"),
                FormField::new("Priority (Low/Medium/High)", "Medium"),
                FormField::new("Start (HH:MM)", ""),
                FormField::new("End (HH:MM)", ""),
                FormField::new("Estimated minutes", ""),
                FormField::new("Critical (y/n)", "n"),
            ],
            editing_field: 0,
        }
    }

    fn edit(task: &Task) -> Self {
        Self {
            kind: FormKind::Edit(task.id),
            fields: vec![
                FormField::new("Title", task.title.clone()),
                FormField::new("Estimated minutes", task.estimated_minutes.to_string()),
            ],
            editing_field: 0,
        }
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// Interpret the add-form fields as a new task
    fn to_new_task(&self) -> Result<NewTask, TaskError> {
        let category = Category::from_tag(self.value(1))
            .ok_or_else(|| TaskError::InvalidInput(format!("Unknown category '{}'.", self.value(1))))?;
        let priority = Priority::from_tag(self.value(2))
            .ok_or_else(|| TaskError::InvalidInput(format!("Unknown priority '{}'.", self.value(2))))?;

        Ok(NewTask {
            title: self.value(0).to_string(),
            category,
            priority,
            start_time: self.value(3).to_string(),
            end_time: self.value(4).to_string(),
            estimated_minutes: parse_minutes(self.value(5)),
            is_critical: parse_flag(self.value(6)),
        })
    }
}

/// Parse a minutes field; unparseable input becomes NaN and fails validation
pub fn parse_minutes(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "y" | "yes" | "true" | "1")
}

/// Delivers the "task missed" notification for one task title
pub type Notifier = Box<dyn FnMut(&str)>;

/// Session controller: owns the task store, the streak, and the
/// persistence and clock collaborators, plus TUI state
pub struct AppState {
    pub store: TaskStore,
    pub streak: Streak,
    pub settings: Settings,
    kv: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,

    /// Date shown in the schedule; new tasks are created on it
    pub viewed_date: NaiveDate,
    /// Today's date as of the last refresh
    pub last_today: NaiveDate,
    pub filter: TaskFilter,
    pub view: View,
    pub ui_mode: UiMode,
    pub selected_index: usize,
    pub input_form: Option<InputFormState>,
    pub message: Option<String>,
    pub miss_watcher: MissWatcher,
    notifier: Notifier,

    pub dashboard: Dashboard,
    pub yearly: YearlyOverview,
}

impl AppState {
    /// Load the task list and streak, then bring states and summaries up to date
    pub fn new(kv: Box<dyn KeyValueStore>, clock: Box<dyn Clock>, settings: Settings) -> Self {
        let store = TaskStore::new(load_tasks(kv.as_ref()));
        let streak = load_streak(kv.as_ref());
        let today = today(clock.as_ref());
        let miss_watcher = MissWatcher::from_secs(settings.miss_check_secs, Instant::now());

        debug!(tasks = store.len(), "session loaded");

        let mut app = Self {
            dashboard: build_dashboard(store.tasks(), streak.clone(), today, settings.window_days),
            yearly: build_yearly_overview(store.tasks(), year(today)),
            store,
            streak,
            settings,
            kv,
            clock,
            viewed_date: today,
            last_today: today,
            filter: TaskFilter::ViewedDate,
            view: View::Schedule,
            ui_mode: UiMode::Normal,
            selected_index: 0,
            input_form: None,
            message: None,
            miss_watcher,
            notifier: Box::new(notifications::notify_task_missed),
        };
        app.refresh_states();
        app.refresh_summaries();
        app
    }

    pub fn now(&self) -> Now {
        Now::read(self.clock.as_ref())
    }

    pub fn today(&self) -> NaiveDate {
        today(self.clock.as_ref())
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = save_tasks(self.kv.as_mut(), self.store.tasks()) {
            warn!("Failed to save tasks: {:#}", e);
        }
    }

    fn persist_streak(&mut self) {
        if let Err(e) = save_streak(self.kv.as_mut(), &self.streak) {
            warn!("Failed to save streak: {:#}", e);
        }
    }

    /// Run the missed-state pass and persist on change
    ///
    /// Returns the ids that this pass moved to missed, or `None` when
    /// nothing changed.
    pub fn refresh_states(&mut self) -> Option<Vec<Uuid>> {
        let now = self.now();
        let pending: HashSet<Uuid> = self
            .store
            .tasks()
            .iter()
            .filter(|t| t.state == TaskState::Pending)
            .map(|t| t.id)
            .collect();

        if !recompute_states(self.store.tasks_mut(), &now) {
            return None;
        }
        self.persist_tasks();

        let missed = self
            .store
            .tasks()
            .iter()
            .filter(|t| t.state == TaskState::Missed && pending.contains(&t.id))
            .map(|t| t.id)
            .collect();
        Some(missed)
    }

    fn notify_missed(&mut self, ids: &[Uuid]) {
        if !self.settings.notifications {
            return;
        }
        for id in ids {
            if let Some(task) = self.store.get(*id) {
                debug!(id = %id, "notifying missed task");
                (self.notifier)(&task.title);
            }
        }
    }

    /// Recompute (and persist) the streak against today
    pub fn refresh_streak(&mut self) -> Streak {
        let today = self.today();
        self.streak = recompute_streak(self.store.tasks(), today, self.streak.longest_streak);
        self.persist_streak();
        self.streak.clone()
    }

    /// Recompute the streak and every derived summary
    pub fn refresh_summaries(&mut self) {
        let streak = self.refresh_streak();
        let today = self.today();
        self.dashboard = build_dashboard(
            self.store.tasks(),
            streak,
            self.viewed_date,
            self.settings.window_days,
        );
        self.yearly = build_yearly_overview(self.store.tasks(), year(today));
        self.clamp_selection();
    }

    /// Periodic tick; returns true when the screen content changed
    pub fn tick(&mut self, instant: Instant) -> bool {
        if !self.miss_watcher.poll(instant) {
            return false;
        }

        let today = self.today();
        let mut changed = false;
        if today != self.last_today {
            // Keep following "today" across midnight
            if self.viewed_date == self.last_today {
                self.viewed_date = today;
            }
            self.last_today = today;
            changed = true;
        }

        // Only the watcher notifies; load and create stay silent
        if let Some(missed) = self.refresh_states() {
            self.notify_missed(&missed);
            changed = true;
        }
        if changed {
            self.refresh_summaries();
        }
        changed
    }

    pub fn resolve_id(&self, query: &str) -> Result<Uuid, TaskError> {
        self.store.resolve_id(query)
    }

    /// Create a task on the viewed date
    pub fn create_task(&mut self, input: NewTask) -> Result<Uuid, TaskError> {
        let id = create_task(&mut self.store, input, self.viewed_date)?;
        self.persist_tasks();
        self.refresh_states();
        self.refresh_summaries();
        Ok(id)
    }

    pub fn complete_task(&mut self, id: Uuid) -> Result<(), TaskError> {
        let now = self.now();
        complete_task(&mut self.store, id, &now)?;
        self.persist_tasks();
        self.refresh_summaries();
        Ok(())
    }

    pub fn edit_task(&mut self, id: Uuid, title: &str, estimated_minutes: f64) -> Result<(), TaskError> {
        let now = self.now();
        edit_task(&mut self.store, id, title, estimated_minutes, &now)?;
        self.persist_tasks();
        self.refresh_summaries();
        Ok(())
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<Task, TaskError> {
        let task = delete_task(&mut self.store, id)?;
        self.persist_tasks();
        self.refresh_summaries();
        Ok(task)
    }

    /// Move the viewed date by `delta` days
    pub fn shift_viewed_date(&mut self, delta: i64) {
        self.viewed_date = shift_date(self.viewed_date, delta);
        self.selected_index = 0;
        self.refresh_summaries();
    }

    pub fn set_viewed_date(&mut self, date: NaiveDate) {
        self.viewed_date = date;
        self.selected_index = 0;
        self.refresh_summaries();
    }

    pub fn view_today(&mut self) {
        let today = self.today();
        self.set_viewed_date(today);
    }

    pub fn toggle_filter(&mut self) {
        self.filter = match self.filter {
            TaskFilter::ViewedDate => TaskFilter::All,
            TaskFilter::All => TaskFilter::ViewedDate,
        };
        self.selected_index = 0;
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Schedule => View::Yearly,
            View::Yearly => View::Schedule,
        };
    }

    /// Rows of the task table, in display order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(self.store.tasks(), self.filter, self.viewed_date)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.selected_task().map(|t| t.id)
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_tasks().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible_tasks().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Show an error or notice in the message modal
    pub fn show_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.ui_mode = UiMode::Message;
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
        self.ui_mode = UiMode::Normal;
    }

    fn report_result<T>(&mut self, result: Result<T, TaskError>) {
        if let Err(e) = result {
            debug!("rejected: {}", e);
            self.show_message(e.to_string());
        }
    }

    pub fn complete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.complete_task(id);
            self.report_result(result);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.delete_task(id);
            self.report_result(result);
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::add());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the edit form for the selected task, if it is still editable
    pub fn start_edit_task(&mut self) {
        let now = self.now();
        let Some(task) = self.selected_task() else {
            return;
        };
        if !can_edit(task, &now) {
            self.show_message(
                TaskError::NotEligible(
                    "Task cannot be edited after start time or once locked.".to_string(),
                )
                .to_string(),
            );
            return;
        }
        let form = InputFormState::edit(task);
        self.input_form = Some(form);
        self.ui_mode = UiMode::EditingTask;
    }

    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % form.fields.len();
        }
    }

    pub fn input_form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            let count = form.fields.len();
            form.editing_field = (form.editing_field + count - 1) % count;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            let index = form.editing_field;
            form.fields[index].value.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            let index = form.editing_field;
            form.fields[index].value.pop();
        }
    }

    /// Submit the form; on rejection the form stays open behind the message
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        let result = match form.kind {
            FormKind::Add => form.to_new_task().and_then(|input| self.create_task(input).map(|_| ())),
            FormKind::Edit(id) => self.edit_task(id, form.value(0), parse_minutes(form.value(1))),
        };

        match result {
            Ok(()) => self.cancel_input_form(),
            Err(e) => {
                debug!("form rejected: {}", e);
                self.message = Some(e.to_string());
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domain::time::FixedClock;
    use crate::persistence::kv::MemoryKvStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Clock handle shared between a test and the session
    struct SharedClock(Rc<FixedClock>);

    impl Clock for SharedClock {
        fn now(&self) -> chrono::NaiveDateTime {
            self.0.now()
        }
    }

    fn quiet_settings() -> Settings {
        Settings {
            notifications: false,
            ..Settings::default()
        }
    }

    /// Open a session over `kv` and `clock` without desktop notifications
    pub fn reopen(kv: &MemoryKvStore, clock: &Rc<FixedClock>) -> AppState {
        AppState::new(
            Box::new(kv.clone()),
            Box::new(SharedClock(clock.clone())),
            quiet_settings(),
        )
    }

    /// Fresh session over an empty in-memory store
    pub fn session(date: &str, time: &str) -> (AppState, MemoryKvStore, Rc<FixedClock>) {
        let kv = MemoryKvStore::default();
        let clock = Rc::new(FixedClock::at(date, time));
        (reopen(&kv, &clock), kv, clock)
    }

    /// Session with notifications on that records each notified title
    pub fn notifying_reopen(
        kv: &MemoryKvStore,
        clock: &Rc<FixedClock>,
    ) -> (AppState, Rc<RefCell<Vec<String>>>) {
        let mut app = AppState::new(
            Box::new(kv.clone()),
            Box::new(SharedClock(clock.clone())),
            Settings::default(),
        );
        let sent = Rc::new(RefCell::new(Vec::new()));
        let log = sent.clone();
        app.notifier = Box::new(move |title: &str| log.borrow_mut().push(title.to_string()));
        (app, sent)
    }

    /// Session whose every write fails
    pub fn failing_session(date: &str, time: &str) -> AppState {
        reopen(&MemoryKvStore::failing(), &Rc::new(FixedClock::at(date, time)))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{failing_session, notifying_reopen, reopen, session};
    use super::*;
    use crate::domain::time::{format_iso, FixedClock};
    use crate::persistence::kv::MemoryKvStore;
    use crate::persistence::records::{STREAK_KEY, TASKS_KEY};
    use std::rc::Rc;
    use std::time::Duration;

    fn new_task(title: &str, start: &str, end: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            category: Category::Coding,
            priority: Priority::High,
            start_time: start.to_string(),
            end_time: end.to_string(),
            estimated_minutes: 30.0,
            is_critical: false,
        }
    }

    #[test]
    fn test_app_state_new_empty() {
        let (app, _, _) = session("2024-05-15", "08:00");
        assert!(app.tasks().is_empty());
        assert_eq!(format_iso(app.viewed_date), "2024-05-15");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.streak.current_streak, 0);
    }

    #[test]
    fn test_create_task_is_written_through() {
        let (mut app, kv, _) = session("2024-05-15", "08:00");
        let id = app.create_task(new_task("Write tests", "09:00", "10:00")).unwrap();

        let stored = load_tasks(&kv);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].state, TaskState::Pending);
        assert!(kv.get(STREAK_KEY).is_some());
    }

    #[test]
    fn test_rejected_operation_writes_nothing() {
        let (mut app, kv, _) = session("2024-05-15", "08:00");
        let writes = kv.write_count();
        let result = app.create_task(new_task("", "09:00", "10:00"));
        assert!(matches!(result, Err(TaskError::InvalidInput(_))));
        assert_eq!(kv.write_count(), writes);
        assert!(kv.get(TASKS_KEY).is_none());
    }

    #[test]
    fn test_load_marks_overdue_tasks_missed() {
        let (mut app, kv, clock) = session("2024-05-15", "08:00");
        app.create_task(new_task("Morning run", "08:30", "09:00")).unwrap();

        clock.set("2024-05-16", "07:00");
        let reloaded = reopen(&kv, &clock);
        assert_eq!(reloaded.tasks()[0].state, TaskState::Missed);
        assert!(reloaded.tasks()[0].locked);
        assert_eq!(load_tasks(&kv)[0].state, TaskState::Missed);
    }

    #[test]
    fn test_tick_flips_task_after_end_time() {
        let (mut app, kv, clock) = session("2024-05-15", "09:00");
        let id = app.create_task(new_task("Standup", "09:15", "09:30")).unwrap();
        let start = Instant::now();

        clock.set("2024-05-15", "09:31");
        // Not due yet: nothing happens even though the window elapsed
        assert!(!app.tick(start));
        assert_eq!(app.store.get(id).unwrap().state, TaskState::Pending);

        assert!(app.tick(start + Duration::from_secs(61)));
        assert_eq!(app.store.get(id).unwrap().state, TaskState::Missed);
        assert_eq!(load_tasks(&kv)[0].state, TaskState::Missed);
        assert_eq!(app.dashboard.day.missed, 1);
        assert_eq!(app.streak.current_streak, 1);

        // Nothing further to change
        assert!(!app.tick(start + Duration::from_secs(200)));
    }

    #[test]
    fn test_only_the_miss_watcher_notifies() {
        let (mut first, kv, clock) = session("2024-05-15", "08:00");
        first.create_task(new_task("Overnight", "09:00", "10:00")).unwrap();

        clock.set("2024-05-16", "09:00");
        let (mut app, sent) = notifying_reopen(&kv, &clock);
        // Missed while closed: marked on load without a notification
        assert_eq!(app.tasks()[0].state, TaskState::Missed);

        app.shift_viewed_date(-1);
        let id = app.create_task(new_task("Backfill", "09:00", "10:00")).unwrap();
        assert_eq!(app.store.get(id).unwrap().state, TaskState::Missed);
        assert!(sent.borrow().is_empty());

        app.view_today();
        app.create_task(new_task("Standup", "09:15", "09:30")).unwrap();
        clock.set("2024-05-16", "09:31");
        assert!(app.tick(Instant::now() + Duration::from_secs(61)));
        assert_eq!(*sent.borrow(), vec!["Standup".to_string()]);
    }

    #[test]
    fn test_repaired_lock_is_persisted_on_load() {
        let kv = MemoryKvStore::default();
        let clock = Rc::new(FixedClock::at("2024-05-15", "08:00"));
        let mut task = crate::domain::task::fixtures::task_on("2024-05-20", TaskState::Completed);
        task.locked = false;
        save_tasks(&mut kv.clone(), &[task]).unwrap();

        let app = reopen(&kv, &clock);
        let task = &app.tasks()[0];
        assert!(task.locked);
        assert!(!can_edit(task, &app.now()));
        assert!(load_tasks(&kv)[0].locked);
    }

    #[test]
    fn test_tick_follows_midnight() {
        let (mut app, _, clock) = session("2024-05-15", "23:59");
        clock.advance_minutes(2);
        assert!(app.tick(Instant::now() + Duration::from_secs(120)));
        assert_eq!(format_iso(app.viewed_date), "2024-05-16");
    }

    #[test]
    fn test_complete_and_edit_flow() {
        let (mut app, _, clock) = session("2024-05-15", "08:00");
        let id = app.create_task(new_task("Review PR", "09:00", "10:00")).unwrap();

        app.edit_task(id, "Review two PRs", 50.0).unwrap();
        assert_eq!(app.store.get(id).unwrap().title, "Review two PRs");

        clock.set("2024-05-15", "09:30");
        assert!(matches!(
            app.edit_task(id, "Too late", 10.0),
            Err(TaskError::NotEligible(_))
        ));

        app.complete_task(id).unwrap();
        assert_eq!(app.store.get(id).unwrap().state, TaskState::Completed);
        assert_eq!(app.streak.current_streak, 1);
        assert_eq!(app.streak.longest_streak, 1);
        assert_eq!(app.dashboard.rolling.rate, 100);
    }

    #[test]
    fn test_streak_survives_reload() {
        let (mut app, kv, clock) = session("2024-05-15", "08:00");
        let id = app.create_task(new_task("Read", "09:00", "10:00")).unwrap();
        app.complete_task(id).unwrap();

        // Two days later nothing resolved yesterday: current drops, longest stays
        clock.set("2024-05-17", "08:00");
        let reloaded = reopen(&kv, &clock);
        assert_eq!(reloaded.streak.current_streak, 0);
        assert_eq!(reloaded.streak.longest_streak, 1);
    }

    #[test]
    fn test_write_failures_do_not_fail_operations() {
        let mut app = failing_session("2024-05-15", "08:00");
        let id = app.create_task(new_task("Still works", "09:00", "10:00")).unwrap();
        app.complete_task(id).unwrap();
        assert_eq!(app.store.get(id).unwrap().state, TaskState::Completed);
    }

    #[test]
    fn test_create_on_viewed_date() {
        let (mut app, _, _) = session("2024-05-15", "08:00");
        app.shift_viewed_date(2);
        let id = app.create_task(new_task("Plan ahead", "09:00", "10:00")).unwrap();
        assert_eq!(format_iso(app.store.get(id).unwrap().date), "2024-05-17");

        // A task created on a past date is missed immediately
        app.shift_viewed_date(-3);
        let id = app.create_task(new_task("Backfill", "09:00", "10:00")).unwrap();
        assert_eq!(app.store.get(id).unwrap().state, TaskState::Missed);

        app.view_today();
        assert_eq!(format_iso(app.viewed_date), "2024-05-15");
    }

    #[test]
    fn test_selection_and_filter() {
        let (mut app, _, _) = session("2024-05-15", "08:00");
        app.create_task(new_task("Late", "15:00", "16:00")).unwrap();
        app.create_task(new_task("Early", "09:00", "10:00")).unwrap();
        app.shift_viewed_date(1);
        app.create_task(new_task("Tomorrow", "09:00", "10:00")).unwrap();
        app.view_today();

        assert_eq!(app.visible_tasks().len(), 2);
        assert_eq!(app.selected_task().unwrap().title, "Early");
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_task().unwrap().title, "Late");
        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        app.toggle_filter();
        assert_eq!(app.filter, TaskFilter::All);
        assert_eq!(app.visible_tasks().len(), 3);
    }

    #[test]
    fn test_delete_selected_adjusts_selection() {
        let (mut app, kv, _) = session("2024-05-15", "08:00");
        app.create_task(new_task("A", "09:00", "10:00")).unwrap();
        app.create_task(new_task("B", "11:00", "12:00")).unwrap();
        app.move_selection_down();

        app.delete_selected();
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(load_tasks(&kv).len(), 1);
    }

    #[test]
    fn test_complete_selected_reports_rejection() {
        let (mut app, _, _) = session("2024-05-15", "08:00");
        app.create_task(new_task("A", "09:00", "10:00")).unwrap();
        app.complete_selected();
        assert_eq!(app.tasks()[0].state, TaskState::Completed);

        app.complete_selected();
        assert_eq!(app.ui_mode, UiMode::Message);
        assert!(app.message.as_deref().unwrap().starts_with("Not allowed"));
        app.dismiss_message();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_add_form_submit() {
        let (mut app, _, _) = session("2024-05-15", "08:00");
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "Yoga".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        for _ in 0.."Study".len() {
            app.input_form_backspace();
        }
        for c in "health".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        app.input_form_next_field();
        for c in "07:00".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        for c in "07:45".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        for c in "45".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        let task = &app.tasks()[0];
        assert_eq!(task.title, "Yoga");
        assert_eq!(task.category, Category::Health);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.estimated_minutes, 45.0);
        assert!(!task.is_critical);
    }

    #[test]
    fn test_add_form_rejection_keeps_form_open() {
        let (mut app, _, _) = session("2024-05-15", "08:00");
        app.start_add_task();
        app.submit_input_form();

        assert!(app.input_form.is_some());
        assert_eq!(app.message.as_deref(), Some("Invalid input: Title is required."));
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn test_edit_form_gated_by_eligibility() {
        let (mut app, _, clock) = session("2024-05-15", "08:00");
        app.create_task(new_task("Focus", "09:00", "10:00")).unwrap();

        app.start_edit_task();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        app.input_form_prev_field();
        for c in "0".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();
        assert_eq!(app.tasks()[0].estimated_minutes, 300.0);

        clock.set("2024-05-15", "09:05");
        app.start_edit_task();
        assert_eq!(app.ui_mode, UiMode::Message);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_minutes(" 25 "), 25.0);
        assert!(parse_minutes("soon").is_nan());
        assert!(parse_flag("Y"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("n"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_toggle_view() {
        let (mut app, _, _) = session("2024-05-15", "08:00");
        app.toggle_view();
        assert_eq!(app.view, View::Yearly);
        assert_eq!(app.yearly.report.year, 2024);
        app.toggle_view();
        assert_eq!(app.view, View::Schedule);
    }
}
