//! Task/history reconciliation: one continuously-editable task list
//! multiplexed over many days of durable history.
//!
//! The store is the single source of truth. Every mutation funnels
//! through [`HistoryStore::set_tasks`], which updates memory and
//! rewrites the persisted record before returning, so the two can
//! never diverge.

use crate::domain::{partition, progress_percent, Task};
use crate::gateway::ScheduledItem;
use crate::persistence::{load_history, save_history, DayTasks};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

/// Canonical day key for a calendar date ("YYYY-MM-DD")
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Day key for today, local time
pub fn today_key() -> String {
    day_key(chrono::Local::now().date_naive())
}

/// Durable per-day task history plus the active-day projection
pub struct HistoryStore {
    days: DayTasks,
    active_day: String,
    path: PathBuf,
}

impl HistoryStore {
    /// Load the record once from disk and open on the given day.
    /// Absent or unreadable history starts empty, never fails.
    pub fn open(path: PathBuf, active_day: String) -> Self {
        let days = load_history(&path);
        Self {
            days,
            active_day,
            path,
        }
    }

    pub fn active_day(&self) -> &str {
        &self.active_day
    }

    /// The active day's stored sequence (empty if the day has no entry)
    pub fn tasks(&self) -> &[Task] {
        self.days
            .get(&self.active_day)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pending tasks (order-significant), computed on read
    pub fn pending(&self) -> Vec<&Task> {
        partition(self.tasks()).0
    }

    /// Completed tasks in their stored relative order, computed on read
    pub fn completed(&self) -> Vec<&Task> {
        partition(self.tasks()).1
    }

    /// Days that have a recorded entry, with their task counts
    pub fn recorded_days(&self) -> Vec<(&str, usize)> {
        self.days
            .iter()
            .map(|(key, tasks)| (key.as_str(), tasks.len()))
            .collect()
    }

    /// Progress through the active day as a percentage
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.tasks())
    }

    /// Switch the active day. Viewing a day never creates or mutates
    /// its entry; an unrecorded day simply reads as empty.
    pub fn select_day(&mut self, day_key: &str) {
        self.active_day = day_key.to_string();
    }

    /// The single mutation entry point: replace a day's whole sequence
    /// in memory and on disk. After this returns, both agree.
    pub fn set_tasks(&mut self, day_key: &str, tasks: Vec<Task>) -> Result<()> {
        self.days.insert(day_key.to_string(), tasks);
        save_history(&self.path, &self.days)
    }

    fn set_active_tasks(&mut self, tasks: Vec<Task>) -> Result<()> {
        let day = self.active_day.clone();
        self.set_tasks(&day, tasks)
    }

    /// Append a task to the end of the active day's pending region.
    /// A duplicate id is a no-op.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        let mut tasks = self.tasks().to_vec();
        if tasks.iter().any(|t| t.id == task.id) {
            return Ok(());
        }

        let insert_at = tasks
            .iter()
            .rposition(|t| t.status.is_open())
            .map(|i| i + 1)
            .unwrap_or(0);
        tasks.insert(insert_at, task);
        self.set_active_tasks(tasks)
    }

    /// Remove by id from the active day; no-op if absent
    pub fn remove_task(&mut self, id: Uuid) -> Result<()> {
        let mut tasks = self.tasks().to_vec();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(());
        }
        self.set_active_tasks(tasks)
    }

    /// Reinsert the pending task at `from` so it lands at `to`; the
    /// primitive behind both keyboard reordering and drag-style moves.
    /// Out-of-range indices are no-ops. Completed tasks are untouched
    /// and persist after all pending tasks.
    pub fn move_pending(&mut self, from: usize, to: usize) -> Result<()> {
        let (pending, completed) = partition(self.tasks());
        if from >= pending.len() || to >= pending.len() {
            return Ok(());
        }

        let mut new_pending: Vec<Task> = pending.into_iter().cloned().collect();
        let completed: Vec<Task> = completed.into_iter().cloned().collect();

        let task = new_pending.remove(from);
        new_pending.insert(to, task);

        let mut tasks = new_pending;
        tasks.extend(completed);
        self.set_active_tasks(tasks)
    }

    /// Replace the ordering of the pending region wholesale. Applied
    /// only when the new sequence is a permutation of the current
    /// pending tasks; anything else is a no-op by construction.
    pub fn reorder_pending(&mut self, new_pending: Vec<Task>) -> Result<()> {
        let (pending, completed) = partition(self.tasks());

        let mut current_ids: Vec<Uuid> = pending.iter().map(|t| t.id).collect();
        let mut new_ids: Vec<Uuid> = new_pending.iter().map(|t| t.id).collect();
        current_ids.sort();
        new_ids.sort();
        if current_ids != new_ids {
            return Ok(());
        }

        let completed: Vec<Task> = completed.into_iter().cloned().collect();
        let mut tasks = new_pending;
        tasks.extend(completed);
        self.set_active_tasks(tasks)
    }

    /// Complete a task with the timer's measured duration.
    /// Silent no-op unless the task exists and is still open.
    pub fn mark_completed(&mut self, id: Uuid, duration_seconds: u32) -> Result<()> {
        let mut tasks = self.tasks().to_vec();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        if !task.status.is_open() {
            return Ok(());
        }

        task.mark_completed(duration_seconds);
        self.set_active_tasks(tasks)
    }

    /// Install a freshly generated schedule for the active day. The
    /// previous sequence is discarded and every task gets a new id;
    /// identity is deliberately not preserved across regeneration.
    pub fn replace_with_schedule(&mut self, items: Vec<ScheduledItem>) -> Result<()> {
        let tasks: Vec<Task> = items
            .into_iter()
            .map(|item| {
                let mut task = Task::new(
                    item.title,
                    item.subject,
                    item.estimated_minutes,
                    item.emoji,
                );
                task.is_break = item.is_break;
                task
            })
            .collect();
        self.set_active_tasks(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn task(title: &str, minutes: u32) -> Task {
        Task::new(title.to_string(), "Math".to_string(), minutes, "🔢".to_string())
    }

    fn store(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::open(dir.path().join("history.json"), "2024-03-07".to_string())
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_day_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(day_key(date), "2024-03-07");
    }

    #[test]
    fn test_set_tasks_memory_matches_disk() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store
            .set_tasks("2024-03-07", vec![task("Fractions", 30)])
            .unwrap();
        assert_eq!(store.tasks().len(), 1);

        // A fresh load from the same file sees the same sequence
        let reloaded = HistoryStore::open(
            dir.path().join("history.json"),
            "2024-03-07".to_string(),
        );
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.tasks()[0].title, "Fractions");
    }

    #[test]
    fn test_select_day_does_not_create_entries() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.select_day("2024-03-08");
        assert!(store.tasks().is_empty());
        assert!(store.recorded_days().is_empty());
    }

    #[test]
    fn test_history_isolation_between_days() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("Day one task", 30)).unwrap();

        store.select_day("2024-03-08");
        store.add_task(task("Day two task", 15)).unwrap();

        store.select_day("2024-03-07");
        assert_eq!(titles(&store.pending()), vec!["Day one task"]);

        store.select_day("2024-03-08");
        assert_eq!(titles(&store.pending()), vec!["Day two task"]);
    }

    #[test]
    fn test_day_switch_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.select_day("2024-03-08");
        store.add_task(task("Added on D2", 20)).unwrap();

        store.select_day("2024-03-07");
        store.select_day("2024-03-08");

        let pending = store.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Added on D2");
    }

    #[test]
    fn test_add_task_appends_to_pending_region() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let mut done = task("Already done", 10);
        done.mark_completed(500);
        store
            .set_tasks("2024-03-07", vec![task("First", 30), done])
            .unwrap();

        store.add_task(task("Second", 15)).unwrap();

        // New task lands after the open tasks, before the completed ones
        let stored: Vec<String> = store.tasks().iter().map(|t| t.title.clone()).collect();
        assert_eq!(stored, vec!["First", "Second", "Already done"]);
    }

    #[test]
    fn test_add_duplicate_id_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let original = task("Once", 30);
        store.add_task(original.clone()).unwrap();
        store.add_task(original).unwrap();

        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_remove_task_absent_id_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("Keep me", 30)).unwrap();
        store.remove_task(Uuid::new_v4()).unwrap();

        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_remove_task_by_id() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let doomed = task("Remove me", 30);
        let doomed_id = doomed.id;
        store.add_task(doomed).unwrap();
        store.add_task(task("Keep me", 15)).unwrap();

        store.remove_task(doomed_id).unwrap();
        assert_eq!(titles(&store.pending()), vec!["Keep me"]);
    }

    #[test]
    fn test_move_pending_reinserts_at_index() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("A", 10)).unwrap();
        store.add_task(task("B", 10)).unwrap();
        store.add_task(task("C", 10)).unwrap();

        store.move_pending(0, 2).unwrap();
        assert_eq!(titles(&store.pending()), vec!["B", "C", "A"]);

        // Adjacent swap through the same primitive
        store.move_pending(1, 0).unwrap();
        assert_eq!(titles(&store.pending()), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_move_pending_out_of_range_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("A", 10)).unwrap();
        store.add_task(task("B", 10)).unwrap();

        store.move_pending(0, 5).unwrap();
        store.move_pending(7, 0).unwrap();
        assert_eq!(titles(&store.pending()), vec!["A", "B"]);
    }

    #[test]
    fn test_move_pending_leaves_completed_alone() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let mut done_early = task("Done early", 10);
        done_early.mark_completed(300);
        let mut done_late = task("Done late", 10);
        done_late.mark_completed(400);

        store
            .set_tasks(
                "2024-03-07",
                vec![task("A", 10), done_early, task("B", 10), done_late],
            )
            .unwrap();

        store.move_pending(0, 1).unwrap();

        assert_eq!(titles(&store.pending()), vec!["B", "A"]);
        // Completed keep their relative order, appended after pending
        let stored: Vec<String> = store.tasks().iter().map(|t| t.title.clone()).collect();
        assert_eq!(stored, vec!["B", "A", "Done early", "Done late"]);
    }

    #[test]
    fn test_reorder_pending_permutation() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("A", 10)).unwrap();
        store.add_task(task("B", 10)).unwrap();
        store.add_task(task("C", 10)).unwrap();

        let mut reversed: Vec<Task> = store.pending().into_iter().cloned().collect();
        reversed.reverse();
        let expected_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = store.pending().iter().map(|t| t.id).collect();
            ids.sort();
            ids
        };

        store.reorder_pending(reversed).unwrap();

        assert_eq!(titles(&store.pending()), vec!["C", "B", "A"]);
        let mut ids_after: Vec<Uuid> = store.pending().iter().map(|t| t.id).collect();
        ids_after.sort();
        assert_eq!(ids_after, expected_ids);
    }

    #[test]
    fn test_reorder_pending_rejects_non_permutation() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("A", 10)).unwrap();
        store.add_task(task("B", 10)).unwrap();

        // Dropping a task is not a reorder
        let partial: Vec<Task> = store.pending().into_iter().take(1).cloned().collect();
        store.reorder_pending(partial).unwrap();
        assert_eq!(store.pending().len(), 2);

        // Neither is smuggling in a new one
        let mut with_extra: Vec<Task> = store.pending().into_iter().cloned().collect();
        with_extra.push(task("Imposter", 5));
        store.reorder_pending(with_extra).unwrap();
        assert_eq!(store.pending().len(), 2);
    }

    #[test]
    fn test_mark_completed_sets_duration() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let t = task("Fractions", 30);
        let id = t.id;
        store.add_task(t).unwrap();

        store.mark_completed(id, 95).unwrap();

        let completed = store.completed();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, TaskStatus::Completed);
        assert_eq!(completed[0].actual_duration_seconds, Some(95));
    }

    #[test]
    fn test_mark_completed_twice_keeps_first_duration() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let t = task("Fractions", 30);
        let id = t.id;
        store.add_task(t).unwrap();

        store.mark_completed(id, 95).unwrap();
        store.mark_completed(id, 1000).unwrap();

        assert_eq!(store.completed()[0].actual_duration_seconds, Some(95));
    }

    #[test]
    fn test_mark_completed_unknown_id_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("A", 10)).unwrap();
        store.mark_completed(Uuid::new_v4(), 60).unwrap();

        assert!(store.completed().is_empty());
    }

    #[test]
    fn test_replace_with_schedule_regenerates_ids() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        let original = task("Fractions", 30);
        let original_id = original.id;
        store.add_task(original).unwrap();

        let items = vec![
            ScheduledItem {
                title: "Fractions".to_string(),
                subject: "Math".to_string(),
                estimated_minutes: 30,
                is_break: false,
                emoji: "🔢".to_string(),
                reasoning: None,
            },
            ScheduledItem {
                title: "Wiggle break".to_string(),
                subject: "Break".to_string(),
                estimated_minutes: 5,
                is_break: true,
                emoji: "🤸".to_string(),
                reasoning: Some("recharge".to_string()),
            },
        ];
        store.replace_with_schedule(items).unwrap();

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.id != original_id));
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
        assert!(tasks[1].is_break);
    }

    #[test]
    fn test_replace_only_touches_active_day() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("Other day task", 30)).unwrap();
        store.select_day("2024-03-08");
        store.add_task(task("To be replaced", 30)).unwrap();

        store
            .replace_with_schedule(vec![ScheduledItem {
                title: "New plan".to_string(),
                subject: "Math".to_string(),
                estimated_minutes: 30,
                is_break: false,
                emoji: "🔢".to_string(),
                reasoning: None,
            }])
            .unwrap();

        store.select_day("2024-03-07");
        assert_eq!(titles(&store.pending()), vec!["Other day task"]);
    }

    #[test]
    fn test_progress_percent_for_active_day() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);
        assert_eq!(store.progress_percent(), 0.0);

        let first = task("First", 30);
        let first_id = first.id;
        store.add_task(first).unwrap();
        store.add_task(task("Second", 30)).unwrap();
        store.mark_completed(first_id, 45).unwrap();

        let percent = store.progress_percent();
        assert!((percent - 2.439).abs() < 0.01, "got {}", percent);
    }

    #[test]
    fn test_recorded_days_with_counts() {
        let dir = tempdir().unwrap();
        let mut store = store(&dir);

        store.add_task(task("A", 10)).unwrap();
        store.select_day("2024-03-09");
        store.add_task(task("B", 10)).unwrap();
        store.add_task(task("C", 10)).unwrap();

        let days = store.recorded_days();
        assert_eq!(days, vec![("2024-03-07", 1), ("2024-03-09", 2)]);
    }
}
