use super::enums::TaskStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback glyph used when a task has no emoji of its own
pub const DEFAULT_EMOJI: &str = "📘";

/// A single schedulable unit of work or rest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID within a day's task list
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Subject label (preset name or free-form custom text)
    pub subject: String,
    /// Planned duration in minutes
    pub estimated_minutes: u32,
    /// Whether this is a rest interval rather than a work item
    #[serde(default)]
    pub is_break: bool,
    /// Display glyph
    pub emoji: String,
    /// Current status
    pub status: TaskStatus,
    /// Measured duration, set exactly once when the task completes
    #[serde(default)]
    pub actual_duration_seconds: Option<u32>,
}

impl Task {
    pub fn new(title: String, subject: String, estimated_minutes: u32, emoji: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            subject,
            estimated_minutes,
            is_break: false,
            emoji,
            status: TaskStatus::Pending,
            actual_duration_seconds: None,
        }
    }

    /// Transition to Completed and record the measured duration.
    /// No-op unless the task is currently pending or active.
    pub fn mark_completed(&mut self, duration_seconds: u32) {
        if self.status.is_open() {
            self.status = TaskStatus::Completed;
            self.actual_duration_seconds = Some(duration_seconds);
        }
    }

    /// Minutes this task contributes to progress totals.
    /// Completed tasks count their measured time when available.
    pub fn effective_minutes(&self) -> f64 {
        if self.status == TaskStatus::Completed {
            if let Some(secs) = self.actual_duration_seconds {
                return f64::from(secs) / 60.0;
            }
        }
        f64::from(self.estimated_minutes)
    }

    /// Format the estimate as "Xh Ym" (omits 0 values)
    pub fn estimate_formatted(&self) -> String {
        format_minutes(self.estimated_minutes)
    }
}

/// Format a minute count as "Xh Ym" (e.g. "1h 30m", "45m", "2h")
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// Split a day's tasks into (pending, completed) by status.
/// Computed on every read; a task is always in exactly one partition.
pub fn partition(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    let mut pending = Vec::new();
    let mut completed = Vec::new();

    for task in tasks {
        if task.status.is_open() {
            pending.push(task);
        } else {
            completed.push(task);
        }
    }

    (pending, completed)
}

/// Progress through the day as a percentage of effective minutes.
/// Defined as 0 for an empty task list.
pub fn progress_percent(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }

    let total: f64 = tasks.iter().map(Task::effective_minutes).sum();
    if total == 0.0 {
        return 0.0;
    }

    let done: f64 = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .map(|t| t.effective_minutes())
        .sum();

    done / total * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(title: &str, minutes: u32) -> Task {
        Task::new(title.to_string(), "Math".to_string(), minutes, "🔢".to_string())
    }

    #[test]
    fn test_new_task_is_pending() {
        let t = task("Fractions worksheet", 30);
        assert_eq!(t.status, TaskStatus::Pending);
        assert!(!t.is_break);
        assert!(t.actual_duration_seconds.is_none());
    }

    #[test]
    fn test_mark_completed_records_duration_once() {
        let mut t = task("Fractions worksheet", 30);
        t.mark_completed(45);
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.actual_duration_seconds, Some(45));

        // No transition out of Completed, and the duration never changes
        t.mark_completed(999);
        assert_eq!(t.actual_duration_seconds, Some(45));
    }

    #[test]
    fn test_mark_completed_from_active() {
        let mut t = task("Spelling", 15);
        t.status = TaskStatus::Active;
        t.mark_completed(120);
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.actual_duration_seconds, Some(120));
    }

    #[test]
    fn test_effective_minutes_prefers_measured_time() {
        let mut t = task("Reading log", 30);
        assert_eq!(t.effective_minutes(), 30.0);

        t.mark_completed(45);
        assert_eq!(t.effective_minutes(), 0.75);
    }

    #[test]
    fn test_partition_covers_every_task_once() {
        let mut done = task("Done", 20);
        done.mark_completed(600);
        let tasks = vec![task("A", 10), done, task("B", 15)];

        let (pending, completed) = partition(&tasks);
        assert_eq!(pending.len(), 2);
        assert_eq!(completed.len(), 1);

        let mut ids: Vec<_> = pending.iter().chain(completed.iter()).map(|t| t.id).collect();
        ids.sort();
        let mut expected: Vec<_> = tasks.iter().map(|t| t.id).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_partition_treats_active_as_pending() {
        let mut t = task("Being timed", 30);
        t.status = TaskStatus::Active;
        let tasks = vec![t];

        let (pending, completed) = partition(&tasks);
        assert_eq!(pending.len(), 1);
        assert!(completed.is_empty());
    }

    #[test]
    fn test_progress_with_measured_time() {
        // Estimates [30, 30], first completed in 45 seconds:
        // 0.75 / (0.75 + 30) * 100 ≈ 2.44
        let mut first = task("First", 30);
        first.mark_completed(45);
        let tasks = vec![first, task("Second", 30)];

        let percent = progress_percent(&tasks);
        assert!((percent - 2.439).abs() < 0.01, "got {}", percent);
    }

    #[test]
    fn test_progress_empty_list_is_zero() {
        assert_eq!(progress_percent(&[]), 0.0);
    }

    #[test]
    fn test_progress_all_completed() {
        let mut a = task("A", 30);
        a.mark_completed(1800);
        let mut b = task("B", 30);
        b.mark_completed(1800);

        let percent = progress_percent(&[a, b]);
        assert!((percent - 100.0).abs() < f64::EPSILON, "got {}", percent);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(90), "1h 30m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(0), "0m");
    }
}
