use crate::domain::Task;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// The whole durable record: day key ("YYYY-MM-DD") to that day's tasks
pub type DayTasks = BTreeMap<String, Vec<Task>>;

/// Load the history record from disk.
/// A missing or unparseable file yields an empty mapping; startup never fails on bad history.
pub fn load_history<P: AsRef<Path>>(path: P) -> DayTasks {
    let path = path.as_ref();

    if !path.exists() {
        return DayTasks::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return DayTasks::new(),
    };

    serde_json::from_str(&content).unwrap_or_default()
}

/// Save the whole history record to disk (full rewrite, atomic)
pub fn save_history<P: AsRef<Path>>(path: P, history: &DayTasks) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
