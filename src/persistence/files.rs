use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the homeroom directory - checks for local .homeroom first, then falls back to global ~/.homeroom
pub fn get_data_dir() -> Result<PathBuf> {
    // Check for local .homeroom directory
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let local_dir = find_local_dir(&current_dir);

    if let Some(local) = local_dir {
        return Ok(local);
    }

    // Fall back to global ~/.homeroom
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".homeroom"))
}

/// Find local .homeroom directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(".homeroom");
        if data_dir.exists() && data_dir.is_dir() {
            return Some(data_dir);
        }

        // Move up to parent directory
        current = current.parent()?;
    }
}

/// Ensure the homeroom directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .homeroom directory in the current directory
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let data_dir = current_dir.join(".homeroom");

    if data_dir.exists() {
        anyhow::bail!("Homeroom directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Get path to history.json (the whole per-day task record)
pub fn history_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("history.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    // Write content
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    // Sync to disk
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
