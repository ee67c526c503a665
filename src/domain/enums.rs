use serde::{Deserialize, Serialize};

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Active,
    Completed,
    /// Reserved for a future "skip for today" flow; never produced currently
    Skipped,
}

impl TaskStatus {
    /// Check if the task still belongs to the pending region (not yet completed)
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }

    /// Display badge text
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Completed => "DONE",
            Self::Skipped => "SKIPPED",
        }
    }
}

/// Which screen the app is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Planner,
    Timer,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    /// Blocking overlay while a schedule request is in flight
    Generating,
    /// Short motivational message modal
    Message,
}

/// Subject presets offered in the add-task form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectPreset {
    Math,
    Reading,
    Science,
    Writing,
    Custom,
}

impl SubjectPreset {
    /// Display name for this preset
    pub fn name(&self) -> &'static str {
        match self {
            SubjectPreset::Math => "Math",
            SubjectPreset::Reading => "Reading",
            SubjectPreset::Science => "Science",
            SubjectPreset::Writing => "Writing",
            SubjectPreset::Custom => "Custom",
        }
    }

    /// Default emoji for tasks created under this preset
    pub fn emoji(&self) -> &'static str {
        match self {
            SubjectPreset::Math => "🔢",
            SubjectPreset::Reading => "📖",
            SubjectPreset::Science => "🔬",
            SubjectPreset::Writing => "✏️",
            SubjectPreset::Custom => "📘",
        }
    }

    /// Get all presets as a list (form cycling order)
    pub fn all() -> &'static [SubjectPreset] {
        &[
            SubjectPreset::Math,
            SubjectPreset::Reading,
            SubjectPreset::Science,
            SubjectPreset::Writing,
            SubjectPreset::Custom,
        ]
    }
}
