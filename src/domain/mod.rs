pub mod enums;
pub mod task;

pub use enums::{Screen, SubjectPreset, TaskStatus, UiMode};
pub use task::{format_minutes, partition, progress_percent, Task, DEFAULT_EMOJI};
