pub mod files;
pub mod history;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, history_file, init_local_dir, read_file};
pub use history::{load_history, save_history, DayTasks};
