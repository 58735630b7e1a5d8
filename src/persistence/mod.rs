pub mod files;
pub mod kv;
pub mod records;
pub mod settings;

pub use files::{
    atomic_write, ensure_data_dir, get_data_dir, init_local_data_dir, log_file, read_file,
    report_file, settings_file,
};
pub use kv::{FileKvStore, KeyValueStore};
pub use records::{load_streak, load_tasks, save_streak, save_tasks};
pub use settings::{load_settings, save_settings, Settings};
