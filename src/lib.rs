pub mod cli;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Client, Reminder, Schedule, Service};
pub use storage::Storage;
pub use store::{ClientStore, EntityStore, ReminderStore, ScheduleStore, ServiceStore};
pub use utils::Profile;
