//! Application service layer - lookup pipeline, config, report export

pub mod config;
pub mod lookup;
pub mod report;
pub mod task;

pub use config::Config;
pub use lookup::LookupService;
pub use task::{SearchTask, TaskOutcome, TaskPoll, TaskSlot};
