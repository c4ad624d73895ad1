pub mod clock;
pub mod config;
pub mod countdown;
pub mod log;
pub mod page;
pub mod scheduler;
pub mod settings;
pub mod submission;
