pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod settings;
pub mod show;
pub mod submit;
