pub mod api;
pub mod config;
pub mod database;
pub mod dependencies;
pub mod file_store;
pub mod owner;
pub mod util;
