/// Database configuration and connection management
pub mod database;

/// Application settings and seed data loading from config.toml
pub mod app;

pub use app::{AppConfig, load_app_config};
