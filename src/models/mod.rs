pub mod config;
pub mod error;

pub use config::{AppConfig, ConfigManager};
pub use error::CommandError;

pub type Result<T> = std::result::Result<T, CommandError>;
