pub mod app;
pub mod config;
pub mod error;

pub use crate::app::{build_app, AppState};
pub use crate::config::Config;
pub use crate::error::AppError;
