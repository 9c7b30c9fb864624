pub mod clients;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::GeminiConfig;
pub use error::{AppError, Result};
