//! # passify-pdf-api
//!
//! Browser form for password-protecting PDF files with passify-pdf
//!

mod api;
pub mod config;
pub mod form;

pub use api::{
    app, app_with_config, encrypt_handler, form_page, health_check, AppError, STAGING_PREFIX,
};
pub use config::{ApiConfig, ConfigError};
pub use form::{download_name, DEFAULT_OUTPUT_NAME};
