//! Error types for Foreman.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForemanError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Invalid specialist name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForemanError>;
