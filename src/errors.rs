//! Unified application error type.
//! All modules (store, core, web, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Reference data (fatal at startup)
    // ---------------------------
    #[error("Reference data error in '{path}': {reason}")]
    ReferenceData { path: String, reason: String },

    // ---------------------------
    // Ledger errors
    // ---------------------------
    #[error("No data available for {0} today.")]
    NoData(String),

    #[error("Invalid index {index} for {operator}.")]
    InvalidIndex { operator: String, index: usize },

    #[error("Invalid operator name: {0:?}")]
    InvalidOperator(String),

    #[error("Form token missing or stale; reload the form and submit again.")]
    FormToken,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
