//! Error types for property operations

use serde::Serialize;
use thiserror::Error;

/// Coarse classification used by callers to map errors onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Store,
}

/// Every failure the engine, store and ingestion layers can report.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "error")]
pub enum PropertyError {
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Property not found: {property_id}")]
    NotFound { property_id: i64 },

    #[error("Property {property_id} already exists")]
    Conflict { property_id: i64 },

    #[error("Outlier factor must be a non-negative number, got {factor}")]
    InvalidFactor { factor: f64 },

    #[error("Store failure: {reason}")]
    Store { reason: String },
}

impl PropertyError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidFactor { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Store { .. } => ErrorKind::Store,
        }
    }
}

pub type Result<T> = std::result::Result<T, PropertyError>;
