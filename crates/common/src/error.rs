//! Error types shared across Crowdsight crates.

use std::path::PathBuf;

/// Top-level error type for Crowdsight operations.
#[derive(Debug, thiserror::Error)]
pub enum CrowdsightError {
    #[error("Perception error: {message}")]
    Perception { message: String },

    #[error("Fusion error: {message}")]
    Fusion { message: String },

    #[error("Report error: {message}")]
    Report { message: String },

    #[error("Video source error: {message}")]
    Video { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CrowdsightError.
pub type CrowdsightResult<T> = Result<T, CrowdsightError>;

impl CrowdsightError {
    pub fn perception(msg: impl Into<String>) -> Self {
        Self::Perception {
            message: msg.into(),
        }
    }

    pub fn fusion(msg: impl Into<String>) -> Self {
        Self::Fusion {
            message: msg.into(),
        }
    }

    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report {
            message: msg.into(),
        }
    }

    pub fn video(msg: impl Into<String>) -> Self {
        Self::Video {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
