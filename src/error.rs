use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RadarError>;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("invalid configuration: {field} = {value} (expected {expected})")]
    InvalidConfig {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("unknown speed unit: {0:?}")]
    UnknownUnit(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid font data: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
}
