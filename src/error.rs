use crate::config::ConfigError;
use crate::domain::ScaleError;
use crate::snapshot::SnapshotError;
use thiserror::Error;

/// Top-level error for callers composing the config, snapshot, and
/// arithmetic layers. The valuation core itself never produces one of
/// these: inside the engine every failure degrades to an absent result.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Arithmetic contract violation: {0}")]
    Scale(#[from] ScaleError),
}
