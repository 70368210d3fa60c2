//! Pure computation engine for position and pool valuation.
//!
//! Every function here is synchronous and side-effect free over immutable
//! snapshot domain types. Missing inputs, degenerate denominators, and
//! out-of-domain results all degrade to `None`; there are no fatal errors
//! inside the engine.

use crate::domain::{Position, ScaledAmount};

pub mod convert;
pub mod pool;
pub mod position;
pub mod report;

pub use report::{evaluate_position, PositionReport};

/// Direction of the exposure change a price side is being chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureChange {
    Increase,
    Decrease,
}

/// Policy hook for capping position PnL against pool-level limits.
///
/// The engine itself applies no cap; implementations holding pool context
/// can be threaded in to re-enable capping without touching the core
/// formulas.
pub trait PnlCapPolicy {
    fn cap_pnl(&self, pnl: ScaledAmount, position: &Position) -> ScaledAmount;
}

/// The default policy: PnL passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCap;

impl PnlCapPolicy for NoCap {
    fn cap_pnl(&self, pnl: ScaledAmount, _position: &Position) -> ScaledAmount {
        pnl
    }
}
