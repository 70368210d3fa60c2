//! Leveraged position snapshot and its externally supplied fee components.

use crate::domain::{Address, ScaledAmount, Token};
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of one leveraged position.
///
/// `size_in_usd` and `size_in_tokens` are two representations of the same
/// notional exposure, fixed by the on-chain program at open/increase time.
/// The engine only reads them and derives metrics; it never mutates
/// position state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub owner: Address,
    pub market_token_address: Address,
    pub collateral_token: Token,
    pub is_long: bool,
    /// Notional size at the USD exponent.
    pub size_in_usd: ScaledAmount,
    /// Notional size at the index token's decimals.
    pub size_in_tokens: ScaledAmount,
    /// Posted collateral at the collateral token's decimals.
    pub collateral_amount: ScaledAmount,
}

impl Position {
    /// A position with zero notional is closed/empty and excluded from
    /// PnL/leverage/liquidation computation.
    pub fn is_empty(&self) -> bool {
        !self.size_in_usd.is_positive()
    }
}

/// Pending and closing fee components, all at the USD exponent.
///
/// Supplied by the external collaborator; the engine sums them and never
/// runs an accrual model. Defaults to zero when the collaborator has
/// nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFees {
    pub pending_funding_usd: ScaledAmount,
    pub pending_borrowing_usd: ScaledAmount,
    pub closing_fee_usd: ScaledAmount,
    pub ui_fee_usd: ScaledAmount,
}

impl PositionFees {
    pub fn zero(usd_decimals: u32) -> Self {
        PositionFees {
            pending_funding_usd: ScaledAmount::zero(usd_decimals),
            pending_borrowing_usd: ScaledAmount::zero(usd_decimals),
            closing_fee_usd: ScaledAmount::zero(usd_decimals),
            ui_fee_usd: ScaledAmount::zero(usd_decimals),
        }
    }
}
