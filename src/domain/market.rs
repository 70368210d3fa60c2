//! Market: an index token plus a pair of collateral pools.

use crate::domain::{ScaledAmount, Token};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// A two-sided liquidity market as resolved from a chain snapshot.
///
/// Constructed at read time, immutable per snapshot, superseded wholesale on
/// the next refresh. `is_single` marks markets whose long and short
/// collateral are the same token; their total pool balance is recorded under
/// the long leg and split in half per side (see [`Market::pool_token_amount`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub market_token: Token,
    pub index_token: Token,
    pub long_token: Token,
    pub short_token: Token,
    pub is_single: bool,
    /// Minimum collateral as a fraction of position size, at the USD
    /// exponent (1.0 = one USD unit). Absent until the market config loads.
    pub min_collateral_factor: Option<ScaledAmount>,
    /// Raw long-leg pool balance at the long token's decimals. Holds the
    /// total balance when `is_single`.
    pub long_pool_amount: ScaledAmount,
    /// Raw short-leg pool balance at the short token's decimals.
    pub short_pool_amount: ScaledAmount,
}

impl Market {
    /// The collateral token backing the given side.
    pub fn collateral_token(&self, is_long: bool) -> &Token {
        if is_long {
            &self.long_token
        } else {
            &self.short_token
        }
    }

    /// Pool token amount for one side.
    ///
    /// Single-collateral markets record the total under the long leg; each
    /// side is exactly half of it (integer division), so the two legs always
    /// mirror each other.
    pub fn pool_token_amount(&self, is_long: bool) -> ScaledAmount {
        if self.is_single {
            return ScaledAmount::new(
                self.long_pool_amount.value() / BigInt::from(2),
                self.long_pool_amount.decimals(),
            );
        }
        if is_long {
            self.long_pool_amount.clone()
        } else {
            self.short_pool_amount.clone()
        }
    }
}
