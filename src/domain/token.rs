//! Token metadata and oracle price pair.

use crate::domain::{Address, ScaledAmount, Symbol};
use serde::{Deserialize, Serialize};

/// Which side of the oracle bid/ask spread to use for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSide {
    Min,
    Max,
}

/// Oracle bid/ask price pair, USD-per-unit at the global USD exponent.
///
/// Invariant: `min <= max`. Snapshot resolution drops records that violate
/// it, so a constructed `TokenPrice` always holds the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub min: ScaledAmount,
    pub max: ScaledAmount,
}

impl TokenPrice {
    pub fn new(min: ScaledAmount, max: ScaledAmount) -> Self {
        TokenPrice { min, max }
    }

    /// A spreadless price (`min == max`), used for pool-share tokens.
    pub fn flat(price: ScaledAmount) -> Self {
        TokenPrice {
            min: price.clone(),
            max: price,
        }
    }

    pub fn pick(&self, side: PriceSide) -> &ScaledAmount {
        match side {
            PriceSide::Min => &self.min,
            PriceSide::Max => &self.max,
        }
    }
}

/// A token as resolved from a chain snapshot. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: Symbol,
    pub decimals: u32,
    /// Address of the token this one wraps (e.g., wSOL wraps SOL), when any.
    pub wraps: Option<Address>,
    /// Oracle prices; absent until the oracle feed has loaded.
    pub prices: Option<TokenPrice>,
    /// Wallet balance at the token's decimals, when reported.
    pub balance: Option<ScaledAmount>,
    /// Mint supply at the token's decimals; used to price pool-share tokens.
    pub total_supply: Option<ScaledAmount>,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u32) -> Self {
        Token {
            address: Address::new(address),
            symbol: Symbol::new(symbol),
            decimals,
            wraps: None,
            prices: None,
            balance: None,
            total_supply: None,
        }
    }

    pub fn with_prices(mut self, prices: TokenPrice) -> Self {
        self.prices = Some(prices);
        self
    }

    pub fn with_wraps(mut self, wraps: Address) -> Self {
        self.wraps = Some(wraps);
        self
    }

    pub fn with_total_supply(mut self, total_supply: ScaledAmount) -> Self {
        self.total_supply = Some(total_supply);
        self
    }

    /// Whether two tokens carry the same underlying value (identical, or one
    /// is the wrapped form of the other). Used by liquidation pricing to
    /// pick the token-space branch.
    pub fn is_value_equivalent(&self, other: &Token) -> bool {
        if self.address == other.address {
            return true;
        }
        self.wraps.as_ref() == Some(&other.address)
            || other.wraps.as_ref() == Some(&self.address)
    }
}
