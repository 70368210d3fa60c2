//! Deterministic fixed-point valuation engine for leveraged positions and
//! liquidity pools.
//!
//! Raw chain records resolve into an immutable snapshot model; pure
//! functions over that model derive entry price, PnL, net value, leverage,
//! liquidation price, pool value, and pool-share pricing. Every amount is a
//! [`ScaledAmount`] carrying its decimal exponent as data, and every result
//! that cannot be computed yet is absent rather than zero.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod format;
pub mod snapshot;

pub use config::{ConfigError, EngineConfig};
pub use domain::{
    Address, Market, Position, PositionFees, PriceSide, ScaleError, ScaledAmount, Symbol, Token,
    TokenPrice,
};
pub use engine::{evaluate_position, ExposureChange, NoCap, PnlCapPolicy, PositionReport};
pub use error::EngineError;
pub use snapshot::{
    ChainSnapshot, MarketRecord, MockSnapshotSource, PositionRecord, PriceRecord, ResolvedSnapshot,
    SnapshotError, SnapshotSource, TokenRecord,
};
