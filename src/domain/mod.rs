//! Domain types for the valuation engine.
//!
//! This module provides:
//! - The `ScaledAmount` fixed-point value type with explicit decimal exponents
//! - Domain primitives: Address, Symbol
//! - Token/price, market, and position snapshot models

pub mod market;
pub mod position;
pub mod primitives;
pub mod scaled;
pub mod token;

pub use market::Market;
pub use position::{Position, PositionFees};
pub use primitives::{Address, Symbol};
pub use scaled::{pow10, ScaleError, ScaledAmount};
pub use token::{PriceSide, Token, TokenPrice};
