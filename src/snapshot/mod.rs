//! Input contract: raw chain records, their resolution into the typed
//! domain model, and the collaborator trait that supplies them.
//!
//! Records arrive already decoded from on-chain accounts; all big integers
//! are base-10 strings at documented decimal exponents. Resolution builds an
//! immutable [`ResolvedSnapshot`] that is superseded wholesale on the next
//! refresh. Structurally broken records (unknown token references) are
//! dropped with a warning; a missing or violated oracle price leaves the
//! token unpriced so dependent results stay absent.

use crate::config::EngineConfig;
use crate::domain::scaled::{bigint_str, bigint_str_opt};
use crate::domain::{
    Address, Market, Position, ScaledAmount, Symbol, Token, TokenPrice,
};
use async_trait::async_trait;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub mod mock;

pub use mock::MockSnapshotSource;

/// Raw oracle price pair at the USD exponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(with = "bigint_str")]
    pub min_price: BigInt,
    #[serde(with = "bigint_str")]
    pub max_price: BigInt,
}

/// Raw token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub address: Address,
    pub symbol: Symbol,
    pub decimals: u32,
    #[serde(default)]
    pub prices: Option<PriceRecord>,
    #[serde(default, with = "bigint_str_opt")]
    pub balance: Option<BigInt>,
    #[serde(default, with = "bigint_str_opt")]
    pub total_supply: Option<BigInt>,
    #[serde(default)]
    pub wraps: Option<Address>,
}

/// Raw market record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub market_token_address: Address,
    pub index_token_address: Address,
    pub long_token_address: Address,
    pub short_token_address: Address,
    pub is_single: bool,
    #[serde(default, with = "bigint_str_opt")]
    pub min_collateral_factor: Option<BigInt>,
    #[serde(with = "bigint_str")]
    pub long_pool_amount: BigInt,
    #[serde(with = "bigint_str")]
    pub short_pool_amount: BigInt,
}

/// Raw position record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub owner: Address,
    pub market_token_address: Address,
    pub collateral_token_address: Address,
    pub is_long: bool,
    #[serde(with = "bigint_str")]
    pub size_in_usd: BigInt,
    #[serde(with = "bigint_str")]
    pub size_in_tokens: BigInt,
    #[serde(with = "bigint_str")]
    pub collateral_amount: BigInt,
}

/// One full refresh of chain state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub tokens: Vec<TokenRecord>,
    pub markets: Vec<MarketRecord>,
    pub positions: Vec<PositionRecord>,
}

/// The typed, immutable model built from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSnapshot {
    tokens: HashMap<Address, Token>,
    markets: Vec<Market>,
    positions: Vec<Position>,
}

impl ResolvedSnapshot {
    pub fn token(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Look up a market by its pool-share token address.
    pub fn market(&self, market_token_address: &Address) -> Option<&Market> {
        self.markets
            .iter()
            .find(|m| &m.market_token.address == market_token_address)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl ChainSnapshot {
    /// Build the typed model.
    ///
    /// Tokens with an inverted bid/ask pair keep their metadata but lose the
    /// price. Markets and positions referencing tokens absent from the
    /// snapshot are dropped.
    pub fn resolve(&self, cfg: &EngineConfig) -> ResolvedSnapshot {
        let usd = cfg.usd_decimals;

        let mut tokens: HashMap<Address, Token> = HashMap::new();
        for record in &self.tokens {
            let mut token = Token::new(
                record.address.as_str(),
                record.symbol.as_str(),
                record.decimals,
            );
            token.wraps = record.wraps.clone();
            token.balance = record
                .balance
                .clone()
                .map(|b| ScaledAmount::new(b, record.decimals));
            token.total_supply = record
                .total_supply
                .clone()
                .map(|s| ScaledAmount::new(s, record.decimals));
            if let Some(prices) = &record.prices {
                if prices.min_price <= prices.max_price {
                    token.prices = Some(TokenPrice::new(
                        ScaledAmount::new(prices.min_price.clone(), usd),
                        ScaledAmount::new(prices.max_price.clone(), usd),
                    ));
                } else {
                    warn!(
                        token = %record.address,
                        "inverted oracle pair (min > max), dropping price"
                    );
                }
            }
            tokens.insert(record.address.clone(), token);
        }

        let mut markets = Vec::new();
        for record in &self.markets {
            let resolved = (
                tokens.get(&record.market_token_address),
                tokens.get(&record.index_token_address),
                tokens.get(&record.long_token_address),
                tokens.get(&record.short_token_address),
            );
            let (Some(market_token), Some(index_token), Some(long_token), Some(short_token)) =
                resolved
            else {
                warn!(
                    market = %record.market_token_address,
                    "market references a token missing from the snapshot, skipping"
                );
                continue;
            };
            markets.push(Market {
                market_token: market_token.clone(),
                index_token: index_token.clone(),
                long_token: long_token.clone(),
                short_token: short_token.clone(),
                is_single: record.is_single,
                min_collateral_factor: record
                    .min_collateral_factor
                    .clone()
                    .map(|f| ScaledAmount::new(f, usd)),
                long_pool_amount: ScaledAmount::new(
                    record.long_pool_amount.clone(),
                    long_token.decimals,
                ),
                short_pool_amount: ScaledAmount::new(
                    record.short_pool_amount.clone(),
                    short_token.decimals,
                ),
            });
        }

        let mut positions = Vec::new();
        for record in &self.positions {
            let market = markets
                .iter()
                .find(|m| m.market_token.address == record.market_token_address);
            let collateral_token = tokens.get(&record.collateral_token_address);
            let (Some(market), Some(collateral_token)) = (market, collateral_token) else {
                warn!(
                    owner = %record.owner,
                    market = %record.market_token_address,
                    "position references an unresolved market or token, skipping"
                );
                continue;
            };
            positions.push(Position {
                owner: record.owner.clone(),
                market_token_address: record.market_token_address.clone(),
                collateral_token: collateral_token.clone(),
                is_long: record.is_long,
                size_in_usd: ScaledAmount::new(record.size_in_usd.clone(), usd),
                size_in_tokens: ScaledAmount::new(
                    record.size_in_tokens.clone(),
                    market.index_token.decimals,
                ),
                collateral_amount: ScaledAmount::new(
                    record.collateral_amount.clone(),
                    collateral_token.decimals,
                ),
            });
        }

        ResolvedSnapshot {
            tokens,
            markets,
            positions,
        }
    }
}

/// Error type for snapshot fetching.
#[derive(Debug, Clone, Error)]
pub enum SnapshotError {
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed snapshot payload: {0}")]
    Decode(String),
}

/// The chain-data collaborator: a black box returning raw structured
/// records. Staleness, retry, and backoff are its concern, not the
/// engine's.
#[async_trait]
pub trait SnapshotSource: Send + Sync + fmt::Debug {
    async fn fetch_snapshot(&self) -> Result<ChainSnapshot, SnapshotError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_record(address: &str, decimals: u32, min: i64, max: i64) -> TokenRecord {
        TokenRecord {
            address: Address::new(address),
            symbol: Symbol::new(address),
            decimals,
            prices: Some(PriceRecord {
                min_price: BigInt::from(min),
                max_price: BigInt::from(max),
            }),
            balance: None,
            total_supply: None,
            wraps: None,
        }
    }

    fn market_record(market: &str, index: &str, long: &str, short: &str) -> MarketRecord {
        MarketRecord {
            market_token_address: Address::new(market),
            index_token_address: Address::new(index),
            long_token_address: Address::new(long),
            short_token_address: Address::new(short),
            is_single: long == short,
            min_collateral_factor: None,
            long_pool_amount: BigInt::from(0),
            short_pool_amount: BigInt::from(0),
        }
    }

    #[test]
    fn test_resolve_prices_at_usd_decimals() {
        let cfg = EngineConfig::default();
        let snapshot = ChainSnapshot {
            tokens: vec![token_record("SOL", 9, 99, 101)],
            markets: vec![],
            positions: vec![],
        };
        let resolved = snapshot.resolve(&cfg);
        let token = resolved.token(&Address::new("SOL")).unwrap();
        let prices = token.prices.as_ref().unwrap();
        assert_eq!(prices.min, ScaledAmount::from_raw(99, 20));
        assert_eq!(prices.max.decimals(), 20);
    }

    #[test]
    fn test_resolve_drops_inverted_price_pair() {
        let cfg = EngineConfig::default();
        let snapshot = ChainSnapshot {
            tokens: vec![token_record("SOL", 9, 101, 99)],
            markets: vec![],
            positions: vec![],
        };
        let resolved = snapshot.resolve(&cfg);
        let token = resolved.token(&Address::new("SOL")).unwrap();
        assert!(token.prices.is_none());
    }

    #[test]
    fn test_resolve_skips_market_with_unknown_token() {
        let cfg = EngineConfig::default();
        let snapshot = ChainSnapshot {
            tokens: vec![token_record("SOL", 9, 100, 100)],
            markets: vec![market_record("GM", "SOL", "SOL", "USDC")],
            positions: vec![],
        };
        let resolved = snapshot.resolve(&cfg);
        assert!(resolved.markets().is_empty());
    }

    #[test]
    fn test_resolve_position_inherits_exponents() {
        let cfg = EngineConfig::default();
        let snapshot = ChainSnapshot {
            tokens: vec![
                token_record("GM", 9, 1, 1),
                token_record("SOL", 9, 100, 100),
                token_record("USDC", 6, 1, 1),
            ],
            markets: vec![market_record("GM", "SOL", "SOL", "USDC")],
            positions: vec![PositionRecord {
                owner: Address::new("owner"),
                market_token_address: Address::new("GM"),
                collateral_token_address: Address::new("USDC"),
                is_long: true,
                size_in_usd: BigInt::from(1),
                size_in_tokens: BigInt::from(1),
                collateral_amount: BigInt::from(1),
            }],
        };
        let resolved = snapshot.resolve(&cfg);
        let position = &resolved.positions()[0];
        assert_eq!(position.size_in_usd.decimals(), 20);
        assert_eq!(position.size_in_tokens.decimals(), 9);
        assert_eq!(position.collateral_amount.decimals(), 6);
    }

    #[test]
    fn test_resolve_skips_position_for_unresolved_market() {
        let cfg = EngineConfig::default();
        let snapshot = ChainSnapshot {
            tokens: vec![token_record("USDC", 6, 1, 1)],
            markets: vec![],
            positions: vec![PositionRecord {
                owner: Address::new("owner"),
                market_token_address: Address::new("GM"),
                collateral_token_address: Address::new("USDC"),
                is_long: true,
                size_in_usd: BigInt::from(1),
                size_in_tokens: BigInt::from(1),
                collateral_amount: BigInt::from(1),
            }],
        };
        let resolved = snapshot.resolve(&cfg);
        assert!(resolved.positions().is_empty());
    }

    #[test]
    fn test_record_json_shape() {
        let record = token_record("SOL", 9, 99, 101);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["prices"]["min_price"], "99");
        let back: TokenRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record, back);
    }
}
