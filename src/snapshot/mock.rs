//! Mock snapshot source for testing without a chain connection.

use super::{
    ChainSnapshot, MarketRecord, PositionRecord, SnapshotError, SnapshotSource, TokenRecord,
};
use async_trait::async_trait;

/// Snapshot source that returns predefined records.
#[derive(Debug, Clone, Default)]
pub struct MockSnapshotSource {
    snapshot: ChainSnapshot,
}

impl MockSnapshotSource {
    /// Create a mock source with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: TokenRecord) -> Self {
        self.snapshot.tokens.push(token);
        self
    }

    pub fn with_market(mut self, market: MarketRecord) -> Self {
        self.snapshot.markets.push(market);
        self
    }

    pub fn with_position(mut self, position: PositionRecord) -> Self {
        self.snapshot.positions.push(position);
        self
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<ChainSnapshot, SnapshotError> {
        Ok(self.snapshot.clone())
    }
}
