//! Per-position result record: the engine's output contract.

use crate::config::EngineConfig;
use crate::domain::scaled::bigint_str_opt;
use crate::domain::{Market, Position, PositionFees, ScaledAmount};
use crate::engine::convert::{convert_to_token_amount, convert_to_usd, get_basis_points};
use crate::engine::position::{
    get_entry_price, get_leverage, get_liquidation_price, get_mark_price, get_position_net_value,
    get_position_pending_fees_usd, get_position_pnl_usd, get_remaining_collateral_usd,
};
use crate::engine::{ExposureChange, PnlCapPolicy};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Derived metrics for one position snapshot.
///
/// Every field is absent when not yet computable — a missing oracle price,
/// a zero denominator, or an out-of-domain value never becomes a sentinel
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    pub entry_price: Option<ScaledAmount>,
    pub mark_price: Option<ScaledAmount>,
    pub collateral_usd: Option<ScaledAmount>,
    pub remaining_collateral_usd: Option<ScaledAmount>,
    pub remaining_collateral_amount: Option<ScaledAmount>,
    pub net_value: Option<ScaledAmount>,
    pub pnl: Option<ScaledAmount>,
    /// PnL as basis points of collateral value.
    #[serde(default, with = "bigint_str_opt")]
    pub pnl_bps: Option<BigInt>,
    /// Leverage in basis points of notional per collateral dollar.
    #[serde(default, with = "bigint_str_opt")]
    pub leverage_bps: Option<BigInt>,
    pub liquidation_price: Option<ScaledAmount>,
}

/// Derive all risk metrics for one position against its market context.
///
/// A closed position (`size_in_usd == 0`) yields the empty report. Valuing
/// an existing position is the decrease direction, so the index mark price
/// is the min side for longs and the max side for shorts; collateral is
/// valued at its min price.
pub fn evaluate_position(
    cfg: &EngineConfig,
    position: &Position,
    market: &Market,
    fees: &PositionFees,
    policy: &dyn PnlCapPolicy,
) -> PositionReport {
    if position.is_empty() {
        return PositionReport::default();
    }

    let mark_price = market
        .index_token
        .prices
        .as_ref()
        .map(|p| get_mark_price(p, ExposureChange::Decrease, position.is_long).clone());

    let collateral_prices = position.collateral_token.prices.as_ref();
    let collateral_usd =
        collateral_prices.map(|p| convert_to_usd(&position.collateral_amount, &p.min));

    let entry_price = get_entry_price(position);
    let pending_fees = get_position_pending_fees_usd(fees);
    let pnl = mark_price
        .as_ref()
        .and_then(|mp| get_position_pnl_usd(position, mp, policy));

    let pnl_bps = match (&pnl, &collateral_usd) {
        (Some(pnl), Some(collateral)) => get_basis_points(pnl, collateral, cfg.bps_divisor, false),
        _ => None,
    };
    let net_value = match (&collateral_usd, &pnl) {
        (Some(collateral), Some(pnl)) => get_position_net_value(collateral, fees, pnl),
        _ => None,
    };
    let leverage_bps = match (&collateral_usd, &pnl, &pending_fees) {
        (Some(collateral), Some(pnl), Some(pending)) => {
            get_leverage(cfg, &position.size_in_usd, collateral, pnl, pending)
        }
        _ => None,
    };
    let remaining_collateral_usd = match (&collateral_usd, &pnl, &pending_fees) {
        (Some(collateral), Some(pnl), Some(pending)) => {
            get_remaining_collateral_usd(collateral, pnl, pending)
        }
        _ => None,
    };
    let remaining_collateral_amount = match (&remaining_collateral_usd, collateral_prices) {
        (Some(remaining), Some(prices)) => convert_to_token_amount(
            remaining,
            position.collateral_token.decimals,
            &prices.min,
        ),
        _ => None,
    };
    let liquidation_price =
        get_liquidation_price(cfg, position, market, collateral_usd.as_ref(), fees);

    debug!(
        owner = %position.owner,
        market = %market.market_token.address,
        is_long = position.is_long,
        "evaluated position"
    );

    PositionReport {
        entry_price,
        mark_price,
        collateral_usd,
        remaining_collateral_usd,
        remaining_collateral_amount,
        net_value,
        pnl,
        pnl_bps,
        leverage_bps,
        liquidation_price,
    }
}
