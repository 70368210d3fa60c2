//! Aggregate valuation of a market's collateral pools and pricing of its
//! pool-share (GM) token.

use crate::domain::{pow10, Market, PriceSide, ScaledAmount, TokenPrice};
use crate::engine::convert::convert_to_usd;

/// USD value of one side of the pool at the chosen price side, excluding
/// trader PnL. Absent while that leg's oracle price has not loaded.
pub fn get_pool_usd_without_pnl(
    market: &Market,
    is_long: bool,
    side: PriceSide,
) -> Option<ScaledAmount> {
    let token = market.collateral_token(is_long);
    let prices = token.prices.as_ref()?;
    let amount = market.pool_token_amount(is_long);
    Some(convert_to_usd(&amount, prices.pick(side)))
}

/// Total pool value: long and short legs, both at the max price side
/// (conservative upper bound, used for display and pool-share pricing).
pub fn get_market_pool_value_usd(market: &Market) -> Option<ScaledAmount> {
    let long = get_pool_usd_without_pnl(market, true, PriceSide::Max)?;
    let short = get_pool_usd_without_pnl(market, false, PriceSide::Max)?;
    long.checked_add(&short).ok()
}

/// Price of the pool-share token: `pool_value * 10^share_decimals / supply`.
///
/// A zero supply bootstraps to exactly one USD unit. No bid/ask spread is
/// modeled for the share token (`min == max`).
pub fn get_market_token_price(
    market: &Market,
    total_supply: &ScaledAmount,
    usd_decimals: u32,
) -> Option<TokenPrice> {
    if total_supply.is_zero() {
        return Some(TokenPrice::flat(ScaledAmount::unit(usd_decimals)));
    }
    let pool_value = get_market_pool_value_usd(market)?;
    let price = ScaledAmount::new(
        pool_value.value() * pow10(total_supply.decimals()) / total_supply.value(),
        usd_decimals,
    );
    Some(TokenPrice::flat(price))
}
