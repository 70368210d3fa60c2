//! Risk metrics for a single leveraged position snapshot.
//!
//! All results are `Option`: an absent operand, a zero denominator, or an
//! economically meaningless value (non-positive liquidation price,
//! non-positive remaining collateral) makes the dependent result absent,
//! never zero, infinity, or a fault.

use crate::config::EngineConfig;
use crate::domain::{pow10, Market, Position, PositionFees, ScaledAmount, TokenPrice};
use crate::engine::convert::{apply_factor, convert_to_usd, get_basis_points};
use crate::engine::{ExposureChange, PnlCapPolicy};
use num_bigint::BigInt;

/// Price-side decision table, keyed by (exposure change, direction).
///
/// Conservative valuation: the max side applies when increasing a long or
/// decreasing a short; the min side otherwise.
pub fn should_use_max_price(change: ExposureChange, is_long: bool) -> bool {
    matches!(
        (change, is_long),
        (ExposureChange::Increase, true) | (ExposureChange::Decrease, false)
    )
}

/// The oracle side used to value a position for the given action.
pub fn get_mark_price(prices: &TokenPrice, change: ExposureChange, is_long: bool) -> &ScaledAmount {
    if should_use_max_price(change, is_long) {
        &prices.max
    } else {
        &prices.min
    }
}

/// Average entry price in USD-per-token-unit terms.
///
/// `size_in_usd / size_in_tokens`, rescaled by the index token's decimals.
/// Absent when `size_in_tokens <= 0`.
pub fn get_entry_price(position: &Position) -> Option<ScaledAmount> {
    if !position.size_in_tokens.is_positive() {
        return None;
    }
    let value = position.size_in_usd.value() * pow10(position.size_in_tokens.decimals())
        / position.size_in_tokens.value();
    Some(ScaledAmount::new(value, position.size_in_usd.decimals()))
}

/// Sum of pending funding and borrowing fees. The components are supplied
/// by the external collaborator; no accrual happens here.
pub fn get_position_pending_fees_usd(fees: &PositionFees) -> Option<ScaledAmount> {
    fees.pending_funding_usd
        .checked_add(&fees.pending_borrowing_usd)
        .ok()
}

/// Current notional value: `size_in_tokens` at the mark price.
pub fn get_position_value_usd(position: &Position, mark_price: &ScaledAmount) -> ScaledAmount {
    convert_to_usd(&position.size_in_tokens, mark_price)
}

/// Mark-to-market PnL. Long: `value - size_in_usd`; short: the reverse.
/// Absent for closed positions. The cap policy is identity by default.
pub fn get_position_pnl_usd(
    position: &Position,
    mark_price: &ScaledAmount,
    policy: &dyn PnlCapPolicy,
) -> Option<ScaledAmount> {
    if position.is_empty() {
        return None;
    }
    let value = get_position_value_usd(position, mark_price);
    let pnl = if position.is_long {
        value.checked_sub(&position.size_in_usd)
    } else {
        position.size_in_usd.checked_sub(&value)
    }
    .ok()?;
    Some(policy.cap_pnl(pnl, position))
}

/// `collateral_usd - pending_fees - closing_fee - ui_fee + pnl`.
pub fn get_position_net_value(
    collateral_usd: &ScaledAmount,
    fees: &PositionFees,
    pnl: &ScaledAmount,
) -> Option<ScaledAmount> {
    let pending = get_position_pending_fees_usd(fees)?;
    collateral_usd
        .checked_sub(&pending)
        .ok()?
        .checked_sub(&fees.closing_fee_usd)
        .ok()?
        .checked_sub(&fees.ui_fee_usd)
        .ok()?
        .checked_add(pnl)
        .ok()
}

/// Collateral left after marking to market: `collateral_usd + pnl - pending_fees`.
pub fn get_remaining_collateral_usd(
    collateral_usd: &ScaledAmount,
    pnl: &ScaledAmount,
    pending_fees_usd: &ScaledAmount,
) -> Option<ScaledAmount> {
    collateral_usd
        .checked_add(pnl)
        .ok()?
        .checked_sub(pending_fees_usd)
        .ok()
}

/// Leverage in basis points of notional per collateral dollar.
///
/// Absent when remaining collateral is non-positive (the position is
/// effectively insolvent). Divide by the bps divisor for a decimal
/// multiplier.
pub fn get_leverage(
    cfg: &EngineConfig,
    size_in_usd: &ScaledAmount,
    collateral_usd: &ScaledAmount,
    pnl: &ScaledAmount,
    pending_fees_usd: &ScaledAmount,
) -> Option<BigInt> {
    let remaining = get_remaining_collateral_usd(collateral_usd, pnl, pending_fees_usd)?;
    if !remaining.is_positive() {
        return None;
    }
    get_basis_points(size_in_usd, &remaining, cfg.bps_divisor, false)
}

/// Collateral floor at which the position becomes liquidatable:
/// `max(min_collateral_usd, size_in_usd * min_collateral_factor)`.
///
/// Absent when the market's factor has not loaded; a missing risk parameter
/// is never treated as zero.
pub fn get_liquidation_collateral_usd(
    cfg: &EngineConfig,
    size_in_usd: &ScaledAmount,
    market: &Market,
) -> Option<ScaledAmount> {
    let factor = market.min_collateral_factor.as_ref()?;
    let from_size = apply_factor(size_in_usd, factor);
    cfg.min_collateral_usd().checked_max(&from_size).ok()
}

/// Mark price at which remaining collateral reaches the liquidation floor.
///
/// Two branches: when the collateral token carries the same underlying value
/// as the index token, the equation is solved in token units (the posted
/// collateral itself moves with the price); otherwise collateral value is
/// held fixed in USD space. Absent on non-positive size, zero denominators,
/// a missing collateral factor, or a non-positive resulting price.
pub fn get_liquidation_price(
    cfg: &EngineConfig,
    position: &Position,
    market: &Market,
    collateral_usd: Option<&ScaledAmount>,
    fees: &PositionFees,
) -> Option<ScaledAmount> {
    if position.is_empty() || !position.size_in_tokens.is_positive() {
        return None;
    }
    let liq_collateral_usd = get_liquidation_collateral_usd(cfg, &position.size_in_usd, market)?;
    let pending = get_position_pending_fees_usd(fees)?;
    let index_decimals = position.size_in_tokens.decimals();
    let usd_decimals = position.size_in_usd.decimals();

    let (numerator_usd, denominator_tokens): (ScaledAmount, BigInt) = if position
        .collateral_token
        .is_value_equivalent(&market.index_token)
    {
        let total_fees = pending.checked_add(&fees.closing_fee_usd).ok()?;
        if position.is_long {
            let num = position
                .size_in_usd
                .checked_add(&liq_collateral_usd)
                .ok()?
                .checked_add(&total_fees)
                .ok()?;
            let denom = position
                .size_in_tokens
                .checked_add(&position.collateral_amount)
                .ok()?;
            (num, denom.value().clone())
        } else {
            let num = position
                .size_in_usd
                .checked_sub(&liq_collateral_usd)
                .ok()?
                .checked_sub(&total_fees)
                .ok()?;
            let denom = position
                .size_in_tokens
                .checked_sub(&position.collateral_amount)
                .ok()?;
            (num, denom.value().clone())
        }
    } else {
        // USD-space collateral: the token-space shortcut does not apply, so
        // the collateral's USD value is a required input here.
        let remaining = collateral_usd?
            .checked_sub(&pending)
            .ok()?
            .checked_sub(&fees.closing_fee_usd)
            .ok()?;
        if position.is_long {
            let num = liq_collateral_usd
                .checked_sub(&remaining)
                .ok()?
                .checked_add(&position.size_in_usd)
                .ok()?;
            (num, position.size_in_tokens.value().clone())
        } else {
            let num = liq_collateral_usd
                .checked_sub(&remaining)
                .ok()?
                .checked_sub(&position.size_in_usd)
                .ok()?;
            (num, -position.size_in_tokens.value())
        }
    };

    if denominator_tokens == BigInt::from(0) {
        return None;
    }
    let price = ScaledAmount::new(
        numerator_usd.value() * pow10(index_decimals) / denominator_tokens,
        usd_decimals,
    );
    if price.is_positive() {
        Some(price)
    } else {
        None
    }
}
