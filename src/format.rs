//! Human-readable rendering of fixed-point values.
//!
//! Pure string formatting over the numeric types; nothing here feeds back
//! into valuation. Absent values render as `"NA"`, never as `0`.

use crate::domain::{pow10, ScaledAmount};
use num_bigint::BigInt;
use num_traits::Signed;
use std::cmp::Ordering;

/// Render a scaled amount with a fixed number of fractional digits.
///
/// Excess precision truncates toward zero; missing precision pads with
/// zeros. With `trim`, trailing fractional zeros (and a then-empty decimal
/// point) are dropped.
pub fn format_scaled(amount: &ScaledAmount, display_decimals: u32, trim: bool) -> String {
    let abs = amount.value().abs();
    let scale = pow10(amount.decimals());
    let int_part = &abs / &scale;
    let frac_part = &abs % &scale;

    let mut frac = frac_part.to_string();
    let width = amount.decimals() as usize;
    if frac.len() < width {
        frac.insert_str(0, &"0".repeat(width - frac.len()));
    }
    let want = display_decimals as usize;
    if frac.len() > want {
        frac.truncate(want);
    } else {
        frac.push_str(&"0".repeat(want - frac.len()));
    }
    if trim {
        while frac.ends_with('0') {
            frac.pop();
        }
    }

    let mut out = String::new();
    if amount.is_negative() {
        out.push('-');
    }
    out.push_str(&int_part.to_string());
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Sign symbol for a rendered amount. `plus_for_zero` opts zero into the
/// `+` prefix; negative amounts always carry `-` via [`format_scaled`].
pub fn sign_prefix(amount: &ScaledAmount, plus_for_zero: bool) -> &'static str {
    if amount.is_negative() {
        ""
    } else if amount.is_positive() || plus_for_zero {
        "+"
    } else {
        ""
    }
}

/// [`format_scaled`] with an explicit sign symbol in front.
pub fn format_signed(
    amount: &ScaledAmount,
    display_decimals: u32,
    trim: bool,
    plus_for_zero: bool,
) -> String {
    format!(
        "{}{}",
        sign_prefix(amount, plus_for_zero),
        format_scaled(amount, display_decimals, trim)
    )
}

/// [`format_scaled`] clamped to display thresholds.
///
/// Values beyond `ceiling` render as `≥ceiling`; values below `floor`
/// render as `≤floor`. A threshold at a different exponent than the amount
/// is ignored.
pub fn format_scaled_clamped(
    amount: &ScaledAmount,
    display_decimals: u32,
    trim: bool,
    floor: Option<&ScaledAmount>,
    ceiling: Option<&ScaledAmount>,
) -> String {
    if let Some(ceiling) = ceiling {
        if matches!(amount.try_cmp(ceiling), Ok(Ordering::Greater)) {
            return format!("≥{}", format_scaled(ceiling, display_decimals, trim));
        }
    }
    if let Some(floor) = floor {
        if matches!(amount.try_cmp(floor), Ok(Ordering::Less)) {
            return format!("≤{}", format_scaled(floor, display_decimals, trim));
        }
    }
    format_scaled(amount, display_decimals, trim)
}

// Hundredths of the ratio `bps / divisor`, for two-decimal rendering.
fn ratio_hundredths(bps: &BigInt, divisor: u64, unit_hundredths: u64) -> (String, String, String) {
    let sign = if bps.is_negative() { "-" } else { "" };
    let hundredths = bps.abs() * BigInt::from(unit_hundredths) / BigInt::from(divisor);
    let whole = (&hundredths / BigInt::from(100)).to_string();
    let mut frac = (&hundredths % BigInt::from(100)).to_string();
    if frac.len() < 2 {
        frac.insert_str(0, &"0".repeat(2 - frac.len()));
    }
    (sign.to_string(), whole, frac)
}

/// Basis points to a percent string with two decimals, e.g. `1234` at the
/// standard divisor renders as `"12.34%"`.
pub fn format_factor_bps(bps: &BigInt, divisor: u64) -> String {
    let (sign, whole, frac) = ratio_hundredths(bps, divisor, 10_000);
    format!("{}{}.{}%", sign, whole, frac)
}

/// Leverage in basis points to a multiplier string, e.g. `45000` at the
/// standard divisor renders as `"4.50x"`.
pub fn format_leverage(bps: &BigInt, divisor: u64) -> String {
    let (sign, whole, frac) = ratio_hundredths(bps, divisor, 100);
    format!("{}{}.{}x", sign, whole, frac)
}

/// Liquidation price display; an absent price is `"NA"`, never zero.
pub fn format_liquidation_price(price: Option<&ScaledAmount>, display_decimals: u32) -> String {
    match price {
        Some(price) => format_scaled(price, display_decimals, false),
        None => "NA".to_string(),
    }
}
