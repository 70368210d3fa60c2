//! Decimal-scaled conversions between token-native and USD amounts.
//!
//! Pure functions of their inputs. Division truncates toward zero; missing
//! or degenerate operands compose to `None`, never to a substituted zero or
//! a divide-by-zero fault.

use crate::domain::{pow10, ScaledAmount};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Convert a token-native amount to USD at the given per-unit price.
///
/// `amount * price / 10^amount.decimals`, at the price's exponent.
pub fn convert_to_usd(amount: &ScaledAmount, price: &ScaledAmount) -> ScaledAmount {
    let value = amount.value() * price.value() / pow10(amount.decimals());
    ScaledAmount::new(value, price.decimals())
}

/// Convert a USD amount back to a token-native amount.
///
/// `usd * 10^token_decimals / price`. `None` when the price is zero or the
/// USD operands disagree on exponent.
pub fn convert_to_token_amount(
    usd: &ScaledAmount,
    token_decimals: u32,
    price: &ScaledAmount,
) -> Option<ScaledAmount> {
    if usd.decimals() != price.decimals() || price.is_zero() {
        return None;
    }
    let value = usd.value() * pow10(token_decimals) / price.value();
    Some(ScaledAmount::new(value, token_decimals))
}

/// `numerator * divisor / denominator`, truncating toward zero.
///
/// With `round_up`, a nonzero remainder rounds away from zero (sign-aware,
/// so negative results also grow in magnitude). `None` on a zero
/// denominator or exponent mismatch.
pub fn get_basis_points(
    numerator: &ScaledAmount,
    denominator: &ScaledAmount,
    divisor: u64,
    round_up: bool,
) -> Option<BigInt> {
    if numerator.decimals() != denominator.decimals() || denominator.is_zero() {
        return None;
    }
    let product = numerator.value() * BigInt::from(divisor);
    let mut quotient = &product / denominator.value();
    if round_up && !(&product % denominator.value()).is_zero() {
        let exact_is_negative = product.is_negative() != denominator.value().is_negative();
        if exact_is_negative {
            quotient -= BigInt::from(1);
        } else {
            quotient += BigInt::from(1);
        }
    }
    Some(quotient)
}

/// Apply a fractional factor expressed at its own exponent
/// (1.0 = `10^factor.decimals`): `amount * factor / 10^factor.decimals`.
pub fn apply_factor(amount: &ScaledAmount, factor: &ScaledAmount) -> ScaledAmount {
    let value = amount.value() * factor.value() / pow10(factor.decimals());
    ScaledAmount::new(value, amount.decimals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Signed;

    const USD_DECIMALS: u32 = 20;

    fn usd(n: i128) -> ScaledAmount {
        ScaledAmount::expand(n, USD_DECIMALS)
    }

    #[test]
    fn test_convert_to_usd_scenario() {
        // 5 tokens at 6 decimals, $2.00 per unit at 20 USD decimals -> $10.00.
        let amount = ScaledAmount::expand(5, 6);
        let price = usd(2);
        assert_eq!(convert_to_usd(&amount, &price), usd(10));
    }

    #[test]
    fn test_convert_to_usd_truncates_toward_zero() {
        // 1 raw unit of a 6-decimal token at $1.50: 1 * 1.5e20 / 1e6.
        let amount = ScaledAmount::from_raw(1, 6);
        let price = ScaledAmount::new(15 * pow10(19), USD_DECIMALS);
        let value = convert_to_usd(&amount, &price);
        assert_eq!(value, ScaledAmount::new(15 * pow10(13), USD_DECIMALS));
    }

    #[test]
    fn test_convert_to_token_amount_inverse() {
        let usd_amount = usd(10);
        let price = usd(2);
        let tokens = convert_to_token_amount(&usd_amount, 6, &price).unwrap();
        assert_eq!(tokens, ScaledAmount::expand(5, 6));
    }

    #[test]
    fn test_convert_zero_price_is_none() {
        assert!(convert_to_token_amount(&usd(10), 6, &ScaledAmount::zero(USD_DECIMALS)).is_none());
    }

    #[test]
    fn test_round_trip_within_one_unit() {
        for raw in [1i128, 7, 999_999, 123_456_789, 5_000_001] {
            let amount = ScaledAmount::from_raw(raw, 6);
            let price = ScaledAmount::new(3 * pow10(19), USD_DECIMALS); // $0.30
            let usd_value = convert_to_usd(&amount, &price);
            let back = convert_to_token_amount(&usd_value, 6, &price).unwrap();
            let drift = (amount.value() - back.value()).abs();
            assert!(drift <= BigInt::from(1), "drift {} for raw {}", drift, raw);
        }
    }

    #[test]
    fn test_basis_points_truncates() {
        let bps = get_basis_points(&usd(1), &usd(3), 10_000, false).unwrap();
        assert_eq!(bps, BigInt::from(3_333));
    }

    #[test]
    fn test_basis_points_round_up_away_from_zero() {
        let up = get_basis_points(&usd(1), &usd(3), 10_000, true).unwrap();
        assert_eq!(up, BigInt::from(3_334));

        // Negative results grow in magnitude too.
        let down = get_basis_points(&usd(-1), &usd(3), 10_000, true).unwrap();
        assert_eq!(down, BigInt::from(-3_334));
    }

    #[test]
    fn test_basis_points_round_up_never_smaller_in_magnitude() {
        for n in [-7i128, -1, 0, 1, 7, 13] {
            for d in [3i128, 7, 11] {
                let plain = get_basis_points(&usd(n), &usd(d), 10_000, false).unwrap();
                let rounded = get_basis_points(&usd(n), &usd(d), 10_000, true).unwrap();
                assert!(
                    rounded.abs() >= plain.abs(),
                    "round_up shrank {}/{}: {} vs {}",
                    n,
                    d,
                    rounded,
                    plain
                );
            }
        }
    }

    #[test]
    fn test_basis_points_exact_division_needs_no_rounding() {
        let plain = get_basis_points(&usd(1), &usd(2), 10_000, false).unwrap();
        let rounded = get_basis_points(&usd(1), &usd(2), 10_000, true).unwrap();
        assert_eq!(plain, BigInt::from(5_000));
        assert_eq!(plain, rounded);
    }

    #[test]
    fn test_basis_points_zero_denominator_is_none() {
        assert!(get_basis_points(&usd(1), &usd(0), 10_000, false).is_none());
    }

    #[test]
    fn test_basis_points_exponent_mismatch_is_none() {
        let n = ScaledAmount::expand(1, 20);
        let d = ScaledAmount::expand(1, 6);
        assert!(get_basis_points(&n, &d, 10_000, false).is_none());
    }

    #[test]
    fn test_apply_factor() {
        // 1% of $1000, factor at 20 decimals.
        let factor = ScaledAmount::new(pow10(18), USD_DECIMALS);
        assert_eq!(apply_factor(&usd(1000), &factor), usd(10));
    }
}
