//! Whole-unit currency arithmetic.
//!
//! Upstream data arrives as JSON numbers which may be fractional, negative or
//! missing. Everything is folded into non-negative whole units here so that a
//! bad value never turns a total into garbage.

/// Currency amount in whole units (the backend prices in VND, no minor units).
pub type Amount = i64;

/// Largest single amount accepted from upstream data. Anything above is
/// treated as malformed.
pub const MAX_AMOUNT: Amount = 1_000_000_000_000;

/// Convert a raw upstream number into an amount. Non-finite, negative and
/// out-of-range values become 0.
pub fn sanitize_amount(raw: f64) -> Amount {
    if !raw.is_finite() || raw <= 0.0 || raw > MAX_AMOUNT as f64 {
        return 0;
    }
    raw.round() as Amount
}

/// Sum of amounts, saturating instead of overflowing.
pub fn saturating_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Amount {
    amounts.into_iter().fold(0, Amount::saturating_add)
}

/// Same as [`sanitize_amount`] but keeps "absent" distinct from "zero".
pub fn sanitize_optional(raw: Option<f64>) -> Option<Amount> {
    raw.map(sanitize_amount)
}

/// Percentage rate usable in arithmetic. Non-finite and negative rates are 0.
pub fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}

/// `amount × percent / 100`, truncated to whole units.
pub fn percentage_of(amount: Amount, percent: f64) -> Amount {
    if amount <= 0 {
        return 0;
    }
    let raw = amount as f64 * sanitize_rate(percent) / 100.0;
    raw.floor() as Amount
}

/// Scale a base amount by a multiplier (seat-type fallback pricing).
pub fn scale(base: Amount, multiplier: f64) -> Amount {
    (base.max(0) as f64 * sanitize_rate(multiplier)).round() as Amount
}
