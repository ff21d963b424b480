//! Overflow-checked fixed-point math for reward accrual.
//!
//! Rates and the accumulator are `u128` values scaled by [`PRECISION`]. Token
//! amounts stay `u64`; narrowing back to a token amount saturates, since the
//! cap always clamps a reward well below `u64::MAX`.

use anchor_lang::prelude::*;

use crate::constants::PRECISION;
use crate::error::VeStakingError;

/// `a * b / denominator`, rounded down.
///
/// When the 128-bit product overflows, one factor is split around the
/// denominator: `a = q * d + r`, so `a * b / d == q * b + r * b / d` exactly.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator != 0, VeStakingError::DivisionByZero);

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }

    split_mul_div(a, b, denominator)
        .or_else(|| split_mul_div(b, a, denominator))
        .ok_or_else(|| VeStakingError::MathOverflow.into())
}

fn split_mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
    let whole = (a / denominator).checked_mul(b)?;
    let rest = (a % denominator).checked_mul(b)? / denominator;
    whole.checked_add(rest)
}

/// Narrow an accounting value back to a token amount, clamping at u64::MAX
pub fn saturating_u64(value: u128) -> u64 {
    value.min(u64::MAX as u128) as u64
}

/// Whole seconds between two timestamps, zero if `to` is not after `from`.
pub fn elapsed_seconds(from: i64, to: i64) -> u64 {
    if to <= from {
        return 0;
    }
    // to > from, so the difference is positive and fits in u64
    to.abs_diff(from)
}

/// A quantity scaled by [`PRECISION`]: the per-share accumulator, or an
/// amount accrued per staked unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scaled(u128);

impl Scaled {
    pub const ZERO: Self = Self(0);

    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Per-share amount accrued at `rate_per_share_per_sec` over `seconds`.
    ///
    /// Rates carry the same precision as the accumulator, so no rescaling is
    /// needed.
    pub fn accrued(rate_per_share_per_sec: u128, seconds: u64) -> Result<Self> {
        rate_per_share_per_sec
            .checked_mul(seconds as u128)
            .map(Self)
            .ok_or_else(|| VeStakingError::MathOverflow.into())
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| VeStakingError::MathOverflow.into())
    }

    /// Whole reward units owed to `amount` staked units at this per-share value.
    pub fn mul_amount(self, amount: u64) -> Result<u128> {
        mul_div(amount as u128, self.0, PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_down() {
        assert_eq!(mul_div(10, 3, 4).unwrap(), 7);
        assert_eq!(mul_div(0, u128::MAX, 1).unwrap(), 0);
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        assert_eq!(
            mul_div(1, 1, 0).unwrap_err(),
            VeStakingError::DivisionByZero.into()
        );
    }

    #[test]
    fn mul_div_survives_wide_products() {
        // 1e30 * 1e20 overflows u128 but the quotient fits
        let a = 1_000_000_000_000_000_000_000_000_000_000u128;
        let b = 100_000_000_000_000_000_000u128;
        assert_eq!(mul_div(a, b, PRECISION).unwrap(), a * 100);
        assert_eq!(mul_div(b, a, PRECISION).unwrap(), a * 100);
    }

    #[test]
    fn mul_div_reports_overflow_when_result_does_not_fit() {
        assert_eq!(
            mul_div(u128::MAX, u128::MAX, 2).unwrap_err(),
            VeStakingError::MathOverflow.into()
        );
    }

    #[test]
    fn saturating_u64_clamps() {
        assert_eq!(saturating_u64(7), 7);
        assert_eq!(saturating_u64(u64::MAX as u128 * 3), u64::MAX);
    }

    #[test]
    fn elapsed_is_zero_for_stale_clock() {
        assert_eq!(elapsed_seconds(100, 130), 30);
        assert_eq!(elapsed_seconds(100, 100), 0);
        assert_eq!(elapsed_seconds(100, 90), 0);
    }

    #[test]
    fn scaled_amount_uses_precision() {
        // one reward unit per share per second for 30 seconds, 10 units staked
        let acc = Scaled::accrued(PRECISION, 30).unwrap();
        assert_eq!(acc.mul_amount(10).unwrap(), 300);
    }
}
