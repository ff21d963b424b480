//! Position accounting behind the deposit, withdraw and claim instructions.
//!
//! Each operation advances the pool accumulator, settles the caller's
//! position and reports how many ve tokens the instruction must mint (and,
//! on withdraw, burn). The cap is measured against `Position::ve_held`, the
//! ve this position has been credited and not yet burned, so which token
//! account the caller passes cannot change it. Everything that can fail is
//! computed before the first write, so an error leaves both accounts exactly
//! as they were.

use anchor_lang::prelude::*;

use crate::error::VeStakingError;
use crate::math::Scaled;
use crate::state::{Position, VeStakingPool};

/// Reward owed to a position at one settlement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Accrued at the base rate since the last settlement
    pub base: u64,

    /// Accrued at the speed-up rate inside the window
    pub speed_up: u64,

    /// What is actually minted after the cap
    pub credited: u64,
}

impl Settlement {
    /// Base plus speed-up, before the cap
    pub fn pending(&self) -> u64 {
        self.base.saturating_add(self.speed_up)
    }

    /// Reward forfeited to the cap
    pub fn truncated(&self) -> u64 {
        self.pending().saturating_sub(self.credited)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositReceipt {
    pub settlement: Settlement,

    /// A new speed-up window was opened by this deposit
    pub speed_up_started: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawReceipt {
    pub settlement: Settlement,

    /// ve tokens above the post-withdraw cap that must be burned
    pub burned: u64,
}

/// Room left under `cap` for a holder of `holding`, applied to `pending`
pub fn clamp_to_cap(pending: u64, holding: u64, cap: u64) -> u64 {
    pending.min(cap.saturating_sub(holding))
}

fn credit_held(position: &Position, credited: u64) -> Result<u64> {
    position
        .ve_held
        .checked_add(credited)
        .ok_or_else(|| VeStakingError::MathOverflow.into())
}

fn settle(
    pool: &VeStakingPool,
    position: &Position,
    acc_reward_per_share: Scaled,
    balance_after: u64,
    now: i64,
) -> Result<Settlement> {
    let base = position.pending_base(acc_reward_per_share)?;
    let speed_up = position.pending_speed_up(pool.speed_up_rate_per_share_per_sec, now)?;
    let pending = base.saturating_add(speed_up);

    let cap = pool.max_holding(balance_after)?;

    Ok(Settlement {
        base,
        speed_up,
        credited: clamp_to_cap(pending, position.ve_held, cap),
    })
}

/// What a claim at `now` would credit, without touching any state
pub fn pending_reward(pool: &VeStakingPool, position: &Position, now: i64) -> Result<Settlement> {
    let acc = pool.acc_reward_per_share_at(now)?;
    settle(pool, position, acc, position.balance, now)
}

/// Stake `amount` more base tokens
pub fn deposit(
    pool: &mut VeStakingPool,
    position: &mut Position,
    amount: u64,
    now: i64,
) -> Result<DepositReceipt> {
    require!(amount > 0, VeStakingError::InvalidAmount);

    let balance = position
        .balance
        .checked_add(amount)
        .ok_or(VeStakingError::MathOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(VeStakingError::MathOverflow)?;

    let acc = pool.acc_reward_per_share_at(now)?;
    let settlement = settle(pool, position, acc, balance, now)?;
    let reward_debt = acc.mul_amount(balance)?;
    let ve_held = credit_held(position, settlement.credited)?;

    // Eligibility is judged against the balance before this deposit
    let speed_up_started = pool.qualifies_for_speed_up(position.balance, amount);
    let speed_up_end = if speed_up_started {
        Some(
            now.checked_add(pool.speed_up_window_seconds)
                .ok_or(VeStakingError::MathOverflow)?,
        )
    } else {
        None
    };

    let rewards_credited = position.rewards_credited.saturating_add(settlement.credited);

    pool.update_reward_vars(now)?;
    pool.total_staked = total_staked;

    position.expire_speed_up(now);
    if let Some(end) = speed_up_end {
        // Overwrites a running window instead of extending it
        position.speed_up_end_timestamp = end;
    }
    position.balance = balance;
    position.reward_debt = reward_debt;
    position.last_claim_timestamp = now;
    position.rewards_credited = rewards_credited;
    position.ve_held = ve_held;

    Ok(DepositReceipt {
        settlement,
        speed_up_started,
    })
}

/// Unstake `amount` base tokens
///
/// Any speed-up window is forfeited, and ve holdings above the cap for the
/// remaining balance are reported for burning.
pub fn withdraw(
    pool: &mut VeStakingPool,
    position: &mut Position,
    amount: u64,
    now: i64,
) -> Result<WithdrawReceipt> {
    require!(amount > 0, VeStakingError::InvalidAmount);
    require!(
        amount <= position.balance,
        VeStakingError::InsufficientBalance
    );

    let balance = position
        .balance
        .checked_sub(amount)
        .ok_or(VeStakingError::MathUnderflow)?;
    let total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(VeStakingError::MathUnderflow)?;

    let acc = pool.acc_reward_per_share_at(now)?;
    let settlement = settle(pool, position, acc, balance, now)?;
    let reward_debt = acc.mul_amount(balance)?;

    let held = credit_held(position, settlement.credited)?;
    let cap = pool.max_holding(balance)?;
    let burned = held.saturating_sub(cap);
    let ve_held = held.min(cap);

    let rewards_credited = position.rewards_credited.saturating_add(settlement.credited);

    pool.update_reward_vars(now)?;
    pool.total_staked = total_staked;

    position.balance = balance;
    position.reward_debt = reward_debt;
    position.last_claim_timestamp = now;
    position.speed_up_end_timestamp = 0;
    position.rewards_credited = rewards_credited;
    position.ve_held = ve_held;

    Ok(WithdrawReceipt { settlement, burned })
}

/// Settle pending reward without changing the staked balance
pub fn claim(pool: &mut VeStakingPool, position: &mut Position, now: i64) -> Result<Settlement> {
    require!(position.balance > 0, VeStakingError::NothingStaked);

    let acc = pool.acc_reward_per_share_at(now)?;
    let settlement = settle(pool, position, acc, position.balance, now)?;
    let reward_debt = acc.mul_amount(position.balance)?;
    let ve_held = credit_held(position, settlement.credited)?;

    let rewards_credited = position.rewards_credited.saturating_add(settlement.credited);

    pool.update_reward_vars(now)?;

    position.reward_debt = reward_debt;
    position.last_claim_timestamp = now;
    position.expire_speed_up(now);
    position.rewards_credited = rewards_credited;
    position.ve_held = ve_held;

    Ok(settlement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pays_what_fits() {
        assert_eq!(clamp_to_cap(100, 0, 1_000), 100);
        assert_eq!(clamp_to_cap(100, 950, 1_000), 50);
        assert_eq!(clamp_to_cap(100, 1_000, 1_000), 0);
        assert_eq!(clamp_to_cap(100, 2_000, 1_000), 0);
    }

    fn pool(max_cap_pct: u64) -> VeStakingPool {
        let mut pool = VeStakingPool::default();
        pool.configure(
            &crate::state::InitializeParams {
                base_rate_per_share_per_sec: crate::constants::PRECISION,
                speed_up_rate_per_share_per_sec: 0,
                speed_up_threshold_pct: 5,
                speed_up_window_seconds: 0,
                max_cap_pct,
            },
            0,
        )
        .unwrap();
        pool
    }

    #[test]
    fn repeated_claims_never_lift_the_holding_above_the_cap() {
        // 200% of 10 staked
        let mut pool = pool(20_000);
        let mut position = Position::default();
        deposit(&mut pool, &mut position, 10, 0).unwrap();

        assert_eq!(claim(&mut pool, &mut position, 30).unwrap().credited, 20);
        for now in [31, 40, 1_000] {
            assert_eq!(claim(&mut pool, &mut position, now).unwrap().credited, 0);
        }
        assert_eq!(position.ve_held, 20);
        assert_eq!(position.rewards_credited, 20);
    }

    #[test]
    fn withdraw_burns_down_to_the_new_cap() {
        let mut pool = pool(20_000);
        let mut position = Position::default();
        deposit(&mut pool, &mut position, 10, 0).unwrap();
        claim(&mut pool, &mut position, 30).unwrap();

        let receipt = withdraw(&mut pool, &mut position, 4, 30).unwrap();
        assert_eq!(receipt.burned, 8);
        assert_eq!(position.ve_held, 12);
    }

    #[test]
    fn settlement_reports_truncation() {
        let s = Settlement {
            base: 70,
            speed_up: 30,
            credited: 40,
        };
        assert_eq!(s.pending(), 100);
        assert_eq!(s.truncated(), 60);
    }
}
