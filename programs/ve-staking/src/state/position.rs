use anchor_lang::prelude::*;

use crate::error::VeStakingError;
use crate::math::{elapsed_seconds, saturating_u64, Scaled};

/// Per-user staking position
/// PDA: ["position", ve_staking_pool, owner]
#[account]
#[derive(Default)]
pub struct Position {
    /// The pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position
    pub owner: Pubkey,

    /// Amount of base token staked
    pub balance: u64,

    /// Reward already accounted for at the last settlement
    /// reward_debt = balance * acc_reward_per_share / PRECISION
    pub reward_debt: u128,

    /// Last time pending reward was settled (deposit, withdraw or claim)
    pub last_claim_timestamp: i64,

    /// End of the current speed-up window, 0 when there is none
    pub speed_up_end_timestamp: i64,

    /// Total ve tokens credited (lifetime, saturating)
    pub rewards_credited: u64,

    /// ve tokens this position currently holds: credited minus burned
    /// The cap is enforced against this, never against a token account
    pub ve_held: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Position {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // balance
        16 + // reward_debt (u128)
        8 +  // last_claim_timestamp
        8 +  // speed_up_end_timestamp
        8 +  // rewards_credited
        8 +  // ve_held
        1 +  // bump
        32;  // padding for future fields

    /// Base reward accrued since the last settlement
    /// Formula: pending = balance * acc_reward_per_share / PRECISION - reward_debt
    /// Saturates at u64::MAX; the cap clamps far below that anyway
    pub fn pending_base(&self, acc_reward_per_share: Scaled) -> Result<u64> {
        if self.balance == 0 {
            return Ok(0);
        }

        let accrued = acc_reward_per_share.mul_amount(self.balance)?;
        let pending = accrued
            .checked_sub(self.reward_debt)
            .ok_or(VeStakingError::MathUnderflow)?;

        Ok(saturating_u64(pending))
    }

    /// Bonus reward for the part of [last_claim, now] inside the speed-up window
    /// Formula: balance * speed_up_rate * (min(now, end) - last_claim) / PRECISION
    pub fn pending_speed_up(&self, speed_up_rate_per_share_per_sec: u128, now: i64) -> Result<u64> {
        if self.balance == 0 || self.speed_up_end_timestamp == 0 {
            return Ok(0);
        }

        let ceiling = now.min(self.speed_up_end_timestamp);
        let seconds = elapsed_seconds(self.last_claim_timestamp, ceiling);
        if seconds == 0 {
            return Ok(0);
        }

        let bonus = Scaled::accrued(speed_up_rate_per_share_per_sec, seconds)?
            .mul_amount(self.balance)?;

        Ok(saturating_u64(bonus))
    }

    /// Whether the bonus rate applies at `now`
    pub fn is_speeding_up(&self, now: i64) -> bool {
        self.speed_up_end_timestamp != 0 && now < self.speed_up_end_timestamp
    }

    /// Drop a window that has fully elapsed at `now`; its bonus has been paid
    pub fn expire_speed_up(&mut self, now: i64) {
        if self.speed_up_end_timestamp != 0 && now >= self.speed_up_end_timestamp {
            self.speed_up_end_timestamp = 0;
        }
    }
}
