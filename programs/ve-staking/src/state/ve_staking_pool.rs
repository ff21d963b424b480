use anchor_lang::prelude::*;

use crate::constants::{
    CAP_PCT_DENOMINATOR, MAX_CAP_PCT_LIMIT, MAX_RATE_PER_SHARE_PER_SEC,
    MAX_SPEED_UP_THRESHOLD_PCT, MAX_SPEED_UP_WINDOW_SECONDS,
};
use crate::error::VeStakingError;
use crate::math::{elapsed_seconds, mul_div, saturating_u64, Scaled};

/// Proof that the caller passed the admin check for this pool.
///
/// Only [`VeStakingPool::authorize`] can build one, so governance setters
/// cannot be reached without it.
#[derive(Debug)]
pub struct AdminCap {
    _private: (),
}

/// Tunables supplied when the pool is created
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitializeParams {
    pub base_rate_per_share_per_sec: u128,
    pub speed_up_rate_per_share_per_sec: u128,
    pub speed_up_threshold_pct: u64,
    pub speed_up_window_seconds: i64,
    pub max_cap_pct: u64,
}

/// Global veToken staking state
/// PDA: ["ve_staking_pool", base_mint]
#[account]
#[derive(Default)]
pub struct VeStakingPool {
    /// Admin allowed to change parameters
    pub admin: Pubkey,

    /// Token users lock
    pub base_mint: Pubkey,

    /// Non-transferable reward token; this pool is its only mint authority
    pub ve_mint: Pubkey,

    /// Vault holding staked base tokens
    /// PDA: ["stake_vault", ve_staking_pool]
    pub stake_vault: Pubkey,

    /// Sum of all position balances
    pub total_staked: u64,

    /// Reward accrued per staked unit since genesis (scaled by PRECISION)
    /// Never decreases
    pub acc_reward_per_share: u128,

    /// Last time acc_reward_per_share was advanced
    pub last_reward_timestamp: i64,

    /// Reward per staked unit per second (scaled by PRECISION)
    pub base_rate_per_share_per_sec: u128,

    /// Extra reward per staked unit per second inside a speed-up window
    pub speed_up_rate_per_share_per_sec: u128,

    /// A deposit of at least this percent of the current balance restarts the window
    pub speed_up_threshold_pct: u64,

    /// Length of a speed-up window
    pub speed_up_window_seconds: i64,

    /// Max ve holding relative to staked balance, 10_000 = 100.00%
    /// Can only go up
    pub max_cap_pct: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,
}

impl VeStakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // base_mint
        32 + // ve_mint
        32 + // stake_vault
        8 +  // total_staked
        16 + // acc_reward_per_share (u128)
        8 +  // last_reward_timestamp
        16 + // base_rate_per_share_per_sec (u128)
        16 + // speed_up_rate_per_share_per_sec (u128)
        8 +  // speed_up_threshold_pct
        8 +  // speed_up_window_seconds
        8 +  // max_cap_pct
        1 +  // bump
        1 +  // stake_vault_bump
        64;  // padding for future fields

    /// Validate and store the tunables, starting accrual at `now`
    pub fn configure(&mut self, params: &InitializeParams, now: i64) -> Result<()> {
        validate_rate(params.base_rate_per_share_per_sec)?;
        validate_rate(params.speed_up_rate_per_share_per_sec)?;
        validate_speed_up_threshold(params.speed_up_threshold_pct)?;
        validate_max_cap_limit(params.max_cap_pct)?;
        require!(
            (0..=MAX_SPEED_UP_WINDOW_SECONDS).contains(&params.speed_up_window_seconds),
            VeStakingError::LimitExceeded
        );

        self.base_rate_per_share_per_sec = params.base_rate_per_share_per_sec;
        self.speed_up_rate_per_share_per_sec = params.speed_up_rate_per_share_per_sec;
        self.speed_up_threshold_pct = params.speed_up_threshold_pct;
        self.speed_up_window_seconds = params.speed_up_window_seconds;
        self.max_cap_pct = params.max_cap_pct;

        self.total_staked = 0;
        self.acc_reward_per_share = 0;
        self.last_reward_timestamp = now;

        Ok(())
    }

    /// Check `caller` against the stored admin
    pub fn authorize(&self, caller: &Pubkey) -> Result<AdminCap> {
        require_keys_eq!(*caller, self.admin, VeStakingError::Unauthorized);
        Ok(AdminCap { _private: () })
    }

    /// Accumulator value as it would be after advancing to `now`
    pub fn acc_reward_per_share_at(&self, now: i64) -> Result<Scaled> {
        let current = Scaled::from_raw(self.acc_reward_per_share);
        let elapsed = elapsed_seconds(self.last_reward_timestamp, now);
        if elapsed == 0 {
            return Ok(current);
        }

        current.checked_add(Scaled::accrued(self.base_rate_per_share_per_sec, elapsed)?)
    }

    /// Bring acc_reward_per_share up to `now`
    ///
    /// Returns false when `now` is not past the last update (nothing changed).
    pub fn update_reward_vars(&mut self, now: i64) -> Result<bool> {
        if now <= self.last_reward_timestamp {
            return Ok(false);
        }

        let acc = self.acc_reward_per_share_at(now)?;
        self.acc_reward_per_share = acc.raw();
        self.last_reward_timestamp = now;

        Ok(true)
    }

    /// Largest ve holding allowed for `balance` staked units
    /// Formula: balance * max_cap_pct / CAP_PCT_DENOMINATOR
    pub fn max_holding(&self, balance: u64) -> Result<u64> {
        let cap = mul_div(
            balance as u128,
            self.max_cap_pct as u128,
            CAP_PCT_DENOMINATOR,
        )?;

        // A cap above u64::MAX can never bind on a u64 holding
        Ok(saturating_u64(cap))
    }

    /// Whether depositing `amount` on top of `balance` opens a new speed-up window
    pub fn qualifies_for_speed_up(&self, balance: u64, amount: u64) -> bool {
        if balance == 0 {
            return true;
        }

        (amount as u128) * 100 >= (self.speed_up_threshold_pct as u128) * (balance as u128)
    }

    // -------------------------------------------------------------------------
    // Governance
    // -------------------------------------------------------------------------

    pub fn set_base_rate(&mut self, _cap: &AdminCap, rate: u128, now: i64) -> Result<()> {
        validate_rate(rate)?;
        self.update_reward_vars(now)?;
        self.base_rate_per_share_per_sec = rate;
        Ok(())
    }

    pub fn set_speed_up_rate(&mut self, _cap: &AdminCap, rate: u128, now: i64) -> Result<()> {
        validate_rate(rate)?;
        self.update_reward_vars(now)?;
        self.speed_up_rate_per_share_per_sec = rate;
        Ok(())
    }

    pub fn set_speed_up_threshold(&mut self, _cap: &AdminCap, pct: u64, now: i64) -> Result<()> {
        validate_speed_up_threshold(pct)?;
        self.update_reward_vars(now)?;
        self.speed_up_threshold_pct = pct;
        Ok(())
    }

    pub fn set_max_cap_pct(&mut self, _cap: &AdminCap, max_cap_pct: u64, now: i64) -> Result<()> {
        require!(max_cap_pct > self.max_cap_pct, VeStakingError::MustIncrease);
        validate_max_cap_limit(max_cap_pct)?;
        self.update_reward_vars(now)?;
        self.max_cap_pct = max_cap_pct;
        Ok(())
    }

    pub fn transfer_admin(&mut self, _cap: &AdminCap, new_admin: Pubkey) -> Result<()> {
        require!(
            new_admin != Pubkey::default() && new_admin != self.admin,
            VeStakingError::InvalidAuthority
        );
        self.admin = new_admin;
        Ok(())
    }
}

fn validate_rate(rate: u128) -> Result<()> {
    require!(
        rate <= MAX_RATE_PER_SHARE_PER_SEC,
        VeStakingError::LimitExceeded
    );
    Ok(())
}

fn validate_speed_up_threshold(pct: u64) -> Result<()> {
    require!(
        pct != 0 && pct <= MAX_SPEED_UP_THRESHOLD_PCT,
        VeStakingError::OutOfRange
    );
    Ok(())
}

fn validate_max_cap_limit(max_cap_pct: u64) -> Result<()> {
    require!(
        max_cap_pct != 0 && max_cap_pct <= MAX_CAP_PCT_LIMIT,
        VeStakingError::LimitExceeded
    );
    Ok(())
}
