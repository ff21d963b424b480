use anchor_lang::prelude::*;

use crate::constants::VE_STAKING_POOL_SEED;
use crate::error::VeStakingError;
use crate::events::{
    AdminTransferred, BaseRateUpdated, MaxCapPctUpdated, SpeedUpRateUpdated,
    SpeedUpThresholdUpdated,
};
use crate::state::VeStakingPool;

// =============================================================================
// Parameter Updates
// =============================================================================

/// Shared by every parameter setter. The signer is checked against
/// `pool.admin` inside the handler via `VeStakingPool::authorize`.
#[derive(Accounts)]
pub struct UpdateParams<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VE_STAKING_POOL_SEED, pool.base_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, VeStakingPool>,
}

pub fn set_base_rate(ctx: Context<UpdateParams>, rate: u128) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    let cap = pool.authorize(&ctx.accounts.admin.key())?;

    let old_rate = pool.base_rate_per_share_per_sec;
    pool.set_base_rate(&cap, rate, now)?;

    msg!("Base rate updated from {} to {}", old_rate, rate);
    emit!(BaseRateUpdated {
        old_rate,
        new_rate: rate,
    });

    Ok(())
}

pub fn set_speed_up_rate(ctx: Context<UpdateParams>, rate: u128) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    let cap = pool.authorize(&ctx.accounts.admin.key())?;

    let old_rate = pool.speed_up_rate_per_share_per_sec;
    pool.set_speed_up_rate(&cap, rate, now)?;

    msg!("Speed-up rate updated from {} to {}", old_rate, rate);
    emit!(SpeedUpRateUpdated {
        old_rate,
        new_rate: rate,
    });

    Ok(())
}

pub fn set_speed_up_threshold(ctx: Context<UpdateParams>, threshold_pct: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    let cap = pool.authorize(&ctx.accounts.admin.key())?;

    let old_threshold_pct = pool.speed_up_threshold_pct;
    pool.set_speed_up_threshold(&cap, threshold_pct, now)?;

    msg!(
        "Speed-up threshold updated from {}% to {}%",
        old_threshold_pct,
        threshold_pct
    );
    emit!(SpeedUpThresholdUpdated {
        old_threshold_pct,
        new_threshold_pct: threshold_pct,
    });

    Ok(())
}

pub fn set_max_cap_pct(ctx: Context<UpdateParams>, max_cap_pct: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    let cap = pool.authorize(&ctx.accounts.admin.key())?;

    let old_max_cap_pct = pool.max_cap_pct;
    pool.set_max_cap_pct(&cap, max_cap_pct, now)?;

    msg!(
        "Max cap updated from {} to {} (hundredths of a percent)",
        old_max_cap_pct,
        max_cap_pct
    );
    emit!(MaxCapPctUpdated {
        old_max_cap_pct,
        new_max_cap_pct: max_cap_pct,
    });

    Ok(())
}

// =============================================================================
// Transfer Admin
// =============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VE_STAKING_POOL_SEED, pool.base_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, VeStakingPool>,

    /// CHECK: New admin address, validated to not be default or the current admin
    #[account(
        constraint = new_admin.key() != Pubkey::default() @ VeStakingError::InvalidAuthority
    )]
    pub new_admin: UncheckedAccount<'info>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let cap = pool.authorize(&ctx.accounts.admin.key())?;

    let old_admin = pool.admin;
    let new_admin = ctx.accounts.new_admin.key();
    pool.transfer_admin(&cap, new_admin)?;

    msg!("Admin transferred from {} to {}", old_admin, new_admin);
    emit!(AdminTransferred {
        old_admin,
        new_admin,
    });

    Ok(())
}
