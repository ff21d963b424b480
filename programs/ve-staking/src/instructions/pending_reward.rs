use anchor_lang::prelude::*;

use crate::constants::{POSITION_SEED, VE_STAKING_POOL_SEED};
use crate::ledger;
use crate::state::{Position, VeStakingPool};

/// Read-only preview of what `claim` would mint right now
#[derive(Accounts)]
pub struct PendingReward<'info> {
    #[account(
        seeds = [VE_STAKING_POOL_SEED, pool.base_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, VeStakingPool>,

    #[account(
        seeds = [POSITION_SEED, pool.key().as_ref(), position.owner.as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,
}

pub fn handler_pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let settlement = ledger::pending_reward(&ctx.accounts.pool, &ctx.accounts.position, now)?;

    Ok(settlement.credited)
}
