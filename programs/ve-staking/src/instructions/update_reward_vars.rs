use anchor_lang::prelude::*;

use crate::constants::VE_STAKING_POOL_SEED;
use crate::events::RewardVarsUpdated;
use crate::state::VeStakingPool;

/// Advance the pool accumulator to the current time
///
/// Permissionless; it has no effect on any position.
#[derive(Accounts)]
pub struct UpdateRewardVars<'info> {
    #[account(
        mut,
        seeds = [VE_STAKING_POOL_SEED, pool.base_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, VeStakingPool>,
}

pub fn handler_update_reward_vars(ctx: Context<UpdateRewardVars>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;

    if pool.update_reward_vars(now)? {
        emit!(RewardVarsUpdated {
            last_reward_timestamp: pool.last_reward_timestamp,
            acc_reward_per_share: pool.acc_reward_per_share,
        });
    }

    msg!(
        "acc_reward_per_share: {} at {}",
        pool.acc_reward_per_share,
        pool.last_reward_timestamp
    );

    Ok(())
}
