use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint as VeMint, TokenAccount as VeTokenAccount, TokenInterface};

use crate::constants::{POSITION_SEED, VE_STAKING_POOL_SEED};
use crate::error::VeStakingError;
use crate::events::{Claimed, RewardVarsUpdated};
use crate::ledger;
use crate::state::{Position, VeStakingPool};
use crate::ve_token;

/// Claim accumulated ve tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
///
/// # Flow
/// 1. Advance the pool accumulator
/// 2. Calculate pending base and speed-up reward
/// 3. Clamp to the user's max cap and mint
/// 4. Re-snapshot reward_debt so the same reward is never paid twice
///
#[derive(Accounts)]
pub struct Claim<'info> {
    /// User claiming their ve tokens
    pub user: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [VE_STAKING_POOL_SEED, pool.base_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, VeStakingPool>,

    /// User's position
    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ VeStakingError::InvalidPosition
    )]
    pub position: Account<'info, Position>,

    /// ve token mint
    #[account(
        mut,
        constraint = ve_mint.key() == pool.ve_mint @ VeStakingError::InvalidVeMint
    )]
    pub ve_mint: InterfaceAccount<'info, VeMint>,

    /// User's ve token account; the mint is non-transferable, so all of the
    /// user's ve lives here
    #[account(
        mut,
        associated_token::mint = ve_mint,
        associated_token::authority = user,
        associated_token::token_program = ve_token_program
    )]
    pub user_ve_account: InterfaceAccount<'info, VeTokenAccount>,

    pub ve_token_program: Interface<'info, TokenInterface>,
}

pub fn handler_claim(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    let last_reward_timestamp = pool.last_reward_timestamp;
    let settlement = ledger::claim(pool, position, now)?;

    if pool.last_reward_timestamp != last_reward_timestamp {
        emit!(RewardVarsUpdated {
            last_reward_timestamp: pool.last_reward_timestamp,
            acc_reward_per_share: pool.acc_reward_per_share,
        });
    }

    ve_token::credit(
        &ctx.accounts.ve_token_program,
        &ctx.accounts.ve_mint,
        &ctx.accounts.user_ve_account,
        pool,
        settlement.credited,
    )?;

    msg!(
        "Claimed {} ve (base {}, speed-up {}, truncated {}). Total credited: {}",
        settlement.credited,
        settlement.base,
        settlement.speed_up,
        settlement.truncated(),
        position.rewards_credited
    );

    emit!(Claimed {
        user: ctx.accounts.user.key(),
        amount: settlement.credited,
        truncated: settlement.truncated(),
        timestamp: now,
    });

    Ok(())
}
