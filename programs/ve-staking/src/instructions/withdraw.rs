use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use anchor_spl::token_interface::{Mint as VeMint, TokenAccount as VeTokenAccount, TokenInterface};

use crate::constants::{POSITION_SEED, STAKE_VAULT_SEED, VE_STAKING_POOL_SEED};
use crate::error::VeStakingError;
use crate::events::{Burned, Claimed, RewardVarsUpdated, Withdrew};
use crate::ledger;
use crate::state::{Position, VeStakingPool};
use crate::ve_token;

/// Unstake base tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of base tokens to unstake
///
/// # Flow
/// 1. Advance the pool accumulator
/// 2. Settle pending ve against the remaining balance and mint it
/// 3. Burn ve held above the cap for the remaining balance
/// 4. Transfer base tokens from stake vault back to user
///
/// Withdrawing always ends any running speed-up window.
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User unstaking their base tokens
    #[account(mut)]
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

    /// Base token mint
    #[account(
        constraint = base_mint.key() == pool.base_mint @ VeStakingError::InvalidBaseMint
    )]
    pub base_mint: Account<'info, Mint>,

    /// User's base token account
    #[account(
        mut,
        token::mint = base_mint,
        token::authority = user
    )]
    pub user_base_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.stake_vault_bump,
        token::mint = base_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

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

    pub token_program: Program<'info, Token>,
    pub ve_token_program: Interface<'info, TokenInterface>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    let last_reward_timestamp = pool.last_reward_timestamp;
    let receipt = ledger::withdraw(pool, position, amount, now)?;

    if pool.last_reward_timestamp != last_reward_timestamp {
        emit!(RewardVarsUpdated {
            last_reward_timestamp: pool.last_reward_timestamp,
            acc_reward_per_share: pool.acc_reward_per_share,
        });
    }

    // Transfer base tokens from stake vault back to user
    // Pool PDA signs as authority
    let base_mint_key = pool.base_mint;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[VE_STAKING_POOL_SEED, base_mint_key.as_ref(), &bump];
    let signer_seeds = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.user_base_account.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    let settlement = receipt.settlement;
    ve_token::credit(
        &ctx.accounts.ve_token_program,
        &ctx.accounts.ve_mint,
        &ctx.accounts.user_ve_account,
        pool,
        settlement.credited,
    )?;

    if settlement.pending() > 0 {
        emit!(Claimed {
            user,
            amount: settlement.credited,
            truncated: settlement.truncated(),
            timestamp: now,
        });
    }

    // Holding was above the cap for the remaining balance
    if receipt.burned > 0 {
        // ve the owner already burned on their own is no longer there to take
        ctx.accounts.user_ve_account.reload()?;
        let burned = receipt.burned.min(ctx.accounts.user_ve_account.amount);

        ve_token::burn(
            &ctx.accounts.ve_token_program,
            &ctx.accounts.ve_mint,
            &ctx.accounts.user_ve_account,
            &ctx.accounts.user,
            burned,
        )?;

        emit!(Burned {
            user,
            amount: burned,
            timestamp: now,
        });
    }

    msg!(
        "Withdrew {}. User remaining: {}, Pool total: {}, ve credited: {}, ve burned: {}",
        amount,
        position.balance,
        pool.total_staked,
        settlement.credited,
        receipt.burned
    );

    emit!(Withdrew {
        user,
        amount,
        balance: position.balance,
        timestamp: now,
    });

    Ok(())
}
