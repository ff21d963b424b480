use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use anchor_spl::token_interface::{Mint as VeMint, TokenAccount as VeTokenAccount, TokenInterface};

use crate::constants::{POSITION_SEED, STAKE_VAULT_SEED, VE_STAKING_POOL_SEED};
use crate::error::VeStakingError;
use crate::events::{Claimed, Deposited, RewardVarsUpdated};
use crate::ledger;
use crate::state::{Position, VeStakingPool};
use crate::ve_token;

/// Stake base tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of base tokens to stake
///
/// # Flow
/// 1. Advance the pool accumulator
/// 2. Settle pending ve (base + speed-up, capped) and mint it
/// 3. Open a speed-up window if the deposit is large enough
/// 4. Transfer base tokens from user to stake vault
///
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// User staking their base tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [VE_STAKING_POOL_SEED, pool.base_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, VeStakingPool>,

    /// User's position (created on first deposit)
    #[account(
        init_if_needed,
        payer = user,
        space = Position::SIZE,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub ve_token_program: Interface<'info, TokenInterface>,
}

pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    // Fresh account from init_if_needed
    if position.owner == Pubkey::default() {
        position.pool = pool.key();
        position.owner = user;
        position.bump = ctx.bumps.position;
    }

    let last_reward_timestamp = pool.last_reward_timestamp;
    let receipt = ledger::deposit(pool, position, amount, now)?;

    if pool.last_reward_timestamp != last_reward_timestamp {
        emit!(RewardVarsUpdated {
            last_reward_timestamp: pool.last_reward_timestamp,
            acc_reward_per_share: pool.acc_reward_per_share,
        });
    }

    // Transfer base tokens from user to stake vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_base_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
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

    msg!(
        "Deposited {}. User total: {}, Pool total: {}, ve credited: {}, speed-up until: {}",
        amount,
        position.balance,
        pool.total_staked,
        settlement.credited,
        position.speed_up_end_timestamp
    );

    emit!(Deposited {
        user,
        amount,
        balance: position.balance,
        speed_up_end_timestamp: position.speed_up_end_timestamp,
        timestamp: now,
    });

    Ok(())
}
