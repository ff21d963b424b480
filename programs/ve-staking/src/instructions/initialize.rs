use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{Mint, Token, TokenAccount};
use anchor_spl::token_2022::spl_token_2022::extension::{
    BaseStateWithExtensions, ExtensionType, StateWithExtensions,
};
use anchor_spl::token_2022::spl_token_2022::state::Mint as Token2022Mint;
use anchor_spl::token_interface::Mint as VeMint;

use crate::constants::{STAKE_VAULT_SEED, VE_STAKING_POOL_SEED};
use crate::error::VeStakingError;
use crate::events::PoolInitialized;
use crate::state::{InitializeParams, VeStakingPool};

/// Initialize a new veToken staking pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `params` - Accrual rates, speed-up settings and max cap
///
/// # Accounts
/// * `admin` - The admin who will control this pool (signer, payer)
/// * `pool` - The pool PDA to create
/// * `base_mint` - The token users stake
/// * `ve_mint` - The ve token mint: a Token-2022 mint with the NonTransferable
///   extension whose mint authority is already the pool PDA
/// * `stake_vault` - The vault to hold staked base tokens
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control this pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Pool PDA
    #[account(
        init,
        payer = admin,
        space = VeStakingPool::SIZE,
        seeds = [VE_STAKING_POOL_SEED, base_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, VeStakingPool>,

    /// Token users stake
    pub base_mint: Account<'info, Mint>,

    /// ve token mint (non-transferable, issued only by this pool)
    #[account(
        constraint = ve_mint.key() != base_mint.key() @ VeStakingError::InvalidVeMint
    )]
    pub ve_mint: InterfaceAccount<'info, VeMint>,

    /// Vault to hold staked base tokens
    #[account(
        init,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = base_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();

    // The pool must be the sole issuer of ve tokens
    require!(
        ctx.accounts.ve_mint.mint_authority == COption::Some(pool_key),
        VeStakingError::InvalidVeMint
    );
    require_non_transferable(&ctx.accounts.ve_mint.to_account_info())?;

    let pool = &mut ctx.accounts.pool;

    pool.admin = ctx.accounts.admin.key();
    pool.base_mint = ctx.accounts.base_mint.key();
    pool.ve_mint = ctx.accounts.ve_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.configure(&params, now)?;

    // Store bump seeds
    pool.bump = ctx.bumps.pool;
    pool.stake_vault_bump = ctx.bumps.stake_vault;

    msg!(
        "ve staking pool initialized: base_mint={}, ve_mint={}, max_cap_pct={}",
        pool.base_mint,
        pool.ve_mint,
        pool.max_cap_pct
    );

    emit!(PoolInitialized {
        pool: pool_key,
        admin: pool.admin,
        base_mint: pool.base_mint,
        ve_mint: pool.ve_mint,
        base_rate_per_share_per_sec: pool.base_rate_per_share_per_sec,
        speed_up_rate_per_share_per_sec: pool.speed_up_rate_per_share_per_sec,
        speed_up_threshold_pct: pool.speed_up_threshold_pct,
        speed_up_window_seconds: pool.speed_up_window_seconds,
        max_cap_pct: pool.max_cap_pct,
        timestamp: now,
    });

    Ok(())
}

/// ve must stay in the account it was minted to
fn require_non_transferable(ve_mint: &AccountInfo) -> Result<()> {
    require_keys_eq!(
        *ve_mint.owner,
        anchor_spl::token_2022::ID,
        VeStakingError::InvalidVeMint
    );

    let data = ve_mint.try_borrow_data()?;
    let mint = StateWithExtensions::<Token2022Mint>::unpack(&data)?;
    require!(
        mint.get_extension_types()?
            .contains(&ExtensionType::NonTransferable),
        VeStakingError::InvalidVeMint
    );

    Ok(())
}
