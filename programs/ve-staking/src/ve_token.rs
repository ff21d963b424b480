//! ve token issuance. The pool PDA is the only mint authority, so every ve
//! token in circulation was minted through [`credit`].

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Burn, Mint, MintTo, TokenAccount, TokenInterface};

use crate::constants::VE_STAKING_POOL_SEED;
use crate::state::VeStakingPool;

/// Mint `amount` ve tokens to `to`, signed by the pool
pub fn credit<'info>(
    ve_token_program: &Interface<'info, TokenInterface>,
    ve_mint: &InterfaceAccount<'info, Mint>,
    to: &InterfaceAccount<'info, TokenAccount>,
    pool: &Account<'info, VeStakingPool>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let base_mint = pool.base_mint;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[VE_STAKING_POOL_SEED, base_mint.as_ref(), &bump];
    let signer_seeds = &[seeds];

    token_interface::mint_to(
        CpiContext::new_with_signer(
            ve_token_program.to_account_info(),
            MintTo {
                mint: ve_mint.to_account_info(),
                to: to.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Burn `amount` ve tokens from the owner's account
pub fn burn<'info>(
    ve_token_program: &Interface<'info, TokenInterface>,
    ve_mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    owner: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token_interface::burn(
        CpiContext::new(
            ve_token_program.to_account_info(),
            Burn {
                mint: ve_mint.to_account_info(),
                from: from.to_account_info(),
                authority: owner.to_account_info(),
            },
        ),
        amount,
    )
}
