use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod state;
pub mod ve_token;

use instructions::*;
use state::InitializeParams;

// Program ID - will be updated after first deploy
declare_id!("GnptBQuorVJ4Tnp2UfukRpTngHK9L2Nx1MqfGZEG7ePZ");

#[program]
pub mod ve_staking {
    use super::*;

    /// Initialize a new veToken staking pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `params` - Rates, speed-up settings and max cap
    ///
    /// # Accounts
    /// * `admin` - Pool admin (signer, payer)
    /// * `pool` - Pool PDA to create
    /// * `base_mint` - Token users stake
    /// * `ve_mint` - Non-transferable Token-2022 ve mint, mint authority already set to the pool PDA
    /// * `stake_vault` - Vault to hold staked base tokens
    ///
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, params)
    }

    /// Stake base tokens, settling pending ve first
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of base tokens to stake
    ///
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Unstake base tokens, ending any speed-up window
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of base tokens to unstake
    ///
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, amount)
    }

    /// Claim accrued ve tokens
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler_claim(ctx)
    }

    /// Advance the reward accumulator (anyone may call)
    pub fn update_reward_vars(ctx: Context<UpdateRewardVars>) -> Result<()> {
        instructions::update_reward_vars::handler_update_reward_vars(ctx)
    }

    /// ve tokens a claim would mint right now (returned via return data)
    pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
        instructions::pending_reward::handler_pending_reward(ctx)
    }

    /// Set the base rate per share per second (admin only)
    pub fn set_base_rate(ctx: Context<UpdateParams>, rate: u128) -> Result<()> {
        instructions::admin::set_base_rate(ctx, rate)
    }

    /// Set the speed-up rate per share per second (admin only)
    pub fn set_speed_up_rate(ctx: Context<UpdateParams>, rate: u128) -> Result<()> {
        instructions::admin::set_speed_up_rate(ctx, rate)
    }

    /// Set the speed-up deposit threshold, 1-100% (admin only)
    pub fn set_speed_up_threshold(ctx: Context<UpdateParams>, threshold_pct: u64) -> Result<()> {
        instructions::admin::set_speed_up_threshold(ctx, threshold_pct)
    }

    /// Raise the max cap (admin only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `max_cap_pct` - New cap in hundredths of a percent; must exceed the current one
    ///
    pub fn set_max_cap_pct(ctx: Context<UpdateParams>, max_cap_pct: u64) -> Result<()> {
        instructions::admin::set_max_cap_pct(ctx, max_cap_pct)
    }

    /// Transfer admin rights to a new address (admin only)
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::admin::transfer_admin(ctx)
    }
}
