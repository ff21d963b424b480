#![allow(dead_code)]

use anchor_lang::prelude::*;
use ve_staking::constants::PRECISION;
use ve_staking::ledger::{self, DepositReceipt, Settlement, WithdrawReceipt};
use ve_staking::state::{AdminCap, InitializeParams, Position, VeStakingPool};

/// One rate unit: one reward unit per staked unit per second
pub const ONE: u128 = PRECISION;

pub fn params() -> InitializeParams {
    InitializeParams {
        base_rate_per_share_per_sec: ONE,
        speed_up_rate_per_share_per_sec: ONE,
        speed_up_threshold_pct: 5,
        speed_up_window_seconds: 50,
        // 100_000.00%, high enough that the cap never binds in scenarios
        max_cap_pct: 10_000_000,
    }
}

#[derive(Clone, Default)]
pub struct User {
    pub position: Position,
    /// ve in the user's token account, mirroring what the mint/burn CPIs would do
    pub holding: u64,
}

/// Pool plus a handful of users, driven through the ledger directly
pub struct Harness {
    pub pool: VeStakingPool,
    pub users: Vec<User>,
}

impl Harness {
    pub fn new(params: InitializeParams, users: usize) -> Self {
        let mut pool = VeStakingPool {
            admin: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            ve_mint: Pubkey::new_unique(),
            ..Default::default()
        };
        pool.configure(&params, 0).unwrap();

        Self {
            pool,
            users: vec![User::default(); users],
        }
    }

    pub fn admin(&self) -> AdminCap {
        self.pool.authorize(&self.pool.admin).unwrap()
    }

    pub fn user(&self, idx: usize) -> &User {
        &self.users[idx]
    }

    pub fn deposit(&mut self, idx: usize, amount: u64, now: i64) -> Result<DepositReceipt> {
        let user = &mut self.users[idx];
        let receipt = ledger::deposit(&mut self.pool, &mut user.position, amount, now)?;
        user.holding += receipt.settlement.credited;
        Ok(receipt)
    }

    pub fn withdraw(&mut self, idx: usize, amount: u64, now: i64) -> Result<WithdrawReceipt> {
        let user = &mut self.users[idx];
        let receipt = ledger::withdraw(&mut self.pool, &mut user.position, amount, now)?;
        user.holding = user.holding + receipt.settlement.credited - receipt.burned;
        Ok(receipt)
    }

    pub fn claim(&mut self, idx: usize, now: i64) -> Result<Settlement> {
        let user = &mut self.users[idx];
        let settlement = ledger::claim(&mut self.pool, &mut user.position, now)?;
        user.holding += settlement.credited;
        Ok(settlement)
    }

    pub fn pending(&self, idx: usize, now: i64) -> Result<Settlement> {
        let user = &self.users[idx];
        ledger::pending_reward(&self.pool, &user.position, now)
    }
}

/// Every field the ledger can write, for before/after comparisons
pub type Snapshot = (u64, u128, i64, u64, u128, i64, i64, u64, u64, u64);

pub fn snapshot(pool: &VeStakingPool, user: &User) -> Snapshot {
    (
        pool.total_staked,
        pool.acc_reward_per_share,
        pool.last_reward_timestamp,
        user.position.balance,
        user.position.reward_debt,
        user.position.last_claim_timestamp,
        user.position.speed_up_end_timestamp,
        user.position.rewards_credited,
        user.position.ve_held,
        pool.max_cap_pct,
    )
}
