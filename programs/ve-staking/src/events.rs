use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub base_mint: Pubkey,
    pub ve_mint: Pubkey,
    pub base_rate_per_share_per_sec: u128,
    pub speed_up_rate_per_share_per_sec: u128,
    pub speed_up_threshold_pct: u64,
    pub speed_up_window_seconds: i64,
    pub max_cap_pct: u64,
    pub timestamp: i64,
}

#[event]
pub struct Deposited {
    pub user: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub speed_up_end_timestamp: i64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrew {
    pub user: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct Claimed {
    pub user: Pubkey,
    pub amount: u64,
    /// Pending reward that did not fit under the cap
    pub truncated: u64,
    pub timestamp: i64,
}

#[event]
pub struct Burned {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardVarsUpdated {
    pub last_reward_timestamp: i64,
    pub acc_reward_per_share: u128,
}

#[event]
pub struct BaseRateUpdated {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[event]
pub struct SpeedUpRateUpdated {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[event]
pub struct SpeedUpThresholdUpdated {
    pub old_threshold_pct: u64,
    pub new_threshold_pct: u64,
}

#[event]
pub struct MaxCapPctUpdated {
    pub old_max_cap_pct: u64,
    pub new_max_cap_pct: u64,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
