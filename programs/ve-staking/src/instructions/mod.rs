// =============================================================================
// Instructions Module - veToken Staking
// =============================================================================

pub mod admin;
pub mod claim;
pub mod deposit;
pub mod initialize;
pub mod pending_reward;
pub mod update_reward_vars;
pub mod withdraw;

pub use admin::*;
pub use claim::*;
pub use deposit::*;
pub use initialize::*;
pub use pending_reward::*;
pub use update_reward_vars::*;
pub use withdraw::*;
