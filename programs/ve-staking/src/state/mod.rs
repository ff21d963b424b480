pub mod position;
pub mod ve_staking_pool;

pub use position::*;
pub use ve_staking_pool::*;
