// =============================================================================
// veToken Staking Constants
// =============================================================================

// PDA Seeds
pub const VE_STAKING_POOL_SEED: &[u8] = b"ve_staking_pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const POSITION_SEED: &[u8] = b"position";

// Precision for the accumulator and for per-share-per-second rates (18 decimals)
// A rate of PRECISION means one reward unit per staked unit per second
pub const PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// =============================================================================
// Parameter limits
// =============================================================================

/// Upper bound for both the base and the speed-up rate (scaled by PRECISION)
pub const MAX_RATE_PER_SHARE_PER_SEC: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000; // 10^36

/// Cap percentages are expressed in hundredths of a percent: 10_000 = 100.00%
pub const CAP_PCT_DENOMINATOR: u128 = 10_000;

/// Highest max cap the admin can ever set (100_000.00%)
pub const MAX_CAP_PCT_LIMIT: u64 = 10_000_000;

/// Speed-up threshold is a whole percentage of the pre-deposit balance
pub const MAX_SPEED_UP_THRESHOLD_PCT: u64 = 100;

/// Longest speed-up window accepted at initialization (365 days)
pub const MAX_SPEED_UP_WINDOW_SECONDS: i64 = 365 * 24 * 60 * 60;
