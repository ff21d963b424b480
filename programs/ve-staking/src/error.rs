use anchor_lang::prelude::*;

#[error_code]
pub enum VeStakingError {
    // Amount Errors (6000-6009)
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Cannot withdraw more than the staked balance")]
    InsufficientBalance,

    #[msg("Nothing staked: cannot claim without a staked balance")]
    NothingStaked,

    // Authorization Errors (6010-6019)
    #[msg("Unauthorized: admin only")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Parameter Errors (6020-6029)
    #[msg("Parameter out of range")]
    OutOfRange,

    #[msg("Parameter exceeds its upper limit")]
    LimitExceeded,

    #[msg("New max cap must be greater than the current one")]
    MustIncrease,

    // Math Errors (6030-6039)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors (6040-6049)
    #[msg("Invalid base token mint")]
    InvalidBaseMint,

    #[msg("Invalid ve token mint or mint authority")]
    InvalidVeMint,

    #[msg("Position does not belong to this pool or owner")]
    InvalidPosition,
}
