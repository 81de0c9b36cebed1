use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not allowed to perform this operation")]
    Unauthorized,
    #[msg("Cannot deposit dividends while no shares exist")]
    DivisionByZero,
    #[msg("Insufficient allowance for transfer")]
    InsufficientAllowance,
    #[msg("Insufficient balance for operation")]
    InsufficientBalance,
    #[msg("Transfer would push the recipient above the wallet limit")]
    LimitExceeded,
    #[msg("Liquidity venue call failed")]
    ExternalCallFailed,
    #[msg("Dividend payout transfer failed")]
    PayoutFailed,
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
    #[msg("Invalid fee configuration - fees must add up and stay below 25%")]
    InvalidFeeConfig,
    #[msg("Swap threshold must be greater than zero")]
    InvalidSwapThreshold,
    #[msg("Target liquidity denominator must be greater than zero")]
    InvalidTargetLiquidity,
    #[msg("Slippage must be at most 10000 bps")]
    InvalidSlippage,
    #[msg("Sender and recipient must differ")]
    SelfTransfer,
    #[msg("A rebalance is already in progress")]
    RebalanceInProgress,
    #[msg("Pool has no liquidity")]
    NoLiquidity,
    #[msg("Output amount below minimum")]
    SlippageExceeded,
    #[msg("Liquidity provision would mint zero pool shares")]
    InsufficientLiquidityMinted,
    #[msg("Holder or dividend token account not provided")]
    DividendAccountNotFound,
    #[msg("Token account mint does not match the counter-asset mint")]
    InvalidCounterMint,
    #[msg("Holder account supplied more than once")]
    DuplicateHolderAccount,
}
