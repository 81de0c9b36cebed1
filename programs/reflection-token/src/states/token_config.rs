use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::states::FeeConfig;

/// Token configuration, fixed at initialization
#[account]
#[derive(Debug, InitSpace)]
pub struct TokenConfig {
    /// Authority allowed to seed liquidity and manage exemptions
    pub authority: Pubkey,
    /// Mint of the counter-asset the token is paired with and pays dividends in
    pub counter_mint: Pubkey,
    /// Wallet receiving the marketing share of rebalance proceeds
    pub marketing_wallet: Pubkey,
    /// Owner of liquidity added by the rebalancer
    pub auto_liquidity_receiver: Pubkey,
    /// Fee rates
    pub fees: FeeConfig,
    /// Accumulated fee balance that triggers a rebalance
    pub swap_threshold: u64,
    /// Whether automatic rebalancing is enabled
    pub swap_enabled: bool,
    /// Liquidity backing above which the pair counts as over-liquified
    pub target_liquidity: u64,
    /// Denominator for the liquidity backing ratio
    pub target_liquidity_denominator: u64,
    /// Maximum balance for a wallet without the wallet-limit exemption
    pub max_wallet: u64,
    /// Maximum accepted slippage on rebalance swaps, in basis points
    pub max_slippage_bps: u16,
    /// Fixed total supply
    pub total_supply: u64,
    /// Token decimals
    pub decimals: u8,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl TokenConfig {
    pub fn validate(&self) -> Result<()> {
        self.fees.validate()?;
        require!(self.swap_threshold > 0, ErrorCode::InvalidSwapThreshold);
        require!(self.target_liquidity_denominator > 0, ErrorCode::InvalidTargetLiquidity);
        require!(self.max_slippage_bps as u64 <= crate::constants::BPS_DENOMINATOR, ErrorCode::InvalidSlippage);
        Ok(())
    }

    /// Backing of the pair relative to supply, scaled by `target_liquidity_denominator`
    pub fn liquidity_backing(&self, pair_balance: u64) -> Result<u64> {
        let doubled = pair_balance.checked_mul(2).ok_or(ErrorCode::MathOverflow)?;
        if self.total_supply == 0 {
            return Ok(0);
        }
        crate::math::mul_div(self.target_liquidity_denominator, doubled, self.total_supply)
    }

    pub fn is_over_liquified(&self, pair_balance: u64) -> Result<bool> {
        Ok(self.liquidity_backing(pair_balance)? > self.target_liquidity)
    }
}
