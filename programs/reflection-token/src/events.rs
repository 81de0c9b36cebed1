use anchor_lang::prelude::*;

/// Event emitted when the token is initialized
#[event]
pub struct TokenInitialized {
    /// Token configuration account
    pub config: Pubkey,
    /// Authority holding the initial supply
    pub authority: Pubkey,
    /// Counter-asset mint
    pub counter_mint: Pubkey,
    /// Fixed total supply
    pub total_supply: u64,
    /// Token decimals
    pub decimals: u8,
    /// Total fee over the fee denominator
    pub total_fee: u64,
    pub fee_denominator: u64,
    /// Accumulated fee balance that triggers a rebalance
    pub swap_threshold: u64,
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted when a wallet registers a holder account
#[event]
pub struct HolderRegistered {
    pub owner: Pubkey,
    pub holder_account: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when an allowance is set
#[event]
pub struct ApprovalSet {
    pub owner: Pubkey,
    pub spender: Pubkey,
    /// New allowance, `u64::MAX` for unlimited
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted for every token movement between parties
#[event]
pub struct TokensTransferred {
    /// Sending wallet, or the pool account for buys
    pub from: Pubkey,
    /// Receiving wallet, or the pool account for sells
    pub to: Pubkey,
    /// Amount debited from the sender
    pub amount: u64,
    /// Fee withheld into the program balance
    pub fee: u64,
    /// Amount credited to the recipient
    pub received: u64,
    /// Delegate that spent an allowance, if any
    pub spender: Option<Pubkey>,
    pub timestamp: i64,
}

/// Event emitted when accumulated fees are converted
#[event]
pub struct FeesRebalanced {
    /// Whether liquidity was skipped because the pair was over-liquified
    pub over_liquified: bool,
    /// Fee tokens sold for counter-asset
    pub tokens_swapped: u64,
    /// Counter-asset received from the sale
    pub counter_received: u64,
    /// Fee tokens paired into liquidity
    pub tokens_liquified: u64,
    /// Counter-asset paired into liquidity
    pub counter_liquified: u64,
    /// Liquidity units minted to the auto-liquidity receiver
    pub liquidity_minted: u64,
    pub auto_liquidity_receiver: Pubkey,
    /// Counter-asset deposited as dividends
    pub counter_to_rewards: u64,
    /// Counter-asset sent to the marketing wallet
    pub counter_to_marketing: u64,
    /// Fee tokens left in the program balance
    pub accumulated_fees: u64,
    /// Number of completed rebalances
    pub rebalance_count: u32,
    pub timestamp: i64,
}

/// Event emitted for each dividend payout
#[event]
pub struct DividendPaid {
    pub holder: Pubkey,
    /// Counter-asset token account credited
    pub destination: Pubkey,
    pub amount: u64,
    /// True when the holder claimed, false when paid by the crank
    pub claimed: bool,
    pub timestamp: i64,
}

/// Event emitted for each crank page of dividend processing
#[event]
pub struct DividendCrankPage {
    /// Holders visited this page
    pub visited: u32,
    /// Holders paid this page
    pub paid: u32,
    /// Counter-asset paid this page
    pub page_distributed: u64,
    /// Cursor position after this page
    pub current_index: u32,
    pub shareholder_count: u32,
    pub timestamp: i64,
}

/// Event emitted when liquidity is provided to the pair
#[event]
pub struct LiquiditySeeded {
    pub provider: Pubkey,
    pub tokens_used: u64,
    pub counter_used: u64,
    pub liquidity_minted: u64,
    pub token_reserve: u64,
    pub counter_reserve: u64,
    pub timestamp: i64,
}

/// Event emitted for each swap against the pair
#[event]
pub struct TokensSwapped {
    pub trader: Pubkey,
    /// True for counter-asset to token
    pub is_buy: bool,
    pub amount_in: u64,
    /// Amount delivered to the trader, net of transfer fees
    pub amount_out: u64,
    /// Transfer fee withheld on the token leg
    pub fee: u64,
    pub token_reserve: u64,
    pub counter_reserve: u64,
    pub timestamp: i64,
}

/// Event emitted when a holder's exemptions change
#[event]
pub struct ExemptionsUpdated {
    pub holder: Pubkey,
    pub fee_exempt: bool,
    pub dividend_exempt: bool,
    pub wallet_limit_exempt: bool,
    /// Dividend stake after the update
    pub share: u64,
    pub timestamp: i64,
}
