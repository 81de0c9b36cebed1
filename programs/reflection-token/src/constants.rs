// PDA Seeds
pub const TOKEN_CONFIG_SEED: &[u8] = b"token_config";
pub const TOKEN_STATE_SEED: &[u8] = b"token_state";
pub const DISTRIBUTOR_SEED: &[u8] = b"distributor";
pub const LIQUIDITY_POOL_SEED: &[u8] = b"liquidity_pool";
pub const HOLDER_SEED: &[u8] = b"holder";
pub const ALLOWANCE_SEED: &[u8] = b"allowance";
pub const FEE_COLLECTOR_SEED: &[u8] = b"fee_collector";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

// Default fee policy (basis points of FEE_DENOMINATOR)
pub const DEFAULT_LIQUIDITY_FEE: u64 = 200; // 2%
pub const DEFAULT_REWARD_FEE: u64 = 800; // 8%
pub const DEFAULT_MARKETING_FEE: u64 = 400; // 4%
pub const FEE_DENOMINATOR: u64 = 10_000;

// Default rebalance policy
pub const DEFAULT_SWAP_THRESHOLD_DIVISOR: u64 = 2_000; // 0.05% of supply
pub const DEFAULT_TARGET_LIQUIDITY: u64 = 25;
pub const DEFAULT_TARGET_LIQUIDITY_DENOMINATOR: u64 = 100;
pub const DEFAULT_MAX_WALLET_DIVISOR: u64 = 40; // 2.5% of supply
pub const DEFAULT_MAX_SLIPPAGE_BPS: u16 = 500; // 5%
pub const DEFAULT_POOL_FEE_BPS: u16 = 30; // 0.3%
pub const BPS_DENOMINATOR: u64 = 10_000;

// Dividend distribution
/// Fixed-point scale of the dividends-per-share accumulator.
pub const DIVIDEND_ACCURACY: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000; // 10^36
pub const DEFAULT_MIN_PERIOD: i64 = 3_600; // 1 hour between automatic payouts
pub const DISTRIBUTION_BATCH_SIZE: u32 = 10; // holders visited per crank call
