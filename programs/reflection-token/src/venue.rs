use anchor_lang::prelude::*;

/// Amounts actually taken by a liquidity add
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiquidityAdded {
    pub tokens_used: u64,
    pub counter_used: u64,
    pub liquidity_minted: u64,
}

/// Market the token trades against.
///
/// The venue owns the pair's token balance. Tokens credited by a transfer
/// into the pair stay unreserved until a swap consumes them, and only
/// unreserved tokens can be debited by a transfer out of the pair.
pub trait LiquidityVenue {
    /// Total tokens held by the pair, reserved or not
    fn pair_token_balance(&self) -> u64;

    /// Tokens transferred into the pair
    fn credit_pair(&mut self, amount: u64) -> Result<()>;

    /// Tokens transferred out of the pair
    fn debit_pair(&mut self, amount: u64) -> Result<()>;

    /// Counter-asset a swap of `amount_in` tokens would return right now
    fn quote_tokens_for_counter(&self, amount_in: u64) -> Result<u64>;

    /// Sells `amount_in` tokens held outside the pair for counter-asset
    fn swap_tokens_for_counter(&mut self, amount_in: u64, minimum_amount_out: u64) -> Result<u64>;

    /// Adds up to `tokens` and `counter` as liquidity at the current ratio
    fn add_liquidity(&mut self, tokens: u64, counter: u64) -> Result<LiquidityAdded>;
}
