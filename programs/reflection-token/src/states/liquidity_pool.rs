use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::ErrorCode;
use crate::math::{integer_sqrt, mul_div};
use crate::venue::{LiquidityAdded, LiquidityVenue};

/// Constant-product pair between the token and the counter-asset
#[account]
#[derive(Debug, InitSpace)]
pub struct LiquidityPool {
    /// Tokens held by the pair, including unswapped sell input
    pub token_balance: u64,
    /// Tokens backing the curve
    pub token_reserve: u64,
    /// Counter-asset backing the curve
    pub counter_reserve: u64,
    /// Outstanding liquidity units
    pub lp_supply: u64,
    /// Swap fee on the input amount, in basis points
    pub fee_bps: u16,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl LiquidityPool {
    pub fn new(fee_bps: u16, bump: u8) -> Self {
        Self {
            token_balance: 0,
            token_reserve: 0,
            counter_reserve: 0,
            lp_supply: 0,
            fee_bps,
            bump,
        }
    }

    /// Tokens transferred into the pair and not yet swapped
    pub fn pending_tokens(&self) -> u64 {
        self.token_balance.saturating_sub(self.token_reserve)
    }

    pub fn get_amount_out(&self, amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
        require!(reserve_in > 0 && reserve_out > 0, ErrorCode::NoLiquidity);

        let fee_factor = BPS_DENOMINATOR
            .checked_sub(self.fee_bps as u64)
            .ok_or(ErrorCode::MathOverflow)?;
        let amount_in_after_fee = mul_div(amount_in, fee_factor, BPS_DENOMINATOR)?;

        // x * y = k
        let numerator = (amount_in_after_fee as u128)
            .checked_mul(reserve_out as u128)
            .ok_or(ErrorCode::MathOverflow)?;
        let denominator = (reserve_in as u128)
            .checked_add(amount_in_after_fee as u128)
            .ok_or(ErrorCode::MathOverflow)?;
        let out = numerator
            .checked_div(denominator)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(u64::try_from(out).map_err(|_| ErrorCode::MathOverflow)?)
    }

    /// Buys tokens with `counter_in`. The bought tokens stay in the pair
    /// unreserved until a transfer out of the pair delivers them.
    pub fn swap_counter_for_tokens(&mut self, counter_in: u64, minimum_amount_out: u64) -> Result<u64> {
        let out = self.get_amount_out(counter_in, self.counter_reserve, self.token_reserve)?;
        require!(out >= minimum_amount_out, ErrorCode::SlippageExceeded);

        self.counter_reserve = self.counter_reserve
            .checked_add(counter_in)
            .ok_or(ErrorCode::MathOverflow)?;
        self.token_reserve = self.token_reserve
            .checked_sub(out)
            .ok_or(ErrorCode::NoLiquidity)?;
        Ok(out)
    }

    /// Sells every token transferred into the pair since the last swap
    pub fn swap_pending_tokens_for_counter(&mut self, minimum_amount_out: u64) -> Result<u64> {
        let pending = self.pending_tokens();
        require!(pending > 0, ErrorCode::InsufficientBalance);

        let out = self.get_amount_out(pending, self.token_reserve, self.counter_reserve)?;
        require!(out >= minimum_amount_out, ErrorCode::SlippageExceeded);

        self.token_reserve = self.token_balance;
        self.counter_reserve = self.counter_reserve
            .checked_sub(out)
            .ok_or(ErrorCode::NoLiquidity)?;
        Ok(out)
    }

    fn deposit_tokens(&mut self, amount: u64) -> Result<()> {
        self.token_balance = self.token_balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.token_reserve = self.token_reserve
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}

impl LiquidityVenue for LiquidityPool {
    fn pair_token_balance(&self) -> u64 {
        self.token_balance
    }

    fn credit_pair(&mut self, amount: u64) -> Result<()> {
        self.token_balance = self.token_balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    fn debit_pair(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.pending_tokens(), ErrorCode::InsufficientBalance);
        self.token_balance -= amount;
        Ok(())
    }

    fn quote_tokens_for_counter(&self, amount_in: u64) -> Result<u64> {
        self.get_amount_out(amount_in, self.token_reserve, self.counter_reserve)
    }

    fn swap_tokens_for_counter(&mut self, amount_in: u64, minimum_amount_out: u64) -> Result<u64> {
        let out = self.quote_tokens_for_counter(amount_in)?;
        require!(out >= minimum_amount_out, ErrorCode::SlippageExceeded);

        self.deposit_tokens(amount_in)?;
        self.counter_reserve = self.counter_reserve
            .checked_sub(out)
            .ok_or(ErrorCode::NoLiquidity)?;
        Ok(out)
    }

    fn add_liquidity(&mut self, tokens: u64, counter: u64) -> Result<LiquidityAdded> {
        let added = if self.lp_supply == 0 {
            let minted = integer_sqrt((tokens as u128) * (counter as u128));
            LiquidityAdded {
                tokens_used: tokens,
                counter_used: counter,
                liquidity_minted: u64::try_from(minted).map_err(|_| ErrorCode::MathOverflow)?,
            }
        } else {
            require!(self.token_reserve > 0 && self.counter_reserve > 0, ErrorCode::NoLiquidity);

            let counter_optimal = mul_div(tokens, self.counter_reserve, self.token_reserve)?;
            let (tokens_used, counter_used) = if counter_optimal <= counter {
                (tokens, counter_optimal)
            } else {
                (mul_div(counter, self.token_reserve, self.counter_reserve)?, counter)
            };

            let by_tokens = mul_div(tokens_used, self.lp_supply, self.token_reserve)?;
            let by_counter = mul_div(counter_used, self.lp_supply, self.counter_reserve)?;
            LiquidityAdded {
                tokens_used,
                counter_used,
                liquidity_minted: by_tokens.min(by_counter),
            }
        };
        require!(added.liquidity_minted > 0, ErrorCode::InsufficientLiquidityMinted);

        self.deposit_tokens(added.tokens_used)?;
        self.counter_reserve = self.counter_reserve
            .checked_add(added.counter_used)
            .ok_or(ErrorCode::MathOverflow)?;
        self.lp_supply = self.lp_supply
            .checked_add(added.liquidity_minted)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(added)
    }
}
