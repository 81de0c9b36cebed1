use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::ErrorCode;
use crate::math::mul_div;
use crate::states::{Distributor, RebalancePhase, SwapGuard, TokenConfig, TokenState};
use crate::venue::LiquidityVenue;

/// What one rebalance did with the accumulated fee balance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebalanceOutcome {
    pub over_liquified: bool,
    pub tokens_swapped: u64,
    pub counter_received: u64,
    pub tokens_liquified: u64,
    pub counter_liquified: u64,
    pub liquidity_minted: u64,
    pub counter_to_rewards: u64,
    pub counter_to_marketing: u64,
}

/// Whether a transfer should convert the accumulated fees now
pub fn should_rebalance(
    config: &TokenConfig,
    state: &TokenState,
    distributor: &Distributor,
    sender_is_pair: bool,
) -> bool {
    !sender_is_pair
        && !state.is_in_swap()
        && config.swap_enabled
        && state.accumulated_fees >= config.swap_threshold
        && distributor.total_shares > 0
}

fn venue_call<T>(step: &str, result: Result<T>) -> Result<T> {
    result.map_err(|err| {
        msg!("Venue {} failed: {}", step, err);
        ErrorCode::ExternalCallFailed.into()
    })
}

/// Swaps the accumulated fee balance for counter-asset, pairs part of it back
/// into liquidity when the pair is under-provisioned and deposits the reward
/// share into the distributor.
///
/// The caller stages `state`, `distributor` and `venue`; a failure part-way
/// leaves them partially updated.
pub fn rebalance<V: LiquidityVenue>(
    token: &Pubkey,
    config: &TokenConfig,
    state: &mut TokenState,
    distributor: &mut Distributor,
    venue: &mut V,
) -> Result<RebalanceOutcome> {
    let mut guard = SwapGuard::acquire(&mut state.rebalance)?;

    let balance = state.accumulated_fees;
    let fees = &config.fees;
    let over_liquified = config.is_over_liquified(venue.pair_token_balance())?;

    let dynamic_liquidity_fee = if over_liquified { 0 } else { fees.liquidity_fee };
    let tokens_to_liquify = if over_liquified {
        0
    } else {
        fees.split_fee(balance)?.liquidity / 2
    };
    let tokens_to_swap = balance
        .checked_sub(tokens_to_liquify)
        .ok_or(ErrorCode::MathOverflow)?;

    msg!(
        "Rebalancing {} tokens: swap {}, liquify {} (over-liquified: {})",
        balance,
        tokens_to_swap,
        tokens_to_liquify,
        over_liquified
    );

    let quote = venue_call("quote", venue.quote_tokens_for_counter(tokens_to_swap))?;
    let slippage_factor = BPS_DENOMINATOR
        .checked_sub(config.max_slippage_bps as u64)
        .ok_or(ErrorCode::InvalidSlippage)?;
    let minimum_amount_out = mul_div(quote, slippage_factor, BPS_DENOMINATOR)?;
    let counter_received = venue_call(
        "swap",
        venue.swap_tokens_for_counter(tokens_to_swap, minimum_amount_out),
    )?;

    let counter_fee_total = fees.total_fee
        .checked_sub(dynamic_liquidity_fee / 2)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(counter_fee_total > 0, ErrorCode::DivisionByZero);
    let counter_for_liquidity =
        mul_div(counter_received, dynamic_liquidity_fee, counter_fee_total)? / 2;
    let counter_to_rewards = mul_div(counter_received, fees.reward_fee, counter_fee_total)?;

    let (tokens_liquified, counter_liquified, liquidity_minted) =
        if tokens_to_liquify > 0 && counter_for_liquidity > 0 {
            let added = venue_call(
                "add_liquidity",
                venue.add_liquidity(tokens_to_liquify, counter_for_liquidity),
            )?;
            msg!(
                "Added liquidity: {} tokens, {} counter, {} minted to {}",
                added.tokens_used,
                added.counter_used,
                added.liquidity_minted,
                config.auto_liquidity_receiver
            );
            (added.tokens_used, added.counter_used, added.liquidity_minted)
        } else {
            (0, 0, 0)
        };

    // Counter-asset left unpaired falls through to marketing
    let counter_to_marketing = counter_received
        .checked_sub(counter_liquified)
        .and_then(|rest| rest.checked_sub(counter_to_rewards))
        .ok_or(ErrorCode::MathOverflow)?;

    let tokens_spent = tokens_to_swap
        .checked_add(tokens_liquified)
        .ok_or(ErrorCode::MathOverflow)?;
    state.accumulated_fees = balance
        .checked_sub(tokens_spent)
        .ok_or(ErrorCode::MathOverflow)?;

    guard.advance(RebalancePhase::Distributing);
    if counter_to_rewards > 0 {
        distributor.deposit(token, counter_to_rewards)?;
    }

    state.total_tokens_liquified = state.total_tokens_liquified
        .checked_add(tokens_liquified)
        .ok_or(ErrorCode::MathOverflow)?;
    state.total_counter_to_rewards = state.total_counter_to_rewards
        .checked_add(counter_to_rewards)
        .ok_or(ErrorCode::MathOverflow)?;
    state.total_counter_to_marketing = state.total_counter_to_marketing
        .checked_add(counter_to_marketing)
        .ok_or(ErrorCode::MathOverflow)?;
    state.rebalance_count = state.rebalance_count
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    msg!(
        "Rebalance complete: {} counter to rewards, {} to marketing, {} tokens left",
        counter_to_rewards,
        counter_to_marketing,
        state.accumulated_fees
    );

    Ok(RebalanceOutcome {
        over_liquified,
        tokens_swapped: tokens_to_swap,
        counter_received,
        tokens_liquified,
        counter_liquified,
        liquidity_minted,
        counter_to_rewards,
        counter_to_marketing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{FeeConfig, HolderAccount};

    fn config() -> TokenConfig {
        TokenConfig {
            authority: Pubkey::new_unique(),
            counter_mint: Pubkey::new_unique(),
            marketing_wallet: Pubkey::new_unique(),
            auto_liquidity_receiver: Pubkey::new_unique(),
            fees: FeeConfig::new(200, 200, 100, 10_000).unwrap(),
            swap_threshold: 100,
            swap_enabled: true,
            target_liquidity: 25,
            target_liquidity_denominator: 100,
            max_wallet: u64::MAX,
            max_slippage_bps: 500,
            total_supply: 1_000_000,
            decimals: 0,
            bump: 255,
        }
    }

    #[test]
    fn should_rebalance_requires_every_condition() {
        let mut config = config();
        let token = Pubkey::new_unique();
        let mut state = TokenState::new(255);
        let mut distributor = Distributor::new(token, 0, 0, 255);
        let mut holder = HolderAccount::new(Pubkey::new_unique(), 255);
        distributor.set_share(&token, &mut holder, 10).unwrap();

        state.accumulated_fees = 99;
        assert!(!should_rebalance(&config, &state, &distributor, false));

        state.accumulated_fees = 100;
        assert!(should_rebalance(&config, &state, &distributor, false));
        assert!(!should_rebalance(&config, &state, &distributor, true));

        state.rebalance.in_swap = true;
        assert!(!should_rebalance(&config, &state, &distributor, false));
        state.rebalance.in_swap = false;

        config.swap_enabled = false;
        assert!(!should_rebalance(&config, &state, &distributor, false));
        config.swap_enabled = true;

        let empty = Distributor::new(token, 0, 0, 255);
        assert!(!should_rebalance(&config, &state, &empty, false));
    }

    #[test]
    fn over_liquified_threshold() {
        let config = config();
        // backing = 100 * pair * 2 / 1_000_000
        assert!(!config.is_over_liquified(125_000).unwrap());
        assert!(!config.is_over_liquified(129_999).unwrap());
        assert!(config.is_over_liquified(130_000).unwrap());
    }
}
