use anchor_lang::prelude::*;

use crate::constants::FEE_COLLECTOR_SEED;
use crate::events::FeesRebalanced;
use crate::rebalancer::RebalanceOutcome;
use crate::states::{TokenConfig, TokenState};

/// Moves counter-asset out of a program vault owned by the fee collector
pub fn pay_from_vault<'info>(
    token_program: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
    fee_collector: &AccountInfo<'info>,
    fee_collector_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    anchor_spl::token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            anchor_spl::token::Transfer {
                from: vault.clone(),
                to: destination.clone(),
                authority: fee_collector.clone(),
            },
            &[&[
                FEE_COLLECTOR_SEED,
                &[fee_collector_bump]
            ]]
        ),
        amount,
    )
}

/// Vault accounts a rebalance settles against
pub struct RebalanceVaults<'a, 'info> {
    pub token_program: &'a AccountInfo<'info>,
    pub fee_collector: &'a AccountInfo<'info>,
    pub fee_collector_bump: u8,
    pub pool_counter_vault: &'a AccountInfo<'info>,
    pub reward_vault: &'a AccountInfo<'info>,
    pub marketing_counter_account: &'a AccountInfo<'info>,
}

/// Pays out the counter-asset a rebalance took from the pair: the reward
/// share into the reward vault and the rest to marketing. Liquidity counter
/// never leaves the pool vault.
pub fn settle_rebalance(
    outcome: &RebalanceOutcome,
    vaults: &RebalanceVaults<'_, '_>,
    config: &TokenConfig,
    state: &TokenState,
) -> Result<()> {
    msg!("Settling rebalance: {} counter to rewards", outcome.counter_to_rewards);
    pay_from_vault(
        vaults.token_program,
        vaults.pool_counter_vault,
        vaults.reward_vault,
        vaults.fee_collector,
        vaults.fee_collector_bump,
        outcome.counter_to_rewards,
    )?;

    msg!("Settling rebalance: {} counter to marketing", outcome.counter_to_marketing);
    pay_from_vault(
        vaults.token_program,
        vaults.pool_counter_vault,
        vaults.marketing_counter_account,
        vaults.fee_collector,
        vaults.fee_collector_bump,
        outcome.counter_to_marketing,
    )?;

    emit!(FeesRebalanced {
        over_liquified: outcome.over_liquified,
        tokens_swapped: outcome.tokens_swapped,
        counter_received: outcome.counter_received,
        tokens_liquified: outcome.tokens_liquified,
        counter_liquified: outcome.counter_liquified,
        liquidity_minted: outcome.liquidity_minted,
        auto_liquidity_receiver: config.auto_liquidity_receiver,
        counter_to_rewards: outcome.counter_to_rewards,
        counter_to_marketing: outcome.counter_to_marketing,
        accumulated_fees: state.accumulated_fees,
        rebalance_count: state.rebalance_count,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
