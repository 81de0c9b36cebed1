use anchor_lang::prelude::*;
use crate::constants::{DISTRIBUTOR_SEED, TOKEN_STATE_SEED};
use crate::states::{Distributor, TokenState};

/// Query instruction for one holder's dividend position
#[derive(Accounts)]
pub struct QueryUnpaidDividends<'info> {
    /// CHECK: Any wallet may be queried
    pub holder: UncheckedAccount<'info>,

    #[account(
        seeds = [DISTRIBUTOR_SEED],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,
}

/// Response structure for a holder's dividend position
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DividendInfo {
    pub holder: Pubkey,
    /// Dividend stake
    pub share: u64,
    /// Owed now, including amounts locked in by earlier stake changes
    pub unpaid: u64,
    pub total_realised: u64,
    pub last_claim: i64,
}

impl<'info> QueryUnpaidDividends<'info> {
    pub fn handle(ctx: Context<QueryUnpaidDividends>) -> Result<DividendInfo> {
        let holder_account = &ctx.accounts.holder;
        let holder = holder_account.owner;
        let distributor = &ctx.accounts.distributor;
        let record = holder_account.dividends;

        let info = DividendInfo {
            holder,
            share: record.amount,
            unpaid: distributor.unpaid_dividends(holder_account)?,
            total_realised: record.total_realised,
            last_claim: record.last_claim,
        };

        msg!("Dividend info for {}", holder);
        msg!("Share: {}", info.share);
        msg!("Unpaid: {}", info.unpaid);
        msg!("Realised: {}", info.total_realised);

        Ok(info)
    }
}

/// Query instruction for global dividend and fee totals
#[derive(Accounts)]
pub struct QueryDistributor<'info> {
    #[account(
        seeds = [DISTRIBUTOR_SEED],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,
}

/// Response structure for the distributor query
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DistributorInfo {
    pub total_shares: u64,
    pub total_dividends: u64,
    pub total_distributed: u64,
    pub shareholder_count: u32,
    pub current_index: u32,
    /// Fee tokens waiting for the next rebalance
    pub accumulated_fees: u64,
    pub total_fees_collected: u64,
    pub rebalance_count: u32,
}

impl<'info> QueryDistributor<'info> {
    pub fn handle(ctx: Context<QueryDistributor>) -> Result<DistributorInfo> {
        let distributor = &ctx.accounts.distributor;
        let state = &ctx.accounts.token_state;

        let info = DistributorInfo {
            total_shares: distributor.total_shares,
            total_dividends: distributor.total_dividends,
            total_distributed: distributor.total_distributed,
            shareholder_count: distributor.shareholder_count() as u32,
            current_index: distributor.current_index,
            accumulated_fees: state.accumulated_fees,
            total_fees_collected: state.total_fees_collected,
            rebalance_count: state.rebalance_count,
        };

        msg!("Distributor info:");
        msg!("Total shares: {}", info.total_shares);
        msg!("Total dividends: {}", info.total_dividends);
        msg!("Total distributed: {}", info.total_distributed);
        msg!("Shareholders: {}", info.shareholder_count);
        msg!("Accumulated fees: {}", info.accumulated_fees);

        Ok(info)
    }
}
