use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::states::{Distributor, HolderAccount, TokenConfig};
use super::settlement::pay_from_vault;

/// Holder-initiated payout of everything owed, ignoring the crank criteria
#[derive(Accounts)]
pub struct ClaimDividend<'info> {
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, holder.key().as_ref()],
        bump = holder_account.bump
    )]
    pub holder_account: Box<Account<'info, HolderAccount>>,

    #[account(
        mut,
        token::mint = config.counter_mint,
        token::authority = holder
    )]
    pub holder_counter_account: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, TokenConfig>>,

    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    /// CHECK: Program authority over the counter-asset vaults
    #[account(
        seeds = [FEE_COLLECTOR_SEED],
        bump
    )]
    pub fee_collector: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, config.counter_mint.as_ref()],
        bump,
        token::mint = config.counter_mint,
        token::authority = fee_collector
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ClaimDividend<'info> {
    pub fn handle(ctx: Context<ClaimDividend>) -> Result<()> {
        let holder = ctx.accounts.holder.key();
        let now = Clock::get()?.unix_timestamp;
        msg!("Claiming dividends for {}", holder);

        let token_program = ctx.accounts.token_program.to_account_info();
        let reward_vault = ctx.accounts.reward_vault.to_account_info();
        let destination = ctx.accounts.holder_counter_account.to_account_info();
        let fee_collector = ctx.accounts.fee_collector.to_account_info();
        let fee_collector_bump = ctx.bumps.fee_collector;

        let accounts = &mut *ctx.accounts;
        let amount = accounts.distributor.distribute_dividend(&mut accounts.holder_account, now, &mut |_: &Pubkey, amount: u64| {
            pay_from_vault(
                &token_program,
                &reward_vault,
                &destination,
                &fee_collector,
                fee_collector_bump,
                amount,
            )
        })?;

        if amount == 0 {
            msg!("Nothing to claim");
            return Ok(());
        }

        msg!("Claimed {}", amount);
        emit!(crate::events::DividendPaid {
            holder,
            destination: accounts.holder_counter_account.key(),
            amount,
            claimed: true,
            timestamp: now,
        });

        Ok(())
    }
}
