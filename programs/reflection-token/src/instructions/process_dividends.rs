use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::{Distributor, HolderAccount, TokenConfig};
use super::settlement::pay_from_vault;

/// Permissionless round-robin dividend crank.
///
/// Remaining accounts, in any order:
/// - the writable `HolderAccount` of every shareholder the page visits,
///   starting at `current_index`;
/// - the counter-asset token account of each visited holder that is due a
///   payout.
///
/// `iterations` is capped at the number of holder accounts supplied. A due
/// holder without a counter-asset token account fails the page and leaves the
/// cursor where it was. Anyone can unblock it by creating that holder's
/// associated token account for the counter-asset mint and cranking again.
#[derive(Accounts)]
pub struct ProcessDividends<'info> {
    pub cranker: Signer<'info>,

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

/// Reads the owner of a counter-asset token account passed as a remaining account
fn destination_owner(info: &AccountInfo, counter_mint: &Pubkey) -> Result<Pubkey> {
    require_keys_eq!(*info.owner, anchor_spl::token::ID, ErrorCode::DividendAccountNotFound);
    let data = info.try_borrow_data()?;
    let account = TokenAccount::try_deserialize(&mut &data[..])?;
    require_keys_eq!(account.mint, *counter_mint, ErrorCode::InvalidCounterMint);
    Ok(account.owner)
}

/// Reads a holder account passed as a remaining account
fn load_holder(info: &AccountInfo) -> Result<HolderAccount> {
    require_keys_eq!(*info.owner, crate::ID, ErrorCode::DividendAccountNotFound);
    require!(info.is_writable, anchor_lang::error::ErrorCode::AccountNotMutable);

    let holder = {
        let data = info.try_borrow_data()?;
        HolderAccount::try_deserialize(&mut &data[..])?
    };
    let expected = Pubkey::create_program_address(
        &[HOLDER_SEED, holder.owner.as_ref(), &[holder.bump]],
        &crate::ID,
    )
    .map_err(|_| anchor_lang::error::ErrorCode::ConstraintSeeds)?;
    require_keys_eq!(*info.key, expected, anchor_lang::error::ErrorCode::ConstraintSeeds);
    Ok(holder)
}

fn store_holder(info: &AccountInfo, holder: &HolderAccount) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let dst: &mut [u8] = &mut data;
    let mut writer = std::io::Cursor::new(dst);
    holder.try_serialize(&mut writer)
}

impl<'info> ProcessDividends<'info> {
    pub fn handle(ctx: Context<'_, '_, '_, 'info, ProcessDividends<'info>>, iterations: u32) -> Result<()> {
        let iterations = if iterations == 0 { DISTRIBUTION_BATCH_SIZE } else { iterations };
        let now = Clock::get()?.unix_timestamp;
        msg!("Processing dividends: {} iterations from index {}", iterations, ctx.accounts.distributor.current_index);

        let counter_mint = ctx.accounts.config.counter_mint;
        let mut holder_infos = Vec::new();
        let mut holders: Vec<HolderAccount> = Vec::new();
        let mut destinations = Vec::new();
        for info in ctx.remaining_accounts.iter() {
            if *info.owner == crate::ID {
                let holder = load_holder(info)?;
                require!(
                    !holders.iter().any(|known| known.owner == holder.owner),
                    ErrorCode::DuplicateHolderAccount
                );
                holder_infos.push(info);
                holders.push(holder);
            } else {
                destinations.push((destination_owner(info, &counter_mint)?, info.clone()));
            }
        }
        let iterations = iterations.min(holders.len() as u32);
        msg!("{} holder accounts, {} destinations supplied", holders.len(), destinations.len());

        let token_program = ctx.accounts.token_program.to_account_info();
        let fee_collector = ctx.accounts.fee_collector.to_account_info();
        let reward_vault = ctx.accounts.reward_vault.to_account_info();
        let fee_collector_bump = ctx.bumps.fee_collector;

        let distributor = &mut ctx.accounts.distributor;
        let page = distributor.process(iterations, now, &mut holders, |holder, amount| {
            let destination = destinations
                .iter()
                .find(|(owner, _)| owner == holder)
                .map(|(_, info)| info)
                .ok_or(ErrorCode::DividendAccountNotFound)?;

            msg!("Paying {} to {}", amount, holder);
            pay_from_vault(
                &token_program,
                &reward_vault,
                destination,
                &fee_collector,
                fee_collector_bump,
                amount,
            )?;

            emit!(crate::events::DividendPaid {
                holder: *holder,
                destination: *destination.key,
                amount,
                claimed: false,
                timestamp: now,
            });
            Ok(())
        })?;

        for (info, holder) in holder_infos.iter().zip(holders.iter()) {
            store_holder(info, holder)?;
        }

        let page_distributed = page.payouts.iter().map(|(_, amount)| *amount).sum::<u64>();
        msg!("Visited {} holders, paid {} ({} total)", page.visited, page.payouts.len(), page_distributed);
        msg!("Lifetime distributed: {}", distributor.total_distributed);

        emit!(crate::events::DividendCrankPage {
            visited: page.visited,
            paid: page.payouts.len() as u32,
            page_distributed,
            current_index: distributor.current_index,
            shareholder_count: distributor.shareholder_count() as u32,
            timestamp: now,
        });

        Ok(())
    }
}
