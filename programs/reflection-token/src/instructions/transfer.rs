use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::pipeline::{Party, TransferPipeline, TransferReceipt};
use crate::states::{Allowance, Distributor, HolderAccount, LiquidityPool, TokenConfig, TokenState};
use super::settlement::{settle_rebalance, RebalanceVaults};

/// Moves tokens from the signer's holder account to another holder account
#[derive(Accounts)]
pub struct TransferTokens<'info> {
    #[account(mut)]
    pub sender: Signer<'info>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, sender.key().as_ref()],
        bump = sender_holder.bump
    )]
    pub sender_holder: Box<Account<'info, HolderAccount>>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, recipient_holder.owner.as_ref()],
        bump = recipient_holder.bump
    )]
    pub recipient_holder: Box<Account<'info, HolderAccount>>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, TokenConfig>>,

    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED],
        bump = distributor.bump,
        realloc = Distributor::space_to_admit_one(&distributor),
        realloc::payer = sender,
        realloc::zero = false
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        mut,
        seeds = [LIQUIDITY_POOL_SEED],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, LiquidityPool>>,

    /// CHECK: Program authority over the counter-asset vaults
    #[account(
        seeds = [FEE_COLLECTOR_SEED],
        bump
    )]
    pub fee_collector: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, config.counter_mint.as_ref()],
        bump,
        token::mint = config.counter_mint,
        token::authority = fee_collector
    )]
    pub pool_counter_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, config.counter_mint.as_ref()],
        bump,
        token::mint = config.counter_mint,
        token::authority = fee_collector
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// Marketing wallet's counter-asset account
    #[account(
        mut,
        token::mint = config.counter_mint,
        constraint = marketing_counter_account.owner == config.marketing_wallet
    )]
    pub marketing_counter_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> TransferTokens<'info> {
    pub fn handle(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
        let from = ctx.accounts.sender.key();
        let to = ctx.accounts.recipient_holder.owner;
        msg!("Transferring {} from {} to {}", amount, from, to);

        let token = ctx.accounts.token_state.key();
        let accounts = &mut *ctx.accounts;
        let receipt = TransferPipeline {
            token,
            config: &accounts.config,
            state: &mut accounts.token_state,
            distributor: &mut accounts.distributor,
            venue: &mut **accounts.pool,
        }.transfer(
            Party::Holder(&mut accounts.sender_holder),
            Party::Holder(&mut accounts.recipient_holder),
            amount,
        )?;

        if let Some(outcome) = receipt.rebalance.as_ref() {
            settle_rebalance(
                outcome,
                &RebalanceVaults {
                    token_program: &accounts.token_program.to_account_info(),
                    fee_collector: &accounts.fee_collector.to_account_info(),
                    fee_collector_bump: ctx.bumps.fee_collector,
                    pool_counter_vault: &accounts.pool_counter_vault.to_account_info(),
                    reward_vault: &accounts.reward_vault.to_account_info(),
                    marketing_counter_account: &accounts.marketing_counter_account.to_account_info(),
                },
                &accounts.config,
                &accounts.token_state,
            )?;
        }

        log_receipt(&receipt);
        emit!(crate::events::TokensTransferred {
            from,
            to,
            amount,
            fee: receipt.fee,
            received: receipt.received,
            spender: None,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

/// Moves tokens on behalf of an owner, spending the signer's allowance
#[derive(Accounts)]
pub struct TransferTokensFrom<'info> {
    #[account(mut)]
    pub spender: Signer<'info>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, owner_holder.owner.as_ref()],
        bump = owner_holder.bump
    )]
    pub owner_holder: Box<Account<'info, HolderAccount>>,

    #[account(
        mut,
        seeds = [ALLOWANCE_SEED, owner_holder.owner.as_ref(), spender.key().as_ref()],
        bump = allowance.bump
    )]
    pub allowance: Box<Account<'info, Allowance>>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, recipient_holder.owner.as_ref()],
        bump = recipient_holder.bump
    )]
    pub recipient_holder: Box<Account<'info, HolderAccount>>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, TokenConfig>>,

    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED],
        bump = distributor.bump,
        realloc = Distributor::space_to_admit_one(&distributor),
        realloc::payer = spender,
        realloc::zero = false
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        mut,
        seeds = [LIQUIDITY_POOL_SEED],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, LiquidityPool>>,

    /// CHECK: Program authority over the counter-asset vaults
    #[account(
        seeds = [FEE_COLLECTOR_SEED],
        bump
    )]
    pub fee_collector: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, config.counter_mint.as_ref()],
        bump,
        token::mint = config.counter_mint,
        token::authority = fee_collector
    )]
    pub pool_counter_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, config.counter_mint.as_ref()],
        bump,
        token::mint = config.counter_mint,
        token::authority = fee_collector
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// Marketing wallet's counter-asset account
    #[account(
        mut,
        token::mint = config.counter_mint,
        constraint = marketing_counter_account.owner == config.marketing_wallet
    )]
    pub marketing_counter_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> TransferTokensFrom<'info> {
    pub fn handle(ctx: Context<TransferTokensFrom>, amount: u64) -> Result<()> {
        let spender = ctx.accounts.spender.key();
        let from = ctx.accounts.owner_holder.owner;
        let to = ctx.accounts.recipient_holder.owner;
        msg!("{} transferring {} from {} to {}", spender, amount, from, to);

        ctx.accounts.allowance.spend(amount)?;
        if !ctx.accounts.allowance.is_unlimited() {
            msg!("Remaining allowance: {}", ctx.accounts.allowance.amount);
        }

        let token = ctx.accounts.token_state.key();
        let accounts = &mut *ctx.accounts;
        let receipt = TransferPipeline {
            token,
            config: &accounts.config,
            state: &mut accounts.token_state,
            distributor: &mut accounts.distributor,
            venue: &mut **accounts.pool,
        }.transfer(
            Party::Holder(&mut accounts.owner_holder),
            Party::Holder(&mut accounts.recipient_holder),
            amount,
        )?;

        if let Some(outcome) = receipt.rebalance.as_ref() {
            settle_rebalance(
                outcome,
                &RebalanceVaults {
                    token_program: &accounts.token_program.to_account_info(),
                    fee_collector: &accounts.fee_collector.to_account_info(),
                    fee_collector_bump: ctx.bumps.fee_collector,
                    pool_counter_vault: &accounts.pool_counter_vault.to_account_info(),
                    reward_vault: &accounts.reward_vault.to_account_info(),
                    marketing_counter_account: &accounts.marketing_counter_account.to_account_info(),
                },
                &accounts.config,
                &accounts.token_state,
            )?;
        }

        log_receipt(&receipt);
        emit!(crate::events::TokensTransferred {
            from,
            to,
            amount,
            fee: receipt.fee,
            received: receipt.received,
            spender: Some(spender),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

pub(crate) fn log_receipt(receipt: &TransferReceipt) {
    msg!("Fee withheld: {}", receipt.fee);
    msg!("Amount received: {}", receipt.received);
    if receipt.rebalance.is_some() {
        msg!("Transfer triggered a rebalance");
    }
}
