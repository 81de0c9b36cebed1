use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::pipeline::{Party, TransferPipeline};
use crate::states::{Distributor, HolderAccount, LiquidityPool, TokenConfig, TokenState};
use super::settlement::{pay_from_vault, settle_rebalance, RebalanceVaults};
use super::transfer::log_receipt;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    /// Counter-asset in, tokens out
    Buy,
    /// Tokens in, counter-asset out
    Sell,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SwapParams {
    pub direction: SwapDirection,
    pub amount_in: u64,
    /// Minimum delivered to the trader, after transfer fees on buys
    pub minimum_amount_out: u64,
}

/// Trade against the pair. The token leg goes through the transfer pipeline.
#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, trader.key().as_ref()],
        bump = trader_holder.bump
    )]
    pub trader_holder: Box<Account<'info, HolderAccount>>,

    #[account(
        mut,
        token::mint = config.counter_mint,
        token::authority = trader
    )]
    pub trader_counter_account: Box<Account<'info, TokenAccount>>,

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
        realloc::payer = trader,
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

impl<'info> Swap<'info> {
    pub fn handle(ctx: Context<Swap>, params: SwapParams) -> Result<()> {
        let trader = ctx.accounts.trader.key();
        msg!("Swap {:?} of {} by {}", params.direction, params.amount_in, trader);

        match params.direction {
            SwapDirection::Buy => Self::buy(ctx, params),
            SwapDirection::Sell => Self::sell(ctx, params),
        }
    }

    fn buy(ctx: Context<Swap>, params: SwapParams) -> Result<()> {
        let token = ctx.accounts.token_state.key();
        let pool_key = ctx.accounts.pool.key();
        let accounts = &mut *ctx.accounts;

        let tokens_out = accounts.pool.swap_counter_for_tokens(params.amount_in, 0)?;
        msg!("Pool quoted {} tokens", tokens_out);

        anchor_spl::token::transfer(
            CpiContext::new(
                accounts.token_program.to_account_info(),
                anchor_spl::token::Transfer {
                    from: accounts.trader_counter_account.to_account_info(),
                    to: accounts.pool_counter_vault.to_account_info(),
                    authority: accounts.trader.to_account_info(),
                },
            ),
            params.amount_in,
        )?;

        let receipt = TransferPipeline {
            token,
            config: &accounts.config,
            state: &mut accounts.token_state,
            distributor: &mut accounts.distributor,
            venue: &mut **accounts.pool,
        }.transfer(Party::Pair, Party::Holder(&mut accounts.trader_holder), tokens_out)?;
        log_receipt(&receipt);

        require!(receipt.received >= params.minimum_amount_out, ErrorCode::SlippageExceeded);

        let timestamp = Clock::get()?.unix_timestamp;
        emit!(crate::events::TokensTransferred {
            from: pool_key,
            to: accounts.trader.key(),
            amount: receipt.amount,
            fee: receipt.fee,
            received: receipt.received,
            spender: None,
            timestamp,
        });
        emit!(crate::events::TokensSwapped {
            trader: accounts.trader.key(),
            is_buy: true,
            amount_in: params.amount_in,
            amount_out: receipt.received,
            fee: receipt.fee,
            token_reserve: accounts.pool.token_reserve,
            counter_reserve: accounts.pool.counter_reserve,
            timestamp,
        });

        Ok(())
    }

    fn sell(ctx: Context<Swap>, params: SwapParams) -> Result<()> {
        let token = ctx.accounts.token_state.key();
        let pool_key = ctx.accounts.pool.key();
        let accounts = &mut *ctx.accounts;

        let receipt = TransferPipeline {
            token,
            config: &accounts.config,
            state: &mut accounts.token_state,
            distributor: &mut accounts.distributor,
            venue: &mut **accounts.pool,
        }.transfer(Party::Holder(&mut accounts.trader_holder), Party::Pair, params.amount_in)?;
        log_receipt(&receipt);

        let token_program = accounts.token_program.to_account_info();
        let fee_collector = accounts.fee_collector.to_account_info();
        let pool_counter_vault = accounts.pool_counter_vault.to_account_info();

        if let Some(outcome) = receipt.rebalance.as_ref() {
            settle_rebalance(
                outcome,
                &RebalanceVaults {
                    token_program: &token_program,
                    fee_collector: &fee_collector,
                    fee_collector_bump: ctx.bumps.fee_collector,
                    pool_counter_vault: &pool_counter_vault,
                    reward_vault: &accounts.reward_vault.to_account_info(),
                    marketing_counter_account: &accounts.marketing_counter_account.to_account_info(),
                },
                &accounts.config,
                &accounts.token_state,
            )?;
        }

        let counter_out = accounts.pool.swap_pending_tokens_for_counter(params.minimum_amount_out)?;
        msg!("Pool paid {} counter", counter_out);

        pay_from_vault(
            &token_program,
            &pool_counter_vault,
            &accounts.trader_counter_account.to_account_info(),
            &fee_collector,
            ctx.bumps.fee_collector,
            counter_out,
        )?;

        let timestamp = Clock::get()?.unix_timestamp;
        emit!(crate::events::TokensTransferred {
            from: accounts.trader.key(),
            to: pool_key,
            amount: receipt.amount,
            fee: receipt.fee,
            received: receipt.received,
            spender: None,
            timestamp,
        });
        emit!(crate::events::TokensSwapped {
            trader: accounts.trader.key(),
            is_buy: false,
            amount_in: params.amount_in,
            amount_out: counter_out,
            fee: receipt.fee,
            token_reserve: accounts.pool.token_reserve,
            counter_reserve: accounts.pool.counter_reserve,
            timestamp,
        });

        Ok(())
    }
}
