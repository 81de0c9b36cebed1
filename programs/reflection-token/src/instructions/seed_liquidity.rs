use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::pipeline::TransferPipeline;
use crate::states::{Distributor, HolderAccount, LiquidityPool, TokenConfig, TokenState};

/// Authority-only liquidity provision to the pair
#[derive(Accounts)]
pub struct SeedLiquidity<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, authority.key().as_ref()],
        bump = authority_holder.bump
    )]
    pub authority_holder: Box<Account<'info, HolderAccount>>,

    #[account(
        mut,
        token::mint = config.counter_mint,
        token::authority = authority
    )]
    pub authority_counter_account: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::Unauthorized
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
        bump = distributor.bump
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

    pub token_program: Program<'info, Token>,
}

impl<'info> SeedLiquidity<'info> {
    pub fn handle(ctx: Context<SeedLiquidity>, token_amount: u64, counter_amount: u64) -> Result<()> {
        msg!("Seeding liquidity: {} tokens, {} counter", token_amount, counter_amount);

        require!(
            ctx.accounts.authority_counter_account.amount >= counter_amount,
            ErrorCode::InsufficientBalance
        );

        let token = ctx.accounts.token_state.key();
        let accounts = &mut *ctx.accounts;
        let added = TransferPipeline {
            token,
            config: &accounts.config,
            state: &mut accounts.token_state,
            distributor: &mut accounts.distributor,
            venue: &mut **accounts.pool,
        }.provide_liquidity(&mut accounts.authority_holder, token_amount, counter_amount)?;

        anchor_spl::token::transfer(
            CpiContext::new(
                accounts.token_program.to_account_info(),
                anchor_spl::token::Transfer {
                    from: accounts.authority_counter_account.to_account_info(),
                    to: accounts.pool_counter_vault.to_account_info(),
                    authority: accounts.authority.to_account_info(),
                },
            ),
            added.counter_used,
        )?;

        msg!("Liquidity minted: {}", added.liquidity_minted);
        msg!("Reserves: {} tokens, {} counter", accounts.pool.token_reserve, accounts.pool.counter_reserve);

        emit!(crate::events::LiquiditySeeded {
            provider: accounts.authority.key(),
            tokens_used: added.tokens_used,
            counter_used: added.counter_used,
            liquidity_minted: added.liquidity_minted,
            token_reserve: accounts.pool.token_reserve,
            counter_reserve: accounts.pool.counter_reserve,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
