use anchor_lang::prelude::*;

declare_id!("8b5YbU2Rsw9HTQrZsuJtovgsy4BiC5yWaRGgyXN9s3Dz");

pub mod instructions;
pub mod errors;
pub mod constants;
pub mod states;
pub mod events;
pub mod math;
pub mod venue;
pub mod rebalancer;
pub mod pipeline;

pub use instructions::*;
pub use events::*;

#[program]
pub mod reflection_token {
    use super::*;

    pub fn initialize_token(ctx: Context<InitializeToken>, params: InitializeTokenParams) -> Result<()> {
        InitializeToken::handle(ctx, params)
    }

    pub fn register_holder(ctx: Context<RegisterHolder>) -> Result<()> {
        RegisterHolder::handle(ctx)
    }

    pub fn approve(ctx: Context<Approve>, amount: u64) -> Result<()> {
        Approve::handle(ctx, amount)
    }

    pub fn transfer(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
        TransferTokens::handle(ctx, amount)
    }

    pub fn transfer_from(ctx: Context<TransferTokensFrom>, amount: u64) -> Result<()> {
        TransferTokensFrom::handle(ctx, amount)
    }

    pub fn seed_liquidity(ctx: Context<SeedLiquidity>, token_amount: u64, counter_amount: u64) -> Result<()> {
        SeedLiquidity::handle(ctx, token_amount, counter_amount)
    }

    pub fn swap(ctx: Context<Swap>, params: SwapParams) -> Result<()> {
        Swap::handle(ctx, params)
    }

    pub fn process_dividends<'info>(
        ctx: Context<'_, '_, '_, 'info, ProcessDividends<'info>>,
        iterations: u32
    ) -> Result<()> {
        ProcessDividends::handle(ctx, iterations)
    }

    pub fn claim_dividend(ctx: Context<ClaimDividend>) -> Result<()> {
        ClaimDividend::handle(ctx)
    }

    pub fn update_exemptions(ctx: Context<UpdateExemptions>, params: UpdateExemptionsParams) -> Result<()> {
        UpdateExemptions::handle(ctx, params)
    }

    pub fn query_unpaid_dividends(ctx: Context<QueryUnpaidDividends>) -> Result<DividendInfo> {
        QueryUnpaidDividends::handle(ctx)
    }

    pub fn query_distributor(ctx: Context<QueryDistributor>) -> Result<DistributorInfo> {
        QueryDistributor::handle(ctx)
    }
}
