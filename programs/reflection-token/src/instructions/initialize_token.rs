use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::*;
use crate::states::{Distributor, FeeConfig, HolderAccount, LiquidityPool, TokenConfig, TokenState};

#[derive(Accounts)]
pub struct InitializeToken<'info> {
    /// Authority receiving the whole supply
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Counter-asset mint
    pub counter_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        space = TokenConfig::DISCRIMINATOR.len() + TokenConfig::INIT_SPACE,
        seeds = [TOKEN_CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, TokenConfig>>,

    #[account(
        init,
        payer = authority,
        space = TokenState::DISCRIMINATOR.len() + TokenState::INIT_SPACE,
        seeds = [TOKEN_STATE_SEED],
        bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    #[account(
        init,
        payer = authority,
        space = Distributor::space_for(1),
        seeds = [DISTRIBUTOR_SEED],
        bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        init,
        payer = authority,
        space = LiquidityPool::DISCRIMINATOR.len() + LiquidityPool::INIT_SPACE,
        seeds = [LIQUIDITY_POOL_SEED],
        bump
    )]
    pub pool: Box<Account<'info, LiquidityPool>>,

    #[account(
        init,
        payer = authority,
        space = HolderAccount::DISCRIMINATOR.len() + HolderAccount::INIT_SPACE,
        seeds = [HOLDER_SEED, authority.key().as_ref()],
        bump
    )]
    pub authority_holder: Box<Account<'info, HolderAccount>>,

    /// CHECK: Program authority over the counter-asset vaults
    #[account(
        seeds = [FEE_COLLECTOR_SEED],
        bump
    )]
    pub fee_collector: UncheckedAccount<'info>,

    /// Counter-asset side of the pair
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, counter_mint.key().as_ref()],
        bump,
        token::mint = counter_mint,
        token::authority = fee_collector
    )]
    pub pool_counter_vault: Box<Account<'info, TokenAccount>>,

    /// Counter-asset deposited as dividends and not yet paid out
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, counter_mint.key().as_ref()],
        bump,
        token::mint = counter_mint,
        token::authority = fee_collector
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeTokenParams {
    pub total_supply: u64,
    pub decimals: u8,
    pub liquidity_fee: u64,
    pub reward_fee: u64,
    pub marketing_fee: u64,
    pub fee_denominator: u64,
    pub swap_threshold: u64,
    pub swap_enabled: bool,
    pub target_liquidity: u64,
    pub target_liquidity_denominator: u64,
    pub max_wallet: u64,
    pub max_slippage_bps: u16,
    pub pool_fee_bps: u16,
    /// Minimum seconds between automatic dividend payouts to one holder
    pub min_period: i64,
    /// Minimum unpaid amount for an automatic dividend payout
    pub min_distribution: u64,
    /// Defaults to the authority when left as `Pubkey::default()`
    pub marketing_wallet: Pubkey,
    /// Defaults to the authority when left as `Pubkey::default()`
    pub auto_liquidity_receiver: Pubkey,
}

impl InitializeTokenParams {
    pub fn with_defaults(total_supply: u64, decimals: u8) -> Self {
        Self {
            total_supply,
            decimals,
            liquidity_fee: DEFAULT_LIQUIDITY_FEE,
            reward_fee: DEFAULT_REWARD_FEE,
            marketing_fee: DEFAULT_MARKETING_FEE,
            fee_denominator: FEE_DENOMINATOR,
            swap_threshold: total_supply / DEFAULT_SWAP_THRESHOLD_DIVISOR,
            swap_enabled: true,
            target_liquidity: DEFAULT_TARGET_LIQUIDITY,
            target_liquidity_denominator: DEFAULT_TARGET_LIQUIDITY_DENOMINATOR,
            max_wallet: total_supply / DEFAULT_MAX_WALLET_DIVISOR,
            max_slippage_bps: DEFAULT_MAX_SLIPPAGE_BPS,
            pool_fee_bps: DEFAULT_POOL_FEE_BPS,
            min_period: DEFAULT_MIN_PERIOD,
            min_distribution: 10u64.saturating_pow(decimals as u32),
            marketing_wallet: Pubkey::default(),
            auto_liquidity_receiver: Pubkey::default(),
        }
    }

    /// Builds the configuration account contents
    pub fn to_config(&self, authority: Pubkey, counter_mint: Pubkey, bump: u8) -> Result<TokenConfig> {
        require!(self.pool_fee_bps as u64 <= BPS_DENOMINATOR, ErrorCode::InvalidFeeConfig);

        let or_authority = |key: Pubkey| if key == Pubkey::default() { authority } else { key };
        let config = TokenConfig {
            authority,
            counter_mint,
            marketing_wallet: or_authority(self.marketing_wallet),
            auto_liquidity_receiver: or_authority(self.auto_liquidity_receiver),
            fees: FeeConfig::new(
                self.liquidity_fee,
                self.reward_fee,
                self.marketing_fee,
                self.fee_denominator,
            )?,
            swap_threshold: self.swap_threshold,
            swap_enabled: self.swap_enabled,
            target_liquidity: self.target_liquidity,
            target_liquidity_denominator: self.target_liquidity_denominator,
            max_wallet: self.max_wallet,
            max_slippage_bps: self.max_slippage_bps,
            total_supply: self.total_supply,
            decimals: self.decimals,
            bump,
        };
        config.validate()?;
        Ok(config)
    }
}

impl<'info> InitializeToken<'info> {
    pub fn handle(ctx: Context<InitializeToken>, params: InitializeTokenParams) -> Result<()> {
        msg!("Initializing token with supply {}", params.total_supply);

        let authority = ctx.accounts.authority.key();
        let token_key = ctx.accounts.token_state.key();
        let config = params.to_config(authority, ctx.accounts.counter_mint.key(), ctx.bumps.config)?;

        msg!("Fees: {} / {} ({} liquidity, {} reward, {} marketing)",
            config.fees.total_fee,
            config.fees.fee_denominator,
            config.fees.liquidity_fee,
            config.fees.reward_fee,
            config.fees.marketing_fee
        );
        msg!("Swap threshold: {}", config.swap_threshold);
        msg!("Max wallet: {}", config.max_wallet);

        ctx.accounts.token_state.set_inner(TokenState::new(ctx.bumps.token_state));
        ctx.accounts.pool.set_inner(LiquidityPool::new(params.pool_fee_bps, ctx.bumps.pool));

        let mut distributor = Distributor::new(
            token_key,
            params.min_period,
            params.min_distribution,
            ctx.bumps.distributor,
        );
        let mut holder = HolderAccount::new(authority, ctx.bumps.authority_holder);
        holder.balance = config.total_supply;
        holder.fee_exempt = true;
        holder.wallet_limit_exempt = true;
        let weight = holder.dividend_weight();
        distributor.set_share(&token_key, &mut holder, weight)?;

        ctx.accounts.distributor.set_inner(distributor);
        ctx.accounts.authority_holder.set_inner(holder);

        emit!(crate::events::TokenInitialized {
            config: ctx.accounts.config.key(),
            authority,
            counter_mint: config.counter_mint,
            total_supply: config.total_supply,
            decimals: config.decimals,
            total_fee: config.fees.total_fee,
            fee_denominator: config.fees.fee_denominator,
            swap_threshold: config.swap_threshold,
            timestamp: Clock::get()?.unix_timestamp,
        });

        ctx.accounts.config.set_inner(config);
        msg!("Token initialized, authority {} holds the supply", authority);

        Ok(())
    }
}
