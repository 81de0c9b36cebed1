use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::{Distributor, HolderAccount, TokenConfig, TokenState};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateExemptionsParams {
    /// Flags left as `None` keep their current value
    pub fee_exempt: Option<bool>,
    pub dividend_exempt: Option<bool>,
    pub wallet_limit_exempt: Option<bool>,
}

/// Authority-only exemption flag setter
#[derive(Accounts)]
pub struct UpdateExemptions<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::Unauthorized
    )]
    pub config: Box<Account<'info, TokenConfig>>,

    #[account(
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED],
        bump = distributor.bump,
        realloc = Distributor::space_to_admit_one(&distributor),
        realloc::payer = authority,
        realloc::zero = false
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, holder.owner.as_ref()],
        bump = holder.bump
    )]
    pub holder: Box<Account<'info, HolderAccount>>,

    pub system_program: Program<'info, System>,
}

impl<'info> UpdateExemptions<'info> {
    pub fn handle(ctx: Context<UpdateExemptions>, params: UpdateExemptionsParams) -> Result<()> {
        let token = ctx.accounts.token_state.key();
        let holder = &mut ctx.accounts.holder;
        msg!("Updating exemptions for {}", holder.owner);

        if let Some(fee_exempt) = params.fee_exempt {
            holder.fee_exempt = fee_exempt;
        }
        if let Some(dividend_exempt) = params.dividend_exempt {
            holder.dividend_exempt = dividend_exempt;
        }
        if let Some(wallet_limit_exempt) = params.wallet_limit_exempt {
            holder.wallet_limit_exempt = wallet_limit_exempt;
        }

        let share = holder.dividend_weight();
        ctx.accounts.distributor.set_share(&token, holder, share)?;

        msg!("Fee exempt: {}", holder.fee_exempt);
        msg!("Dividend exempt: {} (share {})", holder.dividend_exempt, share);
        msg!("Wallet limit exempt: {}", holder.wallet_limit_exempt);

        emit!(crate::events::ExemptionsUpdated {
            holder: holder.owner,
            fee_exempt: holder.fee_exempt,
            dividend_exempt: holder.dividend_exempt,
            wallet_limit_exempt: holder.wallet_limit_exempt,
            share,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
