use anchor_lang::prelude::*;
use crate::constants::ALLOWANCE_SEED;
use crate::states::Allowance;

#[derive(Accounts)]
pub struct Approve<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: Any wallet may be approved as a spender
    pub spender: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Allowance::DISCRIMINATOR.len() + Allowance::INIT_SPACE,
        seeds = [ALLOWANCE_SEED, owner.key().as_ref(), spender.key().as_ref()],
        bump
    )]
    pub allowance: Account<'info, Allowance>,

    pub system_program: Program<'info, System>,
}

impl<'info> Approve<'info> {
    pub fn handle(ctx: Context<Approve>, amount: u64) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        let spender = ctx.accounts.spender.key();

        let allowance = &mut ctx.accounts.allowance;
        allowance.owner = owner;
        allowance.spender = spender;
        allowance.amount = amount;
        allowance.bump = ctx.bumps.allowance;

        if allowance.is_unlimited() {
            msg!("{} approved {} for an unlimited amount", owner, spender);
        } else {
            msg!("{} approved {} for {}", owner, spender, amount);
        }

        emit!(crate::events::ApprovalSet {
            owner,
            spender,
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
