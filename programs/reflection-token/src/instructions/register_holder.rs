use anchor_lang::prelude::*;
use crate::constants::HOLDER_SEED;
use crate::states::HolderAccount;

#[derive(Accounts)]
pub struct RegisterHolder<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Any wallet may be registered as a holder
    pub owner: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = HolderAccount::DISCRIMINATOR.len() + HolderAccount::INIT_SPACE,
        seeds = [HOLDER_SEED, owner.key().as_ref()],
        bump
    )]
    pub holder: Account<'info, HolderAccount>,

    pub system_program: Program<'info, System>,
}

impl<'info> RegisterHolder<'info> {
    pub fn handle(ctx: Context<RegisterHolder>) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        ctx.accounts.holder.set_inner(HolderAccount::new(owner, ctx.bumps.holder));

        msg!("Registered holder account for {}", owner);

        emit!(crate::events::HolderRegistered {
            owner,
            holder_account: ctx.accounts.holder.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
