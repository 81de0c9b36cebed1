use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::constants::DIVIDEND_ACCURACY;
use crate::errors::ErrorCode;
use crate::math::{mul_div_u256, u256_to_u64};
use crate::states::HolderAccount;

/// Dividend position of a single holder, stored on the holder's own account
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct ShareRecord {
    /// Current stake used for dividend weighting
    pub amount: u64,
    /// Cumulative dividends already attributed when `amount` last changed
    pub total_excluded: u64,
    /// Dividends accrued under a previous stake, still owed to the holder
    pub pending_dividends: u64,
    /// Lifetime dividends paid to this holder
    pub total_realised: u64,
    /// Timestamp of the last payout
    pub last_claim: i64,
}

/// Dividend accountant and the enumerable set of shareholders.
///
/// Per-holder positions live on each `HolderAccount`; this account only
/// carries the totals, the accumulator and the round-robin order. It is
/// resized as the set grows.
#[account]
#[derive(Debug)]
pub struct Distributor {
    /// Key of the transfer pipeline, the only caller allowed to change shares
    pub token: Pubkey,
    /// Sum of all stakes
    pub total_shares: u64,
    /// Lifetime counter-asset deposited for distribution
    pub total_dividends: u64,
    /// Lifetime counter-asset paid out
    pub total_distributed: u64,
    /// Dividends per share scaled by DIVIDEND_ACCURACY, as little-endian limbs
    pub dividends_per_share: [u64; 4],
    /// Round-robin cursor into `shareholders`
    pub current_index: u32,
    /// Minimum seconds between automatic payouts to one holder
    pub min_period: i64,
    /// Minimum unpaid amount for an automatic payout
    pub min_distribution: u64,
    /// Bump seed for the PDA
    pub bump: u8,
    /// Holders with a nonzero stake
    pub shareholders: Vec<Pubkey>,
}

/// Result of one round-robin crank
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistributionPage {
    /// Holders visited
    pub visited: u32,
    /// Payouts made, in visiting order
    pub payouts: Vec<(Pubkey, u64)>,
}

impl Distributor {
    pub const BASE_SPACE: usize = 8 // discriminator
        + 32 // token
        + 8 * 3 // totals
        + 32 // dividends_per_share
        + 4 // current_index
        + 8 + 8 // distribution criteria
        + 1 // bump
        + 4; // shareholders length prefix

    /// Account size holding `shareholders` entries
    pub fn space_for(shareholders: usize) -> usize {
        Self::BASE_SPACE + shareholders * 32
    }

    /// Size the account must have before an instruction that may add one
    /// shareholder. Never shrinks the account.
    pub fn space_to_admit_one(account: &Account<Distributor>) -> usize {
        Self::space_for(account.shareholders.len() + 1).max(account.to_account_info().data_len())
    }

    pub fn new(token: Pubkey, min_period: i64, min_distribution: u64, bump: u8) -> Self {
        Self {
            token,
            total_shares: 0,
            total_dividends: 0,
            total_distributed: 0,
            dividends_per_share: [0; 4],
            current_index: 0,
            min_period,
            min_distribution,
            bump,
            shareholders: Vec::new(),
        }
    }

    pub fn dividends_per_share(&self) -> U256 {
        U256::from_limbs(self.dividends_per_share)
    }

    pub fn shareholder_count(&self) -> usize {
        self.shareholders.len()
    }

    /// Sets the dividend stake of `holder`.
    ///
    /// Dividends accrued under the previous stake are locked into the
    /// holder's `pending_dividends` before the baseline is refreshed, so a
    /// stake change never reprices past rewards. Every check runs before the
    /// first write.
    pub fn set_share(&mut self, caller: &Pubkey, holder: &mut HolderAccount, amount: u64) -> Result<()> {
        require_keys_eq!(*caller, self.token, ErrorCode::Unauthorized);

        let record = holder.dividends;
        if record.amount == 0 && amount == 0 {
            return Ok(());
        }

        let pending = record.pending_dividends
            .checked_add(self.accrued_since_baseline(&record)?)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_shares = self.total_shares
            .checked_sub(record.amount)
            .and_then(|rest| rest.checked_add(amount))
            .ok_or(ErrorCode::MathOverflow)?;
        let total_excluded = self.cumulative_dividends(amount)?;

        if record.amount == 0 {
            self.shareholders.push(holder.owner);
        } else if amount == 0 {
            self.remove_shareholder(&holder.owner);
        }

        holder.dividends = ShareRecord {
            amount,
            total_excluded,
            pending_dividends: pending,
            ..record
        };
        self.total_shares = total_shares;
        Ok(())
    }

    /// Records new rewards and raises dividends-per-share
    pub fn deposit(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*caller, self.token, ErrorCode::Unauthorized);
        require!(self.total_shares > 0, ErrorCode::DivisionByZero);

        let total_dividends = self.total_dividends
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let increment = mul_div_u256(
            U256::from(amount),
            U256::from(DIVIDEND_ACCURACY),
            U256::from(self.total_shares),
        )?;
        let dividends_per_share = self.dividends_per_share()
            .checked_add(increment)
            .ok_or(ErrorCode::MathOverflow)?;

        self.total_dividends = total_dividends;
        self.dividends_per_share = dividends_per_share.into_limbs();
        Ok(())
    }

    /// Lifetime dividend entitlement of a stake of `amount`
    pub fn cumulative_dividends(&self, amount: u64) -> Result<u64> {
        let value = mul_div_u256(
            U256::from(amount),
            self.dividends_per_share(),
            U256::from(DIVIDEND_ACCURACY),
        )?;
        u256_to_u64(value)
    }

    pub fn unpaid_dividends(&self, holder: &HolderAccount) -> Result<u64> {
        let record = &holder.dividends;
        Ok(record.pending_dividends
            .checked_add(self.accrued_since_baseline(record)?)
            .ok_or(ErrorCode::MathOverflow)?)
    }

    fn accrued_since_baseline(&self, record: &ShareRecord) -> Result<u64> {
        if record.amount == 0 {
            return Ok(0);
        }
        let cumulative = self.cumulative_dividends(record.amount)?;
        Ok(cumulative.saturating_sub(record.total_excluded))
    }

    /// Whether the round-robin crank should pay `holder` now
    pub fn should_distribute(&self, holder: &HolderAccount, now: i64) -> Result<bool> {
        let record = &holder.dividends;
        if record.amount == 0 {
            return Ok(false);
        }
        let next_claim = record.last_claim.saturating_add(self.min_period);
        if next_claim >= now {
            return Ok(false);
        }
        Ok(self.unpaid_dividends(holder)? > self.min_distribution)
    }

    /// Pays everything owed to `holder` through `payout`.
    ///
    /// Bookkeeping is committed only after `payout` succeeds; a failed payout
    /// leaves the distributor and the holder untouched and surfaces
    /// `PayoutFailed`.
    pub fn distribute_dividend<F>(&mut self, holder: &mut HolderAccount, now: i64, payout: &mut F) -> Result<u64>
    where
        F: FnMut(&Pubkey, u64) -> Result<()>,
    {
        let amount = self.unpaid_dividends(holder)?;
        if amount == 0 {
            return Ok(0);
        }

        let record = holder.dividends;
        let total_distributed = self.total_distributed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_excluded = self.cumulative_dividends(record.amount)?;
        let total_realised = record.total_realised
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        if let Err(err) = payout(&holder.owner, amount) {
            msg!("Dividend payout of {} to {} failed: {}", amount, holder.owner, err);
            return err!(ErrorCode::PayoutFailed);
        }

        self.total_distributed = total_distributed;
        holder.dividends = ShareRecord {
            total_excluded,
            pending_dividends: 0,
            total_realised,
            last_claim: now,
            ..record
        };

        Ok(amount)
    }

    /// Visits up to `iterations` holders round-robin from the cursor and pays
    /// those meeting the distribution criteria.
    ///
    /// `holders` must contain the account of every shareholder the page
    /// visits; a missing one fails with `DividendAccountNotFound`.
    pub fn process<F>(
        &mut self,
        iterations: u32,
        now: i64,
        holders: &mut [HolderAccount],
        mut payout: F,
    ) -> Result<DistributionPage>
    where
        F: FnMut(&Pubkey, u64) -> Result<()>,
    {
        let mut page = DistributionPage::default();
        let count = self.shareholders.len();
        if count == 0 {
            return Ok(page);
        }

        let iterations = (iterations as usize).min(count);
        for _ in 0..iterations {
            if self.current_index as usize >= self.shareholders.len() {
                self.current_index = 0;
            }

            let key = self.shareholders[self.current_index as usize];
            let holder = match holders.iter_mut().find(|holder| holder.owner == key) {
                Some(holder) => holder,
                None => {
                    msg!("Holder account for {} not supplied", key);
                    return err!(ErrorCode::DividendAccountNotFound);
                }
            };

            if self.should_distribute(holder, now)? {
                let amount = self.distribute_dividend(holder, now, &mut payout)?;
                if amount > 0 {
                    page.payouts.push((key, amount));
                }
            }

            self.current_index = self.current_index
                .checked_add(1)
                .ok_or(ErrorCode::MathOverflow)?;
            page.visited += 1;
        }

        Ok(page)
    }

    /// Swap-with-last removal
    fn remove_shareholder(&mut self, holder: &Pubkey) {
        if let Some(index) = self.shareholders.iter().position(|key| key == holder) {
            self.shareholders.swap_remove(index);
        }
    }
}
