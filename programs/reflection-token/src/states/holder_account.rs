use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::states::ShareRecord;

/// Ledger balance and exemption flags of one token holder
#[account]
#[derive(Debug, InitSpace)]
pub struct HolderAccount {
    /// Wallet that owns this balance
    pub owner: Pubkey,
    /// Token balance
    pub balance: u64,
    /// Transfers to or from this holder are not taxed
    pub fee_exempt: bool,
    /// This holder never receives a dividend stake
    pub dividend_exempt: bool,
    /// This holder may exceed the wallet cap
    pub wallet_limit_exempt: bool,
    /// Dividend stake and payout history
    pub dividends: ShareRecord,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl HolderAccount {
    /// Creates a new holder with no balance and no exemptions
    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            balance: 0,
            fee_exempt: false,
            dividend_exempt: false,
            wallet_limit_exempt: false,
            dividends: ShareRecord::default(),
            bump,
        }
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientBalance)?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Dividend stake this holder should carry for its current balance
    pub fn dividend_weight(&self) -> u64 {
        if self.dividend_exempt {
            0
        } else {
            self.balance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_rejects_overdraft() {
        let mut holder = HolderAccount::new(Pubkey::new_unique(), 1);
        holder.credit(10).unwrap();

        let err = holder.debit(11).unwrap_err();

        assert_eq!(err, anchor_lang::error::Error::from(ErrorCode::InsufficientBalance));
        assert_eq!(holder.balance, 10);
    }

    #[test]
    fn credit_rejects_overflow() {
        let mut holder = HolderAccount::new(Pubkey::new_unique(), 1);
        holder.credit(u64::MAX).unwrap();

        let err = holder.credit(1).unwrap_err();

        assert_eq!(err, anchor_lang::error::Error::from(ErrorCode::MathOverflow));
        assert_eq!(holder.balance, u64::MAX);
    }

    #[test]
    fn dividend_exempt_holder_has_no_weight() {
        let mut holder = HolderAccount::new(Pubkey::new_unique(), 1);
        holder.credit(500).unwrap();
        assert_eq!(holder.dividend_weight(), 500);

        holder.dividend_exempt = true;
        assert_eq!(holder.dividend_weight(), 0);
    }
}
