use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Delegated spending right of `spender` over `owner`'s balance
#[account]
#[derive(Debug, InitSpace)]
pub struct Allowance {
    pub owner: Pubkey,
    pub spender: Pubkey,
    /// Remaining amount; `u64::MAX` never decreases
    pub amount: u64,
    pub bump: u8,
}

impl Allowance {
    pub const UNLIMITED: u64 = u64::MAX;

    pub fn is_unlimited(&self) -> bool {
        self.amount == Self::UNLIMITED
    }

    /// Consumes `amount` of the allowance
    pub fn spend(&mut self, amount: u64) -> Result<()> {
        if self.is_unlimited() {
            return Ok(());
        }
        self.amount = self.amount
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientAllowance)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowance(amount: u64) -> Allowance {
        Allowance {
            owner: Pubkey::new_unique(),
            spender: Pubkey::new_unique(),
            amount,
            bump: 255,
        }
    }

    #[test]
    fn spend_decrements() {
        let mut allowance = allowance(100);
        allowance.spend(60).unwrap();
        assert_eq!(allowance.amount, 40);
    }

    #[test]
    fn spend_beyond_allowance_fails() {
        let mut allowance = allowance(100);
        let err = allowance.spend(101).unwrap_err();
        assert_eq!(err, anchor_lang::error::Error::from(ErrorCode::InsufficientAllowance));
        assert_eq!(allowance.amount, 100);
    }

    #[test]
    fn unlimited_allowance_is_not_consumed() {
        let mut allowance = allowance(Allowance::UNLIMITED);
        allowance.spend(u64::MAX - 1).unwrap();
        allowance.spend(42).unwrap();
        assert!(allowance.is_unlimited());
    }
}
