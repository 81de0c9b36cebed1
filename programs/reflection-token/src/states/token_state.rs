use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Rebalancer state machine phase
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum RebalancePhase {
    #[default]
    Idle,
    Swapping,
    Distributing,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RebalanceState {
    pub phase: RebalancePhase,
    /// Reentrancy flag held for the duration of a rebalance
    pub in_swap: bool,
}

/// Mutable token-wide accounting
#[account]
#[derive(Debug, InitSpace)]
pub struct TokenState {
    /// Fee tokens held by the program itself
    pub accumulated_fees: u64,
    /// Lifetime fee tokens collected from transfers
    pub total_fees_collected: u64,
    /// Rebalancer phase and reentrancy flag
    pub rebalance: RebalanceState,
    /// Number of completed rebalances
    pub rebalance_count: u32,
    /// Lifetime fee tokens paired into liquidity
    pub total_tokens_liquified: u64,
    /// Lifetime counter-asset deposited as dividends
    pub total_counter_to_rewards: u64,
    /// Lifetime counter-asset forwarded to marketing
    pub total_counter_to_marketing: u64,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl TokenState {
    /// Creates new token state
    pub fn new(bump: u8) -> Self {
        Self {
            accumulated_fees: 0,
            total_fees_collected: 0,
            rebalance: RebalanceState::default(),
            rebalance_count: 0,
            total_tokens_liquified: 0,
            total_counter_to_rewards: 0,
            total_counter_to_marketing: 0,
            bump,
        }
    }

    /// Moves a collected fee into the program's own balance
    pub fn collect_fee(&mut self, fee: u64) -> Result<()> {
        self.accumulated_fees = self.accumulated_fees
            .checked_add(fee)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_fees_collected = self.total_fees_collected
            .checked_add(fee)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn is_in_swap(&self) -> bool {
        self.rebalance.in_swap
    }
}

/// Scoped hold on the rebalance flag. Dropping the guard returns the
/// rebalancer to `Idle` on every exit path.
pub struct SwapGuard<'a> {
    state: &'a mut RebalanceState,
}

impl<'a> SwapGuard<'a> {
    pub fn acquire(state: &'a mut RebalanceState) -> Result<Self> {
        require!(!state.in_swap, ErrorCode::RebalanceInProgress);
        state.in_swap = true;
        state.phase = RebalancePhase::Swapping;
        Ok(Self { state })
    }

    pub fn advance(&mut self, phase: RebalancePhase) {
        self.state.phase = phase;
    }

    pub fn phase(&self) -> RebalancePhase {
        self.state.phase
    }
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        self.state.in_swap = false;
        self.state.phase = RebalancePhase::Idle;
    }
}
