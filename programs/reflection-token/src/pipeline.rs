use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::rebalancer::{rebalance, should_rebalance, RebalanceOutcome};
use crate::states::{Distributor, HolderAccount, TokenConfig, TokenState};
use crate::venue::{LiquidityAdded, LiquidityVenue};

/// One side of a token movement
pub enum Party<'a> {
    Holder(&'a mut HolderAccount),
    /// The liquidity pair; its balance lives in the venue
    Pair,
}

impl Party<'_> {
    fn is_pair(&self) -> bool {
        matches!(self, Party::Pair)
    }

    fn is_fee_exempt(&self) -> bool {
        match self {
            Party::Holder(holder) => holder.fee_exempt,
            Party::Pair => false,
        }
    }

    fn owner(&self) -> Option<Pubkey> {
        match self {
            Party::Holder(holder) => Some(holder.owner),
            Party::Pair => None,
        }
    }

    /// Working copy of the holder, written back by `commit`
    fn stage(&self) -> Option<HolderAccount> {
        match self {
            Party::Holder(holder) => Some((**holder).clone()),
            Party::Pair => None,
        }
    }

    fn commit(&mut self, staged: Option<HolderAccount>) {
        if let (Party::Holder(holder), Some(staged)) = (self, staged) {
            **holder = staged;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Amount debited from the sender
    pub amount: u64,
    /// Fee withheld into the program balance
    pub fee: u64,
    /// Amount credited to the recipient
    pub received: u64,
    /// Set when this transfer triggered a rebalance
    pub rebalance: Option<RebalanceOutcome>,
}

/// Sequences every value movement: fee, ledger update, share updates and the
/// conditional rebalance. Changes are staged and committed only when every
/// step succeeded.
pub struct TransferPipeline<'a, V: LiquidityVenue + Clone> {
    /// Key the distributor accepts share updates and deposits from
    pub token: Pubkey,
    pub config: &'a TokenConfig,
    pub state: &'a mut TokenState,
    pub distributor: &'a mut Distributor,
    pub venue: &'a mut V,
}

impl<'a, V: LiquidityVenue + Clone> TransferPipeline<'a, V> {
    pub fn transfer(
        &mut self,
        mut sender: Party<'_>,
        mut recipient: Party<'_>,
        amount: u64,
    ) -> Result<TransferReceipt> {
        let same_party = match (sender.owner(), recipient.owner()) {
            (Some(from), Some(to)) => from == to,
            (None, None) => true,
            _ => false,
        };
        require!(!same_party, ErrorCode::SelfTransfer);

        if self.state.is_in_swap() {
            return self.basic_transfer(&mut sender, &mut recipient, amount);
        }

        let mut staged_sender = sender.stage();
        if let Some(holder) = staged_sender.as_mut() {
            holder.debit(amount)?;
        }

        let is_exempt = sender.is_fee_exempt() || recipient.is_fee_exempt();
        let fee = self.config.fees.compute_fee(amount, is_exempt)?;
        let received = amount - fee;

        let mut staged_recipient = recipient.stage();
        if let Some(holder) = staged_recipient.as_mut() {
            holder.credit(received)?;
            if !holder.wallet_limit_exempt {
                require!(holder.balance <= self.config.max_wallet, ErrorCode::LimitExceeded);
            }
        }

        let mut state = self.state.clone();
        let mut distributor = self.distributor.clone();
        let mut venue = self.venue.clone();

        state.collect_fee(fee)?;
        if sender.is_pair() {
            venue.debit_pair(amount)?;
        }
        if recipient.is_pair() {
            venue.credit_pair(received)?;
        }

        for holder in [staged_sender.as_mut(), staged_recipient.as_mut()].into_iter().flatten() {
            let weight = holder.dividend_weight();
            distributor.set_share(&self.token, holder, weight)?;
        }

        let outcome = if should_rebalance(self.config, &state, &distributor, sender.is_pair()) {
            Some(rebalance(&self.token, self.config, &mut state, &mut distributor, &mut venue)?)
        } else {
            None
        };

        *self.state = state;
        *self.distributor = distributor;
        *self.venue = venue;
        sender.commit(staged_sender);
        recipient.commit(staged_recipient);

        Ok(TransferReceipt {
            amount,
            fee,
            received,
            rebalance: outcome,
        })
    }

    /// Untaxed move used while a rebalance holds the swap guard
    fn basic_transfer(
        &mut self,
        sender: &mut Party<'_>,
        recipient: &mut Party<'_>,
        amount: u64,
    ) -> Result<TransferReceipt> {
        let mut venue = self.venue.clone();

        let mut staged_sender = sender.stage();
        match staged_sender.as_mut() {
            Some(holder) => holder.debit(amount)?,
            None => venue.debit_pair(amount)?,
        }
        let mut staged_recipient = recipient.stage();
        match staged_recipient.as_mut() {
            Some(holder) => holder.credit(amount)?,
            None => venue.credit_pair(amount)?,
        }

        *self.venue = venue;
        sender.commit(staged_sender);
        recipient.commit(staged_recipient);

        Ok(TransferReceipt {
            amount,
            fee: 0,
            received: amount,
            rebalance: None,
        })
    }

    /// Pairs `provider`'s tokens with `counter` in the venue, debiting only
    /// the tokens the venue actually took
    pub fn provide_liquidity(
        &mut self,
        provider: &mut HolderAccount,
        tokens: u64,
        counter: u64,
    ) -> Result<LiquidityAdded> {
        require!(provider.balance >= tokens, ErrorCode::InsufficientBalance);

        let mut venue = self.venue.clone();
        let mut distributor = self.distributor.clone();
        let mut staged = provider.clone();

        let added = venue.add_liquidity(tokens, counter)?;
        staged.debit(added.tokens_used)?;
        let weight = staged.dividend_weight();
        distributor.set_share(&self.token, &mut staged, weight)?;

        *self.venue = venue;
        *self.distributor = distributor;
        *provider = staged;
        Ok(added)
    }
}
