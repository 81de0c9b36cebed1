use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use reflection_token::errors::ErrorCode;
use reflection_token::instructions::InitializeTokenParams;
use reflection_token::pipeline::{Party, TransferPipeline};
use reflection_token::states::{
    Distributor, HolderAccount, LiquidityPool, RebalancePhase, ShareRecord, TokenConfig,
    TokenState,
};
use reflection_token::venue::{LiquidityAdded, LiquidityVenue};

const SUPPLY: u64 = 1_000_000_000;

struct World<V> {
    token: Pubkey,
    config: TokenConfig,
    state: TokenState,
    distributor: Distributor,
    venue: V,
}

impl<V: LiquidityVenue + Clone> World<V> {
    fn pipeline(&mut self) -> TransferPipeline<'_, V> {
        TransferPipeline {
            token: self.token,
            config: &self.config,
            state: &mut self.state,
            distributor: &mut self.distributor,
            venue: &mut self.venue,
        }
    }

    fn send(&mut self, from: &mut HolderAccount, to: &mut HolderAccount, amount: u64) -> Result<()> {
        self.pipeline()
            .transfer(Party::Holder(from), Party::Holder(to), amount)
            .map(|_| ())
    }
}

/// 5% transfer fee split 2% liquidity, 2% reward, 1% marketing, rebalancing
/// once 5_000 fee tokens have accumulated.
fn params() -> InitializeTokenParams {
    let mut params = InitializeTokenParams::with_defaults(SUPPLY, 6);
    params.liquidity_fee = 200;
    params.reward_fee = 200;
    params.marketing_fee = 100;
    params.swap_threshold = 5_000;
    params.min_period = 0;
    params.min_distribution = 0;
    params
}

fn world_with<V>(params: InitializeTokenParams, venue: V) -> (World<V>, HolderAccount) {
    let token = Pubkey::new_unique();
    let authority_key = Pubkey::new_unique();
    let config = params
        .to_config(authority_key, Pubkey::new_unique(), 255)
        .unwrap();

    let mut distributor = Distributor::new(token, params.min_period, params.min_distribution, 255);
    let mut authority = HolderAccount::new(authority_key, 255);
    authority.balance = SUPPLY;
    authority.fee_exempt = true;
    authority.wallet_limit_exempt = true;
    distributor.set_share(&token, &mut authority, SUPPLY).unwrap();

    let world = World {
        token,
        config,
        state: TokenState::new(255),
        distributor,
        venue,
    };
    (world, authority)
}

/// Authority seeds the pair with `tokens` and `counter`
fn seeded_world(tokens: u64, counter: u64) -> (World<LiquidityPool>, HolderAccount) {
    let (mut world, mut authority) = world_with(params(), LiquidityPool::new(30, 255));
    world
        .pipeline()
        .provide_liquidity(&mut authority, tokens, counter)
        .unwrap();
    (world, authority)
}

fn holder() -> HolderAccount {
    HolderAccount::new(Pubkey::new_unique(), 255)
}

fn assert_supply_conserved(world: &World<LiquidityPool>, holders: &[&HolderAccount]) {
    let held: u64 = holders.iter().map(|holder| holder.balance).sum();
    assert_eq!(
        held + world.state.accumulated_fees + world.venue.pair_token_balance(),
        SUPPLY
    );
}

#[test]
fn plain_transfer_charges_five_percent() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut alice = holder();
    let mut bob = holder();
    world.send(&mut authority, &mut alice, 1_000).unwrap();

    let receipt = world
        .pipeline()
        .transfer(Party::Holder(&mut alice), Party::Holder(&mut bob), 100)
        .unwrap();

    assert_eq!(receipt.fee, 5);
    assert_eq!(bob.balance, 95);
    assert_eq!(alice.balance, 900);
    assert_eq!(world.state.accumulated_fees, 5);
    assert!(receipt.rebalance.is_none());
    assert_supply_conserved(&world, &[&authority, &alice, &bob]);
}

#[test]
fn threshold_crossing_rebalances_under_liquified_pair() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut alice = holder();
    let mut bob = holder();
    world.send(&mut authority, &mut alice, 1_000_000).unwrap();
    assert_eq!(world.state.accumulated_fees, 0);

    // Pair backing is 100 * 100M * 2 / 1B = 20, under the target of 25
    let receipt = world
        .pipeline()
        .transfer(Party::Holder(&mut alice), Party::Holder(&mut bob), 100_000)
        .unwrap();

    assert_eq!(receipt.fee, 5_000);
    assert_eq!(bob.balance, 95_000);
    let outcome = receipt.rebalance.unwrap();
    assert!(!outcome.over_liquified);
    assert_eq!(outcome.tokens_swapped, 4_000);
    assert_eq!(outcome.counter_received, 1_993);
    assert_eq!(outcome.tokens_liquified, 996);
    assert_eq!(outcome.counter_liquified, 498);
    assert_eq!(outcome.liquidity_minted, 704);
    assert_eq!(outcome.counter_to_rewards, 996);
    assert_eq!(outcome.counter_to_marketing, 499);

    // Only the rounding dust of the liquidity half stays behind
    assert_eq!(world.state.accumulated_fees, 4);
    assert_eq!(world.state.total_fees_collected, 5_000);
    assert_eq!(world.state.rebalance_count, 1);
    assert_eq!(world.state.rebalance.phase, RebalancePhase::Idle);
    assert!(!world.state.is_in_swap());

    assert_eq!(world.venue.token_reserve, 100_004_996);
    assert_eq!(world.venue.counter_reserve, 50_000_000 - 1_993 + 498);
    assert_eq!(world.venue.lp_supply, 70_710_678 + 704);

    assert_eq!(world.distributor.total_dividends, 996);
    assert_eq!(world.distributor.total_shares, 899_995_000);
    assert_eq!(world.distributor.unpaid_dividends(&authority).unwrap(), 994);
    assert_eq!(world.distributor.unpaid_dividends(&alice).unwrap(), 0);
    assert_supply_conserved(&world, &[&authority, &alice, &bob]);
}

#[test]
fn over_liquified_pair_skips_liquidity() {
    let (mut world, mut authority) = seeded_world(200_000_000, 100_000_000);
    let mut alice = holder();
    let mut bob = holder();
    world.send(&mut authority, &mut alice, 1_000_000).unwrap();

    let receipt = world
        .pipeline()
        .transfer(Party::Holder(&mut alice), Party::Holder(&mut bob), 100_000)
        .unwrap();

    let outcome = receipt.rebalance.unwrap();
    assert!(outcome.over_liquified);
    assert_eq!(outcome.tokens_swapped, 5_000);
    assert_eq!(outcome.tokens_liquified, 0);
    assert_eq!(outcome.counter_liquified, 0);
    assert_eq!(outcome.liquidity_minted, 0);
    // Without the liquidity half: rewards get 200 / 500, marketing the rest
    assert_eq!(outcome.counter_received, 2_492);
    assert_eq!(outcome.counter_to_rewards, 996);
    assert_eq!(outcome.counter_to_marketing, 1_496);
    assert_eq!(world.state.accumulated_fees, 0);
    assert_supply_conserved(&world, &[&authority, &alice, &bob]);
}

#[test]
fn rebalance_proceeds_reach_holders_through_crank() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut alice = holder();
    let mut bob = holder();
    world.send(&mut authority, &mut alice, 1_000_000).unwrap();
    world.send(&mut alice, &mut bob, 100_000).unwrap();

    let mut holders = vec![authority, alice, bob];
    let mut paid = Vec::new();
    let page = world
        .distributor
        .process(10, 1, &mut holders, |holder: &Pubkey, amount: u64| {
            paid.push((*holder, amount));
            Ok(())
        })
        .unwrap();

    assert_eq!(page.visited, 3);
    assert_eq!(paid, vec![(holders[0].owner, 994)]);
    assert_eq!(world.distributor.total_distributed, 994);
    assert_eq!(world.distributor.unpaid_dividends(&holders[0]).unwrap(), 0);
    assert_eq!(holders[0].dividends.total_realised, 994);
}

#[test]
fn buys_are_taxed_and_never_rebalance() {
    let (mut world, _authority) = seeded_world(100_000_000, 50_000_000);
    world.state.accumulated_fees = 10_000;
    let mut bob = holder();

    let bought = world.venue.swap_counter_for_tokens(1_000, 0).unwrap();
    let receipt = world
        .pipeline()
        .transfer(Party::Pair, Party::Holder(&mut bob), bought)
        .unwrap();

    assert_eq!(bought, 1_993);
    assert_eq!(receipt.fee, 99);
    assert_eq!(bob.balance, 1_894);
    assert!(receipt.rebalance.is_none());
    assert_eq!(world.state.accumulated_fees, 10_099);
    assert_eq!(world.venue.pending_tokens(), 0);
}

#[test]
fn sells_leave_input_pending_in_pair() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut bob = holder();
    world.send(&mut authority, &mut bob, 10_000).unwrap();

    let receipt = world
        .pipeline()
        .transfer(Party::Holder(&mut bob), Party::Pair, 10_000)
        .unwrap();

    assert_eq!(receipt.fee, 500);
    assert_eq!(world.venue.pending_tokens(), 9_500);
    assert_eq!(bob.balance, 0);
    assert_eq!(bob.dividends.amount, 0);
    assert!(!world.distributor.shareholders.contains(&bob.owner));

    let counter_out = world.venue.swap_pending_tokens_for_counter(1).unwrap();
    assert!(counter_out > 0);
    assert_eq!(world.venue.pending_tokens(), 0);
}

#[test]
fn sell_crossing_threshold_rebalances_before_input_is_swapped() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut bob = holder();
    world.send(&mut authority, &mut bob, 200_000).unwrap();

    let receipt = world
        .pipeline()
        .transfer(Party::Holder(&mut bob), Party::Pair, 100_000)
        .unwrap();

    let outcome = receipt.rebalance.unwrap();
    assert_eq!(outcome.tokens_swapped, 4_000);
    assert_eq!(world.venue.pending_tokens(), 95_000);
    assert_supply_conserved(&world, &[&authority, &bob]);
}

#[derive(Clone)]
struct FailingVenue {
    pair_balance: u64,
}

impl LiquidityVenue for FailingVenue {
    fn pair_token_balance(&self) -> u64 {
        self.pair_balance
    }

    fn credit_pair(&mut self, amount: u64) -> Result<()> {
        self.pair_balance += amount;
        Ok(())
    }

    fn debit_pair(&mut self, amount: u64) -> Result<()> {
        self.pair_balance -= amount;
        Ok(())
    }

    fn quote_tokens_for_counter(&self, amount_in: u64) -> Result<u64> {
        Ok(amount_in / 2)
    }

    fn swap_tokens_for_counter(&mut self, _amount_in: u64, _minimum_amount_out: u64) -> Result<u64> {
        err!(ErrorCode::NoLiquidity)
    }

    fn add_liquidity(&mut self, _tokens: u64, _counter: u64) -> Result<LiquidityAdded> {
        err!(ErrorCode::NoLiquidity)
    }
}

#[test]
fn venue_failure_rolls_back_whole_transfer() {
    let (mut world, mut authority) = world_with(params(), FailingVenue { pair_balance: 0 });
    let mut alice = holder();
    let mut bob = holder();
    world.send(&mut authority, &mut alice, 1_000_000).unwrap();
    world.state.accumulated_fees = 4_999;
    let shares_before = world.distributor.total_shares;
    let dps_before = world.distributor.dividends_per_share;
    let alice_record = alice.dividends;

    let err = world.send(&mut alice, &mut bob, 100).unwrap_err();

    assert_eq!(err, Error::from(ErrorCode::ExternalCallFailed));
    assert_eq!(alice.balance, 1_000_000);
    assert_eq!(bob.balance, 0);
    assert_eq!(world.state.accumulated_fees, 4_999);
    assert_eq!(world.state.total_fees_collected, 0);
    assert_eq!(world.state.rebalance_count, 0);
    assert!(!world.state.is_in_swap());
    assert_eq!(world.distributor.total_shares, shares_before);
    assert_eq!(world.distributor.dividends_per_share, dps_before);
    assert_eq!(alice.dividends, alice_record);
    assert_eq!(bob.dividends, ShareRecord::default());
    assert_eq!(world.distributor.shareholder_count(), 2);
    assert_eq!(world.venue.pair_balance, 0);
}

#[test]
fn disabled_swap_only_accumulates() {
    let mut params = params();
    params.swap_enabled = false;
    let (mut world, mut authority) = world_with(params, FailingVenue { pair_balance: 0 });
    let mut alice = holder();
    let mut bob = holder();
    world.send(&mut authority, &mut alice, 1_000_000).unwrap();

    world.send(&mut alice, &mut bob, 200_000).unwrap();

    assert_eq!(world.state.accumulated_fees, 10_000);
    assert_eq!(world.state.rebalance_count, 0);
}

#[test]
fn wallet_cap_blocks_oversized_receipt() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut whale = holder();
    let cap = world.config.max_wallet;
    assert_eq!(cap, SUPPLY / 40);

    world.send(&mut authority, &mut whale, cap).unwrap();
    let err = world.send(&mut authority, &mut whale, 1).unwrap_err();

    assert_eq!(err, Error::from(ErrorCode::LimitExceeded));
    assert_eq!(whale.balance, cap);
}

#[test]
fn every_new_wallet_joins_and_crank_wraps_over_all_of_them() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut wallets: Vec<HolderAccount> = (0..60).map(|_| holder()).collect();
    for wallet in wallets.iter_mut() {
        world.send(&mut authority, wallet, 1_000).unwrap();
    }

    assert_eq!(world.distributor.shareholder_count(), 61);
    assert_eq!(world.distributor.total_shares, 900_000_000);

    // 0.01 per share: 10 for each wallet, 8_999_400 for the authority
    world.distributor.deposit(&world.token, 9_000_000).unwrap();

    let mut everyone: Vec<HolderAccount> = std::iter::once(authority).chain(wallets).collect();
    let mut paid = Vec::new();
    let mut pay = |holder: &Pubkey, amount: u64| -> Result<()> {
        paid.push((*holder, amount));
        Ok(())
    };

    let first = world.distributor.process(25, 1, &mut everyone, &mut pay).unwrap();
    assert_eq!(first.payouts.len(), 25);
    assert_eq!(first.payouts[0], (everyone[0].owner, 8_999_400));
    assert_eq!(world.distributor.current_index, 25);

    let second = world.distributor.process(25, 1, &mut everyone, &mut pay).unwrap();
    assert_eq!(second.payouts.len(), 25);
    assert_eq!(world.distributor.current_index, 50);

    // 11 holders left, then the cursor wraps over holders already paid
    let third = world.distributor.process(25, 1, &mut everyone, &mut pay).unwrap();
    assert_eq!(third.visited, 25);
    assert_eq!(third.payouts.len(), 11);
    assert_eq!(world.distributor.current_index, 14);

    assert_eq!(paid.len(), 61);
    assert_eq!(world.distributor.total_distributed, 9_000_000);
    for holder in everyone.iter() {
        assert_eq!(world.distributor.unpaid_dividends(holder).unwrap(), 0);
    }
}

#[test]
fn exits_with_unclaimed_dividends_never_block_transfers() {
    let (mut world, mut authority) = seeded_world(100_000_000, 50_000_000);
    let mut leavers: Vec<HolderAccount> = (0..64).map(|_| holder()).collect();

    for leaver in leavers.iter_mut() {
        world.send(&mut authority, leaver, 10_000).unwrap();
        world.distributor.deposit(&world.token, 1_000_000).unwrap();
        let balance = leaver.balance;
        world.send(leaver, &mut authority, balance).unwrap();

        assert_eq!(leaver.dividends.amount, 0);
        assert!(leaver.dividends.pending_dividends > 0);
        assert_eq!(world.distributor.shareholder_count(), 1);
    }

    let mut newcomer = holder();
    world.send(&mut authority, &mut newcomer, 5_000).unwrap();
    assert_eq!(world.distributor.shareholder_count(), 2);

    let owed: u64 = leavers
        .iter()
        .chain([&authority, &newcomer])
        .map(|holder| world.distributor.unpaid_dividends(holder).unwrap())
        .sum();
    assert!(owed <= world.distributor.total_dividends);
    assert!(world.distributor.total_dividends - owed < 64 * 8);
}
