//! Random operation sequences against the staking ledger.
//!
//! Invariants checked after every step, whether or not the step succeeded:
//! - allocations never exceed the capacity of the stake that is not thawing
//! - locked tokens never exceed staked tokens
//! - the contract holds exactly the staked plus delegated tokens

use l1_staking::capacity;
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{
    testutils::Ledger,
    token::Client as TokenClient,
    Address,
};

use crate::support::*;

const INDEXERS: usize = 2;

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Stake(
        #[proptest(strategy = "0usize..INDEXERS")] usize,
        #[proptest(strategy = "1i128..400_000")] i128,
    ),
    Unstake(
        #[proptest(strategy = "0usize..INDEXERS")] usize,
        #[proptest(strategy = "1i128..400_000")] i128,
    ),
    Withdraw(#[proptest(strategy = "0usize..INDEXERS")] usize),
    Delegate(
        #[proptest(strategy = "0usize..INDEXERS")] usize,
        #[proptest(strategy = "1i128..800_000")] i128,
    ),
    Allocate(
        #[proptest(strategy = "0usize..INDEXERS")] usize,
        #[proptest(strategy = "1i128..1_000_000")] i128,
    ),
    Release(
        #[proptest(strategy = "0usize..INDEXERS")] usize,
        #[proptest(strategy = "1i128..1_000_000")] i128,
    ),
    TransferToL2(
        #[proptest(strategy = "0usize..INDEXERS")] usize,
        #[proptest(strategy = "1i128..600_000")] i128,
    ),
    NextEpoch,
}

fn apply(f: &Fixture, indexers: &[Address], delegator: &Address, op: &Op) {
    // Rejections are expected; only the invariants matter.
    match *op {
        Op::Stake(i, tokens) => {
            let _ = f.client.try_stake(&indexers[i], &tokens);
        }
        Op::Unstake(i, tokens) => {
            let _ = f.client.try_unstake(&indexers[i], &tokens);
        }
        Op::Withdraw(i) => {
            let _ = f.client.try_withdraw(&indexers[i]);
        }
        Op::Delegate(i, tokens) => {
            let _ = f.client.try_delegate(delegator, &indexers[i], &tokens);
        }
        Op::Allocate(i, tokens) => {
            let _ = f
                .client
                .try_commit_allocation_tokens(&f.engine, &indexers[i], &tokens);
        }
        Op::Release(i, tokens) => {
            let _ = f
                .client
                .try_release_allocation_tokens(&f.engine, &indexers[i], &tokens);
        }
        Op::TransferToL2(i, tokens) => {
            let _ = f.client.try_transfer_stake_to_l2(
                &indexers[i],
                &f.l2(0x10 + i as u8),
                &tokens,
                &MAX_GAS,
                &GAS_PRICE_BID,
                &MAX_SUBMISSION_COST,
                &ETH,
            );
        }
        Op::NextEpoch => {
            let sequence = f.env.ledger().sequence();
            f.env.ledger().set_sequence_number(sequence + 100);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_ledger_invariants_hold(
        ratio in 0u32..4,
        ops in proptest::collection::vec(any::<Op>(), 1..20),
    ) {
        let f = Fixture::new(ratio, 10_000);
        let indexers: std::vec::Vec<Address> = (0..INDEXERS).map(|_| f.account()).collect();
        let delegator = f.account();
        let staking = f.client.address.clone();

        for op in &ops {
            apply(&f, &indexers, &delegator, op);

            let mut held = 0i128;
            for indexer in &indexers {
                let pool = f.client.get_delegation_pool(indexer);
                held += pool.tokens;
                let Some(stake) = f.client.get_stake(indexer) else {
                    continue;
                };
                held += stake.tokens_staked;

                prop_assert!(stake.tokens_staked >= 0);
                prop_assert!(stake.tokens_locked <= stake.tokens_staked);
                prop_assert!(
                    stake.tokens_allocated
                        <= capacity::allocation_capacity(stake.own_stake(), pool.tokens, ratio),
                    "capacity exceeded after {:?}: {:?}",
                    op,
                    stake
                );
            }
            prop_assert_eq!(
                TokenClient::new(&f.env, &f.stake_token).balance(&staking),
                held
            );
        }
    }
}
