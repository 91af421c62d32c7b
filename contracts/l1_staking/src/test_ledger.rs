#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test_setup::*;
use crate::{ContractError, IndexerCapacity, L1StakingContract, L1StakingContractClient};

// ── Initialisation and governance ────────────────────────────────────────────

#[test]
fn test_initialize_rejects_second_call() {
    let s = Setup::new();
    assert!(s.client.is_initialized());

    let config = s.client.get_config();
    assert_eq!(config.minimum_indexer_stake, MIN_STAKE);
    assert_eq!(
        s.client.try_initialize(&s.governor, &config),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_initialize_requires_governor_and_valid_config() {
    let s = Setup::new();
    let staking = s.env.register(L1StakingContract, ());
    let client = L1StakingContractClient::new(&s.env, &staking);
    let config = s.client.get_config();

    let stranger = Address::generate(&s.env);
    assert_eq!(
        client.try_initialize(&stranger, &config),
        Err(Ok(ContractError::Unauthorized))
    );

    let mut bad = config.clone();
    bad.epoch_length = 0;
    assert_eq!(
        client.try_initialize(&s.governor, &bad),
        Err(Ok(ContractError::InvalidInput))
    );

    let mut bad = config.clone();
    bad.delegation_tax_ppm = 1_000_001;
    assert_eq!(
        client.try_initialize(&s.governor, &bad),
        Err(Ok(ContractError::InvalidInput))
    );

    let mut bad = config;
    bad.counterpart = s.l2(0);
    assert_eq!(
        client.try_initialize(&s.governor, &bad),
        Err(Ok(ContractError::InvalidInput))
    );
    assert!(!client.is_initialized());
}

#[test]
fn test_uninitialized_contract_reports_not_initialized() {
    let s = Setup::new();
    let staking = s.env.register(L1StakingContract, ());
    let client = L1StakingContractClient::new(&s.env, &staking);
    let indexer = s.account();

    assert_eq!(client.try_stake(&indexer, &MIN_STAKE), Err(Ok(ContractError::NotInitialized)));
    assert_eq!(client.try_get_config(), Err(Ok(ContractError::NotInitialized)));
}

#[test]
fn test_setters_are_governor_only() {
    let s = Setup::new();
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.client.try_set_minimum_indexer_stake(&stranger, &1),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.client.try_set_delegation_ratio(&stranger, &2),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.client.try_set_transfer_tool(&stranger, &stranger),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.client.try_set_allocation_engine(&stranger, &stranger),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(s.client.get_allocation_engine(), Some(s.engine.clone()));
}

#[test]
fn test_setters_update_config() {
    let s = Setup::new();

    s.client.set_minimum_indexer_stake(&s.governor, &42);
    s.client.set_delegation_ratio(&s.governor, &3);
    s.client.set_delegation_tax_percentage(&s.governor, &0);
    s.client.set_delegation_unbonding_period(&s.governor, &5);
    s.client.set_thawing_period(&s.governor, &7);
    s.client
        .set_counterpart_staking_address(&s.governor, &s.l2(0xAB));

    let config = s.client.get_config();
    assert_eq!(config.minimum_indexer_stake, 42);
    assert_eq!(config.delegation_ratio, 3);
    assert_eq!(config.delegation_tax_ppm, 0);
    assert_eq!(config.delegation_unbonding_period, 5);
    assert_eq!(config.thawing_period, 7);
    assert_eq!(config.counterpart, s.l2(0xAB));

    assert_eq!(
        s.client.try_set_minimum_indexer_stake(&s.governor, &0),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        s.client.try_set_delegation_tax_percentage(&s.governor, &1_000_001),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        s.client.try_set_counterpart_staking_address(&s.governor, &s.l2(0)),
        Err(Ok(ContractError::InvalidInput))
    );
}

#[test]
fn test_governance_follows_controller_handover() {
    let s = Setup::new();
    let next = Address::generate(&s.env);
    s.controller.propose_governor(&s.governor, &next);
    s.controller.accept_governor(&next);

    assert_eq!(
        s.client.try_set_delegation_ratio(&s.governor, &2),
        Err(Ok(ContractError::Unauthorized))
    );
    s.client.set_delegation_ratio(&next, &2);
    assert_eq!(s.client.get_config().delegation_ratio, 2);
}

// ── Indexer stake ────────────────────────────────────────────────────────────

#[test]
fn test_stake_requires_minimum_and_accumulates() {
    let s = Setup::new();
    let indexer = s.account();
    let before = s.stake_balance(&indexer);

    assert_eq!(
        s.client.try_stake(&indexer, &(MIN_STAKE - 1)),
        Err(Ok(ContractError::BelowMinimumStake))
    );
    assert_eq!(s.client.try_stake(&indexer, &0), Err(Ok(ContractError::InvalidInput)));

    s.client.stake(&indexer, &MIN_STAKE);
    s.client.stake(&indexer, &1);

    let record = s.client.get_stake(&indexer).unwrap();
    assert_eq!(record.tokens_staked, MIN_STAKE + 1);
    assert_eq!(s.stake_balance(&indexer), before - MIN_STAKE - 1);
    assert_eq!(s.stake_balance(&s.staking), MIN_STAKE + 1);
}

#[test]
fn test_stake_is_blocked_while_paused() {
    let s = Setup::new();
    let indexer = s.account();
    s.controller.set_paused(&s.governor, &true);

    assert_eq!(
        s.client.try_stake(&indexer, &MIN_STAKE),
        Err(Ok(ContractError::ProtocolPaused))
    );
}

#[test]
fn test_unstake_thaws_then_withdraws() {
    let s = Setup::new();
    let indexer = s.account();
    s.client.stake(&indexer, &300_000);

    s.client.unstake(&indexer, &100_000);
    let record = s.client.get_stake(&indexer).unwrap();
    assert_eq!(record.tokens_locked, 100_000);
    assert_eq!(
        record.tokens_locked_until,
        s.client.current_epoch() + THAWING_EPOCHS
    );

    assert_eq!(s.client.try_withdraw(&indexer), Err(Ok(ContractError::StillLocked)));

    s.advance_epochs(THAWING_EPOCHS);
    let before = s.stake_balance(&indexer);
    assert_eq!(s.client.withdraw(&indexer), 100_000);
    assert_eq!(s.stake_balance(&indexer), before + 100_000);

    let record = s.client.get_stake(&indexer).unwrap();
    assert_eq!(record.tokens_staked, 200_000);
    assert_eq!(record.tokens_locked, 0);
    assert_eq!(s.client.try_withdraw(&indexer), Err(Ok(ContractError::NothingToWithdraw)));
}

#[test]
fn test_unstake_guards_minimum_and_capacity() {
    let s = Setup::new();
    s.client.set_delegation_ratio(&s.governor, &0);
    let indexer = s.account();
    s.client.stake(&indexer, &300_000);

    assert_eq!(
        s.client.try_unstake(&indexer, &250_000),
        Err(Ok(ContractError::BelowMinimumStakeRemaining))
    );
    assert_eq!(
        s.client.try_unstake(&indexer, &300_001),
        Err(Ok(ContractError::InsufficientStake))
    );

    s.allocate(&indexer, 250_000);
    assert_eq!(
        s.client.try_unstake(&indexer, &100_000),
        Err(Ok(ContractError::AllocationCapacityExceeded))
    );
    s.client.unstake(&indexer, &50_000);
}

#[test]
fn test_unstake_without_stake_fails() {
    let s = Setup::new();
    let indexer = s.account();
    assert_eq!(s.client.try_unstake(&indexer, &1), Err(Ok(ContractError::NoStake)));
}

// ── Allocation capacity ──────────────────────────────────────────────────────

#[test]
fn test_allocation_hooks_are_engine_only() {
    let s = Setup::new();
    let indexer = s.account();
    s.client.stake(&indexer, &200_000);
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.client
            .try_commit_allocation_tokens(&stranger, &indexer, &1_000),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.client
            .try_release_allocation_tokens(&stranger, &indexer, &1_000),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_allocation_capacity_includes_capped_delegation() {
    let s = Setup::new();
    s.client.set_delegation_ratio(&s.governor, &1);
    let indexer = s.account();
    let delegator = s.account();
    s.client.stake(&indexer, &200_000);
    s.client.delegate(&delegator, &indexer, &1_000_000);

    // Delegation only counts up to the own stake at ratio 1.
    assert_eq!(
        s.client.get_indexer_capacity(&indexer),
        IndexerCapacity {
            own_stake: 200_000,
            delegated_capacity: 200_000,
            capacity: 400_000,
            tokens_allocated: 0,
            available_for_migration: 200_000,
        }
    );

    s.allocate(&indexer, 400_000);
    assert_eq!(
        s.client
            .try_commit_allocation_tokens(&s.engine, &indexer, &1),
        Err(Ok(ContractError::AllocationCapacityExceeded))
    );

    s.client
        .release_allocation_tokens(&s.engine, &indexer, &100_000);
    assert_eq!(s.client.get_stake(&indexer).unwrap().tokens_allocated, 300_000);
    assert_eq!(
        s.client
            .try_release_allocation_tokens(&s.engine, &indexer, &300_001),
        Err(Ok(ContractError::InvalidInput))
    );
}

// ── Delegation ───────────────────────────────────────────────────────────────

#[test]
fn test_delegate_burns_tax_and_mints_shares() {
    let s = Setup::new();
    let indexer = s.account();
    let alice = s.account();
    let bob = s.account();

    assert_eq!(s.client.delegate(&alice, &indexer, &202_100), 200_079);
    assert_eq!(s.stake_balance(&s.staking), 200_079);

    // A second delegation buys shares at the pool's rate.
    assert_eq!(s.client.delegate(&bob, &indexer, &10_000), 9_900);
    let pool = s.client.get_delegation_pool(&indexer);
    assert_eq!((pool.tokens, pool.shares), (209_979, 209_979));
    assert_eq!(s.client.get_delegation(&bob, &indexer).shares, 9_900);
}

#[test]
fn test_undelegate_locks_for_unbonding_period() {
    let s = Setup::new();
    let indexer = s.account();
    let delegator = s.account();
    let shares = s.client.delegate(&delegator, &indexer, &10_000);

    assert_eq!(
        s.client.try_undelegate(&delegator, &indexer, &(shares + 1)),
        Err(Ok(ContractError::InsufficientShares))
    );
    assert_eq!(
        s.client.try_undelegate(&delegator, &indexer, &0),
        Err(Ok(ContractError::InsufficientShares))
    );

    assert_eq!(s.client.undelegate(&delegator, &indexer, &4_000), 4_000);
    let record = s.client.get_delegation(&delegator, &indexer);
    assert_eq!(record.shares, 5_900);
    assert_eq!(record.tokens_locked, 4_000);
    assert_eq!(
        record.tokens_locked_until,
        s.client.current_epoch() + UNBONDING_EPOCHS
    );

    assert_eq!(
        s.client.try_withdraw_delegated(&delegator, &indexer),
        Err(Ok(ContractError::StillLocked))
    );
    s.advance_epochs(UNBONDING_EPOCHS);
    assert_eq!(s.client.withdraw_delegated(&delegator, &indexer), 4_000);
    assert_eq!(
        s.client.try_withdraw_delegated(&delegator, &indexer),
        Err(Ok(ContractError::NothingToWithdraw))
    );
}

#[test]
fn test_undelegate_pays_out_matured_lock_first() {
    let s = Setup::new();
    let indexer = s.account();
    let delegator = s.account();
    s.client.delegate(&delegator, &indexer, &10_000);
    s.client.undelegate(&delegator, &indexer, &1_000);
    s.advance_epochs(UNBONDING_EPOCHS);

    let before = s.stake_balance(&delegator);
    s.client.undelegate(&delegator, &indexer, &2_000);

    assert_eq!(s.stake_balance(&delegator), before + 1_000);
    assert_eq!(s.client.get_delegation(&delegator, &indexer).tokens_locked, 2_000);
}
