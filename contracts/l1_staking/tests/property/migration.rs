//! Properties of the migration entry points against a live contract.
//!
//! Invariants tested:
//! - leaving `0 < remaining < minimum` always fails `BelowMinimumStakeRemaining`
//! - a first transfer below the minimum always fails `BelowMinimumStakeSent`
//! - any fee other than the exact one fails `InvalidPaymentAmount` and moves nothing
//! - a second beneficiary is always rejected
//! - a delegation balance transfers exactly once

use l1_staking::ContractError;
use proptest::prelude::*;

use crate::support::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_dust_remaining_is_rejected(
        staked in (2 * MIN_STAKE)..(10 * MIN_STAKE),
        left in 1i128..MIN_STAKE,
    ) {
        let f = Fixture::new(16, 0);
        let indexer = f.account();
        f.client.stake(&indexer, &staked);

        let result = f.client.try_transfer_stake_to_l2(
            &indexer, &f.l2(0x11), &(staked - left),
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        prop_assert_eq!(result, Err(Ok(ContractError::BelowMinimumStakeRemaining)));
    }

    #[test]
    fn prop_first_transfer_below_minimum_is_rejected(
        staked in MIN_STAKE..(10 * MIN_STAKE),
        amount in 1i128..MIN_STAKE,
    ) {
        let f = Fixture::new(16, 0);
        let indexer = f.account();
        f.client.stake(&indexer, &staked);

        let result = f.client.try_transfer_stake_to_l2(
            &indexer, &f.l2(0x11), &amount,
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        prop_assert_eq!(result, Err(Ok(ContractError::BelowMinimumStakeSent)));
    }

    #[test]
    fn prop_inexact_payment_is_rejected(
        offset in prop_oneof![-ETH..0i128, 1i128..=ETH],
    ) {
        let f = Fixture::new(16, 0);
        let indexer = f.account();
        f.client.stake(&indexer, &MIN_STAKE);
        let before = f.fee_balance(&indexer);

        let result = f.client.try_transfer_stake_to_l2(
            &indexer, &f.l2(0x11), &MIN_STAKE,
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &(ETH + offset),
        );
        prop_assert_eq!(result, Err(Ok(ContractError::InvalidPaymentAmount)));
        prop_assert_eq!(f.fee_balance(&indexer), before);
        prop_assert_eq!(f.gateway.get_sequence_number(), 0);
        prop_assert_eq!(f.client.get_l2_beneficiary(&indexer), None);
    }

    #[test]
    fn prop_beneficiary_is_set_once(first in 1u8..=255, second in 1u8..=255) {
        prop_assume!(first != second);
        let f = Fixture::new(16, 0);
        let indexer = f.account();
        f.client.stake(&indexer, &(3 * MIN_STAKE));

        f.client.transfer_stake_to_l2(
            &indexer, &f.l2(first), &MIN_STAKE,
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        let result = f.client.try_transfer_stake_to_l2(
            &indexer, &f.l2(second), &MIN_STAKE,
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        prop_assert_eq!(result, Err(Ok(ContractError::BeneficiaryMismatch)));
        prop_assert_eq!(f.client.get_l2_beneficiary(&indexer), Some(f.l2(first)));
    }

    #[test]
    fn prop_delegation_transfers_exactly_once(
        delegated in 1_000i128..10_000_000,
        tax_ppm in 0u32..100_000,
    ) {
        let f = Fixture::new(16, tax_ppm);
        let indexer = f.account();
        let delegator = f.account();
        f.client.stake(&indexer, &MIN_STAKE);
        f.client.delegate(&delegator, &indexer, &delegated);
        let value = f.client.get_delegation_pool(&indexer).tokens;

        f.client.transfer_stake_to_l2(
            &indexer, &f.l2(0x11), &MIN_STAKE,
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        let seq = f.client.transfer_delegation_to_l2(
            &delegator, &indexer, &f.l2(0x31),
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        prop_assert_eq!(seq, 2);
        prop_assert_eq!(f.gateway.get_outbound_transfer(&seq).amount, value);

        let again = f.client.try_transfer_delegation_to_l2(
            &delegator, &indexer, &f.l2(0x31),
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        prop_assert_eq!(again, Err(Ok(ContractError::NoDelegation)));
    }

    #[test]
    fn prop_pause_blocks_every_migration(partial in any::<bool>()) {
        let f = Fixture::new(16, 0);
        let indexer = f.account();
        f.client.stake(&indexer, &MIN_STAKE);
        if partial {
            f.controller.set_partial_paused(&f.governor, &true);
        } else {
            f.controller.set_paused(&f.governor, &true);
        }

        let stake = f.client.try_transfer_stake_to_l2(
            &indexer, &f.l2(0x11), &MIN_STAKE,
            &MAX_GAS, &GAS_PRICE_BID, &MAX_SUBMISSION_COST, &ETH,
        );
        prop_assert_eq!(stake, Err(Ok(ContractError::ProtocolPaused)));
        let unlock = f.client.try_unlock_delegation_to_l2_indexer(&indexer, &indexer);
        prop_assert_eq!(unlock, Err(Ok(ContractError::ProtocolPaused)));
    }
}
