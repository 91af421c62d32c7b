#![no_main]

use arbitrary::Arbitrary;
use controller::{ControllerContract, ControllerContractClient};
use l1_staking::{capacity, L1StakingContract, L1StakingContractClient, StakingConfig};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    Address, BytesN, Env,
};
use token_gateway::{L1TokenGateway, L1TokenGatewayClient};

const MIN_STAKE: i128 = 1_000;
const MAX_GAS: i128 = 100;
const GAS_PRICE_BID: i128 = 10;
const MAX_SUBMISSION_COST: i128 = 50;
const ETH: i128 = MAX_SUBMISSION_COST + MAX_GAS * GAS_PRICE_BID;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u32 },
    Unstake { who: u8, amount: u32 },
    Withdraw { who: u8 },
    Delegate { who: u8, indexer: u8, amount: u32 },
    Undelegate { who: u8, indexer: u8, shares: u32 },
    Allocate { indexer: u8, amount: u32 },
    Release { indexer: u8, amount: u32 },
    TransferStake { who: u8, beneficiary: u8, amount: u32, overpay: bool },
    TransferDelegation { who: u8, indexer: u8, beneficiary: u8 },
    Unlock { who: u8, indexer: u8 },
    NextEpoch,
}

fuzz_target!(|input: (u8, Vec<FuzzAction>)| {
    let (ratio, actions) = input;
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1_000);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let governor = Address::generate(&env);
    let controller_id = env.register(ControllerContract, ());
    ControllerContractClient::new(&env, &controller_id).initialize(&governor);

    let gateway_id = env.register(L1TokenGateway, ());
    L1TokenGatewayClient::new(&env, &gateway_id).initialize(
        &Address::generate(&env),
        &stake_token,
        &fee_token,
    );

    let staking = env.register(L1StakingContract, ());
    let client = L1StakingContractClient::new(&env, &staking);
    let ratio = (ratio % 20) as u32;
    client.initialize(
        &governor,
        &StakingConfig {
            controller: controller_id,
            stake_token: stake_token.clone(),
            fee_token: fee_token.clone(),
            gateway: gateway_id,
            counterpart: BytesN::from_array(&env, &[0xC0; 20]),
            minimum_indexer_stake: MIN_STAKE,
            delegation_ratio: ratio,
            delegation_tax_ppm: 10_000,
            delegation_unbonding_period: 2,
            thawing_period: 2,
            epoch_length: 10,
        },
    );
    let engine = Address::generate(&env);
    client.set_allocation_engine(&governor, &engine);

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &(u32::MAX as i128 * 64));
        StellarAssetClient::new(&env, &fee_token).mint(&user, &(ETH * 1_000));
        users.push(user);
    }
    let pick = |i: u8| &users[i as usize % users.len()];
    let l2 = |b: u8| BytesN::from_array(&env, &[b; 20]);
    // Undelegation may leave allocations over capacity; only the paths that
    // grow allocations or shrink own stake are checked.
    let mut pool_shrunk = false;

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Stake { who, amount } => {
                let _ = client.try_stake(pick(who), &(amount as i128));
            }
            FuzzAction::Unstake { who, amount } => {
                let _ = client.try_unstake(pick(who), &(amount as i128));
            }
            FuzzAction::Withdraw { who } => {
                let _ = client.try_withdraw(pick(who));
            }
            FuzzAction::Delegate { who, indexer, amount } => {
                let _ = client.try_delegate(pick(who), pick(indexer), &(amount as i128));
            }
            FuzzAction::Undelegate { who, indexer, shares } => {
                pool_shrunk = true;
                let _ = client.try_undelegate(pick(who), pick(indexer), &(shares as i128));
            }
            FuzzAction::Allocate { indexer, amount } => {
                let _ = client.try_commit_allocation_tokens(
                    &engine,
                    pick(indexer),
                    &(amount as i128),
                );
            }
            FuzzAction::Release { indexer, amount } => {
                let _ = client.try_release_allocation_tokens(
                    &engine,
                    pick(indexer),
                    &(amount as i128),
                );
            }
            FuzzAction::TransferStake { who, beneficiary, amount, overpay } => {
                let attached = if overpay { ETH + 1 } else { ETH };
                let result = client.try_transfer_stake_to_l2(
                    pick(who),
                    &l2(beneficiary),
                    &(amount as i128),
                    &MAX_GAS,
                    &GAS_PRICE_BID,
                    &MAX_SUBMISSION_COST,
                    &attached,
                );
                if overpay {
                    assert!(result.is_err(), "overpayment must be rejected");
                }
            }
            FuzzAction::TransferDelegation { who, indexer, beneficiary } => {
                pool_shrunk = true;
                let _ = client.try_transfer_delegation_to_l2(
                    pick(who),
                    pick(indexer),
                    &l2(beneficiary),
                    &MAX_GAS,
                    &GAS_PRICE_BID,
                    &MAX_SUBMISSION_COST,
                    &ETH,
                );
            }
            FuzzAction::Unlock { who, indexer } => {
                let _ = client.try_unlock_delegation_to_l2_indexer(pick(who), pick(indexer));
            }
            FuzzAction::NextEpoch => {
                let sequence = env.ledger().sequence();
                env.ledger().set_sequence_number(sequence + 10);
            }
        }

        for user in &users {
            let Some(stake) = client.get_stake(user) else {
                continue;
            };
            assert!(stake.tokens_staked >= 0);
            assert!(stake.tokens_locked >= 0 && stake.tokens_locked <= stake.tokens_staked);
            assert!(stake.tokens_allocated >= 0);
            let pool = client.get_delegation_pool(user);
            assert!(pool.tokens >= 0 && pool.shares >= 0);
            if !pool_shrunk {
                assert!(
                    stake.tokens_allocated
                        <= capacity::allocation_capacity(stake.own_stake(), pool.tokens, ratio),
                    "capacity exceeded: {:?}",
                    stake
                );
            }
        }
    }
});
