//! Moving stake and delegation positions to L2.
//!
//! Each operation validates against freshly read records, collects the bridge
//! fee, commits the ledger changes and only then calls the gateway. Any
//! failure, including one inside the gateway or the transfer tool, reverts the
//! whole invocation.

use common::{is_zero_l2_address, CallhookMessage, L2Address};
use soroban_sdk::{token, Address, Env};

use crate::{
    capacity,
    config::{self, StakingConfig},
    errors::ContractError,
    events,
    gateway::{self, GasParams},
    ledger::{self, DelegationPool},
    transfer_tool,
};

/// Where the bridge fee comes from.
pub enum GasFunding {
    /// Attached by the caller, who must send exactly the required fee.
    Attached { payer: Address, eth_amount: i128 },
    /// Drawn from the lock transfer tool on behalf of `l1_owner`.
    TransferTool { tool: Address, l1_owner: Address },
}

/// Send `amount` of the indexer's own stake to `l2_beneficiary`.
pub fn transfer_stake(
    env: &Env,
    config: &StakingConfig,
    indexer: &Address,
    l2_beneficiary: L2Address,
    amount: i128,
    gas: &GasParams,
    funding: GasFunding,
) -> Result<u64, ContractError> {
    let stake = ledger::get_stake(env, indexer)
        .filter(|s| s.tokens_staked > 0)
        .ok_or(ContractError::NoStake)?;
    if stake.tokens_locked != 0 {
        return Err(ContractError::LockedTokensPresent);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    if is_zero_l2_address(&l2_beneficiary) {
        return Err(ContractError::ZeroBeneficiary);
    }
    let first_transfer = match &stake.l2_beneficiary {
        Some(existing) if *existing != l2_beneficiary => {
            return Err(ContractError::BeneficiaryMismatch)
        }
        Some(_) => false,
        None => true,
    };
    if first_transfer && amount < config.minimum_indexer_stake {
        return Err(ContractError::BelowMinimumStakeSent);
    }
    if amount > stake.tokens_staked {
        return Err(ContractError::InsufficientStake);
    }

    let remaining = stake.tokens_staked - amount;
    if remaining != 0 && remaining < config.minimum_indexer_stake {
        return Err(ContractError::BelowMinimumStakeRemaining);
    }
    let pool = ledger::get_pool(env, indexer);
    if !capacity::covers_allocations(
        remaining,
        stake.tokens_allocated,
        pool.tokens,
        config.delegation_ratio,
    ) {
        return Err(ContractError::AllocationCapacityExceeded);
    }

    let fee = gas.required_eth()?;
    collect_gas(env, config, funding, fee)?;

    ledger::debit_stake(env, indexer, amount)?;
    ledger::set_beneficiary(env, indexer, &l2_beneficiary)?;

    let message = CallhookMessage::ReceiveIndexerStake {
        indexer: l2_beneficiary.clone(),
    };
    let seq_num = gateway::send_to_l2(env, config, amount, gas, fee, &message);

    events::publish_indexer_stake_transferred(
        env,
        indexer.clone(),
        l2_beneficiary,
        amount,
        seq_num,
    );
    Ok(seq_num)
}

/// Send the full value of `delegator`'s shares in `indexer`'s pool to L2.
pub fn transfer_delegation(
    env: &Env,
    config: &StakingConfig,
    delegator: &Address,
    indexer: &Address,
    l2_delegator: L2Address,
    gas: &GasParams,
    funding: GasFunding,
) -> Result<u64, ContractError> {
    let l2_indexer = transferred_indexer_beneficiary(env, indexer)?;
    if is_zero_l2_address(&l2_delegator) {
        return Err(ContractError::ZeroBeneficiary);
    }

    let delegation = ledger::get_delegation(env, delegator, indexer);
    if delegation.tokens_locked != 0 {
        return Err(ContractError::LockedTokensPresent);
    }
    let pool = ledger::get_pool(env, indexer);
    let tokens = pool.tokens_for_shares(delegation.shares);
    if tokens <= 0 {
        return Err(ContractError::NoDelegation);
    }

    let fee = gas.required_eth()?;
    collect_gas(env, config, funding, fee)?;

    ledger::put_pool(
        env,
        indexer,
        &DelegationPool {
            tokens: pool.tokens - tokens,
            shares: pool.shares - delegation.shares,
        },
    );
    ledger::zero_delegation(env, delegator, indexer);

    let message = CallhookMessage::ReceiveDelegation {
        indexer: l2_indexer.clone(),
        delegator: l2_delegator.clone(),
    };
    let seq_num = gateway::send_to_l2(env, config, tokens, gas, fee, &message);

    events::publish_delegation_transferred(
        env,
        delegator.clone(),
        l2_delegator,
        indexer.clone(),
        l2_indexer,
        tokens,
        seq_num,
    );
    Ok(seq_num)
}

/// Let `delegator` withdraw undelegated tokens right away once the indexer
/// has left L1.
pub fn unlock_delegation(
    env: &Env,
    config: &StakingConfig,
    delegator: &Address,
    indexer: &Address,
) -> Result<(), ContractError> {
    transferred_indexer_beneficiary(env, indexer)?;

    let mut delegation = ledger::get_delegation(env, delegator, indexer);
    if delegation.tokens_locked == 0 {
        return Err(ContractError::NotLocked);
    }
    delegation.tokens_locked_until = config::current_epoch(env, config);
    ledger::put_delegation(env, delegator, indexer, &delegation);

    events::publish_delegation_unlocked(env, indexer.clone(), delegator.clone());
    Ok(())
}

fn transferred_indexer_beneficiary(
    env: &Env,
    indexer: &Address,
) -> Result<L2Address, ContractError> {
    match ledger::get_stake(env, indexer) {
        Some(stake) if stake.is_fully_transferred() => stake
            .l2_beneficiary
            .ok_or(ContractError::IndexerNotFullyTransferred),
        _ => Err(ContractError::IndexerNotFullyTransferred),
    }
}

fn collect_gas(
    env: &Env,
    config: &StakingConfig,
    funding: GasFunding,
    fee: i128,
) -> Result<(), ContractError> {
    match funding {
        GasFunding::Attached { payer, eth_amount } => {
            if eth_amount != fee {
                return Err(ContractError::InvalidPaymentAmount);
            }
            if fee > 0 {
                token::Client::new(env, &config.fee_token).transfer(
                    &payer,
                    &env.current_contract_address(),
                    &fee,
                );
            }
            Ok(())
        }
        GasFunding::TransferTool { tool, l1_owner } => {
            transfer_tool::request_gas_funds(env, &tool, &config.fee_token, &l1_owner, fee)
        }
    }
}
