#![allow(deprecated)] // events().publish migration tracked separately

use common::L2Address;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Configuration ────────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub controller: Address,
    pub gateway: Address,
    pub counterpart: L2Address,
    pub timestamp: u64,
}

/// Fired when governance changes a numeric parameter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterUpdatedEvent {
    pub param: Symbol,
    pub value: i128,
    pub timestamp: u64,
}

/// Fired when governance sets the transfer tool or allocation engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressSetEvent {
    pub address: Address,
    pub timestamp: u64,
}

/// Fired when governance changes the L2 counterpart address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CounterpartSetEvent {
    pub counterpart: L2Address,
    pub timestamp: u64,
}

pub fn publish_initialized(
    env: &Env,
    governor: &Address,
    controller: Address,
    gateway: Address,
    counterpart: L2Address,
) {
    env.events().publish(
        (symbol_short!("INIT"), governor.clone()),
        InitializedEvent {
            controller,
            gateway,
            counterpart,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_parameter_updated(env: &Env, param: Symbol, value: i128) {
    env.events().publish(
        (symbol_short!("PARAM"), param.clone()),
        ParameterUpdatedEvent {
            param,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transfer_tool_set(env: &Env, tool: Address) {
    env.events().publish(
        (symbol_short!("XFER_TOOL"),),
        AddressSetEvent {
            address: tool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_allocation_engine_set(env: &Env, engine: Address) {
    env.events().publish(
        (symbol_short!("ALLOC_ENG"),),
        AddressSetEvent {
            address: engine,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_counterpart_set(env: &Env, counterpart: L2Address) {
    env.events().publish(
        (symbol_short!("CPART_SET"),),
        CounterpartSetEvent {
            counterpart,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Indexer stake ────────────────────────────────────────────────────────────

/// Fired when an indexer deposits stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDepositedEvent {
    pub indexer: Address,
    pub tokens: i128,
    pub tokens_staked: i128,
    pub timestamp: u64,
}

/// Fired when an indexer starts thawing stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeLockedEvent {
    pub indexer: Address,
    pub tokens: i128,
    pub until_epoch: u32,
    pub timestamp: u64,
}

/// Fired when an indexer withdraws thawed stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub indexer: Address,
    pub tokens: i128,
    pub timestamp: u64,
}

/// Fired when the allocation engine commits or releases tokens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationTokensEvent {
    pub indexer: Address,
    pub tokens: i128,
    pub tokens_allocated: i128,
    pub timestamp: u64,
}

pub fn publish_stake_deposited(env: &Env, indexer: Address, tokens: i128, tokens_staked: i128) {
    env.events().publish(
        (symbol_short!("STK_DEP"), indexer.clone()),
        StakeDepositedEvent {
            indexer,
            tokens,
            tokens_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_locked(env: &Env, indexer: Address, tokens: i128, until_epoch: u32) {
    env.events().publish(
        (symbol_short!("STK_LOCK"), indexer.clone()),
        StakeLockedEvent {
            indexer,
            tokens,
            until_epoch,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_withdrawn(env: &Env, indexer: Address, tokens: i128) {
    env.events().publish(
        (symbol_short!("STK_WDRW"), indexer.clone()),
        StakeWithdrawnEvent {
            indexer,
            tokens,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_allocation_committed(
    env: &Env,
    indexer: Address,
    tokens: i128,
    tokens_allocated: i128,
) {
    env.events().publish(
        (symbol_short!("ALLOC_ADD"), indexer.clone()),
        AllocationTokensEvent {
            indexer,
            tokens,
            tokens_allocated,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_allocation_released(
    env: &Env,
    indexer: Address,
    tokens: i128,
    tokens_allocated: i128,
) {
    env.events().publish(
        (symbol_short!("ALLOC_REL"), indexer.clone()),
        AllocationTokensEvent {
            indexer,
            tokens,
            tokens_allocated,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Delegation ───────────────────────────────────────────────────────────────

/// Fired when a delegator buys pool shares.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDelegatedEvent {
    pub indexer: Address,
    pub delegator: Address,
    pub tokens: i128,
    pub shares: i128,
    pub timestamp: u64,
}

/// Fired when a delegator redeems shares into an unbonding lock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDelegatedLockedEvent {
    pub indexer: Address,
    pub delegator: Address,
    pub tokens: i128,
    pub shares: i128,
    pub until_epoch: u32,
    pub timestamp: u64,
}

/// Fired when unbonded delegation is paid out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDelegatedWithdrawnEvent {
    pub indexer: Address,
    pub delegator: Address,
    pub tokens: i128,
    pub timestamp: u64,
}

pub fn publish_stake_delegated(
    env: &Env,
    indexer: Address,
    delegator: Address,
    tokens: i128,
    shares: i128,
) {
    env.events().publish(
        (symbol_short!("DELEG"), delegator.clone()),
        StakeDelegatedEvent {
            indexer,
            delegator,
            tokens,
            shares,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_delegated_locked(
    env: &Env,
    indexer: Address,
    delegator: Address,
    tokens: i128,
    shares: i128,
    until_epoch: u32,
) {
    env.events().publish(
        (symbol_short!("DELEG_LCK"), delegator.clone()),
        StakeDelegatedLockedEvent {
            indexer,
            delegator,
            tokens,
            shares,
            until_epoch,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_delegated_withdrawn(
    env: &Env,
    indexer: Address,
    delegator: Address,
    tokens: i128,
) {
    env.events().publish(
        (symbol_short!("DELEG_WD"), delegator.clone()),
        StakeDelegatedWithdrawnEvent {
            indexer,
            delegator,
            tokens,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Migration ────────────────────────────────────────────────────────────────

/// Fired when own stake is sent to L2.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexerStakeTransferredEvent {
    pub indexer: Address,
    pub l2_beneficiary: L2Address,
    pub amount: i128,
    pub seq_num: u64,
    pub timestamp: u64,
}

/// Fired when a delegation is sent to L2.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationTransferredEvent {
    pub delegator: Address,
    pub l2_delegator: L2Address,
    pub indexer: Address,
    pub l2_indexer: L2Address,
    pub tokens: i128,
    pub seq_num: u64,
    pub timestamp: u64,
}

/// Fired when a delegator's lock is released early after the indexer left for L2.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationUnlockedEvent {
    pub indexer: Address,
    pub delegator: Address,
    pub timestamp: u64,
}

pub fn publish_indexer_stake_transferred(
    env: &Env,
    indexer: Address,
    l2_beneficiary: L2Address,
    amount: i128,
    seq_num: u64,
) {
    env.events().publish(
        (symbol_short!("STK_TO_L2"), indexer.clone()),
        IndexerStakeTransferredEvent {
            indexer,
            l2_beneficiary,
            amount,
            seq_num,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delegation_transferred(
    env: &Env,
    delegator: Address,
    l2_delegator: L2Address,
    indexer: Address,
    l2_indexer: L2Address,
    tokens: i128,
    seq_num: u64,
) {
    env.events().publish(
        (symbol_short!("DEL_TO_L2"), delegator.clone()),
        DelegationTransferredEvent {
            delegator,
            l2_delegator,
            indexer,
            l2_indexer,
            tokens,
            seq_num,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delegation_unlocked(env: &Env, indexer: Address, delegator: Address) {
    env.events().publish(
        (symbol_short!("DEL_UNLCK"), delegator.clone()),
        DelegationUnlockedEvent {
            indexer,
            delegator,
            timestamp: env.ledger().timestamp(),
        },
    );
}
