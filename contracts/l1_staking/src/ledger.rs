//! Ledger store: indexer stakes, delegations and delegation pools.
//!
//! All records live in persistent storage under tuple keys and extend their
//! TTL on every access. Delegation records and pools are always present from
//! the caller's point of view: an absent key reads as an empty record.

use common::L2Address;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const STAKE: Symbol = symbol_short!("STAKE");
const DELEGATION: Symbol = symbol_short!("DELEG");
const POOL: Symbol = symbol_short!("POOL");

pub(crate) const TTL_THRESHOLD: u32 = 17_280;
pub(crate) const TTL_EXTEND_TO: u32 = 518_400;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexerStake {
    pub tokens_staked: i128,
    /// Tokens committed to open allocations.
    pub tokens_allocated: i128,
    /// Part of `tokens_staked` waiting out the thawing period.
    pub tokens_locked: i128,
    pub tokens_locked_until: u32,
    /// Set by the first transfer to L2 and never changed afterwards.
    pub l2_beneficiary: Option<L2Address>,
}

impl IndexerStake {
    /// Stake that still backs allocations: everything not thawing.
    pub fn own_stake(&self) -> i128 {
        self.tokens_staked - self.tokens_locked
    }

    /// Whole stake moved to L2: nothing left on L1 and a beneficiary recorded.
    pub fn is_fully_transferred(&self) -> bool {
        self.tokens_staked == 0 && self.l2_beneficiary.is_some()
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Delegation {
    pub shares: i128,
    pub tokens_locked: i128,
    pub tokens_locked_until: u32,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DelegationPool {
    pub tokens: i128,
    pub shares: i128,
}

impl DelegationPool {
    /// Token value of `shares` at the pool's current exchange rate.
    pub fn tokens_for_shares(&self, shares: i128) -> i128 {
        if self.shares <= 0 || shares <= 0 {
            return 0;
        }
        shares.saturating_mul(self.tokens) / self.shares
    }

    /// Shares minted for `tokens`; one to one while the pool is empty.
    pub fn shares_for_tokens(&self, tokens: i128) -> i128 {
        if self.tokens <= 0 || self.shares <= 0 {
            return tokens;
        }
        tokens.saturating_mul(self.shares) / self.tokens
    }
}

// ── Indexer stakes ───────────────────────────────────────────────────────────

pub fn get_stake(env: &Env, indexer: &Address) -> Option<IndexerStake> {
    let key = (STAKE, indexer.clone());
    let record = env.storage().persistent().get(&key);
    if record.is_some() {
        extend(env, &key);
    }
    record
}

pub fn put_stake(env: &Env, indexer: &Address, record: &IndexerStake) {
    let key = (STAKE, indexer.clone());
    env.storage().persistent().set(&key, record);
    extend(env, &key);
}

/// Remove `amount` from the indexer's staked tokens.
pub fn debit_stake(
    env: &Env,
    indexer: &Address,
    amount: i128,
) -> Result<IndexerStake, ContractError> {
    let mut record = get_stake(env, indexer).ok_or(ContractError::NoStake)?;
    if amount < 0 || amount > record.tokens_staked {
        return Err(ContractError::InsufficientStake);
    }
    record.tokens_staked -= amount;
    put_stake(env, indexer, &record);
    Ok(record)
}

/// Record the indexer's L2 beneficiary. Writing the same value again is a
/// no-op; any other value is rejected.
pub fn set_beneficiary(
    env: &Env,
    indexer: &Address,
    l2_beneficiary: &L2Address,
) -> Result<(), ContractError> {
    let mut record = get_stake(env, indexer).ok_or(ContractError::NoStake)?;
    match &record.l2_beneficiary {
        Some(existing) if existing != l2_beneficiary => Err(ContractError::BeneficiaryMismatch),
        Some(_) => Ok(()),
        None => {
            record.l2_beneficiary = Some(l2_beneficiary.clone());
            put_stake(env, indexer, &record);
            Ok(())
        }
    }
}

// ── Delegations ──────────────────────────────────────────────────────────────

pub fn get_delegation(env: &Env, delegator: &Address, indexer: &Address) -> Delegation {
    let key = (DELEGATION, delegator.clone(), indexer.clone());
    match env.storage().persistent().get(&key) {
        Some(record) => {
            extend(env, &key);
            record
        }
        None => Delegation::default(),
    }
}

pub fn put_delegation(env: &Env, delegator: &Address, indexer: &Address, record: &Delegation) {
    let key = (DELEGATION, delegator.clone(), indexer.clone());
    env.storage().persistent().set(&key, record);
    extend(env, &key);
}

/// Clear the delegator's shares, leaving any undelegation lock untouched.
pub fn zero_delegation(env: &Env, delegator: &Address, indexer: &Address) {
    let mut record = get_delegation(env, delegator, indexer);
    record.shares = 0;
    put_delegation(env, delegator, indexer, &record);
}

pub fn get_pool(env: &Env, indexer: &Address) -> DelegationPool {
    let key = (POOL, indexer.clone());
    match env.storage().persistent().get(&key) {
        Some(pool) => {
            extend(env, &key);
            pool
        }
        None => DelegationPool::default(),
    }
}

pub fn put_pool(env: &Env, indexer: &Address, pool: &DelegationPool) {
    let key = (POOL, indexer.clone());
    env.storage().persistent().set(&key, pool);
    extend(env, &key);
}

fn extend<K>(env: &Env, key: &K)
where
    K: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
