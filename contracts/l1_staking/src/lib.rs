#![no_std]

//! L1 staking ledger with one-way migration of stake and delegation to L2.
//!
//! Indexers stake, delegators delegate into per-indexer pools, and an external
//! allocation engine commits stake to open allocations. Positions leave for
//! L2 through the token gateway; see [`migration`] for the state machine.

pub mod capacity;
pub mod config;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod ledger;
pub mod migration;
pub mod transfer_tool;

use common::{is_zero_l2_address, L2Address};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env,
};

pub use config::{StakingConfig, MAX_PPM};
pub use errors::{ContractError, ErrorCategory};
pub use ledger::{Delegation, DelegationPool, IndexerStake};

use gateway::GasParams;
use migration::GasFunding;

// ── Public-facing types ──────────────────────────────────────────────────────

/// Capacity snapshot returned by `get_indexer_capacity`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexerCapacity {
    pub own_stake: i128,
    pub delegated_capacity: i128,
    pub capacity: i128,
    pub tokens_allocated: i128,
    pub available_for_migration: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct L1StakingContract;

#[contractimpl]
impl L1StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract. `governor` must be the controller's governor.
    pub fn initialize(
        env: Env,
        governor: Address,
        config: StakingConfig,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        governor.require_auth();
        config.validate()?;

        let current = common::ControllerClient::new(&env, &config.controller).get_governor();
        if governor != current {
            return Err(ContractError::Unauthorized);
        }

        config::store(&env, &config);
        events::publish_initialized(
            &env,
            &governor,
            config.controller,
            config.gateway,
            config.counterpart,
        );
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        config::load(&env)
    }

    // ── Governance ──────────────────────────────────────────────────────────

    pub fn set_minimum_indexer_stake(
        env: Env,
        caller: Address,
        value: i128,
    ) -> Result<(), ContractError> {
        let mut cfg = config::require_governor(&env, &caller)?;
        if value <= 0 {
            return Err(ContractError::InvalidInput);
        }
        cfg.minimum_indexer_stake = value;
        config::store(&env, &cfg);
        events::publish_parameter_updated(&env, symbol_short!("MIN_STAKE"), value);
        Ok(())
    }

    pub fn set_delegation_ratio(
        env: Env,
        caller: Address,
        ratio: u32,
    ) -> Result<(), ContractError> {
        let mut cfg = config::require_governor(&env, &caller)?;
        cfg.delegation_ratio = ratio;
        config::store(&env, &cfg);
        events::publish_parameter_updated(&env, symbol_short!("DEL_RATIO"), ratio as i128);
        Ok(())
    }

    /// Tax in parts per million, burned from every delegation.
    pub fn set_delegation_tax_percentage(
        env: Env,
        caller: Address,
        ppm: u32,
    ) -> Result<(), ContractError> {
        let mut cfg = config::require_governor(&env, &caller)?;
        if ppm > MAX_PPM {
            return Err(ContractError::InvalidInput);
        }
        cfg.delegation_tax_ppm = ppm;
        config::store(&env, &cfg);
        events::publish_parameter_updated(&env, symbol_short!("DEL_TAX"), ppm as i128);
        Ok(())
    }

    pub fn set_delegation_unbonding_period(
        env: Env,
        caller: Address,
        epochs: u32,
    ) -> Result<(), ContractError> {
        let mut cfg = config::require_governor(&env, &caller)?;
        cfg.delegation_unbonding_period = epochs;
        config::store(&env, &cfg);
        events::publish_parameter_updated(&env, symbol_short!("UNBONDING"), epochs as i128);
        Ok(())
    }

    pub fn set_thawing_period(env: Env, caller: Address, epochs: u32) -> Result<(), ContractError> {
        let mut cfg = config::require_governor(&env, &caller)?;
        cfg.thawing_period = epochs;
        config::store(&env, &cfg);
        events::publish_parameter_updated(&env, symbol_short!("THAWING"), epochs as i128);
        Ok(())
    }

    pub fn set_transfer_tool(
        env: Env,
        caller: Address,
        tool: Address,
    ) -> Result<(), ContractError> {
        config::require_governor(&env, &caller)?;
        config::set_transfer_tool(&env, &tool);
        events::publish_transfer_tool_set(&env, tool);
        Ok(())
    }

    pub fn get_transfer_tool(env: Env) -> Option<Address> {
        config::transfer_tool(&env)
    }

    /// Address of the staking contract on L2 that receives migrated positions.
    pub fn set_counterpart_staking_address(
        env: Env,
        caller: Address,
        counterpart: L2Address,
    ) -> Result<(), ContractError> {
        let mut cfg = config::require_governor(&env, &caller)?;
        if is_zero_l2_address(&counterpart) {
            return Err(ContractError::InvalidInput);
        }
        cfg.counterpart = counterpart.clone();
        config::store(&env, &cfg);
        events::publish_counterpart_set(&env, counterpart);
        Ok(())
    }

    pub fn set_allocation_engine(
        env: Env,
        caller: Address,
        engine: Address,
    ) -> Result<(), ContractError> {
        config::require_governor(&env, &caller)?;
        config::set_allocation_engine(&env, &engine);
        events::publish_allocation_engine_set(&env, engine);
        Ok(())
    }

    pub fn get_allocation_engine(env: Env) -> Option<Address> {
        config::allocation_engine(&env)
    }

    // ── Indexer stake ───────────────────────────────────────────────────────

    /// Deposit `tokens` into the indexer's stake.
    pub fn stake(env: Env, indexer: Address, tokens: i128) -> Result<(), ContractError> {
        indexer.require_auth();
        let cfg = config::load_unpaused(&env)?;
        if tokens <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut record = ledger::get_stake(&env, &indexer).unwrap_or_default();
        let staked = record
            .tokens_staked
            .checked_add(tokens)
            .ok_or(ContractError::InvalidInput)?;
        if staked < cfg.minimum_indexer_stake {
            return Err(ContractError::BelowMinimumStake);
        }

        token::Client::new(&env, &cfg.stake_token).transfer(
            &indexer,
            &env.current_contract_address(),
            &tokens,
        );

        record.tokens_staked = staked;
        ledger::put_stake(&env, &indexer, &record);

        events::publish_stake_deposited(&env, indexer, tokens, staked);
        Ok(())
    }

    /// Lock `tokens` for withdrawal after the thawing period.
    pub fn unstake(env: Env, indexer: Address, tokens: i128) -> Result<(), ContractError> {
        indexer.require_auth();
        let cfg = config::load_unpaused(&env)?;

        let mut record = ledger::get_stake(&env, &indexer)
            .filter(|s| s.tokens_staked > 0)
            .ok_or(ContractError::NoStake)?;
        if tokens <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let free = record.tokens_staked - record.tokens_locked;
        if tokens > free {
            return Err(ContractError::InsufficientStake);
        }
        let remaining = free - tokens;
        if remaining != 0 && remaining < cfg.minimum_indexer_stake {
            return Err(ContractError::BelowMinimumStakeRemaining);
        }
        let pool = ledger::get_pool(&env, &indexer);
        if !capacity::covers_allocations(
            remaining,
            record.tokens_allocated,
            pool.tokens,
            cfg.delegation_ratio,
        ) {
            return Err(ContractError::AllocationCapacityExceeded);
        }

        let until_epoch = config::current_epoch(&env, &cfg).saturating_add(cfg.thawing_period);
        record.tokens_locked += tokens;
        record.tokens_locked_until = until_epoch;
        ledger::put_stake(&env, &indexer, &record);

        events::publish_stake_locked(&env, indexer, tokens, until_epoch);
        Ok(())
    }

    /// Return thawed tokens to the indexer.
    pub fn withdraw(env: Env, indexer: Address) -> Result<i128, ContractError> {
        indexer.require_auth();
        let cfg = config::load_unpaused(&env)?;

        let mut record = ledger::get_stake(&env, &indexer).ok_or(ContractError::NoStake)?;
        let tokens = record.tokens_locked;
        if tokens == 0 {
            return Err(ContractError::NothingToWithdraw);
        }
        if config::current_epoch(&env, &cfg) < record.tokens_locked_until {
            return Err(ContractError::StillLocked);
        }

        record.tokens_staked -= tokens;
        record.tokens_locked = 0;
        record.tokens_locked_until = 0;
        ledger::put_stake(&env, &indexer, &record);

        token::Client::new(&env, &cfg.stake_token).transfer(
            &env.current_contract_address(),
            &indexer,
            &tokens,
        );

        events::publish_stake_withdrawn(&env, indexer, tokens);
        Ok(tokens)
    }

    // ── Allocation capacity ─────────────────────────────────────────────────

    /// Reserve `tokens` of the indexer's capacity for a new allocation.
    pub fn commit_allocation_tokens(
        env: Env,
        engine: Address,
        indexer: Address,
        tokens: i128,
    ) -> Result<(), ContractError> {
        let cfg = Self::require_allocation_engine(&env, &engine)?;
        if tokens <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut record = ledger::get_stake(&env, &indexer)
            .filter(|s| s.tokens_staked > 0)
            .ok_or(ContractError::NoStake)?;
        let allocated = record
            .tokens_allocated
            .checked_add(tokens)
            .ok_or(ContractError::InvalidInput)?;
        let pool = ledger::get_pool(&env, &indexer);
        if !capacity::covers_allocations(
            record.own_stake(),
            allocated,
            pool.tokens,
            cfg.delegation_ratio,
        ) {
            return Err(ContractError::AllocationCapacityExceeded);
        }

        record.tokens_allocated = allocated;
        ledger::put_stake(&env, &indexer, &record);

        events::publish_allocation_committed(&env, indexer, tokens, allocated);
        Ok(())
    }

    pub fn release_allocation_tokens(
        env: Env,
        engine: Address,
        indexer: Address,
        tokens: i128,
    ) -> Result<(), ContractError> {
        Self::require_allocation_engine(&env, &engine)?;

        let mut record = ledger::get_stake(&env, &indexer).ok_or(ContractError::NoStake)?;
        if tokens <= 0 || tokens > record.tokens_allocated {
            return Err(ContractError::InvalidInput);
        }
        record.tokens_allocated -= tokens;
        ledger::put_stake(&env, &indexer, &record);

        events::publish_allocation_released(&env, indexer, tokens, record.tokens_allocated);
        Ok(())
    }

    // ── Delegation ──────────────────────────────────────────────────────────

    /// Delegate `tokens` to `indexer`. The delegation tax is burned and the
    /// rest buys pool shares. Returns the shares minted.
    pub fn delegate(
        env: Env,
        delegator: Address,
        indexer: Address,
        tokens: i128,
    ) -> Result<i128, ContractError> {
        delegator.require_auth();
        let cfg = config::load_unpaused(&env)?;
        if tokens <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let tax = tokens.saturating_mul(cfg.delegation_tax_ppm as i128) / MAX_PPM as i128;
        let net = tokens - tax;
        let mut pool = ledger::get_pool(&env, &indexer);
        let shares = pool.shares_for_tokens(net);
        if shares <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let stake_token = token::Client::new(&env, &cfg.stake_token);
        let this = env.current_contract_address();
        stake_token.transfer(&delegator, &this, &tokens);
        if tax > 0 {
            stake_token.burn(&this, &tax);
        }

        pool.tokens += net;
        pool.shares += shares;
        ledger::put_pool(&env, &indexer, &pool);

        let mut delegation = ledger::get_delegation(&env, &delegator, &indexer);
        delegation.shares += shares;
        ledger::put_delegation(&env, &delegator, &indexer, &delegation);

        events::publish_stake_delegated(&env, indexer, delegator, net, shares);
        Ok(shares)
    }

    /// Redeem `shares` and lock the tokens for the unbonding period. A
    /// previously locked balance that has already unbonded is paid out first.
    pub fn undelegate(
        env: Env,
        delegator: Address,
        indexer: Address,
        shares: i128,
    ) -> Result<i128, ContractError> {
        delegator.require_auth();
        let cfg = config::load_unpaused(&env)?;

        let mut delegation = ledger::get_delegation(&env, &delegator, &indexer);
        if shares <= 0 || shares > delegation.shares {
            return Err(ContractError::InsufficientShares);
        }

        let epoch = config::current_epoch(&env, &cfg);
        if delegation.tokens_locked > 0 && epoch >= delegation.tokens_locked_until {
            Self::pay_delegator(&env, &cfg, &indexer, &delegator, delegation.tokens_locked);
            delegation.tokens_locked = 0;
        }

        let mut pool = ledger::get_pool(&env, &indexer);
        let tokens = pool.tokens_for_shares(shares);
        pool.tokens -= tokens;
        pool.shares -= shares;
        ledger::put_pool(&env, &indexer, &pool);

        let until_epoch = epoch.saturating_add(cfg.delegation_unbonding_period);
        delegation.shares -= shares;
        delegation.tokens_locked += tokens;
        delegation.tokens_locked_until = until_epoch;
        ledger::put_delegation(&env, &delegator, &indexer, &delegation);

        events::publish_stake_delegated_locked(
            &env,
            indexer,
            delegator,
            tokens,
            shares,
            until_epoch,
        );
        Ok(tokens)
    }

    pub fn withdraw_delegated(
        env: Env,
        delegator: Address,
        indexer: Address,
    ) -> Result<i128, ContractError> {
        delegator.require_auth();
        let cfg = config::load_unpaused(&env)?;

        let mut delegation = ledger::get_delegation(&env, &delegator, &indexer);
        let tokens = delegation.tokens_locked;
        if tokens == 0 {
            return Err(ContractError::NothingToWithdraw);
        }
        if config::current_epoch(&env, &cfg) < delegation.tokens_locked_until {
            return Err(ContractError::StillLocked);
        }

        delegation.tokens_locked = 0;
        delegation.tokens_locked_until = 0;
        ledger::put_delegation(&env, &delegator, &indexer, &delegation);

        Self::pay_delegator(&env, &cfg, &indexer, &delegator, tokens);
        Ok(tokens)
    }

    // ── Migration to L2 ─────────────────────────────────────────────────────

    /// Send `amount` of own stake to `l2_beneficiary` on L2. `eth_amount` of
    /// the fee token is pulled from the indexer and must equal
    /// `max_submission_cost + max_gas * gas_price_bid`.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_stake_to_l2(
        env: Env,
        indexer: Address,
        l2_beneficiary: L2Address,
        amount: i128,
        max_gas: i128,
        gas_price_bid: i128,
        max_submission_cost: i128,
        eth_amount: i128,
    ) -> Result<u64, ContractError> {
        indexer.require_auth();
        let gas = GasParams {
            max_gas,
            gas_price_bid,
            max_submission_cost,
        };
        config::load_unpaused(&env)
            .and_then(|cfg| {
                let funding = GasFunding::Attached {
                    payer: indexer.clone(),
                    eth_amount,
                };
                migration::transfer_stake(
                    &env,
                    &cfg,
                    &indexer,
                    l2_beneficiary,
                    amount,
                    &gas,
                    funding,
                )
            })
            .inspect_err(|e| log!(&env, "stake transfer rejected", indexer, *e as u32))
    }

    /// Like `transfer_stake_to_l2` for an indexer whose stake belongs to a
    /// vesting lock: the beneficiary and the fee come from the transfer tool.
    pub fn transfer_locked_stake_to_l2(
        env: Env,
        indexer: Address,
        amount: i128,
        max_gas: i128,
        gas_price_bid: i128,
        max_submission_cost: i128,
    ) -> Result<u64, ContractError> {
        indexer.require_auth();
        let gas = GasParams {
            max_gas,
            gas_price_bid,
            max_submission_cost,
        };
        config::load_unpaused(&env)
            .and_then(|cfg| {
                let tool = config::transfer_tool(&env).ok_or(ContractError::TransferToolNotSet)?;
                let l2_beneficiary = transfer_tool::resolve_beneficiary(&env, &tool, &indexer)?;
                let funding = GasFunding::TransferTool {
                    tool,
                    l1_owner: indexer.clone(),
                };
                migration::transfer_stake(
                    &env,
                    &cfg,
                    &indexer,
                    l2_beneficiary,
                    amount,
                    &gas,
                    funding,
                )
            })
            .inspect_err(|e| log!(&env, "locked stake transfer rejected", indexer, *e as u32))
    }

    /// Send the delegator's whole position with a fully transferred indexer
    /// to `l2_beneficiary`.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_delegation_to_l2(
        env: Env,
        delegator: Address,
        indexer: Address,
        l2_beneficiary: L2Address,
        max_gas: i128,
        gas_price_bid: i128,
        max_submission_cost: i128,
        eth_amount: i128,
    ) -> Result<u64, ContractError> {
        delegator.require_auth();
        let gas = GasParams {
            max_gas,
            gas_price_bid,
            max_submission_cost,
        };
        config::load_unpaused(&env)
            .and_then(|cfg| {
                let funding = GasFunding::Attached {
                    payer: delegator.clone(),
                    eth_amount,
                };
                migration::transfer_delegation(
                    &env,
                    &cfg,
                    &delegator,
                    &indexer,
                    l2_beneficiary,
                    &gas,
                    funding,
                )
            })
            .inspect_err(|e| log!(&env, "delegation transfer rejected", delegator, *e as u32))
    }

    pub fn transfer_locked_delegation_to_l2(
        env: Env,
        delegator: Address,
        indexer: Address,
        max_gas: i128,
        gas_price_bid: i128,
        max_submission_cost: i128,
    ) -> Result<u64, ContractError> {
        delegator.require_auth();
        let gas = GasParams {
            max_gas,
            gas_price_bid,
            max_submission_cost,
        };
        config::load_unpaused(&env)
            .and_then(|cfg| {
                let tool = config::transfer_tool(&env).ok_or(ContractError::TransferToolNotSet)?;
                let l2_beneficiary = transfer_tool::resolve_beneficiary(&env, &tool, &delegator)?;
                let funding = GasFunding::TransferTool {
                    tool,
                    l1_owner: delegator.clone(),
                };
                migration::transfer_delegation(
                    &env,
                    &cfg,
                    &delegator,
                    &indexer,
                    l2_beneficiary,
                    &gas,
                    funding,
                )
            })
            .inspect_err(|e| {
                log!(&env, "locked delegation transfer rejected", delegator, *e as u32)
            })
    }

    /// Skip the unbonding wait on tokens undelegated from an indexer that has
    /// moved its whole stake to L2.
    pub fn unlock_delegation_to_l2_indexer(
        env: Env,
        delegator: Address,
        indexer: Address,
    ) -> Result<(), ContractError> {
        delegator.require_auth();
        let cfg = config::load_unpaused(&env)?;
        migration::unlock_delegation(&env, &cfg, &delegator, &indexer)
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_stake(env: Env, indexer: Address) -> Option<IndexerStake> {
        ledger::get_stake(&env, &indexer)
    }

    pub fn get_l2_beneficiary(env: Env, indexer: Address) -> Option<L2Address> {
        ledger::get_stake(&env, &indexer).and_then(|s| s.l2_beneficiary)
    }

    pub fn get_delegation(env: Env, delegator: Address, indexer: Address) -> Delegation {
        ledger::get_delegation(&env, &delegator, &indexer)
    }

    pub fn get_delegation_pool(env: Env, indexer: Address) -> DelegationPool {
        ledger::get_pool(&env, &indexer)
    }

    /// Own stake the indexer could send to L2 without breaking allocation capacity.
    pub fn get_available_for_migration(env: Env, indexer: Address) -> Result<i128, ContractError> {
        let cfg = config::load(&env)?;
        let record = ledger::get_stake(&env, &indexer).unwrap_or_default();
        let pool = ledger::get_pool(&env, &indexer);
        Ok(capacity::available_for_migration(
            &record,
            pool.tokens,
            cfg.delegation_ratio,
            cfg.minimum_indexer_stake,
        ))
    }

    pub fn get_indexer_capacity(
        env: Env,
        indexer: Address,
    ) -> Result<IndexerCapacity, ContractError> {
        let cfg = config::load(&env)?;
        let record = ledger::get_stake(&env, &indexer).unwrap_or_default();
        let pool = ledger::get_pool(&env, &indexer);
        let ratio = cfg.delegation_ratio;
        let own_stake = record.own_stake();

        Ok(IndexerCapacity {
            own_stake,
            delegated_capacity: capacity::delegated_capacity(own_stake, pool.tokens, ratio),
            capacity: capacity::allocation_capacity(own_stake, pool.tokens, ratio),
            tokens_allocated: record.tokens_allocated,
            available_for_migration: capacity::available_for_migration(
                &record,
                pool.tokens,
                ratio,
                cfg.minimum_indexer_stake,
            ),
        })
    }

    pub fn current_epoch(env: Env) -> Result<u32, ContractError> {
        let cfg = config::load(&env)?;
        Ok(config::current_epoch(&env, &cfg))
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

impl L1StakingContract {
    fn require_allocation_engine(
        env: &Env,
        engine: &Address,
    ) -> Result<StakingConfig, ContractError> {
        engine.require_auth();
        let cfg = config::load_unpaused(env)?;
        match config::allocation_engine(env) {
            Some(configured) if configured == *engine => Ok(cfg),
            _ => Err(ContractError::Unauthorized),
        }
    }

    fn pay_delegator(
        env: &Env,
        cfg: &StakingConfig,
        indexer: &Address,
        delegator: &Address,
        tokens: i128,
    ) {
        token::Client::new(env, &cfg.stake_token).transfer(
            &env.current_contract_address(),
            delegator,
            &tokens,
        );
        events::publish_stake_delegated_withdrawn(env, indexer.clone(), delegator.clone(), tokens);
    }
}



#[cfg(test)]
mod test_ledger;
