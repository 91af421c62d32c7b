use common::{is_zero_l2_address, ControllerClient, L2Address};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");
const TRANSFER_TOOL: Symbol = symbol_short!("XFER_TOOL");
const ALLOC_ENGINE: Symbol = symbol_short!("ALLOC_ENG");

const INSTANCE_TTL_THRESHOLD: u32 = 17_280;
const INSTANCE_TTL_EXTEND_TO: u32 = 518_400;

/// Parts-per-million denominator for the delegation tax.
pub const MAX_PPM: u32 = 1_000_000;

/// Protocol parameters, written by `initialize` and updated by governance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Holds the pause flags and the governor.
    pub controller: Address,
    pub stake_token: Address,
    /// Token that pays for L2 execution (the bridge's native currency).
    pub fee_token: Address,
    pub gateway: Address,
    /// Staking contract on L2 that receives migrated positions.
    pub counterpart: L2Address,
    pub minimum_indexer_stake: i128,
    pub delegation_ratio: u32,
    pub delegation_tax_ppm: u32,
    /// Epochs a delegator waits between undelegating and withdrawing.
    pub delegation_unbonding_period: u32,
    /// Epochs an indexer waits between unstaking and withdrawing.
    pub thawing_period: u32,
    /// Ledgers per epoch.
    pub epoch_length: u32,
}

impl StakingConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.minimum_indexer_stake <= 0
            || self.delegation_tax_ppm > MAX_PPM
            || self.epoch_length == 0
            || is_zero_l2_address(&self.counterpart)
            || self.stake_token == self.fee_token
        {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

pub fn transfer_tool(env: &Env) -> Option<Address> {
    env.storage().instance().get(&TRANSFER_TOOL)
}

pub fn set_transfer_tool(env: &Env, tool: &Address) {
    env.storage().instance().set(&TRANSFER_TOOL, tool);
}

pub fn allocation_engine(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ALLOC_ENGINE)
}

pub fn set_allocation_engine(env: &Env, engine: &Address) {
    env.storage().instance().set(&ALLOC_ENGINE, engine);
}

pub fn current_epoch(env: &Env, config: &StakingConfig) -> u32 {
    env.ledger().sequence() / config.epoch_length
}

/// Load the configuration, failing if the controller reports either pause flag.
pub fn load_unpaused(env: &Env) -> Result<StakingConfig, ContractError> {
    let config = load(env)?;
    let controller = ControllerClient::new(env, &config.controller);
    if controller.is_paused() || controller.is_partial_paused() {
        return Err(ContractError::ProtocolPaused);
    }
    Ok(config)
}

/// Require `caller` to be the controller's governor.
pub fn require_governor(env: &Env, caller: &Address) -> Result<StakingConfig, ContractError> {
    caller.require_auth();
    let config = load(env)?;
    let governor = ControllerClient::new(env, &config.controller).get_governor();
    if *caller != governor {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}
