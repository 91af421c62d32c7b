#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

/// Fired when a pause switch is flipped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Fired on each step of a governor handover.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernorHandoverEvent {
    pub governor: Address,
    pub counterpart: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, governor: Address) {
    env.events().publish((symbol_short!("INIT"),), governor);
}

pub fn publish_partial_pause_changed(env: &Env, caller: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("P_PART"),),
        PauseChangedEvent {
            caller,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_changed(env: &Env, caller: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("P_FULL"),),
        PauseChangedEvent {
            caller,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_guardian_set(env: &Env, guardian: Address) {
    env.events().publish((symbol_short!("GUARDIAN"),), guardian);
}

pub fn publish_governor_proposed(env: &Env, governor: Address, proposed: Address) {
    env.events().publish(
        (symbol_short!("GOV_PROP"), governor.clone()),
        GovernorHandoverEvent {
            governor,
            counterpart: proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_governor_accepted(env: &Env, old_governor: Address, new_governor: Address) {
    env.events().publish(
        (symbol_short!("GOV_ACPT"), new_governor.clone()),
        GovernorHandoverEvent {
            governor: new_governor,
            counterpart: old_governor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_governor_transfer_cancelled(env: &Env, governor: Address, cancelled: Address) {
    env.events().publish(
        (symbol_short!("GOV_CNCL"), governor.clone()),
        GovernorHandoverEvent {
            governor,
            counterpart: cancelled,
            timestamp: env.ledger().timestamp(),
        },
    );
}
