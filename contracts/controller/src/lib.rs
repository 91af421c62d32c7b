#![no_std]

pub mod events;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const GOVERNOR: Symbol = symbol_short!("GOV");
const PENDING_GOVERNOR: Symbol = symbol_short!("PEND_GOV");
const PAUSE_GUARDIAN: Symbol = symbol_short!("GUARDIAN");
const PAUSED: Symbol = symbol_short!("P_FULL");
const PARTIAL_PAUSED: Symbol = symbol_short!("P_PART");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ControllerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NoPendingGovernor = 4,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Holds the protocol governor and the two pause switches every protocol
/// contract consults before mutating state.
///
/// A full pause stops everything; a partial pause stops the operations that
/// move stake between accounts or chains.
#[contract]
pub struct ControllerContract;

#[contractimpl]
impl ControllerContract {
    pub fn initialize(env: Env, governor: Address) -> Result<(), ControllerError> {
        if env.storage().instance().has(&GOVERNOR) {
            return Err(ControllerError::AlreadyInitialized);
        }
        governor.require_auth();

        env.storage().instance().set(&GOVERNOR, &governor);
        env.storage().instance().set(&PAUSED, &false);
        env.storage().instance().set(&PARTIAL_PAUSED, &false);

        events::publish_initialized(&env, governor);

        Ok(())
    }

    // ── Pause switches ──────────────────────────────────────────────────────

    /// Set or clear the partial pause. Governor or pause guardian only.
    pub fn set_partial_paused(
        env: Env,
        caller: Address,
        paused: bool,
    ) -> Result<(), ControllerError> {
        caller.require_auth();
        Self::require_pause_authority(&env, &caller)?;

        env.storage().instance().set(&PARTIAL_PAUSED, &paused);

        events::publish_partial_pause_changed(&env, caller, paused);

        Ok(())
    }

    /// Set or clear the full pause. Governor or pause guardian only.
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), ControllerError> {
        caller.require_auth();
        Self::require_pause_authority(&env, &caller)?;

        env.storage().instance().set(&PAUSED, &paused);

        events::publish_pause_changed(&env, caller, paused);

        Ok(())
    }

    pub fn is_partial_paused(env: Env) -> bool {
        env.storage().instance().get(&PARTIAL_PAUSED).unwrap_or(false)
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage().instance().get(&PAUSED).unwrap_or(false)
    }

    /// Appoint the account allowed to flip the pause switches besides the governor.
    pub fn set_pause_guardian(
        env: Env,
        governor: Address,
        guardian: Address,
    ) -> Result<(), ControllerError> {
        governor.require_auth();
        Self::require_governor(&env, &governor)?;

        env.storage().instance().set(&PAUSE_GUARDIAN, &guardian);

        events::publish_pause_guardian_set(&env, guardian);

        Ok(())
    }

    pub fn get_pause_guardian(env: Env) -> Option<Address> {
        env.storage().instance().get(&PAUSE_GUARDIAN)
    }

    // ── Governor handover (two-step) ────────────────────────────────────────

    pub fn get_governor(env: Env) -> Result<Address, ControllerError> {
        env.storage()
            .instance()
            .get(&GOVERNOR)
            .ok_or(ControllerError::NotInitialized)
    }

    /// Propose a new governor. The proposed account must call
    /// `accept_governor` to complete the handover.
    pub fn propose_governor(
        env: Env,
        governor: Address,
        new_governor: Address,
    ) -> Result<(), ControllerError> {
        governor.require_auth();
        Self::require_governor(&env, &governor)?;

        env.storage().instance().set(&PENDING_GOVERNOR, &new_governor);

        events::publish_governor_proposed(&env, governor, new_governor);

        Ok(())
    }

    pub fn accept_governor(env: Env, new_governor: Address) -> Result<(), ControllerError> {
        new_governor.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_GOVERNOR)
            .ok_or(ControllerError::NoPendingGovernor)?;
        if new_governor != pending {
            return Err(ControllerError::Unauthorized);
        }

        let old_governor = Self::get_governor(env.clone())?;

        env.storage().instance().set(&GOVERNOR, &new_governor);
        env.storage().instance().remove(&PENDING_GOVERNOR);

        events::publish_governor_accepted(&env, old_governor, new_governor);

        Ok(())
    }

    pub fn cancel_governor_transfer(env: Env, governor: Address) -> Result<(), ControllerError> {
        governor.require_auth();
        Self::require_governor(&env, &governor)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_GOVERNOR)
            .ok_or(ControllerError::NoPendingGovernor)?;
        env.storage().instance().remove(&PENDING_GOVERNOR);

        events::publish_governor_transfer_cancelled(&env, governor, pending);

        Ok(())
    }

    pub fn get_pending_governor(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_GOVERNOR)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_governor(env: &Env, caller: &Address) -> Result<(), ControllerError> {
        let governor: Address = env
            .storage()
            .instance()
            .get(&GOVERNOR)
            .ok_or(ControllerError::NotInitialized)?;
        if *caller != governor {
            return Err(ControllerError::Unauthorized);
        }
        Ok(())
    }

    fn require_pause_authority(env: &Env, caller: &Address) -> Result<(), ControllerError> {
        let guardian: Option<Address> = env.storage().instance().get(&PAUSE_GUARDIAN);
        if guardian.as_ref() == Some(caller) {
            return Ok(());
        }
        Self::require_governor(env, caller)
    }
}
