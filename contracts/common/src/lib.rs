//! Shared types for the L1 staking contract suite.
//!
//! This crate provides:
//! - [`L2Address`] and helpers for the twenty-byte addresses used on the L2 side.
//! - [`callhook`]: the payload the L2 staking contract decodes from a bridge message.
//! - [`interfaces`]: call contracts of the collaborators the staking contract
//!   depends on (controller, token gateway, lock transfer tool).

#![cfg_attr(not(feature = "std"), no_std)]

use soroban_sdk::{BytesN, Env};

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod callhook;
pub mod interfaces;

pub use callhook::*;
pub use interfaces::*;

// ── L2 addresses ─────────────────────────────────────────────────────────────

/// An account on the L2 chain. The all-zero value is the "zero address".
pub type L2Address = BytesN<20>;

/// Returns the L2 zero address.
pub fn zero_l2_address(env: &Env) -> L2Address {
    BytesN::from_array(env, &[0u8; 20])
}

/// Returns true if `address` is the L2 zero address.
pub fn is_zero_l2_address(address: &L2Address) -> bool {
    address.to_array() == [0u8; 20]
}
