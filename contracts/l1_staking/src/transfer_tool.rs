//! Adapter over the lock transfer tool used by the `*_locked_*` migrations.

use common::{is_zero_l2_address, L2Address, TransferToolClient};
use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;

/// The L2 wallet the tool recorded for `l1_owner`.
pub fn resolve_beneficiary(
    env: &Env,
    tool: &Address,
    l1_owner: &Address,
) -> Result<L2Address, ContractError> {
    let wallet = TransferToolClient::new(env, tool).get_l2_wallet_address(l1_owner);
    if is_zero_l2_address(&wallet) {
        return Err(ContractError::LockNotTransferred);
    }
    Ok(wallet)
}

/// Have the tool fund exactly `amount` of the fee token on `l1_owner`'s behalf.
pub fn request_gas_funds(
    env: &Env,
    tool: &Address,
    fee_token: &Address,
    l1_owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    if deliver(env, tool, fee_token, l1_owner, amount) != amount {
        return Err(ContractError::InsufficientGasFunds);
    }
    Ok(())
}

/// Ask the tool for `amount` and report how much actually arrived. A
/// reverting tool delivers nothing.
fn deliver(
    env: &Env,
    tool: &Address,
    fee_token: &Address,
    l1_owner: &Address,
    amount: i128,
) -> i128 {
    let fee = token::Client::new(env, fee_token);
    let this = env.current_contract_address();

    let before = fee.balance(&this);
    match TransferToolClient::new(env, tool).try_pull_eth(l1_owner, &amount) {
        Ok(Ok(())) => fee.balance(&this).saturating_sub(before),
        _ => 0,
    }
}
