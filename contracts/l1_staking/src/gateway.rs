//! Client side of the token gateway.

use common::{CallhookMessage, TokenGatewayClient};
use soroban_sdk::{token, Env};

use crate::{config::StakingConfig, errors::ContractError};

/// Gas pricing for the L2 retryable ticket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GasParams {
    pub max_gas: i128,
    pub gas_price_bid: i128,
    pub max_submission_cost: i128,
}

impl GasParams {
    /// Fee that must accompany the message:
    /// `max_submission_cost + max_gas * gas_price_bid`.
    pub fn required_eth(&self) -> Result<i128, ContractError> {
        if self.max_gas < 0 || self.gas_price_bid < 0 || self.max_submission_cost < 0 {
            return Err(ContractError::InvalidInput);
        }
        self.max_gas
            .checked_mul(self.gas_price_bid)
            .and_then(|gas| gas.checked_add(self.max_submission_cost))
            .ok_or(ContractError::InvalidInput)
    }
}

/// Bridge `amount` stake tokens to the L2 counterpart with `message` attached.
/// The contract must already hold `fee` of the fee token. Returns the
/// gateway's sequence number.
pub fn send_to_l2(
    env: &Env,
    config: &StakingConfig,
    amount: i128,
    gas: &GasParams,
    fee: i128,
    message: &CallhookMessage,
) -> u64 {
    let this = env.current_contract_address();
    let expiration = env.ledger().sequence();

    token::Client::new(env, &config.stake_token).approve(
        &this,
        &config.gateway,
        &amount,
        &expiration,
    );
    if fee > 0 {
        token::Client::new(env, &config.fee_token).approve(
            &this,
            &config.gateway,
            &fee,
            &expiration,
        );
    }

    TokenGatewayClient::new(env, &config.gateway).outbound_transfer(
        &this,
        &config.counterpart,
        &amount,
        &gas.max_gas,
        &gas.gas_price_bid,
        &gas.max_submission_cost,
        &message.encode(env),
    )
}
