//! Call contracts of the collaborators consumed by the staking contract.
//!
//! Only the functions the staking contract invokes are declared here; the
//! reference implementations live in their own contract crates.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

/// Protocol-wide pause switches and the governance account.
#[contractclient(name = "ControllerClient")]
pub trait ControllerInterface {
    fn is_paused(env: Env) -> bool;
    fn is_partial_paused(env: Env) -> bool;
    fn get_governor(env: Env) -> Address;
}

/// The L1 side of the token bridge.
///
/// `outbound_transfer` pulls `amount` of the bridged token and exactly
/// `max_submission_cost + max_gas * gas_price_bid` of the fee token from
/// `from` (both through allowances) and returns the message sequence number.
#[contractclient(name = "TokenGatewayClient")]
pub trait TokenGatewayInterface {
    fn outbound_transfer(
        env: Env,
        from: Address,
        to: BytesN<20>,
        amount: i128,
        max_gas: i128,
        gas_price_bid: i128,
        max_submission_cost: i128,
        data: Bytes,
    ) -> u64;
}

/// Maps vesting-lock owners to their L2 wallets and funds their bridge gas.
#[contractclient(name = "TransferToolClient")]
pub trait TransferToolInterface {
    /// Returns the zero address if `l1_owner` has no transferred lock.
    fn get_l2_wallet_address(env: Env, l1_owner: Address) -> BytesN<20>;
    /// Sends `amount` of the fee token to the calling staking contract.
    fn pull_eth(env: Env, l1_owner: Address, amount: i128);
}
