#![no_std]

pub mod events;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Bytes, BytesN, Env,
    Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const TOKEN: Symbol = symbol_short!("TOKEN");
const FEE_TOKEN: Symbol = symbol_short!("FEE_TOK");
const SEQ_NUM: Symbol = symbol_short!("SEQ_NUM");
const OUTBOUND: Symbol = symbol_short!("OUTBOUND");

/// TTL constants for persistent storage (in ledgers)
const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GatewayError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    InvalidEthAmount = 4,
    TransferNotFound = 5,
}

/// A message queued for the L2 side of the bridge.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutboundTransfer {
    pub from: Address,
    pub to: BytesN<20>,
    pub amount: i128,
    pub max_gas: i128,
    pub gas_price_bid: i128,
    pub max_submission_cost: i128,
    pub data: Bytes,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// L1 end of the token bridge.
///
/// Escrows the bridged tokens together with the gas fee for the L2 retryable
/// and numbers every message with a strictly increasing sequence number.
/// Relaying to L2 happens off-chain from the `TxToL2` events.
#[contract]
pub struct L1TokenGateway;

#[contractimpl]
impl L1TokenGateway {
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        fee_token: Address,
    ) -> Result<(), GatewayError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(GatewayError::AlreadyInitialized);
        }
        if token == fee_token {
            return Err(GatewayError::InvalidInput);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&FEE_TOKEN, &fee_token);
        env.storage().instance().set(&SEQ_NUM, &0u64);

        Ok(())
    }

    /// Escrow `amount` tokens and the exact gas fee from `from`, then queue
    /// `data` for delivery to `to` on L2.
    ///
    /// Both tokens are pulled with `transfer_from`, so `from` must have
    /// approved this gateway beforehand. Returns the sequence number.
    #[allow(clippy::too_many_arguments)]
    pub fn outbound_transfer(
        env: Env,
        from: Address,
        to: BytesN<20>,
        amount: i128,
        max_gas: i128,
        gas_price_bid: i128,
        max_submission_cost: i128,
        data: Bytes,
    ) -> Result<u64, GatewayError> {
        from.require_auth();

        if amount <= 0 || max_gas < 0 || gas_price_bid < 0 || max_submission_cost < 0 {
            return Err(GatewayError::InvalidInput);
        }
        let fee = max_gas
            .checked_mul(gas_price_bid)
            .and_then(|gas| gas.checked_add(max_submission_cost))
            .ok_or(GatewayError::InvalidEthAmount)?;

        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(GatewayError::NotInitialized)?;
        let fee_token: Address = env
            .storage()
            .instance()
            .get(&FEE_TOKEN)
            .ok_or(GatewayError::NotInitialized)?;

        let gateway = env.current_contract_address();
        token::Client::new(&env, &token).transfer_from(&gateway, &from, &gateway, &amount);
        if fee > 0 {
            token::Client::new(&env, &fee_token).transfer_from(&gateway, &from, &gateway, &fee);
        }

        let seq_num: u64 = env
            .storage()
            .instance()
            .get::<_, u64>(&SEQ_NUM)
            .unwrap_or(0)
            .saturating_add(1);
        env.storage().instance().set(&SEQ_NUM, &seq_num);

        let transfer = OutboundTransfer {
            from,
            to,
            amount,
            max_gas,
            gas_price_bid,
            max_submission_cost,
            data,
        };
        let key = (OUTBOUND, seq_num);
        env.storage().persistent().set(&key, &transfer);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_tx_to_l2(&env, seq_num, transfer);

        Ok(seq_num)
    }

    /// Sequence number of the most recent outbound message (0 if none).
    pub fn get_sequence_number(env: Env) -> u64 {
        env.storage().instance().get(&SEQ_NUM).unwrap_or(0)
    }

    pub fn get_outbound_transfer(env: Env, seq_num: u64) -> Result<OutboundTransfer, GatewayError> {
        env.storage()
            .persistent()
            .get(&(OUTBOUND, seq_num))
            .ok_or(GatewayError::TransferNotFound)
    }
}
