#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Env};

use crate::OutboundTransfer;

/// Fired for every message queued towards L2; relayers pick these up.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxToL2Event {
    pub seq_num: u64,
    pub transfer: OutboundTransfer,
    pub timestamp: u64,
}

pub fn publish_tx_to_l2(env: &Env, seq_num: u64, transfer: OutboundTransfer) {
    env.events().publish(
        (symbol_short!("TX_TO_L2"), transfer.from.clone()),
        TxToL2Event {
            seq_num,
            transfer,
            timestamp: env.ledger().timestamp(),
        },
    );
}
