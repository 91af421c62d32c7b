//! Callhook payloads forwarded through the token gateway.
//!
//! The L2 staking contract dispatches on a leading message code and then
//! decodes a fixed tuple of addresses, so the layout here must match
//! `abi.encode(uint8 code, bytes functionData)` byte for byte:
//!
//! | Word | Content                                              |
//! |------|------------------------------------------------------|
//! | 0    | message code, left-padded                            |
//! | 1    | `0x40`, offset of the dynamic `functionData`         |
//! | 2    | length of `functionData` in bytes                    |
//! | 3..  | `functionData`, one left-padded address per word     |

use soroban_sdk::{Bytes, BytesN, Env};

use crate::L2Address;

/// Code of the message crediting an indexer's stake on L2.
pub const RECEIVE_INDEXER_STAKE_CODE: u8 = 0;
/// Code of the message crediting a delegation on L2.
pub const RECEIVE_DELEGATION_CODE: u8 = 1;

const WORD: u32 = 32;
const HEADER_WORDS: u32 = 3;

/// A message understood by the L2 staking contract.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallhookMessage {
    /// Credit the bridged tokens to the indexer's stake on L2.
    ReceiveIndexerStake { indexer: L2Address },
    /// Credit the bridged tokens as delegation from `delegator` to `indexer` on L2.
    ReceiveDelegation {
        indexer: L2Address,
        delegator: L2Address,
    },
}

/// Reasons a byte string is not a well-formed callhook payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CallhookDecodeError {
    /// The payload is shorter or longer than its header announces.
    BadLength,
    /// The header offset or a numeric word is out of range.
    MalformedHeader,
    /// The message code is not one this suite emits.
    UnknownCode(u32),
    /// An address word has non-zero bytes in its padding.
    DirtyPadding,
}

impl CallhookMessage {
    pub fn code(&self) -> u8 {
        match self {
            CallhookMessage::ReceiveIndexerStake { .. } => RECEIVE_INDEXER_STAKE_CODE,
            CallhookMessage::ReceiveDelegation { .. } => RECEIVE_DELEGATION_CODE,
        }
    }

    /// Encode the message as the gateway's `data` argument.
    pub fn encode(&self, env: &Env) -> Bytes {
        let mut function_data = Bytes::new(env);
        match self {
            CallhookMessage::ReceiveIndexerStake { indexer } => {
                function_data.extend_from_array(&address_word(indexer));
            }
            CallhookMessage::ReceiveDelegation { indexer, delegator } => {
                function_data.extend_from_array(&address_word(indexer));
                function_data.extend_from_array(&address_word(delegator));
            }
        }

        let mut out = Bytes::new(env);
        out.extend_from_array(&uint_word(self.code() as u32));
        out.extend_from_array(&uint_word(2 * WORD));
        out.extend_from_array(&uint_word(function_data.len()));
        out.append(&function_data);
        out
    }

    /// Decode a payload produced by [`CallhookMessage::encode`].
    ///
    /// Decoding is strict: trailing bytes, a wrong offset or dirty address
    /// padding are all rejected.
    pub fn decode(env: &Env, data: &Bytes) -> Result<Self, CallhookDecodeError> {
        if data.len() < HEADER_WORDS * WORD {
            return Err(CallhookDecodeError::BadLength);
        }

        let code = read_uint(&word_at(data, 0))?;
        let offset = read_uint(&word_at(data, 1))?;
        let length = read_uint(&word_at(data, 2))?;

        if offset != 2 * WORD {
            return Err(CallhookDecodeError::MalformedHeader);
        }

        let address_count = match code {
            c if c == RECEIVE_INDEXER_STAKE_CODE as u32 => 1,
            c if c == RECEIVE_DELEGATION_CODE as u32 => 2,
            other => return Err(CallhookDecodeError::UnknownCode(other)),
        };
        if length != address_count * WORD || data.len() != (HEADER_WORDS + address_count) * WORD {
            return Err(CallhookDecodeError::BadLength);
        }

        let indexer = read_address(env, &word_at(data, HEADER_WORDS))?;
        if address_count == 1 {
            return Ok(CallhookMessage::ReceiveIndexerStake { indexer });
        }
        let delegator = read_address(env, &word_at(data, HEADER_WORDS + 1))?;
        Ok(CallhookMessage::ReceiveDelegation { indexer, delegator })
    }
}

// ── Word helpers ─────────────────────────────────────────────────────────────

fn uint_word(value: u32) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[28..].copy_from_slice(&value.to_be_bytes());
    word
}

fn address_word(address: &L2Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&address.to_array());
    word
}

/// Caller guarantees `data` holds at least `index + 1` words.
fn word_at(data: &Bytes, index: u32) -> [u8; 32] {
    let mut word = [0u8; 32];
    data.slice(index * WORD..(index + 1) * WORD)
        .copy_into_slice(&mut word);
    word
}

fn read_uint(word: &[u8; 32]) -> Result<u32, CallhookDecodeError> {
    if word[..28].iter().any(|b| *b != 0) {
        return Err(CallhookDecodeError::MalformedHeader);
    }
    Ok(u32::from_be_bytes([word[28], word[29], word[30], word[31]]))
}

fn read_address(env: &Env, word: &[u8; 32]) -> Result<L2Address, CallhookDecodeError> {
    if word[..12].iter().any(|b| *b != 0) {
        return Err(CallhookDecodeError::DirtyPadding);
    }
    let mut raw = [0u8; 20];
    raw.copy_from_slice(&word[12..]);
    Ok(BytesN::from_array(env, &raw))
}
