#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, BytesN, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const FEE_TOKEN: Symbol = symbol_short!("FEE_TOK");
const STAKING: Symbol = symbol_short!("STAKING");

// Per-owner persistent storage uses tuple keys:  (prefix, l1_owner)
const L2_WALLET: Symbol = symbol_short!("L2_WALLET");
const ETH_BALANCE: Symbol = symbol_short!("ETH_BAL");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TransferToolError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Tracks which vesting-lock owners already have a wallet on L2 and custodies
/// the fee-token each owner set aside to pay for their bridge messages.
///
/// Only the configured staking contract may draw on an owner's gas balance.
#[contract]
pub struct LockTransferTool;

#[contractimpl]
impl LockTransferTool {
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_token: Address,
        staking: Address,
    ) -> Result<(), TransferToolError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(TransferToolError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&FEE_TOKEN, &fee_token);
        env.storage().instance().set(&STAKING, &staking);

        Ok(())
    }

    /// Record the L2 wallet created for `l1_owner`'s lock.
    pub fn set_l2_wallet_address(
        env: Env,
        admin: Address,
        l1_owner: Address,
        l2_wallet: BytesN<20>,
    ) -> Result<(), TransferToolError> {
        admin.require_auth();
        let stored: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(TransferToolError::NotInitialized)?;
        if admin != stored {
            return Err(TransferToolError::Unauthorized);
        }

        let key = (L2_WALLET, l1_owner);
        env.storage().persistent().set(&key, &l2_wallet);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        Ok(())
    }

    /// The L2 wallet of `l1_owner`, or the zero address if none was recorded.
    pub fn get_l2_wallet_address(env: Env, l1_owner: Address) -> BytesN<20> {
        env.storage()
            .persistent()
            .get(&(L2_WALLET, l1_owner))
            .unwrap_or_else(|| BytesN::from_array(&env, &[0u8; 20]))
    }

    /// Set aside `amount` of the fee token to pay for `owner`'s bridge gas.
    pub fn deposit_eth(env: Env, owner: Address, amount: i128) -> Result<i128, TransferToolError> {
        owner.require_auth();
        if amount <= 0 {
            return Err(TransferToolError::InvalidInput);
        }

        let fee_token = Self::fee_token(&env)?;
        token::Client::new(&env, &fee_token).transfer(
            &owner,
            &env.current_contract_address(),
            &amount,
        );

        let balance = Self::get_eth_balance(env.clone(), owner.clone()).saturating_add(amount);
        Self::set_eth_balance(&env, &owner, balance);

        Ok(balance)
    }

    pub fn get_eth_balance(env: Env, owner: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(ETH_BALANCE, owner))
            .unwrap_or(0)
    }

    /// Send `amount` of `l1_owner`'s custodied fee token to the staking contract.
    pub fn pull_eth(env: Env, l1_owner: Address, amount: i128) -> Result<(), TransferToolError> {
        let staking: Address = env
            .storage()
            .instance()
            .get(&STAKING)
            .ok_or(TransferToolError::NotInitialized)?;
        staking.require_auth();

        if amount <= 0 {
            return Err(TransferToolError::InvalidInput);
        }
        let balance = Self::get_eth_balance(env.clone(), l1_owner.clone());
        if balance < amount {
            return Err(TransferToolError::InsufficientBalance);
        }
        Self::set_eth_balance(&env, &l1_owner, balance - amount);

        let fee_token = Self::fee_token(&env)?;
        token::Client::new(&env, &fee_token).transfer(
            &env.current_contract_address(),
            &staking,
            &amount,
        );

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn fee_token(env: &Env) -> Result<Address, TransferToolError> {
        env.storage()
            .instance()
            .get(&FEE_TOKEN)
            .ok_or(TransferToolError::NotInitialized)
    }

    fn set_eth_balance(env: &Env, owner: &Address, balance: i128) {
        let key = (ETH_BALANCE, owner.clone());
        env.storage().persistent().set(&key, &balance);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
