//! Allocation capacity arithmetic.
//!
//! An indexer backs its allocations with its own stake plus delegated tokens,
//! where delegation counts for at most `delegation_ratio` times the own stake.
//! Thawing tokens are already on their way out and back nothing:
//!
//! ```text
//! own_stake = tokens_staked - tokens_locked
//! capacity  = own_stake + min(pool_tokens, own_stake * delegation_ratio)
//! capacity >= tokens_allocated
//! ```
//!
//! Every function here is pure so that callers can evaluate a hypothetical
//! post-debit state before committing anything.

use core::cmp;

use crate::ledger::IndexerStake;

/// Delegated tokens that count towards the indexer's capacity.
pub fn delegated_capacity(own_stake: i128, pool_tokens: i128, delegation_ratio: u32) -> i128 {
    if own_stake <= 0 || pool_tokens <= 0 {
        return 0;
    }
    let cap = own_stake.saturating_mul(delegation_ratio as i128);
    cmp::min(pool_tokens, cap)
}

pub fn allocation_capacity(own_stake: i128, pool_tokens: i128, delegation_ratio: u32) -> i128 {
    own_stake
        .max(0)
        .saturating_add(delegated_capacity(own_stake, pool_tokens, delegation_ratio))
}

/// Whether `own_stake` (already net of any hypothetical debit) can back
/// `tokens_allocated`.
pub fn covers_allocations(
    own_stake: i128,
    tokens_allocated: i128,
    pool_tokens: i128,
    delegation_ratio: u32,
) -> bool {
    tokens_allocated <= allocation_capacity(own_stake, pool_tokens, delegation_ratio)
}

/// Smallest own stake whose capacity covers `tokens_allocated`.
///
/// Capacity is piecewise linear in the own stake: `R * (1 + ratio)` while the
/// ratio cap binds, `R + pool_tokens` once the pool is exhausted.
pub fn minimum_backing_stake(
    tokens_allocated: i128,
    pool_tokens: i128,
    delegation_ratio: u32,
) -> i128 {
    if tokens_allocated <= 0 {
        return 0;
    }
    let pool = pool_tokens.max(0);
    let ratio = delegation_ratio as i128;
    if ratio == 0 || pool == 0 {
        return tokens_allocated;
    }

    let by_ratio = ceil_div(tokens_allocated, ratio.saturating_add(1));
    if by_ratio.saturating_mul(ratio) <= pool {
        return by_ratio;
    }
    // Past the point where the pool is exhausted: every extra own token adds
    // exactly one token of capacity.
    cmp::max(tokens_allocated.saturating_sub(pool), pool / ratio + 1)
}

/// Own stake the indexer could send to L2 right now without breaking the
/// capacity of its open allocations or leaving less than
/// `minimum_indexer_stake` behind. Zero while tokens are locked, since locked
/// stake blocks migration altogether.
pub fn available_for_migration(
    stake: &IndexerStake,
    pool_tokens: i128,
    delegation_ratio: u32,
    minimum_indexer_stake: i128,
) -> i128 {
    if stake.tokens_locked != 0 || stake.tokens_staked <= 0 {
        return 0;
    }
    let needed = minimum_backing_stake(stake.tokens_allocated, pool_tokens, delegation_ratio);
    let available = (stake.tokens_staked - needed).max(0);
    let remaining = stake.tokens_staked - available;
    if available > 0 && remaining > 0 && remaining < minimum_indexer_stake {
        // Dust left on L1 is rejected; keep a full minimum stake instead.
        return (stake.tokens_staked - minimum_indexer_stake).max(0);
    }
    available
}

fn ceil_div(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        quotient
    } else {
        quotient + 1
    }
}
