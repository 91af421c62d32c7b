#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! Run with:
//!
//! ```bash
//! cargo test -p l1_staking --test property
//! ```
//!
//! To increase the number of generated cases:
//!
//! ```bash
//! PROPTEST_CASES=512 cargo test -p l1_staking --test property
//! ```

mod migration;
mod state_machine;
