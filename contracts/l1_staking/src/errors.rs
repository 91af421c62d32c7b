use soroban_sdk::contracterror;

/// Errors returned by the staking contract.
///
/// # Code ranges
/// | Range   | Purpose                                        |
/// |---------|------------------------------------------------|
/// | 1 – 9   | Lifecycle / initialisation                     |
/// | 10 – 19 | Authorisation                                  |
/// | 20 – 29 | Malformed input                                |
/// | 30 – 49 | Caller state does not allow the operation      |
/// | 50 – 59 | Requested amount is economically unsafe        |
/// | 60 – 69 | Attached fee does not match the bridge cost    |
/// | 70 – 79 | The lock transfer tool could not serve the call|
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// Caller is not the governor, or not the configured allocation engine.
    Unauthorized = 10,

    // ── Validation (20–29) ───────────────────────────────────
    InvalidInput = 20,

    // ── Preconditions (30–49) ────────────────────────────────
    /// The controller has the protocol paused or partially paused.
    ProtocolPaused = 30,
    /// The indexer has nothing staked.
    NoStake = 31,
    /// Tokens are locked for withdrawal or undelegation.
    LockedTokensPresent = 32,
    /// The L2 beneficiary is the zero address.
    ZeroBeneficiary = 33,
    /// A different L2 beneficiary was used by an earlier transfer.
    BeneficiaryMismatch = 34,
    /// The indexer still has stake on L1 or never started its transfer.
    IndexerNotFullyTransferred = 35,
    /// The delegator has no tokens locked for undelegation.
    NotLocked = 36,
    /// The delegation is worth zero tokens.
    NoDelegation = 37,
    InsufficientStake = 38,
    InsufficientShares = 39,
    /// The unlock epoch has not been reached.
    StillLocked = 40,
    NothingToWithdraw = 41,
    /// No lock transfer tool has been configured.
    TransferToolNotSet = 42,

    // ── Economic invariants (50–59) ──────────────────────────
    /// The resulting stake would be below the minimum indexer stake.
    BelowMinimumStake = 50,
    /// The first transfer to L2 must carry at least the minimum indexer stake.
    BelowMinimumStakeSent = 51,
    /// The stake left on L1 would be positive but below the minimum.
    BelowMinimumStakeRemaining = 52,
    /// The remaining stake cannot back the indexer's open allocations.
    AllocationCapacityExceeded = 53,

    // ── Payment (60–69) ──────────────────────────────────────
    /// The attached fee differs from `max_submission_cost + max_gas * gas_price_bid`.
    InvalidPaymentAmount = 60,

    // ── External dependency (70–79) ──────────────────────────
    /// The lock transfer tool has no L2 wallet for the caller.
    LockNotTransferred = 70,
    /// The lock transfer tool did not deliver the exact fee.
    InsufficientGasFunds = 71,
}

/// How a caller is expected to recover from a [`ContractError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Lifecycle,
    Authorization,
    Validation,
    /// Fix the account state and resubmit.
    PreconditionViolation,
    /// Resubmit with a different amount.
    EconomicInvariantViolation,
    /// Resubmit with the exact fee attached.
    PaymentMismatch,
    /// Not retryable until the external tool's state changes.
    ExternalDependencyFailure,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match *self as u32 {
            1..=9 => ErrorCategory::Lifecycle,
            10..=19 => ErrorCategory::Authorization,
            20..=29 => ErrorCategory::Validation,
            30..=49 => ErrorCategory::PreconditionViolation,
            50..=59 => ErrorCategory::EconomicInvariantViolation,
            60..=69 => ErrorCategory::PaymentMismatch,
            _ => ErrorCategory::ExternalDependencyFailure,
        }
    }
}
