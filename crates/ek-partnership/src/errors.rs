//! # Error Types
//!
//! All error types for the partnership program.
//!
//! Precondition violations are [`ProgramError`] variants surfaced verbatim to
//! the caller. Failures of the surrounding environment (derivation, token
//! arithmetic, the account store, rent funding) are wrapped so callers can
//! tell them apart with [`ProgramError::is_environment_failure`].

use crate::domain::value_objects::Pubkey;
use thiserror::Error;

// =============================================================================
// DERIVATION ERRORS
// =============================================================================

/// Errors from address derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// More seeds than the derivation scheme accepts.
    #[error("too many seeds: {count} > {max}")]
    TooManySeeds { count: usize, max: usize },

    /// A seed exceeds the per-seed length limit.
    #[error("seed {index} too long: {len} > {max} bytes")]
    MaxSeedLengthExceeded { index: usize, len: usize, max: usize },

    /// The derived bytes are a valid curve point.
    #[error("derived address lies on the ed25519 curve")]
    InvalidSeeds,

    /// Every bump produced an on-curve address.
    #[error("no viable bump seed found")]
    NoViableBump,
}

// =============================================================================
// TOKEN ERRORS
// =============================================================================

/// Errors from mint and token account rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token account belongs to another mint.
    #[error("mint mismatch: expected {expected}, got {actual}")]
    MintMismatch { expected: Pubkey, actual: Pubkey },

    /// Signer does not own the source token account.
    #[error("token account owner mismatch: expected {expected}, got {actual}")]
    OwnerMismatch { expected: Pubkey, actual: Pubkey },

    /// Signer is not the mint authority.
    #[error("mint authority mismatch")]
    MintAuthorityMismatch,

    /// Mint has no authority, supply is fixed.
    #[error("mint supply is fixed")]
    FixedSupply,

    /// Source does not hold enough units.
    #[error("insufficient tokens: required {required}, available {available}")]
    InsufficientTokens { required: u64, available: u64 },

    /// Supply or balance overflowed u64.
    #[error("token amount overflow")]
    Overflow,
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the account store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A create-if-absent write hit an existing account.
    #[error("account {0} already exists")]
    AlreadyExists(Pubkey),

    /// The backing store rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// PROGRAM ERRORS
// =============================================================================

/// Errors surfaced by the three program entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// An account already occupies the derived record address.
    #[error("account {address} already in use")]
    DuplicateRecord { address: Pubkey },

    /// Caller or asset source does not belong to the record authority.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Issuance attempted before the asset was deposited.
    #[error("custody not established: asset has not been deposited")]
    CustodyNotEstablished,

    /// Deposit attempted on a record that already holds its asset.
    #[error("asset has already been deposited")]
    AlreadyDeposited,

    /// Repeat issuance while the policy forbids it.
    #[error("shares have already been issued")]
    SharesAlreadyIssued,

    /// Distribution rejected by the issuance policy.
    #[error("invalid share distribution: {0}")]
    InvalidShareDistribution(String),

    /// A supplied token or mint account does not match what the transition expects.
    #[error("invalid token account: {0}")]
    InvalidTokenAccount(String),

    /// `total_shares` must be positive.
    #[error("total shares must be greater than zero")]
    InvalidTotalShares,

    /// A required account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    /// An account holds a payload of the wrong kind.
    #[error("account {address} holds {actual} data, expected {expected}")]
    InvalidAccountData {
        address: Pubkey,
        expected: &'static str,
        actual: &'static str,
    },

    /// Instruction signature does not verify against the signer.
    #[error("invalid instruction signature")]
    InvalidSignature,

    /// A post-transition invariant check failed; nothing was committed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Payer cannot cover the rent deposit of a new account.
    #[error("insufficient funds: {payer} has {available} lamports, needs {required}")]
    InsufficientFunds {
        payer: Pubkey,
        required: u64,
        available: u64,
    },

    /// Address derivation failed.
    #[error("derivation error: {0}")]
    Derivation(#[from] DerivationError),

    /// Token rule violated.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Account store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ProgramError {
    /// Stable numeric code, starting at 6000 like on-chain custom errors.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::Unauthorized(_) => 6000,
            Self::AlreadyDeposited => 6001,
            Self::CustodyNotEstablished => 6002,
            Self::SharesAlreadyIssued => 6003,
            Self::InvalidShareDistribution(_) => 6004,
            Self::InvalidTokenAccount(_) => 6005,
            Self::DuplicateRecord { .. } => 6006,
            Self::InvalidTotalShares => 6007,
            Self::AccountNotFound(_) => 6008,
            Self::InvalidAccountData { .. } => 6009,
            Self::InvalidSignature => 6010,
            Self::InvariantViolation(_) => 6011,
            Self::InsufficientFunds { .. } => 6100,
            Self::Derivation(_) => 6101,
            Self::Token(_) => 6102,
            Self::Store(_) => 6103,
        }
    }

    /// Stable variant name, used as a metrics label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuplicateRecord { .. } => "DuplicateRecord",
            Self::Unauthorized(_) => "Unauthorized",
            Self::CustodyNotEstablished => "CustodyNotEstablished",
            Self::AlreadyDeposited => "AlreadyDeposited",
            Self::SharesAlreadyIssued => "SharesAlreadyIssued",
            Self::InvalidShareDistribution(_) => "InvalidShareDistribution",
            Self::InvalidTokenAccount(_) => "InvalidTokenAccount",
            Self::InvalidTotalShares => "InvalidTotalShares",
            Self::AccountNotFound(_) => "AccountNotFound",
            Self::InvalidAccountData { .. } => "InvalidAccountData",
            Self::InvalidSignature => "InvalidSignature",
            Self::InvariantViolation(_) => "InvariantViolation",
            Self::InsufficientFunds { .. } => "InsufficientFunds",
            Self::Derivation(_) => "Derivation",
            Self::Token(_) => "Token",
            Self::Store(_) => "Store",
        }
    }

    /// True for failures of the environment rather than of a program precondition.
    #[must_use]
    pub fn is_environment_failure(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. }
                | Self::Derivation(_)
                | Self::Token(_)
                | Self::Store(_)
        )
    }
}

/// Result alias for program operations.
pub type ProgramResult<T> = Result<T, ProgramError>;

// =============================================================================
// TESTS
// =============================================================================
