//! # Ekonos Partnership - Asset Custody and Share Issuance
//!
//! A ledger program that takes custody of one unique asset (an NFT) for an
//! authority and converts that custody into fungible ownership shares minted
//! to designated recipients.
//!
//! ## Lifecycle
//!
//! ```text
//! initialize_partnership ──► deposit_nft ──► mint_shares
//!   (record created)         (custody)       (share mint + holder accounts)
//! ```
//!
//! Each step is one atomic transition. Later steps read state written by
//! earlier ones and fail closed when it is missing.
//!
//! ## Record Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Record address is a pure function of `(program_id, authority, id)` | `domain/derivation.rs` - `partnership_address()` |
//! | Record creation is create-if-absent | `transitions/initialize.rs`, `AccountStore::commit` |
//! | Custody flips false -> true exactly once | `domain/guard.rs` - `require_custody_open()`, `domain/invariants.rs` |
//! | Issuance only after custody | `domain/guard.rs` - `require_custody_established()` |
//! | `total_shares` never changes | `domain/invariants.rs` - `check_immutable_fields()` |
//! | Failed transitions mutate nothing | `service.rs` - `execute()` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `AccountStore` | Read accounts, commit change sets atomically |
//! | `EventSink` | Publish events of committed transitions |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ek_partnership::prelude::*;
//! use std::sync::Arc;
//!
//! let program = PartnershipProgram::new(
//!     ProgramConfig::from_env()?,
//!     Arc::new(InMemoryAccountStore::new()),
//!     Arc::new(InMemoryEventLog::new()),
//! );
//!
//! let record = program.initialize_partnership(&authority, 1, 1_000)?;
//! program.deposit_nft(&authority, &deposit_accounts)?;
//! program.mint_shares(&authority, &issue_accounts, &distribution)?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod instruction;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod transitions;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{
        Account, AccountData, MintState, PartnershipBumps, PartnershipRecord, ShareDistribution,
        TokenAccountState,
    };
    pub use crate::domain::policy::{IssuanceCap, IssuancePolicy};
    pub use crate::domain::value_objects::{program_ids, Pubkey};

    // Configuration
    pub use crate::config::{ConfigError, ProgramConfig, RentConfig};

    // Errors
    pub use crate::errors::{DerivationError, ProgramError, ProgramResult, StoreError, TokenError};

    // Instructions and events
    pub use crate::events::ProgramEvent;
    pub use crate::instruction::{DepositAccounts, Instruction, IssueAccounts, SignedInstruction};

    // Ports
    pub use crate::ports::inbound::{IssuanceReceipt, PartnershipApi, ProcessOutcome};
    pub use crate::ports::outbound::{AccountStore, ChangeSet, EventSink};

    // Adapters and service
    pub use crate::adapters::{InMemoryAccountStore, InMemoryEventLog};
    pub use crate::service::{PartnershipProgram, ProgramStats};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
