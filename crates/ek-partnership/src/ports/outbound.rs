//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the partnership program depends on:
//! - account persistence (`AccountStore`)
//! - publication of committed events (`EventSink`)
//!
//! Both are synchronous. A transition never suspends between reading the
//! store and committing its change set.

use crate::domain::entities::Account;
use crate::domain::value_objects::Pubkey;
use crate::errors::StoreError;
use crate::events::ProgramEvent;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// CHANGE SET
// =============================================================================

/// Buffered writes of one transition, applied by [`AccountStore::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Addresses that must be absent at commit time.
    pub created: BTreeSet<Pubkey>,
    /// Final state of every touched account.
    pub writes: BTreeMap<Pubkey, Account>,
}

impl ChangeSet {
    /// True if the transition staged nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Number of accounts written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// True if `address` is created by this change set as a partnership record.
    #[must_use]
    pub fn creates_record(&self, address: &Pubkey) -> bool {
        self.created.contains(address)
            && self
                .writes
                .get(address)
                .is_some_and(|account| account.as_partnership().is_some())
    }
}

// =============================================================================
// ACCOUNT STORE
// =============================================================================

/// Addressable account storage keyed by address.
///
/// `commit` must be all-or-nothing: either every write in the change set is
/// visible afterwards, or none is.
pub trait AccountStore: Send + Sync {
    /// Reads an account, `None` if the address is empty.
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, StoreError>;

    /// Applies a change set atomically.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if any address in `changes.created` is occupied.
    fn commit(&self, changes: ChangeSet) -> Result<(), StoreError>;

    /// True if an account exists at `address`.
    fn account_exists(&self, address: &Pubkey) -> Result<bool, StoreError> {
        Ok(self.get_account(address)?.is_some())
    }
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Receives events of committed transitions.
///
/// A publish failure is logged by the caller; the transition stays committed.
pub trait EventSink: Send + Sync {
    /// Publishes one event.
    fn publish(&self, event: ProgramEvent) -> Result<(), String>;
}
