//! # Transaction Context
//!
//! A staged overlay over an [`AccountStore`]. Reads see staged writes first,
//! then committed state. Nothing reaches the store until the owning service
//! commits [`TransactionContext::into_changes`]; dropping the context discards
//! every staged write.

use crate::config::RentConfig;
use crate::domain::entities::{Account, AccountData, MintState, PartnershipRecord, TokenAccountState};
use crate::domain::value_objects::Pubkey;
use crate::errors::{ProgramError, ProgramResult, StoreError};
use crate::ports::outbound::{AccountStore, ChangeSet};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Staged view of the account store for one transition.
pub struct TransactionContext<'a, S: AccountStore + ?Sized> {
    store: &'a S,
    rent: RentConfig,
    staged: BTreeMap<Pubkey, Account>,
    created: BTreeSet<Pubkey>,
}

impl<'a, S: AccountStore + ?Sized> TransactionContext<'a, S> {
    /// Opens an empty overlay.
    pub fn new(store: &'a S, rent: RentConfig) -> Self {
        Self {
            store,
            rent,
            staged: BTreeMap::new(),
            created: BTreeSet::new(),
        }
    }

    /// Current view of `address`.
    ///
    /// # Errors
    ///
    /// Store read failures.
    pub fn get(&self, address: &Pubkey) -> ProgramResult<Option<Account>> {
        if let Some(account) = self.staged.get(address) {
            return Ok(Some(account.clone()));
        }
        Ok(self.store.get_account(address)?)
    }

    /// True if `address` holds an account in the current view.
    ///
    /// # Errors
    ///
    /// Store read failures.
    pub fn exists(&self, address: &Pubkey) -> ProgramResult<bool> {
        if self.staged.contains_key(address) {
            return Ok(true);
        }
        Ok(self.store.account_exists(address)?)
    }

    fn require(&self, address: &Pubkey) -> ProgramResult<Account> {
        self.get(address)?
            .ok_or(ProgramError::AccountNotFound(*address))
    }

    /// Loads a partnership record.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, or `InvalidAccountData` for another payload kind.
    pub fn load_partnership(&self, address: &Pubkey) -> ProgramResult<PartnershipRecord> {
        match self.require(address)?.data {
            AccountData::Partnership(record) => Ok(record),
            other => Err(wrong_kind(address, "partnership", &other)),
        }
    }

    /// Loads a mint.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, or `InvalidAccountData` for another payload kind.
    pub fn load_mint(&self, address: &Pubkey) -> ProgramResult<MintState> {
        match self.require(address)?.data {
            AccountData::Mint(mint) => Ok(mint),
            other => Err(wrong_kind(address, "mint", &other)),
        }
    }

    /// Loads a token account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, or `InvalidAccountData` for another payload kind.
    pub fn load_token(&self, address: &Pubkey) -> ProgramResult<TokenAccountState> {
        match self.require(address)?.data {
            AccountData::Token(token) => Ok(token),
            other => Err(wrong_kind(address, "token", &other)),
        }
    }

    /// Creates an account at an empty address, funded by `payer` with the
    /// rent-exempt minimum for `data`.
    ///
    /// # Errors
    ///
    /// - `Store(AlreadyExists)` if the address is occupied
    /// - `AccountNotFound` if the payer does not exist
    /// - `InsufficientFunds` if the payer cannot cover the deposit
    pub fn create_account(
        &mut self,
        payer: &Pubkey,
        address: Pubkey,
        data: AccountData,
    ) -> ProgramResult<()> {
        if self.exists(&address)? {
            return Err(StoreError::AlreadyExists(address).into());
        }

        let required = self.rent.minimum_balance(data.len());
        let mut funding = self.require(payer)?;
        if funding.lamports < required {
            return Err(ProgramError::InsufficientFunds {
                payer: *payer,
                required,
                available: funding.lamports,
            });
        }
        funding.lamports -= required;

        debug!(
            address = %address,
            kind = data.kind(),
            rent = required,
            "staging account creation"
        );
        self.staged.insert(*payer, funding);
        self.staged.insert(address, Account::with_data(required, data));
        self.created.insert(address);
        Ok(())
    }

    /// Replaces the payload of an existing account, keeping its lamports.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if nothing exists at `address`.
    pub fn put_data(&mut self, address: Pubkey, data: AccountData) -> ProgramResult<()> {
        let mut account = self.require(&address)?;
        account.data = data;
        self.staged.insert(address, account);
        Ok(())
    }

    /// Number of staged accounts.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Consumes the context into a change set for `AccountStore::commit`.
    #[must_use]
    pub fn into_changes(self) -> ChangeSet {
        ChangeSet {
            created: self.created,
            writes: self.staged,
        }
    }
}

fn wrong_kind(address: &Pubkey, expected: &'static str, actual: &AccountData) -> ProgramError {
    ProgramError::InvalidAccountData {
        address: *address,
        expected,
        actual: actual.kind(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
