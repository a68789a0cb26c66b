use crate::domain::entities::{Account, AccountData, MintState, TokenAccountState};
use crate::domain::value_objects::Pubkey;
use crate::errors::StoreError;
use crate::ports::outbound::{AccountStore, ChangeSet};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// In-memory account store.
///
/// `commit` validates the whole change set under one write lock before
/// applying any of it, so readers never observe a partial batch.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Pubkey, Account>>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites an account directly, bypassing commit checks.
    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.write().insert(address, account);
    }

    /// Adds lamports to `address`, creating a wallet if it is empty.
    pub fn fund(&self, address: Pubkey, lamports: u64) {
        let mut accounts = self.accounts.write();
        let entry = accounts
            .entry(address)
            .or_insert_with(|| Account::wallet(0));
        entry.lamports = entry.lamports.saturating_add(lamports);
    }

    /// Installs a mint account.
    pub fn put_mint(&self, address: Pubkey, lamports: u64, mint: MintState) {
        self.set_account(address, Account::with_data(lamports, AccountData::Mint(mint)));
    }

    /// Installs a token account.
    pub fn put_token_account(&self, address: Pubkey, lamports: u64, token: TokenAccountState) {
        self.set_account(
            address,
            Account::with_data(lamports, AccountData::Token(token)),
        );
    }

    /// Ordered copy of every account, for before/after comparisons.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Pubkey, Account> {
        self.accounts
            .read()
            .iter()
            .map(|(address, account)| (*address, account.clone()))
            .collect()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// True if the store holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().get(address).cloned())
    }

    fn commit(&self, changes: ChangeSet) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        if let Some(taken) = changes
            .created
            .iter()
            .find(|address| accounts.contains_key(address))
        {
            return Err(StoreError::AlreadyExists(*taken));
        }
        accounts.extend(changes.writes);
        Ok(())
    }

    fn account_exists(&self, address: &Pubkey) -> Result<bool, StoreError> {
        Ok(self.accounts.read().contains_key(address))
    }
}
