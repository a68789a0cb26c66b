//! # Test Fixtures
//!
//! A program instance over in-memory adapters plus helpers that set up the
//! accounts a partnership needs: funded wallets, a unique asset held by its
//! owner, and the derived addresses of every later step.

use ed25519_dalek::SigningKey;
use ek_partnership::domain::derivation::associated_token_address;
use ek_partnership::prelude::*;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Lamports given to every test wallet.
pub const DEFAULT_FUNDING: u64 = 10_000_000_000;

/// Program under test.
pub type TestProgram = PartnershipProgram<InMemoryAccountStore, InMemoryEventLog>;

/// Deterministic signing key and its address.
pub fn keypair(seed: u8) -> (SigningKey, Pubkey) {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let address = Pubkey::from(key.verifying_key());
    (key, address)
}

/// Off-curve address derived from a label, for mints and other non-wallet accounts.
pub fn labeled_address(label: &str) -> Pubkey {
    Pubkey::new(Sha256::digest(label.as_bytes()).into())
}

/// A unique asset held by its owner.
#[derive(Clone, Copy, Debug)]
pub struct UniqueAsset {
    /// Mint of the asset.
    pub mint: Pubkey,
    /// Owner's associated token account holding the single unit.
    pub holder_account: Pubkey,
    /// Current owner.
    pub owner: Pubkey,
}

/// Program plus a funded authority and a funded outsider.
pub struct Harness {
    pub program: TestProgram,
    pub authority_key: SigningKey,
    pub authority: Pubkey,
    pub outsider_key: SigningKey,
    pub outsider: Pubkey,
}

impl Harness {
    /// Harness with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProgramConfig::default())
    }

    /// Harness with a custom configuration.
    pub fn with_config(config: ProgramConfig) -> Self {
        ek_telemetry::init_test_telemetry();

        let program = PartnershipProgram::new(
            config,
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryEventLog::new()),
        );
        let (authority_key, authority) = keypair(0xA1);
        let (outsider_key, outsider) = keypair(0xB2);
        program.store().fund(authority, DEFAULT_FUNDING);
        program.store().fund(outsider, DEFAULT_FUNDING);

        Self {
            program,
            authority_key,
            authority,
            outsider_key,
            outsider,
        }
    }

    /// Backing store.
    pub fn store(&self) -> &InMemoryAccountStore {
        self.program.store()
    }

    /// Creates a unique asset (supply 1, decimals 0) held by `owner`.
    pub fn mint_unique_asset(&self, label: &str, owner: &Pubkey) -> UniqueAsset {
        let mint = labeled_address(label);
        let mut state = MintState::new(*owner, 0);
        state.supply = 1;
        self.store().put_mint(mint, 1, state);

        let holder_account = associated_token_address(owner, &mint).unwrap();
        let mut holding = TokenAccountState::new(mint, *owner);
        holding.amount = 1;
        self.store().put_token_account(holder_account, 1, holding);

        UniqueAsset {
            mint,
            holder_account,
            owner: *owner,
        }
    }

    /// Initializes a record for the authority.
    pub fn initialize(&self, partnership_id: u64, total_shares: u64) -> Pubkey {
        self.program
            .initialize_partnership(&self.authority, partnership_id, total_shares)
            .unwrap()
    }

    /// Deposit accounts moving `asset` into `record`'s vault.
    pub fn deposit_accounts(&self, record: &Pubkey, asset: &UniqueAsset) -> DepositAccounts {
        DepositAccounts {
            partnership: *record,
            asset_mint: asset.mint,
            source: asset.holder_account,
            vault: self.program.vault_address(record, &asset.mint).unwrap(),
        }
    }

    /// Issue accounts for `record`.
    pub fn issue_accounts(&self, record: &Pubkey) -> IssueAccounts {
        IssueAccounts {
            partnership: *record,
            share_mint: self.program.share_mint_address(record).unwrap(),
        }
    }

    /// Initializes a record and deposits a fresh asset into it.
    pub fn custodied_record(&self, partnership_id: u64, total_shares: u64) -> (Pubkey, UniqueAsset) {
        let record = self.initialize(partnership_id, total_shares);
        let asset = self.mint_unique_asset(&format!("asset-{partnership_id}"), &self.authority);
        self.program
            .deposit_nft(&self.authority, &self.deposit_accounts(&record, &asset))
            .unwrap();
        (record, asset)
    }

    /// Share balance of `owner` in `record`'s share class.
    pub fn share_balance(&self, owner: &Pubkey, record: &Pubkey) -> u64 {
        let account = self.program.share_account_address(owner, record).unwrap();
        self.program.token_balance(&account).unwrap()
    }

    /// Lamports held by `address`.
    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.store()
            .get_account(address)
            .unwrap()
            .map_or(0, |account| account.lamports)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
