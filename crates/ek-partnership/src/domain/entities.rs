//! # Domain Entities
//!
//! The account model the program reads and writes, and the partnership record
//! that lives inside it.
//!
//! Every address in the store holds an [`Account`]: a lamport balance plus one
//! typed payload. Storage lengths are fixed per payload kind and feed the rent
//! schedule in `config::RentConfig`.

use crate::domain::value_objects::Pubkey;
use serde::{Deserialize, Serialize};

// =============================================================================
// PARTNERSHIP RECORD
// =============================================================================

/// Derivation bumps stored alongside the record.
///
/// Storing them lets later transitions re-derive addresses without a bump search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipBumps {
    /// Bump of the record address.
    pub partnership: u8,
    /// Bump of the share mint address (0 until the share mint exists).
    pub share_mint: u8,
}

/// The persistent state of one partnership.
///
/// One record exists per `(authority, partnership_id)` pair, at the address
/// returned by `derivation::partnership_address`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipRecord {
    /// Controlling principal. Immutable.
    pub authority: Pubkey,
    /// Caller-chosen identifier, scoped per authority. Immutable.
    pub partnership_id: u64,
    /// Share units representing 100% ownership. Immutable, never zero.
    pub total_shares: u64,
    /// Flipped false -> true exactly once by the deposit transition.
    pub custody_established: bool,
    /// Mint of the custodied asset. Set once by deposit.
    pub asset_mint: Option<Pubkey>,
    /// Vault token account holding the asset. Set once by deposit.
    pub vault: Option<Pubkey>,
    /// Share class mint. Set on first issuance.
    pub share_mint: Option<Pubkey>,
    /// Cumulative shares issued across all issuances.
    pub issued_shares: u64,
    /// Stored derivation bumps.
    pub bumps: PartnershipBumps,
}

impl PartnershipRecord {
    /// Serialized length used for rent sizing:
    /// authority + id + total + flag + 3 optional keys + issued + bumps.
    pub const LEN: usize = 32 + 8 + 8 + 1 + 3 * (1 + 32) + 8 + 2;

    /// A freshly initialized record with no custody.
    #[must_use]
    pub fn new(authority: Pubkey, partnership_id: u64, total_shares: u64, bump: u8) -> Self {
        Self {
            authority,
            partnership_id,
            total_shares,
            custody_established: false,
            asset_mint: None,
            vault: None,
            share_mint: None,
            issued_shares: 0,
            bumps: PartnershipBumps {
                partnership: bump,
                share_mint: 0,
            },
        }
    }

    /// Shares still unissued relative to `total_shares`.
    #[must_use]
    pub fn remaining_shares(&self) -> u64 {
        self.total_shares.saturating_sub(self.issued_shares)
    }
}

// =============================================================================
// TOKEN STATE
// =============================================================================

/// A fungible or unique token class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintState {
    /// Principal allowed to mint new units. `None` means supply is fixed.
    pub mint_authority: Option<Pubkey>,
    /// Principal allowed to freeze holder accounts.
    pub freeze_authority: Option<Pubkey>,
    /// Units in circulation.
    pub supply: u64,
    /// Display decimals. Unique assets and shares use 0.
    pub decimals: u8,
}

impl MintState {
    /// Serialized length used for rent sizing.
    pub const LEN: usize = 82;

    /// An empty mint controlled by `authority`.
    #[must_use]
    pub fn new(authority: Pubkey, decimals: u8) -> Self {
        Self {
            mint_authority: Some(authority),
            freeze_authority: Some(authority),
            supply: 0,
            decimals,
        }
    }
}

/// A holder's balance of one mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountState {
    /// Mint this account holds.
    pub mint: Pubkey,
    /// Holder permitted to move the balance.
    pub owner: Pubkey,
    /// Units held.
    pub amount: u64,
}

impl TokenAccountState {
    /// Serialized length used for rent sizing.
    pub const LEN: usize = 165;

    /// An empty account for `(mint, owner)`.
    #[must_use]
    pub fn new(mint: Pubkey, owner: Pubkey) -> Self {
        Self {
            mint,
            owner,
            amount: 0,
        }
    }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Typed payload of an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountData {
    /// Plain wallet holding only lamports.
    System,
    /// A partnership record.
    Partnership(PartnershipRecord),
    /// A token mint.
    Mint(MintState),
    /// A token holder account.
    Token(TokenAccountState),
}

impl AccountData {
    /// Storage length of this payload.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::System => 0,
            Self::Partnership(_) => PartnershipRecord::LEN,
            Self::Mint(_) => MintState::LEN,
            Self::Token(_) => TokenAccountState::LEN,
        }
    }

    /// True for plain wallets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::System)
    }

    /// Short kind label for logs and errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Partnership(_) => "partnership",
            Self::Mint(_) => "mint",
            Self::Token(_) => "token",
        }
    }
}

/// One entry of the account store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Native balance. Pays for account creation.
    pub lamports: u64,
    /// Typed payload.
    pub data: AccountData,
}

impl Account {
    /// A funded wallet.
    #[must_use]
    pub fn wallet(lamports: u64) -> Self {
        Self {
            lamports,
            data: AccountData::System,
        }
    }

    /// A program account funded with its rent deposit.
    #[must_use]
    pub fn with_data(lamports: u64, data: AccountData) -> Self {
        Self { lamports, data }
    }

    /// The record payload, if this is a partnership account.
    #[must_use]
    pub fn as_partnership(&self) -> Option<&PartnershipRecord> {
        match &self.data {
            AccountData::Partnership(record) => Some(record),
            _ => None,
        }
    }

    /// The mint payload, if this is a mint account.
    #[must_use]
    pub fn as_mint(&self) -> Option<&MintState> {
        match &self.data {
            AccountData::Mint(mint) => Some(mint),
            _ => None,
        }
    }

    /// The token payload, if this is a token account.
    #[must_use]
    pub fn as_token(&self) -> Option<&TokenAccountState> {
        match &self.data {
            AccountData::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// One entry of a share distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareDistribution {
    /// Wallet that will own the credited share account.
    pub recipient: Pubkey,
    /// Share units to credit.
    pub amount: u64,
}

impl ShareDistribution {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(recipient: Pubkey, amount: u64) -> Self {
        Self { recipient, amount }
    }
}

// =============================================================================
// TESTS
// =============================================================================
