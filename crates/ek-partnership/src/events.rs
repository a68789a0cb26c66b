//! # Event Schema
//!
//! Payloads published to the `EventSink` after a transition commits.
//! A rejected transition publishes nothing.
//!
//! | Event | Emitted by |
//! |-------|------------|
//! | `PartnershipInitialized` | `initialize_partnership` |
//! | `AssetDeposited` | `deposit_nft` |
//! | `SharesIssued` | `mint_shares` |

use crate::domain::entities::ShareDistribution;
use crate::domain::value_objects::Pubkey;
use serde::{Deserialize, Serialize};

/// A new partnership record was created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipInitializedPayload {
    /// Record address.
    pub partnership: Pubkey,
    /// Controlling principal.
    pub authority: Pubkey,
    /// Caller-chosen id.
    pub partnership_id: u64,
    /// Share units representing full ownership.
    pub total_shares: u64,
}

/// The unique asset moved into the record's vault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDepositedPayload {
    /// Record address.
    pub partnership: Pubkey,
    /// Mint of the custodied asset.
    pub asset_mint: Pubkey,
    /// Token account the asset left.
    pub source: Pubkey,
    /// Vault now holding the asset.
    pub vault: Pubkey,
}

/// A distribution was minted to recipients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesIssuedPayload {
    /// Record address.
    pub partnership: Pubkey,
    /// Share class mint.
    pub share_mint: Pubkey,
    /// Entries in the order they were credited.
    pub distribution: Vec<ShareDistribution>,
    /// Units minted by this batch.
    pub batch_total: u64,
    /// Cumulative units issued by the record after this batch.
    pub issued_total: u64,
}

/// Events emitted by committed transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProgramEvent {
    /// See [`PartnershipInitializedPayload`].
    PartnershipInitialized(PartnershipInitializedPayload),
    /// See [`AssetDepositedPayload`].
    AssetDeposited(AssetDepositedPayload),
    /// See [`SharesIssuedPayload`].
    SharesIssued(SharesIssuedPayload),
}

impl ProgramEvent {
    /// Event name for logs and metrics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PartnershipInitialized(_) => "PartnershipInitialized",
            Self::AssetDeposited(_) => "AssetDeposited",
            Self::SharesIssued(_) => "SharesIssued",
        }
    }

    /// Record address the event concerns.
    #[must_use]
    pub fn partnership(&self) -> Pubkey {
        match self {
            Self::PartnershipInitialized(p) => p.partnership,
            Self::AssetDeposited(p) => p.partnership,
            Self::SharesIssued(p) => p.partnership,
        }
    }
}
