//! # Issuance Policy
//!
//! Whether a distribution may be issued against a record, and how much of the
//! record's `total_shares` it may consume.
//!
//! | Cap | After the batch |
//! |-----|-----------------|
//! | `Unbounded` | no limit |
//! | `WithinTotal` | `issued_shares <= total_shares` |
//! | `ExactTotal` | `issued_shares == total_shares` |
//!
//! `allow_reissue = false` rejects any issuance once a share mint exists.

use crate::domain::entities::{PartnershipRecord, ShareDistribution};
use crate::errors::{ProgramError, ProgramResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Limit applied to the cumulative issued amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssuanceCap {
    /// No check against `total_shares`.
    Unbounded,
    /// Cumulative issuance may not exceed `total_shares`.
    WithinTotal,
    /// Cumulative issuance must land exactly on `total_shares`.
    #[default]
    ExactTotal,
}

impl fmt::Display for IssuanceCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unbounded => "unbounded",
            Self::WithinTotal => "within-total",
            Self::ExactTotal => "exact-total",
        };
        f.write_str(s)
    }
}

impl FromStr for IssuanceCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" => Ok(Self::Unbounded),
            "within-total" | "within_total" => Ok(Self::WithinTotal),
            "exact-total" | "exact_total" | "exact" => Ok(Self::ExactTotal),
            other => Err(format!("unknown issuance cap: {other}")),
        }
    }
}

/// Issuance rules enforced by the share issuance transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuancePolicy {
    /// Limit on cumulative issuance.
    pub cap: IssuanceCap,
    /// Whether a record may issue more than once.
    pub allow_reissue: bool,
}

impl Default for IssuancePolicy {
    fn default() -> Self {
        Self {
            cap: IssuanceCap::ExactTotal,
            allow_reissue: false,
        }
    }
}

impl IssuancePolicy {
    /// No cap and repeatable issuance.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            cap: IssuanceCap::Unbounded,
            allow_reissue: true,
        }
    }

    /// Validates `distribution` against `record`, returning the batch total.
    ///
    /// # Errors
    ///
    /// - `SharesAlreadyIssued` on a repeat issuance when reissue is disallowed
    /// - `InvalidShareDistribution` for empty lists, zero amounts, overflow or
    ///   a cap violation
    pub fn validate(
        &self,
        record: &PartnershipRecord,
        distribution: &[ShareDistribution],
    ) -> ProgramResult<u64> {
        if !self.allow_reissue && record.share_mint.is_some() {
            return Err(ProgramError::SharesAlreadyIssued);
        }
        if distribution.is_empty() {
            return Err(ProgramError::InvalidShareDistribution(
                "distribution is empty".into(),
            ));
        }
        if let Some(index) = distribution.iter().position(|entry| entry.amount == 0) {
            return Err(ProgramError::InvalidShareDistribution(format!(
                "entry {index} has a zero amount"
            )));
        }

        let batch = distribution
            .iter()
            .try_fold(0u64, |acc, entry| acc.checked_add(entry.amount))
            .ok_or_else(|| {
                ProgramError::InvalidShareDistribution("distribution total overflows".into())
            })?;
        let issued_after = record.issued_shares.checked_add(batch).ok_or_else(|| {
            ProgramError::InvalidShareDistribution("cumulative issuance overflows".into())
        })?;

        match self.cap {
            IssuanceCap::Unbounded => {}
            IssuanceCap::WithinTotal if issued_after > record.total_shares => {
                return Err(ProgramError::InvalidShareDistribution(format!(
                    "issuing {batch} would bring issuance to {issued_after} of {} shares",
                    record.total_shares
                )));
            }
            IssuanceCap::ExactTotal if issued_after != record.total_shares => {
                return Err(ProgramError::InvalidShareDistribution(format!(
                    "issuance must total exactly {} shares, got {issued_after}",
                    record.total_shares
                )));
            }
            IssuanceCap::WithinTotal | IssuanceCap::ExactTotal => {}
        }
        Ok(batch)
    }
}

// =============================================================================
// TESTS
// =============================================================================
