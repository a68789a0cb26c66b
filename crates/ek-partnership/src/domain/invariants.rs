//! # Domain Invariants
//!
//! Record invariants re-checked on the staged state before every commit.
//! A violation aborts the transition and nothing is written.
//!
//! - Immutable fields: authority, id, total shares and record bump never change
//! - Custody is monotonic: false -> true once, asset mint and vault set once
//! - Issuance requires custody and a share mint
//! - Issued shares never decrease, share mint set once
//! - The vault holds at most one unit of the asset

use crate::domain::entities::{PartnershipRecord, TokenAccountState};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Authority, id, total shares and record bump are unchanged.
#[must_use]
pub fn check_immutable_fields(before: &PartnershipRecord, after: &PartnershipRecord) -> bool {
    before.authority == after.authority
        && before.partnership_id == after.partnership_id
        && before.total_shares == after.total_shares
        && before.bumps.partnership == after.bumps.partnership
}

/// Custody never reverts, and its identifiers are never rewritten.
#[must_use]
pub fn check_custody_monotonic(before: &PartnershipRecord, after: &PartnershipRecord) -> bool {
    if before.custody_established && !after.custody_established {
        return false;
    }
    set_once(before.asset_mint.as_ref(), after.asset_mint.as_ref())
        && set_once(before.vault.as_ref(), after.vault.as_ref())
}

/// Custody fields are all set together or not at all.
#[must_use]
pub fn check_custody_consistent(record: &PartnershipRecord) -> bool {
    record.custody_established == record.asset_mint.is_some()
        && record.custody_established == record.vault.is_some()
}

/// Any issued share implies established custody and a known share mint.
#[must_use]
pub fn check_issuance_requires_custody(record: &PartnershipRecord) -> bool {
    if record.issued_shares == 0 && record.share_mint.is_none() {
        return true;
    }
    record.custody_established && record.share_mint.is_some()
}

/// Issued shares only grow and the share mint is set once.
#[must_use]
pub fn check_issuance_monotonic(before: &PartnershipRecord, after: &PartnershipRecord) -> bool {
    after.issued_shares >= before.issued_shares
        && set_once(before.share_mint.as_ref(), after.share_mint.as_ref())
}

/// Vault balance is zero or one unit.
#[must_use]
pub fn check_vault_single_unit(vault: &TokenAccountState) -> bool {
    vault.amount <= 1
}

fn set_once<T: PartialEq>(before: Option<&T>, after: Option<&T>) -> bool {
    match (before, after) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(a), Some(b)) => a == b,
    }
}

/// Checks every record invariant for a transition from `before` to `after`.
///
/// `before` is `None` for a record created by this transition, in which case
/// `after` must be a fresh record.
#[must_use]
pub fn check_all_invariants(
    before: Option<&PartnershipRecord>,
    after: &PartnershipRecord,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if after.total_shares == 0 {
        violations.push(InvariantViolation::ZeroTotalShares);
    }

    match before {
        Some(before) => {
            if !check_immutable_fields(before, after) {
                violations.push(InvariantViolation::ImmutableFieldChanged);
            }
            if !check_custody_monotonic(before, after) {
                violations.push(InvariantViolation::CustodyRegressed);
            }
            if !check_issuance_monotonic(before, after) {
                violations.push(InvariantViolation::IssuanceRegressed {
                    before: before.issued_shares,
                    after: after.issued_shares,
                });
            }
        }
        None => {
            if after.custody_established || after.issued_shares != 0 {
                violations.push(InvariantViolation::NotFresh);
            }
        }
    }

    if !check_custody_consistent(after) {
        violations.push(InvariantViolation::CustodyInconsistent);
    }
    if !check_issuance_requires_custody(after) {
        violations.push(InvariantViolation::IssuanceWithoutCustody);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `total_shares` is zero.
    ZeroTotalShares,
    /// Authority, id, total shares or record bump changed.
    ImmutableFieldChanged,
    /// Custody flag reverted or an identifier was rewritten.
    CustodyRegressed,
    /// Custody flag disagrees with the asset mint or vault.
    CustodyInconsistent,
    /// Shares issued without custody or share mint.
    IssuanceWithoutCustody,
    /// Issued total shrank or the share mint changed.
    IssuanceRegressed { before: u64, after: u64 },
    /// A newly created record carries custody or issuance state.
    NotFresh,
    /// Vault holds more than one unit.
    VaultOverfilled { amount: u64 },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroTotalShares => write!(f, "total shares is zero"),
            Self::ImmutableFieldChanged => write!(f, "immutable record field changed"),
            Self::CustodyRegressed => write!(f, "custody state regressed"),
            Self::CustodyInconsistent => {
                write!(f, "custody flag disagrees with asset mint or vault")
            }
            Self::IssuanceWithoutCustody => write!(f, "shares issued without custody"),
            Self::IssuanceRegressed { before, after } => {
                write!(f, "issuance regressed: {before} -> {after}")
            }
            Self::NotFresh => write!(f, "new record is not fresh"),
            Self::VaultOverfilled { amount } => {
                write!(f, "vault holds {amount} units, at most 1 allowed")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
