//! # Authorization Guard
//!
//! Capability checks composed at the top of each transition.
//!
//! The two authorization questions are independent:
//! - is the caller the recorded authority?
//! - is the asset source account actually held by that authority?
//!
//! A signer that passes the first check can still fail the second, which stops
//! an authority from depositing an asset it does not possess.

use crate::domain::entities::{PartnershipRecord, TokenAccountState};
use crate::domain::value_objects::Pubkey;
use crate::errors::{ProgramError, ProgramResult};

// =============================================================================
// PREDICATES
// =============================================================================

/// Caller is the record authority.
#[must_use]
pub fn is_authority(record: &PartnershipRecord, caller: &Pubkey) -> bool {
    record.authority == *caller
}

/// Source token account is held by the record authority.
#[must_use]
pub fn is_held_by_authority(source: &TokenAccountState, record: &PartnershipRecord) -> bool {
    source.owner == record.authority
}

// =============================================================================
// REQUIREMENTS
// =============================================================================

/// Fails with `Unauthorized` unless `caller` is the record authority.
///
/// # Errors
///
/// `ProgramError::Unauthorized`
pub fn require_authority(record: &PartnershipRecord, caller: &Pubkey) -> ProgramResult<()> {
    if is_authority(record, caller) {
        Ok(())
    } else {
        Err(ProgramError::Unauthorized(format!(
            "caller {caller} is not the partnership authority"
        )))
    }
}

/// Fails with `Unauthorized` unless the source account holder is the authority.
///
/// # Errors
///
/// `ProgramError::Unauthorized`
pub fn require_held_by_authority(
    source: &TokenAccountState,
    record: &PartnershipRecord,
) -> ProgramResult<()> {
    if is_held_by_authority(source, record) {
        Ok(())
    } else {
        Err(ProgramError::Unauthorized(format!(
            "source account is held by {}, not the partnership authority",
            source.owner
        )))
    }
}

/// Fails with `AlreadyDeposited` once custody is established.
///
/// # Errors
///
/// `ProgramError::AlreadyDeposited`
pub fn require_custody_open(record: &PartnershipRecord) -> ProgramResult<()> {
    if record.custody_established {
        Err(ProgramError::AlreadyDeposited)
    } else {
        Ok(())
    }
}

/// Fails with `CustodyNotEstablished` until the asset is deposited.
///
/// # Errors
///
/// `ProgramError::CustodyNotEstablished`
pub fn require_custody_established(record: &PartnershipRecord) -> ProgramResult<()> {
    if record.custody_established {
        Ok(())
    } else {
        Err(ProgramError::CustodyNotEstablished)
    }
}

// =============================================================================
// TESTS
// =============================================================================
