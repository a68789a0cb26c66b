//! # State Transitions
//!
//! The three program transitions, each a function over a
//! [`TransactionContext`]. A transition either returns its output with every
//! write staged in the context, or an error; it never touches the store.
//!
//! | Transition | Creates | Mutates |
//! |------------|---------|---------|
//! | [`initialize::initialize_partnership`] | record | payer |
//! | [`deposit::deposit_nft`] | vault (if absent) | record, source, vault, payer |
//! | [`issue::mint_shares`] | share mint, share accounts (if absent) | record, share mint, share accounts, payer |

pub mod context;
pub mod deposit;
pub mod initialize;
pub mod issue;

pub use context::TransactionContext;

use crate::domain::derivation::rederive_partnership_address;
use crate::domain::entities::PartnershipRecord;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::value_objects::Pubkey;
use crate::errors::{ProgramError, ProgramResult};
use crate::events::ProgramEvent;
use crate::ports::outbound::AccountStore;

/// Value produced by a transition plus the event to publish once committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionOutput<T> {
    /// Transition result.
    pub value: T,
    /// Event describing the staged change.
    pub event: ProgramEvent,
}

/// Loads a record and confirms it sits at its own derived address.
pub(crate) fn load_record<S: AccountStore + ?Sized>(
    ctx: &TransactionContext<'_, S>,
    program_id: &Pubkey,
    address: &Pubkey,
) -> ProgramResult<PartnershipRecord> {
    let record = ctx.load_partnership(address)?;
    if rederive_partnership_address(program_id, &record)? != *address {
        return Err(ProgramError::InvariantViolation(format!(
            "record at {address} is not at its derived address"
        )));
    }
    Ok(record)
}

/// Maps invariant violations into a single program error.
pub(crate) fn enforce_invariants(
    before: Option<&PartnershipRecord>,
    after: &PartnershipRecord,
) -> ProgramResult<()> {
    match check_all_invariants(before, after) {
        InvariantCheckResult::Valid => Ok(()),
        InvariantCheckResult::Invalid(violations) => {
            let joined = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Err(ProgramError::InvariantViolation(joined))
        }
    }
}
