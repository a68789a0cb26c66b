use super::{enforce_invariants, TransactionContext, TransitionOutput};
use crate::domain::derivation::partnership_address;
use crate::domain::entities::{AccountData, PartnershipRecord};
use crate::domain::value_objects::Pubkey;
use crate::errors::{ProgramError, ProgramResult};
use crate::events::{PartnershipInitializedPayload, ProgramEvent};
use crate::ports::outbound::AccountStore;

/// Creates the record for `(caller, partnership_id)`, paid for by `caller`.
///
/// Returns the record address.
///
/// # Errors
///
/// - `InvalidTotalShares` if `total_shares` is zero
/// - `DuplicateRecord` if the derived address is occupied
/// - `InsufficientFunds` if `caller` cannot pay the record's rent
pub fn initialize_partnership<S: AccountStore + ?Sized>(
    ctx: &mut TransactionContext<'_, S>,
    program_id: &Pubkey,
    caller: &Pubkey,
    partnership_id: u64,
    total_shares: u64,
) -> ProgramResult<TransitionOutput<Pubkey>> {
    if total_shares == 0 {
        return Err(ProgramError::InvalidTotalShares);
    }

    let (address, bump) = partnership_address(program_id, caller, partnership_id)?;
    if ctx.exists(&address)? {
        return Err(ProgramError::DuplicateRecord { address });
    }

    let record = PartnershipRecord::new(*caller, partnership_id, total_shares, bump);
    enforce_invariants(None, &record)?;
    ctx.create_account(caller, address, AccountData::Partnership(record))?;

    Ok(TransitionOutput {
        value: address,
        event: ProgramEvent::PartnershipInitialized(PartnershipInitializedPayload {
            partnership: address,
            authority: *caller,
            partnership_id,
            total_shares,
        }),
    })
}
