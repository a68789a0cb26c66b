use super::{enforce_invariants, load_record, TransactionContext, TransitionOutput};
use crate::config::ProgramConfig;
use crate::domain::derivation::{associated_token_address, share_mint_address};
use crate::domain::entities::{AccountData, MintState, ShareDistribution, TokenAccountState};
use crate::domain::value_objects::Pubkey;
use crate::domain::{guard, token};
use crate::errors::{ProgramError, ProgramResult};
use crate::events::{ProgramEvent, SharesIssuedPayload};
use crate::instruction::IssueAccounts;
use crate::ports::inbound::IssuanceReceipt;
use crate::ports::outbound::AccountStore;
use tracing::debug;

/// Mints a share distribution, in order, to each recipient's associated share
/// account.
///
/// The share mint is created on first issuance with the record as mint and
/// freeze authority. Missing recipient accounts are created and paid for by
/// `caller`. Any failure, including running out of rent funds part-way
/// through the list, leaves every staged write uncommitted.
///
/// # Errors
///
/// - `Unauthorized` for a foreign caller
/// - `CustodyNotEstablished` before the asset is deposited
/// - `InvalidTokenAccount` for a share mint or recipient account of the wrong shape
/// - `SharesAlreadyIssued` / `InvalidShareDistribution` from the issuance policy
pub fn mint_shares<S: AccountStore + ?Sized>(
    ctx: &mut TransactionContext<'_, S>,
    config: &ProgramConfig,
    caller: &Pubkey,
    accounts: &IssueAccounts,
    distribution: &[ShareDistribution],
) -> ProgramResult<TransitionOutput<IssuanceReceipt>> {
    let record_address = accounts.partnership;
    let before = load_record(ctx, &config.program_id, &record_address)?;

    guard::require_authority(&before, caller)?;
    guard::require_custody_established(&before)?;

    let (share_mint, bump) = share_mint_address(&config.program_id, &record_address)?;
    if accounts.share_mint != share_mint {
        return Err(ProgramError::InvalidTokenAccount(format!(
            "share mint {} is not the record's derived mint {share_mint}",
            accounts.share_mint
        )));
    }

    let batch_total = config.issuance.validate(&before, distribution)?;

    let mut mint = if ctx.exists(&share_mint)? {
        ctx.load_mint(&share_mint)?
    } else {
        let mint = MintState::new(record_address, config.share_decimals);
        ctx.create_account(caller, share_mint, AccountData::Mint(mint.clone()))?;
        mint
    };

    for (index, entry) in distribution.iter().enumerate() {
        let holder = associated_token_address(&entry.recipient, &share_mint)?;
        let mut account = if ctx.exists(&holder)? {
            let account = ctx.load_token(&holder)?;
            if account.mint != share_mint || account.owner != entry.recipient {
                return Err(ProgramError::InvalidTokenAccount(format!(
                    "share account {holder} does not belong to recipient {}",
                    entry.recipient
                )));
            }
            account
        } else {
            let account = TokenAccountState::new(share_mint, entry.recipient);
            ctx.create_account(caller, holder, AccountData::Token(account.clone()))?;
            account
        };

        token::mint_to(&share_mint, &mut mint, &mut account, &record_address, entry.amount)?;
        debug!(
            index,
            recipient = %entry.recipient,
            amount = entry.amount,
            "staged share credit"
        );
        ctx.put_data(holder, AccountData::Token(account))?;
    }
    ctx.put_data(share_mint, AccountData::Mint(mint))?;

    let mut after = before.clone();
    after.share_mint = Some(share_mint);
    after.bumps.share_mint = bump;
    after.issued_shares = before
        .issued_shares
        .checked_add(batch_total)
        .ok_or_else(|| ProgramError::InvariantViolation("issued shares overflow".into()))?;
    enforce_invariants(Some(&before), &after)?;

    let receipt = IssuanceReceipt {
        share_mint,
        batch_total,
        issued_total: after.issued_shares,
    };
    ctx.put_data(record_address, AccountData::Partnership(after))?;

    Ok(TransitionOutput {
        value: receipt,
        event: ProgramEvent::SharesIssued(SharesIssuedPayload {
            partnership: record_address,
            share_mint,
            distribution: distribution.to_vec(),
            batch_total,
            issued_total: receipt.issued_total,
        }),
    })
}
