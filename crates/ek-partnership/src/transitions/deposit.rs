use super::{enforce_invariants, load_record, TransactionContext, TransitionOutput};
use crate::domain::derivation::associated_token_address;
use crate::domain::entities::{AccountData, TokenAccountState};
use crate::domain::invariants::{check_vault_single_unit, InvariantViolation};
use crate::domain::value_objects::Pubkey;
use crate::domain::{guard, token};
use crate::errors::{ProgramError, ProgramResult};
use crate::events::{AssetDepositedPayload, ProgramEvent};
use crate::instruction::DepositAccounts;
use crate::ports::outbound::AccountStore;

/// Moves the unique asset from the authority's token account into the record's
/// vault and marks custody established.
///
/// Checks run in this order: caller is the authority, source is held by the
/// authority, custody not yet established, then the token account shapes.
/// The vault is created (paid by `caller`) if it does not exist yet.
///
/// Returns the vault address.
///
/// # Errors
///
/// - `Unauthorized` for a foreign caller or a source held by someone else
/// - `AlreadyDeposited` if the record already has custody
/// - `InvalidTokenAccount` for a source, asset mint or vault of the wrong shape
pub fn deposit_nft<S: AccountStore + ?Sized>(
    ctx: &mut TransactionContext<'_, S>,
    program_id: &Pubkey,
    caller: &Pubkey,
    accounts: &DepositAccounts,
) -> ProgramResult<TransitionOutput<Pubkey>> {
    let before = load_record(ctx, program_id, &accounts.partnership)?;

    guard::require_authority(&before, caller)?;
    let mut source = ctx.load_token(&accounts.source)?;
    guard::require_held_by_authority(&source, &before)?;
    guard::require_custody_open(&before)?;

    if source.mint != accounts.asset_mint {
        return Err(ProgramError::InvalidTokenAccount(format!(
            "source holds mint {}, not the asset mint {}",
            source.mint, accounts.asset_mint
        )));
    }
    if source.amount != 1 {
        return Err(ProgramError::InvalidTokenAccount(format!(
            "source must hold exactly one unit, holds {}",
            source.amount
        )));
    }
    let asset = ctx.load_mint(&accounts.asset_mint)?;
    if asset.decimals != 0 || asset.supply != 1 {
        return Err(ProgramError::InvalidTokenAccount(format!(
            "asset mint is not unique: supply {}, decimals {}",
            asset.supply, asset.decimals
        )));
    }

    let expected_vault = associated_token_address(&accounts.partnership, &accounts.asset_mint)?;
    if accounts.vault != expected_vault {
        return Err(ProgramError::InvalidTokenAccount(format!(
            "vault {} is not the record's associated account {expected_vault}",
            accounts.vault
        )));
    }

    let mut vault = if ctx.exists(&accounts.vault)? {
        let vault = ctx.load_token(&accounts.vault)?;
        if vault.mint != accounts.asset_mint || vault.owner != accounts.partnership {
            return Err(ProgramError::InvalidTokenAccount(format!(
                "existing vault {} is not held by the record for the asset mint",
                accounts.vault
            )));
        }
        vault
    } else {
        let vault = TokenAccountState::new(accounts.asset_mint, accounts.partnership);
        ctx.create_account(caller, accounts.vault, AccountData::Token(vault.clone()))?;
        vault
    };

    token::transfer(&mut source, &mut vault, &before.authority, 1)?;
    if !check_vault_single_unit(&vault) {
        return Err(ProgramError::InvariantViolation(
            InvariantViolation::VaultOverfilled {
                amount: vault.amount,
            }
            .to_string(),
        ));
    }

    let mut after = before.clone();
    after.custody_established = true;
    after.asset_mint = Some(accounts.asset_mint);
    after.vault = Some(accounts.vault);
    enforce_invariants(Some(&before), &after)?;

    ctx.put_data(accounts.source, AccountData::Token(source))?;
    ctx.put_data(accounts.vault, AccountData::Token(vault))?;
    ctx.put_data(accounts.partnership, AccountData::Partnership(after))?;

    Ok(TransitionOutput {
        value: accounts.vault,
        event: ProgramEvent::AssetDeposited(AssetDepositedPayload {
            partnership: accounts.partnership,
            asset_mint: accounts.asset_mint,
            source: accounts.source,
            vault: accounts.vault,
        }),
    })
}
