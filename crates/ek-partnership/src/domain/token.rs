//! # Token Rules
//!
//! Mint and transfer rules applied to staged token state.
//! Each function validates everything before mutating, so an `Err` leaves both
//! arguments untouched.

use crate::domain::entities::{MintState, TokenAccountState};
use crate::domain::value_objects::Pubkey;
use crate::errors::TokenError;

/// Mints `amount` new units of `mint` into `destination`.
///
/// # Errors
///
/// `MintMismatch`, `FixedSupply`, `MintAuthorityMismatch`, `Overflow`.
pub fn mint_to(
    mint_address: &Pubkey,
    mint: &mut MintState,
    destination: &mut TokenAccountState,
    authority: &Pubkey,
    amount: u64,
) -> Result<(), TokenError> {
    if destination.mint != *mint_address {
        return Err(TokenError::MintMismatch {
            expected: *mint_address,
            actual: destination.mint,
        });
    }
    match mint.mint_authority {
        None => return Err(TokenError::FixedSupply),
        Some(expected) if expected != *authority => {
            return Err(TokenError::MintAuthorityMismatch)
        }
        Some(_) => {}
    }

    let supply = mint.supply.checked_add(amount).ok_or(TokenError::Overflow)?;
    let balance = destination
        .amount
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;

    mint.supply = supply;
    destination.amount = balance;
    Ok(())
}

/// Moves `amount` units from `source` to `destination`, signed by `owner`.
///
/// # Errors
///
/// `MintMismatch`, `OwnerMismatch`, `InsufficientTokens`, `Overflow`.
pub fn transfer(
    source: &mut TokenAccountState,
    destination: &mut TokenAccountState,
    owner: &Pubkey,
    amount: u64,
) -> Result<(), TokenError> {
    if source.mint != destination.mint {
        return Err(TokenError::MintMismatch {
            expected: source.mint,
            actual: destination.mint,
        });
    }
    if source.owner != *owner {
        return Err(TokenError::OwnerMismatch {
            expected: source.owner,
            actual: *owner,
        });
    }
    if source.amount < amount {
        return Err(TokenError::InsufficientTokens {
            required: amount,
            available: source.amount,
        });
    }
    let credited = destination
        .amount
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;

    source.amount -= amount;
    destination.amount = credited;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
