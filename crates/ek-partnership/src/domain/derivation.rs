//! # Address Derivation
//!
//! Pure functions mapping stable, byte-tagged inputs to account addresses.
//!
//! ```text
//! address = SHA-256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")
//! ```
//!
//! An output that happens to be a valid Ed25519 point is rejected, so a derived
//! address never has a private key. [`find_program_address`] appends a one-byte
//! bump seed, searching from 255 downwards, until the output is off-curve.
//!
//! ## Addresses
//!
//! | Address | Seeds | Program |
//! |---------|-------|---------|
//! | Partnership record | `"partnership"`, authority, id (LE u64) | partnership program |
//! | Share mint | `"share_mint"`, record | partnership program |
//! | Associated token account | owner, token program, mint | associated token program |

use crate::domain::entities::PartnershipRecord;
use crate::domain::value_objects::{program_ids, Pubkey};
use crate::errors::DerivationError;
use sha2::{Digest, Sha256};

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Marker appended to every derivation preimage.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Domain tag of partnership record addresses.
pub const PARTNERSHIP_SEED: &[u8] = b"partnership";

/// Domain tag of share mint addresses.
pub const SHARE_MINT_SEED: &[u8] = b"share_mint";

// =============================================================================
// CORE DERIVATION
// =============================================================================

/// Computes the derived address for an exact seed list.
///
/// # Errors
///
/// - `TooManySeeds` / `MaxSeedLengthExceeded` for malformed input
/// - `InvalidSeeds` if the output lies on the Ed25519 curve
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<Pubkey, DerivationError> {
    if seeds.len() > MAX_SEEDS {
        return Err(DerivationError::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS,
        });
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(DerivationError::MaxSeedLengthExceeded {
            index,
            len: seed.len(),
            max: MAX_SEED_LEN,
        });
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    let address = Pubkey::new(hasher.finalize().into());

    if address.is_on_curve() {
        return Err(DerivationError::InvalidSeeds);
    }
    Ok(address)
}

/// Finds the first off-curve address for `seeds` plus a bump, bump 255 first.
///
/// # Errors
///
/// Malformed input errors from [`create_program_address`], or `NoViableBump`
/// if all 256 bumps land on the curve.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    if seeds.len() >= MAX_SEEDS {
        return Err(DerivationError::TooManySeeds {
            count: seeds.len() + 1,
            max: MAX_SEEDS,
        });
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);

        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(DerivationError::InvalidSeeds) => continue,
            Err(other) => return Err(other),
        }
    }
    Err(DerivationError::NoViableBump)
}

// =============================================================================
// PROGRAM ADDRESSES
// =============================================================================

/// Record address for `(authority, partnership_id)`.
///
/// # Errors
///
/// Only `NoViableBump`, which is cryptographically negligible.
pub fn partnership_address(
    program_id: &Pubkey,
    authority: &Pubkey,
    partnership_id: u64,
) -> Result<(Pubkey, u8), DerivationError> {
    find_program_address(
        &[
            PARTNERSHIP_SEED,
            authority.as_ref(),
            &partnership_id.to_le_bytes(),
        ],
        program_id,
    )
}

/// Re-derives a record's address from its stored fields and bump.
///
/// # Errors
///
/// `InvalidSeeds` if the stored bump does not produce an off-curve address.
pub fn rederive_partnership_address(
    program_id: &Pubkey,
    record: &PartnershipRecord,
) -> Result<Pubkey, DerivationError> {
    create_program_address(
        &[
            PARTNERSHIP_SEED,
            record.authority.as_ref(),
            &record.partnership_id.to_le_bytes(),
            &[record.bumps.partnership],
        ],
        program_id,
    )
}

/// Share mint address for a record.
///
/// # Errors
///
/// Only `NoViableBump`.
pub fn share_mint_address(
    program_id: &Pubkey,
    record_address: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    find_program_address(&[SHARE_MINT_SEED, record_address.as_ref()], program_id)
}

/// Associated token account of `owner` for `mint`.
///
/// # Errors
///
/// Only `NoViableBump`.
pub fn associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey, DerivationError> {
    find_program_address(
        &[
            owner.as_ref(),
            program_ids::TOKEN_PROGRAM.as_ref(),
            mint.as_ref(),
        ],
        &program_ids::ASSOCIATED_TOKEN_PROGRAM,
    )
    .map(|(address, _)| address)
}

// =============================================================================
// TESTS
// =============================================================================
