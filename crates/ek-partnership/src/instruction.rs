//! # Instructions
//!
//! Wire form of the three entry points and their Ed25519 envelope.
//!
//! The signed message is the bincode encoding of `(program_id, instruction)`,
//! so a signature cannot be replayed against another program deployment.

use crate::domain::entities::ShareDistribution;
use crate::domain::value_objects::Pubkey;
use crate::errors::{ProgramError, ProgramResult};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

// =============================================================================
// ACCOUNT LISTS
// =============================================================================

/// Accounts supplied to `deposit_nft`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAccounts {
    /// Record receiving custody.
    pub partnership: Pubkey,
    /// Mint of the unique asset.
    pub asset_mint: Pubkey,
    /// Authority's token account currently holding the asset.
    pub source: Pubkey,
    /// Associated token account of the record for `asset_mint`.
    pub vault: Pubkey,
}

/// Accounts supplied to `mint_shares`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAccounts {
    /// Record issuing shares.
    pub partnership: Pubkey,
    /// Derived share mint of the record.
    pub share_mint: Pubkey,
}

// =============================================================================
// INSTRUCTIONS
// =============================================================================

/// One program entry point with its inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Create a record for `(signer, partnership_id)`.
    InitializePartnership {
        partnership_id: u64,
        total_shares: u64,
    },
    /// Move the asset into custody.
    DepositNft(DepositAccounts),
    /// Mint shares to recipients.
    MintShares {
        accounts: IssueAccounts,
        distribution: Vec<ShareDistribution>,
    },
}

impl Instruction {
    /// Entry point name for logs and metrics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializePartnership { .. } => "initialize_partnership",
            Self::DepositNft(_) => "deposit_nft",
            Self::MintShares { .. } => "mint_shares",
        }
    }

    /// Bytes covered by the signature.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` if the instruction cannot be encoded.
    pub fn signing_message(&self, program_id: &Pubkey) -> ProgramResult<Vec<u8>> {
        bincode::serialize(&(program_id, self)).map_err(|_| ProgramError::InvalidSignature)
    }
}

/// An instruction signed by its caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedInstruction {
    /// Caller; becomes the `caller` of the dispatched entry point.
    pub signer: Pubkey,
    /// Instruction payload.
    pub instruction: Instruction,
    /// Ed25519 signature over [`Instruction::signing_message`].
    pub signature: [u8; 64],
}

impl SignedInstruction {
    /// Signs `instruction` for `program_id`.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` if the instruction cannot be encoded.
    pub fn sign(
        key: &SigningKey,
        program_id: &Pubkey,
        instruction: Instruction,
    ) -> ProgramResult<Self> {
        let message = instruction.signing_message(program_id)?;
        let signature = key.sign(&message);
        Ok(Self {
            signer: Pubkey::from(key.verifying_key()),
            instruction,
            signature: signature.to_bytes(),
        })
    }

    /// Checks the signature against `signer` for `program_id`.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` if the signer is not a valid key or the signature
    /// does not verify.
    pub fn verify(&self, program_id: &Pubkey) -> ProgramResult<()> {
        let key = VerifyingKey::from_bytes(self.signer.as_bytes())
            .map_err(|_| ProgramError::InvalidSignature)?;
        let message = self.instruction.signing_message(program_id)?;
        let signature = Signature::from_bytes(&self.signature);
        key.verify(&message, &signature)
            .map_err(|_| ProgramError::InvalidSignature)
    }
}

// =============================================================================
// TESTS
// =============================================================================
