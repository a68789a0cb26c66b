//! # Value Objects
//!
//! Immutable domain primitives for the partnership program.
//! These types represent concepts that are defined by their value, not identity.

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PUBKEY (32 bytes)
// =============================================================================

/// A 32-byte account address.
///
/// Wallet addresses are Ed25519 public keys. Program-derived addresses are
/// SHA-256 outputs that are guaranteed NOT to be valid curve points, so no
/// private key can ever sign for them.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Pubkey(pub [u8; 32]);

impl Pubkey {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an address from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Parses a 64-character hex string (optional `0x` prefix).
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).ok()?;
        Self::from_slice(&bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Returns true if the bytes decompress to an Ed25519 point.
    ///
    /// Derived addresses must return false here.
    #[must_use]
    pub fn is_on_curve(&self) -> bool {
        VerifyingKey::from_bytes(&self.0).is_ok()
    }

    /// Full lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[30..])
        )
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Pubkey> for [u8; 32] {
    fn from(key: Pubkey) -> Self {
        key.0
    }
}

impl From<VerifyingKey> for Pubkey {
    fn from(key: VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl From<&VerifyingKey> for Pubkey {
    fn from(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

// =============================================================================
// WELL-KNOWN PROGRAM IDS
// =============================================================================

/// Domain identifiers for the collaborating programs.
///
/// These only feed address derivation; the token and associated-account rules
/// themselves live in `domain::token`.
pub mod program_ids {
    use super::Pubkey;

    /// Default id of the partnership program.
    pub const PARTNERSHIP_PROGRAM: Pubkey = Pubkey(*b"ekonos.partnership.program.v1\0\0\0");

    /// Token program id (mint and token account rules).
    pub const TOKEN_PROGRAM: Pubkey = Pubkey(*b"ekonos.token.program.v1\0\0\0\0\0\0\0\0\0");

    /// Associated token account program id.
    pub const ASSOCIATED_TOKEN_PROGRAM: Pubkey =
        Pubkey(*b"ekonos.associated.token.v1\0\0\0\0\0\0");
}

// =============================================================================
// TESTS
// =============================================================================
