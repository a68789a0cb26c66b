//! Program configuration from defaults or environment variables.

use crate::domain::policy::{IssuanceCap, IssuancePolicy};
use crate::domain::value_objects::{program_ids, Pubkey};
use std::env;
use thiserror::Error;

/// Largest accepted share mint precision.
pub const MAX_SHARE_DECIMALS: u8 = 18;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// Program id is the zero key.
    #[error("program id must not be zero")]
    ZeroProgramId,

    /// Program id collides with a token program.
    #[error("program id {0} is reserved")]
    ReservedProgramId(Pubkey),

    /// Share decimals out of range.
    #[error("share decimals {0} exceed {MAX_SHARE_DECIMALS}")]
    ShareDecimalsTooLarge(u8),
}

/// Rent schedule charged when the program creates an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentConfig {
    /// Lamports locked per stored byte (already multiplied by the exemption period).
    pub lamports_per_byte: u64,
    /// Per-account storage overhead in bytes.
    pub account_overhead: u64,
}

impl Default for RentConfig {
    fn default() -> Self {
        // 3480 lamports per byte-year, two years for exemption.
        Self {
            lamports_per_byte: 6_960,
            account_overhead: 128,
        }
    }
}

impl RentConfig {
    /// No rent at all. Useful in tests that do not model funding.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            lamports_per_byte: 0,
            account_overhead: 0,
        }
    }

    /// Lamports a payer must lock to create an account of `data_len` bytes.
    #[must_use]
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        let bytes = (data_len as u64).saturating_add(self.account_overhead);
        bytes.saturating_mul(self.lamports_per_byte)
    }
}

/// Configuration of one program deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Address the program is deployed at; scopes every derived address.
    pub program_id: Pubkey,
    /// Share issuance rules.
    pub issuance: IssuancePolicy,
    /// Rent schedule.
    pub rent: RentConfig,
    /// Decimals of newly created share mints.
    pub share_decimals: u8,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: program_ids::PARTNERSHIP_PROGRAM,
            issuance: IssuancePolicy::default(),
            rent: RentConfig::default(),
            share_decimals: 0,
        }
    }
}

impl ProgramConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EK_PROGRAM_ID`: program address as 64 hex chars (default: built-in id)
    /// - `EK_ISSUANCE_CAP`: `unbounded`, `within-total` or `exact-total` (default: exact-total)
    /// - `EK_ALLOW_REISSUE`: allow repeat issuance (default: false)
    /// - `EK_SHARE_DECIMALS`: share mint decimals (default: 0)
    /// - `EK_RENT_LAMPORTS_PER_BYTE`: rent per stored byte (default: 6960)
    ///
    /// # Errors
    ///
    /// `InvalidValue` for unparseable variables, or any `validate` error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("EK_PROGRAM_ID") {
            config.program_id = Pubkey::from_hex(&value).ok_or(ConfigError::InvalidValue {
                key: "EK_PROGRAM_ID",
                value,
            })?;
        }
        if let Some(value) = lookup("EK_ISSUANCE_CAP") {
            config.issuance.cap = value
                .parse::<IssuanceCap>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "EK_ISSUANCE_CAP",
                    value,
                })?;
        }
        if let Some(value) = lookup("EK_ALLOW_REISSUE") {
            config.issuance.allow_reissue = match value.to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "EK_ALLOW_REISSUE",
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup("EK_SHARE_DECIMALS") {
            config.share_decimals = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "EK_SHARE_DECIMALS",
                value,
            })?;
        }
        if let Some(value) = lookup("EK_RENT_LAMPORTS_PER_BYTE") {
            config.rent.lamports_per_byte =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "EK_RENT_LAMPORTS_PER_BYTE",
                    value,
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// `ZeroProgramId`, `ReservedProgramId`, `ShareDecimalsTooLarge`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program_id.is_zero() {
            return Err(ConfigError::ZeroProgramId);
        }
        if self.program_id == program_ids::TOKEN_PROGRAM
            || self.program_id == program_ids::ASSOCIATED_TOKEN_PROGRAM
        {
            return Err(ConfigError::ReservedProgramId(self.program_id));
        }
        if self.share_decimals > MAX_SHARE_DECIMALS {
            return Err(ConfigError::ShareDecimalsTooLarge(self.share_decimals));
        }
        Ok(())
    }

    /// Replace the issuance policy.
    #[must_use]
    pub fn with_issuance(mut self, issuance: IssuancePolicy) -> Self {
        self.issuance = issuance;
        self
    }

    /// Replace the rent schedule.
    #[must_use]
    pub fn with_rent(mut self, rent: RentConfig) -> Self {
        self.rent = rent;
        self
    }
}
