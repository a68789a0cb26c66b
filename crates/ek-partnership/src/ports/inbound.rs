//! # Driving Ports (API - Inbound)
//!
//! The public surface of the partnership program: three state transitions
//! and read-only queries over committed state.

use crate::domain::entities::{PartnershipRecord, ShareDistribution};
use crate::domain::value_objects::Pubkey;
use crate::errors::ProgramResult;
use crate::instruction::{DepositAccounts, IssueAccounts, SignedInstruction};

/// Outcome of a committed share issuance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuanceReceipt {
    /// Share class mint.
    pub share_mint: Pubkey,
    /// Units minted by this call.
    pub batch_total: u64,
    /// Cumulative units issued by the record.
    pub issued_total: u64,
}

/// Result of dispatching a signed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Record created at this address.
    Initialized(Pubkey),
    /// Asset now held by this vault.
    Deposited(Pubkey),
    /// Shares issued.
    Issued(IssuanceReceipt),
}

/// Partnership program API.
///
/// Every transition is atomic: on `Err`, no account was modified.
pub trait PartnershipApi {
    /// Creates the record for `(caller, partnership_id)` and returns its address.
    ///
    /// # Errors
    ///
    /// `DuplicateRecord`, `InvalidTotalShares`, `InsufficientFunds`.
    fn initialize_partnership(
        &self,
        caller: &Pubkey,
        partnership_id: u64,
        total_shares: u64,
    ) -> ProgramResult<Pubkey>;

    /// Moves the unique asset from the authority's account into the vault.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `AlreadyDeposited`, `InvalidTokenAccount`, plus lookup
    /// and funding failures.
    fn deposit_nft(&self, caller: &Pubkey, accounts: &DepositAccounts) -> ProgramResult<Pubkey>;

    /// Mints `distribution` in order, all-or-nothing.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `CustodyNotEstablished`, `SharesAlreadyIssued`,
    /// `InvalidShareDistribution`, `InvalidTokenAccount`, plus lookup and
    /// funding failures.
    fn mint_shares(
        &self,
        caller: &Pubkey,
        accounts: &IssueAccounts,
        distribution: &[ShareDistribution],
    ) -> ProgramResult<IssuanceReceipt>;

    /// Verifies a signed instruction and dispatches it with `caller = signer`.
    ///
    /// # Errors
    ///
    /// `InvalidSignature`, or any error of the dispatched entry point.
    fn process(&self, signed: &SignedInstruction) -> ProgramResult<ProcessOutcome>;

    /// Reads a committed record.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `InvalidAccountData`.
    fn fetch_partnership(&self, address: &Pubkey) -> ProgramResult<PartnershipRecord>;

    /// Balance of a token account, zero if the account does not exist.
    ///
    /// # Errors
    ///
    /// `InvalidAccountData` if the address holds something else.
    fn token_balance(&self, token_account: &Pubkey) -> ProgramResult<u64>;

    /// Supply of a mint.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `InvalidAccountData`.
    fn mint_supply(&self, mint: &Pubkey) -> ProgramResult<u64>;
}
