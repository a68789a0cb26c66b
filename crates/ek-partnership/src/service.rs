//! # Partnership Program Service
//!
//! Runs transitions against the account store and owns everything around
//! them: the execution lock, the commit, event publication, logging and
//! statistics.
//!
//! ## Execution
//!
//! 1. Take the execution lock (one transition at a time)
//! 2. Run the transition on a fresh [`TransactionContext`]
//! 3. On `Ok`, commit the staged change set as one batch
//! 4. After the commit, publish the event and record stats
//!
//! An error at any step before the commit discards the context, so the store
//! is never partially updated.

use crate::config::ProgramConfig;
use crate::domain::derivation;
use crate::domain::entities::{PartnershipRecord, ShareDistribution};
use crate::domain::value_objects::Pubkey;
use crate::errors::{ProgramError, ProgramResult, StoreError};
use crate::instruction::{DepositAccounts, Instruction, IssueAccounts, SignedInstruction};
use crate::metrics;
use crate::ports::inbound::{IssuanceReceipt, PartnershipApi, ProcessOutcome};
use crate::ports::outbound::{AccountStore, EventSink};
use crate::transitions::{deposit, initialize, issue, TransactionContext, TransitionOutput};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Statistics of one program instance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProgramStats {
    /// Transitions committed.
    pub transitions_committed: u64,
    /// Transitions rejected, signature failures included.
    pub transitions_rejected: u64,
    /// Records created.
    pub partnerships_created: u64,
    /// Assets taken into custody.
    pub assets_deposited: u64,
    /// Share units minted.
    pub shares_issued: u64,
    /// Accounts created across all commits.
    pub accounts_created: u64,
    /// Events the sink refused.
    pub events_dropped: u64,
}

/// The partnership program bound to an account store and an event sink.
pub struct PartnershipProgram<S: AccountStore, E: EventSink> {
    config: ProgramConfig,
    store: Arc<S>,
    events: Arc<E>,
    execution: Mutex<()>,
    stats: RwLock<ProgramStats>,
}

impl<S: AccountStore, E: EventSink> PartnershipProgram<S, E> {
    /// Create a program instance.
    pub fn new(config: ProgramConfig, store: Arc<S>, events: Arc<E>) -> Self {
        Self {
            config,
            store,
            events,
            execution: Mutex::new(()),
            stats: RwLock::new(ProgramStats::default()),
        }
    }

    /// Deployment configuration.
    #[must_use]
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Backing account store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Event sink.
    #[must_use]
    pub fn events(&self) -> &Arc<E> {
        &self.events
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> ProgramStats {
        self.stats.read().clone()
    }

    // =========================================================================
    // ADDRESS HELPERS
    // =========================================================================

    /// Record address for `(authority, partnership_id)` under this deployment.
    ///
    /// # Errors
    ///
    /// `Derivation` if no bump is viable.
    pub fn partnership_address(
        &self,
        authority: &Pubkey,
        partnership_id: u64,
    ) -> ProgramResult<Pubkey> {
        let (address, _) =
            derivation::partnership_address(&self.config.program_id, authority, partnership_id)?;
        Ok(address)
    }

    /// Share mint address of a record.
    ///
    /// # Errors
    ///
    /// `Derivation` if no bump is viable.
    pub fn share_mint_address(&self, partnership: &Pubkey) -> ProgramResult<Pubkey> {
        Ok(derivation::share_mint_address(&self.config.program_id, partnership)?.0)
    }

    /// Vault address of a record for an asset mint.
    ///
    /// # Errors
    ///
    /// `Derivation` if no bump is viable.
    pub fn vault_address(
        &self,
        partnership: &Pubkey,
        asset_mint: &Pubkey,
    ) -> ProgramResult<Pubkey> {
        Ok(derivation::associated_token_address(partnership, asset_mint)?)
    }

    /// Share account of `owner` for a record's share class.
    ///
    /// # Errors
    ///
    /// `Derivation` if no bump is viable.
    pub fn share_account_address(
        &self,
        owner: &Pubkey,
        partnership: &Pubkey,
    ) -> ProgramResult<Pubkey> {
        let mint = self.share_mint_address(partnership)?;
        Ok(derivation::associated_token_address(owner, &mint)?)
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    fn execute<T, F>(&self, transition: &'static str, run: F) -> ProgramResult<T>
    where
        F: FnOnce(&mut TransactionContext<'_, S>) -> ProgramResult<TransitionOutput<T>>,
    {
        let _serialized = self.execution.lock();

        let mut ctx = TransactionContext::new(&*self.store, self.config.rent);
        let output = match run(&mut ctx) {
            Ok(output) => output,
            Err(err) => return Err(self.reject(transition, err)),
        };

        let changes = ctx.into_changes();
        let created = changes.created.len();
        let written = changes.len();
        let records: Vec<Pubkey> = changes
            .created
            .iter()
            .filter(|address| changes.creates_record(address))
            .copied()
            .collect();
        debug!(transition, written, created, "committing change set");
        if let Err(err) = self.store.commit(changes) {
            return Err(self.reject(transition, commit_error(err, &records)));
        }

        info!(
            transition,
            partnership = %output.event.partnership(),
            accounts_written = written,
            accounts_created = created,
            "transition committed"
        );
        metrics::record_committed(transition, created);
        {
            let mut stats = self.stats.write();
            stats.transitions_committed += 1;
            stats.accounts_created += created as u64;
        }

        let event_name = output.event.name();
        if let Err(reason) = self.events.publish(output.event) {
            warn!(transition, event = event_name, %reason, "event publication failed");
            self.stats.write().events_dropped += 1;
        }
        Ok(output.value)
    }

    fn reject(&self, transition: &'static str, err: ProgramError) -> ProgramError {
        if err.is_environment_failure() {
            warn!(transition, code = err.code(), error = %err, "transition failed");
        } else {
            warn!(transition, code = err.code(), error = %err, "transition rejected");
        }
        metrics::record_rejected(transition, err.name());
        self.stats.write().transitions_rejected += 1;
        err
    }

    fn query(&self) -> TransactionContext<'_, S> {
        TransactionContext::new(&*self.store, self.config.rent)
    }
}

/// A record address taken between the pre-read and the commit is still a
/// duplicate record, not a store failure.
fn commit_error(err: StoreError, records: &[Pubkey]) -> ProgramError {
    match err {
        StoreError::AlreadyExists(address) if records.contains(&address) => {
            ProgramError::DuplicateRecord { address }
        }
        other => other.into(),
    }
}

impl<S: AccountStore, E: EventSink> PartnershipApi for PartnershipProgram<S, E> {
    #[instrument(
        skip_all,
        fields(caller = %caller, partnership_id = partnership_id, total_shares = total_shares)
    )]
    fn initialize_partnership(
        &self,
        caller: &Pubkey,
        partnership_id: u64,
        total_shares: u64,
    ) -> ProgramResult<Pubkey> {
        let address = self.execute("initialize_partnership", |ctx| {
            initialize::initialize_partnership(
                ctx,
                &self.config.program_id,
                caller,
                partnership_id,
                total_shares,
            )
        })?;
        self.stats.write().partnerships_created += 1;
        Ok(address)
    }

    #[instrument(skip_all, fields(caller = %caller, partnership = %accounts.partnership))]
    fn deposit_nft(&self, caller: &Pubkey, accounts: &DepositAccounts) -> ProgramResult<Pubkey> {
        let vault = self.execute("deposit_nft", |ctx| {
            deposit::deposit_nft(ctx, &self.config.program_id, caller, accounts)
        })?;
        self.stats.write().assets_deposited += 1;
        Ok(vault)
    }

    #[instrument(
        skip_all,
        fields(caller = %caller, partnership = %accounts.partnership, entries = distribution.len())
    )]
    fn mint_shares(
        &self,
        caller: &Pubkey,
        accounts: &IssueAccounts,
        distribution: &[ShareDistribution],
    ) -> ProgramResult<IssuanceReceipt> {
        let receipt = self.execute("mint_shares", |ctx| {
            issue::mint_shares(ctx, &self.config, caller, accounts, distribution)
        })?;
        metrics::record_shares_issued(receipt.batch_total);
        self.stats.write().shares_issued += receipt.batch_total;
        Ok(receipt)
    }

    #[instrument(skip_all, fields(signer = %signed.signer, instruction = signed.instruction.name()))]
    fn process(&self, signed: &SignedInstruction) -> ProgramResult<ProcessOutcome> {
        if let Err(err) = signed.verify(&self.config.program_id) {
            return Err(self.reject(signed.instruction.name(), err));
        }

        let caller = &signed.signer;
        match &signed.instruction {
            Instruction::InitializePartnership {
                partnership_id,
                total_shares,
            } => self
                .initialize_partnership(caller, *partnership_id, *total_shares)
                .map(ProcessOutcome::Initialized),
            Instruction::DepositNft(accounts) => self
                .deposit_nft(caller, accounts)
                .map(ProcessOutcome::Deposited),
            Instruction::MintShares {
                accounts,
                distribution,
            } => self
                .mint_shares(caller, accounts, distribution)
                .map(ProcessOutcome::Issued),
        }
    }

    fn fetch_partnership(&self, address: &Pubkey) -> ProgramResult<PartnershipRecord> {
        self.query().load_partnership(address)
    }

    fn token_balance(&self, token_account: &Pubkey) -> ProgramResult<u64> {
        let ctx = self.query();
        if !ctx.exists(token_account)? {
            return Ok(0);
        }
        Ok(ctx.load_token(token_account)?.amount)
    }

    fn mint_supply(&self, mint: &Pubkey) -> ProgramResult<u64> {
        Ok(self.query().load_mint(mint)?.supply)
    }
}

// =============================================================================
// TESTS
// =============================================================================
