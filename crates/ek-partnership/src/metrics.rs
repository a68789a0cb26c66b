//! # Partnership Metrics
//!
//! Prometheus counters for committed and rejected transitions.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ek-partnership = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `partnership_transitions_committed_total{transition}` - committed transitions
//! - `partnership_transitions_rejected_total{transition, error}` - rejected transitions
//! - `partnership_shares_issued_total` - share units minted
//! - `partnership_accounts_created_total` - accounts created by commits

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Committed transitions, labeled by entry point
    pub static ref TRANSITIONS_COMMITTED: IntCounterVec = register_int_counter_vec!(
        "partnership_transitions_committed_total",
        "Total number of committed transitions",
        &["transition"]
    )
    .expect("Failed to create TRANSITIONS_COMMITTED metric");

    /// Rejected transitions, labeled by entry point and error name
    pub static ref TRANSITIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "partnership_transitions_rejected_total",
        "Total number of rejected transitions",
        &["transition", "error"]
    )
    .expect("Failed to create TRANSITIONS_REJECTED metric");

    /// Share units minted
    pub static ref SHARES_ISSUED: IntCounter = register_int_counter!(
        "partnership_shares_issued_total",
        "Total number of share units minted"
    )
    .expect("Failed to create SHARES_ISSUED metric");

    /// Accounts created by committed transitions
    pub static ref ACCOUNTS_CREATED: IntCounter = register_int_counter!(
        "partnership_accounts_created_total",
        "Total number of accounts created"
    )
    .expect("Failed to create ACCOUNTS_CREATED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a committed transition and the accounts it created
#[cfg(feature = "metrics")]
pub fn record_committed(transition: &str, accounts_created: usize) {
    TRANSITIONS_COMMITTED.with_label_values(&[transition]).inc();
    ACCOUNTS_CREATED.inc_by(accounts_created as u64);
}

/// Record a rejected transition with the error name
#[cfg(feature = "metrics")]
pub fn record_rejected(transition: &str, error: &str) {
    TRANSITIONS_REJECTED
        .with_label_values(&[transition, error])
        .inc();
}

/// Record share units minted
#[cfg(feature = "metrics")]
pub fn record_shares_issued(amount: u64) {
    SHARES_ISSUED.inc_by(amount);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_committed(_transition: &str, _accounts_created: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejected(_transition: &str, _error: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_shares_issued(_amount: u64) {}
