//! # Domain Layer (Inner Hexagon)
//!
//! Pure partnership logic: the account model, address derivation, token
//! rules, authorization predicates, issuance policy and record invariants.
//! No I/O and no locking; everything here operates on values.

pub mod derivation;
pub mod entities;
pub mod guard;
pub mod invariants;
pub mod policy;
pub mod token;
pub mod value_objects;

pub use entities::*;
pub use invariants::{check_all_invariants, InvariantCheckResult, InvariantViolation};
pub use policy::{IssuanceCap, IssuancePolicy};
pub use value_objects::*;
