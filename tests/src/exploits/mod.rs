//! # Exploit Tests
//!
//! Attack scenarios against the program entry points. Every test asserts
//! that the attack is rejected and that the store is left untouched.
//!
//! - `signatures`: forged, tampered and replayed-across-deployment instructions
//! - `custody`: attempts to divert, double-deposit or squat the vault
//! - `issuance`: over-issuance, foreign minting and squatted share accounts

pub mod issuance;
pub mod signatures;
