//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `PartnershipApi`
//! - **Driven Ports (Outbound)**: `AccountStore`, `EventSink`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
