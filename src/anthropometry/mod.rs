//! Anthropometry builder
//!
//! Turns height, weight, sex and proportion modifiers into an immutable
//! segment-length profile.
//!
//! ## Construction modes
//!
//! - **Category**: a symbolic proportion (e.g. long legs) mapped to fixed SDs
//! - **Sd**: per-segment and arms/legs/torso SD values
//! - **Measured**: literal lengths, with the equivalent SDs back-solved

pub mod modifiers;
pub mod profile;
pub mod ratios;

pub use modifiers::*;
pub use profile::*;
