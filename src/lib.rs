//! Hero duel time-to-kill calculator.
//!
//! Loads a CSV hero roster, applies staged attacker and defender ability
//! modifiers plus armor mitigation, and derives bullets, reloads, and
//! seconds to kill for any pairing. Ships with a CLI and a small local
//! page server for interactive use.

pub mod cli;
pub mod combat;
pub mod data;
pub mod server;
