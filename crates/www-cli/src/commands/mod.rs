//! Command implementations for the www CLI.
//!
//! There is a single command, [`serve`], exposed through an `execute`
//! function that takes the parsed arguments and returns a Result.

pub mod serve;

pub use serve::execute as serve_execute;
