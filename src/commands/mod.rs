//! # CLI Command Implementations
//!
//! One module per `dubboctl` subcommand. Each module holds:
//! - An `Args` struct derived with `clap`, nesting further subcommands
//!   where the command has them (`manifest generate`, `profile list`).
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `dubboctl` library and prints the result.

pub mod completions;
pub mod manifest;
pub mod profile;
