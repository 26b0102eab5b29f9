//! Printforge command-line interface.
//!
//! The binary wires the library crates together: quoting, saved-quote
//! management, the kanban board, the production queue, capacity planning
//! and settings administration, all against a file-backed data
//! directory.

pub mod cli;
pub mod commands;
