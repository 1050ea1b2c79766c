//! calcmig - migration tooling for a calculator catalog
//!
//! calcmig reads calculator declarations from legacy Dart modules, checks
//! their label keys against a JSON translation dictionary, backfills the
//! missing keys, generates files for the new calculator layout, and applies
//! small in-place rewrites (category remapping, field removal).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, cross-referencing, generation and rewrite engines
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Diagnostic logging setup
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod utils;
