//! Extraction, cross-referencing and rewrite engine.
//!
//! - `extract`: declaration extractor (pattern scanning, no grammar)
//! - `xref`: resolves label keys against the dictionary
//! - `update`: backfills missing keys into the dictionary
//! - `generate`: renders new files from definitions
//! - `rewrite`: idempotent in-place rewrites of existing files
//! - `context`: configuration plus the lazily computed module scan

pub mod analysis;
pub mod context;
pub mod data;
pub mod dictionary;
pub mod extract;
pub mod file_scanner;
pub mod generate;
pub mod norms;
pub mod rewrite;
pub mod tables;
pub mod text;
pub mod update;
pub mod xref;
