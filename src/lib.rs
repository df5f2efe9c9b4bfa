//! bladeloc - localization for Laravel Blade templates
//!
//! bladeloc finds literal text and allow-listed attribute values in Blade
//! templates, wraps them in `__('...')` in place, and adds the new keys to
//! each target language's JSON file, translated by a remote service.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, span extraction, wrap detection and rewriting
//! - `issues`: Issue type definitions and reporting
//! - `review`: Operator decisions for interactive runs
//! - `store`: Language JSON files and the merge policy
//! - `translate`: Translation backends, reply parsing and orchestration
//! - `validate`: Semantic validation of extracted texts

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod review;
pub mod store;
pub mod translate;
pub mod validate;
