//! Template localization engine.
//!
//! - `parsers`: template bytes to a byte-ranged syntax tree
//! - `extract`: translatable spans from the tree
//! - `wrap`: `__('...')` detection and PHP string escaping
//! - `rewrite`: wraps approved spans in the file buffer
//! - `file_scanner` / `project`: template discovery and Laravel project layout

pub mod directives;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod project;
pub mod rewrite;
pub mod source;
pub mod wrap;

pub use extract::{ExtractionRecord, ExtractionResult, RecordKind, SpanExtractor, extract_spans};
pub use rewrite::{RewriteOutcome, RewritePlan};
pub use source::{LineIndex, SourceContext, SourceLocation};
