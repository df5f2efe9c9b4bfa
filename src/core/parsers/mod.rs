//! Template parsing.
//!
//! The extractor only needs a tree of typed nodes with byte ranges, lines and
//! children. [`TemplateParser`] is that boundary; [`BladeParser`] is the
//! bundled implementation, built on the tree-sitter Blade grammar.

pub mod blade;
pub mod node;

use anyhow::Result;

pub use blade::BladeParser;
pub use node::{NodeKind, SyntaxNode};

/// Parse raw template bytes into a syntax tree.
pub trait TemplateParser {
    fn parse(&self, source: &[u8]) -> Result<SyntaxNode>;
}
