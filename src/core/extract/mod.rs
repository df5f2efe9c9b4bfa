//! Span extraction: find translatable text in a parsed template.
//!
//! The extractor walks the syntax tree depth-first in pre-order, so records
//! come out in ascending `start_byte` order. Two kinds of spans qualify:
//!
//! - literal text nodes that are not Blade directives
//! - values of allow-listed attributes (`placeholder`, `aria-label`, ...)
//!
//! Spans holding echo delimiters or Blade escapes are never candidates.
//!
//! Every candidate is checked with [`crate::core::wrap::detect`]; spans that
//! already hold `__('...')` are recorded with their inner text so later
//! stages never treat wrapper syntax as translatable content.

mod record;

pub use record::{ExtractionRecord, RecordKind};

use crate::core::{
    directives::is_blade_directive,
    parsers::{NodeKind, SyntaxNode},
    source::LineIndex,
    wrap::{detect, unescape_php_string},
};
use crate::issues::UnquotedAttributeIssue;

/// Records and diagnostics found in one file.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub records: Vec<ExtractionRecord>,
    /// Allow-listed attributes whose value has no quotes. Skipped, never rewritten.
    pub unquoted_attributes: Vec<UnquotedAttributeIssue>,
}

pub struct SpanExtractor<'a> {
    file_path: &'a str,
    source: &'a [u8],
    lines: LineIndex,
    translatable_attributes: &'a [String],
    result: ExtractionResult,
}

impl<'a> SpanExtractor<'a> {
    pub fn new(file_path: &'a str, source: &'a [u8], translatable_attributes: &'a [String]) -> Self {
        Self {
            file_path,
            source,
            lines: LineIndex::new(source),
            translatable_attributes,
            result: ExtractionResult::default(),
        }
    }

    pub fn extract(mut self, tree: &SyntaxNode) -> ExtractionResult {
        self.visit(tree);
        self.result
    }

    fn visit(&mut self, node: &SyntaxNode) {
        match node.kind {
            NodeKind::Text => self.visit_text(node),
            NodeKind::Attribute => self.visit_attribute(node),
            _ => {}
        }
        for child in &node.children {
            self.visit(child);
        }
    }

    fn visit_text(&mut self, node: &SyntaxNode) {
        let Ok(raw) = std::str::from_utf8(node.bytes(self.source)) else {
            return;
        };
        let trimmed = raw.trim();
        if has_template_syntax(trimmed) || is_blade_directive(trimmed) || !is_candidate(trimmed) {
            return;
        }

        let start_byte = node.start_byte + (raw.len() - raw.trim_start().len());
        let end_byte = start_byte + trimmed.len();
        let text = detect(self.source, start_byte, end_byte).unwrap_or_else(|| trimmed.to_string());

        self.result.records.push(ExtractionRecord {
            text,
            start_byte,
            end_byte,
            line: self.lines.line(start_byte),
            kind: RecordKind::TextNode,
        });
    }

    fn visit_attribute(&mut self, node: &SyntaxNode) {
        let Some(name_node) = node.child(NodeKind::AttributeName) else {
            return;
        };
        let Ok(original_name) = std::str::from_utf8(name_node.bytes(self.source)) else {
            return;
        };
        let name = original_name.trim_start_matches(':');
        let dynamic = name.len() != original_name.len();

        if !self.translatable_attributes.iter().any(|a| a == name) {
            return;
        }

        if let Some(quoted) = node.child(NodeKind::QuotedAttributeValue) {
            for value in quoted
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::AttributeValue)
            {
                self.visit_attribute_value(value, name, dynamic);
            }
        } else if let Some(value) = node.child(NodeKind::AttributeValue) {
            self.result
                .unquoted_attributes
                .push(UnquotedAttributeIssue {
                    context: self
                        .lines
                        .context(self.file_path, self.source, value.start_byte),
                    attribute: original_name.to_string(),
                });
        }
    }

    fn visit_attribute_value(&mut self, value: &SyntaxNode, name: &str, dynamic: bool) {
        let Ok(raw) = std::str::from_utf8(value.bytes(self.source)) else {
            return;
        };
        let trimmed = raw.trim();
        // Variable references are code, not text.
        if trimmed.starts_with('$') || has_template_syntax(trimmed) || !is_candidate(trimmed) {
            return;
        }

        let start_byte = value.start_byte + (raw.len() - raw.trim_start().len());
        let end_byte = start_byte + trimmed.len();

        let text = match detect(self.source, start_byte, end_byte) {
            Some(inner) => unescape_php_string(&inner),
            None => {
                let literal = if dynamic {
                    strip_single_quotes(trimmed)
                } else {
                    trimmed
                };
                unescape_php_string(literal)
            }
        };
        if !is_candidate(&text) {
            return;
        }

        self.result.records.push(ExtractionRecord {
            text,
            start_byte,
            end_byte,
            line: self.lines.line(start_byte),
            kind: RecordKind::Attribute {
                name: name.to_string(),
                dynamic,
            },
        });
    }
}

/// Extract records from an already parsed tree.
pub fn extract_spans(
    file_path: &str,
    source: &[u8],
    tree: &SyntaxNode,
    translatable_attributes: &[String],
) -> ExtractionResult {
    SpanExtractor::new(file_path, source, translatable_attributes).extract(tree)
}

/// Non-empty, not purely numeric, longer than one character.
pub fn is_candidate(text: &str) -> bool {
    !text.is_empty() && !text.chars().all(char::is_numeric) && text.chars().count() > 1
}

/// Echo delimiters and Blade escapes (`@{{ }}`, `@@`) are template syntax, not text.
pub fn has_template_syntax(text: &str) -> bool {
    ["{{", "}}", "{!!", "!!}", "@@"]
        .iter()
        .any(|token| text.contains(token))
}

fn strip_single_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
