//! Blade templates parsed with the `tree-sitter-blade` grammar.
//!
//! Only named grammar nodes are kept. Their kinds are folded into
//! [`NodeKind`]; byte ranges are copied as-is so rewrites can splice the
//! original buffer. Malformed markup still yields a tree: the grammar
//! recovers with error nodes, which become [`NodeKind::Other`] with their
//! children intact.

use anyhow::{Result, anyhow};
use tree_sitter::{Node, Parser};

use super::{NodeKind, SyntaxNode, TemplateParser};

/// The bundled parser for `.blade.php` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BladeParser;

impl TemplateParser for BladeParser {
    fn parse(&self, source: &[u8]) -> Result<SyntaxNode> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_blade::LANGUAGE.into())
            .map_err(|e| anyhow!("Failed to load the Blade grammar: {}", e))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("Blade parser produced no syntax tree"))?;
        Ok(convert(tree.root_node()))
    }
}

fn convert(node: Node<'_>) -> SyntaxNode {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).map(convert).collect();
    SyntaxNode::new(
        node_kind(node.kind()),
        node.start_byte(),
        node.end_byte(),
        node.start_position().row + 1,
    )
    .with_children(children)
}

fn node_kind(grammar_kind: &str) -> NodeKind {
    match grammar_kind {
        "document" => NodeKind::Document,
        "element" | "script_element" | "style_element" => NodeKind::Element,
        "start_tag" | "self_closing_tag" => NodeKind::StartTag,
        "end_tag" | "erroneous_end_tag" => NodeKind::EndTag,
        "tag_name" | "erroneous_end_tag_name" => NodeKind::TagName,
        "attribute" => NodeKind::Attribute,
        "attribute_name" => NodeKind::AttributeName,
        "quoted_attribute_value" => NodeKind::QuotedAttributeValue,
        "attribute_value" => NodeKind::AttributeValue,
        "text" => NodeKind::Text,
        "raw_text" => NodeKind::RawText,
        "comment" => NodeKind::Comment,
        "doctype" => NodeKind::Doctype,
        "directive" | "directive_start" | "directive_end" | "parameter" | "keyword" => {
            NodeKind::Directive
        }
        "php_statement" | "php_only" | "bracket_start" | "bracket_end" => NodeKind::Php,
        _ => NodeKind::Other,
    }
}
