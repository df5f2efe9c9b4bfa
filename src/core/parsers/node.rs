/// Node types produced by a template parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// An element, including `<script>` and `<style>`.
    Element,
    /// Start tag or self-closing tag. Children are the tag name and attributes.
    StartTag,
    EndTag,
    TagName,
    Attribute,
    AttributeName,
    /// `"..."` or `'...'`, quotes included. Children are [`NodeKind::AttributeValue`]
    /// runs split around echo nodes.
    QuotedAttributeValue,
    AttributeValue,
    Text,
    /// Contents of `<script>` and `<style>`.
    RawText,
    /// `<!-- ... -->` and `{{-- ... --}}`
    Comment,
    Doctype,
    /// `@name`, its parameters and directive blocks.
    Directive,
    /// Echoes (`{{ }}`, `{!! !!}`) and PHP blocks.
    Php,
    /// Anything else, including error recovery nodes.
    Other,
}

/// A node with a half-open byte range into the parsed buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub start_byte: usize,
    pub end_byte: usize,
    /// 1-based line of `start_byte`.
    pub start_line: usize,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, start_byte: usize, end_byte: usize, start_line: usize) -> Self {
        Self {
            kind,
            start_byte,
            end_byte,
            start_line,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// Raw bytes of this node in `source`.
    pub fn bytes<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.start_byte.min(source.len())..self.end_byte.min(source.len())]
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }
}
