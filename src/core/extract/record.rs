/// What kind of span a record covers; decides how it gets wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    TextNode,
    Attribute {
        /// Attribute name with any `:` binding prefix removed.
        name: String,
        /// The attribute name carried the `:` binding prefix.
        dynamic: bool,
    },
}

/// One translatable span discovered in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    /// Logical text to translate, already unwrapped/unescaped.
    pub text: String,
    /// Half-open byte range in the original buffer.
    pub start_byte: usize,
    pub end_byte: usize,
    /// 1-based, diagnostics only.
    pub line: usize,
    pub kind: RecordKind,
}

impl ExtractionRecord {
    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, RecordKind::Attribute { .. })
    }

    pub fn is_dynamic_attribute(&self) -> bool {
        matches!(self.kind, RecordKind::Attribute { dynamic: true, .. })
    }

    pub fn attribute_name(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::Attribute { name, .. } => Some(name),
            RecordKind::TextNode => None,
        }
    }
}
