//! Issue types reported by a localization run.
//!
//! Issues never stop a run; they are collected, printed cargo-style at the
//! end and decide the exit status.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnquotedAttribute,
    TranslationConflict,
    FileError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnquotedAttribute => write!(f, "unquoted-attribute"),
            Rule::TranslationConflict => write!(f, "translation-conflict"),
            Rule::FileError => write!(f, "file-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Allow-listed attribute with an unquoted value; skipped, needs a manual fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnquotedAttributeIssue {
    pub context: SourceContext,
    /// Attribute name as written, including any `:` prefix.
    pub attribute: String,
}

impl UnquotedAttributeIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnquotedAttribute
    }
}

/// Fresh translation disagrees with a curated value; the existing one was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationConflictIssue {
    /// Language store file.
    pub file_path: String,
    pub key: String,
    pub existing: String,
    pub new: String,
}

impl TranslationConflictIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::TranslationConflict
    }
}

/// Template that could not be read, parsed or written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl FileErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::FileError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnquotedAttribute(UnquotedAttributeIssue),
    TranslationConflict(TranslationConflictIssue),
    FileError(FileErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnquotedAttribute(_) => UnquotedAttributeIssue::severity(),
            Issue::TranslationConflict(_) => TranslationConflictIssue::severity(),
            Issue::FileError(_) => FileErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::UnquotedAttribute(_) => UnquotedAttributeIssue::rule(),
            Issue::TranslationConflict(_) => TranslationConflictIssue::rule(),
            Issue::FileError(_) => FileErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

pub enum ReportLocation<'a> {
    /// Template location with the source line for context display.
    Source(&'a SourceContext),
    /// File-level only.
    File { path: &'a str },
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for UnquotedAttributeIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }
    fn message(&self) -> String {
        self.attribute.clone()
    }
    fn report_severity(&self) -> Severity {
        Self::severity()
    }
    fn report_rule(&self) -> Rule {
        Self::rule()
    }
    fn hint(&self) -> Option<&str> {
        Some("quote the attribute value so it can be wrapped")
    }
}

impl Report for TranslationConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }
    fn message(&self) -> String {
        self.key.clone()
    }
    fn report_severity(&self) -> Severity {
        Self::severity()
    }
    fn report_rule(&self) -> Rule {
        Self::rule()
    }
    fn details(&self) -> Option<String> {
        Some(format!(
            "keeping existing '{}' (new was '{}')",
            self.existing, self.new
        ))
    }
}

impl Report for FileErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }
    fn message(&self) -> String {
        self.error.clone()
    }
    fn report_severity(&self) -> Severity {
        Self::severity()
    }
    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
