//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style; run summaries are short colored lines.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::validate::RemovedTexts;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

pub fn print_success_to<W: Write>(files: usize, changes: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Processed {} {}, wrapped {} {}",
            files,
            if files == 1 { "file" } else { "files" },
            changes,
            if changes == 1 { "text" } else { "texts" }
        )
        .green()
    );
}

/// Texts dropped by semantic validation, grouped under one heading.
pub fn print_removed_texts_to<W: Write>(removed: &RemovedTexts, writer: &mut W) {
    if removed.is_empty() {
        return;
    }
    let _ = writeln!(
        writer,
        "\n{} ({})",
        "Skipped non-semantic texts".bold(),
        removed.len()
    );
    for (text, file) in removed.iter() {
        let _ = writeln!(writer, "  {} '{}' {}", FAILURE_MARK.red(), text, file.dimmed());
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match loc {
        ReportLocation::Source(ctx) => {
            let (line, col) = (ctx.line(), ctx.col());
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                line,
                col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );

            // col is 1-based, counted in chars
            let prefix: String = ctx.source_line.chars().take(col.saturating_sub(1)).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 { "problem" } else { "problems" },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn location_key(loc: ReportLocation<'_>) -> (&str, usize, usize) {
    match loc {
        ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
        ReportLocation::File { path } => (path, 0, 0),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    location_key(a.location())
        .cmp(&location_key(b.location()))
        .then_with(|| a.rule().cmp(&b.rule()))
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SourceContext, SourceLocation};
    use crate::issues::{FileErrorIssue, TranslationConflictIssue, UnquotedAttributeIssue};

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(issues: &[Issue]) -> String {
        let mut output = Vec::new();
        report_to(issues, &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_report_empty() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn test_report_unquoted_attribute() {
        let loc = SourceLocation::new("./resources/views/home.blade.php", 12, 20);
        let issue = Issue::UnquotedAttribute(UnquotedAttributeIssue {
            context: SourceContext::new(loc, "    <input placeholder=Search>"),
            attribute: "placeholder".to_string(),
        });

        let out = render(&[issue]);
        assert!(out.contains("warning: \"placeholder\"  unquoted-attribute"));
        assert!(out.contains("--> ./resources/views/home.blade.php:12:20"));
        assert!(out.contains("12 |     <input placeholder=Search>"));
        assert!(out.contains("   |                    ^"));
        assert!(out.contains("= hint: quote the attribute value"));
        assert!(out.contains("1 problem (0 errors, 1 warning)"));
    }

    #[test]
    fn test_caret_accounts_for_wide_chars() {
        let loc = SourceLocation::new("a.blade.php", 1, 4);
        let issue = Issue::UnquotedAttribute(UnquotedAttributeIssue {
            context: SourceContext::new(loc, "歡迎 x"),
            attribute: "title".to_string(),
        });
        let out = render(&[issue]);
        // two wide chars and a space before the caret
        assert!(out.contains(" |      ^"));
    }

    #[test]
    fn test_report_file_level_issues_sorted() {
        let conflict = Issue::TranslationConflict(TranslationConflictIssue {
            file_path: "lang/zh_CN.json".to_string(),
            key: "Home".to_string(),
            existing: "首頁".to_string(),
            new: "首页".to_string(),
        });
        let error = Issue::FileError(FileErrorIssue {
            file_path: "a.blade.php".to_string(),
            error: "Permission denied".to_string(),
        });

        let out = render(&[conflict, error]);
        let error_at = out.find("error: \"Permission denied\"").unwrap();
        let conflict_at = out.find("warning: \"Home\"").unwrap();
        assert!(error_at < conflict_at);
        assert!(out.contains("--> lang/zh_CN.json\n"));
        assert!(out.contains("= note: keeping existing '首頁' (new was '首页')"));
        assert!(out.contains("2 problems (1 error, 1 warning)"));
    }

    #[test]
    fn test_removed_texts() {
        let mut removed = RemovedTexts::default();
        let mut output = Vec::new();
        print_removed_texts_to(&removed, &mut output);
        assert!(output.is_empty());

        removed.record("x_y_z", "home.blade.php");
        print_removed_texts_to(&removed, &mut output);
        let out = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(out.contains("Skipped non-semantic texts (1)"));
        assert!(out.contains("'x_y_z' home.blade.php"));
    }

    #[test]
    fn test_success_line() {
        let mut output = Vec::new();
        print_success_to(1, 2, &mut output);
        let out = strip_ansi(&String::from_utf8(output).unwrap());
        assert_eq!(out, "\u{2713} Processed 1 file, wrapped 2 texts\n");
    }
}
