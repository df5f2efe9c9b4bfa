//! In-place wrapping of extracted spans.
//!
//! Records are applied right-to-left so the byte offsets of records not yet
//! processed stay valid while earlier spans change length. Wrap state is
//! re-detected against the buffer as it is being rewritten.
//!
//! | state           | kind              | replacement                  |
//! |-----------------|-------------------|------------------------------|
//! | already wrapped | text node         | `{{ <existing> }}`           |
//! | already wrapped | static attribute  | `{!! <existing> !!}`         |
//! | already wrapped | dynamic attribute | unchanged                    |
//! | not wrapped     | text node         | `{{ __('<escaped>') }}`      |
//! | not wrapped     | static attribute  | `{!! __('<escaped>') !!}`    |
//! | not wrapped     | dynamic attribute | `__('<escaped>')`            |

use crate::core::extract::{ExtractionRecord, RecordKind};
use crate::core::wrap::{detect, wrap_call};
use crate::review::{PendingChange, Reviewer};

/// Records of one file, consumed once by [`RewritePlan::apply`].
#[derive(Debug, Clone, Default)]
pub struct RewritePlan {
    file_path: String,
    records: Vec<ExtractionRecord>,
}

/// What a plan did to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: Vec<u8>,
    /// Approved records in ascending `start_byte` order.
    pub approved: Vec<ExtractionRecord>,
}

impl RewriteOutcome {
    /// Number of approved changes, including already-final dynamic attributes.
    pub fn applied(&self) -> usize {
        self.approved.len()
    }

    /// Deduplicated texts of approved records, in file order.
    pub fn new_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for record in &self.approved {
            if !keys.contains(&record.text) {
                keys.push(record.text.clone());
            }
        }
        keys
    }
}

impl RewritePlan {
    pub fn new(file_path: impl Into<String>, records: Vec<ExtractionRecord>) -> Self {
        Self {
            file_path: file_path.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply the plan to `original`.
    ///
    /// With a reviewer every change needs an explicit approval, except an
    /// already-wrapped dynamic attribute, which is final as it stands.
    /// Without one every record is approved.
    pub fn apply(self, original: &[u8], mut reviewer: Option<&mut dyn Reviewer>) -> RewriteOutcome {
        let RewritePlan {
            file_path,
            mut records,
        } = self;
        records.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

        let mut content = original.to_vec();
        let mut approved = Vec::with_capacity(records.len());

        for record in records {
            if record.start_byte >= record.end_byte || record.end_byte > content.len() {
                continue;
            }
            let wrapped = detect(&content, record.start_byte, record.end_byte).is_some();

            let accept = match reviewer.as_deref_mut() {
                Some(_) if wrapped && record.is_dynamic_attribute() => true,
                Some(reviewer) => reviewer.approve_change(&PendingChange {
                    file_path: &file_path,
                    record: &record,
                    already_wrapped: wrapped,
                }),
                None => true,
            };
            if !accept {
                continue;
            }

            if let Some(replacement) = replacement(&content, &record, wrapped) {
                content.splice(record.start_byte..record.end_byte, replacement.into_bytes());
            }
            approved.push(record);
        }

        approved.reverse();
        RewriteOutcome { content, approved }
    }
}

/// Replacement text for an approved record, or `None` to leave the span as is.
fn replacement(content: &[u8], record: &ExtractionRecord, wrapped: bool) -> Option<String> {
    let dynamic = match record.kind {
        RecordKind::TextNode => None,
        RecordKind::Attribute { dynamic, .. } => Some(dynamic),
    };

    if wrapped {
        let existing = std::str::from_utf8(&content[record.start_byte..record.end_byte]).ok()?;
        return match dynamic {
            None => Some(format!("{{{{ {} }}}}", existing)),
            Some(false) => Some(format!("{{!! {} !!}}", existing)),
            Some(true) => None,
        };
    }

    let call = wrap_call(&record.text);
    Some(match dynamic {
        None => format!("{{{{ {} }}}}", call),
        Some(false) => format!("{{!! {} !!}}", call),
        Some(true) => call,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::extract_spans;
    use crate::core::parsers::{BladeParser, TemplateParser};
    use crate::review::{ConflictChoice, RetranslationChoice, ReviewDecision};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn attrs() -> Vec<String> {
        vec!["placeholder".to_string(), "aria-label".to_string()]
    }

    fn records(src: &[u8]) -> Vec<ExtractionRecord> {
        let tree = BladeParser.parse(src).unwrap();
        extract_spans("test.blade.php", src, &tree, &attrs()).records
    }

    fn rewrite(src: &str) -> RewriteOutcome {
        RewritePlan::new("test.blade.php", records(src.as_bytes())).apply(src.as_bytes(), None)
    }

    fn rewritten(src: &str) -> String {
        String::from_utf8(rewrite(src).content).unwrap()
    }

    /// Approves by answer list, in the order prompts arrive.
    struct Scripted {
        answers: Vec<bool>,
        asked: Vec<String>,
    }

    impl Reviewer for Scripted {
        fn approve_change(&mut self, change: &PendingChange<'_>) -> bool {
            self.asked.push(change.record.text.clone());
            self.answers.remove(0)
        }
        fn review_translation(&mut self, _: &str, _: &BTreeMap<String, String>) -> ReviewDecision {
            ReviewDecision::Accept
        }
        fn choose_retranslation(&mut self, _: &str, _: &str, _: &str, _: &str) -> RetranslationChoice {
            RetranslationChoice::First
        }
        fn resolve_conflict(&mut self, _: &str, _: &str, _: &str, _: &str) -> ConflictChoice {
            ConflictChoice::Existing
        }
    }

    #[test]
    fn test_welcome_and_search() {
        let src = r#"<p>Welcome</p><input placeholder="Search">"#;
        let outcome = rewrite(src);
        assert_eq!(
            String::from_utf8(outcome.content.clone()).unwrap(),
            r#"<p>{{ __('Welcome') }}</p><input placeholder="{!! __('Search') !!}">"#
        );
        assert_eq!(outcome.applied(), 2);
        assert_eq!(outcome.new_keys(), vec!["Welcome", "Search"]);
    }

    #[test]
    fn test_dynamic_attribute() {
        assert_eq!(
            rewritten(r#"<x-input :placeholder="'Your name'" />"#),
            r#"<x-input :placeholder="__('Your name')" />"#
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            rewritten(r"<p>Don't use C:\temp</p>"),
            r"<p>{{ __('Don\'t use C:\\temp') }}</p>"
        );
        assert_eq!(rewritten(r"<p>It\'s fine</p>"), r"<p>{{ __('It\'s fine') }}</p>");
    }

    #[test]
    fn test_already_wrapped_spans() {
        assert_eq!(
            rewritten("<p>__('Hello there')</p>"),
            "<p>{{ __('Hello there') }}</p>"
        );
        assert_eq!(
            rewritten(r#"<input placeholder="__('Search')">"#),
            r#"<input placeholder="{!! __('Search') !!}">"#
        );
        let src = r#"<x-input :placeholder="__('Name')" />"#;
        let outcome = rewrite(src);
        assert_eq!(outcome.content, src.as_bytes());
        assert_eq!(outcome.new_keys(), vec!["Name"]);
    }

    #[test]
    fn test_multibyte_and_multiple_records() {
        let src = "<h1>首頁 title</h1>\n<p>  Second line  </p>";
        assert_eq!(
            rewritten(src),
            "<h1>{{ __('首頁 title') }}</h1>\n<p>  {{ __('Second line') }}  </p>"
        );
    }

    #[test]
    fn test_second_pass_is_stable() {
        let src = concat!(
            "<p>Welcome</p>\n",
            "<input placeholder=\"Search\" aria-label=\"It's me\">\n",
            "<x-a :placeholder=\"'Pick one'\" />\n",
        );
        let once = rewritten(src);
        let twice = rewritten(&once);
        assert_eq!(once, twice);

        let again = records(once.as_bytes());
        assert!(
            again
                .iter()
                .all(|r| r.is_dynamic_attribute() && detect(once.as_bytes(), r.start_byte, r.end_byte).is_some())
        );
    }

    #[test]
    fn test_escaped_echo_is_left_alone() {
        let src = "<p>@{{ name }}</p>\n<p>Hello</p>\n";
        let outcome = rewrite(src);
        assert_eq!(
            String::from_utf8(outcome.content.clone()).unwrap(),
            "<p>@{{ name }}</p>\n<p>{{ __('Hello') }}</p>\n"
        );
        assert_eq!(outcome.new_keys(), vec!["Hello"]);
    }

    #[test]
    fn test_interactive_rejects_are_dropped() {
        let src = "<p>First</p><p>Second</p><p>Third</p>";
        let mut reviewer = Scripted {
            answers: vec![true, false, true],
            asked: Vec::new(),
        };
        let outcome = RewritePlan::new("test.blade.php", records(src.as_bytes()))
            .apply(src.as_bytes(), Some(&mut reviewer));

        assert_eq!(reviewer.asked, vec!["Third", "Second", "First"]);
        assert_eq!(
            String::from_utf8(outcome.content.clone()).unwrap(),
            "<p>{{ __('First') }}</p><p>Second</p><p>{{ __('Third') }}</p>"
        );
        assert_eq!(outcome.new_keys(), vec!["First", "Third"]);
    }

    #[test]
    fn test_interactive_wrapped_dynamic_is_automatic() {
        let src = r#"<x-a :placeholder="__('Name')" />"#;
        let mut reviewer = Scripted {
            answers: Vec::new(),
            asked: Vec::new(),
        };
        let outcome = RewritePlan::new("test.blade.php", records(src.as_bytes()))
            .apply(src.as_bytes(), Some(&mut reviewer));
        assert!(reviewer.asked.is_empty());
        assert_eq!(outcome.applied(), 1);
    }

    #[test]
    fn test_duplicate_texts_are_one_key() {
        let outcome = rewrite("<p>Home</p><a>Home</a>");
        assert_eq!(outcome.applied(), 2);
        assert_eq!(outcome.new_keys(), vec!["Home"]);
    }

    #[test]
    fn test_out_of_range_record_is_skipped() {
        let record = ExtractionRecord {
            text: "Gone".to_string(),
            start_byte: 10,
            end_byte: 40,
            line: 1,
            kind: RecordKind::TextNode,
        };
        let outcome = RewritePlan::new("x", vec![record]).apply(b"<p>short</p>", None);
        assert_eq!(outcome.content, b"<p>short</p>");
        assert_eq!(outcome.applied(), 0);
    }
}
