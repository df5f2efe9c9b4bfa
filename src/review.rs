//! Operator decisions for interactive runs.
//!
//! Every prompt the pipeline can raise goes through [`Reviewer`], so the
//! rewrite engine and the translation orchestrator never touch a terminal
//! themselves. [`TerminalReviewer`] is the line-based implementation used by
//! `localize --interactive`; tests script their own.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use colored::Colorize;

use crate::core::extract::{ExtractionRecord, RecordKind};

/// A rewrite the engine wants to make, shown before it is applied.
#[derive(Debug)]
pub struct PendingChange<'a> {
    pub file_path: &'a str,
    pub record: &'a ExtractionRecord,
    /// The span already holds `__('...')`.
    pub already_wrapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Accept,
    Retranslate,
    /// Operator-entered text per target language.
    Manual(BTreeMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetranslationChoice {
    First,
    Retranslated,
    Manual(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Existing,
    New,
}

pub trait Reviewer {
    /// Accept or reject one rewrite.
    fn approve_change(&mut self, change: &PendingChange<'_>) -> bool;

    /// Review first-pass translations of `key`, one entry per target language.
    fn review_translation(
        &mut self,
        key: &str,
        translations: &BTreeMap<String, String>,
    ) -> ReviewDecision;

    fn choose_retranslation(
        &mut self,
        key: &str,
        lang: &str,
        first: &str,
        retranslated: &str,
    ) -> RetranslationChoice;

    fn resolve_conflict(&mut self, lang: &str, key: &str, existing: &str, new: &str)
    -> ConflictChoice;
}

/// Line-based prompts over any reader/writer pair.
///
/// End of input resolves every pending prompt to its conservative answer:
/// reject the change, accept the translations, keep the first translation,
/// keep the existing value.
pub struct TerminalReviewer<R, W> {
    input: R,
    output: W,
}

impl TerminalReviewer<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalReviewer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn say(&mut self, message: impl std::fmt::Display) {
        let _ = writeln!(self.output, "{}", message);
    }

    fn ask_manual(&mut self, lang: &str) -> String {
        self.ask(&format!("Enter manual translation for {}: ", lang))
            .unwrap_or_default()
    }
}

impl<R: BufRead, W: Write> Reviewer for TerminalReviewer<R, W> {
    fn approve_change(&mut self, change: &PendingChange<'_>) -> bool {
        let record = change.record;
        self.say("-".repeat(50));
        let framing = match (&record.kind, change.already_wrapped) {
            (RecordKind::TextNode, true) => format!(
                "Found __('') wrapped literal text on line {}: '{}' - will add {{{{ }}}}",
                record.line, record.text
            ),
            (RecordKind::Attribute { name, dynamic: false }, true) => format!(
                "Found __('') wrapped static attribute {} on line {}: '{}' - will add {{!! !!}}",
                name, record.line, record.text
            ),
            (RecordKind::Attribute { name, dynamic: true }, _) => format!(
                "Found dynamic attribute :{} on line {}: '{}'",
                name, record.line, record.text
            ),
            (RecordKind::Attribute { name, .. }, false) => format!(
                "Found attribute {} on line {}: '{}'",
                name, record.line, record.text
            ),
            (RecordKind::TextNode, false) => {
                format!("Found on line {}: '{}'", record.line, record.text)
            }
        };
        self.say(format!("{} {}", change.file_path.cyan(), framing));

        match self.ask("Apply this change? (y/n): ") {
            Some(answer) if answer.eq_ignore_ascii_case("y") => true,
            _ => {
                self.say("Skipping this change.");
                false
            }
        }
    }

    fn review_translation(
        &mut self,
        key: &str,
        translations: &BTreeMap<String, String>,
    ) -> ReviewDecision {
        self.say("\n--- Translation Review ---");
        self.say(format!("Original: '{}'", key));
        for (lang, text) in translations {
            self.say(format!("{}: '{}'", lang, text));
        }

        loop {
            let Some(answer) =
                self.ask("Accept these translations? (y)es / (r)etranslate / (m)anual: ")
            else {
                return ReviewDecision::Accept;
            };
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return ReviewDecision::Accept,
                "r" | "retranslate" => return ReviewDecision::Retranslate,
                "m" | "manual" => {
                    let manual = translations
                        .keys()
                        .map(|lang| (lang.clone(), self.ask_manual(lang)))
                        .collect();
                    return ReviewDecision::Manual(manual);
                }
                _ => self.say("Please enter 'y', 'r', or 'm'"),
            }
        }
    }

    fn choose_retranslation(
        &mut self,
        key: &str,
        lang: &str,
        first: &str,
        retranslated: &str,
    ) -> RetranslationChoice {
        self.say(format!("\nOriginal: '{}'", key));
        self.say(format!("{} (1st): '{}'", lang, first));
        self.say(format!("{} (re): '{}'", lang, retranslated));

        loop {
            let Some(answer) = self.ask(&format!(
                "Choose translation for {}: (1) First / (2) Retranslation / (m) Manual: ",
                lang
            )) else {
                return RetranslationChoice::First;
            };
            match answer.to_lowercase().as_str() {
                "1" => return RetranslationChoice::First,
                "2" => return RetranslationChoice::Retranslated,
                "m" | "manual" => return RetranslationChoice::Manual(self.ask_manual(lang)),
                _ => self.say("Please enter '1', '2', or 'm'"),
            }
        }
    }

    fn resolve_conflict(
        &mut self,
        lang: &str,
        key: &str,
        existing: &str,
        new: &str,
    ) -> ConflictChoice {
        self.say(format!("\n{} conflict in {}.json", "warning:".bold().yellow(), lang));
        self.say(format!("Key: '{}'", key));
        self.say(format!("Existing translation: '{}'", existing));
        self.say(format!("New translation: '{}'", new));

        loop {
            let Some(answer) = self.ask("Keep which version? (e)xisting / (n)ew: ") else {
                return ConflictChoice::Existing;
            };
            match answer.to_lowercase().as_str() {
                "e" | "existing" => return ConflictChoice::Existing,
                "n" | "new" => return ConflictChoice::New,
                _ => self.say("Please enter 'e' or 'n'"),
            }
        }
    }
}
