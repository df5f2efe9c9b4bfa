//! Instruction text for the completion backend.
//!
//! The reply grammar requested here is exactly what
//! [`super::response::parse_request_output`] reads back: one blank-line
//! separated block per key, the key on the first line, then one
//! `<lang>: <translation>` line per target language.

use crate::config::{Config, PhraseTable};

use super::TranslationMap;

const USER_PREAMBLE: &str = "Translate the following text based on the instructions. You can refer to <context> to reference similar text.\n<context>\n{context}\n</context>\n";

const TRADITIONAL_CHINESE: &str = "Traditional Chinese";
const SIMPLIFIED_CHINESE: &str = "Simplified Chinese";

/// `   <lang>: [translation]` per target language.
pub fn format_example(target_languages: &[String]) -> String {
    target_languages
        .iter()
        .map(|lang| format!("   {}: [translation]", lang))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Preferred literal translations for the requested languages only.
/// Empty when none of them has an entry.
pub fn preferred_translations(table: &PhraseTable, target_languages: &[String]) -> String {
    let mut block = String::new();
    for lang in target_languages {
        let Some(phrases) = table.get(lang).filter(|p| !p.is_empty()) else {
            continue;
        };
        block.push_str(&format!(
            "\n\nFor {}, prefer these translations when applicable:\n",
            lang
        ));
        for (key, value) in phrases {
            let value = value.as_str().unwrap_or_default();
            block.push_str(&format!("- '{}' → '{}'\n", key, value));
        }
    }
    if !block.is_empty() {
        block.push_str(
            "\nUse these preferred translations when the terms appear standalone or can be naturally incorporated.",
        );
    }
    block
}

/// `1. first\n2. second`
pub fn numbered_keys(keys: &[String]) -> String {
    keys.iter()
        .enumerate()
        .map(|(i, key)| format!("{}. {}", i + 1, key))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the system and user messages for one request.
pub struct PromptBuilder<'a> {
    pub source_language: &'a str,
    pub target_languages: &'a [String],
    /// Display names come from [`Config::language_name`].
    pub config: &'a Config,
    pub preferred: &'a PhraseTable,
}

impl PromptBuilder<'_> {
    fn name<'n>(&'n self, code: &'n str) -> &'n str {
        self.config.language_name(code)
    }

    fn display(&self, code: &str) -> String {
        let name = self.name(code);
        if name == code {
            code.to_string()
        } else {
            format!("{} ({})", name, code)
        }
    }

    /// English into exactly Traditional + Simplified Chinese.
    pub fn is_specialized(&self) -> bool {
        if self.name(self.source_language) != "English" || self.target_languages.len() != 2 {
            return false;
        }
        let names: Vec<&str> = self
            .target_languages
            .iter()
            .map(|lang| self.name(lang))
            .collect();
        names.contains(&TRADITIONAL_CHINESE) && names.contains(&SIMPLIFIED_CHINESE)
    }

    pub fn system_instruction(&self, retranslate: bool) -> String {
        let targets = self
            .target_languages
            .iter()
            .map(|lang| self.display(lang))
            .collect::<Vec<_>>()
            .join(", ");
        let source = self.display(self.source_language);
        let specialized = self.is_specialized();
        let subject = if specialized {
            "texts that appear on a website"
        } else {
            "texts"
        };

        let mut lines = Vec::new();
        if retranslate {
            lines.push(format!(
                "You are a professional translator. The previous translations for these website texts were not satisfactory. Translate the following numbered list of {} from {} to each of these languages: {}.",
                subject, source, targets
            ));
            lines.push("For each numbered text, you are given the original text and the first translation for each target language. Provide a different, better translation for each language.".to_string());
        } else {
            lines.push(format!(
                "You are a professional translator. Translate the following numbered list of {} from {} to each of these languages: {}.",
                subject, source, targets
            ));
        }
        lines.push("Instructions:".to_string());
        if retranslate {
            lines.push("DO NOT reuse the previous translations; provide NEW, improved translations.".to_string());
        }
        lines.push("Use formal written language only, not spoken or colloquial forms.".to_string());
        if specialized {
            lines.push("For Traditional Chinese, use expressions and vocabulary as spoken and written by Cantonese speakers in Hong Kong.".to_string());
            lines.push("For Simplified Chinese, use expressions and vocabulary as spoken and written by Mainland China speakers.".to_string());
            lines.push("If it is appropriate, try to use similar sentence structure and vocabulary in both Traditional Chinese and Simplified Chinese translations, to maintain consistency and clarity across both versions.".to_string());
        } else {
            lines.push("Use regionally appropriate vocabulary, expressions, and tone.".to_string());
        }
        lines.push("Adapt meaning for clarity and naturalness in a web context; do not translate word-for-word.".to_string());

        let example = format_example(self.target_languages);
        lines.push(format!(
            "For each numbered text, provide translations for all languages in this format:\n\n1. [Original text]\n{}\n\n2. [Next text]\n{}",
            example, example
        ));
        lines.push(format!(
            "Return ONLY the {}translations in this exact format without any explanations.{}",
            if retranslate { "improved " } else { "" },
            preferred_translations(self.preferred, self.target_languages)
        ));
        lines.join("\n")
    }

    pub fn user_message(&self, keys: &[String]) -> String {
        format!("{}{}", USER_PREAMBLE, numbered_keys(keys))
    }

    /// Numbered keys, each followed by its first-pass translation per language.
    pub fn retranslation_message(&self, keys: &[String], first: &TranslationMap) -> String {
        let mut body = String::new();
        for (i, key) in keys.iter().enumerate() {
            body.push_str(&format!("{}. {}\n", i + 1, key));
            for lang in self.target_languages {
                let previous = first
                    .get(lang)
                    .and_then(|m| m.get(key))
                    .map(String::as_str)
                    .unwrap_or_default();
                body.push_str(&format!("   {} (first): {}\n", lang, previous));
            }
        }
        format!("{}{}", USER_PREAMBLE, body)
    }
}
