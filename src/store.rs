use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::issues::TranslationConflictIssue;
use crate::review::{ConflictChoice, Reviewer};

/// Result of merging fresh translations into a store.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Entries whose stored value changed.
    pub updated: usize,
    /// Differing values kept as they were.
    pub conflicts: Vec<TranslationConflictIssue>,
}

/// One target language's `<lang>.json`: original text → translation.
pub struct LanguageStore {
    lang: String,
    /// `None` when there is no project to write into.
    file_path: Option<PathBuf>,
    entries: Map<String, Value>,
}

impl LanguageStore {
    /// Load `<lang_dir>/<lang>.json`. A missing file is an empty store; a
    /// malformed one is reported and treated as empty.
    pub fn open(lang_dir: &Path, lang: &str) -> Result<Self> {
        let path = lang_dir.join(format!("{}.json", lang));
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    eprintln!(
                        "{} {} is not a JSON object, treating it as empty",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                    Map::new()
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            lang: lang.to_string(),
            file_path: Some(path),
            entries,
        })
    }

    /// An empty store that is never written to disk.
    pub fn detached(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            file_path: None,
            entries: Map::new(),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Stored translation; non-string values count as empty.
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn display_path(&self) -> String {
        match &self.file_path {
            Some(path) => path.display().to_string(),
            None => format!("{}.json", self.lang),
        }
    }

    /// True when the key has no usable translation: absent, not a string,
    /// or only whitespace.
    pub fn is_untranslated(&self, key: &str) -> bool {
        self.get(key).trim().is_empty()
    }

    /// Keys that still need a translation in this language, in input order.
    pub fn filter_existing_keys(&self, keys: &[String]) -> Vec<String> {
        keys.iter()
            .filter(|key| self.is_untranslated(key))
            .cloned()
            .collect()
    }

    /// Merge fresh translations.
    ///
    /// A key is written when the store has no usable value for it. A
    /// differing non-empty value is a conflict: `reviewer` decides when
    /// given, otherwise the existing value stays and the conflict is
    /// returned.
    pub fn merge<R: Reviewer + ?Sized>(
        &mut self,
        translations: impl IntoIterator<Item = (String, String)>,
        mut reviewer: Option<&mut R>,
    ) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for (key, new) in translations {
            if self.is_untranslated(&key) {
                if self.entries.get(&key) != Some(&Value::String(new.clone())) {
                    self.entries.insert(key, Value::String(new));
                    outcome.updated += 1;
                }
                continue;
            }
            let existing = self.get(&key).to_string();
            if existing == new {
                continue;
            }

            let choice = match reviewer.as_deref_mut() {
                Some(reviewer) => reviewer.resolve_conflict(&self.lang, &key, &existing, &new),
                None => {
                    outcome.conflicts.push(TranslationConflictIssue {
                        file_path: self.display_path(),
                        key: key.clone(),
                        existing: existing.clone(),
                        new: new.clone(),
                    });
                    ConflictChoice::Existing
                }
            };
            if choice == ConflictChoice::New {
                self.entries.insert(key, Value::String(new));
                outcome.updated += 1;
            }
        }

        outcome
    }

    /// Pretty JSON, 4-space indent, non-ASCII literal, trailing newline.
    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(&self.entries)
    }

    /// Write the whole file back. Detached stores are not written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("Serialized JSON is not UTF-8")
}
