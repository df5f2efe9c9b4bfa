//! Semantic validation of extracted texts.
//!
//! An external service decides which texts carry meaning worth translating.
//! Whatever goes wrong with that call, every text passes.

use std::time::Duration;

use anyhow::{Result, bail};
use colored::Colorize;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::core::ExtractionRecord;
use crate::translate::{HttpRequest, Transport};

const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct ValidateReply {
    validated: Vec<String>,
}

/// Texts dropped by validation, with the template they came from.
#[derive(Debug, Default)]
pub struct RemovedTexts {
    entries: Vec<(String, String)>,
}

impl RemovedTexts {
    pub fn record(&mut self, text: &str, file_path: &str) {
        self.entries.push((text.to_string(), file_path.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(text, file)| (text.as_str(), file.as_str()))
    }
}

pub struct SemanticValidator<'a> {
    config: &'a Config,
    transport: &'a dyn Transport,
}

impl<'a> SemanticValidator<'a> {
    pub fn new(config: &'a Config, transport: &'a dyn Transport) -> Self {
        Self { config, transport }
    }

    fn request(&self, texts: &[String]) -> Result<Vec<String>> {
        let request = HttpRequest {
            url: self.config.api_url("validate"),
            headers: Vec::new(),
            body: json!({ "texts": texts, "ai_model": self.config.validate_ai_model }),
            timeout: VALIDATE_TIMEOUT,
        };
        let reply = self.transport.post_json(&request)?;
        if reply.status != 200 {
            bail!("{} returned status {}", request.url, reply.status);
        }
        let reply: ValidateReply = serde_json::from_str(&reply.body)?;
        Ok(reply.validated)
    }

    /// The subset of `texts` worth translating; all of them if the service
    /// cannot be asked.
    pub fn validate(&self, texts: &[String]) -> Vec<String> {
        if texts.is_empty() {
            return Vec::new();
        }
        match self.request(texts) {
            Ok(validated) => validated,
            Err(err) => {
                eprintln!(
                    "{} validation unavailable, keeping all texts: {:#}",
                    "warning:".bold().yellow(),
                    err
                );
                texts.to_vec()
            }
        }
    }

    /// Drop records whose text the service rejected, noting them in `removed`.
    pub fn filter_records(
        &self,
        file_path: &str,
        records: Vec<ExtractionRecord>,
        removed: &mut RemovedTexts,
    ) -> Vec<ExtractionRecord> {
        let mut texts: Vec<String> = Vec::new();
        for record in &records {
            if !texts.contains(&record.text) {
                texts.push(record.text.clone());
            }
        }
        let validated = self.validate(&texts);

        for text in texts.iter().filter(|text| !validated.contains(text)) {
            removed.record(text, file_path);
        }
        records
            .into_iter()
            .filter(|record| validated.contains(&record.text))
            .collect()
    }
}
