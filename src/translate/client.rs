//! Dual-backend translation requests.
//!
//! The structured service answers `{"translations": {lang: {key: text}}}`;
//! the completion service answers free text in the grammar described by
//! [`super::prompt`]. One is tried first and the other is the single
//! fallback; `useCmscoreAiFirst` swaps the two.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::{Value, json};

use crate::config::{Config, PhraseTable};

use super::TranslationMap;
use super::prompt::PromptBuilder;
use super::response::{parse_request_output, parse_structured, reply_text};

/// A JSON POST, fully described.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends requests for the translation and validation clients.
pub trait Transport {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpReply>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpReply> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let mut builder = client.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .send()
            .with_context(|| format!("Request to {} failed", request.url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read reply from {}", request.url))?;
        Ok(HttpReply { status, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `{apiEndpoint}translate`, JSON in and out.
    Structured,
    /// `{completionEndpoint}{translateAiModel}`, prompt in, free text out.
    Completion,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Structured => write!(f, "translation service"),
            Backend::Completion => write!(f, "completion service"),
        }
    }
}

pub struct TranslationClient<'a> {
    config: &'a Config,
    transport: &'a dyn Transport,
}

impl<'a> TranslationClient<'a> {
    pub fn new(config: &'a Config, transport: &'a dyn Transport) -> Self {
        Self { config, transport }
    }

    /// Backends in the order they are tried.
    pub fn order(&self) -> [Backend; 2] {
        if self.config.use_cmscore_ai_first {
            [Backend::Completion, Backend::Structured]
        } else {
            [Backend::Structured, Backend::Completion]
        }
    }

    fn preferred(&self, languages: &[String]) -> PhraseTable {
        self.config
            .hardcoded_translations
            .iter()
            .filter(|(lang, _)| languages.contains(lang))
            .map(|(lang, phrases)| (lang.clone(), phrases.clone()))
            .collect()
    }

    /// Request for one backend. `first` marks a retranslation and carries the
    /// first-pass results as context.
    pub fn request(
        &self,
        backend: Backend,
        keys: &[String],
        languages: &[String],
        first: Option<&TranslationMap>,
    ) -> Result<HttpRequest> {
        let preferred = self.preferred(languages);
        match backend {
            Backend::Structured => {
                let mut body = json!({
                    "texts": keys,
                    "source_language": self.config.source_language,
                    "target_languages": languages,
                    "ai_model": self.config.translate_ai_model,
                    "hardcoded_translations": preferred,
                    "retranslate": first.is_some(),
                });
                if let (Some(first), Value::Object(fields)) = (first, &mut body) {
                    fields.insert("first_translations".to_string(), json!(first));
                }
                Ok(HttpRequest {
                    url: self.config.api_url("translate"),
                    headers: Vec::new(),
                    body,
                    timeout: self.config.request_timeout(),
                })
            }
            Backend::Completion => {
                if self.config.cmscore_ai_token.is_empty() {
                    bail!("no token configured (set cmscoreAiToken or pass --token)");
                }
                let prompt = PromptBuilder {
                    source_language: &self.config.source_language,
                    target_languages: languages,
                    config: self.config,
                    preferred: &preferred,
                };
                let user = match first {
                    Some(first) => prompt.retranslation_message(keys, first),
                    None => prompt.user_message(keys),
                };
                Ok(HttpRequest {
                    url: self.config.completion_url(),
                    headers: vec![
                        (
                            "Authorization".to_string(),
                            format!("Bearer {}", self.config.cmscore_ai_token),
                        ),
                        ("Content-Type".to_string(), "application/json".to_string()),
                    ],
                    body: json!({
                        "state": {
                            "prompt": [
                                { "role": "system", "content": prompt.system_instruction(first.is_some()) },
                                { "role": "user", "content": user },
                            ]
                        }
                    }),
                    timeout: self.config.request_timeout(),
                })
            }
        }
    }

    fn attempt(
        &self,
        backend: Backend,
        keys: &[String],
        languages: &[String],
        first: Option<&TranslationMap>,
    ) -> Result<TranslationMap> {
        let request = self.request(backend, keys, languages, first)?;
        let reply = self.transport.post_json(&request)?;
        if reply.status != 200 {
            bail!("{} returned status {}", request.url, reply.status);
        }
        match backend {
            Backend::Structured => parse_structured(&reply.body),
            Backend::Completion => Ok(parse_request_output(
                &reply_text(&reply.body),
                keys,
                languages,
            )),
        }
    }

    /// Translate `keys` into `languages`, falling back once to the other
    /// backend. `None` when both fail.
    pub fn translate(
        &self,
        keys: &[String],
        languages: &[String],
        first: Option<&TranslationMap>,
    ) -> Option<TranslationMap> {
        for backend in self.order() {
            match self.attempt(backend, keys, languages, first) {
                Ok(translations) => return Some(translations),
                Err(err) => eprintln!(
                    "{} {} failed: {:#}",
                    "warning:".bold().yellow(),
                    backend,
                    err
                ),
            }
        }
        None
    }
}
