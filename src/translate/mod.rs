//! Machine translation of new keys into every target language store.
//!
//! - `prompt`: instruction text for the completion backend
//! - `response`: reply decoding, including the free-text grammar
//! - `client`: dual-backend requests over a [`client::Transport`]
//! - `orchestrator`: first pass, review, retranslation and store merge

use std::collections::BTreeMap;

pub mod client;
pub mod orchestrator;
pub mod prompt;
pub mod response;

/// language → (key → translation)
pub type TranslationMap = BTreeMap<String, BTreeMap<String, String>>;

pub use client::{Backend, HttpReply, HttpRequest, HttpTransport, TranslationClient, Transport};
pub use orchestrator::{TranslationSummary, translate_and_save};
pub use response::parse_request_output;
