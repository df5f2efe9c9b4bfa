//! `bladeloc localize`: scan, wrap, translate, merge.
//!
//! Files are handled one at a time in scan order. The first file decides the
//! project root and, through it, the detected languages for the whole run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::LocalizeCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_removed_texts_to, print_success_to, report};
use crate::config::{Config, fetch_remote_config, load_config};
use crate::core::file_scanner::scan_templates;
use crate::core::parsers::{BladeParser, TemplateParser};
use crate::core::project::{detect_languages, find_project_root};
use crate::core::{ExtractionRecord, RecordKind, RewritePlan, extract_spans};
use crate::issues::{FileErrorIssue, Issue};
use crate::review::{Reviewer, TerminalReviewer};
use crate::store::LanguageStore;
use crate::translate::{HttpTransport, TranslationClient, translate_and_save};
use crate::validate::{RemovedTexts, SemanticValidator};

pub fn localize(cmd: LocalizeCommand) -> Result<ExitStatus> {
    let verbose = cmd.verbose;
    let mut config = load_run_config(&cmd, verbose)?;

    let scan = scan_templates(&cmd.paths, &config.excluded_directories, verbose);
    let Some(first_file) = scan.files.first() else {
        println!("No Blade files found in the given paths.");
        return Ok(ExitStatus::Failure);
    };

    let project_root = find_project_root(first_file, &config.project_root_markers);
    let languages_overridden = cmd.source_language.is_some() || !cmd.target_languages.is_empty();
    if let Some(root) = &project_root
        && !languages_overridden
        && let Some(detected) = detect_languages(
            root,
            &config.locale_config_file,
            &config.locale_segment_key,
            verbose,
        )
    {
        if verbose {
            eprintln!(
                "Detected source language {} and targets {}",
                detected.source.cyan(),
                detected.targets.join(", ").cyan()
            );
        }
        config.source_language = detected.source;
        config.target_languages = detected.targets;
    }
    if let Some(source) = &cmd.source_language {
        config.source_language = source.clone();
    }
    if !cmd.target_languages.is_empty() {
        config.target_languages = cmd.target_languages.clone();
    }
    config.validate()?;

    let transport = HttpTransport;
    let validator = (!cmd.no_validate).then(|| SemanticValidator::new(&config, &transport));
    let mut terminal = cmd.interactive.then(TerminalReviewer::stdio);
    let parser = BladeParser;

    let mut issues: Vec<Issue> = Vec::new();
    let mut removed = RemovedTexts::default();
    let mut keys: Vec<String> = Vec::new();
    let mut changes = 0;

    for path in &scan.files {
        let file_path = path.display().to_string();
        if verbose {
            eprintln!("{} {}", "Scanning".bold(), file_path);
        }

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                issues.push(file_error(&file_path, e));
                continue;
            }
        };
        let tree = match parser.parse(&content) {
            Ok(tree) => tree,
            Err(e) => {
                issues.push(file_error(&file_path, e));
                continue;
            }
        };

        let extraction = extract_spans(
            &file_path,
            &content,
            &tree,
            &config.translatable_attributes,
        );
        issues.extend(
            extraction
                .unquoted_attributes
                .into_iter()
                .map(Issue::UnquotedAttribute),
        );
        if verbose {
            for record in &extraction.records {
                print_record(record);
            }
        }

        let records = match &validator {
            Some(validator) => validator.filter_records(&file_path, extraction.records, &mut removed),
            None => extraction.records,
        };
        if records.is_empty() {
            if verbose {
                eprintln!("No new translatable text found.");
            }
            continue;
        }

        let reviewer = terminal.as_mut().map(|t| t as &mut dyn Reviewer);
        let outcome = RewritePlan::new(file_path.as_str(), records).apply(&content, reviewer);
        if outcome.content != content
            && let Err(e) = fs::write(path, &outcome.content)
        {
            issues.push(file_error(&file_path, e));
            continue;
        }
        if outcome.applied() > 0 {
            println!("Updated {} ({} changes)", file_path, outcome.applied());
        }
        changes += outcome.applied();
        for key in outcome.new_keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    print_success_to(scan.files.len(), changes, &mut std::io::stdout().lock());

    if keys.is_empty() {
        println!("No new keys to add.");
    } else {
        let mut stores = open_stores(&config, project_root.as_deref())?;
        let client = TranslationClient::new(&config, &transport);
        let reviewer = terminal.as_mut().map(|t| t as &mut dyn Reviewer);
        let summary = translate_and_save(
            (!cmd.no_translate).then_some(&client),
            &mut stores,
            &keys,
            reviewer,
        )?;

        for lang in &summary.complete {
            println!("All keys for {} already exist", lang.cyan());
        }
        for store in &stores {
            let updated = summary.updated.get(store.lang()).copied().unwrap_or_default();
            match store.file_path() {
                Some(path) if updated > 0 => {
                    println!("Updated {} ({} keys)", path.display(), updated);
                }
                Some(_) => {}
                None if summary.updated.contains_key(store.lang()) => {
                    println!("\n--- New keys for {}.json ---", store.lang());
                    print!("{}", store.to_json()?);
                    println!("--- End of new keys ---");
                }
                None => {}
            }
        }
        issues.extend(summary.conflicts.into_iter().map(Issue::TranslationConflict));
    }

    print_removed_texts_to(&removed, &mut std::io::stdout().lock());

    if issues.is_empty() {
        return Ok(ExitStatus::Success);
    }
    println!();
    report(&issues);
    Ok(ExitStatus::Failure)
}

/// Config file (and optionally the remote base), with the token override.
fn load_run_config(cmd: &LocalizeCommand, verbose: bool) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let mut loaded = load_config(&cwd, cmd.config.as_deref(), None)?;

    if cmd.remote_config {
        match fetch_remote_config(&loaded.config.api_endpoint) {
            Ok(remote) => loaded = load_config(&cwd, cmd.config.as_deref(), Some(remote))?,
            Err(e) => eprintln!(
                "{} remote config unavailable, using local settings: {:#}",
                "warning:".bold().yellow(),
                e
            ),
        }
    }
    if verbose && let Some(path) = &loaded.path {
        eprintln!("Using config {}", path.display());
    }

    let mut config = loaded.config;
    if let Some(token) = &cmd.token {
        config.cmscore_ai_token = token.clone();
    }
    Ok(config)
}

/// Stores under `<root>/<langDir>`, or detached ones printed at the end.
fn open_stores(config: &Config, project_root: Option<&Path>) -> Result<Vec<LanguageStore>> {
    let Some(root) = project_root else {
        eprintln!(
            "{} project root not found (looked for {}), printing new keys instead",
            "warning:".bold().yellow(),
            config.project_root_markers.join(", ")
        );
        return Ok(config
            .target_languages
            .iter()
            .map(|lang| LanguageStore::detached(lang))
            .collect());
    };
    let lang_dir = root.join(&config.lang_dir);
    config
        .target_languages
        .iter()
        .map(|lang| LanguageStore::open(&lang_dir, lang))
        .collect()
}

fn file_error(file_path: &str, error: impl std::fmt::Display) -> Issue {
    Issue::FileError(FileErrorIssue {
        file_path: file_path.to_string(),
        error: error.to_string(),
    })
}

fn print_record(record: &ExtractionRecord) {
    match &record.kind {
        RecordKind::TextNode => {
            eprintln!("  line {}: '{}'", record.line, record.text);
        }
        RecordKind::Attribute { name, dynamic } => {
            eprintln!(
                "  line {}: '{}' ({}{})",
                record.line,
                record.text,
                if *dynamic { ":" } else { "" },
                name
            );
        }
    }
}
