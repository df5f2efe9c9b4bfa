use std::collections::BTreeMap;

use colored::Colorize;

use crate::issues::TranslationConflictIssue;
use crate::review::{RetranslationChoice, ReviewDecision, Reviewer};
use crate::store::LanguageStore;

use super::TranslationMap;
use super::client::TranslationClient;

/// What a translation run did to the stores.
#[derive(Debug, Default)]
pub struct TranslationSummary {
    /// language → number of entries written.
    pub updated: BTreeMap<String, usize>,
    /// Languages whose keys were all present already.
    pub complete: Vec<String>,
    pub conflicts: Vec<TranslationConflictIssue>,
}

/// Every key gets an entry in every language; gaps become `""`.
fn fill_missing(translations: &mut TranslationMap, keys: &[String], languages: &[String]) {
    for lang in languages {
        let map = translations.entry(lang.clone()).or_default();
        for key in keys {
            map.entry(key.clone()).or_default();
        }
    }
}

fn first_pass(
    client: Option<&TranslationClient<'_>>,
    keys: &[String],
    languages: &[String],
) -> TranslationMap {
    let mut translations = match client {
        Some(client) => client.translate(keys, languages, None).unwrap_or_else(|| {
            eprintln!(
                "{} no translation backend answered, new keys are left empty",
                "warning:".bold().yellow()
            );
            TranslationMap::new()
        }),
        None => TranslationMap::new(),
    };
    fill_missing(&mut translations, keys, languages);
    translations
}

fn translations_for(translations: &TranslationMap, key: &str) -> BTreeMap<String, String> {
    translations
        .iter()
        .map(|(lang, map)| (lang.clone(), map.get(key).cloned().unwrap_or_default()))
        .collect()
}

/// Ask about every key; returns the keys marked for retranslation.
fn review_first_pass<R: Reviewer + ?Sized>(
    reviewer: &mut R,
    translations: &mut TranslationMap,
    keys: &[String],
) -> Vec<String> {
    let mut retranslate = Vec::new();
    for key in keys {
        match reviewer.review_translation(key, &translations_for(translations, key)) {
            ReviewDecision::Accept => {}
            ReviewDecision::Retranslate => retranslate.push(key.clone()),
            ReviewDecision::Manual(manual) => {
                for (lang, text) in manual {
                    if let Some(map) = translations.get_mut(&lang) {
                        map.insert(key.clone(), text);
                    }
                }
            }
        }
    }
    retranslate
}

/// One batched request for all keys marked for retranslation, then a
/// per-language choice. A failed request keeps the first-pass values.
fn retranslate<R: Reviewer + ?Sized>(
    client: &TranslationClient<'_>,
    reviewer: &mut R,
    translations: &mut TranslationMap,
    keys: &[String],
    languages: &[String],
) {
    let first: TranslationMap = translations
        .iter()
        .map(|(lang, map)| {
            let subset = keys
                .iter()
                .filter_map(|key| map.get(key).map(|text| (key.clone(), text.clone())))
                .collect();
            (lang.clone(), subset)
        })
        .collect();

    let Some(mut second) = client.translate(keys, languages, Some(&first)) else {
        eprintln!(
            "{} retranslation failed, keeping the first translations",
            "warning:".bold().yellow()
        );
        return;
    };
    fill_missing(&mut second, keys, languages);

    for key in keys {
        for lang in languages {
            let previous = translations
                .get(lang)
                .and_then(|map| map.get(key))
                .cloned()
                .unwrap_or_default();
            let fresh = second
                .get(lang)
                .and_then(|map| map.get(key))
                .cloned()
                .unwrap_or_default();
            let chosen = match reviewer.choose_retranslation(key, lang, &previous, &fresh) {
                RetranslationChoice::First => previous,
                RetranslationChoice::Retranslated => fresh,
                RetranslationChoice::Manual(text) => text,
            };
            if let Some(map) = translations.get_mut(lang) {
                map.insert(key.clone(), chosen);
            }
        }
    }
}

/// Translate the keys each store is missing and merge the results.
///
/// Keys already translated in a store are not requested for it. The union of
/// the remaining keys goes out in one batch. With `client` absent every new
/// key is stored empty. Stores are written when something changed.
pub fn translate_and_save(
    client: Option<&TranslationClient<'_>>,
    stores: &mut [LanguageStore],
    keys: &[String],
    mut reviewer: Option<&mut dyn Reviewer>,
) -> anyhow::Result<TranslationSummary> {
    let mut summary = TranslationSummary::default();

    let mut pending: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for store in stores.iter() {
        let missing = store.filter_existing_keys(keys);
        if missing.is_empty() {
            summary.complete.push(store.lang().to_string());
        } else {
            pending.insert(store.lang().to_string(), missing);
        }
    }
    if pending.is_empty() {
        return Ok(summary);
    }

    let languages: Vec<String> = pending.keys().cloned().collect();
    let batch: Vec<String> = keys
        .iter()
        .filter(|key| pending.values().any(|missing| missing.contains(key)))
        .cloned()
        .collect();

    let mut translations = first_pass(client, &batch, &languages);

    if let (Some(client), Some(reviewer)) = (client, reviewer.as_deref_mut()) {
        let marked = review_first_pass(&mut *reviewer, &mut translations, &batch);
        if !marked.is_empty() {
            retranslate(client, reviewer, &mut translations, &marked, &languages);
        }
    }

    for store in stores.iter_mut() {
        let Some(missing) = pending.get(store.lang()) else {
            continue;
        };
        let lang_translations = translations.get(store.lang());
        let entries = missing.iter().map(|key| {
            let text = lang_translations
                .and_then(|map| map.get(key))
                .cloned()
                .unwrap_or_default();
            (key.clone(), text)
        });
        let outcome = store.merge(entries, reviewer.as_deref_mut());
        if outcome.updated > 0 {
            store.save()?;
        }
        summary
            .updated
            .insert(store.lang().to_string(), outcome.updated);
        summary.conflicts.extend(outcome.conflicts);
    }

    Ok(summary)
}
