//! Laravel project detection: project root, `.env` locale and the locale map
//! kept in a PHP config array.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;

pub const DEFAULT_APP_LOCALE: &str = "en";

/// Languages derived from the project's own locale configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLanguages {
    pub source: String,
    pub targets: Vec<String>,
}

/// First ancestor directory of `file` holding any of `markers`.
pub fn find_project_root(file: &Path, markers: &[String]) -> Option<PathBuf> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(file)
    };
    absolute
        .parent()?
        .ancestors()
        .find(|dir| markers.iter().any(|m| dir.join(m).exists()))
        .map(Path::to_path_buf)
}

/// `APP_LOCALE` from `<root>/.env`, quotes stripped. Defaults to `en`.
pub fn read_app_locale(root: &Path) -> String {
    let Ok(content) = fs::read_to_string(root.join(".env")) else {
        return DEFAULT_APP_LOCALE.to_string();
    };
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("APP_LOCALE="))
        .map(|value| value.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_APP_LOCALE.to_string())
}

/// Index just past the `]` closing a bracket opened right before `from`.
fn closing_bracket(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in text.as_bytes()[from..].iter().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse `'<segment_key>' => [ 'hk' => [ 'locale' => 'zh_HK', ... ], ... ]`
/// into `(segment, locale)` pairs in file order.
pub fn parse_locale_map(php: &str, segment_key: &str) -> Result<Vec<(String, String)>> {
    let segment_re = Regex::new(&format!(
        r#"['"]{}['"]\s*=>\s*\["#,
        regex::escape(segment_key)
    ))?;
    let entry_re = Regex::new(r#"['"]([^'"]+)['"]\s*=>\s*\["#)?;
    let locale_re = Regex::new(r#"['"]locale['"]\s*=>\s*['"]([^'"]*)['"]"#)?;

    let Some(segment) = segment_re.find(php) else {
        return Ok(Vec::new());
    };
    let block_end = closing_bracket(php, segment.end()).unwrap_or(php.len());
    let block = &php[segment.end()..block_end];

    let mut locales = Vec::new();
    let mut pos = 0;
    while let Some(caps) = entry_re.captures_at(block, pos) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(entry_end) = closing_bracket(block, whole.end()) else {
            break;
        };
        let body = &block[whole.end()..entry_end];
        if let Some(locale) = locale_re.captures(body).and_then(|c| c.get(1)) {
            locales.push((name.as_str().to_string(), locale.as_str().to_string()));
        }
        pos = entry_end;
    }
    Ok(locales)
}

pub fn read_locale_map(root: &Path, config_file: &str, segment_key: &str) -> Result<Vec<(String, String)>> {
    let path = root.join(config_file);
    let php = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read locale config {}", path.display()))?;
    parse_locale_map(&php, segment_key)
}

/// Source/target languages from the project, when `APP_LOCALE` matches one of
/// the configured locales. `None` leaves the configured languages in force.
pub fn detect_languages(
    root: &Path,
    config_file: &str,
    segment_key: &str,
    verbose: bool,
) -> Option<DetectedLanguages> {
    let app_locale = read_app_locale(root);
    let locales = match read_locale_map(root, config_file, segment_key) {
        Ok(locales) if !locales.is_empty() => locales,
        Ok(_) => {
            if verbose {
                eprintln!(
                    "{} No '{}' locales found in {}",
                    "warning:".bold().yellow(),
                    segment_key,
                    config_file
                );
            }
            return None;
        }
        Err(e) => {
            if verbose {
                eprintln!("{} {:#}", "warning:".bold().yellow(), e);
            }
            return None;
        }
    };

    if !locales.iter().any(|(_, locale)| *locale == app_locale) {
        eprintln!(
            "{} APP_LOCALE '{}' does not match any configured locale",
            "warning:".bold().yellow(),
            app_locale
        );
        return None;
    }

    let mut targets: Vec<String> = Vec::new();
    for (_, locale) in locales {
        if locale != app_locale && !targets.contains(&locale) {
            targets.push(locale);
        }
    }
    Some(DetectedLanguages {
        source: app_locale,
        targets,
    })
}
