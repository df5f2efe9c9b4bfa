use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CONFIG_FILE_NAME: &str = ".bladelocrc.json";

/// Preferred literal translations: language code → (source text → translation).
pub type PhraseTable = BTreeMap<String, Map<String, Value>>;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_language", alias = "source_language")]
    pub source_language: String,
    #[serde(default = "default_target_languages", alias = "target_languages")]
    pub target_languages: Vec<String>,
    #[serde(
        default = "default_translatable_attributes",
        alias = "translatable_attributes"
    )]
    pub translatable_attributes: Vec<String>,
    #[serde(
        default = "default_excluded_directories",
        alias = "excluded_directories"
    )]
    pub excluded_directories: Vec<String>,
    #[serde(default = "default_validate_ai_model", alias = "validate_ai_model")]
    pub validate_ai_model: String,
    #[serde(default = "default_translate_ai_model", alias = "translate_ai_model")]
    pub translate_ai_model: String,
    /// Try the completion backend before the structured one.
    #[serde(default, alias = "use_cmscore_ai_first")]
    pub use_cmscore_ai_first: bool,
    /// Bearer token for the completion backend.
    #[serde(default, alias = "cmscore_ai_token")]
    pub cmscore_ai_token: String,
    #[serde(
        default = "default_hardcoded_translations",
        alias = "hardcoded_translations"
    )]
    pub hardcoded_translations: PhraseTable,
    /// Base URL of the structured service (`config`, `validate`, `translate`).
    #[serde(default = "default_api_endpoint", alias = "api_endpoint")]
    pub api_endpoint: String,
    /// Completion endpoint prefix; the translate model name is appended.
    #[serde(default = "default_completion_endpoint", alias = "completion_endpoint")]
    pub completion_endpoint: String,
    #[serde(default = "default_lang_dir", alias = "lang_dir")]
    pub lang_dir: String,
    #[serde(
        default = "default_project_root_markers",
        alias = "project_root_markers"
    )]
    pub project_root_markers: Vec<String>,
    #[serde(default = "default_locale_config_file", alias = "locale_config_file")]
    pub locale_config_file: String,
    #[serde(default = "default_locale_segment_key", alias = "locale_segment_key")]
    pub locale_segment_key: String,
    #[serde(
        default = "default_request_timeout_secs",
        alias = "request_timeout_secs"
    )]
    pub request_timeout_secs: u64,
    /// Display names used in prompts; also pick the specialised instructions.
    #[serde(
        default = "default_language_names",
        alias = "language_names",
        alias = "LANG_CODE_TO_NAME"
    )]
    pub language_names: BTreeMap<String, String>,
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_languages() -> Vec<String> {
    ["zh_HK", "zh_CN"].map(String::from).to_vec()
}

fn default_translatable_attributes() -> Vec<String> {
    ["placeholder", "image-alt", "aria-label"]
        .map(String::from)
        .to_vec()
}

fn default_excluded_directories() -> Vec<String> {
    [
        "dummy",
        "node_modules",
        "storage",
        "bootstrap",
        "config",
        "database",
        "vendor",
        "resources/views/components",
    ]
    .map(String::from)
    .to_vec()
}

fn default_validate_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_translate_ai_model() -> String {
    "gpt-4.1-nano".to_string()
}

fn phrase_map(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

fn default_hardcoded_translations() -> PhraseTable {
    let zh_hk = phrase_map(&[
        ("Skip to main content", "跳至主要內容"),
        ("Top", "置頂"),
        ("Home", "首頁"),
        ("Previous", "上一頁"),
        ("Next", "下一頁"),
        ("Play Slide", "播放幻燈片"),
        ("Pause Slide", "暫停幻燈片"),
        ("Upcoming", "即將舉行"),
        ("Highlight", "精選"),
        ("YYYY-MM-DD", "年-月-日"),
        ("Whatsapp", "Whatsapp"),
        ("Line", "Line"),
        ("Instagram", "Instagram"),
        ("LinkedIn", "LinkedIn"),
        ("Threads", "Threads"),
    ]);
    let zh_cn = phrase_map(&[
        ("Skip to main content", "跳至主要内容"),
        ("Top", "置顶"),
        ("Home", "首页"),
        ("Previous", "上一页"),
        ("Next", "下一页"),
        ("Play Slide", "播放幻灯片"),
        ("Pause Slide", "暂停幻灯片"),
        ("Upcoming", "即将举行"),
        ("Highlight", "精选"),
        ("YYYY-MM-DD", "年-月-日"),
        ("Whatsapp", "Whatsapp"),
        ("Line", "Line"),
        ("Instagram", "Instagram"),
        ("LinkedIn", "LinkedIn"),
        ("Threads", "Threads"),
    ]);
    BTreeMap::from([("zh_HK".to_string(), zh_hk), ("zh_CN".to_string(), zh_cn)])
}

fn default_api_endpoint() -> String {
    "http://localhost:8000/".to_string()
}

fn default_completion_endpoint() -> String {
    "http://localhost:8080/tasks/translation/".to_string()
}

fn default_lang_dir() -> String {
    "lang".to_string()
}

fn default_project_root_markers() -> Vec<String> {
    ["artisan", "composer.json"].map(String::from).to_vec()
}

fn default_locale_config_file() -> String {
    "config/locales.php".to_string()
}

fn default_locale_segment_key() -> String {
    "language_segment".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_language_names() -> BTreeMap<String, String> {
    [
        ("en", "English"),
        ("zh_HK", "Traditional Chinese"),
        ("zh_TW", "Traditional Chinese"),
        ("zh_CN", "Simplified Chinese"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            translatable_attributes: default_translatable_attributes(),
            excluded_directories: default_excluded_directories(),
            validate_ai_model: default_validate_ai_model(),
            translate_ai_model: default_translate_ai_model(),
            use_cmscore_ai_first: false,
            cmscore_ai_token: String::new(),
            hardcoded_translations: default_hardcoded_translations(),
            api_endpoint: default_api_endpoint(),
            completion_endpoint: default_completion_endpoint(),
            lang_dir: default_lang_dir(),
            project_root_markers: default_project_root_markers(),
            locale_config_file: default_locale_config_file(),
            locale_segment_key: default_locale_segment_key(),
            request_timeout_secs: default_request_timeout_secs(),
            language_names: default_language_names(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            bail!("'sourceLanguage' must not be empty");
        }
        if self.target_languages.is_empty() {
            bail!("'targetLanguages' must list at least one language");
        }
        if self.target_languages.contains(&self.source_language) {
            bail!(
                "'targetLanguages' must not contain the source language \"{}\"",
                self.source_language
            );
        }
        Ok(())
    }

    /// Display name for a language code, falling back to the code itself.
    pub fn language_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.language_names
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// URL under the structured service, e.g. `translate`.
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_endpoint, path)
    }

    /// Completion URL for the translate model.
    pub fn completion_url(&self) -> String {
        join_url(&self.completion_endpoint, &self.translate_ai_model)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Field name as the config struct spells it (`source_language` → `sourceLanguage`).
fn camel_case(key: &str) -> String {
    if key == "LANG_CODE_TO_NAME" {
        return "languageNames".to_string();
    }
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Overlay `layer` onto `base`, top-level keys only.
fn overlay(base: &mut Map<String, Value>, layer: Map<String, Value>) {
    for (key, value) in layer {
        base.insert(camel_case(&key), value);
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config was read from, if any.
    pub path: Option<PathBuf>,
}

/// Load configuration: built-in defaults, then `remote` fields, then the local
/// file. An explicit `config_path` that does not exist is an error; a missing
/// discovered file just means defaults.
pub fn load_config(
    start_dir: &Path,
    config_path: Option<&Path>,
    remote: Option<Map<String, Value>>,
) -> Result<ConfigLoadResult> {
    let path = match config_path {
        Some(p) if !p.exists() => bail!("Config file not found: {}", p.display()),
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(start_dir),
    };

    let mut merged = Map::new();
    if let Some(remote) = remote {
        overlay(&mut merged, remote);
    }
    if let Some(path) = &path {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let local: Map<String, Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        overlay(&mut merged, local);
    }

    let config: Config = serde_json::from_value(Value::Object(merged))
        .context("Invalid configuration values")?;
    config.validate()?;
    Ok(ConfigLoadResult { config, path })
}

/// `GET {apiEndpoint}config`, expecting `{"config": {...}}`.
pub fn fetch_remote_config(api_endpoint: &str) -> Result<Map<String, Value>> {
    let url = join_url(api_endpoint, "config");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .context("Failed to build HTTP client")?;
    let response = client
        .get(&url)
        .send()
        .with_context(|| format!("Could not fetch config from {}", url))?;
    if !response.status().is_success() {
        bail!("{} returned status {}", url, response.status());
    }
    let body: Value = response.json().context("Config response is not JSON")?;
    match body.get("config") {
        Some(Value::Object(config)) => Ok(config.clone()),
        _ => Ok(Map::new()),
    }
}
