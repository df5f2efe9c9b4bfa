//! Template to language files through the public library API, with the
//! network replaced by a scripted transport.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;

use anyhow::{Result, anyhow};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use bladeloc::config::Config;
use bladeloc::core::parsers::{BladeParser, TemplateParser};
use bladeloc::core::{RewritePlan, extract_spans};
use bladeloc::store::LanguageStore;
use bladeloc::translate::{HttpReply, HttpRequest, TranslationClient, Transport, translate_and_save};

struct ScriptedTransport {
    replies: RefCell<VecDeque<(u16, String)>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(replies: &[(u16, &str)]) -> Self {
        Self {
            replies: RefCell::new(
                replies
                    .iter()
                    .map(|(status, body)| (*status, body.to_string()))
                    .collect(),
            ),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpReply> {
        self.requests.borrow_mut().push(request.clone());
        let (status, body) = self
            .replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("connection refused"))?;
        Ok(HttpReply { status, body })
    }
}

const TEMPLATE: &str = "<h1>Welcome</h1>\n<input placeholder=\"Search\">\n";

fn localize(source: &str, config: &Config) -> (String, Vec<String>) {
    let tree = BladeParser.parse(source.as_bytes()).unwrap();
    let extraction = extract_spans(
        "home.blade.php",
        source.as_bytes(),
        &tree,
        &config.translatable_attributes,
    );
    let outcome = RewritePlan::new("home.blade.php", extraction.records).apply(source.as_bytes(), None);
    let keys = outcome.new_keys();
    (String::from_utf8(outcome.content).unwrap(), keys)
}

#[test]
fn test_welcome_and_search_end_to_end() {
    let dir = tempdir().unwrap();
    let config = Config {
        cmscore_ai_token: "token".to_string(),
        ..Default::default()
    };

    let (content, keys) = localize(TEMPLATE, &config);
    assert_eq!(
        content,
        "<h1>{{ __('Welcome') }}</h1>\n<input placeholder=\"{!! __('Search') !!}\">\n"
    );
    assert_eq!(keys, vec!["Welcome", "Search"]);

    let transport = ScriptedTransport::new(&[(
        200,
        r#"{"translations": {
            "zh_HK": {"Welcome": "歡迎", "Search": "搜尋"},
            "zh_CN": {"Welcome": "欢迎", "Search": "搜索"}
        }}"#,
    )]);
    let client = TranslationClient::new(&config, &transport);
    let mut stores: Vec<LanguageStore> = config
        .target_languages
        .iter()
        .map(|lang| LanguageStore::open(dir.path(), lang).unwrap())
        .collect();

    let summary = translate_and_save(Some(&client), &mut stores, &keys, None).unwrap();
    assert!(summary.conflicts.is_empty());

    assert_eq!(
        fs::read_to_string(dir.path().join("zh_HK.json")).unwrap(),
        "{\n    \"Welcome\": \"歡迎\",\n    \"Search\": \"搜尋\"\n}\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("zh_CN.json")).unwrap(),
        "{\n    \"Welcome\": \"欢迎\",\n    \"Search\": \"搜索\"\n}\n"
    );

    let (second_pass, second_keys) = localize(&content, &config);
    assert_eq!(second_pass, content);
    assert!(second_keys.is_empty());
}

#[test]
fn test_primary_failure_uses_completion_backend() {
    let dir = tempdir().unwrap();
    let config = Config {
        cmscore_ai_token: "token".to_string(),
        ..Default::default()
    };
    let transport = ScriptedTransport::new(&[
        (500, "Internal Server Error"),
        (
            200,
            r#"{"output": "1. Welcome\n   zh_HK: 歡迎\n   zh_CN: 欢迎\n\n2. Search\n   zh_HK: 搜尋\n   zh_CN: 搜索."}"#,
        ),
    ]);
    let client = TranslationClient::new(&config, &transport);
    let mut stores = vec![
        LanguageStore::open(dir.path(), "zh_HK").unwrap(),
        LanguageStore::open(dir.path(), "zh_CN").unwrap(),
    ];
    let keys = vec!["Welcome".to_string(), "Search".to_string()];

    translate_and_save(Some(&client), &mut stores, &keys, None).unwrap();

    let requests = transport.requests.borrow();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.ends_with("/translate"));
    assert!(requests[0].headers.is_empty());
    assert!(requests[1].url.ends_with("/gpt-4.1-nano"));
    assert!(requests[1]
        .headers
        .iter()
        .any(|(name, value)| name == "Authorization" && value == "Bearer token"));
    assert!(requests[1].body.get("state").is_some());

    assert_eq!(stores[1].get("Search"), "搜索");
    assert_eq!(stores[0].get("Welcome"), "歡迎");
}

#[test]
fn test_both_backends_failing_store_empty_values() {
    let dir = tempdir().unwrap();
    let config = Config {
        cmscore_ai_token: "token".to_string(),
        ..Default::default()
    };
    let transport = ScriptedTransport::new(&[(500, ""), (500, "")]);
    let client = TranslationClient::new(&config, &transport);
    let mut stores = vec![LanguageStore::open(dir.path(), "zh_HK").unwrap()];

    translate_and_save(Some(&client), &mut stores, &["Welcome".to_string()], None).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("zh_HK.json")).unwrap(),
        "{\n    \"Welcome\": \"\"\n}\n"
    );
}
