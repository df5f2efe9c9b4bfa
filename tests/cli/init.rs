use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created .bladelocrc.json"));

    let content = test.read_file(".bladelocrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceLanguage"], "en");
    assert_eq!(parsed["targetLanguages"], serde_json::json!(["zh_HK", "zh_CN"]));
    assert!(parsed.get("translatableAttributes").is_some());
    assert!(parsed.get("hardcodedTranslations").is_some());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".bladelocrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".bladelocrc.json already exists"));
    assert_eq!(test.read_file(".bladelocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::laravel()?;
    test.command().arg("init").output()?;
    test.write_file("resources/views/home.blade.php", "<h1>Welcome</h1>\n")?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert!(
        output.status.success(),
        "localize should work with the initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
