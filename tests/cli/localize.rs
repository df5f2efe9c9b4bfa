use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const HOME: &str = r#"<h1>Welcome</h1>
<input placeholder="Search">
@if($user)
    <p>{{ $user->name }}</p>
@endif
"#;

const HOME_WRAPPED: &str = r#"<h1>{{ __('Welcome') }}</h1>
<input placeholder="{!! __('Search') !!}">
@if($user)
    <p>{{ $user->name }}</p>
@endif
"#;

const EMPTY_KEYS: &str = "{\n    \"Welcome\": \"\",\n    \"Search\": \"\"\n}\n";

#[test]
fn test_localize_wraps_and_adds_keys() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/home.blade.php", HOME)?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(test.read_file("resources/views/home.blade.php")?, HOME_WRAPPED);
    assert_eq!(test.read_file("lang/zh_HK.json")?, EMPTY_KEYS);
    assert_eq!(test.read_file("lang/zh_CN.json")?, EMPTY_KEYS);

    let out = stdout(&output);
    assert!(out.contains("Processed 1 file, wrapped 2 texts"));
    assert!(out.contains("lang/zh_HK.json (2 keys)"));

    Ok(())
}

#[test]
fn test_second_run_changes_nothing() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/home.blade.php", HOME)?;
    test.localize_command().arg("resources/views").output()?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("resources/views/home.blade.php")?, HOME_WRAPPED);
    assert_eq!(test.read_file("lang/zh_HK.json")?, EMPTY_KEYS);
    assert!(stdout(&output).contains("No new keys to add."));

    Ok(())
}

#[test]
fn test_existing_translations_are_kept() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/home.blade.php", "<a>Home</a>\n<p>Bye</p>\n")?;
    test.write_file("lang/zh_HK.json", "{\"Home\": \"首頁\", \"Bye\": \"\"}")?;
    test.write_file("lang/zh_CN.json", "{\"Home\": \"首页\", \"Bye\": \"再见\"}")?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // nothing new to store, so neither file is rewritten
    assert_eq!(
        test.read_file("lang/zh_HK.json")?,
        "{\"Home\": \"首頁\", \"Bye\": \"\"}"
    );
    assert_eq!(
        test.read_file("lang/zh_CN.json")?,
        "{\"Home\": \"首页\", \"Bye\": \"再见\"}"
    );
    assert!(stdout(&output).contains("All keys for zh_CN already exist"));

    Ok(())
}

#[test]
fn test_unquoted_attribute_is_reported() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(
        "resources/views/search.blade.php",
        "<p>Find things</p>\n<input placeholder=Search>\n",
    )?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("warning: \"placeholder\"  unquoted-attribute"));
    assert!(out.contains("resources/views/search.blade.php:2:20"));
    assert!(out.contains("1 problem (0 errors, 1 warning)"));
    assert_eq!(
        test.read_file("resources/views/search.blade.php")?,
        "<p>{{ __('Find things') }}</p>\n<input placeholder=Search>\n"
    );

    Ok(())
}

#[test]
fn test_no_templates_found() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/readme.md", "Welcome")?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No Blade files found in the given paths."));

    Ok(())
}

#[test]
fn test_excluded_directories_are_skipped() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/home.blade.php", "<h1>Welcome</h1>\n")?;
    test.write_file("resources/views/components/button.blade.php", "<b>Click me</b>\n")?;

    let output = test.localize_command().arg("resources").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("resources/views/components/button.blade.php")?,
        "<b>Click me</b>\n"
    );
    assert_eq!(
        test.read_file("lang/zh_HK.json")?,
        "{\n    \"Welcome\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_without_project_root_keys_are_printed() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("views/home.blade.php", "<h1>Welcome</h1>\n")?;

    let output = test.localize_command().arg("views").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("project root not found"));

    let out = stdout(&output);
    assert!(out.contains("--- New keys for zh_HK.json ---\n{\n    \"Welcome\": \"\"\n}\n"));
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_languages_from_project_locales() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".env", "APP_NAME=Demo\nAPP_LOCALE=\"en\"\n")?;
    test.write_file(
        "config/locales.php",
        r#"<?php
return [
    'language_segment' => [
        'en' => ['locale' => 'en', 'name' => 'English'],
        'fr' => ['locale' => 'fr', 'name' => 'Français'],
    ],
];
"#,
    )?;
    test.write_file("resources/views/home.blade.php", "<h1>Welcome</h1>\n")?;

    let output = test.localize_command().arg("resources/views").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("lang/fr.json")?, "{\n    \"Welcome\": \"\"\n}\n");
    assert!(!test.root().join("lang/zh_HK.json").exists());

    Ok(())
}

#[test]
fn test_cli_languages_override_config() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file(".bladelocrc.json", r#"{ "targetLanguages": ["de"] }"#)?;
    test.write_file("resources/views/home.blade.php", "<h1>Welcome</h1>\n")?;

    let output = test
        .localize_command()
        .args(["--target-language", "ja", "resources/views"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("lang/ja.json").exists());
    assert!(!test.root().join("lang/de.json").exists());

    Ok(())
}

#[test]
fn test_invalid_language_setup_is_an_error() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/home.blade.php", "<h1>Welcome</h1>\n")?;

    let output = test
        .localize_command()
        .args(["--target-language", "en", "resources/views"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("must not contain the source language"));

    Ok(())
}

#[test]
fn test_missing_explicit_config_is_an_error() -> Result<()> {
    let test = CliTest::laravel()?;
    test.write_file("resources/views/home.blade.php", "<h1>Welcome</h1>\n")?;

    let output = test
        .localize_command()
        .args(["--config", "nope.json", "resources/views"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Config file not found"));

    Ok(())
}
