//! 命令行集成测试

use assert_cmd::Command;
use predicates::prelude::*;

const ENV_VARS: &[&str] = &[
    "TRANSGATE_MODE",
    "TRANSGATE_PROVIDERS",
    "TRANSGATE_CONFIG",
    "USE_MOCK",
    "USE_MYMEMORY",
    "RUST_LOG",
];

/// 在临时目录中运行，避免读到工作区的配置文件
fn transgate() -> Command {
    let dir = std::env::temp_dir().join("transgate-cli-tests");
    std::fs::create_dir_all(&dir).unwrap();

    let mut cmd = Command::cargo_bin("transgate").unwrap();
    cmd.current_dir(dir).env("TRANSGATE_MOCK_DELAY_MS", "0");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_translate_offline_mode() {
    transgate()
        .args(["translate", "hello", "--target", "es", "--mode", "mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success": true"#))
        .stdout(predicate::str::contains(r#""translatedText": "hola""#))
        .stdout(predicate::str::contains(r#""detectedSourceLanguage": "en""#));
}

#[test]
fn test_translate_mode_from_env() {
    transgate()
        .env("USE_MOCK", "true")
        .args(["translate", "hello", "--target", "ja"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DEMO Translation to ja] hello"));
}

#[test]
fn test_translate_rejects_blank_text() {
    transgate()
        .args(["translate", "   ", "--target", "es", "--mode", "mock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing required fields: text and targetLanguage",
        ));
}

#[test]
fn test_unknown_mode_rejected() {
    transgate()
        .args(["translate", "hello", "--target", "es", "--mode", "race"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode"));
}

#[test]
fn test_env_docs_lists_variables() {
    transgate()
        .arg("env-docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("GOOGLE_API_KEY"))
        .stdout(predicate::str::contains("TRANSGATE_MODE"));
}

#[test]
fn test_example_config_hides_secrets() {
    transgate()
        .env("GOOGLE_API_KEY", "very-secret-key")
        .args(["example-config", "--mode", "google"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"mode = "google""#))
        .stdout(predicate::str::contains("very-secret-key").not());
}

#[test]
fn test_blank_api_keys_are_treated_as_unset() {
    transgate()
        .env("GOOGLE_API_KEY", "")
        .env("LIBRETRANSLATE_API_KEY", "  ")
        .args(["translate", "hello", "--target", "es", "--mode", "mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""translatedText": "hola""#));
}

#[test]
fn test_google_without_key_reports_failure() {
    transgate()
        .env("GOOGLE_API_KEY", "")
        .env("TRANSGATE_GOOGLE_URL", "http://127.0.0.1:9/translate")
        .args(["translate", "hello", "--target", "es", "--mode", "google"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""success": false"#))
        .stdout(predicate::str::contains("Google API key is not configured"));
}

#[test]
fn test_mode_flag_ignores_env_selection() {
    transgate()
        .env("TRANSGATE_MODE", "bogus")
        .env("TRANSGATE_PROVIDERS", "google")
        .env("USE_MYMEMORY", "true")
        .args(["translate", "hello", "--target", "es", "--mode", "mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""translatedText": "hola""#));
}
