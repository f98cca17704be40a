//! Binary-level tests for the `scaffy` command.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `scaffy` command isolated from the user's environment and config.
fn scaffy(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scaffy").unwrap();
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SCAFFY_AUTHOR")
        .env_remove("SCAFFY_LOG_LEVEL")
        .env_remove("SCAFFY_OUTPUT_DIR")
        .env_remove("SCAFFY_TEMPLATES_DIR");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_creates_default_languages() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["new", "myapp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project \"myapp\" created at"));

    let project = tmp.path().join("myapp");
    for file in ["myapp.go", "myapp.c", "myapp.py", "myapp.js"] {
        assert!(project.join(file).is_file(), "{file}");
    }
    let go = fs::read_to_string(project.join("myapp.go")).unwrap();
    assert!(go.contains("package main"));
}

#[test]
fn new_twice_fails_and_suggests_force() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path()).args(["new", "myapp"]).assert().success();

    scaffy(tmp.path())
        .args(["new", "myapp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("target directory already exists"))
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn force_reuses_existing_directory() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("myapp");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("README.md"), "# hi\n").unwrap();

    scaffy(tmp.path())
        .args(["new", "myapp", "--force", "--lang", "go=go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force is set"));

    assert!(project.join("README.md").is_file());
    assert!(project.join("myapp.go").is_file());
}

#[test]
fn flags_override_languages_author_and_output() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args([
            "new",
            "tool",
            "--lang",
            "rust=rs",
            "--author",
            "Ada Lovelace",
            "--output-dir",
            "projects",
        ])
        .assert()
        .success();

    let project = tmp.path().join("projects").join("tool");
    let entries: Vec<_> = fs::read_dir(&project).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let rust = fs::read_to_string(project.join("tool.rs")).unwrap();
    assert!(rust.contains("Author: Ada Lovelace"));
}

#[test]
fn missing_template_rolls_back() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["new", "myapp", "--lang", "go=go,cobol=cbl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no template found for language 'cobol'"))
        .stderr(predicate::str::contains("all created files have been cleaned up"));

    assert!(!tmp.path().join("myapp").exists());
}

#[test]
fn custom_templates_dir() {
    let tmp = TempDir::new().unwrap();
    let templates = tmp.path().join("tpl");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("go.tmpl"), "// custom by {{ author }}\n").unwrap();

    scaffy(tmp.path())
        .args(["new", "app", "-l", "go=go", "-a", "Grace", "--templates-dir", "tpl"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(tmp.path().join("app/app.go")).unwrap(),
        "// custom by Grace\n"
    );
}

#[test]
fn invalid_project_name() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["new", "!!!"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn malformed_lang_flag_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["new", "myapp", "--lang", "python"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=EXT"));
}

#[test]
fn init_writes_config_once() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["init", "--author", "Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created at"));

    let written = fs::read_to_string(tmp.path().join("scaffy.json")).unwrap();
    assert!(written.contains("\"author\": \"Ada\""));
    assert!(written.contains("\"log_level\": \"error\""));

    scaffy(tmp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config already exists"));

    scaffy(tmp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn init_into_directory() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["init", "conf/scaffy"])
        .assert()
        .success();
    assert!(tmp.path().join("conf/scaffy/scaffy.json").is_file());
}

#[test]
fn local_config_and_env_are_layered() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("scaffy.json"),
        r#"{ "author": "File Author", "languages": { "python": "py" } }"#,
    )
    .unwrap();

    scaffy(tmp.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File Author"))
        .stdout(predicate::str::contains("\"python\": \"py\""))
        .stdout(predicate::str::contains("\"go\"").not());

    scaffy(tmp.path())
        .env("SCAFFY_AUTHOR", "Env Author")
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Env Author"));
}

#[test]
fn config_file_flag_must_exist() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["--config", "missing.json", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_log_level_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .env("SCAFFY_LOG_LEVEL", "chatty")
        .args(["new", "myapp"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("log_level"));
    assert!(!tmp.path().join("myapp").exists());
}

#[test]
fn config_path_points_at_user_config_dir() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffy.json"));
}

#[test]
fn no_color_accepts_conventional_values() {
    let tmp = TempDir::new().unwrap();
    for value in ["1", "0", "true"] {
        scaffy(tmp.path())
            .env("NO_COLOR", value)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("scaffy.json"));
    }
}

#[test]
fn init_stores_log_level() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["init", "--log-level", "DEBUG"])
        .assert()
        .success();

    let written = fs::read_to_string(tmp.path().join("scaffy.json")).unwrap();
    assert!(written.contains("\"log_level\": \"debug\""), "{written}");
}

#[test]
fn init_rejects_unknown_log_level() {
    let tmp = TempDir::new().unwrap();
    scaffy(tmp.path())
        .args(["init", "--log-level", "chatty"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("log_level"));
    assert!(!tmp.path().join("scaffy.json").exists());
}

#[test]
fn config_templates_dir_is_relative_to_the_file() {
    let tmp = TempDir::new().unwrap();
    let conf = tmp.path().join("conf");
    fs::create_dir_all(conf.join("tpl")).unwrap();
    fs::write(conf.join("tpl/go.tmpl"), "// from conf\n").unwrap();
    fs::write(
        conf.join("scaffy.json"),
        r#"{ "templates_dir": "tpl", "languages": { "go": "go" } }"#,
    )
    .unwrap();

    scaffy(tmp.path())
        .args(["--config", "conf/scaffy.json", "new", "app"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(tmp.path().join("app/app.go")).unwrap(),
        "// from conf\n"
    );
}

#[test]
fn init_pins_relative_templates_dir() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("tpl")).unwrap();

    scaffy(tmp.path())
        .args(["init", "conf", "--templates-dir", "tpl"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("conf/scaffy.json")).unwrap())
            .unwrap();
    let stored = Path::new(written["templates_dir"].as_str().unwrap());
    assert!(stored.is_absolute());
    assert!(stored.ends_with("tpl"));
}
