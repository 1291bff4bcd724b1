mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tempfile::tempdir;

use ram::cli::CliArgs;
use ram::config::duration::parse_duration;
use ram::config::settings::{DEFAULT_DEPTH, DEFAULT_IDLE_TIMEOUT};
use ram::config::{ConfigFile, Settings, discover, load_and_validate, load_from_path};
use ram::errors::RamError;
use ram::types::Operation;

type TestResult = Result<(), Box<dyn Error>>;

fn cli(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("ram").chain(args.iter().copied())).unwrap()
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn defaults_without_flags_or_file() -> TestResult {
    init_tracing();
    let settings = Settings::resolve(&cli(&[]), None)?;

    assert_eq!(settings.directories, vec![PathBuf::from(".")]);
    assert_eq!(settings.depth, DEFAULT_DEPTH);
    assert_eq!(settings.events, Operation::CREATE | Operation::WRITE);
    assert_eq!(settings.idle_timeout, DEFAULT_IDLE_TIMEOUT);
    assert_eq!(settings.idle_timeout, Duration::from_secs(600));
    assert_eq!(settings.program, strings(&["go", "test"]));
    assert_eq!(settings.args, strings(&["./${dir}"]));
    assert!(settings.exclude.is_empty());
    assert_eq!(settings.log.level, None);
    Ok(())
}

#[test]
fn cli_flags_are_applied() -> TestResult {
    let args = cli(&[
        "-d", "cmd", "-d", "internal", "-L", "2", "-e", "create,remove", "-x", "gen/,*.pb.go",
        "--idle-timeout", "90s", "-v", "--", "-count=1", "--", "-race",
    ]);

    let settings = Settings::resolve(&args, None)?;

    assert_eq!(
        settings.directories,
        vec![PathBuf::from("cmd"), PathBuf::from("internal")]
    );
    assert_eq!(settings.depth, 2);
    assert_eq!(settings.events, Operation::CREATE | Operation::REMOVE);
    assert_eq!(settings.exclude, strings(&["gen/", "*.pb.go"]));
    assert_eq!(settings.idle_timeout, Duration::from_secs(90));
    assert_eq!(settings.args, strings(&["-count=1", "-race", "./${dir}"]));
    assert_eq!(settings.log.level, Some(tracing::Level::DEBUG));
    Ok(())
}

#[test]
fn log_level_flag_beats_verbose_and_quiet() {
    let args = cli(&["-v", "-q", "--log-level", "error"]);
    assert_eq!(
        Settings::resolve(&args, None).unwrap().log.level,
        Some(tracing::Level::ERROR)
    );

    let args = cli(&["-q"]);
    assert_eq!(
        Settings::resolve(&args, None).unwrap().log.level,
        Some(tracing::Level::WARN)
    );
}

#[test]
fn unknown_event_name_is_rejected_by_the_cli() {
    let parsed = CliArgs::try_parse_from(["ram", "-e", "explode"]);
    assert!(parsed.is_err());
}

#[test]
fn zero_idle_timeout_is_rejected() {
    let err = Settings::resolve(&cli(&["--idle-timeout", "0s"]), None).unwrap_err();
    assert!(matches!(err, RamError::ConfigError(_)));
}

#[test]
fn file_values_fill_in_when_flags_are_absent() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join(".ram.toml");
    fs::write(
        &path,
        r#"
[watch]
directories = ["svc"]
depth = 3
exclude = ["testdata/"]
events = ["write", "rename"]
idle_timeout = "1h30m"

[command]
program = ["gotestsum", "--"]
args = ["-short"]
target = "./${dir}/..."
"#,
    )?;

    let file = load_and_validate(&path)?;
    let settings = Settings::resolve(&cli(&[]), Some(file))?;

    assert_eq!(settings.directories, vec![PathBuf::from("svc")]);
    assert_eq!(settings.depth, 3);
    assert_eq!(settings.exclude, strings(&["testdata/"]));
    assert_eq!(settings.events, Operation::WRITE | Operation::RENAME);
    assert_eq!(settings.idle_timeout, Duration::from_secs(90 * 60));
    assert_eq!(settings.program, strings(&["gotestsum", "--"]));
    assert_eq!(settings.args, strings(&["-short", "./${dir}/..."]));
    Ok(())
}

#[test]
fn cli_flags_override_file_values() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("ram.toml");
    fs::write(
        &path,
        r#"
[watch]
directories = ["svc"]
depth = 3
exclude = ["testdata/"]
events = ["chmod"]
idle_timeout = "5m"

[command]
args = ["-short"]
"#,
    )?;

    let file = load_and_validate(&path)?;
    let args = cli(&[
        "-d", "api", "-L", "1", "-e", "write", "-x", "mocks/", "--idle-timeout", "30s", "--",
        "-v",
    ]);
    let settings = Settings::resolve(&args, Some(file))?;

    assert_eq!(settings.directories, vec![PathBuf::from("api")]);
    assert_eq!(settings.depth, 1);
    assert_eq!(settings.events, Operation::WRITE);
    assert_eq!(settings.idle_timeout, Duration::from_secs(30));
    // Excludes accumulate: file first, then CLI.
    assert_eq!(settings.exclude, strings(&["testdata/", "mocks/"]));
    assert_eq!(settings.args, strings(&["-v", "./${dir}"]));
    Ok(())
}

#[test]
fn empty_target_is_not_appended() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("ram.toml");
    fs::write(&path, "[command]\ntarget = \"\"\nargs = [\"${filepath}\"]\n")?;

    let settings = Settings::resolve(&cli(&[]), Some(load_and_validate(&path)?))?;

    assert_eq!(settings.args, strings(&["${filepath}"]));
    Ok(())
}

#[test]
fn invalid_files_are_reported() -> TestResult {
    let dir = tempdir()?;
    let cases = [
        ("[watch]\nidle_timeout = \"soon\"\n", "duration"),
        ("[watch]\nevents = [\"explode\"]\n", "event"),
        ("[watch]\ndirectories = []\n", "directories"),
        ("[watch]\nexclude = [\"[unclosed\"]\n", "pattern"),
        ("[command]\nprogram = [\"\"]\n", "program"),
    ];

    for (i, (contents, what)) in cases.iter().enumerate() {
        let path = dir.path().join(format!("bad{i}.toml"));
        fs::write(&path, contents)?;
        assert!(load_and_validate(&path).is_err(), "{what} should be rejected");
    }
    Ok(())
}

#[test]
fn unknown_keys_are_a_toml_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("ram.toml");
    fs::write(&path, "[watch]\ndepht = 3\n")?;

    assert!(matches!(load_from_path(&path), Err(RamError::TomlError(_))));
    Ok(())
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        discover(Some(missing.as_path())),
        Err(RamError::IoError(_))
    ));
}

#[test]
fn empty_file_is_all_defaults() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("ram.toml");
    fs::write(&path, "")?;

    let file: ConfigFile = load_and_validate(&path)?;
    let settings = Settings::resolve(&cli(&[]), Some(file))?;

    assert_eq!(settings, Settings::resolve(&cli(&[]), None)?);
    Ok(())
}

#[test]
fn durations_parse_with_units() {
    assert_eq!(parse_duration("50ms"), Ok(Duration::from_millis(50)));
    assert_eq!(parse_duration("90s"), Ok(Duration::from_secs(90)));
    assert_eq!(parse_duration("10m"), Ok(Duration::from_secs(600)));
    assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
    assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
    assert_eq!(parse_duration(" 5S "), Ok(Duration::from_secs(5)));

    for bad in ["", "10", "s", "10d", "-5s", "1.5s"] {
        assert!(parse_duration(bad).is_err(), "{bad:?} should not parse");
    }
}
