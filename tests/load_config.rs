use std::fs;
use std::path::Path;

use lsm_config::{ConfigError, ConfigKey, SiteMoverConfig, DEFAULT_CONFIG_PATH};
use tempfile::TempDir;

const FULL_SOURCE: &str = r#"
#
# Configuration options for the local site mover
#
# PATH to the xrd executable
XRD = '/cluster/xrootd/bin/xrd'
# PATH to the xrdcp executable
XRDCP = '/cluster/xrootd/bin/xrdcp'
# PATH to the xrdadler32 executable
XRDADLER32 = '/cluster/xrootd/bin/xrdadler32'
# PATH to the xrootd library directory
LDPATH = '/cluster/xrootd/lib'
# The redirector
RDR = 'xrdb.local:1094'
# SRM prefix for files
SRMPREFIX = 'srm://gk03.example.org:8443/srm/v2/server?SFN='
# Base path for storage from the WN perspective
DFPATH = '/xrd'
# Virtual mapping path, used for remote adler32 checksums
XRD_VMP = 'xrdb:/xrd=/xrd'
# Logging directory
LOGDIR = '/var/log/lsm'
"#;

fn write_source(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("lsm.conf");
    fs::write(&path, content).expect("write config source");
    path
}

#[test]
fn load_returns_literal_values_for_every_option() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_source(&dir, FULL_SOURCE);

    let config = SiteMoverConfig::load(&path).expect("load full source");

    let expected = [
        ("XRD", "/cluster/xrootd/bin/xrd"),
        ("XRDCP", "/cluster/xrootd/bin/xrdcp"),
        ("XRDADLER32", "/cluster/xrootd/bin/xrdadler32"),
        ("LDPATH", "/cluster/xrootd/lib"),
        ("RDR", "xrdb.local:1094"),
        ("SRMPREFIX", "srm://gk03.example.org:8443/srm/v2/server?SFN="),
        ("DFPATH", "/xrd"),
        ("XRD_VMP", "xrdb:/xrd=/xrd"),
        ("LOGDIR", "/var/log/lsm"),
    ];
    for (name, value) in expected {
        assert_eq!(config.get(name).expect(name), value, "option {name}");
    }
}

#[test]
fn every_option_is_required() {
    let dir = TempDir::new().expect("create temp dir");

    for key in ConfigKey::ALL {
        // Drop exactly one assignment; "XRD " must not also match XRDCP.
        let assignment = format!("{} =", key.as_str());
        let truncated: String = FULL_SOURCE
            .lines()
            .filter(|line| !line.trim_start().starts_with(&assignment))
            .collect::<Vec<_>>()
            .join("\n");
        let path = write_source(&dir, &truncated);

        let err = SiteMoverConfig::load(&path)
            .expect_err("source missing an option must not load");
        match err {
            ConfigError::MissingValue(name) => assert_eq!(name, key.as_str()),
            other => panic!("expected MissingValue for {key}, got {other:?}"),
        }
    }
}

#[test]
fn unreadable_source_is_an_io_error() {
    let dir = TempDir::new().expect("create temp dir");
    let missing = dir.path().join("no-such-file.conf");

    let err = SiteMoverConfig::load(&missing).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn reload_is_deterministic() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_source(&dir, FULL_SOURCE);

    let first = SiteMoverConfig::load(&path).expect("first load");
    let second = SiteMoverConfig::load(&path).expect("second load");
    assert_eq!(first, second);
}

#[test]
fn comments_and_blank_lines_produce_no_entries() {
    let dir = TempDir::new().expect("create temp dir");
    let noisy = format!("# leading comment\n\n{FULL_SOURCE}\n\n# trailing comment\n");
    let path = write_source(&dir, &noisy);

    let config = SiteMoverConfig::load(&path).expect("load noisy source");
    assert_eq!(config.entries().count(), ConfigKey::ALL.len());
}

#[test]
fn unrecognized_source_keys_are_ignored() {
    let dir = TempDir::new().expect("create temp dir");
    let extended = format!("{FULL_SOURCE}\nSITE_LOCAL_EXTRA = 'anything'\n");
    let path = write_source(&dir, &extended);

    let config = SiteMoverConfig::load(&path).expect("load extended source");
    assert!(matches!(
        config.get("SITE_LOCAL_EXTRA"),
        Err(ConfigError::UnknownKey(_))
    ));
}

#[test]
fn double_quoted_values_load_too() {
    let dir = TempDir::new().expect("create temp dir");
    let double_quoted = FULL_SOURCE.replace('\'', "\"");
    let path = write_source(&dir, &double_quoted);

    let config = SiteMoverConfig::load(&path).expect("load double-quoted source");
    assert_eq!(config.redirector(), "xrdb.local:1094");
}

#[test]
fn default_path_honors_env_override() {
    // Single test owns the env var; nothing else in the suite reads it.
    std::env::remove_var("LSM_CONFIG");
    assert_eq!(
        SiteMoverConfig::default_path(),
        Path::new(DEFAULT_CONFIG_PATH)
    );

    let dir = TempDir::new().expect("create temp dir");
    let path = write_source(&dir, FULL_SOURCE);
    std::env::set_var("LSM_CONFIG", &path);

    assert_eq!(SiteMoverConfig::default_path(), path);
    let config = SiteMoverConfig::load_default().expect("load via env override");
    assert_eq!(config.df_path(), "/xrd");

    std::env::remove_var("LSM_CONFIG");
}

#[test]
fn check_deployment_reports_missing_artifacts() {
    let dir = TempDir::new().expect("create temp dir");

    // Point the log dir at something real and the executables at nothing.
    let log_dir = dir.path().join("log");
    fs::create_dir(&log_dir).expect("create log dir");
    let source = FULL_SOURCE.replace("/var/log/lsm", log_dir.to_str().expect("utf8 path"));
    let path = write_source(&dir, &source);

    let config = SiteMoverConfig::load(&path).expect("load source");
    let findings = config.check_deployment();
    assert_eq!(findings.len(), 3, "three missing executables: {findings:?}");
    assert!(findings.iter().all(|f| f.contains("executable not found")));
}
