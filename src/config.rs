//! Site mover configuration: recognized options, loading, accessors.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an alternative source file.
pub const CONFIG_PATH_ENV: &str = "LSM_CONFIG";

/// Source file consulted when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/lsm/lsm.conf";

/// The recognized configuration options.
///
/// The set is fixed: every option is required, and [`SiteMoverConfig::load`]
/// rejects a source that leaves any of them unset. `as_str` returns the
/// canonical key name as written in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Path to the xrd data-movement client executable.
    Xrd,
    /// Path to the xrdcp copy client executable.
    Xrdcp,
    /// Path to the xrdadler32 checksum utility executable.
    Xrdadler32,
    /// Library search path for the client runtimes.
    LdPath,
    /// host:port of the storage redirector.
    Redirector,
    /// SRM front-end URL prefix template.
    SrmPrefix,
    /// Storage base path from the worker-node perspective.
    DfPath,
    /// Virtual mapping string (`host:localpath=remotepath`), passed
    /// verbatim to xrdadler32 for remote checksums.
    XrdVmp,
    /// Directory for site mover log output.
    LogDir,
}

impl ConfigKey {
    /// Every recognized option, in source-file order.
    pub const ALL: [ConfigKey; 9] = [
        Self::Xrd,
        Self::Xrdcp,
        Self::Xrdadler32,
        Self::LdPath,
        Self::Redirector,
        Self::SrmPrefix,
        Self::DfPath,
        Self::XrdVmp,
        Self::LogDir,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xrd => "XRD",
            Self::Xrdcp => "XRDCP",
            Self::Xrdadler32 => "XRDADLER32",
            Self::LdPath => "LDPATH",
            Self::Redirector => "RDR",
            Self::SrmPrefix => "SRMPREFIX",
            Self::DfPath => "DFPATH",
            Self::XrdVmp => "XRD_VMP",
            Self::LogDir => "LOGDIR",
        }
    }

    /// Match a canonical key name (case-sensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "XRD" => Some(Self::Xrd),
            "XRDCP" => Some(Self::Xrdcp),
            "XRDADLER32" => Some(Self::Xrdadler32),
            "LDPATH" => Some(Self::LdPath),
            "RDR" => Some(Self::Redirector),
            "SRMPREFIX" => Some(Self::SrmPrefix),
            "DFPATH" => Some(Self::DfPath),
            "XRD_VMP" => Some(Self::XrdVmp),
            "LOGDIR" => Some(Self::LogDir),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw parse target. Every field is optional here so that validation can
/// name the exact missing key instead of surfacing a serde message.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "XRD")]
    xrd: Option<String>,
    #[serde(rename = "XRDCP")]
    xrdcp: Option<String>,
    #[serde(rename = "XRDADLER32")]
    xrdadler32: Option<String>,
    #[serde(rename = "LDPATH")]
    ld_path: Option<String>,
    #[serde(rename = "RDR")]
    redirector: Option<String>,
    #[serde(rename = "SRMPREFIX")]
    srm_prefix: Option<String>,
    #[serde(rename = "DFPATH")]
    df_path: Option<String>,
    #[serde(rename = "XRD_VMP")]
    xrd_vmp: Option<String>,
    #[serde(rename = "LOGDIR")]
    log_dir: Option<String>,
}

impl RawConfig {
    fn into_config(self) -> Result<SiteMoverConfig> {
        fn require(value: Option<String>, key: ConfigKey) -> Result<String> {
            value.ok_or(ConfigError::MissingValue(key.as_str()))
        }

        Ok(SiteMoverConfig {
            xrd: require(self.xrd, ConfigKey::Xrd)?,
            xrdcp: require(self.xrdcp, ConfigKey::Xrdcp)?,
            xrdadler32: require(self.xrdadler32, ConfigKey::Xrdadler32)?,
            ld_path: require(self.ld_path, ConfigKey::LdPath)?,
            redirector: require(self.redirector, ConfigKey::Redirector)?,
            srm_prefix: require(self.srm_prefix, ConfigKey::SrmPrefix)?,
            df_path: require(self.df_path, ConfigKey::DfPath)?,
            xrd_vmp: require(self.xrd_vmp, ConfigKey::XrdVmp)?,
            log_dir: require(self.log_dir, ConfigKey::LogDir)?,
        })
    }
}

/// Immutable site mover configuration.
///
/// Constructed by [`load`](Self::load) or [`parse`](Self::parse), complete
/// by construction: every recognized option is present, or loading failed.
/// Values are kept byte-for-byte as written in the source; any further
/// interpretation (splitting the virtual mapping string, resolving the SRM
/// template) belongs to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMoverConfig {
    xrd: String,
    xrdcp: String,
    xrdadler32: String,
    ld_path: String,
    redirector: String,
    srm_prefix: String,
    df_path: String,
    xrd_vmp: String,
    log_dir: String,
}

impl SiteMoverConfig {
    /// Load configuration from a source file.
    ///
    /// Fails with [`ConfigError::Io`] if the file is unreadable, with
    /// [`ConfigError::Parse`] if it is not flat `NAME = "value"` text, and
    /// with [`ConfigError::MissingValue`] naming the first required option
    /// that is unset. No partial store is ever returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading site mover configuration");
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!(
            path = %path.display(),
            options = ConfigKey::ALL.len(),
            "site mover configuration loaded"
        );
        Ok(config)
    }

    /// Load from the path named by `LSM_CONFIG`, or `/etc/lsm/lsm.conf`.
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path())
    }

    /// Resolve the default source path (env override, then `/etc`).
    pub fn default_path() -> PathBuf {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Parse configuration from in-memory source text.
    ///
    /// The source format is a flat sequence of `NAME = "value"` lines
    /// (single or double quotes), with `#` comments and blank lines
    /// ignored. Unrecognized keys are ignored; missing recognized keys are
    /// an error. Values are stored verbatim, reserved characters included.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        raw.into_config()
    }

    /// Look up an option by its canonical key name.
    ///
    /// Fails with [`ConfigError::UnknownKey`] for names outside the
    /// recognized set. Recognized names never fail: the store is complete
    /// by construction.
    pub fn get(&self, name: &str) -> Result<&str> {
        let key = ConfigKey::parse(name)
            .ok_or_else(|| ConfigError::UnknownKey(name.to_string()))?;
        Ok(self.value(key))
    }

    /// Look up an option by key.
    pub fn value(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Xrd => &self.xrd,
            ConfigKey::Xrdcp => &self.xrdcp,
            ConfigKey::Xrdadler32 => &self.xrdadler32,
            ConfigKey::LdPath => &self.ld_path,
            ConfigKey::Redirector => &self.redirector,
            ConfigKey::SrmPrefix => &self.srm_prefix,
            ConfigKey::DfPath => &self.df_path,
            ConfigKey::XrdVmp => &self.xrd_vmp,
            ConfigKey::LogDir => &self.log_dir,
        }
    }

    /// All options in declaration order, for diagnostics output.
    pub fn entries(&self) -> impl Iterator<Item = (ConfigKey, &str)> + '_ {
        ConfigKey::ALL.iter().map(move |&key| (key, self.value(key)))
    }

    /// Path to the xrd data-movement client executable.
    pub fn xrd(&self) -> &str {
        &self.xrd
    }

    /// Path to the xrdcp copy client executable.
    pub fn xrdcp(&self) -> &str {
        &self.xrdcp
    }

    /// Path to the xrdadler32 checksum utility executable.
    pub fn xrdadler32(&self) -> &str {
        &self.xrdadler32
    }

    /// Library search path for the client runtimes (`LD_LIBRARY_PATH`).
    pub fn ld_path(&self) -> &str {
        &self.ld_path
    }

    /// host:port of the storage redirector.
    pub fn redirector(&self) -> &str {
        &self.redirector
    }

    /// SRM front-end URL prefix template.
    pub fn srm_prefix(&self) -> &str {
        &self.srm_prefix
    }

    /// Storage base path from the worker-node perspective.
    pub fn df_path(&self) -> &str {
        &self.df_path
    }

    /// Virtual mapping string for remote checksums, unparsed.
    pub fn xrd_vmp(&self) -> &str {
        &self.xrd_vmp
    }

    /// Directory for site mover log output.
    pub fn log_dir(&self) -> &str {
        &self.log_dir
    }

    /// Probe the deployment the configuration points at.
    ///
    /// Checks that the three client executables exist and that the log
    /// directory is present, warning for each missing artifact and
    /// returning the findings. `load` itself touches nothing but the
    /// source file; callers opt into this extra filesystem access.
    pub fn check_deployment(&self) -> Vec<String> {
        let mut findings = Vec::new();

        let executables = [
            (ConfigKey::Xrd, &self.xrd),
            (ConfigKey::Xrdcp, &self.xrdcp),
            (ConfigKey::Xrdadler32, &self.xrdadler32),
        ];
        for (key, path) in executables {
            if !Path::new(path).is_file() {
                let finding = format!("{key} executable not found: {path}");
                warn!("{}", finding);
                findings.push(finding);
            }
        }

        if !Path::new(&self.log_dir).is_dir() {
            let finding = format!("{} directory missing: {}", ConfigKey::LogDir, self.log_dir);
            warn!("{}", finding);
            findings.push(finding);
        }

        findings
    }
}
