use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analytics endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://apianalytics-server.com/api/data";
/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "admissions.conf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// # Admissions Configuration
///
/// Every field is optional so that partial layers (a config file, environment
/// variables, CLI flags) can be merged on top of each other. The accessor
/// methods resolve the built-in defaults.
///
/// Parsing with `clap` reads the flag first and the `ADMISSIONS_*` variable
/// second; a value that does not parse is a usage error, not an unset field.
#[derive(Parser, Default, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[command(about = "Admissions analytics settings", version)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionsConfig {
    #[arg(long, env = "ADMISSIONS_ENDPOINT", global = true, help = "Absolute URL of the analytics endpoint.")]
    pub endpoint: Option<String>,

    #[arg(
        long,
        env = "ADMISSIONS_AUTH_TOKEN",
        global = true,
        hide_env_values = true,
        help = "Value sent in the X-AUTH-TOKEN header. No header is sent when unset."
    )]
    pub auth_token: Option<String>,

    #[arg(long, env = "ADMISSIONS_TIMEOUT_SECS", global = true, help = "Request timeout in seconds.")]
    pub timeout_secs: Option<u64>,

    #[arg(long, env = "ADMISSIONS_MAX_RETRIES", global = true, help = "Retries on transient failures. Unset or 0 means a single request.")]
    pub max_retries: Option<u32>,

    #[arg(long, env = "ADMISSIONS_FALLBACK_SEED", global = true, help = "Seed for the synthetic fallback generator.")]
    pub fallback_seed: Option<u64>,

    #[arg(long, env = "ADMISSIONS_LOG_LEVEL", global = true, help = "tracing filter directive, e.g. info or lib_admissions=debug.")]
    pub log_level: Option<String>,

    #[arg(long, env = "ADMISSIONS_LOG_DIR", global = true, help = "Directory for JSON log files. Console only when unset.")]
    pub log_dir: Option<PathBuf>,
}

impl AdmissionsConfig {
    /// The built-in defaults layer.
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            max_retries: Some(0),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            ..Default::default()
        }
    }

    /// Merge two configs, where `other` overrides `self` for `Some` values.
    pub fn merge(self, other: AdmissionsConfig) -> AdmissionsConfig {
        AdmissionsConfig {
            endpoint: other.endpoint.or(self.endpoint),
            auth_token: other.auth_token.or(self.auth_token),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            max_retries: other.max_retries.or(self.max_retries),
            fallback_seed: other.fallback_seed.or(self.fallback_seed),
            log_level: other.log_level.or(self.log_level),
            log_dir: other.log_dir.or(self.log_dir),
        }
    }

    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(0)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Resolves the effective configuration.
///
/// Layers, lowest precedence first:
/// 1. [`AdmissionsConfig::defaults`]
/// 2. the JSON file at `file`, or [`DEFAULT_CONFIG_FILE`] when `file` is `None`
///    and that file exists
/// 3. `overrides` (environment variables and CLI flags, already parsed by the caller)
///
/// An explicitly named file must exist; the implicit default file is optional.
pub fn load_config(
    file: Option<&Path>,
    overrides: AdmissionsConfig,
) -> Result<AdmissionsConfig, ConfigError> {
    let mut current = AdmissionsConfig::defaults();

    match file {
        Some(path) => {
            current = current.merge(AdmissionsConfig::from_file(path)?);
        }
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_FILE);
            if implicit.is_file() {
                current = current.merge(AdmissionsConfig::from_file(implicit)?);
            }
        }
    }

    Ok(current.merge(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_resolve_without_any_layer() {
        let config = AdmissionsConfig::default();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries(), 0);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn merge_prefers_the_overriding_layer() {
        let base = AdmissionsConfig {
            endpoint: Some("https://base.example/api".into()),
            auth_token: Some("base-token".into()),
            timeout_secs: Some(30),
            ..Default::default()
        };
        let overrides = AdmissionsConfig {
            auth_token: Some("cli-token".into()),
            fallback_seed: Some(42),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.endpoint(), "https://base.example/api");
        assert_eq!(merged.auth_token.as_deref(), Some("cli-token"));
        assert_eq!(merged.timeout_secs, Some(30));
        assert_eq!(merged.fallback_seed, Some(42));
    }

    #[test]
    fn explicit_file_sits_between_defaults_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "endpoint": "https://file.example/data", "timeoutSecs": 3, "logLevel": "debug" }}"#
        )
        .unwrap();

        let overrides = AdmissionsConfig {
            log_level: Some("warn".into()),
            ..Default::default()
        };
        let config = load_config(Some(file.path()), overrides).unwrap();

        assert_eq!(config.endpoint(), "https://file.example/data");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.max_retries(), 0);
    }

    #[test]
    fn flags_parse_into_an_override_layer() {
        let parsed = AdmissionsConfig::try_parse_from([
            "admissions",
            "--endpoint",
            "https://cli.example/data",
            "--timeout-secs",
            "4",
            "--fallback-seed",
            "9",
        ])
        .unwrap();

        assert_eq!(parsed.endpoint.as_deref(), Some("https://cli.example/data"));
        assert_eq!(parsed.timeout_secs, Some(4));
        assert_eq!(parsed.fallback_seed, Some(9));

        let merged = AdmissionsConfig::defaults().merge(parsed);
        assert_eq!(merged.timeout(), Duration::from_secs(4));
    }

    #[test]
    fn unparsable_numbers_are_rejected() {
        let result = AdmissionsConfig::try_parse_from(["admissions", "--timeout-secs", "abc"]);
        assert!(result.is_err());

        let result = AdmissionsConfig::try_parse_from(["admissions", "--max-retries", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.conf");
        let result = load_config(Some(&missing), AdmissionsConfig::default());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "endpoint = nope").unwrap();
        let result = AdmissionsConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
