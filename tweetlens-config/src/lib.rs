//! Loader for tweetlens configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are added, and `TWEETLENS_`-prefixed
//! environment variables are applied last so they always win. Nested keys use
//! `__`, e.g. `TWEETLENS_LOGGING__FILTER=debug`. String values may reference
//! other environment variables as `${VAR}`.
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tweetlens_common::observability::{LogConfig, LogFormat};
use tweetlens_common::{OutputFormat, Result, TweetlensError};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "TWEETLENS";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TweetlensConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub version: Option<String>,
    /// Tweet fixture used when the command line does not name one.
    #[serde(deserialize_with = "scalar_path")]
    pub input: Option<PathBuf>,
    pub output: OutputFormat,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter, overridden by `RUST_LOG`.
    pub filter: String,
    pub format: LogFormat,
    /// Mirror log events to stderr.
    pub stderr: bool,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
            stderr: false,
            dir: None,
        }
    }
}

/// YAML and `try_parsing` turn `version: 1` or `TWEETLENS_VERSION=2` into
/// numbers; accept any scalar where a string is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(d)?.map(String::from))
}

fn scalar_path<'de, D>(d: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_string(d)?.map(PathBuf::from))
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => break,
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn config_error(e: impl std::fmt::Display) -> TweetlensError {
    TweetlensError::Config(e.to_string())
}

/// Builder over the `config` crate wiring (YAML files, inline YAML, env overrides).
pub struct TweetlensConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TweetlensConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetlensConfigLoader {
    /// Start with no file sources; environment overrides are always applied on load.
    ///
    /// ```
    /// use tweetlens_common::OutputFormat;
    /// use tweetlens_config::TweetlensConfigLoader;
    ///
    /// let config = TweetlensConfigLoader::new().load().expect("defaults load");
    /// assert!(config.input.is_none());
    /// assert_eq!(config.output, OutputFormat::Text);
    /// assert_eq!(config.logging.filter, "info");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a config file that must exist; the format is inferred from its suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a config file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use tweetlens_common::OutputFormat;
    /// use tweetlens_config::TweetlensConfigLoader;
    ///
    /// let cfg = TweetlensConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// input: "tweets.json"
    /// output: json
    /// logging:
    ///   filter: debug
    ///   stderr: true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("1"));
    /// assert_eq!(cfg.output, OutputFormat::Json);
    /// assert_eq!(cfg.logging.filter, "debug");
    /// assert!(cfg.logging.stderr);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Merge all sources, apply environment overrides, expand `${VAR}`
    /// placeholders, and deserialize into [`TweetlensConfig`].
    ///
    /// Every failure (missing required file, bad YAML, schema mismatch) is
    /// reported as [`TweetlensError::Config`].
    pub fn load(self) -> Result<TweetlensConfig> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        let mut v: Value = cfg.try_deserialize().map_err(config_error)?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(config_error)
    }
}
