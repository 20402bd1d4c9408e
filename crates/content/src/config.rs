//! Resolver configuration
//!
//! Named constants for the wrapper codec and metadata resolver, loadable
//! from TOML so tests and deployments can override them.

use crate::error::{ContentError, Result};
use filekit_codec::{HashAlgorithm, DEFAULT_LINE_LENGTH, DEFAULT_SCHEME, PROBE_LEN};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// MIME type used when sniffing is unavailable or indeterminate.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Name given to content objects that were not named by the caller.
pub const DEFAULT_NAME: &str = "temp";

/// Configuration for content construction and metadata resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Label for unnamed content
    #[serde(default = "default_name")]
    pub default_name: String,

    /// Scheme written when wrapping raw buffers
    #[serde(default = "default_wrapper_scheme")]
    pub wrapper_scheme: String,

    /// Algorithm for content hashes and obfuscated names
    #[serde(
        default,
        serialize_with = "serialize_algorithm",
        deserialize_with = "deserialize_algorithm"
    )]
    pub hash_algorithm: HashAlgorithm,

    /// Characters per line in chunked base64 output
    #[serde(default = "default_line_length")]
    pub base64_line_length: usize,

    /// MIME type when sniffing cannot decide
    #[serde(default = "default_fallback_mime")]
    pub fallback_mime: String,

    /// Leading characters inspected when probing for a wrapper header
    #[serde(default = "default_probe_len")]
    pub wrapper_probe_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_name: default_name(),
            wrapper_scheme: default_wrapper_scheme(),
            hash_algorithm: HashAlgorithm::default(),
            base64_line_length: default_line_length(),
            fallback_mime: default_fallback_mime(),
            wrapper_probe_len: default_probe_len(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_wrapper_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_line_length() -> usize {
    DEFAULT_LINE_LENGTH
}

fn default_fallback_mime() -> String {
    FALLBACK_MIME.to_string()
}

fn default_probe_len() -> usize {
    PROBE_LEN
}

fn serialize_algorithm<S: Serializer>(
    algorithm: &HashAlgorithm,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(algorithm.name())
}

fn deserialize_algorithm<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<HashAlgorithm, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl ResolverConfig {
    /// Load configuration from a file path, a standard location, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        match config_path {
            Some(p) => load_config_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ContentError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would produce ungrammatical wrappers or empty output
    pub fn validate(&self) -> Result<()> {
        let scheme_ok = !self.wrapper_scheme.is_empty()
            && self.wrapper_scheme.chars().all(|c| c.is_ascii_alphanumeric());
        if !scheme_ok {
            return Err(ContentError::Config(format!(
                "wrapper_scheme must be non-empty and alphanumeric, got {:?}",
                self.wrapper_scheme
            )));
        }
        if self.base64_line_length == 0 {
            return Err(ContentError::Config("base64_line_length must be positive".into()));
        }
        if self.wrapper_probe_len == 0 {
            return Err(ContentError::Config("wrapper_probe_len must be positive".into()));
        }
        if !self.fallback_mime.contains('/') || self.fallback_mime.contains([',', ';']) {
            return Err(ContentError::Config(format!(
                "fallback_mime must be a bare type/subtype, got {:?}",
                self.fallback_mime
            )));
        }
        if self.default_name.is_empty() {
            return Err(ContentError::Config("default_name must not be empty".into()));
        }
        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".filekit.toml", "filekit.toml", ".config/filekit.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ResolverConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ContentError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    ResolverConfig::from_toml_str(&content)
        .map_err(|e| ContentError::Config(format!("{} ({})", e, path.display())))
}
