use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming an optional YAML config file for the server.
pub const CONFIG_ENV: &str = "COURIER_CONFIG";

pub const DEFAULT_PORT: &str = "5050";
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 8192;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no root directory given")]
    MissingRoot,

    #[error("invalid root {path}: {source}")]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root {0} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("max_request_bytes must be greater than zero")]
    ZeroRequestLimit,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Server settings. The root and bind address are read-only once serving.
///
/// ```yaml
/// root: /srv/www
/// port: "8080"
/// bind: 127.0.0.1
/// max_request_bytes: 4096
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub root: PathBuf,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}

impl ServerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            port: default_port(),
            bind: default_bind(),
            max_request_bytes: default_max_request_bytes(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Combines an optional config file with positional `root` and `port`,
    /// which win over the file when given.
    pub fn from_sources(
        file: Option<&Path>,
        root: Option<String>,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = match (file, &root) {
            (Some(path), _) => Self::load(path)?,
            (None, Some(root)) => Self::new(root),
            (None, None) => return Err(ConfigError::MissingRoot),
        };

        if let Some(root) = root {
            cfg.root = root.into();
        }
        if let Some(port) = port {
            cfg.port = port;
        }
        if cfg.root.as_os_str().is_empty() {
            return Err(ConfigError::MissingRoot);
        }
        Ok(cfg)
    }

    /// Canonical form of the root. It must exist and be a directory.
    pub fn canonical_root(&self) -> Result<PathBuf, ConfigError> {
        let root = std::fs::canonicalize(&self.root).map_err(|source| ConfigError::InvalidRoot {
            path: self.root.clone(),
            source,
        })?;
        if !root.is_dir() {
            return Err(ConfigError::RootNotDirectory(root));
        }
        Ok(root)
    }

    /// `bind:port`, with IPv6 bind addresses bracketed.
    pub fn listen_addr(&self) -> Result<String, ConfigError> {
        if self.port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(self.port.clone()));
        }
        if self.max_request_bytes == 0 {
            return Err(ConfigError::ZeroRequestLimit);
        }

        if self.bind.contains(':') {
            Ok(format!("[{}]:{}", self.bind, self.port))
        } else {
            Ok(format!("{}:{}", self.bind, self.port))
        }
    }
}
