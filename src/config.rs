use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";
const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 60 * 60;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("config is malformed: {0}")]
    Malformed(#[from] serde_yml::Error),

    #[error("config is not valid utf8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Invalid(String),
}

/// Outbound HTTP settings used by the transport
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Seconds between background sweeps of expired thumbnails
    #[serde(default = "default_prune_interval_secs")]
    pub prune_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            prune_interval_secs: DEFAULT_PRUNE_INTERVAL_SECS,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_prune_interval_secs() -> u64 {
    DEFAULT_PRUNE_INTERVAL_SECS
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "http.user_agent must not be empty".to_string(),
            ));
        }

        if self.server.prune_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.prune_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.listen is not a socket address: {:?}",
                self.server.listen
            )));
        }

        Ok(())
    }

    /// `VIDTHUMB_BASE_PATH`, or `~/.local/share/vidthumb`
    pub fn base_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var("VIDTHUMB_BASE_PATH") {
            return Ok(PathBuf::from(path));
        }

        let home = homedir::my_home()
            .map_err(|e| ConfigError::Invalid(format!("could not determine home directory: {e}")))?
            .ok_or_else(|| ConfigError::Invalid("home directory path is empty".to_string()))?;

        Ok(home.join(".local/share/vidthumb"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::base_path()?)
    }

    pub fn load_with(base_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base_path = base_path.as_ref();
        let config_path = base_path.join("config.yaml");

        // create new if does not exist
        if !config_path.exists() {
            std::fs::create_dir_all(base_path)?;
            std::fs::write(&config_path, serde_yml::to_string(&Self::default())?)?;
        }

        let config_str = String::from_utf8(std::fs::read(&config_path)?)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path.to_path_buf();
        config.validate()?;

        // resave so newly added fields show up with their defaults
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(self.base_path.join("config.yaml"), config_str)?;
        Ok(())
    }
}
