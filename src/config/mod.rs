use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root under which `operators/<name>/daily_entry_<MM-DD-YY>.csv` lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_operator_list")]
    pub operator_list: String,
    #[serde(default = "default_machine_list")]
    pub machine_list: String,
    #[serde(default = "default_item_list")]
    pub item_list: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}
fn default_operator_list() -> String {
    "operator_list.csv".to_string()
}
fn default_machine_list() -> String {
    "machine_list.csv".to_string()
}
fn default_item_list() -> String {
    "item_list.csv".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5002
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            operator_list: default_operator_list(),
            machine_list: default_machine_list(),
            item_list: default_item_list(),
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> AppResult<PathBuf> {
        let base = if cfg!(target_os = "windows") {
            dirs::config_dir().map(|d| d.join("rrunlogger"))
        } else {
            dirs::home_dir().map(|h| h.join(".rrunlogger"))
        };
        base.ok_or_else(|| {
            AppError::Config("cannot locate the home directory; pass --config".to_string())
        })
    }

    /// Return the full path of the config file
    pub fn config_file() -> AppResult<PathBuf> {
        Ok(Self::config_dir()?.join("rrunlogger.conf"))
    }

    /// Resolve the config file path: explicit override or platform default.
    pub fn resolve_file(custom: Option<&str>) -> AppResult<PathBuf> {
        match custom {
            Some(p) => Ok(expand_tilde(p)),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load(custom: Option<&str>) -> AppResult<Self> {
        Self::load_from(&Self::resolve_file(custom)?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write the configuration file. Refuses to overwrite unless `force`.
    pub fn init_at(&self, path: &Path, force: bool) -> AppResult<()> {
        if path.exists() && !force {
            return Err(AppError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    pub fn operator_list_path(&self) -> PathBuf {
        expand_tilde(&self.operator_list)
    }

    pub fn machine_list_path(&self) -> PathBuf {
        expand_tilde(&self.machine_list)
    }

    pub fn item_list_path(&self) -> PathBuf {
        expand_tilde(&self.item_list)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
