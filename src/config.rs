//! Service configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    /// Apply CLI/env overrides on top of the loaded file values. A `None`
    /// leaves the file value in place.
    pub fn apply_overrides(
        &mut self,
        listen: Option<String>,
        users_file: Option<String>,
        actions_file: Option<String>,
    ) {
        if let Some(listen) = listen {
            self.server.listen_addr = listen;
        }
        if let Some(users_file) = users_file {
            self.data.users_file = PathBuf::from(users_file);
        }
        if let Some(actions_file) = actions_file {
            self.data.actions_file = PathBuf::from(actions_file);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file holding the user records
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,

    /// JSON file holding the action log
    #[serde(default = "default_actions_file")]
    pub actions_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            actions_file: default_actions_file(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_users_file() -> PathBuf {
    PathBuf::from("data/users.json")
}

fn default_actions_file() -> PathBuf {
    PathBuf::from("data/actions.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").expect("empty config is valid");
        assert_eq!(config.server.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.data.users_file, PathBuf::from("data/users.json"));
        assert_eq!(config.data.actions_file, PathBuf::from("data/actions.json"));
    }

    #[test]
    fn test_partial_config_fills_missing_fields() {
        let config: Config = toml::from_str(
            r#"
[server]
listen_addr = "127.0.0.1:9000"
"#,
        )
        .expect("valid config");
        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.data.users_file, PathBuf::from("data/users.json"));
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut config: Config = toml::from_str(
            r#"
[server]
listen_addr = "0.0.0.0:3000"

[data]
users_file = "/etc/insights/users.json"
actions_file = "/etc/insights/actions.json"
"#,
        )
        .expect("valid config");

        config.apply_overrides(
            Some("127.0.0.1:8080".to_string()),
            Some("/tmp/users.json".to_string()),
            Some("/tmp/actions.json".to_string()),
        );

        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.data.users_file, PathBuf::from("/tmp/users.json"));
        assert_eq!(config.data.actions_file, PathBuf::from("/tmp/actions.json"));
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let mut config: Config = toml::from_str(
            r#"
[server]
listen_addr = "10.0.0.1:4000"
"#,
        )
        .expect("valid config");

        config.apply_overrides(None, None, None);

        assert_eq!(config.server.listen_addr, "10.0.0.1:4000");
        assert_eq!(config.data.users_file, PathBuf::from("data/users.json"));
    }
}
