use brain::{DEFAULT_ROUTE_FILE, NavParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot load the config file {path:?}: {source}")]
    FileLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read the config file: {0}")]
    Deserialise(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// Waypoint file, one `dx,dy` per line
    #[serde(default = "default_waypoints")]
    pub waypoints: PathBuf,

    #[serde(default)]
    pub navigation: NavParams,

    #[serde(default)]
    pub transport: TransportConfig,
}

/// Zenoh key expressions
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TransportConfig {
    #[serde(default = "default_pose_key")]
    pub pose_key: String,

    #[serde(default = "default_cmd_vel_key")]
    pub cmd_vel_key: String,
}

fn default_waypoints() -> PathBuf {
    PathBuf::from(DEFAULT_ROUTE_FILE)
}

fn default_pose_key() -> String {
    "rt/turtle1/pose".to_string()
}

fn default_cmd_vel_key() -> String {
    "rt/turtle1/cmd_vel".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pose_key: default_pose_key(),
            cmd_vel_key: default_cmd_vel_key(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            waypoints: default_waypoints(),
            navigation: NavParams::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl NodeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = NodeConfig::parse("").unwrap();
        assert_eq!(config, NodeConfig::default());
        assert_eq!(config.waypoints, PathBuf::from("pontos.csv"));
        assert_eq!(config.transport.pose_key, "rt/turtle1/pose");
    }

    #[test]
    fn test_partial_tables() {
        let config = NodeConfig::parse(
            r#"
            waypoints = "route.csv"

            [navigation]
            cruise_speed = 1.0

            [transport]
            pose_key = "rt/bot/pose"
            "#,
        )
        .unwrap();

        assert_eq!(config.waypoints, PathBuf::from("route.csv"));
        assert_eq!(config.navigation.cruise_speed, 1.0);
        assert_eq!(config.navigation.tolerance, 0.1);
        assert_eq!(config.transport.pose_key, "rt/bot/pose");
        assert_eq!(config.transport.cmd_vel_key, "rt/turtle1/cmd_vel");
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            NodeConfig::parse("navigation = 3"),
            Err(ConfigError::Deserialise(_))
        ));
    }
}
