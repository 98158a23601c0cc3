use crate::parser::mount_path_parser;
use anyhow::{Context, Result};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;

/// This struct represents the web-service.toml configuration. All properties
/// are optional so that the user only specifies the ones that they want in
/// that file.
///
/// The address of the upstream data service is intentionally not part of this
/// file.
#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServiceConfig {
    /// The address the web server binds to.
    pub listen_address: Option<SocketAddr>,

    /// The path under which the trigger routes are mounted.
    #[serde(default, deserialize_with = "parse_mount_path")]
    pub mount_path: Option<String>,
}

impl ServiceConfig {
    /// Load the config from `path`. A missing file is not an error and
    /// results in an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Unable to parse config file {}", path.display()))
    }
}

fn parse_mount_path<'de, D: Deserializer<'de>>(input: D) -> Result<Option<String>, D::Error> {
    let input_str: String = Deserialize::deserialize(input)?;
    mount_path_parser(&input_str).map(Some).map_err(Error::custom)
}
