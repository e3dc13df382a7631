//! Configuration schema
//!
//! Defines the structure of the configuration file.

use crate::core::algorithm::Algorithm;
use crate::core::checksum::ExtensionMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Checksum-file extension to algorithm mapping, consulted by the
    /// parser before digest-length inference.
    #[serde(default = "default_extensions")]
    pub extensions: BTreeMap<String, Algorithm>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// The extension map in the form the checksum parser consumes.
    pub fn extension_map(&self) -> ExtensionMap {
        ExtensionMap::new(self.extensions.clone())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Algorithm preselected on startup
    #[serde(default)]
    pub default_algorithm: Algorithm,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::default(),
        }
    }
}

fn default_extensions() -> BTreeMap<String, Algorithm> {
    ExtensionMap::default_entries()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("default_algorithm = \"SHA256\""));
        assert!(text.contains("sha256 = \"SHA256\""));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.general.default_algorithm, Algorithm::Sha256);
        assert_eq!(
            parsed.extension_map().lookup("SHA2-512_224"),
            Some(Algorithm::Sha512_224)
        );
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.general.default_algorithm, Algorithm::Sha256);
        assert_eq!(
            parsed.extension_map().lookup("md5"),
            Some(Algorithm::Md5)
        );
    }
}
