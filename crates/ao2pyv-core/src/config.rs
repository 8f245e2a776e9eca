//! Configuration parsing
//!
//! ao2pyv runs without any configuration. A YAML file passed explicitly on
//! the command line can override the archive.org endpoints:
//!
//! ```yaml
//! archive:
//!   search_url: https://archive.org/advancedsearch.php
//!   details_url: https://archive.org/details/
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default archive.org search endpoint
pub const ARCHIVE_ORG_SEARCH_URL: &str = "https://archive.org/advancedsearch.php";

/// Default base URL for archive.org item pages
pub const ARCHIVE_ORG_DETAILS_URL: &str = "https://archive.org/details/";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// archive.org endpoints
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// archive.org endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Advanced search endpoint queried by the `archive.org` input
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Prefix joined with an item identifier to build its `source_url`
    #[serde(default = "default_details_url")]
    pub details_url: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            details_url: default_details_url(),
        }
    }
}

fn default_search_url() -> String {
    ARCHIVE_ORG_SEARCH_URL.to_string()
}

fn default_details_url() -> String {
    ARCHIVE_ORG_DETAILS_URL.to_string()
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from YAML text; an empty document yields the defaults
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_optional<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("search_url", &self.archive.search_url),
            ("details_url", &self.archive.details_url),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Configuration {
                    registry: "archive".to_string(),
                    message: format!("'{}' must not be empty", key),
                });
            }
        }
        Ok(())
    }
}
