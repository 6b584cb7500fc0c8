//! Configuration types for the hunt resolver
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Main hunt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Record store backend configuration
    pub store: StoreConfig,

    /// Resolver settings
    pub resolver: ResolverConfig,
}

impl HuntConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.store.validate()?;
        self.resolver.validate()?;
        Ok(())
    }
}

/// Record store backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Notion backend
    Notion {
        /// Notion integration token
        api_token: String,
    },

    /// Custom backend
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::Notion { api_token } => {
                if api_token.is_empty() {
                    return Err(crate::Error::config("Notion API token cannot be empty"));
                }
                Ok(())
            }
            StoreConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom store factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom store config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the backend type name
    pub fn type_name(&self) -> &str {
        match self {
            StoreConfig::Notion { .. } => "notion",
            StoreConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Notion {
            api_token: String::new(),
        }
    }
}

/// Resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Store identifier of the team collection
    pub teams_collection: String,

    /// Store identifier of the challenge collection
    pub challenges_collection: String,

    /// Base URL public challenge locators are built on
    ///
    /// The locator is this base concatenated with the hyphen-stripped store
    /// identifier of the challenge record.
    pub public_base_url: String,

    /// Page cap for unfiltered team scans
    ///
    /// The full-scan fallback and the team listing fetch at most this many
    /// records. This is a known scale limit, not dynamic pagination.
    #[serde(default = "default_scan_page_limit")]
    pub scan_page_limit: u32,
}

impl ResolverConfig {
    /// Create a resolver configuration with the default scan page limit
    pub fn new(
        teams_collection: impl Into<String>,
        challenges_collection: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            teams_collection: teams_collection.into(),
            challenges_collection: challenges_collection.into(),
            public_base_url: public_base_url.into(),
            scan_page_limit: default_scan_page_limit(),
        }
    }

    /// Set the scan page cap
    pub fn with_scan_page_limit(mut self, scan_page_limit: u32) -> Self {
        self.scan_page_limit = scan_page_limit;
        self
    }

    /// Validate the resolver settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.teams_collection.is_empty() {
            return Err(crate::Error::config("Team collection id cannot be empty"));
        }
        if self.challenges_collection.is_empty() {
            return Err(crate::Error::config(
                "Challenge collection id cannot be empty",
            ));
        }
        if self.public_base_url.is_empty() {
            return Err(crate::Error::config("Public base URL cannot be empty"));
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(crate::Error::config(format!(
                "Public base URL must use HTTP or HTTPS scheme. Got: {}",
                self.public_base_url
            )));
        }
        if self.scan_page_limit == 0 {
            return Err(crate::Error::config("Scan page limit must be > 0"));
        }
        Ok(())
    }
}

fn default_scan_page_limit() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_resolver_config() -> ResolverConfig {
        ResolverConfig::new("teams-db", "challenges-db", "https://hunt.example.site/")
    }

    #[test]
    fn resolver_config_defaults_page_limit_to_100() {
        assert_eq!(valid_resolver_config().scan_page_limit, 100);
    }

    #[test]
    fn resolver_config_rejects_empty_collections() {
        let mut config = valid_resolver_config();
        config.teams_collection.clear();
        assert!(config.validate().is_err());

        let mut config = valid_resolver_config();
        config.challenges_collection.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolver_config_rejects_non_http_base_url() {
        let mut config = valid_resolver_config();
        config.public_base_url = "ftp://hunt.example.site/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_config_rejects_empty_token() {
        let config = StoreConfig::Notion {
            api_token: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_config_type_names() {
        let notion = StoreConfig::Notion {
            api_token: "secret".to_string(),
        };
        assert_eq!(notion.type_name(), "notion");

        let custom = StoreConfig::Custom {
            factory: "memory".to_string(),
            config: serde_json::json!({}),
        };
        assert_eq!(custom.type_name(), "memory");
    }
}
