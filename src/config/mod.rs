//! Configuration loading and management

use crate::core::context::{HATEOAS_OPTIONS_HEADER, RequestContext};
use crate::core::verbosity::Verbosity;
use crate::links::assembler::StorageMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Settings for link augmentation
///
/// ```yaml
/// storage: map
/// verbosity: BASIC
/// options_header: X-HATEOAS-Options
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HateoasConfig {
    /// How links are attached to entities
    #[serde(default)]
    pub storage: StorageMode,

    /// Verbosity used when the client does not ask for one
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Header a client uses to request a verbosity level
    #[serde(default = "default_options_header")]
    pub options_header: String,
}

fn default_options_header() -> String {
    HATEOAS_OPTIONS_HEADER.to_string()
}

impl Default for HateoasConfig {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            verbosity: Verbosity::default(),
            options_header: default_options_header(),
        }
    }
}

impl HateoasConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Build the request context from raw request headers.
    ///
    /// The configured `options_header` is matched ignoring ASCII case, as HTTP
    /// header names are. The first matching header wins.
    pub fn request_context<'a, I>(&self, base_uri: impl Into<String>, headers: I) -> RequestContext
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let options = headers
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.options_header))
            .map(|(_, value)| value);

        RequestContext::from_header(base_uri, options)
    }

    /// Verbosity for a request: the client's choice, else the configured one
    pub fn verbosity_for(&self, ctx: &RequestContext) -> Verbosity {
        ctx.verbosity_or(self.verbosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HateoasConfig::default();

        assert_eq!(config.storage, StorageMode::List);
        assert_eq!(config.verbosity, Verbosity::Minimum);
        assert_eq!(config.options_header, "X-HATEOAS-Options");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = HateoasConfig::from_yaml_str("storage: map\n").unwrap();

        assert_eq!(config.storage, StorageMode::Map);
        assert_eq!(config.verbosity, Verbosity::Minimum);
        assert_eq!(config.options_header, HATEOAS_OPTIONS_HEADER);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = HateoasConfig {
            storage: StorageMode::Map,
            verbosity: Verbosity::Full,
            options_header: "X-Links".to_string(),
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = HateoasConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_storage_mode_is_rejected() {
        assert!(HateoasConfig::from_yaml_str("storage: tree\n").is_err());
    }

    #[test]
    fn test_request_context_reads_configured_header() {
        let config = HateoasConfig::from_yaml_str("options_header: X-Link-Detail\n").unwrap();
        let headers = [
            ("accept", "application/json"),
            (HATEOAS_OPTIONS_HEADER, "FULL"),
            ("x-link-detail", "basic"),
        ];

        let ctx = config.request_context("http://localhost/api", headers);

        assert_eq!(ctx.requested_verbosity(), Some(Verbosity::Basic));
        assert_eq!(config.verbosity_for(&ctx), Verbosity::Basic);
        assert_eq!(ctx.base_uri(), "http://localhost/api");
    }

    #[test]
    fn test_request_context_without_header_uses_default() {
        let config = HateoasConfig::from_yaml_str("verbosity: GENERIC\n").unwrap();

        let ctx = config.request_context("http://localhost/api", [("accept", "*/*")]);

        assert_eq!(ctx.requested_verbosity(), None);
        assert_eq!(config.verbosity_for(&ctx), Verbosity::Generic);
    }
}
