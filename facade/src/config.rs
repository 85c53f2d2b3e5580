//! Registry configuration, loadable from YAML.

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Declarative settings for a [`FacadeRegistry`](crate::FacadeRegistry).
///
/// ```
/// use fibre_facade::RegistryConfig;
///
/// let config = RegistryConfig::from_yaml_str("aliases:\n  cache: cache.redis\n").unwrap();
/// assert_eq!(config.aliases["cache"], "cache.redis");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
  /// Maps a facade accessor onto the container binding that backs it.
  /// Accessors without an entry resolve the binding of the same name.
  pub aliases: BTreeMap<String, String>,
}

impl RegistryConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    Ok(serde_yaml::from_str(source)?)
  }
}
