//! External configuration for registries.
//!
//! A configuration file maps service-key names to instance kinds, so the caching
//! policy of a service can be changed without touching the code that binds it:
//!
//! ```yaml
//! instance_kinds:
//!   Logger: single
//!   Factory: multi
//! ```

use crate::error::{Error, Result};
use crate::key::KeyId;
use crate::kind::InstanceKind;

use serde::Deserialize;
use std::{collections::HashMap, fs::File, io, path::Path};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
  /// Instance kinds keyed by service-key name. Values are validated when a
  /// service is bound, not when the file is loaded.
  #[serde(default)]
  pub instance_kinds: HashMap<String, String>,
}

impl RegistryConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the configured instance kind for the service key called `name`.
  pub fn with_instance_kind(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
    self.instance_kinds.insert(name.into(), kind.into());
    self
  }

  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_json_str(source: &str) -> Result<Self> {
    serde_json::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  /// Loads a configuration file. Files ending in `.json` are parsed as JSON,
  /// everything else as YAML.
  pub fn from_file(path: &Path) -> Result<Self> {
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);

    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
      serde_json::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
    } else {
      serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
    }
  }

  /// The instance kind configured for `key`, or [`InstanceKind::Single`] if none is.
  pub(crate) fn instance_kind_for(&self, key: KeyId) -> Result<InstanceKind> {
    match self.instance_kinds.get(key.name()) {
      None => Ok(InstanceKind::default()),
      Some(raw) => InstanceKind::parse(raw).ok_or_else(|| Error::UnsupportedInstanceKind {
        key: key.to_string(),
        kind: raw.clone(),
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ServiceKey;
  use pretty_assertions::assert_eq;
  use std::io::Write;

  #[test]
  fn parses_yaml() {
    let config = RegistryConfig::from_yaml_str(
      r#"
instance_kinds:
  Logger: single
  Factory: multi
"#,
    )
    .unwrap();

    assert_eq!(
      config,
      RegistryConfig::new()
        .with_instance_kind("Logger", "single")
        .with_instance_kind("Factory", "multi")
    );
  }

  #[test]
  fn empty_document_sections_default() {
    let config = RegistryConfig::from_json_str("{}").unwrap();
    assert!(config.instance_kinds.is_empty());
  }

  #[test]
  fn rejects_unknown_fields() {
    let err = RegistryConfig::from_yaml_str("bindings: {}").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
  }

  #[test]
  fn loads_json_and_yaml_files() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("registry.json");
    let mut json = File::create(&json_path).unwrap();
    write!(json, r#"{{"instance_kinds": {{"Factory": "multi"}}}}"#).unwrap();

    let yaml_path = dir.path().join("registry.yaml");
    let mut yaml = File::create(&yaml_path).unwrap();
    writeln!(yaml, "instance_kinds:\n  Factory: multi").unwrap();

    let from_json = RegistryConfig::from_file(&json_path).unwrap();
    let from_yaml = RegistryConfig::from_file(&yaml_path).unwrap();
    assert_eq!(from_json, from_yaml);
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RegistryConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, Error::ConfigRead(_)));
  }

  #[test]
  fn instance_kind_lookup() {
    let config = RegistryConfig::new()
      .with_instance_kind("Factory", "multi")
      .with_instance_kind("Broken", "scoped");

    let factory = ServiceKey::<u8>::new("Factory");
    let logger = ServiceKey::<u8>::new("Logger");
    let broken = ServiceKey::<u8>::new("Broken");

    assert_eq!(config.instance_kind_for(factory.key_id()).unwrap(), InstanceKind::Multi);
    assert_eq!(config.instance_kind_for(logger.key_id()).unwrap(), InstanceKind::Single);

    match config.instance_kind_for(broken.key_id()) {
      Err(Error::UnsupportedInstanceKind { key, kind }) => {
        assert_eq!(key, broken.to_string());
        assert_eq!(kind, "scoped");
      }
      other => panic!("expected an unsupported kind error, got {:?}", other),
    }
  }
}
