use fibre_locator::{service_key, Error, InstanceKind, Registry, RegistryConfig};
use std::io::Write;
use std::sync::Arc;

trait Clock: Send + Sync {
  fn now(&self) -> u64;
}

struct FixedClock;
impl Clock for FixedClock {
  fn now(&self) -> u64 {
    1_700_000_000
  }
}

struct Connection;

service_key! {
  static CLOCK: dyn Clock;
  static CONNECTION: Connection;
  static BROKEN: Connection;
  static UNCONFIGURED: Connection;
}

const CONFIG: &str = r#"
instance_kinds:
  CLOCK: single
  CONNECTION: multi_instantiable
  BROKEN: scoped
"#;

fn configured_registry() -> Registry {
  Registry::with_config(RegistryConfig::from_yaml_str(CONFIG).unwrap())
}

#[test]
fn test_configured_kinds_are_applied() {
  let registry = configured_registry();

  registry.register_configured(&CONNECTION, || Connection).unwrap();
  registry.register_trait_configured(&CLOCK, || Box::new(FixedClock)).unwrap();
  registry.register_configured(&UNCONFIGURED, || Connection).unwrap();

  assert_eq!(registry.instance_kind(&CONNECTION), Some(InstanceKind::Multi));
  assert_eq!(registry.instance_kind(&CLOCK), Some(InstanceKind::Single));
  assert_eq!(registry.instance_kind(&UNCONFIGURED), Some(InstanceKind::Single));

  let a = registry.fetch(&CONNECTION).unwrap();
  let b = registry.fetch(&CONNECTION).unwrap();
  assert!(!Arc::ptr_eq(&a, &b));
  assert_eq!(registry.fetch(&CLOCK).unwrap().now(), 1_700_000_000);
}

#[test]
fn test_unsupported_kind_is_rejected_and_names_key_and_kind() {
  let registry = configured_registry();

  let err = registry.register_configured(&BROKEN, || Connection).unwrap_err();

  assert!(err.is_defect());
  match &err {
    Error::UnsupportedInstanceKind { key, kind } => {
      assert_eq!(key, &BROKEN.to_string());
      assert_eq!(kind, "scoped");
    }
    other => panic!("expected UnsupportedInstanceKind, got {:?}", other),
  }
  assert!(registry.contains_not(&BROKEN));
}

#[test]
fn test_rejected_kind_keeps_the_previous_binding() {
  let registry = configured_registry();
  registry.put(&BROKEN, Connection);
  let before = registry.fetch(&BROKEN).unwrap();

  assert!(registry.register_configured(&BROKEN, || Connection).is_err());

  let after = registry.fetch(&BROKEN).unwrap();
  assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_registry_from_config_file() {
  let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
  write!(file, r#"{{"instance_kinds": {{"CONNECTION": "MULTI"}}}}"#).unwrap();

  let config = RegistryConfig::from_file(file.path()).unwrap();
  let registry = Registry::with_config(config);
  registry.register_configured(&CONNECTION, || Connection).unwrap();

  assert_eq!(registry.instance_kind(&CONNECTION), Some(InstanceKind::Multi));
  assert_eq!(
    registry.config().instance_kinds.get("CONNECTION").map(String::as_str),
    Some("MULTI")
  );
}
