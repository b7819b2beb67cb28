//! A single-threaded, non-thread-safe service registry.

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::key::{KeyId, ServiceKey};
use crate::kind::InstanceKind;

use once_cell::unsync::OnceCell;
use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

type LocalFactory = Box<dyn Fn() -> Box<dyn Any>>;

// A local version of `Binding`. It uses `Rc` and `unsync::OnceCell`.
struct LocalBinding {
  factory: Option<LocalFactory>,
  kind: InstanceKind,
  cached: OnceCell<Box<dyn Any>>,
}

impl LocalBinding {
  fn resolve<T: ?Sized + Any>(&self) -> Option<Rc<T>> {
    match self.kind {
      InstanceKind::Single => {
        let instance = match self.cached.get() {
          Some(instance) => instance,
          None => {
            let factory = self.factory.as_ref()?;
            self.cached.get_or_init(factory)
          }
        };
        instance.downcast_ref::<Rc<T>>().cloned()
      }
      InstanceKind::Multi => {
        let factory = self.factory.as_ref()?;
        factory()
          .downcast::<Rc<T>>()
          .ok()
          .map(|rc_in_a_box| *rc_in_a_box)
      }
    }
  }
}

/// A single-threaded service registry.
///
/// Same semantics as [`Registry`](crate::Registry), but backed by a `HashMap` and
/// `Rc`, so it can hold services that are neither `Send` nor `Sync`.
///
/// # Note on API
///
/// Binding methods take `&mut self` because `HashMap` has no interior mutability.
/// Resolution only needs `&self`.
#[derive(Default)]
pub struct LocalRegistry {
  bindings: HashMap<KeyId, LocalBinding>,
  config: RegistryConfig,
}

impl LocalRegistry {
  /// Creates a new, empty `LocalRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: RegistryConfig) -> Self {
    Self {
      bindings: HashMap::new(),
      config,
    }
  }

  // --- PRIVATE HELPERS ---

  fn bind(&mut self, key: KeyId, binding: LocalBinding) {
    let kind = binding.kind;
    let replaced = self.bindings.insert(key, binding).is_some();
    debug!(key = %key, kind = %kind, replaced, "service bound");
  }

  fn bind_factory(&mut self, key: KeyId, factory: Option<LocalFactory>, kind: InstanceKind) {
    self.bind(
      key,
      LocalBinding {
        factory,
        kind,
        cached: OnceCell::new(),
      },
    );
  }

  fn resolve<T: ?Sized + Any>(&self, key: &ServiceKey<T>) -> Result<Option<Rc<T>>> {
    let id = key.key_id();
    let binding = self.bindings.get(&id).ok_or_else(|| Error::UnknownService {
      key: id.to_string(),
    })?;
    trace!(key = %id, kind = %binding.kind, "resolving service");
    Ok(binding.resolve())
  }

  // --- PUBLIC API ---

  pub fn contains<T: ?Sized>(&self, key: &ServiceKey<T>) -> bool {
    self.bindings.contains_key(&key.key_id())
  }

  pub fn contains_not<T: ?Sized>(&self, key: &ServiceKey<T>) -> bool {
    !self.contains(key)
  }

  pub fn instance_kind<T: ?Sized>(&self, key: &ServiceKey<T>) -> Option<InstanceKind> {
    self.bindings.get(&key.key_id()).map(|binding| binding.kind)
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  // --- Factory Registration ---
  pub fn register<T: Any>(&mut self, key: &ServiceKey<T>, factory: impl Fn() -> T + 'static) {
    self.register_with_kind(key, factory, InstanceKind::Single);
  }

  pub fn register_with_kind<T: Any>(
    &mut self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> T + 'static,
    kind: InstanceKind,
  ) {
    let factory: LocalFactory = Box::new(move || Box::new(Rc::new(factory())));
    self.bind_factory(key.key_id(), Some(factory), kind);
  }

  pub fn register_configured<T: Any>(
    &mut self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> T + 'static,
  ) -> Result<()> {
    let kind = self.config.instance_kind_for(key.key_id())?;
    self.register_with_kind(key, factory, kind);
    Ok(())
  }

  // --- Trait Registration ---
  pub fn register_trait<T: ?Sized + Any>(
    &mut self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> Box<T> + 'static,
  ) {
    self.register_trait_with_kind(key, factory, InstanceKind::Single);
  }

  pub fn register_trait_with_kind<T: ?Sized + Any>(
    &mut self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> Box<T> + 'static,
    kind: InstanceKind,
  ) {
    let factory: LocalFactory = Box::new(move || Box::new(Rc::<T>::from(factory())));
    self.bind_factory(key.key_id(), Some(factory), kind);
  }

  pub fn register_trait_configured<T: ?Sized + Any>(
    &mut self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> Box<T> + 'static,
  ) -> Result<()> {
    let kind = self.config.instance_kind_for(key.key_id())?;
    self.register_trait_with_kind(key, factory, kind);
    Ok(())
  }

  pub fn register_without_factory<T: ?Sized>(&mut self, key: &ServiceKey<T>, kind: InstanceKind) {
    self.bind_factory(key.key_id(), None, kind);
  }

  // --- Instance Registration ---
  pub fn put<T: Any>(&mut self, key: &ServiceKey<T>, instance: T) {
    self.put_rc(key, Rc::new(instance));
  }

  pub fn put_rc<T: ?Sized + Any>(&mut self, key: &ServiceKey<T>, instance: Rc<T>) {
    let cached: Box<dyn Any> = Box::new(instance);
    self.bind(
      key.key_id(),
      LocalBinding {
        factory: None,
        kind: InstanceKind::Single,
        cached: OnceCell::with_value(cached),
      },
    );
  }

  // --- Removal ---
  pub fn remove<T: ?Sized>(&mut self, key: &ServiceKey<T>) -> bool {
    let id = key.key_id();
    let removed = self.bindings.remove(&id).is_some();
    debug!(key = %id, removed, "service removed");
    removed
  }

  pub fn clear(&mut self) {
    self.bindings.clear();
    debug!("registry cleared");
  }

  // --- Resolution ---

  /// Resolves a service from the registry.
  ///
  /// Fails with [`Error::UnknownService`] for an unbound key and with
  /// [`Error::NoInstance`] for a binding without factory or instance.
  pub fn fetch<T: ?Sized + Any>(&self, key: &ServiceKey<T>) -> Result<Rc<T>> {
    match self.resolve(key) {
      Ok(Some(instance)) => Ok(instance),
      Ok(None) => Err(Error::NoInstance {
        key: key.to_string(),
      }),
      Err(e) => {
        debug!(key = %key, "fetch of an unknown service");
        Err(e)
      }
    }
  }

  pub fn fetch_or_none<T: ?Sized + Any>(&self, key: &ServiceKey<T>) -> Option<Rc<T>> {
    self.resolve(key).ok().flatten()
  }
}
