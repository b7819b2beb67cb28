//! The main `Registry` struct and its associated methods.

use crate::binding::{Binding, Factory, Instance, Resolution};
use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::key::{KeyId, ServiceKey};
use crate::kind::InstanceKind;

use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

/// The service registry.
///
/// Holds at most one binding per [`ServiceKey`] and resolves keys into
/// instances on demand. It is thread-safe: every method takes `&self`, and a
/// `Single` binding runs its factory exactly once even when first resolved from
/// several threads at the same time.
///
/// Factories run without any registry lock held, so a factory may fetch, and even
/// bind, other services of the same registry.
#[derive(Default)]
pub struct Registry {
  bindings: DashMap<KeyId, Arc<Binding>>,
  config: RegistryConfig,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty `Registry` that consults `config` in the `*_configured` methods.
  pub fn with_config(config: RegistryConfig) -> Self {
    Self {
      bindings: DashMap::new(),
      config,
    }
  }

  pub fn config(&self) -> &RegistryConfig {
    &self.config
  }

  // --- PRIVATE HELPERS ---

  fn bind(&self, binding: Binding, key: KeyId) {
    let kind = binding.kind();
    // A single insert both drops any previous binding and stores the new one.
    let replaced = self.bindings.insert(key, Arc::new(binding)).is_some();
    debug!(key = %key, kind = %kind, replaced, "service bound");
  }

  fn bind_factory(&self, key: KeyId, factory: Option<Factory>, kind: InstanceKind) {
    self.bind(Binding::with_factory(key, factory, kind), key);
  }

  fn bind_instance(&self, key: KeyId, instance: Instance) {
    self.bind(Binding::with_instance(key, instance), key);
  }

  /// The shared resolver behind `fetch` and `fetch_or_none`.
  ///
  /// `Err` only for an unknown key; `Ok(None)` for a binding with nothing to give.
  fn resolve<T: ?Sized + Any + Send + Sync>(&self, key: &ServiceKey<T>) -> Result<Option<Arc<T>>> {
    let id = key.key_id();
    // Clone the binding out so the map shard is unlocked while the factory runs.
    let binding = match self.bindings.get(&id) {
      Some(entry) => Arc::clone(entry.value()),
      None => {
        return Err(Error::UnknownService {
          key: id.to_string(),
        })
      }
    };

    trace!(key = %id, kind = %binding.kind(), "resolving service");
    let resolution = binding.resolve();
    if matches!(resolution, Resolution::Empty) {
      trace!(key = %id, "binding has no factory and no instance");
    }
    Ok(resolution.into_arc())
  }

  // --- PUBLIC API ---

  // --- Queries ---

  /// Returns `true` if a binding for `key` exists.
  pub fn contains<T: ?Sized>(&self, key: &ServiceKey<T>) -> bool {
    self.bindings.contains_key(&key.key_id())
  }

  /// Always the negation of [`contains`](Self::contains).
  pub fn contains_not<T: ?Sized>(&self, key: &ServiceKey<T>) -> bool {
    !self.contains(key)
  }

  /// The instance kind of the binding for `key`, if there is one.
  pub fn instance_kind<T: ?Sized>(&self, key: &ServiceKey<T>) -> Option<InstanceKind> {
    self.bindings.get(&key.key_id()).map(|entry| entry.value().kind())
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  // --- Factory Registration ---

  /// Binds `key` to `factory` with [`InstanceKind::Single`].
  ///
  /// Nothing is created until the first resolution. Any previous binding for
  /// `key`, including a cached instance, is discarded.
  pub fn register<T: Any + Send + Sync>(
    &self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.register_with_kind(key, factory, InstanceKind::Single);
  }

  pub fn register_with_kind<T: Any + Send + Sync>(
    &self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> T + Send + Sync + 'static,
    kind: InstanceKind,
  ) {
    let factory: Factory = Box::new(move || Box::new(Arc::new(factory())));
    self.bind_factory(key.key_id(), Some(factory), kind);
  }

  /// Binds `key` with the instance kind configured for its name.
  ///
  /// Fails with [`Error::UnsupportedInstanceKind`] if the configured value is not a
  /// known kind; the existing binding for `key` is left untouched in that case.
  pub fn register_configured<T: Any + Send + Sync>(
    &self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) -> Result<()> {
    let kind = self.config.instance_kind_for(key.key_id())?;
    self.register_with_kind(key, factory, kind);
    Ok(())
  }

  // --- Trait Registration ---

  /// Binds a trait-object contract to a factory producing `Box<T>`, with
  /// [`InstanceKind::Single`].
  ///
  /// Each box is moved into a new `Arc`, so a factory can never hand out an
  /// instance it shares with anything else.
  pub fn register_trait<T: ?Sized + Any + Send + Sync>(
    &self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> Box<T> + Send + Sync + 'static,
  ) {
    self.register_trait_with_kind(key, factory, InstanceKind::Single);
  }

  pub fn register_trait_with_kind<T: ?Sized + Any + Send + Sync>(
    &self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> Box<T> + Send + Sync + 'static,
    kind: InstanceKind,
  ) {
    let factory: Factory = Box::new(move || Box::new(Arc::<T>::from(factory())));
    self.bind_factory(key.key_id(), Some(factory), kind);
  }

  pub fn register_trait_configured<T: ?Sized + Any + Send + Sync>(
    &self,
    key: &ServiceKey<T>,
    factory: impl Fn() -> Box<T> + Send + Sync + 'static,
  ) -> Result<()> {
    let kind = self.config.instance_kind_for(key.key_id())?;
    self.register_trait_with_kind(key, factory, kind);
    Ok(())
  }

  /// Binds `key` without any factory.
  ///
  /// The key is then known to the registry but resolves to nothing:
  /// [`fetch_or_none`](Self::fetch_or_none) returns `None` and
  /// [`fetch`](Self::fetch) returns [`Error::NoInstance`].
  pub fn register_without_factory<T: ?Sized>(&self, key: &ServiceKey<T>, kind: InstanceKind) {
    self.bind_factory(key.key_id(), None, kind);
  }

  // --- Instance Registration ---

  /// Binds `key` to an already built instance. Every resolution returns it.
  pub fn put<T: Any + Send + Sync>(&self, key: &ServiceKey<T>, instance: T) {
    self.put_arc(key, Arc::new(instance));
  }

  /// Like [`put`](Self::put), but keeps the caller's `Arc`, so the fetched value is
  /// pointer-equal to `instance`. Also works for trait-object contracts.
  pub fn put_arc<T: ?Sized + Any + Send + Sync>(&self, key: &ServiceKey<T>, instance: Arc<T>) {
    self.bind_instance(key.key_id(), Box::new(instance));
  }

  // --- Removal ---

  /// Removes the binding for `key`. Returns whether a binding existed.
  /// Removing an unknown key is a no-op.
  pub fn remove<T: ?Sized>(&self, key: &ServiceKey<T>) -> bool {
    let id = key.key_id();
    let removed = self.bindings.remove(&id).is_some();
    debug!(key = %id, removed, "service removed");
    removed
  }

  /// Removes every binding.
  pub fn clear(&self) {
    self.bindings.clear();
    debug!("registry cleared");
  }

  // --- Resolution ---

  /// Resolves `key` into an instance.
  ///
  /// Fails with [`Error::UnknownService`] if nothing is bound to `key`, and with
  /// [`Error::NoInstance`] if the binding has neither a factory nor an instance.
  pub fn fetch<T: ?Sized + Any + Send + Sync>(&self, key: &ServiceKey<T>) -> Result<Arc<T>> {
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

  /// Resolves `key` into an instance, or `None` if nothing is bound to `key` or the
  /// binding has nothing to give.
  pub fn fetch_or_none<T: ?Sized + Any + Send + Sync>(&self, key: &ServiceKey<T>) -> Option<Arc<T>> {
    self.resolve(key).ok().flatten()
  }
}
