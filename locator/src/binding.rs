//! Core, non-public data structures for the thread-safe registry.

use crate::key::KeyId;
use crate::kind::InstanceKind;

use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;
use tracing::trace;

pub(crate) type Instance = Box<dyn Any + Send + Sync>;
pub(crate) type Factory = Box<dyn Fn() -> Instance + Send + Sync>;

/// One registered or put service.
///
/// A binding is never mutated after it is inserted except to fill `cached` on the
/// first `Single` resolution. Rebinding a key replaces the whole binding.
pub(crate) struct Binding {
  key: KeyId,
  factory: Option<Factory>,
  kind: InstanceKind,
  cached: OnceCell<Instance>,
}

/// The outcome of resolving a binding, before it is downcast to the contract type.
pub(crate) enum Resolution<'a> {
  Cached(&'a Instance),
  Created(Instance),
  Empty,
}

impl Binding {
  pub(crate) fn with_factory(key: KeyId, factory: Option<Factory>, kind: InstanceKind) -> Self {
    Self {
      key,
      factory,
      kind,
      cached: OnceCell::new(),
    }
  }

  pub(crate) fn with_instance(key: KeyId, instance: Instance) -> Self {
    Self {
      key,
      factory: None,
      kind: InstanceKind::Single,
      cached: OnceCell::with_value(instance),
    }
  }

  pub(crate) fn kind(&self) -> InstanceKind {
    self.kind
  }

  pub(crate) fn resolve(&self) -> Resolution<'_> {
    match self.kind {
      InstanceKind::Single => {
        if let Some(instance) = self.cached.get() {
          return Resolution::Cached(instance);
        }
        let Some(factory) = &self.factory else {
          return Resolution::Empty;
        };
        // `get_or_init` blocks concurrent first resolutions, so the factory runs once.
        Resolution::Cached(self.cached.get_or_init(|| {
          trace!(key = %self.key, "creating single instance");
          factory()
        }))
      }
      InstanceKind::Multi => match &self.factory {
        Some(factory) => {
          trace!(key = %self.key, "creating multi instance");
          Resolution::Created(factory())
        }
        None => Resolution::Empty,
      },
    }
  }
}

impl Resolution<'_> {
  pub(crate) fn into_arc<T: ?Sized + Any + Send + Sync>(self) -> Option<Arc<T>> {
    match self {
      Resolution::Cached(instance) => instance.downcast_ref::<Arc<T>>().cloned(),
      Resolution::Created(instance) => instance
        .downcast::<Arc<T>>()
        .ok()
        .map(|arc_in_a_box| *arc_in_a_box),
      Resolution::Empty => None,
    }
  }
}
