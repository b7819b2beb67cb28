//! Identity keys that stand in for an abstract service contract.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

// Ids are never reused, so two keys are equal only if one was copied from the other.
static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// The untyped identity of a [`ServiceKey`]. Registries store bindings under this.
#[derive(Clone, Copy)]
pub(crate) struct KeyId {
  id: u64,
  name: &'static str,
}

impl KeyId {
  fn next(name: &'static str) -> Self {
    Self {
      id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
      name,
    }
  }

  pub(crate) fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for KeyId {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for KeyId {}

impl Hash for KeyId {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Display for KeyId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}", self.name, self.id)
  }
}

impl fmt::Debug for KeyId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({}#{})", self.name, self.id)
  }
}

/// A typed handle for "the abstract contract `T`".
///
/// Every call to [`ServiceKey::new`] issues a fresh identity. Keys compare by that
/// identity only, so two keys with the same name and contract type are still
/// different keys and can be bound independently. The name is purely diagnostic and
/// shows up in log events and error messages.
///
/// `T` is usually a trait object (`dyn Logger`) but any `'static` type works.
/// Keys are normally declared once per contract with [`service_key!`](crate::service_key).
pub struct ServiceKey<T: ?Sized> {
  id: KeyId,
  _contract: PhantomData<fn() -> *const T>,
}

impl<T: ?Sized> ServiceKey<T> {
  /// Creates a new key with a unique identity.
  pub fn new(name: &'static str) -> Self {
    Self {
      id: KeyId::next(name),
      _contract: PhantomData,
    }
  }

  /// The numeric identity of this key.
  pub fn id(&self) -> u64 {
    self.id.id
  }

  /// The diagnostic name given at construction.
  pub fn name(&self) -> &'static str {
    self.id.name
  }

  pub(crate) fn key_id(&self) -> KeyId {
    self.id
  }
}

impl<T: ?Sized> Clone for ServiceKey<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T: ?Sized> Copy for ServiceKey<T> {}

impl<T: ?Sized> PartialEq for ServiceKey<T> {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl<T: ?Sized> Eq for ServiceKey<T> {}

impl<T: ?Sized> Hash for ServiceKey<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl<T: ?Sized> fmt::Display for ServiceKey<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.id, f)
  }
}

impl<T: ?Sized> fmt::Debug for ServiceKey<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServiceKey")
      .field("id", &self.id.id)
      .field("name", &self.id.name)
      .field("contract", &std::any::type_name::<T>())
      .finish()
  }
}
