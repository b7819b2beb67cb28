//! Public macros for declaring keys and resolving services.

/// Declares one or more service keys as lazily created statics.
///
/// The key's diagnostic name is the static's identifier. Each declaration creates
/// a distinct key, even when two declarations share a name and contract.
///
/// # Examples
///
/// ```
/// use fibre_locator::{service_key, Registry};
///
/// trait Logger: Send + Sync {
///   fn log(&self, message: &str) -> String;
/// }
///
/// service_key! {
///   /// The application logger.
///   pub static LOGGER: dyn Logger;
///   static RETRIES: u32;
/// }
///
/// let registry = Registry::new();
/// registry.put(&RETRIES, 3);
/// assert!(registry.contains(&RETRIES));
/// assert!(registry.contains_not(&LOGGER));
/// ```
#[macro_export]
macro_rules! service_key {
  ($($(#[$meta:meta])* $vis:vis static $name:ident : $contract:ty;)+) => {
    $(
      $(#[$meta])*
      $vis static $name: $crate::__private::Lazy<$crate::ServiceKey<$contract>> =
        $crate::__private::Lazy::new(|| $crate::ServiceKey::new(stringify!($name)));
    )+
  };
}

/// Resolves a service, panicking if it cannot be resolved.
///
/// Without a second argument the global registry is used.
///
/// # Panics
///
/// Panics with the resolution error if the key is unknown or its binding has
/// nothing to give. For a non-panicking version use `fetch_or_none!` or the
/// registry's `fetch` method.
///
/// # Examples
///
/// ```
/// use fibre_locator::{fetch, global, service_key, Registry};
///
/// service_key! {
///   static PORT: u16;
/// }
///
/// global().register(&PORT, || 8080);
/// assert_eq!(*fetch!(PORT), 8080);
///
/// let registry = Registry::new();
/// registry.put(&PORT, 9090);
/// assert_eq!(*fetch!(PORT, registry), 9090);
/// ```
#[macro_export]
macro_rules! fetch {
  ($key:expr) => {
    $crate::fetch!($key, $crate::global())
  };

  ($key:expr, $registry:expr) => {
    match $registry.fetch(&$key) {
      Ok(service) => service,
      Err(error) => panic!("Failed to resolve required service: {}", error),
    }
  };
}

/// Resolves a service into an `Option`, from the global registry unless a registry
/// is given.
#[macro_export]
macro_rules! fetch_or_none {
  ($key:expr) => {
    $crate::fetch_or_none!($key, $crate::global())
  };

  ($key:expr, $registry:expr) => {
    $registry.fetch_or_none(&$key)
  };
}
