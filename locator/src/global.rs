//! The global registry instance and access function.

use crate::registry::Registry;
use once_cell::sync::Lazy;

// The one process-wide registry, created on first access.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Provides a reference to the global registry.
///
/// # Examples
///
/// ```
/// use fibre_locator::{global, service_key};
///
/// service_key! {
///   static GREETING: String;
/// }
///
/// global().put(&GREETING, String::from("Hello from global!"));
/// assert_eq!(*global().fetch(&GREETING).unwrap(), "Hello from global!");
/// ```
pub fn global() -> &'static Registry {
  &GLOBAL_REGISTRY
}
