//! # Fibre Locator
//!
//! A small, thread-safe service locator for Rust.
//!
//! A service locator separates "which contract is needed" from "which concrete type
//! provides it". Code that needs a contract asks the registry for it by key; the
//! composition root decides, once, what the key is bound to.
//!
//! ## Core Concepts
//!
//! - **Service key**: a typed identity token ([`ServiceKey<T>`]) for an abstract
//!   contract `T`. Keys compare by identity, never by name.
//! - **Registry**: holds at most one binding per key ([`Registry`], or
//!   [`LocalRegistry`] with the `local` feature).
//! - **Instance kind**: [`InstanceKind::Single`] creates lazily once and caches;
//!   [`InstanceKind::Multi`] creates a new instance on every fetch.
//! - **Global registry**: a process-wide registry, accessible via [`global()`].
//!
//! Binding a key that is already bound replaces the old binding completely,
//! including any cached instance.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_locator::{fetch, global, service_key, InstanceKind};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn log(&self, message: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//!
//! impl Logger for ConsoleLogger {
//!   fn log(&self, message: &str) -> String {
//!     format!("[console] {}", message)
//!   }
//! }
//!
//! service_key! {
//!   static LOGGER: dyn Logger;
//! }
//!
//! // Composition root: bind the contract to an implementation.
//! global().register_trait(&LOGGER, || Box::new(ConsoleLogger));
//!
//! // Anywhere else: resolve the contract.
//! let logger = fetch!(LOGGER);
//! assert_eq!(logger.log("ready"), "[console] ready");
//!
//! // Single is the default, so the same instance comes back.
//! assert!(Arc::ptr_eq(&logger, &fetch!(LOGGER)));
//! assert_eq!(global().instance_kind(&LOGGER), Some(InstanceKind::Single));
//! ```

mod binding;
pub mod config;
mod error;
mod global;
mod key;
mod kind;
#[cfg(feature = "local")]
mod local_registry;
mod macros;
mod registry;

pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use global::global;
pub use key::ServiceKey;
pub use kind::InstanceKind;
#[cfg(feature = "local")]
pub use local_registry::LocalRegistry;
pub use registry::Registry;

#[doc(hidden)]
pub mod __private {
  pub use once_cell::sync::Lazy;
}
