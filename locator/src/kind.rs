//! Instantiation policies for a binding.

use std::fmt;

/// How a binding turns its factory into instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InstanceKind {
  /// Create at most once per binding. The first resolution caches the instance and
  /// every later resolution returns that same instance.
  #[default]
  Single,
  /// Create a new instance on every resolution. Nothing is cached.
  Multi,
}

impl InstanceKind {
  /// Parses a kind from its configuration spelling.
  ///
  /// Accepts `single`, `single_instantiable`, `multi` and `multi_instantiable`,
  /// ignoring ASCII case and surrounding whitespace. Returns `None` for anything else.
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("single") || value.eq_ignore_ascii_case("single_instantiable") {
      Some(InstanceKind::Single)
    } else if value.eq_ignore_ascii_case("multi") || value.eq_ignore_ascii_case("multi_instantiable") {
      Some(InstanceKind::Multi)
    } else {
      None
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InstanceKind::Single => "single",
      InstanceKind::Multi => "multi",
    }
  }
}

impl fmt::Display for InstanceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
