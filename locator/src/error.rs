use thiserror::Error;

/// The main error type for the `fibre_locator` library.
#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "Error while fetching service '{key}'. Service is unknown. Register the service or put it into the registry."
  )]
  UnknownService { key: String },

  #[error("Error while fetching service '{key}'. The binding has neither a factory nor an instance.")]
  NoInstance { key: String },

  #[error("Error while binding service '{key}'. Instance kind '{kind}' is unsupported.")]
  UnsupportedInstanceKind { key: String, kind: String },

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

impl Error {
  /// Returns `true` for errors caused by broken binding code rather than by a
  /// normal runtime condition. These should not be caught and ignored.
  pub fn is_defect(&self) -> bool {
    matches!(self, Error::UnsupportedInstanceKind { .. })
  }
}

/// A specialized `Result` type for `fibre_locator` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
