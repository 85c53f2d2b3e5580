use fibre_ioc::ContainerError;
use thiserror::Error;

/// The main error type for the `fibre_facade` library.
#[derive(Debug, Error)]
pub enum Error {
  /// The container failed to resolve the facade root. Binding and build
  /// errors are passed through as the container reported them.
  #[error(transparent)]
  Container(#[from] ContainerError),

  #[error("no container has been set on the facade registry")]
  ContainerUnavailable,

  /// An accessor was resolved again while its own root was being built.
  #[error("circular facade resolution of `{0}`")]
  Circular(String),

  #[error("facade has no accessor")]
  MissingAccessor,

  #[error("unknown member `{0}`")]
  UnknownMember(String),

  #[error("member `{0}` is not callable")]
  NotCallable(String),

  #[error("member `{0}` is read-only")]
  ReadOnly(String),

  #[error("invalid value for `{member}`: expected {expected}, found {found}")]
  InvalidValue {
    member: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("invalid argument {index} for `{member}`: expected {expected}")]
  InvalidArgument {
    member: String,
    index: usize,
    expected: &'static str,
  },

  #[error("failed to parse registry configuration: {0}")]
  Config(#[from] serde_yaml::Error),
}

impl Error {
  /// `true` when the container had no binding for the requested accessor.
  pub fn is_binding(&self) -> bool {
    matches!(self, Error::Container(err) if err.is_binding())
  }

  /// `true` when the container had a binding but could not build it.
  pub fn is_build(&self) -> bool {
    matches!(self, Error::Container(err) if err.is_build())
  }
}

/// A specialized `Result` type for `fibre_facade` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
