use thiserror::Error;

/// A binding is missing, or does not serve the requested type.
#[derive(Debug, Error)]
pub enum BindingError {
  #[error("no binding registered for \"{0}\"")]
  NotBound(String),

  #[error("binding \"{name}\" provides {found}, not {expected}")]
  TypeMismatch {
    name: String,
    expected: &'static str,
    found: &'static str,
  },
}

/// A binding exists but its instance could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("circular dependency detected while resolving \"{0}\"")]
  Circular(String),

  #[error("dependency could not be resolved: {0}")]
  Dependency(#[source] Box<ContainerError>),

  #[error("missing or invalid parameter at index {0}")]
  Parameter(usize),

  #[error("{0}")]
  Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BuildError {
  /// Wraps an arbitrary factory failure.
  pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    BuildError::Failed(err.into())
  }
}

impl From<ContainerError> for BuildError {
  fn from(err: ContainerError) -> Self {
    BuildError::Dependency(Box::new(err))
  }
}

/// The error returned by [`Container::make`](crate::Container::make).
#[derive(Debug, Error)]
pub enum ContainerError {
  #[error(transparent)]
  Binding(#[from] BindingError),

  #[error("failed to build \"{name}\": {source}")]
  Build {
    name: String,
    #[source]
    source: BuildError,
  },
}

impl ContainerError {
  pub fn is_binding(&self) -> bool {
    matches!(self, ContainerError::Binding(_))
  }

  pub fn is_build(&self) -> bool {
    matches!(self, ContainerError::Build { .. })
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
