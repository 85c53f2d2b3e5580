//! The main `Container` struct and its associated methods.

use crate::core::{Factory, Instance, Provider, ResolutionGuard, ResolutionKey};
use crate::error::{BindingError, BuildError, ContainerError, Result};
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::sync::Arc;
use tracing::trace;

/// An optional argument passed through [`Container::make_with`] to a factory.
pub type Parameter = Arc<dyn Any + Send + Sync>;

/// What a factory sees while it builds an instance.
///
/// Factories use it to resolve their own dependencies from the same container
/// and to read the parameters the caller passed to `make_with`.
pub struct BuildContext<'a> {
  container: &'a Container,
  name: &'a str,
  parameters: &'a [Parameter],
}

impl<'a> BuildContext<'a> {
  pub fn container(&self) -> &'a Container {
    self.container
  }

  /// The binding name being built.
  pub fn name(&self) -> &'a str {
    self.name
  }

  pub fn parameters(&self) -> &'a [Parameter] {
    self.parameters
  }

  /// Returns the parameter at `index`, downcast to `T`.
  pub fn parameter<T: Any + Send + Sync>(&self, index: usize) -> Result<&'a T, BuildError> {
    self
      .parameters
      .get(index)
      .and_then(|param| param.as_ref().downcast_ref::<T>())
      .ok_or(BuildError::Parameter(index))
  }

  /// Resolves another binding from the container that is building this one.
  pub fn make<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.container.make::<T>(name)
  }
}

/// The Inversion of Control (IoC) container.
///
/// Holds named bindings. It is thread-safe and allows registration and
/// resolution at any point of the application's lifecycle.
#[derive(Default)]
pub struct Container {
  providers: DashMap<String, Arc<Provider>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn register(&self, name: &str, provider: Provider) {
    let type_name = provider.type_name();
    let replaced = self
      .providers
      .insert(name.to_owned(), Arc::new(provider))
      .is_some();
    trace!(binding = name, type_name, replaced, "registered binding");
  }

  fn boxed_factory<T: Any + Send + Sync>(
    factory: impl Fn(&BuildContext<'_>) -> Result<T, BuildError> + Send + Sync + 'static,
  ) -> Factory {
    Box::new(move |ctx: &BuildContext<'_>| factory(ctx).map(|value| Box::new(Arc::new(value)) as Instance))
  }

  fn boxed_trait_factory<I: ?Sized + Any + Send + Sync>(
    factory: impl Fn(&BuildContext<'_>) -> Result<Arc<I>, BuildError> + Send + Sync + 'static,
  ) -> Factory {
    Box::new(move |ctx: &BuildContext<'_>| factory(ctx).map(|value| Box::new(value) as Instance))
  }

  fn key(&self, name: &str) -> ResolutionKey {
    ResolutionKey {
      container: self as *const Container as usize,
      name: name.to_owned(),
    }
  }

  // --- PUBLIC API ---

  // --- Instance Registration ---
  pub fn add_instance<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.register(
      name,
      Provider::Instance {
        instance: Box::new(Arc::new(instance)),
        type_name: type_name::<T>(),
      },
    );
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&BuildContext<'_>) -> Result<T, BuildError> + Send + Sync + 'static,
  ) {
    self.register(
      name,
      Provider::Singleton {
        cell: once_cell::sync::OnceCell::new(),
        factory: Self::boxed_factory(factory),
        type_name: type_name::<T>(),
      },
    );
  }

  // --- Transient Registration ---
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&BuildContext<'_>) -> Result<T, BuildError> + Send + Sync + 'static,
  ) {
    self.register(
      name,
      Provider::Transient {
        factory: Self::boxed_factory(factory),
        type_name: type_name::<T>(),
      },
    );
  }

  // --- Trait Registration ---
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&BuildContext<'_>) -> Result<Arc<I>, BuildError> + Send + Sync + 'static,
  ) {
    self.register(
      name,
      Provider::Singleton {
        cell: once_cell::sync::OnceCell::new(),
        factory: Self::boxed_trait_factory(factory),
        type_name: type_name::<I>(),
      },
    );
  }

  pub fn add_transient_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&BuildContext<'_>) -> Result<Arc<I>, BuildError> + Send + Sync + 'static,
  ) {
    self.register(
      name,
      Provider::Transient {
        factory: Self::boxed_trait_factory(factory),
        type_name: type_name::<I>(),
      },
    );
  }

  // --- Bookkeeping ---

  pub fn has(&self, name: &str) -> bool {
    self.providers.contains_key(name)
  }

  /// Removes one binding. Returns whether it existed.
  pub fn forget(&self, name: &str) -> bool {
    self.providers.remove(name).is_some()
  }

  /// Removes every binding.
  pub fn flush(&self) {
    self.providers.clear();
    trace!("flushed all bindings");
  }

  pub fn len(&self) -> usize {
    self.providers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }

  // --- Resolution ---

  /// Resolves a binding from the container.
  pub fn make<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.make_with::<T>(name, &[])
  }

  /// Resolves a binding, handing `parameters` to its factory.
  ///
  /// Parameters are ignored once a singleton has been built.
  pub fn make_with<T: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    parameters: &[Parameter],
  ) -> Result<Arc<T>> {
    // Clone the provider out so the map shard is not locked while factories run.
    let provider = self
      .providers
      .get(name)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| BindingError::NotBound(name.to_owned()))?;

    let build_failed = |source: BuildError| ContainerError::Build {
      name: name.to_owned(),
      source,
    };

    let _guard = ResolutionGuard::enter(self.key(name)).map_err(build_failed)?;
    let ctx = BuildContext {
      container: self,
      name,
      parameters,
    };

    let resolved = provider
      .with_instance(&ctx, |instance| instance.downcast_ref::<Arc<T>>().cloned())
      .map_err(build_failed)?;

    resolved.ok_or_else(|| {
      BindingError::TypeMismatch {
        name: name.to_owned(),
        expected: type_name::<T>(),
        found: provider.type_name(),
      }
      .into()
    })
  }

  /// Resolves a binding, discarding the reason on failure.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    self.make::<T>(name).ok()
  }
}
