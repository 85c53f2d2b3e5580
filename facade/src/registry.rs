//! The facade registry: the container facades resolve from, and the cache of
//! roots they have already resolved.

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::object::Object;
use dashmap::DashMap;
use fibre_ioc::{Container, ContainerError, Parameter};
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The container contract facades consume.
pub trait Resolver: Send + Sync {
  /// Resolves the object bound under `name`.
  fn make(&self, name: &str, parameters: &[Parameter])
    -> std::result::Result<Arc<dyn Object>, ContainerError>;
}

/// Resolves bindings registered as `dyn Object`.
impl Resolver for Container {
  fn make(
    &self,
    name: &str,
    parameters: &[Parameter],
  ) -> std::result::Result<Arc<dyn Object>, ContainerError> {
    self.make_with::<dyn Object>(name, parameters)
  }
}

impl<R: Resolver + ?Sized> Resolver for &'static R {
  fn make(
    &self,
    name: &str,
    parameters: &[Parameter],
  ) -> std::result::Result<Arc<dyn Object>, ContainerError> {
    (**self).make(name, parameters)
  }
}

type RootCell = Arc<OnceCell<Arc<dyn Object>>>;

thread_local! {
  // Accessors this thread is resolving, per registry address.
  static IN_FLIGHT: RefCell<HashSet<(usize, String)>> = RefCell::new(HashSet::new());
}

/// Marks an accessor as being resolved on this thread until dropped.
///
/// A root whose construction resolves its own accessor again would otherwise
/// wait on its own cell forever.
struct InFlight {
  key: (usize, String),
}

impl InFlight {
  fn enter(registry: &FacadeRegistry, accessor: &str) -> Result<Self> {
    let key = (registry as *const FacadeRegistry as usize, accessor.to_owned());
    let inserted = IN_FLIGHT.with(|set| set.borrow_mut().insert(key.clone()));
    if !inserted {
      return Err(Error::Circular(accessor.to_owned()));
    }
    Ok(Self { key })
  }
}

impl Drop for InFlight {
  fn drop(&mut self) {
    IN_FLIGHT.with(|set| {
      set.borrow_mut().remove(&self.key);
    });
  }
}

/// Holds the container facades resolve from and the roots resolved so far.
///
/// The resolved-instance cache is keyed by accessor, so every facade with the
/// same accessor sees the same root until that entry is cleared.
#[derive(Default)]
pub struct FacadeRegistry {
  container: RwLock<Option<Arc<dyn Resolver>>>,
  resolved: DashMap<String, RootCell>,
  aliases: HashMap<String, String>,
}

impl FacadeRegistry {
  /// Creates a registry with no container and an empty cache.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_container(container: Arc<dyn Resolver>) -> Self {
    Self::builder().container(container).build()
  }

  pub fn builder() -> RegistryBuilder {
    RegistryBuilder::default()
  }

  // --- Container ---

  /// Sets the container used by every subsequent resolution.
  pub fn init(&self, container: Arc<dyn Resolver>) {
    self.set_container(Some(container));
  }

  /// Sets or unsets the container. Roots already cached stay cached.
  pub fn set_container(&self, container: Option<Arc<dyn Resolver>>) {
    trace!(present = container.is_some(), "facade container set");
    *self.container.write() = container;
  }

  pub fn container(&self) -> Option<Arc<dyn Resolver>> {
    self.container.read().clone()
  }

  /// Unsets the container and clears every resolved root.
  pub fn reset(&self) {
    self.set_container(None);
    self.clear_resolved_instances();
  }

  /// The container binding that backs `accessor`.
  pub fn binding_for<'a>(&'a self, accessor: &'a str) -> &'a str {
    self.aliases.get(accessor).map_or(accessor, String::as_str)
  }

  // --- Resolution ---

  /// Returns the root for `accessor`, asking the container on a cache miss.
  ///
  /// The container is asked at most once per accessor between clears, even
  /// when several threads miss at the same time. A failed resolution caches
  /// nothing and its error is returned unchanged. Resolving an accessor again
  /// from inside its own construction fails with [`Error::Circular`].
  pub fn resolve_facade_instance(&self, accessor: &str) -> Result<Arc<dyn Object>> {
    if let Some(root) = self.cached(accessor) {
      trace!(accessor, "facade root cache hit");
      return Ok(root);
    }

    let _guard = InFlight::enter(self, accessor)?;
    let cell = Arc::clone(self.resolved.entry(accessor.to_owned()).or_default().value());
    let result = cell
      .get_or_try_init(|| {
        let container = self.container().ok_or(Error::ContainerUnavailable)?;
        let binding = self.binding_for(accessor);
        debug!(accessor, binding, "resolving facade root");
        container.make(binding, &[]).map_err(Error::from)
      })
      .map(Arc::clone);

    if result.is_err() {
      // Drop the empty cell so failed accessors leave no entry behind.
      self
        .resolved
        .remove_if(accessor, |_, current| Arc::ptr_eq(current, &cell) && current.get().is_none());
    }
    result
  }

  fn cached(&self, accessor: &str) -> Option<Arc<dyn Object>> {
    self
      .resolved
      .get(accessor)
      .and_then(|cell| cell.get().cloned())
  }

  // --- Cache management ---

  pub fn has_resolved_instance(&self, accessor: &str) -> bool {
    self.cached(accessor).is_some()
  }

  /// Forgets the root for `accessor`. No-op if it was never resolved.
  pub fn clear_resolved_instance(&self, accessor: &str) {
    if self.resolved.remove(accessor).is_some() {
      debug!(accessor, "cleared resolved facade root");
    }
  }

  pub fn clear_resolved_instances(&self) {
    self.resolved.clear();
    debug!("cleared all resolved facade roots");
  }

  /// Accessors with a cached root, sorted.
  pub fn resolved_accessors(&self) -> Vec<String> {
    let mut accessors: Vec<String> = self
      .resolved
      .iter()
      .filter(|entry| entry.value().get().is_some())
      .map(|entry| entry.key().clone())
      .collect();
    accessors.sort();
    accessors
  }
}

impl fmt::Debug for FacadeRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FacadeRegistry")
      .field("has_container", &self.container.read().is_some())
      .field("resolved", &self.resolved_accessors())
      .field("aliases", &self.aliases)
      .finish()
  }
}

/// A builder for [`FacadeRegistry`] instances.
#[derive(Default)]
pub struct RegistryBuilder {
  container: Option<Arc<dyn Resolver>>,
  aliases: HashMap<String, String>,
}

impl RegistryBuilder {
  pub fn container(mut self, container: Arc<dyn Resolver>) -> Self {
    self.container = Some(container);
    self
  }

  /// Resolves `accessor` from the `binding` entry of the container.
  pub fn alias(mut self, accessor: &str, binding: &str) -> Self {
    self.aliases.insert(accessor.to_owned(), binding.to_owned());
    self
  }

  /// Applies a loaded configuration. Its aliases override earlier ones.
  pub fn config(mut self, config: RegistryConfig) -> Self {
    self.aliases.extend(config.aliases);
    self
  }

  pub fn build(self) -> FacadeRegistry {
    FacadeRegistry {
      container: RwLock::new(self.container),
      resolved: DashMap::new(),
      aliases: self.aliases,
    }
  }
}

impl fmt::Debug for RegistryBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegistryBuilder")
      .field("has_container", &self.container.is_some())
      .field("aliases", &self.aliases)
      .finish()
  }
}

static GLOBAL_REGISTRY: Lazy<Arc<FacadeRegistry>> = Lazy::new(Default::default);

/// The process-wide registry used by [`FacadeAccessor::facade`](crate::FacadeAccessor::facade).
///
/// The hosting application sets its container once, before any facade is used:
///
/// ```
/// use fibre_facade::registry;
/// use std::sync::Arc;
///
/// registry::global().init(Arc::new(fibre_ioc::global()));
/// ```
pub fn global() -> &'static Arc<FacadeRegistry> {
  &GLOBAL_REGISTRY
}
