//! Core, non-public data structures for the IoC container.

use crate::container::BuildContext;
use crate::error::BuildError;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

thread_local! {
  // The set of bindings currently being built on this thread, per container.
  // Re-entering one of them means a circular dependency.
  static RESOLVING_STACK: RefCell<HashSet<ResolutionKey>> = RefCell::new(HashSet::new());
}

/// An RAII guard that detects circular dependencies.
///
/// Creating the guard pushes the key onto the thread-local resolution stack and
/// fails if it is already there. Dropping the guard pops it again.
pub(crate) struct ResolutionGuard {
  key: ResolutionKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: ResolutionKey) -> Result<Self, BuildError> {
    let inserted = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(key.clone()));
    if !inserted {
      return Err(BuildError::Circular(key.name));
    }
    Ok(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// Identifies a binding being built: the owning container's address plus the name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct ResolutionKey {
  pub(crate) container: usize,
  pub(crate) name: String,
}

impl fmt::Debug for ResolutionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key(Container({:#x}), Name({}))", self.container, self.name)
  }
}

pub(crate) type Instance = Box<dyn Any + Send + Sync>;

pub(crate) type Factory =
  Box<dyn Fn(&BuildContext<'_>) -> Result<Instance, BuildError> + Send + Sync>;

pub(crate) enum Provider {
  Instance {
    instance: Instance,
    type_name: &'static str,
  },
  Singleton {
    cell: once_cell::sync::OnceCell<Instance>,
    factory: Factory,
    type_name: &'static str,
  },
  Transient {
    factory: Factory,
    type_name: &'static str,
  },
}

impl Provider {
  pub(crate) fn type_name(&self) -> &'static str {
    match self {
      Provider::Instance { type_name, .. }
      | Provider::Singleton { type_name, .. }
      | Provider::Transient { type_name, .. } => *type_name,
    }
  }

  /// Runs `f` against the instance this provider serves, building it if needed.
  ///
  /// Singletons are built at most once; a failed build leaves the cell empty.
  pub(crate) fn with_instance<R>(
    &self,
    ctx: &BuildContext<'_>,
    f: impl FnOnce(&Instance) -> R,
  ) -> Result<R, BuildError> {
    match self {
      Provider::Instance { instance, .. } => Ok(f(instance)),
      Provider::Singleton { cell, factory, .. } => {
        let instance = cell.get_or_try_init(|| factory(ctx))?;
        Ok(f(instance))
      }
      Provider::Transient { factory, .. } => {
        let instance = factory(ctx)?;
        Ok(f(&instance))
      }
    }
  }
}
