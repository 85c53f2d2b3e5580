//! Facades: stand-ins that forward every member access to a lazily resolved root.

use crate::error::{Error, Result};
use crate::object::Object;
use crate::registry::{self, FacadeRegistry};
use crate::value::Value;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Member names answered by the facade itself rather than its root.
pub const OWN_MEMBERS: &[&str] = &[FACADE_ACCESSOR, FACADE_ROOT];

/// Read/write: the accessor, as `Str`, or `Null` when unset.
pub const FACADE_ACCESSOR: &str = "facade_accessor";

/// Read-only: the resolved root, as `Object`.
pub const FACADE_ROOT: &str = "facade_root";

/// Implemented by every concrete facade.
///
/// This is the only way to obtain a [`Facade`]; there is no facade without an accessor
/// type behind it.
///
/// ```compile_fail
/// // `Facade` has no public constructor.
/// let facade = fibre_facade::Facade::new("cache", fibre_facade::registry::global().clone());
/// ```
pub trait FacadeAccessor {
  /// The container entry this facade stands in for.
  const ACCESSOR: &'static str;

  /// A facade bound to the global registry.
  fn facade() -> Facade {
    Self::facade_in(registry::global())
  }

  /// A facade bound to `registry`.
  fn facade_in(registry: &Arc<FacadeRegistry>) -> Facade {
    Facade::new(Self::ACCESSOR, Arc::clone(registry))
  }

  /// Resolves this facade's root from the global registry.
  fn root() -> Result<Arc<dyn Object>> {
    registry::global().resolve_facade_instance(Self::ACCESSOR)
  }
}

/// Whether a facade's root is currently cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacadeState {
  Unresolved,
  Resolved,
}

/// A delegating wrapper around the root resolved for its accessor.
///
/// Reads, writes and calls of [`OWN_MEMBERS`] are handled by the facade. Any
/// other member is forwarded to the root, which is resolved through the
/// registry on first use. The registry's cache is authoritative: after the
/// accessor's entry is cleared, the next access resolves a fresh root.
pub struct Facade {
  accessor: RwLock<Option<String>>,
  registry: Arc<FacadeRegistry>,
}

impl Facade {
  pub(crate) fn new(accessor: &str, registry: Arc<FacadeRegistry>) -> Self {
    Self {
      accessor: RwLock::new(Some(accessor.to_owned())),
      registry,
    }
  }

  pub fn facade_accessor(&self) -> Option<String> {
    self.accessor.read().clone()
  }

  pub fn set_facade_accessor(&self, accessor: Option<String>) {
    *self.accessor.write() = accessor;
  }

  pub fn registry(&self) -> &Arc<FacadeRegistry> {
    &self.registry
  }

  /// Resolves the root this facade forwards to.
  pub fn facade_root(&self) -> Result<Arc<dyn Object>> {
    let accessor = self.facade_accessor().ok_or(Error::MissingAccessor)?;
    self.registry.resolve_facade_instance(&accessor)
  }

  pub fn state(&self) -> FacadeState {
    match self.accessor.read().as_deref() {
      Some(accessor) if self.registry.has_resolved_instance(accessor) => FacadeState::Resolved,
      _ => FacadeState::Unresolved,
    }
  }

  /// Reads a member.
  ///
  /// Callable members of the root come back bound to the root, so calling them
  /// later runs against the root whatever receiver is passed.
  pub fn get(&self, member: &str) -> Result<Option<Value>> {
    match member {
      FACADE_ACCESSOR => return Ok(Some(self.facade_accessor().into())),
      FACADE_ROOT => return self.facade_root().map(|root| Some(Value::Object(root))),
      _ => {}
    }

    let root = self.facade_root()?;
    let value = root.get(member)?;
    Ok(value.map(|value| match value {
      Value::Function(f) => Value::Function(f.bind(root)),
      other => other,
    }))
  }

  /// Writes a member, on the facade for own members and on the root otherwise.
  pub fn set(&self, member: &str, value: Value) -> Result<()> {
    match member {
      FACADE_ACCESSOR => match value {
        Value::Str(accessor) => self.set_facade_accessor(Some(accessor)),
        Value::Null => self.set_facade_accessor(None),
        other => {
          return Err(Error::InvalidValue {
            member: member.to_owned(),
            expected: "string or null",
            found: other.kind(),
          })
        }
      },
      FACADE_ROOT => return Err(Error::ReadOnly(member.to_owned())),
      _ => self.facade_root()?.set(member, value)?,
    }
    Ok(())
  }

  /// Calls a member of the root with the root as receiver.
  pub fn invoke(&self, member: &str, args: &[Value]) -> Result<Value> {
    if OWN_MEMBERS.contains(&member) {
      return Err(Error::NotCallable(member.to_owned()));
    }
    let root = self.facade_root()?;
    crate::object::invoke(root.as_ref(), member, args)
  }
}

impl Object for Facade {
  fn get(&self, member: &str) -> Result<Option<Value>> {
    Facade::get(self, member)
  }

  fn set(&self, member: &str, value: Value) -> Result<()> {
    Facade::set(self, member, value)
  }
}

impl fmt::Debug for Facade {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Facade")
      .field("accessor", &self.facade_accessor())
      .field("state", &self.state())
      .finish_non_exhaustive()
  }
}
