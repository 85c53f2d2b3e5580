//! The dynamic object model facades forward to.

use crate::error::{Error, Result};
use crate::value::{Function, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An object whose members can be read, written and called by name.
///
/// Implementors map member names onto their own fields and methods. Methods are
/// exposed as [`Value::Function`] members taking the object as receiver, so
/// `invoke(obj, "m", args)` behaves like `obj.m(args)`.
///
/// Objects are shared behind `Arc` and written through `&self`, so mutable
/// state needs interior mutability.
pub trait Object: Send + Sync {
  /// Reads a member. `Ok(None)` means the object has no such member.
  fn get(&self, member: &str) -> Result<Option<Value>>;

  /// Writes a member.
  fn set(&self, member: &str, value: Value) -> Result<()>;
}

impl fmt::Debug for dyn Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Object({:p})", self as *const dyn Object as *const ())
  }
}

/// Calls `member` on `receiver`, with `receiver` as the function's `this`.
pub fn invoke(receiver: &dyn Object, member: &str, args: &[Value]) -> Result<Value> {
  match receiver.get(member)? {
    Some(Value::Function(f)) => f.call(receiver, args),
    Some(_) => Err(Error::NotCallable(member.to_owned())),
    None => Err(Error::UnknownMember(member.to_owned())),
  }
}

/// Wraps a concrete object for registration in a container.
pub fn object<T: Object + 'static>(value: T) -> Arc<dyn Object> {
  Arc::new(value)
}

/// A plain bag of members.
///
/// Any member can be written, and writing an unknown one adds it.
///
/// ```
/// use fibre_facade::{invoke, Record, Value};
///
/// let record = Record::new()
///   .with("foo", "bar")
///   .with_method("bar", |_, _| Ok(Value::from("foo")));
///
/// assert_eq!(invoke(&record, "bar", &[]).unwrap(), Value::from("foo"));
/// ```
#[derive(Default)]
pub struct Record {
  members: RwLock<HashMap<String, Value>>,
}

impl Record {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(self, member: &str, value: impl Into<Value>) -> Self {
    self.members.write().insert(member.to_owned(), value.into());
    self
  }

  pub fn with_method(
    self,
    member: &str,
    f: impl Fn(&dyn Object, &[Value]) -> Result<Value> + Send + Sync + 'static,
  ) -> Self {
    self.with(member, Function::new(f))
  }
}

impl Object for Record {
  fn get(&self, member: &str) -> Result<Option<Value>> {
    Ok(self.members.read().get(member).cloned())
  }

  fn set(&self, member: &str, value: Value) -> Result<()> {
    self.members.write().insert(member.to_owned(), value);
    Ok(())
  }
}

impl fmt::Debug for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.members.read().iter()).finish()
  }
}
