//! Dynamic values read from and written to objects.

use crate::error::Result;
use crate::object::Object;
use std::fmt;
use std::sync::Arc;

type Callable = dyn Fn(&dyn Object, &[Value]) -> Result<Value> + Send + Sync;

/// A shared callable member.
///
/// The first argument is the receiver the function runs against (its `this`).
#[derive(Clone)]
pub struct Function(Arc<Callable>);

impl Function {
  pub fn new(f: impl Fn(&dyn Object, &[Value]) -> Result<Value> + Send + Sync + 'static) -> Self {
    Function(Arc::new(f))
  }

  pub fn call(&self, receiver: &dyn Object, args: &[Value]) -> Result<Value> {
    (self.0)(receiver, args)
  }

  /// Returns a function that always runs against `receiver`, whatever
  /// receiver it is later called with.
  pub fn bind(&self, receiver: Arc<dyn Object>) -> Function {
    let inner = self.clone();
    Function::new(move |_, args| inner.call(receiver.as_ref(), args))
  }

  pub fn ptr_eq(&self, other: &Function) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl fmt::Debug for Function {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Function({:p})", Arc::as_ptr(&self.0) as *const ())
  }
}

/// A value held by an object member.
#[derive(Clone, Default)]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  List(Vec<Value>),
  Function(Function),
  Object(Arc<dyn Object>),
}

impl Value {
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Int(i) => Some(*i),
      _ => None,
    }
  }

  /// Integers widen to floats.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Float(f) => Some(*f),
      Value::Int(i) => Some(*i as f64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::Str(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_function(&self) -> Option<&Function> {
    match self {
      Value::Function(f) => Some(f),
      _ => None,
    }
  }

  pub fn as_object(&self) -> Option<&Arc<dyn Object>> {
    match self {
      Value::Object(o) => Some(o),
      _ => None,
    }
  }

  /// A short name for the variant, used in error messages.
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::Str(_) => "string",
      Value::List(_) => "list",
      Value::Function(_) => "function",
      Value::Object(_) => "object",
    }
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("Null"),
      Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
      Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
      Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
      Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
      Value::List(items) => f.debug_tuple("List").field(items).finish(),
      Value::Function(func) => fmt::Debug::fmt(func, f),
      Value::Object(o) => fmt::Debug::fmt(o, f),
    }
  }
}

// Data compares by value, functions and objects by identity.
impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Int(a), Value::Int(b)) => a == b,
      (Value::Float(a), Value::Float(b)) => a == b,
      (Value::Str(a), Value::Str(b)) => a == b,
      (Value::List(a), Value::List(b)) => a == b,
      (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
      (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Int(i)
  }
}

impl From<i32> for Value {
  fn from(i: i32) -> Self {
    Value::Int(i64::from(i))
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Value::Float(f)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Str(s.to_owned())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Str(s)
  }
}

impl From<Function> for Value {
  fn from(f: Function) -> Self {
    Value::Function(f)
  }
}

impl From<Arc<dyn Object>> for Value {
  fn from(o: Arc<dyn Object>) -> Self {
    Value::Object(o)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    value.map_or(Value::Null, Into::into)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(items: Vec<T>) -> Self {
    Value::List(items.into_iter().map(Into::into).collect())
  }
}
