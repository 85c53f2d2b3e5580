#![allow(dead_code)]

use fibre_facade::{object, Error, FacadeRegistry, Function, Object, Resolver, Result, Value};
use fibre_ioc::{Container, ContainerError, Parameter};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const IDENTIFIER: &str = "@myConcrete";

/// A root with a typed `name` property, two methods, and members attached at
/// construction (`foo` and the function `bar`).
pub struct Concrete {
  name: RwLock<Option<String>>,
  attached: RwLock<HashMap<String, Value>>,
}

impl Default for Concrete {
  fn default() -> Self {
    let attached = HashMap::from([
      ("foo".to_owned(), Value::from("bar")),
      (
        "bar".to_owned(),
        Value::Function(Function::new(|_, _| Ok(Value::from("foo")))),
      ),
    ]);
    Self {
      name: RwLock::new(None),
      attached: RwLock::new(attached),
    }
  }
}

impl Object for Concrete {
  fn get(&self, member: &str) -> Result<Option<Value>> {
    let value = match member {
      "name" => Value::from(self.name.read().clone()),
      "say_hi" => Value::Function(Function::new(|this, _| {
        let name = this.get("name")?.unwrap_or_default();
        Ok(Value::from(format!("Hi {}", name.as_str().unwrap_or_default())))
      })),
      "say_hallo" => Value::Function(Function::new(|_, args| {
        let name = args
          .first()
          .and_then(Value::as_str)
          .ok_or_else(|| Error::InvalidArgument {
            member: "say_hallo".to_owned(),
            index: 0,
            expected: "string",
          })?;
        Ok(Value::from(format!("Hallo {}", name)))
      })),
      // Reports what the receiver answers for the facade's own accessor member.
      "receiver_accessor" => Value::Function(Function::new(|this, _| {
        Ok(this.get("facade_accessor")?.unwrap_or_default())
      })),
      _ => return Ok(self.attached.read().get(member).cloned()),
    };
    Ok(Some(value))
  }

  fn set(&self, member: &str, value: Value) -> Result<()> {
    match member {
      "name" => match value {
        Value::Str(name) => *self.name.write() = Some(name),
        Value::Null => *self.name.write() = None,
        other => {
          return Err(Error::InvalidValue {
            member: member.to_owned(),
            expected: "string or null",
            found: other.kind(),
          })
        }
      },
      "say_hi" | "say_hallo" | "receiver_accessor" => {
        return Err(Error::ReadOnly(member.to_owned()))
      }
      _ => {
        self.attached.write().insert(member.to_owned(), value);
      }
    }
    Ok(())
  }
}

/// Counts how often the registry asks the container for a root.
#[derive(Default)]
pub struct CountingResolver {
  pub container: Container,
  calls: AtomicUsize,
}

impl CountingResolver {
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl Resolver for CountingResolver {
  fn make(
    &self,
    name: &str,
    parameters: &[Parameter],
  ) -> std::result::Result<Arc<dyn Object>, ContainerError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.container.make_with::<dyn Object>(name, parameters)
  }
}

/// A fresh resolver and an isolated registry using it.
pub fn isolated() -> (Arc<CountingResolver>, Arc<FacadeRegistry>) {
  let resolver = Arc::new(CountingResolver::default());
  let registry = Arc::new(FacadeRegistry::with_container(resolver.clone()));
  (resolver, registry)
}

/// Binds a new `Concrete` on every `make`.
pub fn bind_concrete(container: &Container, name: &str) {
  container.add_transient_trait::<dyn Object>(name, |_| Ok(object(Concrete::default())));
}
