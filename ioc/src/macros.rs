//! Public macros for ergonomic service resolution.

/// Resolves a named binding from the global container.
///
/// # Panics
///
/// Panics if the binding is missing, serves another type, or fails to build.
/// For a fallible version, use `global().make(...)` directly.
///
/// # Examples
///
/// ```
/// use fibre_ioc::{global, resolve};
///
/// global().add_singleton("message", |_| Ok(String::from("hello")));
///
/// let message = resolve!(String, "message");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use fibre_ioc::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().add_singleton_trait::<dyn Greeter>("greeter", |_| Ok(Arc::new(EnglishGreeter)));
///
/// let greeter = resolve!(trait Greeter, "greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(trait MyTrait, "name")
  (trait $trait_ident:ident, $name:expr) => {
    $crate::global()
      .make::<dyn $trait_ident>($name)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service '{}': {}",
          $name, err
        )
      })
  };

  // resolve!(MyService, "name")
  ($type:ty, $name:expr) => {
    $crate::global()
      .make::<$type>($name)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service '{}': {}",
          $name, err
        )
      })
  };
}
