//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Built lazily on first use by `global()`.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// # Examples
///
/// ```
/// use fibre_ioc::global;
///
/// global().add_instance("greeting", String::from("Hello from global!"));
/// assert!(global().has("greeting"));
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
