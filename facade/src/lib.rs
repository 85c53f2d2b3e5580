//! # Fibre Facade
//!
//! Static-style facades over a [`fibre_ioc`] container.
//!
//! A facade is a stand-in for a service registered in the container under a
//! string accessor. It resolves that service (its *root*) the first time a
//! member is touched, and forwards reads, writes and calls to it from then on.
//!
//! ## Core Concepts
//!
//! - **Object**: the dynamic member surface facades forward to (`get`, `set`, and
//!   [`invoke`] for callable members).
//! - **FacadeRegistry**: the container facades resolve from, plus a cache of
//!   resolved roots keyed by accessor. `registry::global()` is the process-wide one;
//!   tests build their own.
//! - **FacadeAccessor**: implemented by each concrete facade (see [`facade!`]).
//!
//! ## Quick Start
//!
//! ```
//! use fibre_facade::{facade, object, FacadeAccessor, FacadeRegistry, Record, Value};
//! use fibre_ioc::Container;
//! use std::sync::Arc;
//!
//! facade!(pub Greeter => "greeter");
//!
//! let container = Container::new();
//! container.add_singleton_trait("greeter", |_| {
//!   Ok(object(
//!     Record::new()
//!       .with("greeting", "Hello")
//!       .with_method("greet", |this, args| {
//!         let greeting = this.get("greeting")?.unwrap_or_default();
//!         let who = args.first().and_then(Value::as_str).unwrap_or("World");
//!         Ok(format!("{}, {}!", greeting.as_str().unwrap_or_default(), who).into())
//!       }),
//!   ))
//! });
//!
//! let registry = Arc::new(FacadeRegistry::with_container(Arc::new(container)));
//! let greeter = Greeter::facade_in(&registry);
//!
//! assert_eq!(greeter.invoke("greet", &[Value::from("Ann")]).unwrap(), Value::from("Hello, Ann!"));
//! assert!(registry.has_resolved_instance("greeter"));
//! ```

mod config;
mod error;
mod macros;
mod object;
mod proxy;
pub mod registry;
mod value;

pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use object::{invoke, object, Object, Record};
pub use proxy::{Facade, FacadeAccessor, FacadeState, FACADE_ACCESSOR, FACADE_ROOT, OWN_MEMBERS};
pub use registry::{FacadeRegistry, RegistryBuilder, Resolver};
pub use value::{Function, Value};
