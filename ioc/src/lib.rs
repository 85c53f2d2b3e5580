//! # Fibre IoC
//!
//! A flexible, thread-safe Inversion of Control (IoC) container for Rust, keyed by
//! binding name.
//!
//! Services can be registered at any point during the application's lifecycle
//! and resolved by name. Resolution is fallible: a missing binding is a
//! [`BindingError`], a factory that cannot produce its instance is a [`BuildError`].
//!
//! ## Core Concepts
//!
//! - **Container**: The central registry for all your bindings.
//! - **Global Container**: A static, globally-available container, accessible via `global()`.
//! - **Lifetimes**: instances, singletons (built once, on first `make`) and transients
//!   (built on every `make`).
//! - **Traits**: Bindings can serve a trait object, e.g. `Arc<dyn Greeter>`.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_ioc::{global, resolve};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!   message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     self.message.clone()
//!   }
//! }
//!
//! global().add_instance("greeting_message", String::from("Hello, World!"));
//!
//! // A factory can resolve its own dependencies through the build context.
//! global().add_singleton_trait::<dyn Greeter>("greeter", |ctx| {
//!   let message = ctx.make::<String>("greeting_message")?;
//!   Ok(Arc::new(EnglishGreeter { message: (*message).clone() }))
//! });
//!
//! let greeter = resolve!(trait Greeter, "greeter");
//! assert_eq!(greeter.greet(), "Hello, World!");
//! ```

mod container;
mod core;
mod error;
mod global;
mod macros;

pub use container::{BuildContext, Container, Parameter};
pub use error::{BindingError, BuildError, ContainerError, Result};
pub use global::global;
