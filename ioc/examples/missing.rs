use fibre_ioc::{global, resolve, BuildError};
use std::panic;

struct UnregisteredService;
struct BrokenService;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a binding that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService, "unregistered");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `make()` method ---
  println!("\nNow, attempting to resolve using `make()`...");

  match global().make::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the binding!"),
    Err(err) => println!("Binding error: {} (is_binding = {})", err, err.is_binding()),
  }

  // A registered binding whose factory fails is a build error instead.
  global().add_singleton::<BrokenService>("broken", |_| Err(BuildError::failed("disk full")));

  match global().make::<BrokenService>("broken") {
    Ok(_) => panic!("Should not have built the service!"),
    Err(err) => println!("Build error: {} (is_build = {})", err, err.is_build()),
  }
}
