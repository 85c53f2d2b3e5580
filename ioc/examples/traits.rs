use fibre_ioc::{global, resolve};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // --- Registration ---
  global().add_singleton_trait::<dyn Logger>("logger", |_| Ok(Arc::new(ConsoleLogger)));

  // The factory resolves its own dependency through the build context.
  global().add_singleton("reports", |ctx| {
    Ok(ReportService {
      logger: ctx.make::<dyn Logger>("logger")?,
    })
  });

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(ReportService, "reports");

  println!("Using the service...");
  report_service.generate_report();
}
