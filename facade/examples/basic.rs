use fibre_facade::{facade, object, registry, FacadeAccessor, Record, Value};
use fibre_ioc::global;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

facade!(
  /// Stands in for the application's mailer.
  Mailer => "mailer"
);

fn main() -> fibre_facade::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  // --- Registration ---
  global().add_singleton_trait("mailer", |_| {
    Ok(object(
      Record::new()
        .with("from", "noreply@example.com")
        .with_method("send", |this, args| {
          let from = this.get("from")?.unwrap_or_default();
          let to = args.first().and_then(Value::as_str).unwrap_or("nobody");
          Ok(Value::from(format!(
            "{} -> {}",
            from.as_str().unwrap_or_default(),
            to
          )))
        }),
    ))
  });
  registry::global().init(Arc::new(global()));

  // --- Usage ---
  let mailer = Mailer::facade();
  println!("state before first use: {:?}", mailer.state());

  mailer.set("from", Value::from("team@example.com"))?;
  let sent = mailer.invoke("send", &[Value::from("ann@example.com")])?;

  println!("{:?}", sent);
  println!("state after first use: {:?}", mailer.state());
  Ok(())
}
