use fibre_locator::{global, service_key};
use std::sync::{Arc, Mutex};

trait Logger: Send + Sync {
  fn log(&self, message: &str);
  fn history(&self) -> Vec<String>;
}

#[derive(Default)]
struct MemoryLogger {
  lines: Mutex<Vec<String>>,
}

impl Logger for MemoryLogger {
  fn log(&self, message: &str) {
    if let Ok(mut lines) = self.lines.lock() {
      lines.push(message.to_string());
    }
  }

  fn history(&self) -> Vec<String> {
    self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
  }
}

service_key! {
  static LOGGER: dyn Logger;
}

fn main() {
  // --- Put an existing instance ---
  let existing: Arc<dyn Logger> = Arc::new(MemoryLogger::default());
  existing.log("created before the registry knew about it");
  global().put_arc(&LOGGER, Arc::clone(&existing));

  let fetched = global().fetch(&LOGGER).expect("logger was just put");
  assert!(Arc::ptr_eq(&fetched, &existing));
  println!("Fetched the put instance: {:?}", fetched.history());

  // --- Overwrite it with a factory ---
  global().register_trait(&LOGGER, || Box::new(MemoryLogger::default()));

  let fresh = global().fetch(&LOGGER).expect("logger was just registered");
  assert!(!Arc::ptr_eq(&fresh, &existing));
  println!("After register, a fresh logger with history {:?}", fresh.history());
}
