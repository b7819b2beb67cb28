use fibre_locator::{fetch, global, service_key, InstanceKind};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

service_key! {
  static SINGLE_TRACKER: RequestTracker;
  static MULTI_TRACKER: RequestTracker;
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  // --- Single Registration ---
  // This factory will only be called ONCE.
  global().register(&SINGLE_TRACKER, || {
    println!("Creating SINGLE RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  // --- Multi Registration ---
  // This factory will be called EVERY time the service is fetched.
  global().register_with_kind(
    &MULTI_TRACKER,
    || {
      println!("Creating MULTI RequestTracker...");
      RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      }
    },
    InstanceKind::Multi,
  );

  println!("--- Fetching Single ---");
  let s1 = fetch!(SINGLE_TRACKER);
  let s2 = fetch!(SINGLE_TRACKER);
  println!("Single 1 ID: {}, Single 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Single instances should be identical");
  println!("Single instances are the same pointer, as expected.\n");

  println!("--- Fetching Multi ---");
  let m1 = fetch!(MULTI_TRACKER);
  let m2 = fetch!(MULTI_TRACKER);
  println!("Multi 1 ID: {}, Multi 2 ID: {}", m1.id, m2.id);
  assert_eq!(m1.id, 1);
  assert_eq!(m2.id, 2);
  assert!(!Arc::ptr_eq(&m1, &m2), "Multi instances should be different");
  println!("Multi instances are different pointers, as expected.");
}
