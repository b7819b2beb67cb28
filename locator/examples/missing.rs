use fibre_locator::{fetch, global, service_key};
use std::panic;

struct UnregisteredService;

service_key! {
  static UNREGISTERED: UnregisteredService;
}

fn main() {
  // --- Using the panicking `fetch!` macro ---
  println!("Attempting to fetch a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = fetch!(UNREGISTERED);
  });

  assert!(result.is_err(), "fetch! should have panicked.");
  println!("Successfully caught the expected panic from fetch!.");

  // --- Using the fallible methods ---
  println!("\nNow, attempting to fetch using the registry methods...");

  match global().fetch(&UNREGISTERED) {
    Ok(_) => panic!("Should not have found the service!"),
    Err(e) => println!("fetch() failed as expected: {}", e),
  }

  match global().fetch_or_none(&UNREGISTERED) {
    Some(_) => panic!("Should not have found the service!"),
    None => println!("Correctly received `None` from fetch_or_none()."),
  }
}
