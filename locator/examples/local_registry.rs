use fibre_locator::{service_key, InstanceKind, LocalRegistry};
use std::cell::RefCell;
use std::rc::Rc;

// `RefCell` makes this service `!Sync`, so it can only live in a `LocalRegistry`.
struct Journal {
  entries: RefCell<Vec<String>>,
}

service_key! {
  static JOURNAL: Journal;
  static SCRATCH: Journal;
}

fn main() {
  let mut registry = LocalRegistry::new();

  registry.register(&JOURNAL, || Journal {
    entries: RefCell::new(Vec::new()),
  });
  registry.register_with_kind(
    &SCRATCH,
    || Journal {
      entries: RefCell::new(Vec::new()),
    },
    InstanceKind::Multi,
  );

  let journal = registry.fetch(&JOURNAL).expect("journal is registered");
  journal.entries.borrow_mut().push("first".to_string());
  let again = registry.fetch(&JOURNAL).expect("journal is registered");
  assert!(Rc::ptr_eq(&journal, &again));
  println!("Journal entries: {:?}", again.entries.borrow());

  let scratch = registry.fetch(&SCRATCH).expect("scratch is registered");
  scratch.entries.borrow_mut().push("discarded".to_string());
  let other = registry.fetch(&SCRATCH).expect("scratch is registered");
  assert!(other.entries.borrow().is_empty());
  println!("Each scratch journal starts empty.");
}
