use fibre_locator::{fetch, global, service_key, InstanceKind};

// A contract for building plain data objects.
trait Factory: Send + Sync {
  fn create_person(&self) -> Person;
}

#[derive(Debug, Default)]
struct Person {
  firstname: String,
  lastname: String,
}

struct DefaultFactory;

impl Factory for DefaultFactory {
  fn create_person(&self) -> Person {
    Person::default()
  }
}

service_key! {
  static FACTORY: dyn Factory;
}

fn main() {
  global().register_trait_with_kind(&FACTORY, || Box::new(DefaultFactory), InstanceKind::Multi);

  let mut person = fetch!(FACTORY).create_person();
  person.firstname = "Grace".to_string();
  person.lastname = "Hopper".to_string();
  println!("{:?}", person);
}
