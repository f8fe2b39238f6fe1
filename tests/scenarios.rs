//! End-to-end usage of the value types.
use pretty_assertions::assert_eq;
use safe_values::{AccessError, Alt2, Optional, Shared, Unique, Variant, Visitor, WeakShared};

#[test]
fn test_switching_alternatives() {
    let mut v: Variant<(i32, String)> = Variant::with_index::<0>(5);
    assert_eq!(v.get_as::<i32, _>(), Optional::Present(&5));
    assert!(v.get_as::<String, _>().empty());

    v.emplace_as("hi".to_owned());
    assert!(v.get_as::<i32, _>().empty());
    assert_eq!(v.get_as::<String, _>(), Optional::Present(&"hi".to_owned()));
    assert_eq!(v.index(), 1);
}

/// A value or the reason there is none.
type Parsed = Variant<(u16, String)>;

fn parse_port(text: &str) -> Parsed {
    match text.parse::<u16>() {
        Ok(port) if port != 0 => Variant::new(port),
        Ok(_) => Variant::new("port 0 is reserved".to_owned()),
        Err(err) => Variant::new(format!("{text:?}: {err}")),
    }
}

#[test]
fn test_result_like_usage() {
    let good = parse_port("8080");
    let port = good.get::<0>().into_value_or(|| &0);
    assert_eq!(*port, 8080);

    let reserved = parse_port("0");
    assert_eq!(
        reserved.try_get::<0>(),
        Err(AccessError::WrongAlternative {
            requested: 0,
            active: 1
        })
    );
    let message = match reserved.alt() {
        Alt2::V0(port) => format!("listening on {port}"),
        Alt2::V1(reason) => format!("refused: {reason}"),
    };
    assert_eq!(message, "refused: port 0 is reserved");

    let mut log = Vec::new();
    for text in ["22", "http", "443"] {
        parse_port(text)
            .get::<1>()
            .on_set(|reason| log.push(reason.to_string()))
            .on_unset(|| log.push(format!("{text} ok")));
    }
    assert_eq!(
        log,
        vec![
            "22 ok".to_owned(),
            r#""http": invalid digit found in string"#.to_owned(),
            "443 ok".to_owned(),
        ]
    );
}

trait Animal {
    fn name(&self) -> &str;
    fn sound(&self) -> &str;
}

struct Dog;
struct Cat {
    indoor: bool,
}

impl Animal for Dog {
    fn name(&self) -> &str {
        "dog"
    }
    fn sound(&self) -> &str {
        "woof"
    }
}

impl Animal for Cat {
    fn name(&self) -> &str {
        if self.indoor { "house cat" } else { "cat" }
    }
    fn sound(&self) -> &str {
        "meow"
    }
}

/// Handles every alternative through the shared trait, without dynamic dispatch.
struct Speak;

impl<A: Animal> Visitor<&A> for Speak {
    type Output = String;
    fn visit(&mut self, animal: &A) -> String {
        format!("the {} says {}", animal.name(), animal.sound())
    }
}

#[test]
fn test_static_polymorphism() {
    let mut pet: Variant<(Dog, Cat)> = Variant::new(Dog);
    assert_eq!(pet.visit(Speak), "the dog says woof");

    pet.assign(Cat { indoor: true });
    assert_eq!(pet.visit(Speak), "the house cat says meow");

    pet.get_as_mut::<Cat, _>().into_if_set(|cat| cat.indoor = false);
    assert_eq!(pet.visit(Speak), "the cat says meow");
}

#[test]
fn test_optional_reporting() {
    let mut opt: Optional<i32> = Optional::Absent;
    let report = |opt: &Optional<i32>| {
        opt.handle(
            |value| format!("had value {value}"),
            || "had no value".to_owned(),
        )
    };
    assert_eq!(report(&opt), "had no value");
    opt = Optional::Present(5);
    assert_eq!(report(&opt), "had value 5");
    assert_eq!(opt.into_result(), Ok(5));
}

#[test]
fn test_pointer_lifetimes() {
    let weak: WeakShared<i32>;
    {
        let unique = Unique::new(5);
        let shared = Shared::new(1337);
        weak = shared.downgrade();
        assert_eq!(unique.get(), Optional::Present(&5));
        assert_eq!(weak.lock().get(), Optional::Present(&1337));
    }
    assert!(weak.lock().empty());
}
