//! Property tests for the invariants of optionals and variants.
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use safe_values::{Alt3, Optional, Variant, Visitor};

#[derive(Debug, Clone)]
enum Op {
    Emplace(i32),
    EmplaceIfEmpty(i32),
    Destroy,
    Assign(Option<i32>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Emplace),
        any::<i32>().prop_map(Op::EmplaceIfEmpty),
        Just(Op::Destroy),
        any::<Option<i32>>().prop_map(Op::Assign),
    ]
}

type Triple = Variant<(i32, String, i32)>;

fn triple_strategy() -> impl Strategy<Value = Triple> {
    prop_oneof![
        any::<i32>().prop_map(Triple::with_index::<0>),
        "[a-z]{0,8}".prop_map(Triple::with_index::<1>),
        any::<i32>().prop_map(Triple::with_index::<2>),
    ]
}

fn check_exclusive(v: &Triple) -> Result<(), TestCaseError> {
    let engaged = [
        !v.get::<0>().empty(),
        !v.get::<1>().empty(),
        !v.get::<2>().empty(),
    ];
    prop_assert_eq!(engaged.iter().filter(|e| **e).count(), 1);
    prop_assert!(engaged[v.index()]);
    Ok(())
}

struct Describe;

impl Visitor<&i32> for Describe {
    type Output = String;
    fn visit(&mut self, value: &i32) -> String {
        format!("int {value}")
    }
}

impl Visitor<&String> for Describe {
    type Output = String;
    fn visit(&mut self, value: &String) -> String {
        format!("text {value}")
    }
}

proptest! {
    #[test]
    fn engaged_state_follows_operations(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut subject: Optional<i32> = Optional::Absent;
        let mut model: Option<i32> = None;
        for op in ops {
            match op {
                Op::Emplace(n) => {
                    prop_assert_eq!(*subject.emplace(n), n);
                    model = Some(n);
                }
                Op::EmplaceIfEmpty(n) => {
                    let kept = *subject.emplace_if_empty(|| n);
                    prop_assert_eq!(kept, *model.get_or_insert(n));
                }
                Op::Destroy => {
                    subject.destroy();
                    model = None;
                }
                Op::Assign(value) => {
                    subject = value.into();
                    model = value;
                }
            }
            prop_assert_eq!(subject.empty(), model.is_none());
            prop_assert_eq!(Option::<i32>::from(subject), model);
        }
    }

    #[test]
    fn absence_is_below_every_value(n in any::<i32>(), s in "[ -~]{0,8}") {
        let empty: Optional<i32> = Optional::Absent;
        prop_assert!(empty < Optional::Present(n));
        prop_assert!(empty < n);
        prop_assert!(empty != n);

        let empty_text: Optional<String> = Optional::Absent;
        prop_assert!(empty_text < Optional::Present(s.clone()));
        prop_assert!(empty_text != s);
    }

    #[test]
    fn present_compares_like_its_value(a in any::<i32>(), b in any::<i32>()) {
        let present = Optional::Present(a);
        prop_assert_eq!(present == b, a == b);
        prop_assert_eq!(present.partial_cmp(&b), a.partial_cmp(&b));
    }

    #[test]
    fn reassignment_rebinds_references(x0 in any::<i32>(), y0 in any::<i32>(), n in any::<i32>()) {
        let (mut x, mut y) = (x0, y0);
        {
            let mut o: Optional<&mut i32> = Optional::Present(&mut x);
            o.emplace(&mut y);
            o.if_set_mut(|r| **r = n);
        }
        prop_assert_eq!(x, x0);
        prop_assert_eq!(y, n);
    }

    #[test]
    fn collapse_requires_every_level(n in any::<i32>(), levels in any::<[bool; 3]>()) {
        let inner = if levels[2] { Optional::Present(n) } else { Optional::Absent };
        let middle = if levels[1] { Optional::Present(inner) } else { Optional::Absent };
        let outer = if levels[0] { Optional::Present(middle) } else { Optional::Absent };
        let flat: Optional<i32> = outer.collapse();
        if levels.iter().all(|level| *level) {
            prop_assert_eq!(flat, Optional::Present(n));
        } else {
            prop_assert!(flat.empty());
        }
    }

    #[test]
    fn exactly_one_alternative_is_engaged(
        start in triple_strategy(),
        steps in prop::collection::vec((0..3usize, any::<i32>()), 0..16),
    ) {
        let mut v = start;
        check_exclusive(&v)?;
        for (slot, n) in steps {
            match slot {
                0 => {
                    v.emplace::<0>(n);
                }
                1 => {
                    v.emplace::<1>(n.to_string());
                }
                _ => {
                    v.emplace::<2>(n);
                }
            }
            prop_assert_eq!(v.index(), slot);
            check_exclusive(&v)?;
        }
    }

    #[test]
    fn duplicate_alternatives_share_a_handler(v in triple_strategy()) {
        let expected = match v.alt() {
            Alt3::V0(n) | Alt3::V2(n) => format!("int {n}"),
            Alt3::V1(s) => format!("text {s}"),
        };
        prop_assert_eq!(v.visit(Describe), expected);
    }

    #[test]
    fn lower_index_sorts_first(n in any::<i32>(), s in "[ -~]{0,8}") {
        let int: Variant<(i32, String)> = Variant::new(n);
        let text: Variant<(i32, String)> = Variant::new(s);
        prop_assert!(int < text);
        prop_assert!(int != text);
    }

    #[test]
    fn ordering_is_index_then_value(
        a in (0..2usize, any::<i8>()),
        b in (0..2usize, any::<i8>()),
    ) {
        let make = |(slot, n): (usize, i8)| -> Variant<(i8, i8)> {
            if slot == 0 {
                Variant::with_index::<0>(n)
            } else {
                Variant::with_index::<1>(n)
            }
        };
        prop_assert_eq!(make(a).cmp(&make(b)), a.cmp(&b));
        prop_assert_eq!(make(a) == make(b), a == b);
    }
}
