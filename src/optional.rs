//! A value that may be absent, with combinators that make the absent case impossible to skip.
//!
//! There is no `unwrap`: the contained value is only reachable through a branch
//! (`if_set`, `value_or`, `and_then`, `handle`, or a plain `match`).
use std::cmp::Ordering;

use crate::collapse::Collapse;
use crate::error::AccessError;

use self::Optional::{Absent, Present};

/// Either a `T` or nothing.
///
/// `T` may be a reference, in which case the optional is a non-owning back-reference: storing a
/// new reference rebinds the optional and never writes through the one it held before.
///
/// Ordering puts `Absent` below every present value; two present values compare by value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
    // Declared first: the derived ordering relies on it.
    #[default]
    Absent,
    Present(T),
}

impl<T> Optional<T> {
    pub fn empty(&self) -> bool {
        matches!(self, Absent)
    }

    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }
    pub fn as_mut(&mut self) -> Optional<&mut T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Replaces the content with `value`. The new value is complete before the old one is
    /// dropped.
    fn construct(&mut self, value: T) -> &mut T {
        *self = Present(value);
        let Present(value) = self else {
            unreachable!("optional was engaged just before")
        };
        value
    }

    /// Drops the held value, if any. Calling this on an empty optional does nothing.
    pub fn destroy(&mut self) {
        *self = Absent;
    }

    pub fn emplace(&mut self, value: T) -> &mut T {
        self.construct(value)
    }
    pub fn emplace_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.construct(f())
    }
    /// Engages the optional with `f()` unless it already holds a value, in which case `f` is not
    /// called and the existing value is returned.
    pub fn emplace_if_empty(&mut self, f: impl FnOnce() -> T) -> &mut T {
        let value = match std::mem::take(self) {
            Present(value) => value,
            Absent => f(),
        };
        self.construct(value)
    }

    /// Maps the value, if any.
    pub fn if_set<R>(&self, f: impl FnOnce(&T) -> R) -> Optional<R> {
        self.as_ref().into_if_set(f)
    }
    pub fn if_set_mut<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Optional<R> {
        self.as_mut().into_if_set(f)
    }
    pub fn into_if_set<R>(self, f: impl FnOnce(T) -> R) -> Optional<R> {
        match self {
            Present(value) => Present(f(value)),
            Absent => Absent,
        }
    }

    /// Runs `f` on the value, if any, and returns `self` for chaining.
    pub fn on_set(&self, f: impl FnOnce(&T)) -> &Self {
        if let Present(value) = self {
            f(value)
        }
        self
    }
    pub fn on_set_mut(&mut self, f: impl FnOnce(&mut T)) -> &mut Self {
        if let Present(value) = self {
            f(value)
        }
        self
    }
    pub fn into_on_set(mut self, f: impl FnOnce(&mut T)) -> Self {
        self.on_set_mut(f);
        self
    }

    /// Produces a value only when this optional is empty.
    pub fn if_unset<R>(&self, f: impl FnOnce() -> R) -> Optional<R> {
        match self {
            Present(_) => Absent,
            Absent => Present(f()),
        }
    }

    pub fn on_unset(&self, f: impl FnOnce()) -> &Self {
        if self.empty() {
            f()
        }
        self
    }
    pub fn on_unset_mut(&mut self, f: impl FnOnce()) -> &mut Self {
        if self.empty() {
            f()
        }
        self
    }
    pub fn into_on_unset(self, f: impl FnOnce()) -> Self {
        self.on_unset(f);
        self
    }

    pub fn value_or(&self, f: impl FnOnce() -> T) -> T
    where
        T: Clone,
    {
        self.as_ref().into_if_set(T::clone).into_value_or(f)
    }
    pub fn into_value_or(self, f: impl FnOnce() -> T) -> T {
        match self {
            Present(value) => value,
            Absent => f(),
        }
    }

    /// Monadic bind. `f` is not called on an empty optional.
    pub fn and_then<U>(&self, f: impl FnOnce(&T) -> Optional<U>) -> Optional<U> {
        self.as_ref().into_and_then(f)
    }
    pub fn and_then_mut<U>(&mut self, f: impl FnOnce(&mut T) -> Optional<U>) -> Optional<U> {
        self.as_mut().into_and_then(f)
    }
    pub fn into_and_then<U>(self, f: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
        match self {
            Present(value) => f(value),
            Absent => Absent,
        }
    }

    /// Forwards the value into a new optional that is engaged only if `condition` holds.
    pub fn and_if(&self, condition: bool) -> Optional<&T> {
        self.as_ref().into_and_if(condition)
    }
    pub fn and_if_mut(&mut self, condition: bool) -> Optional<&mut T> {
        self.as_mut().into_and_if(condition)
    }
    pub fn into_and_if(self, condition: bool) -> Optional<T> {
        match self {
            Present(value) if condition => Present(value),
            _ => Absent,
        }
    }

    pub fn handle<R>(&self, on_set: impl FnOnce(&T) -> R, on_unset: impl FnOnce() -> R) -> R {
        self.as_ref().into_handle(on_set, on_unset)
    }
    pub fn into_handle<R>(self, on_set: impl FnOnce(T) -> R, on_unset: impl FnOnce() -> R) -> R {
        match self {
            Present(value) => on_set(value),
            Absent => on_unset(),
        }
    }

    /// Rebuilds the value from itself. The process aborts if `f` panics, since the old value is
    /// gone by then.
    pub fn update(&mut self, f: impl FnOnce(T) -> T) {
        if let Present(value) = self {
            take_mut::take(value, f)
        }
    }

    pub fn into_result(self) -> Result<T, AccessError> {
        self.into_handle(Ok, || Err(AccessError::Empty))
    }

    /// Flattens nested optionals down to `Optional<Leaf>`. The result is engaged only if every
    /// level was engaged.
    pub fn collapse<Leaf, Depth>(self) -> Optional<Leaf>
    where
        Self: Collapse<Leaf, Depth>,
    {
        <Self as Collapse<Leaf, Depth>>::collapse_into(self)
    }
}

/// An empty optional is below, and never equal to, any value.
impl<T: PartialEq> PartialEq<T> for Optional<T> {
    fn eq(&self, other: &T) -> bool {
        self.if_set(|value| value == other).into_value_or(|| false)
    }
}
impl<T: PartialOrd> PartialOrd<T> for Optional<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.if_set(|value| value.partial_cmp(other))
            .into_value_or(|| Some(Ordering::Less))
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => Present(x),
            None => Absent,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        match value {
            Present(x) => Some(x),
            Absent => None,
        }
    }
}

#[test]
fn test_lifecycle() {
    let mut o: Optional<String> = Optional::default();
    assert!(o.empty());
    o.destroy();
    assert!(o.empty());

    let value = o.emplace("zzzzz".to_owned());
    value.push('!');
    assert!(!o.empty());
    assert_eq!(o, "zzzzz!".to_owned());

    // Already engaged: `f` must not run.
    let existing = o.emplace_if_empty(|| panic!("emplace_if_empty called f on an engaged optional"));
    assert_eq!(existing, "zzzzz!");

    o.destroy();
    assert!(o.empty());
    assert_eq!(o.emplace_if_empty(|| "a".repeat(3)), "aaa");
    assert_eq!(o.emplace_with(|| "b".to_owned()), "b");
}

#[test]
fn test_drops_exactly_once() {
    use std::{cell::Cell, rc::Rc};

    struct Counted(Rc<Cell<usize>>);
    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Rc::new(Cell::new(0));
    let mut o = Optional::Present(Counted(drops.clone()));
    assert_eq!(drops.get(), 0);
    // Replacing destroys the previous value.
    o.emplace(Counted(drops.clone()));
    assert_eq!(drops.get(), 1);
    o.destroy();
    assert_eq!(drops.get(), 2);
    o.destroy();
    assert_eq!(drops.get(), 2);

    {
        let _scoped = Optional::Present(Counted(drops.clone()));
    }
    assert_eq!(drops.get(), 3);
}

#[test]
fn test_reference_rebinding() {
    let mut x = 0;
    let mut y = 1;
    {
        let mut o: Optional<&mut i32> = Optional::Present(&mut x);
        o.on_set_mut(|value| assert_eq!(**value, 0));
        // Rebinds, does not assign through the old reference.
        o = Optional::Present(&mut y);
        o.on_set_mut(|value| **value = 2);
    }
    assert_eq!(x, 0);
    assert_eq!(y, 2);

    let z = 5;
    let mut shared: Optional<&i32> = Optional::Absent;
    shared.emplace(&z);
    assert_eq!(shared.if_set(|r| std::ptr::eq(*r, &z)), Optional::Present(true));
}

#[test]
fn test_if_set_and_if_unset() {
    let o = Optional::Present(0);
    let o_empty: Optional<i32> = Optional::Absent;

    let s = o.if_set(|v| v.to_string()).into_value_or(|| "empty".to_owned());
    let s_empty = o_empty
        .if_set(|v| v.to_string())
        .into_value_or(|| "empty".to_owned());
    assert_eq!(s, "0");
    assert_eq!(s_empty, "empty");

    let mut calls = Vec::new();
    o.on_set(|v| calls.push(*v))
        .on_unset(|| panic!("on_unset called on an engaged optional"));
    o_empty
        .on_set(|_| panic!("on_set called on an empty optional"))
        .on_unset(|| calls.push(-1));
    assert_eq!(calls, vec![0, -1]);

    assert_eq!(o.if_unset(|| 1), Optional::Absent);
    assert_eq!(o_empty.if_unset(|| 1), Optional::Present(1));

    let mut m = Optional::Present(vec![1]);
    assert_eq!(m.if_set_mut(|v| v.len()), Optional::Present(1));
    m.on_set_mut(|v| v.push(2));
    let m = m.into_on_set(|v| v.push(3)).into_on_unset(|| unreachable!());
    assert_eq!(m, vec![1, 2, 3]);
    assert_eq!(m.into_if_set(|v| v.into_iter().sum::<i32>()), 6);
}

#[test]
fn test_value_or() {
    let o = Optional::Present(String::from("kept"));
    assert_eq!(o.value_or(|| "fallback".to_owned()), "kept");
    assert_eq!(
        Optional::<String>::Absent.value_or(|| "fallback".to_owned()),
        "fallback"
    );
    // Moving out does not require `Clone`.
    struct NoClone(u8);
    let moved = Optional::Present(NoClone(7)).into_value_or(|| NoClone(0));
    assert_eq!(moved.0, 7);
}

#[test]
fn test_and_then() {
    fn digit(s: &str) -> Optional<u32> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10).into(),
            _ => Optional::Absent,
        }
    }

    let called = std::cell::Cell::new(false);
    let empty: Optional<String> = Optional::Absent;
    let r = empty.and_then(|s| {
        called.set(true);
        digit(s)
    });
    assert!(r.empty());
    assert!(!called.get());

    assert_eq!(Optional::Present("7".to_owned()).and_then(|s| digit(s)), 7);
    assert!(Optional::Present("x".to_owned()).and_then(|s| digit(s)).empty());

    let mut counter = Optional::Present(1);
    let doubled = counter.and_then_mut(|c| {
        *c += 1;
        Optional::Present(*c * 2)
    });
    assert_eq!(counter, 2);
    assert_eq!(doubled, 4);
}

#[test]
fn test_and_if_forwards() {
    let mut s = Optional::Present(String::from("1"));
    s.and_if_mut(true).on_set_mut(|value| **value = "2".to_owned());
    assert_eq!(s, "2".to_owned());
    assert!(s.and_if(false).empty());
    assert_eq!(s.and_if(true).if_set(|v| v.len()), 1);

    let boxed = Optional::Present(Box::new(3));
    assert_eq!(boxed.into_and_if(true).into_if_set(|b| *b), 3);
}

#[test]
fn test_handle_update_and_result() {
    let mut o = Optional::Present(vec![1, 2]);
    assert_eq!(o.handle(|v| v.len(), || 0), 2);
    o.update(|mut v| {
        v.push(3);
        v
    });
    assert_eq!(o.clone().into_result(), Ok(vec![1, 2, 3]));

    o.destroy();
    o.update(|_| unreachable!());
    assert_eq!(o.into_result(), Err(AccessError::Empty));

    let std_some: Option<i32> = Optional::Present(4).into();
    assert_eq!(std_some, Some(4));
    assert_eq!(Optional::from(None::<i32>), Optional::Absent);
}

#[test]
fn test_comparisons() {
    let empty_1: Optional<i32> = Optional::Absent;
    let empty_2: Optional<i32> = Optional::Absent;
    let engaged_1 = Optional::Present(0);
    let engaged_2 = Optional::Present(0);

    assert!(empty_1 < engaged_1);
    assert!(empty_1 <= engaged_1);
    assert!(!(empty_1 > engaged_1));
    assert!(engaged_1 > empty_1);
    assert!(empty_1 == empty_2);
    assert!(engaged_1 == engaged_2);
    assert!(Optional::Present(-5) > empty_1);
    assert!(Optional::Present(1) > engaged_1);

    // Against bare values.
    assert!(empty_1 < 0);
    assert!(empty_1 < i32::MIN);
    assert!(!(empty_1 >= 0));
    assert!(!(empty_1 == 0));
    assert!(empty_1 != 0);
    assert!(engaged_1 == 0);
    assert!(engaged_1 != 1);
    assert!(engaged_1 > -1);
    assert!(engaged_1 >= 0);
    assert!(engaged_1 < 1);
    assert!(!(engaged_1 <= -1));
}

#[test]
fn test_panicking_constructor_keeps_value() {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    let mut o = Optional::Present(7);
    let result = catch_unwind(AssertUnwindSafe(|| {
        o.emplace_with(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());
    assert_eq!(o, 7);

    let mut empty: Optional<i32> = Optional::Absent;
    let result = catch_unwind(AssertUnwindSafe(|| {
        empty.emplace_if_empty(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());
    assert!(empty.empty());
}
