//! A closed sum type over a tuple of alternatives.
//!
//! `Variant<(i32, String, i32)>` holds exactly one of: an `i32` at position 0, a `String` at
//! position 1, an `i32` at position 2. Alternatives may repeat and may be references. A
//! reference alternative `&T` is a different type from `T`, so assigning a bare value always
//! selects the value alternative.
//!
//! Values are reached by position ([`Variant::get`]), by type when the type is listed once
//! ([`Variant::get_as`]), by matching on the storage enum ([`Variant::alt`]), or with a visitor.
mod compare;
mod visit;

pub use visit::{CoVisitRef, CoVisitor, VisitMut, VisitOwned, VisitRef, Visitor};

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{AccessError, IndexMismatch};
use crate::optional::Optional;
use crate::pack::{Alternatives, At, Contains};

pub struct Variant<L: Alternatives> {
    repr: L::Repr,
}

impl<L: Alternatives> Variant<L> {
    /// Holds `value` at position `I`.
    pub fn with_index<const I: usize>(value: <L as At<I>>::Ty) -> Self
    where
        L: At<I>,
    {
        Self {
            repr: <L as At<I>>::inject(value),
        }
    }

    /// Holds `value` at the position of its type.
    pub fn new<T, I>(value: T) -> Self
    where
        L: Contains<T, I>,
    {
        Self {
            repr: <L as Contains<T, I>>::inject(value),
        }
    }

    pub fn from_alt(repr: L::Repr) -> Self {
        Self { repr }
    }

    /// Position of the active alternative.
    pub fn index(&self) -> usize {
        L::index_of(&self.repr)
    }

    /// The storage enum, for exhaustive matching.
    pub fn alt(&self) -> &L::Repr {
        &self.repr
    }
    pub fn alt_mut(&mut self) -> &mut L::Repr {
        &mut self.repr
    }
    pub fn into_alt(self) -> L::Repr {
        self.repr
    }

    pub fn get<const I: usize>(&self) -> Optional<&<L as At<I>>::Ty>
    where
        L: At<I>,
    {
        <L as At<I>>::project(&self.repr)
    }
    pub fn get_mut<const I: usize>(&mut self) -> Optional<&mut <L as At<I>>::Ty>
    where
        L: At<I>,
    {
        <L as At<I>>::project_mut(&mut self.repr)
    }
    pub fn into_get<const I: usize>(self) -> Optional<<L as At<I>>::Ty>
    where
        L: At<I>,
    {
        <L as At<I>>::extract(self.repr).ok().into()
    }

    /// Like [`Variant::get`], reporting which alternative was active on failure.
    pub fn try_get<const I: usize>(&self) -> Result<&<L as At<I>>::Ty, AccessError>
    where
        L: At<I>,
    {
        let active = self.index();
        self.get::<I>().into_handle(Ok, || {
            Err(AccessError::WrongAlternative {
                requested: I,
                active,
            })
        })
    }

    pub fn get_as<T, I>(&self) -> Optional<&T>
    where
        L: Contains<T, I>,
    {
        <L as Contains<T, I>>::project(&self.repr)
    }
    pub fn get_as_mut<T, I>(&mut self) -> Optional<&mut T>
    where
        L: Contains<T, I>,
    {
        <L as Contains<T, I>>::project_mut(&mut self.repr)
    }
    pub fn into_get_as<T, I>(self) -> Optional<T>
    where
        L: Contains<T, I>,
    {
        <L as Contains<T, I>>::extract(self.repr).ok().into()
    }

    /// Replaces the active alternative with `value` at position `I`.
    pub fn emplace<const I: usize>(&mut self, value: <L as At<I>>::Ty) -> &mut <L as At<I>>::Ty
    where
        L: At<I>,
    {
        tracing::trace!(from = self.index(), to = I, "emplacing alternative");
        <L as At<I>>::inject_in_place(&mut self.repr, value)
    }

    /// Builds the new value before the old one is dropped; if `f` panics nothing changes.
    pub fn emplace_with<const I: usize>(
        &mut self,
        f: impl FnOnce() -> <L as At<I>>::Ty,
    ) -> &mut <L as At<I>>::Ty
    where
        L: At<I>,
    {
        let value = f();
        self.emplace::<I>(value)
    }

    /// Replaces the active alternative with `value`, at the position of its type.
    pub fn emplace_as<T, I>(&mut self, value: T) -> &mut T
    where
        L: Contains<T, I>,
    {
        let index = <L as Contains<T, I>>::INDEX;
        tracing::trace!(from = self.index(), to = index, "emplacing alternative");
        <L as Contains<T, I>>::inject_in_place(&mut self.repr, value)
    }

    pub fn assign<T, I>(&mut self, value: T) -> &mut Self
    where
        L: Contains<T, I>,
    {
        self.emplace_as::<T, I>(value);
        self
    }

    /// Rebuilds the variant from its current state, possibly switching alternatives.
    ///
    /// The old state is moved into `f`; if `f` panics the process aborts.
    pub fn morph(&mut self, f: impl FnOnce(Self) -> Self) {
        let previous = self.index();
        take_mut::take(self, f);
        tracing::trace!(from = previous, to = self.index(), "morphed variant");
    }

    /// Calls the visitor on the active alternative by shared reference.
    pub fn visit<'a, V, R>(&'a self, visitor: V) -> R
    where
        L: VisitRef<'a, V, R>,
    {
        L::visit_ref(&self.repr, visitor)
    }
    pub fn visit_mut<'a, V, R>(&'a mut self, visitor: V) -> R
    where
        L: VisitMut<'a, V, R>,
    {
        L::visit_mut(&mut self.repr, visitor)
    }
    pub fn into_visit<V, R>(self, visitor: V) -> R
    where
        L: VisitOwned<V, R>,
    {
        L::visit_owned(self.repr, visitor)
    }

    /// Calls the covisitor on the active values of `self` and `other`, which must hold the same
    /// alternative.
    pub fn covisit<'a, V, R>(&'a self, other: &'a Self, covisitor: V) -> Result<R, IndexMismatch>
    where
        L: CoVisitRef<'a, V, R>,
    {
        L::covisit_ref(&self.repr, &other.repr, covisitor)
    }
}

impl<L> Default for Variant<L>
where
    L: At<0>,
    <L as At<0>>::Ty: Default,
{
    fn default() -> Self {
        Self::with_index::<0>(Default::default())
    }
}

impl<L: Alternatives> Clone for Variant<L>
where
    L::Repr: Clone,
{
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
        }
    }
}

impl<L: Alternatives> Copy for Variant<L> where L::Repr: Copy {}

impl<L: Alternatives> Hash for Variant<L>
where
    L::Repr: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state)
    }
}

impl<L: Alternatives> fmt::Debug for Variant<L>
where
    L::Repr: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variant").field(&self.repr).finish()
    }
}

#[cfg(test)]
use crate::pack::{Alt2, Alt3};

#[test]
fn test_construction() {
    let default: Variant<(i32, String)> = Variant::default();
    assert_eq!(default.index(), 0);
    assert_eq!(default.get::<0>(), Optional::Present(&0));

    let by_type: Variant<(i32, String)> = Variant::new("hi".to_owned());
    assert_eq!(by_type.index(), 1);
    assert_eq!(by_type.get_as::<String, _>(), Optional::Present(&"hi".to_owned()));

    // Duplicates are reached by position.
    let dup: Variant<(i32, String, i32)> = Variant::with_index::<2>(7);
    assert_eq!(dup.index(), 2);
    assert!(dup.get::<0>().empty());
    assert_eq!(dup.get::<2>(), Optional::Present(&7));

    let from_alt: Variant<(i32, String, i32)> = Variant::from_alt(Alt3::V1("x".to_owned()));
    assert_eq!(from_alt.index(), 1);
}

#[test]
fn test_exactly_one_alternative() {
    let mut v: Variant<(i32, String, i32)> = Variant::default();
    for step in 0..6 {
        match step % 3 {
            0 => {
                v.emplace::<0>(step);
            }
            1 => {
                v.emplace::<1>(step.to_string());
            }
            _ => {
                v.emplace::<2>(step);
            }
        }
        let engaged = [
            !v.get::<0>().empty(),
            !v.get::<1>().empty(),
            !v.get::<2>().empty(),
        ];
        assert_eq!(engaged.iter().filter(|e| **e).count(), 1);
        assert!(engaged[v.index()]);
    }
}

#[test]
fn test_reference_alternatives() {
    let mut x = 0;
    let mut y = 1;
    {
        let mut v: Variant<(i32, &mut i32)> = Variant::new(&mut x);
        // A bare value selects the value alternative, never writes through the reference.
        v.assign(5);
        assert_eq!(v.index(), 0);
        v.emplace::<1>(&mut y);
        v.get_mut::<1>().into_if_set(|r| **r = 2);
    }
    assert_eq!(x, 0);
    assert_eq!(y, 2);

    let z = 3;
    let v: Variant<(i32, &i32)> = Variant::new(&z);
    assert_eq!(v.get_as::<&i32, _>(), Optional::Present(&&3));
    assert!(v.get_as::<i32, _>().empty());
}

#[test]
fn test_access_modes() {
    let mut v: Variant<(u8, String)> = Variant::new("ab".to_owned());
    v.get_as_mut::<String, _>().on_set_mut(|s| s.push('c'));
    assert_eq!(v.try_get::<1>().map(String::as_str), Ok("abc"));
    assert_eq!(
        v.try_get::<0>(),
        Err(AccessError::WrongAlternative {
            requested: 0,
            active: 1
        })
    );
    assert_eq!(v.clone().into_get::<1>(), Optional::Present("abc".to_owned()));
    assert!(v.clone().into_get_as::<u8, _>().empty());

    match v.alt_mut() {
        Alt2::V0(n) => *n += 1,
        Alt2::V1(s) => s.clear(),
    }
    assert_eq!(v.into_alt(), Alt2::V1(String::new()));
}

#[test]
fn test_emplace_with_and_morph() {
    let mut v: Variant<(u32, String)> = Variant::default();
    let stored = v.emplace_with::<1>(|| "built".to_owned());
    stored.push('!');
    assert_eq!(v.get::<1>(), Optional::Present(&"built!".to_owned()));

    v.morph(|old| match old.into_alt() {
        Alt2::V0(n) => Variant::new(n.to_string()),
        Alt2::V1(s) => Variant::new(s.len() as u32),
    });
    assert_eq!(v.get::<0>(), Optional::Present(&6));
}

#[test]
fn test_visiting() {
    // One closure covers every position of its type.
    let mut v: Variant<(i32, i32)> = Variant::with_index::<1>(4);
    assert_eq!(v.visit(|n: &i32| *n), 4);
    v.visit_mut(|n: &mut i32| *n *= 10);
    assert_eq!(v.get::<1>(), Optional::Present(&40));

    let w: Variant<(i32, i32)> = Variant::with_index::<1>(2);
    assert_eq!(v.covisit(&w, |a: &i32, b: &i32| a - b), Ok(38));
    assert_eq!(
        v.covisit(&Variant::with_index::<0>(2), |a: &i32, b: &i32| a - b),
        Err(IndexMismatch { ours: 1, theirs: 0 })
    );

    let single: Variant<(String,)> = Variant::new("owned".to_owned());
    assert_eq!(single.into_visit(|s: String| s.len()), 5);
}

#[test]
fn test_debug_and_hash() {
    use std::collections::HashSet;

    let v: Variant<(i32, &str)> = Variant::new("x");
    assert_eq!(format!("{v:?}"), r#"Variant(V1("x"))"#);

    let set: HashSet<Variant<(i32, i32)>> = [
        Variant::with_index::<0>(1),
        Variant::with_index::<1>(1),
        Variant::with_index::<0>(1),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_panicking_constructor_keeps_alternative() {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    let mut v: Variant<(i32, String)> = Variant::with_index::<0>(3);
    let result = catch_unwind(AssertUnwindSafe(|| {
        v.emplace_with::<1>(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());
    assert_eq!(v.index(), 0);
    assert_eq!(v.get::<0>(), Optional::Present(&3));
    assert!(v.get::<1>().empty());
}

#[test]
fn test_trace_events() {
    use crate::count_events;

    let mut v: Variant<(i32, String)> = Variant::default();
    assert_eq!(count_events(|| { v.assign("a".to_owned()); }), 1);
    assert_eq!(count_events(|| { v.emplace_as(2); }), 1);
    assert_eq!(count_events(|| { v.emplace::<1>("b".to_owned()); }), 1);
    assert_eq!(count_events(|| { v.emplace_with::<0>(|| 4); }), 1);
    assert_eq!(count_events(|| v.morph(|old| old)), 1);
    assert_eq!(count_events(|| { v.get::<0>(); }), 0);
    assert_eq!(v.get::<0>(), Optional::Present(&4));
}
