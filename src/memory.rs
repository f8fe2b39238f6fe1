//! Nullable owning pointers. Dereferencing always goes through an [`Optional`], so there is no
//! way to reach the pointee without handling null.
use std::rc::{self, Rc};

use crate::optional::Optional::{self, Absent, Present};

/// A nullable exclusive owner.
#[derive(Debug)]
pub struct Unique<T>(Optional<Box<T>>);

impl<T> Unique<T> {
    pub fn new(value: T) -> Self {
        Self(Present(Box::new(value)))
    }
    pub fn null() -> Self {
        Self(Absent)
    }

    pub fn get(&self) -> Optional<&T> {
        self.0.as_ref().into_if_set(|b| &**b)
    }
    pub fn get_mut(&mut self) -> Optional<&mut T> {
        self.0.as_mut().into_if_set(|b| &mut **b)
    }
    pub fn empty(&self) -> bool {
        self.0.empty()
    }

    /// Drops the pointee, if any.
    pub fn clear(&mut self) {
        self.0.destroy()
    }
    /// Moves ownership out, leaving `self` null.
    pub fn take(&mut self) -> Self {
        Self(std::mem::take(&mut self.0))
    }
    pub fn into_inner(self) -> Optional<T> {
        self.0.into_if_set(|b| *b)
    }
}

impl<T> Default for Unique<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Box<T>> for Unique<T> {
    fn from(b: Box<T>) -> Self {
        Self(Present(b))
    }
}

/// A nullable reference-counted owner. Cloning shares the pointee.
#[derive(Debug)]
pub struct Shared<T>(Optional<Rc<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Present(Rc::new(value)))
    }
    pub fn null() -> Self {
        Self(Absent)
    }

    pub fn get(&self) -> Optional<&T> {
        self.0.as_ref().into_if_set(|rc| &**rc)
    }
    pub fn empty(&self) -> bool {
        self.0.empty()
    }
    /// Releases this owner. The pointee is dropped once no owner is left.
    pub fn clear(&mut self) {
        self.0.destroy()
    }

    pub fn downgrade(&self) -> WeakShared<T> {
        match &self.0 {
            Present(rc) => WeakShared(Rc::downgrade(rc)),
            Absent => WeakShared::new(),
        }
    }
    /// Both point to the same allocation, or both are null.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Present(a), Present(b)) => Rc::ptr_eq(a, b),
            (Absent, Absent) => true,
            _ => false,
        }
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(self.0.if_set(Rc::clone))
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::null()
    }
}

/// Observes a [`Shared`] without keeping its pointee alive.
#[derive(Debug)]
pub struct WeakShared<T>(rc::Weak<T>);

impl<T> WeakShared<T> {
    /// An observer that was never attached; [`WeakShared::lock`] always yields null.
    pub fn new() -> Self {
        Self(rc::Weak::new())
    }

    /// A new owner of the pointee, or null once every owner is gone.
    pub fn lock(&self) -> Shared<T> {
        match self.0.upgrade() {
            Some(rc) => Shared(Present(rc)),
            None => {
                tracing::trace!("weak pointer has expired");
                Shared::null()
            }
        }
    }
    pub fn clear(&mut self) {
        self.0 = rc::Weak::new();
    }
}

impl<T> Clone for WeakShared<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for WeakShared<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_unique() {
    let mut p = Unique::new(String::from("a"));
    p.get_mut().into_if_set(|s| s.push('b'));
    assert_eq!(p.get(), Optional::Present(&String::from("ab")));

    let q = p.take();
    assert!(p.empty());
    assert!(p.get().empty());
    assert_eq!(q.into_inner(), Optional::Present(String::from("ab")));

    let mut r: Unique<i32> = Box::new(3).into();
    r.clear();
    assert!(r.empty());
    assert!(Unique::<i32>::default().empty());
    assert!(Unique::<i32>::null().into_inner().empty());
}

#[test]
fn test_unique_drops_pointee() {
    use std::cell::Cell;

    struct Flag<'a>(&'a Cell<bool>);
    impl Drop for Flag<'_> {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    let dropped = Cell::new(false);
    let mut p = Unique::new(Flag(&dropped));
    assert!(!dropped.get());
    p.clear();
    assert!(dropped.get());
}

#[test]
fn test_shared_and_weak() {
    let a = Shared::new(5);
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&Shared::new(5)));
    assert!(Shared::<i32>::null().ptr_eq(&Shared::null()));

    let weak = a.downgrade();
    assert_eq!(weak.lock().get(), Optional::Present(&5));

    drop(a);
    assert_eq!(weak.lock().get(), Optional::Present(&5));
    let mut b = b;
    b.clear();
    assert!(b.empty());
    assert!(weak.lock().empty());

    let mut attached = Shared::new(1).downgrade();
    attached.clear();
    assert!(attached.lock().empty());
    assert!(WeakShared::<i32>::new().lock().empty());
    assert!(Shared::<i32>::null().downgrade().lock().empty());
}

#[test]
fn test_expired_lock_is_traced() {
    let weak = Shared::new(1).downgrade();
    assert_eq!(crate::count_events(|| assert!(weak.lock().empty())), 1);

    let owner = Shared::new(2);
    let weak = owner.downgrade();
    assert_eq!(crate::count_events(|| assert!(!weak.lock().empty())), 0);
}
