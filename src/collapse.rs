//! Flattening of nested optionals.
//!
//! Rust has no way to say "`T` is not itself an `Optional`", so the recursion is driven by a
//! type-level depth instead: `Here` stops at the current level, `Deeper<D>` unwraps one level
//! and continues with `D`. The depth is inferred from the requested leaf type, e.g.
//! `let flat: Optional<i32> = nested.collapse();`.
use std::marker::PhantomData;

use crate::optional::Optional;

/// Depth marker: stop here.
pub struct Here;
/// Depth marker: unwrap one level, then continue with `D`.
pub struct Deeper<D>(PhantomData<D>);

pub trait Collapse<Leaf, Depth> {
    fn collapse_into(self) -> Optional<Leaf>;
}

impl<T> Collapse<T, Here> for Optional<T> {
    fn collapse_into(self) -> Optional<T> {
        self
    }
}

impl<T, Leaf, D> Collapse<Leaf, Deeper<D>> for Optional<T>
where
    T: Collapse<Leaf, D>,
{
    fn collapse_into(self) -> Optional<Leaf> {
        self.into_and_then(T::collapse_into)
    }
}

#[test]
fn test_collapse() {
    fn digit(s: &str) -> Optional<u32> {
        s.parse().ok().filter(|d: &u32| *d < 10).into()
    }

    let s = Optional::Present("5".to_owned());
    let nested: Optional<Optional<u32>> = s.if_set(|value| digit(value));
    let flat: Optional<u32> = nested.collapse();
    assert_eq!(flat, Optional::Present(5));

    // Engaged outer, empty inner.
    let nested: Optional<Optional<u32>> = Optional::Present(Optional::Absent);
    let flat: Optional<u32> = nested.collapse();
    assert!(flat.empty());

    // Empty outer.
    let nested: Optional<Optional<u32>> = Optional::Absent;
    let flat: Optional<u32> = nested.collapse();
    assert!(flat.empty());

    // Any depth at once.
    type Deep = Optional<Optional<Optional<Optional<Optional<Optional<i32>>>>>>;
    let deep: Deep = Optional::Present(Optional::Present(Optional::Present(Optional::Present(
        Optional::Present(Optional::Present(1)),
    ))));
    let flat: Optional<i32> = deep.collapse();
    assert_eq!(flat, Optional::Present(1));

    let broken: Deep = Optional::Present(Optional::Present(Optional::Absent));
    let flat: Optional<i32> = broken.collapse();
    assert!(flat.empty());

    // Partial flattening stops at the requested leaf.
    let deep: Deep = Optional::Present(Optional::Present(Optional::Present(Optional::Present(
        Optional::Present(Optional::Present(2)),
    ))));
    let partial: Optional<Optional<i32>> = deep.collapse();
    assert_eq!(partial, Optional::Present(Optional::Present(2)));

    // A flat optional collapses to itself.
    let single: Optional<i32> = Optional::Present(3);
    let flat: Optional<i32> = single.collapse();
    assert_eq!(flat, Optional::Present(3));
}
