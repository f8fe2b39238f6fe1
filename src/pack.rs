//! Type-level lists of alternatives.
//!
//! A list is a tuple `(T0, .., Tn)` of up to eight types. Each arity names a tagged enum (`Alt1`
//! .. `Alt8`, variants `V0` ..) that holds exactly one of the listed types. Positions are looked
//! up with [`At`], types with [`Contains`]. Nothing here exists at runtime beyond the enum tag.
use crate::optional::Optional;

/// Position marker used by [`Contains`].
pub struct Index<const I: usize>;

pub trait Alternatives {
    /// Tagged storage holding exactly one alternative.
    type Repr;
    /// Number of alternatives, duplicates included.
    const COUNT: usize;
    fn index_of(repr: &Self::Repr) -> usize;
}

/// The alternative at position `I`.
pub trait At<const I: usize>: Alternatives {
    type Ty;
    fn project(repr: &Self::Repr) -> Optional<&Self::Ty>;
    fn project_mut(repr: &mut Self::Repr) -> Optional<&mut Self::Ty>;
    fn extract(repr: Self::Repr) -> Result<Self::Ty, Self::Repr>;
    fn inject(value: Self::Ty) -> Self::Repr;
    /// Overwrites `slot` with `value` and returns a reference to the stored value.
    fn inject_in_place(slot: &mut Self::Repr, value: Self::Ty) -> &mut Self::Ty;
}

/// `T` is one of the alternatives, at position `I` (an [`Index`]).
///
/// `I` is meant to be inferred. If `T` is listed more than once the lookup is ambiguous and
/// fails to compile; use [`At`] to pick a position explicitly.
pub trait Contains<T, I>: Alternatives {
    const INDEX: usize;
    fn project(repr: &Self::Repr) -> Optional<&T>;
    fn project_mut(repr: &mut Self::Repr) -> Optional<&mut T>;
    fn extract(repr: Self::Repr) -> Result<T, Self::Repr>;
    fn inject(value: T) -> Self::Repr;
    fn inject_in_place(slot: &mut Self::Repr, value: T) -> &mut T;
}

/// Invokes `$m` once per supported arity, with the storage enum name, the full parameter list,
/// and one `Variant(Param) = index` entry per position.
macro_rules! for_each_arity {
    ($m:ident) => {
        $m!(Alt1 [T0] { V0(T0) = 0 });
        $m!(Alt2 [T0, T1] { V0(T0) = 0, V1(T1) = 1 });
        $m!(Alt3 [T0, T1, T2] { V0(T0) = 0, V1(T1) = 1, V2(T2) = 2 });
        $m!(Alt4 [T0, T1, T2, T3] { V0(T0) = 0, V1(T1) = 1, V2(T2) = 2, V3(T3) = 3 });
        $m!(Alt5 [T0, T1, T2, T3, T4] {
            V0(T0) = 0, V1(T1) = 1, V2(T2) = 2, V3(T3) = 3, V4(T4) = 4
        });
        $m!(Alt6 [T0, T1, T2, T3, T4, T5] {
            V0(T0) = 0, V1(T1) = 1, V2(T2) = 2, V3(T3) = 3, V4(T4) = 4, V5(T5) = 5
        });
        $m!(Alt7 [T0, T1, T2, T3, T4, T5, T6] {
            V0(T0) = 0, V1(T1) = 1, V2(T2) = 2, V3(T3) = 3, V4(T4) = 4, V5(T5) = 5,
            V6(T6) = 6
        });
        $m!(Alt8 [T0, T1, T2, T3, T4, T5, T6, T7] {
            V0(T0) = 0, V1(T1) = 1, V2(T2) = 2, V3(T3) = 3, V4(T4) = 4, V5(T5) = 5,
            V6(T6) = 6, V7(T7) = 7
        });
    };
}
pub(crate) use for_each_arity;

macro_rules! alternative_at {
    ($Alt:ident [$($All:ident),+] $V:ident $T:ident $i:tt) => {
        impl<$($All),+> At<$i> for ($($All,)+) {
            type Ty = $T;
            fn project(repr: &Self::Repr) -> Optional<&$T> {
                match repr {
                    $Alt::$V(value) => Optional::Present(value),
                    #[allow(unreachable_patterns)]
                    _ => Optional::Absent,
                }
            }
            fn project_mut(repr: &mut Self::Repr) -> Optional<&mut $T> {
                match repr {
                    $Alt::$V(value) => Optional::Present(value),
                    #[allow(unreachable_patterns)]
                    _ => Optional::Absent,
                }
            }
            fn extract(repr: Self::Repr) -> Result<$T, Self::Repr> {
                match repr {
                    $Alt::$V(value) => Ok(value),
                    #[allow(unreachable_patterns)]
                    other => Err(other),
                }
            }
            fn inject(value: $T) -> Self::Repr {
                $Alt::$V(value)
            }
            fn inject_in_place(slot: &mut Self::Repr, value: $T) -> &mut $T {
                *slot = $Alt::$V(value);
                match slot {
                    $Alt::$V(value) => value,
                    #[allow(unreachable_patterns)]
                    _ => unreachable!("alternative {} was just written", $i),
                }
            }
        }

        impl<$($All),+> Contains<$T, Index<$i>> for ($($All,)+) {
            const INDEX: usize = $i;
            fn project(repr: &Self::Repr) -> Optional<&$T> {
                <Self as At<$i>>::project(repr)
            }
            fn project_mut(repr: &mut Self::Repr) -> Optional<&mut $T> {
                <Self as At<$i>>::project_mut(repr)
            }
            fn extract(repr: Self::Repr) -> Result<$T, Self::Repr> {
                <Self as At<$i>>::extract(repr)
            }
            fn inject(value: $T) -> Self::Repr {
                <Self as At<$i>>::inject(value)
            }
            fn inject_in_place(slot: &mut Self::Repr, value: $T) -> &mut $T {
                <Self as At<$i>>::inject_in_place(slot, value)
            }
        }
    };
}

macro_rules! alternatives {
    ($Alt:ident $all:tt { $($V:ident($T:ident) = $i:tt),+ }) => {
        /// Tagged storage for a list of alternatives. Ordering compares the tag first, then the
        /// value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $Alt<$($T),+> {
            $($V($T)),+
        }

        impl<$($T),+> Alternatives for ($($T,)+) {
            type Repr = $Alt<$($T),+>;
            const COUNT: usize = [$($i),+].len();
            fn index_of(repr: &Self::Repr) -> usize {
                match repr {
                    $($Alt::$V(_) => $i,)+
                }
            }
        }

        $(alternative_at!($Alt $all $V $T $i);)+
    };
}

for_each_arity!(alternatives);

#[test]
fn test_positions() {
    type L = (i32, String, i32);
    assert_eq!(<L as Alternatives>::COUNT, 3);
    assert_eq!(<(u8,) as Alternatives>::COUNT, 1);

    let repr = <L as At<2>>::inject(7);
    assert_eq!(<L as Alternatives>::index_of(&repr), 2);
    assert!(<L as At<0>>::project(&repr).empty());
    assert_eq!(<L as At<2>>::project(&repr), Optional::Present(&7));

    let repr = match <L as At<0>>::extract(repr) {
        Ok(_) => panic!("extracted the wrong alternative"),
        Err(repr) => repr,
    };
    assert_eq!(<L as At<2>>::extract(repr), Ok(7));
}

#[test]
fn test_lookup_by_type() {
    fn index_of_type<L: Contains<T, I>, T, I>() -> usize {
        L::INDEX
    }
    assert_eq!(index_of_type::<(i32, String), String, _>(), 1);
    assert_eq!(index_of_type::<(i32, String), i32, _>(), 0);
    // References are distinct from the types they point to.
    assert_eq!(index_of_type::<(i32, &'static i32), &'static i32, _>(), 1);

    let mut repr = <(i32, String) as Contains<String, _>>::inject("a".to_owned());
    let stored = <(i32, String) as Contains<String, _>>::inject_in_place(&mut repr, "b".to_owned());
    stored.push('c');
    assert_eq!(repr, Alt2::V1("bc".to_owned()));
    <(i32, String) as Contains<i32, _>>::inject_in_place(&mut repr, 4);
    assert_eq!(repr, Alt2::V0(4));
}
