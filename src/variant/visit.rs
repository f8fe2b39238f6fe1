//! Dispatch of visitors over the active alternative.
//!
//! A visitor implements [`Visitor<T>`] once per distinct alternative type. Visiting a
//! `Variant<(i32, String, i32)>` by reference needs `Visitor<&i32>` and `Visitor<&String>`, and
//! both `i32` positions go through the same handler. Closures are visitors of their argument type.
use crate::error::IndexMismatch;
use crate::pack::{Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, Alt8, Alternatives, for_each_arity};

pub trait Visitor<T> {
    type Output;
    fn visit(&mut self, value: T) -> Self::Output;
}

impl<F, T, R> Visitor<T> for F
where
    F: FnMut(T) -> R,
{
    type Output = R;
    fn visit(&mut self, value: T) -> R {
        self(value)
    }
}

/// Like [`Visitor`], but receives the same alternative of two variants at once.
pub trait CoVisitor<T> {
    type Output;
    fn covisit(&mut self, ours: T, theirs: T) -> Self::Output;
}

impl<F, T, R> CoVisitor<T> for F
where
    F: FnMut(T, T) -> R,
{
    type Output = R;
    fn covisit(&mut self, ours: T, theirs: T) -> R {
        self(ours, theirs)
    }
}

/// `V` can visit every alternative of `Self` by shared reference, producing `R`.
pub trait VisitRef<'a, V, R>: Alternatives {
    fn visit_ref(repr: &'a Self::Repr, visitor: V) -> R;
}

/// `V` can visit every alternative of `Self` by mutable reference, producing `R`.
pub trait VisitMut<'a, V, R>: Alternatives {
    fn visit_mut(repr: &'a mut Self::Repr, visitor: V) -> R;
}

/// `V` can consume every alternative of `Self`, producing `R`.
pub trait VisitOwned<V, R>: Alternatives {
    fn visit_owned(repr: Self::Repr, visitor: V) -> R;
}

/// `V` can covisit every alternative of `Self` by shared reference, producing `R`.
pub trait CoVisitRef<'a, V, R>: Alternatives {
    fn covisit_ref(
        ours: &'a Self::Repr,
        theirs: &'a Self::Repr,
        covisitor: V,
    ) -> Result<R, IndexMismatch>;
}

macro_rules! dispatch {
    ($Alt:ident $all:tt { $($V:ident($T:ident) = $i:tt),+ }) => {
        impl<'a, Vis, R, $($T: 'a),+> VisitRef<'a, Vis, R> for ($($T,)+)
        where
            $(Vis: Visitor<&'a $T, Output = R>,)+
        {
            fn visit_ref(repr: &'a $Alt<$($T),+>, mut visitor: Vis) -> R {
                match repr {
                    $($Alt::$V(value) => <Vis as Visitor<&'a $T>>::visit(&mut visitor, value),)+
                }
            }
        }

        impl<'a, Vis, R, $($T: 'a),+> VisitMut<'a, Vis, R> for ($($T,)+)
        where
            $(Vis: Visitor<&'a mut $T, Output = R>,)+
        {
            fn visit_mut(repr: &'a mut $Alt<$($T),+>, mut visitor: Vis) -> R {
                match repr {
                    $($Alt::$V(value) => {
                        <Vis as Visitor<&'a mut $T>>::visit(&mut visitor, value)
                    })+
                }
            }
        }

        impl<Vis, R, $($T),+> VisitOwned<Vis, R> for ($($T,)+)
        where
            $(Vis: Visitor<$T, Output = R>,)+
        {
            fn visit_owned(repr: $Alt<$($T),+>, mut visitor: Vis) -> R {
                match repr {
                    $($Alt::$V(value) => <Vis as Visitor<$T>>::visit(&mut visitor, value),)+
                }
            }
        }

        impl<'a, Vis, R, $($T: 'a),+> CoVisitRef<'a, Vis, R> for ($($T,)+)
        where
            $(Vis: CoVisitor<&'a $T, Output = R>,)+
        {
            fn covisit_ref(
                ours: &'a $Alt<$($T),+>,
                theirs: &'a $Alt<$($T),+>,
                mut covisitor: Vis,
            ) -> Result<R, IndexMismatch> {
                match (ours, theirs) {
                    $(($Alt::$V(a), $Alt::$V(b)) => {
                        Ok(<Vis as CoVisitor<&'a $T>>::covisit(&mut covisitor, a, b))
                    })+
                    #[allow(unreachable_patterns)]
                    _ => Err(IndexMismatch {
                        ours: <Self as Alternatives>::index_of(ours),
                        theirs: <Self as Alternatives>::index_of(theirs),
                    }),
                }
            }
        }
    };
}

for_each_arity!(dispatch);

#[test]
fn test_duplicates_share_a_handler() {
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
            format!("string {value}")
        }
    }

    type L = (i32, String, i32);
    let first: Alt3<i32, String, i32> = Alt3::V0(1);
    let last: Alt3<i32, String, i32> = Alt3::V2(3);
    let text: Alt3<i32, String, i32> = Alt3::V1("x".to_owned());
    assert_eq!(<L as VisitRef<'_, _, _>>::visit_ref(&first, Describe), "int 1");
    assert_eq!(<L as VisitRef<'_, _, _>>::visit_ref(&last, Describe), "int 3");
    assert_eq!(<L as VisitRef<'_, _, _>>::visit_ref(&text, Describe), "string x");
}

#[test]
fn test_covisit_mismatch() {
    type L = (u8, u8);
    let ours: Alt2<u8, u8> = Alt2::V0(1);
    let theirs: Alt2<u8, u8> = Alt2::V1(1);
    let sum = |a: &u8, b: &u8| a + b;
    assert_eq!(<L as CoVisitRef<'_, _, _>>::covisit_ref(&ours, &ours, sum), Ok(2));
    assert_eq!(
        <L as CoVisitRef<'_, _, _>>::covisit_ref(&ours, &theirs, sum),
        Err(IndexMismatch { ours: 0, theirs: 1 })
    );
}
