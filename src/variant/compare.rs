//! Equality and ordering of variants: by index first, then by the active values.
use std::cmp::Ordering;

use super::{CoVisitor, Variant};
use crate::pack::for_each_arity;

struct Equality;

impl<'a, T: PartialEq + ?Sized> CoVisitor<&'a T> for Equality {
    type Output = bool;
    fn covisit(&mut self, ours: &'a T, theirs: &'a T) -> bool {
        ours == theirs
    }
}

struct PartialThreeWay;

impl<'a, T: PartialOrd + ?Sized> CoVisitor<&'a T> for PartialThreeWay {
    type Output = Option<Ordering>;
    fn covisit(&mut self, ours: &'a T, theirs: &'a T) -> Option<Ordering> {
        ours.partial_cmp(theirs)
    }
}

struct ThreeWay;

impl<'a, T: Ord + ?Sized> CoVisitor<&'a T> for ThreeWay {
    type Output = Ordering;
    fn covisit(&mut self, ours: &'a T, theirs: &'a T) -> Ordering {
        ours.cmp(theirs)
    }
}

macro_rules! compare {
    ($Alt:ident $all:tt { $($V:ident($T:ident) = $i:tt),+ }) => {
        impl<$($T: PartialEq),+> PartialEq for Variant<($($T,)+)> {
            fn eq(&self, other: &Self) -> bool {
                self.covisit(other, Equality).unwrap_or(false)
            }
        }

        impl<$($T: Eq),+> Eq for Variant<($($T,)+)> {}

        impl<$($T: PartialOrd),+> PartialOrd for Variant<($($T,)+)> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.covisit(other, PartialThreeWay)
                    .unwrap_or_else(|mismatch| Some(mismatch.ours.cmp(&mismatch.theirs)))
            }
        }

        impl<$($T: Ord),+> Ord for Variant<($($T,)+)> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.covisit(other, ThreeWay)
                    .unwrap_or_else(|mismatch| mismatch.ours.cmp(&mismatch.theirs))
            }
        }
    };
}

for_each_arity!(compare);

#[test]
fn test_index_breaks_ties() {
    type V = Variant<(i32, String, i32)>;
    let low: V = Variant::with_index::<2>(-100);
    let high: V = Variant::with_index::<0>(100);
    // Position 2 sorts after position 0 whatever the values.
    assert!(low > high);
    assert_ne!(low, Variant::with_index::<0>(-100));
    assert_eq!(low, Variant::with_index::<2>(-100));
    assert_eq!(low.cmp(&high), Ordering::Greater);

    let text: V = Variant::new("b".to_owned());
    assert!(text > high && text < low);
    assert!(text < Variant::new("c".to_owned()));
}

#[test]
fn test_partial_values() {
    let nan: Variant<(f64, u8)> = Variant::with_index::<0>(f64::NAN);
    let same = nan;
    assert_ne!(nan, same);
    assert_eq!(nan.partial_cmp(&same), None);
    assert_eq!(
        nan.partial_cmp(&Variant::with_index::<1>(0)),
        Some(Ordering::Less)
    );
}

#[test]
fn test_reference_alternatives() {
    let (one, two, other_one) = (1, 2, 1);
    type R<'a> = Variant<(i32, &'a i32)>;
    let x: R<'_> = Variant::new(&one);
    let y: R<'_> = Variant::new(&two);
    let z: R<'_> = Variant::new(5);

    // References compare through their referents.
    assert!(x < y);
    assert_ne!(x, y);
    assert_eq!(x, Variant::new(&other_one));
    assert_eq!(x.cmp(&y), Ordering::Less);
    // The reference alternative sits at position 1, after any value.
    assert!(z < x);
    assert!(Variant::<(i32, &i32)>::new(i32::MAX) < x);
}
