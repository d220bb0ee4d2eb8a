//! Inter-element spacing, after the TeXbook table of chapter 18.
//!
//! The table is asymmetric: rows are indexed by the class of the left
//! atom and columns by the class of the right atom.

use crate::atom::{AtomType, LineStyle};

/// Spacing class of an atom in the inter-element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceClass {
    /// Ordinary, placeholder and colored lists
    Ordinary,
    /// Large operators
    Operator,
    /// Binary operators
    Binary,
    /// Relations
    Relation,
    /// Opening delimiters
    Open,
    /// Closing delimiters
    Close,
    /// Punctuation
    Punctuation,
    /// Fractions and inner lists
    Fraction,
    /// Radicals, only valid as left element
    Radical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpaceType {
    Invalid,
    None,
    Thin,
    /// thin but not in script styles
    NsThin,
    NsMedium,
    NsThick,
}

use SpaceType::*;

const SPACES: [[SpaceType; 8]; 9] = [
    // ord      op       bin       rel       open      close    punct    frac
    [None, Thin, NsMedium, NsThick, None, None, None, NsThin], // ord
    [Thin, Thin, Invalid, NsThick, None, None, None, NsThin],  // op
    [
        NsMedium, NsMedium, Invalid, Invalid, NsMedium, Invalid, Invalid, NsMedium,
    ], // bin
    [NsThick, NsThick, Invalid, None, NsThick, None, None, NsThick], // rel
    [None, None, Invalid, None, None, None, None, None],             // open
    [None, Thin, NsMedium, NsThick, None, None, None, NsThin],       // close
    [NsThin, NsThin, Invalid, NsThin, NsThin, NsThin, NsThin, NsThin], // punct
    [NsThin, Thin, NsMedium, NsThick, NsThin, None, NsThin, NsThin], // frac
    [NsMedium, NsThin, NsMedium, NsThick, None, None, None, NsThin], // radical
];

impl SpaceClass {
    /// The class of an atom type, on the left (`left == true`) or right of a pair.
    ///
    /// # Panics
    /// If the type has no spacing class: a radical on the right, or any of
    /// the types that never reach the spacing computation.
    pub fn of(ty: AtomType, left: bool) -> SpaceClass {
        match ty {
            AtomType::Color
            | AtomType::TextColor
            | AtomType::Ordinary
            | AtomType::Placeholder => SpaceClass::Ordinary,
            AtomType::LargeOperator => SpaceClass::Operator,
            AtomType::BinaryOperator => SpaceClass::Binary,
            AtomType::Relation => SpaceClass::Relation,
            AtomType::Open => SpaceClass::Open,
            AtomType::Close => SpaceClass::Close,
            AtomType::Punctuation => SpaceClass::Punctuation,
            AtomType::Fraction | AtomType::Inner => SpaceClass::Fraction,
            AtomType::Radical if left => SpaceClass::Radical,
            AtomType::Radical => {
                panic!("Interelement space undefined for radical on the right. Treat radical as ordinary.")
            }
            _ => panic!("Interelement space undefined for type {}", ty),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

fn space_in_mu(space: SpaceType, style: LineStyle) -> u32 {
    let text = style < LineStyle::Script;
    match space {
        Invalid | None => 0,
        Thin => 3,
        NsThin if text => 3,
        NsMedium if text => 4,
        NsThick if text => 5,
        NsThin | NsMedium | NsThick => 0,
    }
}

/// The space between two adjacent atoms, in mu.
///
/// # Panics
/// If either type has no spacing class (see [`SpaceClass::of`])
/// or if the pair is not allowed to be adjacent (e.g. two binary operators).
pub fn inter_element_space(left: AtomType, right: AtomType, style: LineStyle) -> u32 {
    let row = SpaceClass::of(left, true).index();
    let col = SpaceClass::of(right, false).index();
    let space = SPACES[row][col];
    if space == Invalid {
        panic!("Invalid space between {} and {}", left, right);
    }
    space_in_mu(space, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(left: AtomType, right: AtomType) -> u32 {
        inter_element_space(left, right, LineStyle::Display)
    }

    #[test]
    fn relations_are_thick_both_ways() {
        assert_eq!(space(AtomType::Ordinary, AtomType::Relation), 5);
        assert_eq!(space(AtomType::Relation, AtomType::Ordinary), 5);
        assert_eq!(space(AtomType::Relation, AtomType::Relation), 0);
    }

    #[test]
    fn open_and_close_are_asymmetric() {
        assert_eq!(space(AtomType::Open, AtomType::Relation), 0);
        assert_eq!(space(AtomType::Open, AtomType::LargeOperator), 0);
        assert_eq!(space(AtomType::Relation, AtomType::Open), 5);
        assert_eq!(space(AtomType::Close, AtomType::LargeOperator), 3);
        assert_eq!(space(AtomType::Close, AtomType::BinaryOperator), 4);
        assert_eq!(space(AtomType::BinaryOperator, AtomType::Ordinary), 4);
        assert_eq!(space(AtomType::Ordinary, AtomType::Close), 0);
    }

    #[test]
    fn fraction_and_radical() {
        assert_eq!(space(AtomType::Fraction, AtomType::Ordinary), 3);
        assert_eq!(space(AtomType::Ordinary, AtomType::Fraction), 3);
        assert_eq!(space(AtomType::Inner, AtomType::Close), 0);
        assert_eq!(space(AtomType::Radical, AtomType::Ordinary), 4);
        assert_eq!(space(AtomType::Radical, AtomType::LargeOperator), 3);
        assert_eq!(space(AtomType::Color, AtomType::Placeholder), 0);
    }

    #[test]
    fn script_styles_drop_non_script_spaces() {
        let script = |l, r| inter_element_space(l, r, LineStyle::Script);
        assert_eq!(script(AtomType::Ordinary, AtomType::Relation), 0);
        assert_eq!(script(AtomType::Ordinary, AtomType::BinaryOperator), 0);
        assert_eq!(script(AtomType::Ordinary, AtomType::LargeOperator), 3);
        assert_eq!(
            inter_element_space(AtomType::Ordinary, AtomType::Relation, LineStyle::Text),
            5
        );
    }

    #[test]
    #[should_panic(expected = "Invalid space between")]
    fn binary_pair_is_invalid() {
        space(AtomType::BinaryOperator, AtomType::BinaryOperator);
    }

    #[test]
    #[should_panic(expected = "radical on the right")]
    fn radical_on_the_right() {
        space(AtomType::Ordinary, AtomType::Radical);
    }
}
