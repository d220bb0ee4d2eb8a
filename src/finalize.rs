//! Normalization of a parsed math list before typesetting.

use crate::atom::{AtomKind, AtomType, MathAtom, MathList, Range};

/// A finalized copy of `list`.
///
/// Every atom gets a range of one index following its predecessor, unless
/// it already has one. Binary operators that cannot be binary become unary,
/// and adjacent numbers are fused.
/// Nested lists are finalized with their own ranges.
pub fn finalize(list: &MathList) -> MathList {
    let mut out = MathList::new();
    for atom in list {
        let mut node = finalize_atom(atom);
        if atom.index_range.is_zero() {
            let index = out.last().map_or(0, |prev| prev.index_range.max_range());
            node.index_range = Range::new(index, 1);
        }

        match node.atom_type() {
            AtomType::BinaryOperator => {
                if MathAtom::is_not_binary_operator(out.last()) {
                    node.set_type(AtomType::UnaryOperator);
                }
            }
            AtomType::Relation | AtomType::Punctuation | AtomType::Close => {
                if let Some(prev) = out.last_mut() {
                    if prev.atom_type() == AtomType::BinaryOperator {
                        prev.set_type(AtomType::UnaryOperator);
                    }
                }
            }
            AtomType::Number => {
                if let Some(prev) = out.last_mut() {
                    if prev.atom_type() == AtomType::Number && !prev.has_scripts() {
                        prev.fuse(node);
                        continue;
                    }
                }
            }
            _ => {}
        }
        out.push(node);
    }

    if let Some(last) = out.last_mut() {
        if last.atom_type() == AtomType::BinaryOperator {
            // nothing follows
            last.set_type(AtomType::UnaryOperator);
        }
    }
    out
}

fn finalize_atom(atom: &MathAtom) -> MathAtom {
    let mut node = atom.clone();
    if let Some(scripts) = node.kind.scripts_mut() {
        for script in [&mut scripts.superscript, &mut scripts.subscript] {
            if let Some(list) = script {
                *list = finalize(list);
            }
        }
    }
    match &mut node.kind {
        AtomKind::Fraction(frac, _) => {
            frac.numerator = finalize(&frac.numerator);
            frac.denominator = finalize(&frac.denominator);
        }
        AtomKind::Radical(rad, _) => {
            rad.radicand = finalize(&rad.radicand);
            if let Some(degree) = &mut rad.degree {
                *degree = finalize(degree);
            }
        }
        AtomKind::Inner(inner, _) => {
            inner.inner = finalize(&inner.inner);
        }
        AtomKind::Underline(list, _) | AtomKind::Overline(list, _) | AtomKind::Accent(list, _) => {
            *list = finalize(list);
        }
        AtomKind::Color(color) | AtomKind::TextColor(color) => {
            color.inner = finalize(&color.inner);
        }
        AtomKind::Table(table) => {
            for cell in table.cells.iter_mut().flatten() {
                *cell = finalize(cell);
            }
        }
        _ => {}
    }
    node
}
