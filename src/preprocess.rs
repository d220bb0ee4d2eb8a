//! Conversion of a finalized list into the atoms laid out by the typesetter.

use crate::atom::{AtomType, MathAtom, MathList};
use crate::charset;

/// Flatten a finalized list into typesetter atoms.
///
/// Variables and numbers become ordinary atoms with their nucleus styled
/// after their font style, unary operators become ordinary atoms, and
/// adjacent ordinary atoms without scripts are fused.
pub fn preprocess(list: &MathList) -> Vec<MathAtom> {
    let mut out: Vec<MathAtom> = Vec::with_capacity(list.len());
    for atom in list {
        let mut atom = atom.clone();
        match atom.atom_type() {
            AtomType::Variable | AtomType::Number => {
                atom.nucleus = charset::change_font(&atom.nucleus, atom.font_style);
                atom.set_type(AtomType::Ordinary);
            }
            AtomType::UnaryOperator => atom.set_type(AtomType::Ordinary),
            _ => {}
        }

        if atom.atom_type() == AtomType::Ordinary {
            if let Some(prev) = out.last_mut() {
                if prev.atom_type() == AtomType::Ordinary && !prev.has_scripts() {
                    prev.fuse(atom);
                    continue;
                }
            }
        }
        out.push(atom);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::finalize;
    use crate::parse::parse;

    fn prepared(input: &str) -> Vec<MathAtom> {
        preprocess(&finalize(&parse(input).unwrap()))
    }

    #[test]
    fn ordinary_fusion() {
        let atoms = prepared("xy2+z");
        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[0].atom_type(), AtomType::Ordinary);
        assert_eq!(atoms[0].nucleus, "\u{1D465}\u{1D466}2");
        assert_eq!(atoms[0].index_range.length, 3);
        assert_eq!(atoms[0].fused_atoms.len(), 3);
        assert_eq!(atoms[1].atom_type(), AtomType::BinaryOperator);
        assert_eq!(atoms[2].nucleus, "\u{1D467}");
    }

    #[test]
    fn scripts_stop_fusion() {
        let atoms = prepared("x^2y");
        assert_eq!(atoms.len(), 2);
        assert!(atoms[0].superscript().is_some());
        // the superscript itself is left as is
        let sup = atoms[0].superscript().unwrap();
        assert_eq!(sup.atoms[0].atom_type(), AtomType::Number);
    }

    #[test]
    fn unary_becomes_ordinary() {
        let atoms = prepared("-x");
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].nucleus, "\u{2212}\u{1D465}");
    }

    #[test]
    fn font_styles_apply() {
        let atoms = prepared("\\mathbf{A}\\mathrm{x}");
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].nucleus, "\u{1D400}x");
    }

    #[test]
    fn other_atoms_are_kept() {
        let atoms = prepared("\\frac12 \\sum x");
        assert_eq!(
            atoms.iter().map(MathAtom::atom_type).collect::<Vec<_>>(),
            &[AtomType::Fraction, AtomType::LargeOperator, AtomType::Ordinary]
        );
    }
}
