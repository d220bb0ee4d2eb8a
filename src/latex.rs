//! Serialization of math lists back to LaTeX.
//!
//! The output is not the original input, but parsing it again
//! gives a structurally identical list.

use std::fmt::Write;

use crate::atom::{AtomKind, AtomType, FontStyle, Fraction, Inner, LineStyle, MathAtom, MathList, Table};
use crate::symbols;

/// Serialize a math list to LaTeX
pub fn to_latex(list: &MathList) -> String {
    let mut out = String::new();
    write_list(&mut out, list);
    out
}

fn write_list(out: &mut String, list: &MathList) {
    let mut font_style = FontStyle::Default;
    for atom in list {
        if atom.font_style != font_style {
            if font_style != FontStyle::Default {
                out.push('}');
            }
            if atom.font_style != FontStyle::Default {
                let _ = write!(out, "\\{}{{", symbols::font_style_name(atom.font_style));
            }
            font_style = atom.font_style;
        }
        write_atom(out, atom);
        if let Some(sup) = atom.superscript() {
            out.push_str("^{");
            write_list(out, sup);
            out.push('}');
        }
        if let Some(sub) = atom.subscript() {
            out.push_str("_{");
            write_list(out, sub);
            out.push('}');
        }
    }
    if font_style != FontStyle::Default {
        out.push('}');
    }
}

fn write_braced(out: &mut String, list: &MathList) {
    out.push('{');
    write_list(out, list);
    out.push('}');
}

fn write_atom(out: &mut String, atom: &MathAtom) {
    match &atom.kind {
        AtomKind::Fraction(frac, _) => write_fraction(out, frac),
        AtomKind::Radical(rad, _) => {
            out.push_str("\\sqrt");
            if let Some(degree) = &rad.degree {
                out.push('[');
                write_list(out, degree);
                out.push(']');
            }
            write_braced(out, &rad.radicand);
        }
        AtomKind::Inner(inner, _) => write_inner(out, inner),
        AtomKind::Table(table) => write_table(out, table),
        AtomKind::Overline(inner, _) => {
            out.push_str("\\overline");
            write_braced(out, inner);
        }
        AtomKind::Underline(inner, _) => {
            out.push_str("\\underline");
            write_braced(out, inner);
        }
        AtomKind::Accent(inner, _) => {
            if let Some(name) = symbols::accent_name(atom) {
                let _ = write!(out, "\\{}", name);
            }
            write_braced(out, inner);
        }
        AtomKind::LargeOperator { limits, .. } => {
            let Some(command) = symbols::latex_name_for_atom(atom) else {
                return;
            };
            let _ = write!(out, "\\{} ", command);
            let default = symbols::atom_for_command(command).map(|op| op.kind);
            if let Some(AtomKind::LargeOperator { limits: default, .. }) = default {
                if default != *limits {
                    out.push_str(if *limits { "\\limits " } else { "\\nolimits " });
                }
            }
        }
        AtomKind::Space(space) => match space_command(*space) {
            Some(command) => {
                let _ = write!(out, "\\{} ", command);
            }
            None => {
                let _ = write!(out, "\\mkern{:.1}mu ", space);
            }
        },
        AtomKind::Style(style) => {
            let _ = write!(out, "\\{} ", style_command(*style));
        }
        AtomKind::Color(color) => {
            let _ = write!(out, "\\color{{{}}}", color.color);
            write_braced(out, &color.inner);
        }
        AtomKind::TextColor(color) => {
            let _ = write!(out, "\\textcolor{{{}}}", color.color);
            write_braced(out, &color.inner);
        }
        _ => match atom.nucleus.as_str() {
            "" => out.push_str("{}"),
            "\u{2236}" => out.push(':'),
            "\u{2212}" => out.push('-'),
            nucleus => match symbols::latex_name_for_atom(atom) {
                Some(command) => {
                    let _ = write!(out, "\\{} ", command);
                }
                None => out.push_str(nucleus),
            },
        },
    }
}

fn write_fraction(out: &mut String, frac: &Fraction) {
    if frac.has_rule {
        out.push_str("\\frac");
        write_braced(out, &frac.numerator);
        write_braced(out, &frac.denominator);
        return;
    }
    let command = match (frac.left_delim.as_deref(), frac.right_delim.as_deref()) {
        (None, None) => "atop".to_string(),
        (Some("("), Some(")")) => "choose".to_string(),
        (Some("{"), Some("}")) => "brace".to_string(),
        (Some("["), Some("]")) => "brack".to_string(),
        (left, right) => format!(
            "atopwithdelims{}{}",
            left.unwrap_or("."),
            right.unwrap_or(".")
        ),
    };
    out.push('{');
    write_list(out, &frac.numerator);
    let _ = write!(out, " \\{} ", command);
    write_list(out, &frac.denominator);
    out.push('}');
}

fn delimiter_latex(boundary: &MathAtom) -> String {
    match symbols::delimiter_name(boundary) {
        Some(name @ ("(" | ")" | "[" | "]" | "<" | ">" | "|" | "." | "/")) => name.to_string(),
        Some("||") => "\\|".to_string(),
        Some(name) => format!("\\{}", name),
        None => String::new(),
    }
}

fn write_inner(out: &mut String, inner: &Inner) {
    if let Some(table) = cases_table(inner) {
        write_table(out, table);
        return;
    }
    if !inner.has_boundaries() {
        write_braced(out, &inner.inner);
        return;
    }
    let left = inner.left_boundary().map_or(".".to_string(), delimiter_latex);
    let _ = write!(out, "\\left{} ", left);
    write_list(out, &inner.inner);
    let right = inner.right_boundary().map_or(".".to_string(), delimiter_latex);
    let _ = write!(out, "\\right{} ", right);
}

/// The table of a `cases` environment, recognized by its wrapping inner
fn cases_table(inner: &Inner) -> Option<&Table> {
    let [space, table] = inner.inner.atoms.as_slice() else {
        return None;
    };
    let AtomKind::Table(table) = &table.kind else {
        return None;
    };
    let is_cases = table.environment.as_deref() == Some("cases")
        && space.atom_type() == AtomType::Space
        && inner.left_boundary().is_some_and(|b| b.nucleus == "{")
        && inner.right_boundary().is_some_and(|b| b.nucleus.is_empty());
    is_cases.then_some(table.as_ref())
}

fn write_table(out: &mut String, table: &Table) {
    let env = table.environment.as_deref();
    if let Some(env) = env {
        let _ = write!(out, "\\begin{{{}}}", env);
    }
    let num_rows = table.num_rows();
    for (i, row) in table.cells.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let mut atoms = cell.atoms.as_slice();
            match (env, atoms.first()) {
                (Some("matrix" | "cases"), Some(first))
                    if first.atom_type() == AtomType::Style =>
                {
                    atoms = &atoms[1..];
                }
                (Some("eqalign" | "aligned" | "split"), Some(first))
                    if j == 1
                        && first.atom_type() == AtomType::Ordinary
                        && first.nucleus.is_empty()
                        && !first.has_scripts() =>
                {
                    atoms = &atoms[1..];
                }
                _ => {}
            }
            write_list(out, &MathList::from_atoms(atoms.to_vec()));
            if j + 1 < row.len() {
                out.push('&');
            }
        }
        if i + 1 < num_rows {
            out.push_str("\\\\ ");
        }
    }
    if let Some(env) = env {
        let _ = write!(out, "\\end{{{}}}", env);
    }
}

fn space_command(space: f32) -> Option<&'static str> {
    match space {
        3.0 => Some(","),
        4.0 => Some(">"),
        5.0 => Some(";"),
        -3.0 => Some("!"),
        18.0 => Some("quad"),
        36.0 => Some("qquad"),
        _ => None,
    }
}

fn style_command(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Display => "displaystyle",
        LineStyle::Text => "textstyle",
        LineStyle::Script => "scriptstyle",
        LineStyle::ScriptScript => "scriptscriptstyle",
    }
}
