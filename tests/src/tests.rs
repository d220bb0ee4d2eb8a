use mathdisplay::display::DisplayKind;
use mathdisplay::geom::Point;
use mathdisplay::{AtomType, ColorU8, LineStyle, MathAtom, MathList, Range};

use crate::*;

mod decorations;
mod delimiters;
mod fractions;
mod latex;
mod scripts;
mod tables;

#[test]
fn empty() {
    let display = layout("");
    assert!(display.children().is_empty());
    assert_dims!(display, 0.0, 0.0, 0.0);
    assert_eq!(display.range, Some(Range::new(0, 0)));
}

#[test]
fn simple_variable() {
    let display = layout("x");
    assert_eq!(child_kinds(&display), ["run"]);
    assert_eq!(display.range, Some(Range::new(0, 1)));
    assert!(!display.has_script);

    let run = &display.children()[0];
    assert_eq!(run_text(run), "\u{1D465}");
    assert_eq!(run.position(), Point::zero());
    assert_eq!(run.range, Some(Range::new(0, 1)));
    assert_dims!(run, 14.0, 4.0, 10.0);
    assert_dims!(display, 14.0, 4.0, 10.0);
}

#[test]
fn multiple_variables() {
    let display = layout("xyzw");
    assert_eq!(child_kinds(&display), ["run"]);
    let run = &display.children()[0];
    assert_eq!(run_text(run), "\u{1D465}\u{1D466}\u{1D467}\u{1D464}");
    assert_eq!(run.range, Some(Range::new(0, 4)));
    let DisplayKind::Run(r) = &run.kind else {
        unreachable!()
    };
    assert_eq!(r.atoms.len(), 4);
    assert_dims!(display, 14.0, 4.0, 40.0);
}

#[test]
fn equation_spacing() {
    let display = layout("2x+3=y");
    assert_eq!(child_kinds(&display), ["run"; 5]);

    let children = display.children();
    let texts: Vec<&str> = children.iter().map(run_text).collect();
    assert_eq!(texts, ["2\u{1D465}", "+", "3", "=", "\u{1D466}"]);

    // medium spaces around the binary operator, thick around the relation
    let medium = 4.0 * mu();
    let thick = 5.0 * mu();
    let expected_x = [
        0.0,
        20.0 + medium,
        30.0 + 2.0 * medium,
        40.0 + 2.0 * medium + thick,
        50.0 + 2.0 * medium + 2.0 * thick,
    ];
    for (child, x) in children.iter().zip(expected_x) {
        assert_near!(child.position().x, x);
        assert_eq!(child.position().y, 0.0);
    }
    assert_eq!(children[0].range, Some(Range::new(0, 2)));
    assert_eq!(children[4].range, Some(Range::new(5, 1)));
    assert_dims!(display, 14.0, 4.0, 80.0);
}

#[test]
fn script_style_drops_relation_space() {
    let display = layout_with_style("x=y", LineStyle::Script);
    let children = display.children();
    assert_eq!(children.len(), 3);
    assert_near!(children[1].position().x, 5.0);
    assert_near!(children[2].position().x, 10.0);
    assert_dims!(display, 7.0, 2.0, 15.0);
}

#[test]
fn explicit_spaces() {
    let display = layout("x\\,y");
    let children = display.children();
    assert_eq!(children.len(), 2);
    assert_near!(children[1].position().x, 10.0 + 3.0 * mu());
    assert_near!(display.width, 20.0 + 3.0 * mu());

    let display = layout("x\\quad y");
    assert_near!(display.width, 20.0 + 18.0 * mu());

    // negative space
    let display = layout("x\\!y");
    assert_near!(display.width, 20.0 - 3.0 * mu());
}

#[test]
fn style_change() {
    let display = layout("x\\scriptstyle y");
    let children = display.children();
    assert_eq!(children.len(), 2);
    assert_dims!(children[0], 14.0, 4.0, 10.0);
    assert_dims!(children[1], 7.0, 2.0, 5.0);
    assert_near!(children[1].position().x, 10.0);
    assert_dims!(display, 14.0, 4.0, 15.0);

    let display = layout("\\scriptscriptstyle x");
    assert_dims!(display, 3.5, 1.0, 2.5);
}

#[test]
fn binary_operator_spacing_in_text_style() {
    let display = layout_with_style("a+b", LineStyle::Text);
    let children = display.children();
    assert_eq!(children.len(), 3);
    assert_near!(children[1].position().x, 10.0 + 4.0 * mu());
}

#[test]
fn unary_minus_is_fused() {
    let display = layout("-x");
    assert_eq!(child_kinds(&display), ["run"]);
    assert_eq!(run_text(&display.children()[0]), "\u{2212}\u{1D465}");
    assert_near!(display.width, 20.0);
}

#[test]
fn colors() {
    let red = ColorU8::from_rgb(255, 0, 0);
    let display = layout("a\\color{#ff0000}{bc}d");
    assert_eq!(child_kinds(&display), ["run", "list", "run"]);

    let children = display.children();
    let colored = &children[1];
    assert_eq!(colored.local_text_color(), Some(red));
    assert_eq!(colored.text_color(), red);
    assert_eq!(colored.children()[0].text_color(), red);
    assert_eq!(children[0].text_color(), mathdisplay::color::BLACK);
    assert_eq!(children[2].text_color(), mathdisplay::color::BLACK);

    // no spacing around the colored list
    assert_near!(colored.position().x, 10.0);
    assert_near!(children[2].position().x, 30.0);
    assert_dims!(display, 14.0, 4.0, 40.0);
}

#[test]
fn text_color_and_hex() {
    let display = layout("\\textcolor{#00ff00}{x}");
    let colored = &display.children()[0];
    assert_eq!(colored.text_color(), ColorU8::from_rgb(0, 255, 0));
}

#[test]
fn invalid_color_is_ignored() {
    let display = layout("\\color{#12345}{x}");
    let colored = &display.children()[0];
    assert_eq!(colored.local_text_color(), None);
    assert_eq!(colored.text_color(), mathdisplay::color::BLACK);
}

#[test]
fn root_color_propagates() {
    let blue = ColorU8::from_rgb(0, 0, 255);
    let red = ColorU8::from_rgb(255, 0, 0);
    let mut display = layout("\\frac{a}{\\color{#f00}{b}}");
    display.set_text_color(blue);
    let DisplayKind::Fraction(frac) = &display.children()[0].kind else {
        panic!("expected a fraction");
    };
    assert_eq!(frac.numerator.children()[0].text_color(), blue);
    let colored = &frac.denominator.children()[0];
    assert_eq!(colored.text_color(), red);
}

#[test]
fn moving_the_root_keeps_children_relative() {
    let mut display = layout("x+y");
    let before: Vec<Point> = display.children().iter().map(|c| c.position()).collect();
    display.set_position(Point::from_xy(100.0, 50.0));
    let after: Vec<Point> = display.children().iter().map(|c| c.position()).collect();
    assert_eq!(before, after);
    assert_near!(display.bounds().x(), 100.0);
    assert_near!(display.bounds().y(), 46.0);
}

#[test]
fn missing_glyphs_are_laid_out() {
    // the mock font has no glyph for this code point
    let atom = MathAtom::with_type(AtomType::Ordinary, '\u{4E00}');
    let list = MathList::from_atoms(vec![atom]);
    let display = mathdisplay::layout(&list, &font(), LineStyle::Display);
    let run = &display.children()[0];
    let DisplayKind::Run(r) = &run.kind else {
        panic!("expected a run");
    };
    assert_eq!(r.glyphs, [mathdisplay::GlyphId(0)]);
    assert_dims!(display, 0.0, 0.0, 10.0);
}

#[test]
fn binary_operator_before_spaced_relation() {
    // the space keeps `+` binary through finalize, it is laid out as ordinary
    let display = layout("x+\\,=y");
    let children = display.children();
    let texts: Vec<&str> = children.iter().map(run_text).collect();
    assert_eq!(texts, ["\u{1D465}", "+", "=", "\u{1D466}"]);
    assert_near!(children[1].position().x, 10.0 + 4.0 * mu());
    assert_near!(children[2].position().x, 20.0 + 12.0 * mu());
    assert_near!(children[3].position().x, 30.0 + 17.0 * mu());

    let display = layout("x+\\displaystyle=y");
    let children = display.children();
    assert_eq!(children.len(), 4);
    assert_near!(children[2].position().x, 20.0 + 9.0 * mu());
    assert_near!(children[3].position().x, 30.0 + 14.0 * mu());
}

#[test]
fn binary_operator_after_spaced_binary_operator() {
    let display = layout("x+\\,+y");
    let children = display.children();
    assert_eq!(children.len(), 4);
    assert_near!(children[2].position().x, 20.0 + 11.0 * mu());
    // the second operator is ordinary, no space before y
    assert_near!(children[3].position().x, 30.0 + 11.0 * mu());
}

#[test]
fn binary_operator_before_right_delimiter() {
    let display = layout("\\left( x+\\, \\right)");
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner), ["glyph", "list", "glyph"]);
    assert_eq!(child_kinds(&inner.children()[1]), ["run", "run"]);
}

#[test]
fn spaced_line_gets_closing_space() {
    let font = font();
    let plain = layout("x,");
    let list = mathdisplay::finalize(&parse("x,"));
    let spaced =
        mathdisplay::Typesetter::create_line(&list, &font, LineStyle::Display, false, true);
    assert_near!(plain.width, 20.0);
    assert_near!(spaced.width, 20.0 + 3.0 * mu());
    assert_near!(spaced.ascent, plain.ascent);
}
