use mathdisplay::display::DisplayKind;
use mathdisplay::geom::Point;
use mathdisplay::LineStyle;

use crate::*;

fn fraction_parts(display: &mathdisplay::Display) -> &mathdisplay::display::FractionDisplay {
    match &display.kind {
        DisplayKind::Fraction(frac) => frac,
        _ => panic!("expected a fraction, got a {}", kind_name(display)),
    }
}

#[test]
fn display_fraction() {
    let display = layout("\\frac{1}{2}");
    assert_eq!(child_kinds(&display), ["fraction"]);
    let frac_display = &display.children()[0];
    assert_dims!(frac_display, 28.0, 18.0, 10.0);

    let frac = fraction_parts(frac_display);
    assert_eq!(frac.numerator.position(), Point::from_xy(0.0, 14.0));
    assert_eq!(frac.denominator.position(), Point::from_xy(0.0, -14.0));
    assert_near!(frac.line_position, 5.0);
    assert_near!(frac.line_thickness, 1.0);
    assert_eq!(run_text(&frac.numerator.children()[0]), "1");
}

#[test]
fn text_fraction_keeps_numerator_gap() {
    let display = layout_with_style("\\frac12", LineStyle::Text);
    let frac_display = &display.children()[0];
    // numerator raised to keep the minimum gap above the rule
    assert_dims!(frac_display, 15.5, 9.0, 5.0);
    let frac = fraction_parts(frac_display);
    assert_near!(frac.numerator_up, 8.5);
    assert_near!(frac.denominator_down, 7.0);
}

#[test]
fn atop_has_no_rule() {
    let display = layout("1 \\atop 2");
    let frac_display = &display.children()[0];
    assert_dims!(frac_display, 28.0, 18.0, 10.0);
    assert_eq!(fraction_parts(frac_display).line_thickness, 0.0);
}

#[test]
fn narrow_part_is_centered() {
    let display = layout("\\frac{xy}{z}");
    let frac = fraction_parts(&display.children()[0]);
    assert_near!(frac.numerator.position().x, 0.0);
    assert_near!(frac.denominator.position().x, 5.0);
    assert_near!(display.width, 20.0);
}

#[test]
fn binomial_gets_delimiters() {
    let display = layout("\\binom{1}{2}");
    assert_eq!(child_kinds(&display), ["list"]);
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner), ["glyph", "fraction", "glyph"]);

    let children = inner.children();
    assert_near!(children[1].position().x, 14.0);
    assert_near!(children[2].position().x, 24.0);
    // second variant, centered on the axis
    assert_near!(children[0].shift_down(), 10.0);
    assert_eq!(fraction_parts(&children[1]).line_thickness, 0.0);
    assert_dims!(inner, 32.0, 22.0, 38.0);
}

#[test]
fn fraction_spacing() {
    let display = layout("\\frac{x}{y}+1");
    assert_eq!(child_kinds(&display), ["fraction", "run", "run"]);
    let children = display.children();
    assert_near!(children[1].position().x, 10.0 + 4.0 * mu());
    assert_eq!(run_text(&children[1]), "+");
}

#[test]
fn fraction_moves_with_parent() {
    let display = layout("x\\frac{1}{2}");
    let frac_display = &display.children()[1];
    let x = 10.0 + 3.0 * mu();
    assert_near!(frac_display.position().x, x);
    let frac = fraction_parts(frac_display);
    assert_near!(frac.numerator.position().x, x);
    assert_near!(frac.numerator.position().y, 14.0);
}
