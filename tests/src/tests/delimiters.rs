use mathdisplay::display::DisplayKind;

use crate::*;

#[test]
fn parentheses() {
    let display = layout("\\left( x \\right)");
    assert_eq!(child_kinds(&display), ["list"]);
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner), ["glyph", "list", "glyph"]);

    let children = inner.children();
    assert_near!(children[1].position().x, 10.0);
    assert_near!(children[2].position().x, 20.0);
    // the base glyph is high enough and sits on the axis
    assert_near!(children[0].shift_down(), 0.0);
    assert_dims!(inner, 14.0, 4.0, 30.0);
}

#[test]
fn null_delimiter() {
    let display = layout("\\left. x \\right)");
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner), ["list", "glyph"]);
    assert_near!(inner.width, 20.0);
}

#[test]
fn inner_gets_closing_space() {
    let display = layout("\\left( x, \\right)");
    let inner = &display.children()[0];
    let list = &inner.children()[1];
    assert_near!(list.width, 20.0 + 3.0 * mu());
    assert_near!(inner.width, 40.0 + 3.0 * mu());
}

#[test]
fn tall_content_uses_an_assembly() {
    let display = layout("\\left( \\begin{matrix}1\\\\2\\\\3\\\\4\\end{matrix} \\right)");
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner), ["construction", "list", "glyph"]);

    let left = &inner.children()[0];
    let DisplayKind::GlyphConstruction(construction) = &left.kind else {
        unreachable!()
    };
    // bottom, eight extenders, top
    assert_eq!(construction.glyphs.len(), 10);
    assert_eq!(construction.glyphs.len(), construction.offsets.len());
    assert_near!(left.ascent + left.descent, 85.0);
    assert!(construction.offsets.windows(2).all(|w| w[0] < w[1]));

    // no assembly for the closing parenthesis: the largest variant
    let right = &inner.children()[2];
    assert_near!(right.ascent + right.descent, 54.0);
}

#[test]
fn delimiters_around_script_content() {
    let display = layout("\\left[ x^2 \\right]");
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner), ["glyph", "list", "glyph"]);
    let list = &inner.children()[1];
    assert_eq!(child_kinds(list), ["run", "list"]);
    assert!(inner.ascent >= list.ascent);
}
