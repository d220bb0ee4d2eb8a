use mathdisplay::display::{DisplayKind, LinePosition};
use mathdisplay::geom::Point;
use mathdisplay::LineStyle;

use crate::*;

fn list_index(display: &mathdisplay::Display) -> (LinePosition, Option<usize>) {
    let list = display.as_list().expect("a list display");
    (list.line_position, list.index)
}

#[test]
fn superscript() {
    let display = layout("x^2");
    assert_eq!(child_kinds(&display), ["run", "list"]);
    let children = display.children();
    assert!(children[0].has_script);

    // moved right by the italic correction of x
    let sup = &children[1];
    assert_eq!(sup.position(), Point::from_xy(11.0, 11.5));
    assert_eq!(list_index(sup), (LinePosition::Superscript, Some(0)));
    assert_dims!(sup, 7.0, 2.0, 5.0);
    assert_dims!(display, 18.5, 4.0, 16.0);
}

#[test]
fn subscript() {
    let display = layout("x_2");
    let children = display.children();
    assert_eq!(child_kinds(&display), ["run", "list"]);
    let sub = &children[1];
    assert_eq!(sub.position(), Point::from_xy(10.0, -4.5));
    assert_eq!(list_index(sub).0, LinePosition::Subscript);
    assert_dims!(display, 14.0, 6.5, 15.0);
}

#[test]
fn both_scripts() {
    let display = layout("x^2_3");
    assert_eq!(child_kinds(&display), ["run", "list", "list"]);
    let children = display.children();
    assert_eq!(children[1].position(), Point::from_xy(11.0, 11.5));
    assert_eq!(children[2].position(), Point::from_xy(10.0, -4.5));
    assert_dims!(display, 18.5, 6.5, 16.0);
}

#[test]
fn nested_superscripts() {
    let display = layout("x^{y^2}");
    let sup = &display.children()[1];
    assert_dims!(sup, 9.25, 2.0, 8.0);
    assert_eq!(sup.position(), Point::from_xy(11.0, 11.5));

    let inner = &sup.children()[1];
    assert_near!(inner.position().x, 5.5);
    assert_near!(inner.position().y, 5.75);
    assert_near!(display.ascent, 20.75);
    assert_near!(display.width, 19.0);
}

#[test]
fn script_on_fused_run() {
    let display = layout("ab^2");
    assert_eq!(child_kinds(&display), ["run", "list"]);
    let children = display.children();
    assert_near!(children[0].width, 20.0);
    assert_eq!(list_index(&children[1]), (LinePosition::Superscript, Some(1)));
    assert_near!(children[1].position().x, 21.0);
}

#[test]
fn large_operator_grows_in_display_style() {
    let display = layout("\\sum");
    assert_eq!(child_kinds(&display), ["glyph"]);
    let glyph = &display.children()[0];
    // larger variant centered on the axis
    assert_dims!(glyph, 23.0, 13.0, 12.0);
    assert_near!(glyph.shift_down(), 5.0);

    let display = layout_with_style("\\sum", LineStyle::Text);
    assert_dims!(display.children()[0], 14.0, 4.0, 10.0);
}

#[test]
fn large_operator_limits() {
    let display = layout("\\sum_{i=1}^{n}");
    assert_eq!(child_kinds(&display), ["limits"]);
    let op = &display.children()[0];
    assert_dims!(op, 34.0, 27.0, 15.0);

    let DisplayKind::LargeOpLimits(limits) = &op.kind else {
        unreachable!()
    };
    let upper = limits.upper_limit.as_ref().unwrap();
    let lower = limits.lower_limit.as_ref().unwrap();
    assert_eq!(upper.position(), Point::from_xy(5.0, 27.0));
    assert_eq!(lower.position(), Point::from_xy(0.0, -25.0));
    assert_eq!(limits.nucleus.position(), Point::from_xy(1.5, 0.0));
}

#[test]
fn limits_become_scripts_in_text_style() {
    let display = layout_with_style("\\sum_i", LineStyle::Text);
    assert_eq!(child_kinds(&display), ["list", "glyph"]);
    let children = display.children();
    assert!(children[1].has_script);
    assert_dims!(children[1], 14.0, 4.0, 10.0);
    assert_eq!(children[0].position(), Point::from_xy(10.0, -4.5));
    assert_dims!(display, 14.0, 6.5, 15.0);
}

#[test]
fn integral_takes_scripts() {
    let display = layout("\\int_0^1");
    assert_eq!(child_kinds(&display), ["list", "list", "glyph"]);
    let children = display.children();
    assert_eq!(children[0].position(), Point::from_xy(12.0, 20.5));
    assert_eq!(children[1].position(), Point::from_xy(12.0, -13.5));
    assert_dims!(display, 27.5, 15.5, 17.0);
}

#[test]
fn operator_names_with_limits() {
    let display = layout("\\lim_{x}");
    let op = &display.children()[0];
    assert_eq!(kind_name(op), "limits");
    assert_dims!(op, 14.0, 18.0, 30.0);
    let DisplayKind::LargeOpLimits(limits) = &op.kind else {
        unreachable!()
    };
    assert_eq!(kind_name(&limits.nucleus), "run");
    assert_eq!(run_text(&limits.nucleus), "lim");
    let lower = limits.lower_limit.as_ref().unwrap();
    assert_eq!(lower.position(), Point::from_xy(12.5, -16.0));
    assert!(limits.upper_limit.is_none());
}

#[test]
fn operator_spacing() {
    let display = layout("\\sum x");
    let children = display.children();
    assert_eq!(child_kinds(&display), ["glyph", "run"]);
    assert_near!(children[1].position().x, 12.0 + 3.0 * mu());

    let display = layout("\\log x");
    assert_eq!(run_text(&display.children()[0]), "log");
    assert_near!(display.children()[1].position().x, 30.0 + 3.0 * mu());
}

#[test]
fn tall_scripts_raise_the_superscript() {
    let display = layout("x^{\\frac12}_{\\frac12}");
    assert_eq!(child_kinds(&display), ["run", "list", "list"]);
    let children = display.children();
    let (sup, sub) = (&children[1], &children[2]);
    assert_dims!(sup, 7.75, 4.5, 2.5);
    assert_dims!(sub, 7.75, 4.5, 2.5);

    // the gap of 3.75 is brought to 4 by lowering the subscript, then both
    // move up as the superscript bottom may rise to 8
    assert_near!(sup.position().x, 11.0);
    assert_near!(sup.position().y, 12.5);
    assert_near!(sub.position().x, 10.0);
    assert_near!(sub.position().y, -3.75);
    let gap = (sup.position().y - sup.descent) - (sub.position().y + sub.ascent);
    assert_near!(gap, 4.0);
    assert_near!(display.ascent, 20.25);
    assert_near!(display.descent, 8.25);
}

#[test]
fn tall_subscript_is_lowered() {
    let display = layout("x^2_{\\sqrt2}");
    let children = display.children();
    let (sup, sub) = (&children[1], &children[2]);
    assert_dims!(sub, 12.5, 6.0, 11.0);

    // superscript bottom already above the maximum, only the subscript moves
    assert_eq!(sup.position(), Point::from_xy(11.0, 11.5));
    assert_near!(sub.position().y, -7.0);
    let gap = (sup.position().y - sup.descent) - (sub.position().y + sub.ascent);
    assert_near!(gap, 4.0);
    assert_near!(display.descent, 13.0);
}
