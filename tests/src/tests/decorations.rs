use mathdisplay::display::DisplayKind;
use mathdisplay::geom::Point;
use mathdisplay::LineStyle;

use crate::*;

#[test]
fn square_root() {
    let display = layout("\\sqrt{2}");
    assert_eq!(child_kinds(&display), ["radical"]);
    let rad_display = &display.children()[0];
    assert_dims!(rad_display, 26.0, 11.0, 22.0);

    let DisplayKind::Radical(rad) = &rad_display.kind else {
        unreachable!()
    };
    assert_eq!(rad.radicand.position(), Point::from_xy(12.0, 0.0));
    assert_eq!(kind_name(&rad.glyph), "glyph");
    // the larger sign is raised by 3 to meet the rule
    assert_near!(rad.glyph.shift_down(), 3.0);
    assert_near!(rad.top_kern, 1.0);
    assert!(rad.degree.is_none());
}

#[test]
fn root_with_degree() {
    let display = layout("\\sqrt[3]{2}");
    let rad_display = &display.children()[0];
    let DisplayKind::Radical(rad) = &rad_display.kind else {
        unreachable!()
    };
    let degree = rad.degree.as_ref().unwrap();
    assert_dims!(degree, 3.5, 1.0, 2.5);
    assert_near!(degree.position().x, 7.5);
    // raised by 60% of the radical height
    assert_near!(degree.position().y, 9.0);
    // negative kern after the degree: the sign stays in place
    assert_eq!(rad.radical_shift, 0.0);
    assert_near!(rad_display.width, 22.0);
}

#[test]
fn text_style_root() {
    let display = layout_with_style("\\sqrt{x}", LineStyle::Text);
    assert_dims!(display.children()[0], 25.0, 12.0, 22.0);
}

#[test]
fn radical_after_ordinary() {
    let display = layout("x\\sqrt{2}");
    let rad_display = &display.children()[1];
    // radicals are spaced as ordinary atoms
    assert_near!(rad_display.position().x, 10.0);
    let DisplayKind::Radical(rad) = &rad_display.kind else {
        unreachable!()
    };
    assert_near!(rad.radicand.position().x, 22.0);
}

#[test]
fn overline() {
    let display = layout("\\overline{x}");
    let bar_display = &display.children()[0];
    assert_eq!(kind_name(bar_display), "bar");
    assert_dims!(bar_display, 19.0, 4.0, 10.0);
    let DisplayKind::Bar(bar) = &bar_display.kind else {
        unreachable!()
    };
    assert_near!(bar.line_shift_up, 17.0);
    assert_near!(bar.line_thickness, 1.0);
}

#[test]
fn underline() {
    let display = layout("\\underline{x}");
    let bar_display = &display.children()[0];
    assert_dims!(bar_display, 14.0, 9.0, 10.0);
    let DisplayKind::Bar(bar) = &bar_display.kind else {
        unreachable!()
    };
    assert_near!(bar.line_shift_up, -7.0);
}

#[test]
fn accent() {
    let display = layout("\\hat{x}");
    assert_eq!(child_kinds(&display), ["accent"]);
    let acc_display = &display.children()[0];
    assert_dims!(acc_display, 19.0, 4.0, 10.0);
    let DisplayKind::Accent(acc) = &acc_display.kind else {
        unreachable!()
    };
    assert_eq!(acc.accent.position(), Point::from_xy(0.0, 5.0));
    assert_eq!(kind_name(&acc.accent), "glyph");
}

#[test]
fn wide_accent_uses_a_variant() {
    let display = layout("\\widehat{xyz}");
    let acc_display = &display.children()[0];
    let DisplayKind::Accent(acc) = &acc_display.kind else {
        unreachable!()
    };
    // the widest variant fitting the accentee, centered over it
    assert_near!(acc.accent.width, 14.0);
    assert_eq!(acc.accent.position(), Point::from_xy(8.0, 5.0));
    assert_near!(acc_display.ascent, 47.0);
    assert_near!(acc_display.width, 30.0);
}

#[test]
fn accent_scripts_go_to_the_accentee() {
    let display = layout("\\hat{x}^2");
    assert_eq!(child_kinds(&display), ["accent"]);
    let acc_display = &display.children()[0];
    assert!(!acc_display.has_script);
    let DisplayKind::Accent(acc) = &acc_display.kind else {
        unreachable!()
    };
    assert_eq!(child_kinds(&acc.accentee), ["run", "list"]);
    assert_near!(acc_display.width, 16.0);
    assert_near!(acc_display.ascent, 23.5);
}

#[test]
fn accent_on_a_list_keeps_its_scripts() {
    let display = layout("\\hat{xy}^2");
    assert_eq!(child_kinds(&display), ["accent", "list"]);
    assert!(display.children()[0].has_script);
}
