#![cfg(test)]

use mathdisplay::display::{Display, DisplayKind};
use mathdisplay::{LineStyle, MathList};

mod mock;
mod tests;

use mock::MockFont;

const FONT_SIZE: f32 = 20.0;

fn font() -> MockFont {
    MockFont::new(FONT_SIZE)
}

fn parse(latex: &str) -> MathList {
    mathdisplay::parse(latex).unwrap()
}

/// Parse and lay out `latex` in display style with the mock font
fn layout(latex: &str) -> Display {
    layout_with_style(latex, LineStyle::Display)
}

fn layout_with_style(latex: &str, style: LineStyle) -> Display {
    mathdisplay::layout(&parse(latex), &font(), style)
}

/// One mu of the mock font at the reference size
fn mu() -> f32 {
    FONT_SIZE / 18.0
}

pub trait Near {
    fn near_abs(&self, other: &Self, tol: f32) -> bool;
}

impl Near for f32 {
    fn near_abs(&self, other: &Self, tol: f32) -> bool {
        (self - other).abs() <= tol
    }
}

macro_rules! assert_near {
    ($actual:expr, $expected:expr) => {
        $crate::assert_near!($actual, $expected, 1e-3)
    };
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let actual: f32 = $actual;
        let expected: f32 = $expected;
        assert!(
            $crate::Near::near_abs(&actual, &expected, $tol),
            "assertion failed: {} ≈ {}\n  actual: {}\nexpected: {}",
            stringify!($actual),
            stringify!($expected),
            actual,
            expected
        );
    }};
}
pub(crate) use assert_near;

/// Compare texts and print a unified diff on mismatch
macro_rules! assert_text_eq {
    ($actual:expr, $expected:expr) => {{
        let actual: &str = &$actual;
        let expected: &str = &$expected;
        if actual != expected {
            let diff = similar::TextDiff::from_lines(expected, actual);
            panic!(
                "text assertion failed\n{}",
                diff.unified_diff().header("expected", "actual")
            );
        }
    }};
}
pub(crate) use assert_text_eq;

/// Check ascent, descent and width of a display
macro_rules! assert_dims {
    ($display:expr, $ascent:expr, $descent:expr, $width:expr) => {{
        let d: &mathdisplay::Display = &$display;
        $crate::assert_near!(d.ascent, $ascent);
        $crate::assert_near!(d.descent, $descent);
        $crate::assert_near!(d.width, $width);
    }};
}
pub(crate) use assert_dims;

/// Short name of the display kind
fn kind_name(display: &Display) -> &'static str {
    match &display.kind {
        DisplayKind::Run(_) => "run",
        DisplayKind::Glyph(_) => "glyph",
        DisplayKind::GlyphConstruction(_) => "construction",
        DisplayKind::List(_) => "list",
        DisplayKind::Fraction(_) => "fraction",
        DisplayKind::Radical(_) => "radical",
        DisplayKind::LargeOpLimits(_) => "limits",
        DisplayKind::Bar(_) => "bar",
        DisplayKind::Accent(_) => "accent",
    }
}

/// Kinds of the children of a list display
fn child_kinds(display: &Display) -> Vec<&'static str> {
    display.children().iter().map(kind_name).collect()
}

/// Text of a run display
fn run_text(display: &Display) -> &str {
    match &display.kind {
        DisplayKind::Run(run) => &run.text,
        _ => panic!("expected a run, got a {}", kind_name(display)),
    }
}
