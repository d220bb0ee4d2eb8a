#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]
/*!
 * # mathdisplay
 * _LaTeX math, typeset the TeX way_.
 *
 * Mathdisplay parses the math subset of LaTeX into a [`MathList`], and lays
 * it out into a tree of [`Display`] following the rules of appendix G of the
 * TeXbook, with the parameters of an OpenType math font.
 *
 * ## Get started
 *
 * ```ignore
 * use mathdisplay::{LineStyle, parse, layout};
 *
 * // parse the LaTeX input
 * let list = parse(r"x = \frac{-b \pm \sqrt{b^2-4ac}}{2a}")?;
 *
 * // lay it out with a math font, e.g. from the `mathdisplay-font` crate
 * let font = mathdisplay_font::MathFont::new(&face, 20.0)?;
 * let display = layout(&list, &font, LineStyle::Display);
 *
 * println!("{} x {}", display.width, display.ascent + display.descent);
 * ```
 *
 * A math list can also be built programmatically, and converted back to
 * LaTeX with [`to_latex`].
 *
 * ## Pipeline
 *
 *  - [`parse`] reads LaTeX into a [`MathList`] (see [`mod@parse`] for the supported syntax)
 *  - [`finalize`] fixes the atom types in context and assigns the index ranges
 *  - [`preprocess`] fuses ordinary atoms and applies font styles
 *  - [`typeset`] lays out the atoms into [`Display`]s, querying the font
 *    through [`FontMathMetrics`]
 *
 * [`layout`] runs the last three steps.
 *
 * ## Crate features
 *  - `diag`: pretty reporting of parse errors with `miette` (See `diag`)
 */
// Mathdisplay is released under the MIT License with the following copyright:
// Copyright (c) 2026 Rémi Thebault

pub mod atom;
pub mod charset;
pub mod display;
pub mod finalize;
mod input;
pub mod latex;
pub mod metrics;
pub mod parse;
pub mod preprocess;
pub mod spacing;
pub mod symbols;
pub mod typeset;

#[cfg(feature = "diag")]
pub mod diag;

pub use atom::{AtomType, FontStyle, LineStyle, MathAtom, MathList, Range};
pub use display::{Display, DisplayKind};
pub use finalize::finalize;
pub use latex::to_latex;
pub use metrics::{FontMathMetrics, MathConstant};
pub use parse::{ParseError, ParseErrorKind, parse};
pub use preprocess::preprocess;
pub use typeset::{Typesetter, layout};

/// Rexports of [`mathdisplay_base::color`] items
pub mod color {
    pub use mathdisplay_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`mathdisplay_base::geom`] items
pub mod geom {
    pub use mathdisplay_base::geom::*;
}

/// Rexport of the `ttf-parser` glyph identifier
pub use ttf_parser::GlyphId;

/// Byte position in the LaTeX input
pub type Pos = usize;
/// Byte range in the LaTeX input
pub type Span = (Pos, Pos);
