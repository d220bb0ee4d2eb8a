/*!
 * OpenType math fonts for mathdisplay.
 *
 * [`MathFont`] reads the `MATH` table of a font face with `ttf-parser`
 * and provides the metrics needed by the typesetter.
 * The [`render`] module turns a display tree into filled paths.
 */
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

use std::fmt;

use mathdisplay::metrics::{FontMathMetrics, GlyphBox, GlyphPart, MathConstant};
use mathdisplay_base::geom;
use ttf_parser as ttf;

pub mod render;

pub use render::{RenderOptions, render_display, render_display_with};

/// Error of the font crate
#[derive(Debug, Clone)]
pub enum Error {
    /// The face has no `MATH` table
    NoMathTable,
    /// The font data could not be parsed
    FaceParsingError(ttf::FaceParsingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoMathTable => write!(f, "The font has no MATH table"),
            Error::FaceParsingError(err) => err.fmt(f),
        }
    }
}

impl From<ttf::FaceParsingError> for Error {
    fn from(err: ttf::FaceParsingError) -> Self {
        Error::FaceParsingError(err)
    }
}

impl std::error::Error for Error {}

/// Parse the face at `index` in `data`, checking that it is a math font
pub fn parse_face(data: &[u8], index: u32) -> Result<ttf::Face<'_>, Error> {
    let face = ttf::Face::parse(data, index)?;
    if face.tables().math.is_none() {
        return Err(Error::NoMathTable);
    }
    Ok(face)
}

/// A math font face at a given size
#[derive(Debug, Clone, Copy)]
pub struct MathFont<'a> {
    face: &'a ttf::Face<'a>,
    size: f32,
}

impl<'a> MathFont<'a> {
    /// Wrap a face, failing if it has no `MATH` table
    pub fn new(face: &'a ttf::Face<'a>, size: f32) -> Result<Self, Error> {
        let Some(math) = face.tables().math else {
            return Err(Error::NoMathTable);
        };
        if math.constants.is_none() {
            log::warn!("MATH table without constants, layout will use zero values");
        }
        Ok(MathFont { face, size })
    }

    /// The underlying face
    pub fn face(&self) -> &'a ttf::Face<'a> {
        self.face
    }

    /// Points per font unit
    pub fn scale(&self) -> f32 {
        self.size / self.face.units_per_em() as f32
    }

    fn units(&self, value: impl Into<f32>) -> f32 {
        value.into() * self.scale()
    }

    fn math(&self) -> Option<ttf::math::Table<'a>> {
        self.face.tables().math
    }

    fn constants(&self) -> Option<ttf::math::Constants<'a>> {
        self.math().and_then(|m| m.constants)
    }

    fn variants(&self, glyph: ttf::GlyphId, vertical: bool) -> Vec<ttf::GlyphId> {
        let construction = self.math().and_then(|m| m.variants).and_then(|v| {
            if vertical {
                v.vertical_constructions.get(glyph)
            } else {
                v.horizontal_constructions.get(glyph)
            }
        });
        let mut variants: Vec<ttf::GlyphId> = construction
            .map(|c| c.variants.into_iter().map(|v| v.variant_glyph).collect())
            .unwrap_or_default();
        if variants.is_empty() {
            variants.push(glyph);
        }
        variants
    }
}

impl FontMathMetrics for MathFont<'_> {
    fn font_size(&self) -> f32 {
        self.size
    }

    fn with_size(&self, size: f32) -> Self {
        MathFont { size, ..*self }
    }

    fn constant(&self, constant: MathConstant) -> f32 {
        use MathConstant as C;

        let Some(c) = self.constants() else {
            return 0.0;
        };
        let value: i16 = match constant {
            C::DelimitedSubFormulaMinHeight => {
                return self.units(c.delimited_sub_formula_min_height());
            }
            C::DisplayOperatorMinHeight => return self.units(c.display_operator_min_height()),
            C::MathLeading => c.math_leading().value,
            C::AxisHeight => c.axis_height().value,
            C::AccentBaseHeight => c.accent_base_height().value,
            C::FlattenedAccentBaseHeight => c.flattened_accent_base_height().value,
            C::SubscriptShiftDown => c.subscript_shift_down().value,
            C::SubscriptTopMax => c.subscript_top_max().value,
            C::SubscriptBaselineDropMin => c.subscript_baseline_drop_min().value,
            C::SuperscriptShiftUp => c.superscript_shift_up().value,
            C::SuperscriptShiftUpCramped => c.superscript_shift_up_cramped().value,
            C::SuperscriptBottomMin => c.superscript_bottom_min().value,
            C::SuperscriptBaselineDropMax => c.superscript_baseline_drop_max().value,
            C::SubSuperscriptGapMin => c.sub_superscript_gap_min().value,
            C::SuperscriptBottomMaxWithSubscript => {
                c.superscript_bottom_max_with_subscript().value
            }
            C::SpaceAfterScript => c.space_after_script().value,
            C::UpperLimitGapMin => c.upper_limit_gap_min().value,
            C::UpperLimitBaselineRiseMin => c.upper_limit_baseline_rise_min().value,
            C::LowerLimitGapMin => c.lower_limit_gap_min().value,
            C::LowerLimitBaselineDropMin => c.lower_limit_baseline_drop_min().value,
            C::StackTopShiftUp => c.stack_top_shift_up().value,
            C::StackTopDisplayStyleShiftUp => c.stack_top_display_style_shift_up().value,
            C::StackBottomShiftDown => c.stack_bottom_shift_down().value,
            C::StackBottomDisplayStyleShiftDown => {
                c.stack_bottom_display_style_shift_down().value
            }
            C::StackGapMin => c.stack_gap_min().value,
            C::StackDisplayStyleGapMin => c.stack_display_style_gap_min().value,
            C::StretchStackTopShiftUp => c.stretch_stack_top_shift_up().value,
            C::StretchStackBottomShiftDown => c.stretch_stack_bottom_shift_down().value,
            C::StretchStackGapAboveMin => c.stretch_stack_gap_above_min().value,
            C::StretchStackGapBelowMin => c.stretch_stack_gap_below_min().value,
            C::FractionNumeratorShiftUp => c.fraction_numerator_shift_up().value,
            C::FractionNumeratorDisplayStyleShiftUp => {
                c.fraction_numerator_display_style_shift_up().value
            }
            C::FractionDenominatorShiftDown => c.fraction_denominator_shift_down().value,
            C::FractionDenominatorDisplayStyleShiftDown => {
                c.fraction_denominator_display_style_shift_down().value
            }
            C::FractionNumeratorGapMin => c.fraction_numerator_gap_min().value,
            C::FractionNumeratorDisplayStyleGapMin => {
                c.fraction_num_display_style_gap_min().value
            }
            C::FractionRuleThickness => c.fraction_rule_thickness().value,
            C::FractionDenominatorGapMin => c.fraction_denominator_gap_min().value,
            C::FractionDenominatorDisplayStyleGapMin => {
                c.fraction_denom_display_style_gap_min().value
            }
            C::SkewedFractionHorizontalGap => c.skewed_fraction_horizontal_gap().value,
            C::SkewedFractionVerticalGap => c.skewed_fraction_vertical_gap().value,
            C::OverbarVerticalGap => c.overbar_vertical_gap().value,
            C::OverbarRuleThickness => c.overbar_rule_thickness().value,
            C::OverbarExtraAscender => c.overbar_extra_ascender().value,
            C::UnderbarVerticalGap => c.underbar_vertical_gap().value,
            C::UnderbarRuleThickness => c.underbar_rule_thickness().value,
            C::UnderbarExtraDescender => c.underbar_extra_descender().value,
            C::RadicalVerticalGap => c.radical_vertical_gap().value,
            C::RadicalDisplayStyleVerticalGap => c.radical_display_style_vertical_gap().value,
            C::RadicalRuleThickness => c.radical_rule_thickness().value,
            C::RadicalExtraAscender => c.radical_extra_ascender().value,
            C::RadicalKernBeforeDegree => c.radical_kern_before_degree().value,
            C::RadicalKernAfterDegree => c.radical_kern_after_degree().value,
        };
        self.units(value)
    }

    fn script_scale_down(&self) -> f32 {
        self.constants()
            .map_or(0.7, |c| c.script_percent_scale_down() as f32 / 100.0)
    }

    fn script_script_scale_down(&self) -> f32 {
        self.constants()
            .map_or(0.5, |c| c.script_script_percent_scale_down() as f32 / 100.0)
    }

    fn radical_degree_bottom_raise_percent(&self) -> f32 {
        self.constants()
            .map_or(0.6, |c| c.radical_degree_bottom_raise_percent() as f32 / 100.0)
    }

    fn glyph_for_char(&self, ch: char) -> ttf::GlyphId {
        self.face.glyph_index(ch).unwrap_or(ttf::GlyphId(0))
    }

    fn glyph_name(&self, glyph: ttf::GlyphId) -> Option<String> {
        self.face.glyph_name(glyph).map(str::to_string)
    }

    fn glyph_by_name(&self, name: &str) -> Option<ttf::GlyphId> {
        self.face.glyph_index_by_name(name)
    }

    fn italic_correction(&self, glyph: ttf::GlyphId) -> f32 {
        self.math()
            .and_then(|m| m.glyph_info)
            .and_then(|gi| gi.italic_corrections)
            .and_then(|ic| ic.get(glyph))
            .map_or(0.0, |v| self.units(v.value))
    }

    fn top_accent_attachment(&self, glyph: ttf::GlyphId) -> Option<f32> {
        self.math()
            .and_then(|m| m.glyph_info)
            .and_then(|gi| gi.top_accent_attachments)
            .and_then(|ta| ta.get(glyph))
            .map(|v| self.units(v.value))
    }

    fn vertical_variants(&self, glyph: ttf::GlyphId) -> Vec<ttf::GlyphId> {
        self.variants(glyph, true)
    }

    fn horizontal_variants(&self, glyph: ttf::GlyphId) -> Vec<ttf::GlyphId> {
        self.variants(glyph, false)
    }

    fn vertical_assembly(&self, glyph: ttf::GlyphId) -> Option<Vec<GlyphPart>> {
        let assembly = self
            .math()?
            .variants?
            .vertical_constructions
            .get(glyph)?
            .assembly?;
        let parts = assembly
            .parts
            .into_iter()
            .map(|p| GlyphPart {
                glyph: p.glyph_id,
                start_connector_length: self.units(p.start_connector_length),
                end_connector_length: self.units(p.end_connector_length),
                full_advance: self.units(p.full_advance),
                is_extender: p.part_flags.extender(),
            })
            .collect();
        Some(parts)
    }

    fn min_connector_overlap(&self) -> f32 {
        self.math()
            .and_then(|m| m.variants)
            .map_or(0.0, |v| self.units(v.min_connector_overlap))
    }

    fn glyph_bbox(&self, glyph: ttf::GlyphId) -> GlyphBox {
        match self.face.glyph_bounding_box(glyph) {
            Some(r) => GlyphBox {
                x_min: self.units(r.x_min),
                y_min: self.units(r.y_min),
                x_max: self.units(r.x_max),
                y_max: self.units(r.y_max),
            },
            None => GlyphBox::default(),
        }
    }

    fn glyph_advance(&self, glyph: ttf::GlyphId) -> f32 {
        self.face
            .glyph_hor_advance(glyph)
            .map_or(0.0, |adv| self.units(adv))
    }
}

struct Outliner<'a>(&'a mut geom::PathBuilder);

impl ttf::OutlineBuilder for Outliner<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}
