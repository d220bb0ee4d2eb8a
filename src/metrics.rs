//! Font metrics needed by the typesetter.
//!
//! The typesetter does not read fonts by itself. Everything it needs is
//! queried through [`FontMathMetrics`], which is usually backed by the
//! OpenType `MATH` table of a font (see the `mathdisplay-font` crate).
//! All lengths are in points at the provider's font size, y pointing up.

use ttf_parser::GlyphId;

/// Length constants of the OpenType `MATH` table.
///
/// The percentage constants are exposed by dedicated methods of
/// [`FontMathMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MathConstant {
    DelimitedSubFormulaMinHeight,
    DisplayOperatorMinHeight,
    MathLeading,
    AxisHeight,
    AccentBaseHeight,
    FlattenedAccentBaseHeight,
    SubscriptShiftDown,
    SubscriptTopMax,
    SubscriptBaselineDropMin,
    SuperscriptShiftUp,
    SuperscriptShiftUpCramped,
    SuperscriptBottomMin,
    SuperscriptBaselineDropMax,
    SubSuperscriptGapMin,
    SuperscriptBottomMaxWithSubscript,
    SpaceAfterScript,
    UpperLimitGapMin,
    UpperLimitBaselineRiseMin,
    LowerLimitGapMin,
    LowerLimitBaselineDropMin,
    StackTopShiftUp,
    StackTopDisplayStyleShiftUp,
    StackBottomShiftDown,
    StackBottomDisplayStyleShiftDown,
    StackGapMin,
    StackDisplayStyleGapMin,
    StretchStackTopShiftUp,
    StretchStackBottomShiftDown,
    StretchStackGapAboveMin,
    StretchStackGapBelowMin,
    FractionNumeratorShiftUp,
    FractionNumeratorDisplayStyleShiftUp,
    FractionDenominatorShiftDown,
    FractionDenominatorDisplayStyleShiftDown,
    FractionNumeratorGapMin,
    FractionNumeratorDisplayStyleGapMin,
    FractionRuleThickness,
    FractionDenominatorGapMin,
    FractionDenominatorDisplayStyleGapMin,
    SkewedFractionHorizontalGap,
    SkewedFractionVerticalGap,
    OverbarVerticalGap,
    OverbarRuleThickness,
    OverbarExtraAscender,
    UnderbarVerticalGap,
    UnderbarRuleThickness,
    UnderbarExtraDescender,
    RadicalVerticalGap,
    RadicalDisplayStyleVerticalGap,
    RadicalRuleThickness,
    RadicalExtraAscender,
    RadicalKernBeforeDegree,
    RadicalKernAfterDegree,
}

/// One part of a vertical glyph assembly, from bottom to top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPart {
    /// The glyph of this part
    pub glyph: GlyphId,
    /// Length of the connector at the start (bottom) of the part
    pub start_connector_length: f32,
    /// Length of the connector at the end (top) of the part
    pub end_connector_length: f32,
    /// Full advance of the part in the direction of the assembly
    pub full_advance: f32,
    /// Whether the part can be repeated
    pub is_extender: bool,
}

/// Bounding box of a glyph, relative to its origin on the baseline
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphBox {
    /// Left
    pub x_min: f32,
    /// Bottom
    pub y_min: f32,
    /// Right
    pub x_max: f32,
    /// Top
    pub y_max: f32,
}

impl GlyphBox {
    /// Height above the baseline, never negative
    pub fn ascent(&self) -> f32 {
        self.y_max.max(self.y_min).max(0.0)
    }

    /// Depth below the baseline, never negative
    pub fn descent(&self) -> f32 {
        (-self.y_max.min(self.y_min)).max(0.0)
    }
}

/// Metrics of a math font at a given size.
///
/// Implementations are read-only: a provider may be shared by any number
/// of layouts.
pub trait FontMathMetrics {
    /// Size of the font in points
    fn font_size(&self) -> f32;

    /// The same font at another size
    fn with_size(&self, size: f32) -> Self
    where
        Self: Sized;

    /// A length constant of the font
    fn constant(&self, constant: MathConstant) -> f32;

    /// Scale of the first level scripts, e.g. `0.7`
    fn script_scale_down(&self) -> f32;

    /// Scale of the second level scripts, e.g. `0.5`
    fn script_script_scale_down(&self) -> f32;

    /// Height of the bottom of a radical degree, as a ratio of the radical height
    fn radical_degree_bottom_raise_percent(&self) -> f32;

    /// The glyph of a code point. `GlyphId(0)` if the font has none.
    fn glyph_for_char(&self, ch: char) -> GlyphId;

    /// The name of a glyph
    fn glyph_name(&self, glyph: GlyphId) -> Option<String>;

    /// The glyph of a name
    fn glyph_by_name(&self, name: &str) -> Option<GlyphId>;

    /// Italic correction of a glyph, `0.0` if it has none
    fn italic_correction(&self, glyph: GlyphId) -> f32;

    /// Top accent attachment of a glyph, if the font defines one
    fn top_accent_attachment(&self, glyph: GlyphId) -> Option<f32>;

    /// Vertical variants of a glyph, from the smallest.
    /// Never empty: a glyph without variants is its own only variant.
    fn vertical_variants(&self, glyph: GlyphId) -> Vec<GlyphId>;

    /// Horizontal variants of a glyph, from the smallest.
    /// Never empty: a glyph without variants is its own only variant.
    fn horizontal_variants(&self, glyph: GlyphId) -> Vec<GlyphId>;

    /// Vertical assembly of a glyph, from bottom to top
    fn vertical_assembly(&self, glyph: GlyphId) -> Option<Vec<GlyphPart>>;

    /// Minimum overlap of connecting parts of an assembly
    fn min_connector_overlap(&self) -> f32;

    /// Bounding box of a glyph, a null box for empty glyphs
    fn glyph_bbox(&self, glyph: GlyphId) -> GlyphBox;

    /// Horizontal advance of a glyph
    fn glyph_advance(&self, glyph: GlyphId) -> f32;

    /// One mu, 1/18 of an em
    fn mu_unit(&self) -> f32 {
        self.font_size() / 18.0
    }

    /// Horizontal position where accents attach on a glyph.
    /// Defaults to the middle of the advance.
    fn top_accent_adjustment(&self, glyph: GlyphId) -> f32 {
        self.top_accent_attachment(glyph)
            .unwrap_or_else(|| self.glyph_advance(glyph) / 2.0)
    }

    /// The first vertical variant with a name different of `glyph`,
    /// `glyph` itself if there is none.
    fn larger_glyph(&self, glyph: GlyphId) -> GlyphId {
        let name = self.glyph_name(glyph);
        for variant in self.vertical_variants(glyph) {
            let variant_name = self.glyph_name(variant);
            if variant_name != name {
                return variant_name
                    .and_then(|n| self.glyph_by_name(&n))
                    .unwrap_or(variant);
            }
        }
        glyph
    }

    /// Glyphs of every code point of `s`
    fn glyphs_for_str(&self, s: &str) -> Vec<GlyphId> {
        s.chars()
            .map(|ch| {
                let gid = self.glyph_for_char(ch);
                if gid.0 == 0 {
                    log::warn!("code point U+{:04X} mapped to missing glyph", ch as u32);
                }
                gid
            })
            .collect()
    }
}
