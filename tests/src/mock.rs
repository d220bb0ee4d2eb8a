//! A math font with simple round metrics.
//!
//! All values are given in points for a 20pt font and scale linearly with
//! the size. Every glyph stands 14pt above and 4pt below the baseline and
//! advances by 10pt. Stretchy glyphs have two larger variants, level `k`
//! being `k + 1` times as high and `2k` points wider. The parenthesis also
//! has a vertical assembly.

use mathdisplay::metrics::{FontMathMetrics, GlyphBox, GlyphPart, MathConstant};
use mathdisplay::GlyphId;

const REF_SIZE: f32 = 20.0;

const STRETCHY: &[char] = &[
    '(', ')', '[', ']', '{', '}', '|', '\u{2016}', '\u{221A}', '\u{2211}', '\u{222B}', '\u{0302}',
];

const VARIANT_BASE: u16 = 0x8000;
const MATH_ALPHA_BASE: u16 = 0x3000;

#[derive(Debug, Clone, Copy)]
pub struct MockFont {
    size: f32,
}

impl MockFont {
    pub fn new(size: f32) -> Self {
        MockFont { size }
    }

    fn pt(&self, value: f32) -> f32 {
        value * self.size / REF_SIZE
    }

    /// The stretchy base glyph and the level of a glyph
    fn decode(&self, glyph: GlyphId) -> (GlyphId, u16) {
        if glyph.0 >= VARIANT_BASE {
            let n = glyph.0 - VARIANT_BASE;
            let base = STRETCHY[(n / 4) as usize];
            (self.glyph_for_char(base), n % 4)
        } else {
            (glyph, 0)
        }
    }

    fn variant(&self, glyph: GlyphId, level: u16) -> Option<GlyphId> {
        if level == 0 {
            return Some(glyph);
        }
        let idx = STRETCHY
            .iter()
            .position(|c| self.glyph_for_char(*c) == glyph)?;
        Some(GlyphId(VARIANT_BASE + idx as u16 * 4 + level))
    }

    fn variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        (0..3).filter_map(|level| self.variant(glyph, level)).collect()
    }
}

impl FontMathMetrics for MockFont {
    fn font_size(&self) -> f32 {
        self.size
    }

    fn with_size(&self, size: f32) -> Self {
        MockFont { size }
    }

    fn constant(&self, constant: MathConstant) -> f32 {
        use MathConstant as C;
        let value = match constant {
            C::AxisHeight => 5.0,
            C::AccentBaseHeight => 9.0,
            C::SubscriptShiftDown => 3.0,
            C::SubscriptTopMax => 8.0,
            C::SubscriptBaselineDropMin => 1.0,
            C::SuperscriptShiftUp => 7.0,
            C::SuperscriptShiftUpCramped => 6.0,
            C::SuperscriptBottomMin => 2.0,
            C::SuperscriptBaselineDropMax => 5.0,
            C::SubSuperscriptGapMin => 4.0,
            C::SuperscriptBottomMaxWithSubscript => 8.0,
            C::SpaceAfterScript => 1.0,
            C::UpperLimitGapMin => 2.0,
            C::UpperLimitBaselineRiseMin => 3.0,
            C::LowerLimitGapMin => 2.0,
            C::LowerLimitBaselineDropMin => 12.0,
            C::StackTopShiftUp => 9.0,
            C::StackTopDisplayStyleShiftUp => 14.0,
            C::StackBottomShiftDown => 7.0,
            C::StackBottomDisplayStyleShiftDown => 14.0,
            C::StackGapMin => 3.0,
            C::StackDisplayStyleGapMin => 7.0,
            C::FractionNumeratorShiftUp => 8.0,
            C::FractionNumeratorDisplayStyleShiftUp => 14.0,
            C::FractionDenominatorShiftDown => 7.0,
            C::FractionDenominatorDisplayStyleShiftDown => 14.0,
            C::FractionNumeratorGapMin => 1.0,
            C::FractionNumeratorDisplayStyleGapMin => 3.0,
            C::FractionRuleThickness => 1.0,
            C::FractionDenominatorGapMin => 1.0,
            C::FractionDenominatorDisplayStyleGapMin => 3.0,
            C::OverbarVerticalGap => 3.0,
            C::OverbarRuleThickness => 1.0,
            C::OverbarExtraAscender => 1.0,
            C::UnderbarVerticalGap => 3.0,
            C::UnderbarRuleThickness => 1.0,
            C::UnderbarExtraDescender => 1.0,
            C::RadicalVerticalGap => 1.0,
            C::RadicalDisplayStyleVerticalGap => 3.0,
            C::RadicalRuleThickness => 1.0,
            C::RadicalExtraAscender => 1.0,
            C::RadicalKernBeforeDegree => 5.0,
            C::RadicalKernAfterDegree => -10.0,
            _ => 0.0,
        };
        self.pt(value)
    }

    fn script_scale_down(&self) -> f32 {
        0.5
    }

    fn script_script_scale_down(&self) -> f32 {
        0.25
    }

    fn radical_degree_bottom_raise_percent(&self) -> f32 {
        0.6
    }

    fn glyph_for_char(&self, ch: char) -> GlyphId {
        let cp = ch as u32;
        match cp {
            1..0x3000 => GlyphId(cp as u16),
            0x1D400..=0x1D7FF => GlyphId(MATH_ALPHA_BASE + (cp - 0x1D400) as u16),
            _ => GlyphId(0),
        }
    }

    fn glyph_name(&self, glyph: GlyphId) -> Option<String> {
        let (base, level) = self.decode(glyph);
        if level == 0 {
            Some(format!("g{}", base.0))
        } else {
            Some(format!("g{}.v{}", base.0, level))
        }
    }

    fn glyph_by_name(&self, name: &str) -> Option<GlyphId> {
        let name = name.strip_prefix('g')?;
        match name.split_once(".v") {
            Some((base, level)) => self.variant(GlyphId(base.parse().ok()?), level.parse().ok()?),
            None => Some(GlyphId(name.parse().ok()?)),
        }
    }

    fn italic_correction(&self, glyph: GlyphId) -> f32 {
        // math italic latin letters
        if (MATH_ALPHA_BASE + 0x34..=MATH_ALPHA_BASE + 0x67).contains(&glyph.0) {
            self.pt(1.0)
        } else {
            0.0
        }
    }

    fn top_accent_attachment(&self, _glyph: GlyphId) -> Option<f32> {
        None
    }

    fn vertical_variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        self.variants(glyph)
    }

    fn horizontal_variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        self.variants(glyph)
    }

    fn vertical_assembly(&self, glyph: GlyphId) -> Option<Vec<GlyphPart>> {
        if glyph != self.glyph_for_char('(') {
            return None;
        }
        let part = |glyph, is_extender| GlyphPart {
            glyph,
            start_connector_length: self.pt(2.0),
            end_connector_length: self.pt(2.0),
            full_advance: self.pt(10.0),
            is_extender,
        };
        Some(vec![
            part(GlyphId(0x23DD), false),
            part(GlyphId(0x239C), true),
            part(GlyphId(0x239B), false),
        ])
    }

    fn min_connector_overlap(&self) -> f32 {
        self.pt(1.0)
    }

    fn glyph_bbox(&self, glyph: GlyphId) -> GlyphBox {
        if glyph.0 == 0 || glyph.0 == ' ' as u16 {
            return GlyphBox::default();
        }
        let (_, level) = self.decode(glyph);
        let factor = (level + 1) as f32;
        GlyphBox {
            x_min: 0.0,
            y_min: -self.pt(4.0) * factor,
            x_max: self.glyph_advance(glyph),
            y_max: self.pt(14.0) * factor,
        }
    }

    fn glyph_advance(&self, glyph: GlyphId) -> f32 {
        let (_, level) = self.decode(glyph);
        self.pt(10.0 + 2.0 * level as f32)
    }
}

#[test]
fn variant_names_round_trip() {
    let font = MockFont::new(20.0);
    let sum = font.glyph_for_char('\u{2211}');
    let larger = font.larger_glyph(sum);
    assert_ne!(larger, sum);
    assert_eq!(font.glyph_name(larger).as_deref(), Some("g8721.v1"));
    assert_eq!(font.glyph_bbox(larger).ascent(), 28.0);
    assert_eq!(font.larger_glyph(font.glyph_for_char('a')), font.glyph_for_char('a'));
}
