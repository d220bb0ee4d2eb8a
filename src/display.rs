/*!
 * The display tree produced by the typesetter.
 *
 * Each [`Display`] has a position relative to its parent, an ascent and a
 * descent around its baseline, and a width. Y grows upwards.
 *
 * Children of a [`MathListDisplay`] are positioned relative to the list.
 * Children of the other composite displays (fraction parts, radicand,
 * limits, accentee...) share the coordinate space of their parent display
 * and follow it when it moves. The decoration glyphs of radicals and
 * accents are relative to the display that owns them.
 */

use mathdisplay_base::color::{self, ColorU8};
use mathdisplay_base::geom::{Point, Rect};
use ttf_parser::GlyphId;

use crate::atom::{MathAtom, Range};
use crate::metrics::FontMathMetrics;

/// Position of a math list relatively to its parent list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinePosition {
    /// Regular line
    #[default]
    Regular,
    /// Subscript of the atom at `index`
    Subscript,
    /// Superscript of the atom at `index`
    Superscript,
}

/// A run of glyphs laid out with the font advances
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The text of the run
    pub text: String,
    /// The atoms making the run, after fusion
    pub atoms: Vec<MathAtom>,
    /// One glyph per code point of `text`
    pub glyphs: Vec<GlyphId>,
    /// Advance of each glyph
    pub advances: Vec<f32>,
    /// Size of the font of the run
    pub font_size: f32,
}

/// A single glyph, possibly shifted down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDisplay {
    /// The glyph
    pub glyph: GlyphId,
    /// Size of the font
    pub font_size: f32,
}

/// A glyph assembled from vertically stacked parts
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphConstruction {
    /// The parts, from bottom to top
    pub glyphs: Vec<GlyphId>,
    /// Vertical offset of each part
    pub offsets: Vec<f32>,
    /// Size of the font
    pub font_size: f32,
}

/// A horizontal list of displays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathListDisplay {
    /// Children, positioned relatively to the list
    pub children: Vec<Display>,
    /// Whether this is a regular line or a script
    pub line_position: LinePosition,
    /// For scripts, index of the atom carrying the script in the parent list
    pub index: Option<usize>,
}

/// A fraction
#[derive(Debug, Clone, PartialEq)]
pub struct FractionDisplay {
    /// Numerator line
    pub numerator: Box<Display>,
    /// Denominator line
    pub denominator: Box<Display>,
    /// Shift of the numerator baseline above the fraction baseline
    pub numerator_up: f32,
    /// Shift of the denominator baseline below the fraction baseline
    pub denominator_down: f32,
    /// Height of the rule center above the baseline
    pub line_position: f32,
    /// Rule thickness, zero for no rule
    pub line_thickness: f32,
}

/// A radical sign with its radicand and optional degree
#[derive(Debug, Clone, PartialEq)]
pub struct RadicalDisplay {
    /// The radicand line
    pub radicand: Box<Display>,
    /// The radical sign, relative to the radical origin shifted by `radical_shift`
    pub glyph: Box<Display>,
    /// The degree line
    pub degree: Option<Box<Display>>,
    /// Horizontal room taken by the degree before the sign
    pub radical_shift: f32,
    /// Space above the overbar
    pub top_kern: f32,
    /// Thickness of the overbar
    pub line_thickness: f32,
    degree_kern: f32,
    degree_raise: f32,
}

/// A large operator with limits above and below
#[derive(Debug, Clone, PartialEq)]
pub struct LargeOpLimitsDisplay {
    /// The operator
    pub nucleus: Box<Display>,
    /// Limit above the operator
    pub upper_limit: Option<Box<Display>>,
    /// Limit below the operator
    pub lower_limit: Option<Box<Display>>,
    /// Horizontal shift of the limits, half the italic correction
    pub limit_shift: f32,
    /// Gap between the operator and the upper limit
    pub upper_limit_gap: f32,
    /// Gap between the operator and the lower limit
    pub lower_limit_gap: f32,
    /// Extra space above the upper and below the lower limit
    pub extra_padding: f32,
}

/// A line with a bar over or under it
#[derive(Debug, Clone, PartialEq)]
pub struct BarDisplay {
    /// The content
    pub inner: Box<Display>,
    /// Height of the bar center above the baseline, negative under it
    pub line_shift_up: f32,
    /// Bar thickness
    pub line_thickness: f32,
}

/// An accent glyph over its accentee
#[derive(Debug, Clone, PartialEq)]
pub struct AccentDisplay {
    /// The accented line
    pub accentee: Box<Display>,
    /// The accent glyph, relative to the accent display
    pub accent: Box<Display>,
}

/// Type specific content of a display
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DisplayKind {
    Run(TextRun),
    Glyph(GlyphDisplay),
    GlyphConstruction(GlyphConstruction),
    List(MathListDisplay),
    Fraction(FractionDisplay),
    Radical(RadicalDisplay),
    LargeOpLimits(LargeOpLimitsDisplay),
    Bar(BarDisplay),
    Accent(AccentDisplay),
}

/// A node of the display tree
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    position: Point,
    /// Distance from the baseline to the top
    pub ascent: f32,
    /// Distance from the baseline to the bottom
    pub descent: f32,
    /// Horizontal extent
    pub width: f32,
    /// Range of the displayed atoms in the list before finalization
    pub range: Option<Range>,
    /// Whether scripts are attached after this display
    pub has_script: bool,
    shift_down: f32,
    text_color: ColorU8,
    local_text_color: Option<ColorU8>,
    /// Type specific content
    pub kind: DisplayKind,
}

impl Display {
    fn new(kind: DisplayKind, range: Option<Range>) -> Self {
        Display {
            position: Point::zero(),
            ascent: 0.0,
            descent: 0.0,
            width: 0.0,
            range,
            has_script: false,
            shift_down: 0.0,
            text_color: color::BLACK,
            local_text_color: None,
            kind,
        }
    }

    /// A run of the glyphs of `text`, measured with `font`
    pub fn text_run<M: FontMathMetrics>(
        text: &str,
        range: Range,
        atoms: Vec<MathAtom>,
        font: &M,
    ) -> Self {
        let glyphs = font.glyphs_for_str(text);
        let advances: Vec<f32> = glyphs.iter().map(|g| font.glyph_advance(*g)).collect();

        let mut ascent = 0f32;
        let mut descent = 0f32;
        for g in &glyphs {
            let bbox = font.glyph_bbox(*g);
            ascent = ascent.max(bbox.ascent());
            descent = descent.max(bbox.descent());
        }
        let width = advances.iter().sum();

        let run = TextRun {
            text: text.to_string(),
            atoms,
            glyphs,
            advances,
            font_size: font.font_size(),
        };
        let mut display = Display::new(DisplayKind::Run(run), Some(range));
        display.ascent = ascent;
        display.descent = descent;
        display.width = width;
        display
    }

    /// A single glyph of the given dimensions
    pub fn glyph(
        glyph: GlyphId,
        font_size: f32,
        range: Option<Range>,
        ascent: f32,
        descent: f32,
        width: f32,
    ) -> Self {
        let mut display = Display::new(
            DisplayKind::Glyph(GlyphDisplay { glyph, font_size }),
            range,
        );
        display.ascent = ascent;
        display.descent = descent;
        display.width = width;
        display
    }

    /// An assembled glyph, standing on its baseline
    pub fn glyph_construction(
        construction: GlyphConstruction,
        height: f32,
        width: f32,
    ) -> Self {
        debug_assert_eq!(construction.glyphs.len(), construction.offsets.len());
        let mut display = Display::new(DisplayKind::GlyphConstruction(construction), None);
        display.ascent = height;
        display.width = width;
        display
    }

    /// A list of displays, its dimensions enclose all the children
    pub fn math_list(children: Vec<Display>, range: Option<Range>) -> Self {
        let mut display = Display::new(
            DisplayKind::List(MathListDisplay {
                children,
                ..Default::default()
            }),
            range,
        );
        display.recompute_dimensions();
        display
    }

    /// A fraction. The numerator and denominator get centered.
    pub fn fraction(
        numerator: Display,
        denominator: Display,
        range: Range,
        numerator_up: f32,
        denominator_down: f32,
        line_position: f32,
        line_thickness: f32,
    ) -> Self {
        let ascent = numerator.ascent + numerator_up;
        let descent = denominator.descent + denominator_down;
        let width = numerator.width.max(denominator.width);
        let frac = FractionDisplay {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            numerator_up,
            denominator_down,
            line_position,
            line_thickness,
        };
        let mut display = Display::new(DisplayKind::Fraction(frac), Some(range));
        display.ascent = ascent;
        display.descent = descent;
        display.width = width;
        display.position_changed();
        display
    }

    /// A radical without degree.
    /// The caller sets ascent and descent, the width is that of sign and radicand.
    pub fn radical(
        radicand: Display,
        glyph: Display,
        range: Range,
        top_kern: f32,
        line_thickness: f32,
    ) -> Self {
        let width = glyph.width + radicand.width;
        let rad = RadicalDisplay {
            radicand: Box::new(radicand),
            glyph: Box::new(glyph),
            degree: None,
            radical_shift: 0.0,
            top_kern,
            line_thickness,
            degree_kern: 0.0,
            degree_raise: 0.0,
        };
        let mut display = Display::new(DisplayKind::Radical(rad), Some(range));
        display.width = width;
        display.position_changed();
        display
    }

    /// Set the degree of a radical display.
    ///
    /// The degree is placed `kern_before` after the radical origin, raised by
    /// `raise_percent` of the radical height, and the sign is shifted right to
    /// leave room for it. Does nothing on other displays.
    pub fn set_degree(
        &mut self,
        degree: Display,
        kern_before: f32,
        kern_after: f32,
        raise_percent: f32,
    ) {
        let raise = raise_percent * (self.ascent - self.descent);
        let DisplayKind::Radical(rad) = &mut self.kind else {
            return;
        };
        let mut kern_before = kern_before;
        let mut shift = kern_before + degree.width + kern_after;
        if shift < 0.0 {
            // the sign cannot move backwards
            kern_before -= shift;
            shift = 0.0;
        }
        rad.radical_shift = shift;
        rad.degree_kern = kern_before;
        rad.degree_raise = raise;
        self.width = shift + rad.glyph.width + rad.radicand.width;
        rad.degree = Some(Box::new(degree));
        self.position_changed();
    }

    /// A large operator with limits.
    /// Gaps are applied before the dimensions are computed.
    pub fn large_op_limits(
        nucleus: Display,
        upper_limit: Option<Display>,
        lower_limit: Option<Display>,
        limit_shift: f32,
        upper_limit_gap: f32,
        lower_limit_gap: f32,
        range: Range,
    ) -> Self {
        let extra_padding = 0.0;
        let mut width = nucleus.width;
        let mut ascent = nucleus.ascent;
        let mut descent = nucleus.descent;
        if let Some(ul) = &upper_limit {
            width = width.max(ul.width);
            ascent += extra_padding + ul.ascent + upper_limit_gap + ul.descent;
        }
        if let Some(ll) = &lower_limit {
            width = width.max(ll.width);
            descent += extra_padding + lower_limit_gap + ll.descent + ll.ascent;
        }
        let limits = LargeOpLimitsDisplay {
            nucleus: Box::new(nucleus),
            upper_limit: upper_limit.map(Box::new),
            lower_limit: lower_limit.map(Box::new),
            limit_shift,
            upper_limit_gap,
            lower_limit_gap,
            extra_padding,
        };
        let mut display = Display::new(DisplayKind::LargeOpLimits(limits), Some(range));
        display.ascent = ascent;
        display.descent = descent;
        display.width = width;
        display.position_changed();
        display
    }

    /// A line with a bar. The caller sets the dimensions.
    pub fn bar(inner: Display, range: Range, line_shift_up: f32, line_thickness: f32) -> Self {
        let bar = BarDisplay {
            inner: Box::new(inner),
            line_shift_up,
            line_thickness,
        };
        let mut display = Display::new(DisplayKind::Bar(bar), Some(range));
        display.position_changed();
        display
    }

    /// An accent over an accentee. The caller sets the dimensions.
    pub fn accent(accent: Display, accentee: Display, range: Range) -> Self {
        let acc = AccentDisplay {
            accentee: Box::new(accentee),
            accent: Box::new(accent),
        };
        let mut display = Display::new(DisplayKind::Accent(acc), Some(range));
        display.position_changed();
        display
    }

    /// Position of the display origin, on its baseline
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the display, and the children sharing its coordinate space
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.position_changed();
    }

    /// How much the drawing of a glyph is shifted down
    pub fn shift_down(&self) -> f32 {
        self.shift_down
    }

    /// Shift the drawing down, moving the ascent and descent along
    pub fn set_shift_down(&mut self, shift_down: f32) {
        let delta = shift_down - self.shift_down;
        self.ascent -= delta;
        self.descent += delta;
        self.shift_down = shift_down;
    }

    /// The color the display is drawn with
    pub fn text_color(&self) -> ColorU8 {
        self.text_color
    }

    /// Set the color of this display and all its children
    /// except those with a local color.
    pub fn set_text_color(&mut self, color: ColorU8) {
        self.text_color = color;
        self.color_changed();
    }

    /// The color set by a color command on this display
    pub fn local_text_color(&self) -> Option<ColorU8> {
        self.local_text_color
    }

    /// Override the color inherited from the parent
    pub fn set_local_text_color(&mut self, color: Option<ColorU8>) {
        self.local_text_color = color;
        if let Some(color) = color {
            self.set_text_color(color);
        }
    }

    /// The bounding box in the parent coordinates
    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(
            self.position.x,
            self.position.y - self.descent,
            self.width,
            self.ascent + self.descent,
        )
    }

    /// The list content if this is a math list display
    pub fn as_list(&self) -> Option<&MathListDisplay> {
        match &self.kind {
            DisplayKind::List(list) => Some(list),
            _ => None,
        }
    }

    /// Children of a math list display, empty for other displays
    pub fn children(&self) -> &[Display] {
        match &self.kind {
            DisplayKind::List(list) => &list.children,
            _ => &[],
        }
    }

    pub(crate) fn set_line_position(&mut self, line_position: LinePosition, index: usize) {
        if let DisplayKind::List(list) = &mut self.kind {
            list.line_position = line_position;
            list.index = Some(index);
        }
    }

    /// Recompute the extents of a math list display from its children
    pub fn recompute_dimensions(&mut self) {
        let DisplayKind::List(list) = &self.kind else {
            return;
        };
        let mut ascent = 0f32;
        let mut descent = 0f32;
        let mut width = 0f32;
        for child in &list.children {
            ascent = ascent.max(child.position.y + child.ascent);
            descent = descent.max(child.descent - child.position.y);
            width = width.max(child.position.x + child.width);
        }
        self.ascent = ascent;
        self.descent = descent;
        self.width = width;
    }

    fn position_changed(&mut self) {
        let Point { x, y } = self.position;
        let width = self.width;
        match &mut self.kind {
            DisplayKind::Fraction(frac) => {
                let num = &mut frac.numerator;
                num.set_position(Point::from_xy(
                    x + (width - num.width) / 2.0,
                    y + frac.numerator_up,
                ));
                let den = &mut frac.denominator;
                den.set_position(Point::from_xy(
                    x + (width - den.width) / 2.0,
                    y - frac.denominator_down,
                ));
            }
            DisplayKind::Radical(rad) => {
                rad.radicand.set_position(Point::from_xy(
                    x + rad.radical_shift + rad.glyph.width,
                    y,
                ));
                if let Some(degree) = &mut rad.degree {
                    degree.set_position(Point::from_xy(x + rad.degree_kern, y + rad.degree_raise));
                }
            }
            DisplayKind::LargeOpLimits(op) => {
                let nucleus = &op.nucleus;
                if let Some(ul) = &mut op.upper_limit {
                    let p = Point::from_xy(
                        x + op.limit_shift + (width - ul.width) / 2.0,
                        y + nucleus.ascent + op.upper_limit_gap + ul.descent,
                    );
                    ul.set_position(p);
                }
                if let Some(ll) = &mut op.lower_limit {
                    let p = Point::from_xy(
                        x - op.limit_shift + (width - ll.width) / 2.0,
                        y - nucleus.descent - op.lower_limit_gap - ll.ascent,
                    );
                    ll.set_position(p);
                }
                let nucleus = &mut op.nucleus;
                nucleus.set_position(Point::from_xy(x + (width - nucleus.width) / 2.0, y));
            }
            DisplayKind::Bar(bar) => bar.inner.set_position(Point::from_xy(x, y)),
            DisplayKind::Accent(acc) => acc.accentee.set_position(Point::from_xy(x, y)),
            DisplayKind::Run(_)
            | DisplayKind::Glyph(_)
            | DisplayKind::GlyphConstruction(_)
            | DisplayKind::List(_) => {}
        }
    }

    fn color_changed(&mut self) {
        let color = self.text_color;
        match &mut self.kind {
            DisplayKind::List(list) => {
                for child in &mut list.children {
                    let c = child.local_text_color.unwrap_or(color);
                    child.set_text_color(c);
                }
            }
            DisplayKind::Fraction(frac) => {
                frac.numerator.set_text_color(color);
                frac.denominator.set_text_color(color);
            }
            DisplayKind::Radical(rad) => {
                rad.radicand.set_text_color(color);
                rad.glyph.set_text_color(color);
                if let Some(degree) = &mut rad.degree {
                    degree.set_text_color(color);
                }
            }
            DisplayKind::LargeOpLimits(op) => {
                op.nucleus.set_text_color(color);
                for limit in [&mut op.upper_limit, &mut op.lower_limit].into_iter().flatten() {
                    limit.set_text_color(color);
                }
            }
            DisplayKind::Bar(bar) => bar.inner.set_text_color(color),
            DisplayKind::Accent(acc) => {
                acc.accentee.set_text_color(color);
                acc.accent.set_text_color(color);
            }
            DisplayKind::Run(_) | DisplayKind::Glyph(_) | DisplayKind::GlyphConstruction(_) => {}
        }
    }
}
