/*!
 * TeX style layout of math lists.
 *
 * The layout follows appendix G of the TeXbook, with the font parameters
 * read from an OpenType `MATH` table through [`FontMathMetrics`].
 *
 * ```ignore
 * let list = mathdisplay::parse("x^2 + \\frac{1}{2}")?;
 * let display = mathdisplay::typeset::layout(&list, &font, LineStyle::Display);
 * ```
 */

use mathdisplay_base::color::ColorU8;
use mathdisplay_base::geom::Point;
use ttf_parser::GlyphId;

use crate::atom::{
    AtomKind, AtomType, ColumnAlignment, Fraction, Inner, LineStyle, MathAtom, MathList, Range,
    Scripts, Table,
};
use crate::charset;
use crate::display::{Display, GlyphConstruction, LinePosition};
use crate::finalize::finalize;
use crate::metrics::{FontMathMetrics, GlyphPart, MathConstant as C};
use crate::preprocess::preprocess;
use crate::spacing;

// delimiter shortfall from plain.tex
const DELIMITER_FACTOR: f32 = 901.0;
const DELIMITER_SHORTFALL_POINTS: f32 = 5.0;

// for a 10pt font: 12pt baseline skip, 1pt line skip, 3pt jot
const BASELINE_SKIP_MULTIPLIER: f32 = 1.2;
const LINE_SKIP_MULTIPLIER: f32 = 0.1;
const LINE_SKIP_LIMIT_MULTIPLIER: f32 = 0.0;
const JOT_MULTIPLIER: f32 = 0.3;

const RADICAL_SIGN: char = '\u{221A}';

/// Finalize `list` and lay it out on a single line, uncramped and without
/// edge spacing.
///
/// [`Typesetter::create_line`] is the full form, taking a finalized list with
/// the `cramped` and `spaced` flags.
pub fn layout<M: FontMathMetrics>(list: &MathList, font: &M, style: LineStyle) -> Display {
    Typesetter::create_line(&finalize(list), font, style, false, false)
}

/// Size of the font used in `style`
fn style_size<M: FontMathMetrics>(font: &M, style: LineStyle) -> f32 {
    let size = font.font_size();
    match style {
        LineStyle::Display | LineStyle::Text => size,
        LineStyle::Script => size * font.script_scale_down(),
        LineStyle::ScriptScript => size * font.script_script_scale_down(),
    }
}

/// Plain atoms waiting to be laid out as a text run
#[derive(Debug, Default)]
struct PendingLine {
    text: String,
    range: Option<Range>,
    atoms: Vec<MathAtom>,
}

/// A glyph with its measures
#[derive(Debug, Clone, Copy)]
struct SizedGlyph {
    glyph: GlyphId,
    ascent: f32,
    descent: f32,
    width: f32,
}

/// Lays out one math list.
///
/// Nested lists (scripts, fraction parts, cells...) are laid out by
/// typesetters of their own.
#[derive(Debug)]
pub struct Typesetter<'a, M> {
    font: &'a M,
    style_font: M,
    style: LineStyle,
    cramped: bool,
    spaced: bool,
    displays: Vec<Display>,
    position: Point,
    line: PendingLine,
}

impl<'a, M: FontMathMetrics> Typesetter<'a, M> {
    fn new(font: &'a M, style: LineStyle, cramped: bool, spaced: bool) -> Self {
        Typesetter {
            font,
            style_font: font.with_size(style_size(font, style)),
            style,
            cramped,
            spaced,
            displays: Vec::new(),
            position: Point::zero(),
            line: PendingLine::default(),
        }
    }

    /// Lay out an already finalized list on a single line.
    ///
    /// `cramped` selects the cramped variant of `style`. When `spaced` is
    /// set, the list gets the space an open delimiter would leave before its
    /// first atom and a close delimiter after its last one.
    ///
    /// # Panics
    /// If the list was not finalized (it contains numbers, variables or
    /// unary operators), or if it contains a boundary atom.
    pub fn create_line(
        list: &MathList,
        font: &'a M,
        style: LineStyle,
        cramped: bool,
        spaced: bool,
    ) -> Display {
        let atoms = preprocess(list);
        let mut typesetter = Typesetter::new(font, style, cramped, spaced);
        typesetter.create_displays(atoms);
        let max_range = list.last().map_or(0, |a| a.index_range.max_range());
        Display::math_list(typesetter.displays, Some(Range::new(0, max_range)))
    }

    fn line(&self, list: &MathList, style: LineStyle, cramped: bool) -> Display {
        Typesetter::create_line(list, self.font, style, cramped, false)
    }

    fn set_style(&mut self, style: LineStyle) {
        self.style = style;
        self.style_font = self.font.with_size(style_size(self.font, style));
    }

    fn constant(&self, constant: C) -> f32 {
        self.style_font.constant(constant)
    }

    fn is_display_style(&self) -> bool {
        self.style == LineStyle::Display
    }

    fn create_displays(&mut self, atoms: Vec<MathAtom>) {
        let mut prev: Option<AtomType> = None;
        let mut last_type: Option<AtomType> = None;

        for atom in atoms {
            let range = atom.index_range;
            let ty = match &atom.kind {
                AtomKind::Number(_) | AtomKind::Variable(_) | AtomKind::UnaryOperator(_) => {
                    panic!("These types should never show here as they are removed by preprocessing")
                }
                AtomKind::Boundary => panic!("A boundary atom should never be inside a mathlist."),
                AtomKind::Space(space) => {
                    self.flush_line();
                    // extra space, the inter element space with the previous atom still applies
                    self.position.x += space * self.style_font.mu_unit();
                    continue;
                }
                AtomKind::Style(style) => {
                    self.flush_line();
                    self.set_style(*style);
                    continue;
                }
                AtomKind::Color(color) | AtomKind::TextColor(color) => {
                    self.flush_line();
                    let mut display = self.line(&color.inner, self.style, false);
                    match color.color.parse::<ColorU8>() {
                        Ok(c) => display.set_local_text_color(Some(c)),
                        Err(err) => log::warn!("ignoring color {:?}: {}", color.color, err),
                    }
                    display.set_position(self.position);
                    self.position.x += display.width;
                    self.displays.push(display);
                    atom.atom_type()
                }
                AtomKind::Radical(rad, scripts) => {
                    self.flush_line();
                    // radicals are ordinary in rule 16
                    self.add_inter_element_space(prev, AtomType::Ordinary);
                    let mut display = self.make_radical(&rad.radicand, range);
                    if let Some(degree) = &rad.degree {
                        let degree = self.line(degree, LineStyle::ScriptScript, false);
                        display.set_degree(
                            degree,
                            self.constant(C::RadicalKernBeforeDegree),
                            self.constant(C::RadicalKernAfterDegree),
                            self.style_font.radical_degree_bottom_raise_percent(),
                        );
                    }
                    self.position.x += display.width;
                    self.push_with_scripts(display, scripts, range.location, 0.0);
                    AtomType::Radical
                }
                AtomKind::Fraction(frac, scripts) => {
                    self.flush_line();
                    self.add_inter_element_space(prev, AtomType::Fraction);
                    let display = self.make_fraction(frac, range);
                    self.position.x += display.width;
                    self.push_with_scripts(display, scripts, range.location, 0.0);
                    AtomType::Fraction
                }
                AtomKind::LargeOperator { limits, scripts } => {
                    self.flush_line();
                    self.add_inter_element_space(prev, AtomType::LargeOperator);
                    self.make_large_op(&atom, *limits, scripts);
                    AtomType::LargeOperator
                }
                AtomKind::Inner(inner, scripts) => {
                    self.flush_line();
                    self.add_inter_element_space(prev, AtomType::Inner);
                    let mut display = if inner.has_boundaries() {
                        self.make_left_right(inner, range)
                    } else {
                        self.line(&inner.inner, self.style, self.cramped)
                    };
                    display.set_position(self.position);
                    self.position.x += display.width;
                    self.push_with_scripts(display, scripts, range.location, 0.0);
                    AtomType::Inner
                }
                AtomKind::Underline(list, scripts) => {
                    self.flush_line();
                    self.add_inter_element_space(prev, AtomType::Ordinary);
                    let display = self.make_underline(list, range);
                    self.position.x += display.width;
                    self.push_with_scripts(display, scripts, range.location, 0.0);
                    AtomType::Ordinary
                }
                AtomKind::Overline(list, scripts) => {
                    self.flush_line();
                    self.add_inter_element_space(prev, AtomType::Ordinary);
                    let display = self.make_overline(list, range);
                    self.position.x += display.width;
                    self.push_with_scripts(display, scripts, range.location, 0.0);
                    AtomType::Ordinary
                }
                AtomKind::Accent(list, scripts) => {
                    self.flush_line();
                    self.add_inter_element_space(prev, AtomType::Ordinary);
                    let (mut display, promoted) = self.make_accent(&atom.nucleus, list, scripts, range);
                    display.set_position(self.position);
                    self.position.x += display.width;
                    if promoted {
                        self.displays.push(display);
                    } else {
                        self.push_with_scripts(display, scripts, range.location, 0.0);
                    }
                    AtomType::Ordinary
                }
                AtomKind::Table(table) => {
                    self.flush_line();
                    // tables are spaced as inner lists and have no scripts
                    self.add_inter_element_space(prev, AtomType::Inner);
                    let display = self.make_table(table, range);
                    self.position.x += display.width;
                    self.displays.push(display);
                    AtomType::Inner
                }
                AtomKind::Ordinary(scripts)
                | AtomKind::BinaryOperator(scripts)
                | AtomKind::Relation(scripts)
                | AtomKind::Open(scripts)
                | AtomKind::Close(scripts)
                | AtomKind::Placeholder(scripts)
                | AtomKind::Punctuation(scripts) => {
                    self.flush_line();
                    let ty = binary_as_ordinary(prev, atom.atom_type());
                    if let Some(prev) = prev {
                        self.position.x += self.inter_element_space(prev, ty);
                    }
                    self.line.text.push_str(&atom.nucleus);
                    self.line.range = Some(match self.line.range {
                        Some(r) => Range::new(r.location, r.length + range.length),
                        None => range,
                    });
                    if atom.fused_atoms.is_empty() {
                        self.line.atoms.push(atom.clone());
                    } else {
                        self.line.atoms.extend(atom.fused_atoms.iter().cloned());
                    }

                    if !scripts.is_empty() {
                        // empty lines are allowed here, they carry the scripts
                        let index = self.add_display_line();
                        let mut delta = 0.0;
                        if let Some(ch) = atom.nucleus.chars().last() {
                            let glyph = self.style_font.glyph_for_char(ch);
                            delta = self.style_font.italic_correction(glyph);
                        }
                        if delta > 0.0 && scripts.subscript.is_none() {
                            self.position.x += delta;
                        }
                        let line = &mut self.displays[index];
                        line.has_script = true;
                        let (ascent, descent) = (line.ascent, line.descent);
                        let script_index = range.max_range().saturating_sub(1);
                        self.make_scripts(scripts, ascent, descent, script_index, delta);
                    }
                    ty
                }
            };
            prev = Some(ty);
            last_type = Some(ty);
        }

        self.flush_line();
        if self.spaced {
            if let Some(last) = last_type {
                let space = self.inter_element_space(last, AtomType::Close);
                if let Some(display) = self.displays.last_mut() {
                    display.width += space;
                }
            }
        }
    }

    fn flush_line(&mut self) {
        if !self.line.text.is_empty() {
            self.add_display_line();
        }
    }

    /// Lay out the pending line and return its index in the displays
    fn add_display_line(&mut self) -> usize {
        let line = std::mem::take(&mut self.line);
        let range = line.range.unwrap_or_default();
        let mut display = Display::text_run(&line.text, range, line.atoms, &self.style_font);
        display.set_position(self.position);
        self.position.x += display.width;
        self.displays.push(display);
        self.displays.len() - 1
    }

    fn push_with_scripts(&mut self, mut display: Display, scripts: &Scripts, index: usize, delta: f32) {
        let (ascent, descent) = (display.ascent, display.descent);
        display.has_script = !scripts.is_empty();
        self.displays.push(display);
        if !scripts.is_empty() {
            self.make_scripts(scripts, ascent, descent, index, delta);
        }
    }

    // Spacing

    fn inter_element_space(&self, left: AtomType, right: AtomType) -> f32 {
        // a binary operator before a relation, a punctuation or a closing
        // delimiter is ordinary (rule 6)
        let left = match (left, right) {
            (
                AtomType::BinaryOperator,
                AtomType::Relation | AtomType::Punctuation | AtomType::Close,
            ) => AtomType::Ordinary,
            _ => left,
        };
        let mu = spacing::inter_element_space(left, right, self.style);
        mu as f32 * self.style_font.mu_unit()
    }

    fn add_inter_element_space(&mut self, prev: Option<AtomType>, current: AtomType) {
        let space = match prev {
            Some(prev) => self.inter_element_space(prev, current),
            // first atom of a spaced list, as if preceded by an open
            None if self.spaced => self.inter_element_space(AtomType::Open, current),
            None => 0.0,
        };
        self.position.x += space;
    }

    // Scripts

    fn superscript_shift_up(&self) -> f32 {
        if self.cramped {
            self.constant(C::SuperscriptShiftUpCramped)
        } else {
            self.constant(C::SuperscriptShiftUp)
        }
    }

    /// Lay out the scripts of the display ending at the current position.
    /// `index` is the index of the atom carrying the scripts, `delta` the
    /// italic correction of the base.
    fn make_scripts(
        &mut self,
        scripts: &Scripts,
        base_ascent: f32,
        base_descent: f32,
        index: usize,
        delta: f32,
    ) {
        let script_style = self.style.script_style();
        let script_font = self.font.with_size(style_size(self.font, script_style));

        let mut super_shift_up = base_ascent - script_font.constant(C::SuperscriptBaselineDropMax);
        let mut sub_shift_down = base_descent + script_font.constant(C::SubscriptBaselineDropMin);
        let space_after = self.constant(C::SpaceAfterScript);
        let Point { x, y } = self.position;

        let Some(sup_list) = &scripts.superscript else {
            let Some(sub_list) = &scripts.subscript else {
                return;
            };
            // subscripts are always cramped
            let mut subscript = self.line(sub_list, script_style, true);
            subscript.set_line_position(LinePosition::Subscript, index);
            sub_shift_down = sub_shift_down
                .max(self.constant(C::SubscriptShiftDown))
                .max(subscript.ascent - self.constant(C::SubscriptTopMax));
            subscript.set_position(Point::from_xy(x, y - sub_shift_down));
            self.position.x += subscript.width + space_after;
            self.displays.push(subscript);
            return;
        };

        let mut superscript = self.line(sup_list, script_style, self.cramped);
        superscript.set_line_position(LinePosition::Superscript, index);
        super_shift_up = super_shift_up
            .max(self.superscript_shift_up())
            .max(superscript.descent + self.constant(C::SuperscriptBottomMin));

        let Some(sub_list) = &scripts.subscript else {
            superscript.set_position(Point::from_xy(x, y + super_shift_up));
            self.position.x += superscript.width + space_after;
            self.displays.push(superscript);
            return;
        };

        let mut subscript = self.line(sub_list, script_style, true);
        subscript.set_line_position(LinePosition::Subscript, index);
        sub_shift_down = sub_shift_down.max(self.constant(C::SubscriptShiftDown));

        let gap = (super_shift_up - superscript.descent) + (sub_shift_down - subscript.ascent);
        let gap_min = self.constant(C::SubSuperscriptGapMin);
        if gap < gap_min {
            sub_shift_down += gap_min - gap;
            let bottom_max = self.constant(C::SuperscriptBottomMaxWithSubscript);
            let bottom_delta = bottom_max - (super_shift_up - superscript.descent);
            if bottom_delta > 0.0 {
                // superscript bottom may still go up
                super_shift_up += bottom_delta;
                sub_shift_down -= bottom_delta;
            }
        }

        superscript.set_position(Point::from_xy(x + delta, y + super_shift_up));
        subscript.set_position(Point::from_xy(x, y - sub_shift_down));
        self.position.x += (superscript.width + delta).max(subscript.width) + space_after;
        self.displays.push(superscript);
        self.displays.push(subscript);
    }

    // Fractions

    fn numerator_shift_up(&self, has_rule: bool) -> f32 {
        self.constant(match (has_rule, self.is_display_style()) {
            (true, true) => C::FractionNumeratorDisplayStyleShiftUp,
            (true, false) => C::FractionNumeratorShiftUp,
            (false, true) => C::StackTopDisplayStyleShiftUp,
            (false, false) => C::StackTopShiftUp,
        })
    }

    fn denominator_shift_down(&self, has_rule: bool) -> f32 {
        self.constant(match (has_rule, self.is_display_style()) {
            (true, true) => C::FractionDenominatorDisplayStyleShiftDown,
            (true, false) => C::FractionDenominatorShiftDown,
            (false, true) => C::StackBottomDisplayStyleShiftDown,
            (false, false) => C::StackBottomShiftDown,
        })
    }

    fn numerator_gap_min(&self) -> f32 {
        if self.is_display_style() {
            self.constant(C::FractionNumeratorDisplayStyleGapMin)
        } else {
            self.constant(C::FractionNumeratorGapMin)
        }
    }

    fn denominator_gap_min(&self) -> f32 {
        if self.is_display_style() {
            self.constant(C::FractionDenominatorDisplayStyleGapMin)
        } else {
            self.constant(C::FractionDenominatorGapMin)
        }
    }

    fn stack_gap_min(&self) -> f32 {
        if self.is_display_style() {
            self.constant(C::StackDisplayStyleGapMin)
        } else {
            self.constant(C::StackGapMin)
        }
    }

    /// Height of `\choose` like delimiters.
    /// Fonts have no constant for it, the values are those of LuaTeX.
    fn fraction_delimiter_height(&self) -> f32 {
        let size = self.style_font.font_size();
        if self.is_display_style() {
            2.39 * size
        } else {
            1.01 * size
        }
    }

    fn make_fraction(&self, frac: &Fraction, range: Range) -> Display {
        let style = self.style.fraction_style();
        let numerator = self.line(&frac.numerator, style, false);
        let denominator = self.line(&frac.denominator, style, true);

        let mut up = self.numerator_shift_up(frac.has_rule);
        let mut down = self.denominator_shift_down(frac.has_rule);
        let bar_location = self.constant(C::AxisHeight);
        let bar_thickness = if frac.has_rule {
            self.constant(C::FractionRuleThickness)
        } else {
            0.0
        };

        if frac.has_rule {
            // from the numerator bottom to the bar top
            let num_to_bar = (up - numerator.descent) - (bar_location + bar_thickness / 2.0);
            let min_num_gap = self.numerator_gap_min();
            if num_to_bar < min_num_gap {
                up += min_num_gap - num_to_bar;
            }
            // from the bar bottom to the denominator top
            let bar_to_den = (bar_location - bar_thickness / 2.0) - (denominator.ascent - down);
            let min_den_gap = self.denominator_gap_min();
            if bar_to_den < min_den_gap {
                down += min_den_gap - bar_to_den;
            }
        } else {
            let clearance = (up - numerator.descent) - (denominator.ascent - down);
            let min_gap = self.stack_gap_min();
            if clearance < min_gap {
                up += (min_gap - clearance) / 2.0;
                down += (min_gap - clearance) / 2.0;
            }
        }

        let mut display = Display::fraction(
            numerator,
            denominator,
            range,
            up,
            down,
            bar_location,
            bar_thickness,
        );
        if frac.left_delim.is_none() && frac.right_delim.is_none() {
            display.set_position(self.position);
            return display;
        }
        self.add_fraction_delimiters(display, frac, range)
    }

    fn add_fraction_delimiters(&self, display: Display, frac: &Fraction, range: Range) -> Display {
        let height = self.fraction_delimiter_height();
        let mut children = Vec::with_capacity(3);
        let mut x = 0.0;

        if let Some(delim) = frac.left_delim.as_deref().filter(|d| !d.is_empty()) {
            let mut glyph = self.find_glyph_for_boundary(delim, height);
            glyph.set_position(Point::from_xy(x, 0.0));
            x += glyph.width;
            children.push(glyph);
        }

        let mut display = display;
        display.set_position(Point::from_xy(x, 0.0));
        x += display.width;
        children.push(display);

        if let Some(delim) = frac.right_delim.as_deref().filter(|d| !d.is_empty()) {
            let mut glyph = self.find_glyph_for_boundary(delim, height);
            glyph.set_position(Point::from_xy(x, 0.0));
            children.push(glyph);
        }

        let mut inner = Display::math_list(children, Some(range));
        inner.set_position(self.position);
        inner
    }

    // Radicals

    fn radical_vertical_gap(&self) -> f32 {
        if self.is_display_style() {
            self.constant(C::RadicalDisplayStyleVerticalGap)
        } else {
            self.constant(C::RadicalVerticalGap)
        }
    }

    fn make_radical(&self, radicand: &MathList, range: Range) -> Display {
        let inner = self.line(radicand, self.style, true);
        let mut clearance = self.radical_vertical_gap();
        let thickness = self.constant(C::RadicalRuleThickness);
        let height = inner.ascent + inner.descent + clearance + thickness;

        let sign = self.style_font.glyph_for_char(RADICAL_SIGN);
        let mut glyph = self.stretchy_glyph(sign, height);

        // TeX assumes the glyph ascent is the rule thickness, OpenType does not
        let delta = (glyph.ascent + glyph.descent) - height;
        if delta > 0.0 {
            // center the radicand in the sign
            clearance += delta / 2.0;
        }

        // raise the sign so that its top is at the rule
        let radical_ascent = thickness + clearance + inner.ascent;
        let shift_up = radical_ascent - glyph.ascent;
        glyph.set_shift_down(-shift_up);

        let glyph_height = glyph.ascent + glyph.descent;
        let inner_descent = inner.descent;
        let extra_ascender = self.constant(C::RadicalExtraAscender);
        let mut display = Display::radical(inner, glyph, range, extra_ascender, thickness);
        display.ascent = radical_ascent + extra_ascender;
        // an unassembled sign may be shorter than the radicand
        display.descent = (glyph_height - radical_ascent).max(inner_descent);
        display.set_position(self.position);
        display
    }

    // Glyphs

    fn sized_glyph(&self, glyph: GlyphId) -> SizedGlyph {
        let bbox = self.style_font.glyph_bbox(glyph);
        SizedGlyph {
            glyph,
            ascent: bbox.ascent(),
            descent: bbox.descent(),
            width: self.style_font.glyph_advance(glyph),
        }
    }

    /// The first vertical variant at least `height` high, or the largest one
    fn find_glyph(&self, glyph: GlyphId, height: f32) -> SizedGlyph {
        let mut found = SizedGlyph {
            glyph,
            ascent: 0.0,
            descent: 0.0,
            width: 0.0,
        };
        for variant in self.style_font.vertical_variants(glyph) {
            found = self.sized_glyph(variant);
            if found.ascent + found.descent >= height {
                break;
            }
        }
        found
    }

    /// A variant of `glyph` or an assembly at least `height` high
    fn stretchy_glyph(&self, glyph: GlyphId, height: f32) -> Display {
        let font_size = self.style_font.font_size();
        let found = self.find_glyph(glyph, height);
        if found.ascent + found.descent < height {
            if let Some(display) = self.construct_glyph(glyph, height) {
                log::debug!("assembled glyph {} to height {}", glyph.0, height);
                return display;
            }
        }
        log::debug!(
            "variant {} of glyph {} for height {}",
            found.glyph.0,
            glyph.0,
            height
        );
        Display::glyph(
            found.glyph,
            font_size,
            None,
            found.ascent,
            found.descent,
            found.width,
        )
    }

    fn construct_glyph(&self, glyph: GlyphId, height: f32) -> Option<Display> {
        let parts = self.style_font.vertical_assembly(glyph)?;
        if parts.is_empty() {
            return None;
        }
        let (glyphs, offsets, height) = self.construct_glyph_with_parts(&parts, height);
        let width = glyphs
            .first()
            .map_or(0.0, |g| self.style_font.glyph_advance(*g));
        let construction = GlyphConstruction {
            glyphs,
            offsets,
            font_size: self.style_font.font_size(),
        };
        Some(Display::glyph_construction(construction, height, width))
    }

    /// Stack the parts with an increasing number of extenders until
    /// `glyph_height` can be reached, then spread the connectors evenly.
    /// Returns the glyphs, their offsets and the height of the stack.
    fn construct_glyph_with_parts(
        &self,
        parts: &[GlyphPart],
        glyph_height: f32,
    ) -> (Vec<GlyphId>, Vec<f32>, f32) {
        let min_distance = self.style_font.min_connector_overlap();
        let has_extender = parts.iter().any(|p| p.is_extender);
        let mut num_extenders = 0;
        loop {
            let mut glyphs = Vec::new();
            let mut offsets = Vec::new();
            let mut prev: Option<&GlyphPart> = None;
            let mut min_offset = 0f32;
            let mut max_delta = f32::MAX;

            for part in parts {
                let repeats = if part.is_extender { num_extenders } else { 1 };
                for _ in 0..repeats {
                    glyphs.push(part.glyph);
                    if let Some(prev) = prev {
                        let max_overlap = prev.end_connector_length.min(part.start_connector_length);
                        let min_offset_delta = prev.full_advance - max_overlap;
                        let max_offset_delta = prev.full_advance - min_distance;
                        max_delta = max_delta.min(max_offset_delta - min_offset_delta);
                        min_offset += min_offset_delta;
                    }
                    offsets.push(min_offset);
                    prev = Some(part);
                }
            }

            let Some(last) = prev else {
                // only extenders, and none repeated yet
                num_extenders += 1;
                continue;
            };

            let min_height = min_offset + last.full_advance;
            let gaps = (glyphs.len() - 1) as f32;
            let max_height = if gaps > 0.0 {
                min_height + max_delta * gaps
            } else {
                min_height
            };
            if min_height >= glyph_height {
                return (glyphs, offsets, min_height);
            }
            if glyph_height <= max_height || !has_extender {
                // without extender, the assembly cannot grow further
                let target = glyph_height.min(max_height);
                let increase = if gaps > 0.0 {
                    (target - min_height) / gaps
                } else {
                    0.0
                };
                for (i, offset) in offsets.iter_mut().enumerate() {
                    *offset += i as f32 * increase;
                }
                let height = offsets.last().copied().unwrap_or(0.0) + last.full_advance;
                return (glyphs, offsets, height);
            }
            num_extenders += 1;
        }
    }

    /// A delimiter glyph at least `height` high, centered on the axis
    fn find_glyph_for_boundary(&self, delimiter: &str, height: f32) -> Display {
        let ch = delimiter.chars().next().unwrap_or(' ');
        let glyph = self.style_font.glyph_for_char(ch);
        let mut display = self.stretchy_glyph(glyph, height);
        let shift_down =
            0.5 * (display.ascent - display.descent) - self.constant(C::AxisHeight);
        display.set_shift_down(shift_down);
        display
    }

    // Large operators

    fn make_large_op(&mut self, atom: &MathAtom, limits: bool, scripts: &Scripts) {
        let limits = limits && self.is_display_style();
        let range = atom.index_range;
        let mut chars = atom.nucleus.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            let mut display =
                Display::text_run(&atom.nucleus, range, vec![atom.clone()], &self.style_font);
            display.set_position(self.position);
            self.add_limits(display, limits, scripts, range, 0.0);
            return;
        };

        let mut glyph = self.style_font.glyph_for_char(ch);
        if self.is_display_style() && glyph.0 != 0 {
            glyph = self.style_font.larger_glyph(glyph);
        }
        let delta = self.style_font.italic_correction(glyph);

        // vertically centered on the axis
        let sized = self.sized_glyph(glyph);
        let shift_down = 0.5 * (sized.ascent - sized.descent) - self.constant(C::AxisHeight);
        let mut width = sized.width;
        if scripts.subscript.is_some() && !limits {
            // the italic correction goes to the superscript only
            width -= delta;
        }
        let mut display = Display::glyph(
            glyph,
            self.style_font.font_size(),
            Some(range),
            sized.ascent,
            sized.descent,
            width,
        );
        display.set_shift_down(shift_down);
        display.set_position(self.position);
        self.add_limits(display, limits, scripts, range, delta);
    }

    fn add_limits(
        &mut self,
        mut display: Display,
        limits: bool,
        scripts: &Scripts,
        range: Range,
        delta: f32,
    ) {
        if scripts.is_empty() {
            self.position.x += display.width;
            self.displays.push(display);
            return;
        }

        if !limits {
            self.position.x += display.width;
            let (ascent, descent) = (display.ascent, display.descent);
            self.make_scripts(scripts, ascent, descent, range.location, delta);
            display.has_script = true;
            self.displays.push(display);
            return;
        }

        let script_style = self.style.script_style();
        let upper = scripts
            .superscript
            .as_ref()
            .map(|l| self.line(l, script_style, self.cramped));
        let lower = scripts
            .subscript
            .as_ref()
            .map(|l| self.line(l, script_style, true));
        let upper_gap = upper.as_ref().map_or(0.0, |ul| {
            self.constant(C::UpperLimitGapMin)
                .max(self.constant(C::UpperLimitBaselineRiseMin) - ul.descent)
        });
        let lower_gap = lower.as_ref().map_or(0.0, |ll| {
            self.constant(C::LowerLimitGapMin)
                .max(self.constant(C::LowerLimitBaselineDropMin) - ll.ascent)
        });
        let mut op = Display::large_op_limits(
            display,
            upper,
            lower,
            delta / 2.0,
            upper_gap,
            lower_gap,
            range,
        );
        op.set_position(self.position);
        self.position.x += op.width;
        self.displays.push(op);
    }

    // Large delimiters

    fn make_left_right(&self, inner: &Inner, range: Range) -> Display {
        let mut inner_display = Typesetter::create_line(
            &inner.inner,
            self.font,
            self.style,
            self.cramped,
            true,
        );
        let axis_height = self.constant(C::AxisHeight);
        // max distance from the axis
        let delta = (inner_display.ascent - axis_height).max(inner_display.descent + axis_height);
        // cover at least 90% of the formula, or be at most 5pt short
        let d1 = (delta / 500.0) * DELIMITER_FACTOR;
        let d2 = 2.0 * delta - DELIMITER_SHORTFALL_POINTS;
        let height = d1.max(d2);

        let mut children = Vec::with_capacity(3);
        let mut x = 0.0;
        if let Some(left) = inner.left_boundary().filter(|b| !b.nucleus.is_empty()) {
            let mut glyph = self.find_glyph_for_boundary(&left.nucleus, height);
            glyph.set_position(Point::from_xy(x, 0.0));
            x += glyph.width;
            children.push(glyph);
        }

        inner_display.set_position(Point::from_xy(x, 0.0));
        x += inner_display.width;
        children.push(inner_display);

        if let Some(right) = inner.right_boundary().filter(|b| !b.nucleus.is_empty()) {
            let mut glyph = self.find_glyph_for_boundary(&right.nucleus, height);
            glyph.set_position(Point::from_xy(x, 0.0));
            children.push(glyph);
        }
        Display::math_list(children, Some(range))
    }

    // Over and under bars

    fn make_underline(&self, list: &MathList, range: Range) -> Display {
        let inner = self.line(list, self.style, self.cramped);
        let gap = self.constant(C::UnderbarVerticalGap);
        let thickness = self.constant(C::UnderbarRuleThickness);
        let (ascent, descent, width) = (inner.ascent, inner.descent, inner.width);

        let mut display = Display::bar(inner, range, -(descent + gap), thickness);
        display.ascent = ascent;
        display.descent = descent + gap + thickness + self.constant(C::UnderbarExtraDescender);
        display.width = width;
        display.set_position(self.position);
        display
    }

    fn make_overline(&self, list: &MathList, range: Range) -> Display {
        let inner = self.line(list, self.style, self.cramped);
        let gap = self.constant(C::OverbarVerticalGap);
        let thickness = self.constant(C::OverbarRuleThickness);
        let (ascent, descent, width) = (inner.ascent, inner.descent, inner.width);

        let mut display = Display::bar(inner, range, ascent + gap, thickness);
        display.ascent = ascent + gap + thickness + self.constant(C::OverbarExtraAscender);
        display.descent = descent;
        display.width = width;
        display.set_position(self.position);
        display
    }

    // Accents

    /// The largest horizontal variant not wider than `max_width`,
    /// or the smallest variant if all are wider.
    fn find_variant_glyph(&self, glyph: GlyphId, max_width: f32) -> SizedGlyph {
        let mut found = self.sized_glyph(glyph);
        for (i, variant) in self.style_font.horizontal_variants(glyph).into_iter().enumerate() {
            let bbox = self.style_font.glyph_bbox(variant);
            let width = bbox.x_min.max(bbox.x_max);
            let sized = self.sized_glyph(variant);
            if width > max_width {
                if i == 0 {
                    found = sized;
                }
                break;
            }
            found = sized;
        }
        found
    }

    /// How far right the accent must move to be aligned on its accentee
    fn accent_skew(&self, accentee: &MathList, accentee_width: f32, accent: GlyphId) -> f32 {
        let accent_adjustment = self.style_font.top_accent_adjustment(accent);
        let accentee_adjustment = match single_char_accentee(accentee) {
            Some(atom) => {
                let ch = styled_nucleus(atom).chars().next().unwrap_or(' ');
                let glyph = self.style_font.glyph_for_char(ch);
                self.style_font.top_accent_adjustment(glyph)
            }
            // complex accentee, use its center
            None => accentee_width / 2.0,
        };
        accentee_adjustment - accent_adjustment
    }

    /// Lay out an accent. The returned flag tells whether the scripts were
    /// moved onto the accentee.
    fn make_accent(
        &self,
        mark: &str,
        list: &MathList,
        scripts: &Scripts,
        range: Range,
    ) -> (Display, bool) {
        let mut accentee = self.line(list, self.style, true);
        let Some(mark) = mark.chars().next() else {
            // no accent
            return (accentee, false);
        };

        let glyph = self.style_font.glyph_for_char(mark);
        let accentee_width = accentee.width;
        let variant = self.find_variant_glyph(glyph, accentee_width);
        let delta = accentee.ascent.min(self.constant(C::AccentBaseHeight));
        let skew = self.accent_skew(list, accentee_width, variant.glyph);
        let height = accentee.ascent - delta;

        let mut accent = Display::glyph(
            variant.glyph,
            self.style_font.font_size(),
            Some(range),
            variant.ascent,
            variant.descent,
            variant.width,
        );
        accent.set_position(Point::from_xy(skew, height));

        let mut promoted = false;
        if single_char_accentee(list).is_some() && !scripts.is_empty() {
            // scripts go to the accented character
            let mut list = list.clone();
            if let Some(atom) = list.atoms.first_mut() {
                atom.set_superscript(scripts.superscript.clone());
                atom.set_subscript(scripts.subscript.clone());
            }
            accentee = self.line(&list, self.style, self.cramped);
            promoted = true;
        }

        let (ascent, descent, width) = (accentee.ascent, accentee.descent, accentee.width);
        let mut display = Display::accent(accent, accentee, range);
        display.width = width;
        display.descent = descent;
        display.ascent = ascent.max(ascent - delta + variant.ascent);
        (display, promoted)
    }

    // Tables

    fn make_table(&self, table: &Table, range: Range) -> Display {
        let num_columns = table.num_columns();
        if num_columns == 0 || table.num_rows() == 0 {
            let mut display = Display::math_list(Vec::new(), Some(range));
            display.set_position(self.position);
            return display;
        }

        let mut widths = vec![0f32; num_columns];
        let mut rows = Vec::with_capacity(table.num_rows());
        for row in &table.cells {
            let mut cells = Vec::with_capacity(row.len());
            for (i, cell) in row.iter().enumerate() {
                let display = self.line(cell, self.style, false);
                widths[i] = widths[i].max(display.width);
                cells.push(display);
            }
            rows.push(cells);
        }

        let mut rows: Vec<Display> = rows
            .into_iter()
            .map(|cells| self.make_row(cells, table, &widths))
            .collect();
        self.position_rows(&mut rows, table);

        let mut display = Display::math_list(rows, Some(range));
        display.set_position(self.position);
        display
    }

    fn make_row(&self, mut cells: Vec<Display>, table: &Table, widths: &[f32]) -> Display {
        let mu = self.style_font.mu_unit();
        let mut column_start = 0.0;
        let mut row_range: Option<Range> = None;
        for (i, cell) in cells.iter_mut().enumerate() {
            let width = widths[i];
            let offset = match table.alignment(i) {
                ColumnAlignment::Left => 0.0,
                ColumnAlignment::Center => (width - cell.width) / 2.0,
                ColumnAlignment::Right => width - cell.width,
            };
            row_range = match (row_range, cell.range) {
                (Some(r), Some(c)) => Some(r.union(c)),
                (r, c) => r.or(c),
            };
            cell.set_position(Point::from_xy(column_start + offset, 0.0));
            column_start += width + table.inter_column_spacing * mu;
        }
        Display::math_list(cells, row_range)
    }

    /// Stack the rows from the top, then center the stack on the axis
    fn position_rows(&self, rows: &mut [Display], table: &Table) {
        let font_size = self.style_font.font_size();
        let openup = table.inter_row_spacing * JOT_MULTIPLIER * font_size;
        let baseline_skip = openup + BASELINE_SKIP_MULTIPLIER * font_size;
        let line_skip = openup + LINE_SKIP_MULTIPLIER * font_size;
        let line_skip_limit = openup + LINE_SKIP_LIMIT_MULTIPLIER * font_size;

        let mut current = 0f32;
        let mut prev_descent = 0f32;
        let mut ascent = 0f32;
        for (i, row) in rows.iter_mut().enumerate() {
            if i == 0 {
                row.set_position(Point::zero());
                ascent += row.ascent;
            } else {
                let mut skip = baseline_skip;
                if skip - (prev_descent + row.ascent) < line_skip_limit {
                    // rows too close, space them apart
                    skip = prev_descent + row.ascent + line_skip;
                }
                current -= skip;
                row.set_position(Point::from_xy(0.0, current));
            }
            prev_descent = row.descent;
        }

        let descent = -current + prev_descent;
        let shift_down = 0.5 * (ascent - descent) - self.constant(C::AxisHeight);
        for row in rows.iter_mut() {
            let p = row.position();
            row.set_position(Point::from_xy(p.x, p.y - shift_down));
        }
    }
}

/// The type a plain atom is spaced as after `prev`.
///
/// `finalize` only looks at the atom just before, which may be a space or a
/// style change. A binary operator can then still follow an atom after which
/// it cannot be binary, it is ordinary instead (rule 5).
fn binary_as_ordinary(prev: Option<AtomType>, ty: AtomType) -> AtomType {
    match (prev, ty) {
        (
            Some(
                AtomType::BinaryOperator
                | AtomType::Relation
                | AtomType::Open
                | AtomType::Punctuation
                | AtomType::LargeOperator,
            ),
            AtomType::BinaryOperator,
        ) => AtomType::Ordinary,
        _ => ty,
    }
}

/// The accentee atom if it is a single character without scripts
fn single_char_accentee(list: &MathList) -> Option<&MathAtom> {
    match list.atoms.as_slice() {
        [atom] if atom.nucleus.chars().count() == 1 && !atom.has_scripts() => Some(atom),
        _ => None,
    }
}

/// The nucleus as the typesetter draws it
fn styled_nucleus(atom: &MathAtom) -> String {
    match atom.atom_type() {
        AtomType::Variable | AtomType::Number => charset::change_font(&atom.nucleus, atom.font_style),
        _ => atom.nucleus.clone(),
    }
}
