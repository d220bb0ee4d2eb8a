//! Rendering of display trees into paths.
//!
//! Paths are produced in device space: the origin is at the start of the
//! root display baseline and Y grows downwards.

use mathdisplay::display::{Display, DisplayKind};
use mathdisplay_base::color::ColorU8;
use mathdisplay_base::geom::{self, Point};
use ttf_parser as ttf;

/// Options of [`render_display`]
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Transform applied after the device space conversion,
    /// typically a translation to the baseline position in the pixmap.
    pub transform: geom::Transform,
    /// Clip mask
    pub mask: Option<&'a tiny_skia::Mask>,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        RenderOptions {
            transform: geom::Transform::identity(),
            mask: None,
        }
    }
}

/// Walk the display tree and call `render_fn` for each filled path with
/// the color it must be filled with.
///
/// Glyphs of a single display are merged into one path, rules are
/// emitted on their own.
pub fn render_display_with<R>(display: &Display, face: &ttf::Face<'_>, mut render_fn: R)
where
    R: FnMut(&geom::Path, ColorU8),
{
    let mut ctx = Ctx {
        face,
        upem: face.units_per_em() as f32,
        render_fn: &mut render_fn,
    };
    ctx.draw(display, Point::zero());
}

/// Fill the display tree into `pixmap`
pub fn render_display(
    display: &Display,
    face: &ttf::Face<'_>,
    opts: &RenderOptions<'_>,
    pixmap: &mut tiny_skia::PixmapMut<'_>,
) {
    let render_fn = |path: &geom::Path, color: ColorU8| {
        let [r, g, b, a] = color.rgba();
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        pixmap.fill_path(
            path,
            &paint,
            tiny_skia::FillRule::Winding,
            opts.transform,
            opts.mask,
        );
    };
    render_display_with(display, face, render_fn);
}

struct Ctx<'a, 'f, R> {
    face: &'a ttf::Face<'f>,
    upem: f32,
    render_fn: &'a mut R,
}

impl<R> Ctx<'_, '_, R>
where
    R: FnMut(&geom::Path, ColorU8),
{
    /// Draw `display` whose position is relative to `offset`
    fn draw(&mut self, display: &Display, offset: Point) {
        let pos = display.position();
        let x = offset.x + pos.x;
        let y = offset.y + pos.y;
        let color = display.text_color();

        match &display.kind {
            DisplayKind::List(list) => {
                let origin = Point::from_xy(x, y);
                for child in &list.children {
                    self.draw(child, origin);
                }
            }
            DisplayKind::Run(run) => {
                let mut pb = geom::PathBuilder::new();
                let mut cursor = x;
                for (glyph, advance) in run.glyphs.iter().zip(run.advances.iter()) {
                    self.push_glyph(&mut pb, *glyph, run.font_size, Point::from_xy(cursor, y));
                    cursor += advance;
                }
                self.fill(pb, color);
            }
            DisplayKind::Glyph(glyph) => {
                let mut pb = geom::PathBuilder::new();
                let at = Point::from_xy(x, y - display.shift_down());
                self.push_glyph(&mut pb, glyph.glyph, glyph.font_size, at);
                self.fill(pb, color);
            }
            DisplayKind::GlyphConstruction(construction) => {
                let mut pb = geom::PathBuilder::new();
                let base = y - display.shift_down();
                for (glyph, offset) in construction.glyphs.iter().zip(construction.offsets.iter()) {
                    let at = Point::from_xy(x, base + offset);
                    self.push_glyph(&mut pb, *glyph, construction.font_size, at);
                }
                self.fill(pb, color);
            }
            DisplayKind::Fraction(frac) => {
                self.draw(&frac.numerator, offset);
                self.draw(&frac.denominator, offset);
                if frac.line_thickness > 0.0 {
                    let center = y + frac.line_position;
                    self.rule(x, x + display.width, center, frac.line_thickness, color);
                }
            }
            DisplayKind::Radical(rad) => {
                let origin = Point::from_xy(x + rad.radical_shift, y);
                self.draw(&rad.glyph, origin);
                let start = origin.x + rad.glyph.width;
                let center = y + display.ascent - rad.top_kern - rad.line_thickness / 2.0;
                self.rule(
                    start,
                    start + rad.radicand.width,
                    center,
                    rad.line_thickness,
                    color,
                );
                self.draw(&rad.radicand, offset);
                if let Some(degree) = &rad.degree {
                    self.draw(degree, offset);
                }
            }
            DisplayKind::LargeOpLimits(op) => {
                if let Some(ul) = &op.upper_limit {
                    self.draw(ul, offset);
                }
                self.draw(&op.nucleus, offset);
                if let Some(ll) = &op.lower_limit {
                    self.draw(ll, offset);
                }
            }
            DisplayKind::Bar(bar) => {
                self.draw(&bar.inner, offset);
                let center = y + bar.line_shift_up;
                self.rule(x, x + display.width, center, bar.line_thickness, color);
            }
            DisplayKind::Accent(acc) => {
                self.draw(&acc.accentee, offset);
                self.draw(&acc.accent, Point::from_xy(x, y));
            }
        }
    }

    /// Append the outline of `glyph` with its origin at `at`, in math space
    fn push_glyph(&self, pb: &mut geom::PathBuilder, glyph: ttf::GlyphId, font_size: f32, at: Point) {
        let scale = font_size / self.upem;
        let mut glyph_pb = geom::PathBuilder::new();
        {
            let mut builder = crate::Outliner(&mut glyph_pb);
            if self.face.outline_glyph(glyph, &mut builder).is_none() {
                // spaces and missing glyphs
                return;
            }
        }
        let ts = geom::Transform::from_scale(scale, -scale).post_translate(at.x, -at.y);
        if let Some(path) = glyph_pb.finish().and_then(|p| p.transform(ts)) {
            pb.push_path(&path);
        }
    }

    fn fill(&mut self, pb: geom::PathBuilder, color: ColorU8) {
        if let Some(path) = pb.finish() {
            (self.render_fn)(&path, color);
        }
    }

    fn rule(&mut self, left: f32, right: f32, center: f32, thickness: f32, color: ColorU8) {
        let Some(rect) = rule_rect(left, right, center, thickness) else {
            log::trace!("skipping degenerate rule at {}", center);
            return;
        };
        let path = geom::PathBuilder::from_rect(rect);
        (self.render_fn)(&path, color);
    }
}

/// Device space rectangle of a horizontal rule centered on `center` in math space
fn rule_rect(left: f32, right: f32, center: f32, thickness: f32) -> Option<tiny_skia_path::Rect> {
    if thickness <= 0.0 || right <= left {
        return None;
    }
    let half = thickness / 2.0;
    tiny_skia_path::Rect::from_ltrb(left, -(center + half), right, -(center - half))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_is_flipped() {
        let r = rule_rect(0.0, 10.0, 4.0, 1.0).unwrap();
        assert_eq!((r.left(), r.right()), (0.0, 10.0));
        assert_eq!((r.top(), r.bottom()), (-4.5, -3.5));
    }

    #[test]
    fn degenerate_rules() {
        assert!(rule_rect(0.0, 10.0, 4.0, 0.0).is_none());
        assert!(rule_rect(3.0, 3.0, 4.0, 1.0).is_none());
    }
}
