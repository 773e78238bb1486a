/// ASCII canvas implementing the core draw-surface contract
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use geosphere_core::{DrawSurface, Rgba, Style};
use std::f64::consts::TAU;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph for strokes over empty cells
const STROKE_CHAR: char = '.';

/// Strokes at least this wide (in cells) recolor cells they cross
const MIN_VISIBLE_STROKE: f64 = 0.5;

/// Terminal cells are about twice as tall as they are wide; surface units
/// are one cell wide and half a cell tall so circles stay round.
pub const CELL_ASPECT: f64 = 2.0;

/// Character-cell surface fed by canvas-style path commands
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<Color>>,
    subpaths: Vec<Subpath>,
}

#[derive(Debug, Default, Clone)]
struct Subpath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
            subpaths: Vec::new(),
        }
    }

    /// Surface size in drawing units, for sizing a scene to this canvas
    pub fn surface_size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64 * CELL_ASPECT)
    }

    pub fn char_at(&self, column: usize, row: usize) -> Option<char> {
        (column < self.width && row < self.height).then(|| self.char_buffer[row * self.width + column])
    }

    fn current(&mut self) -> &mut Subpath {
        if self.subpaths.last().map_or(true, |s| s.closed) {
            self.subpaths.push(Subpath::default());
        }
        // a subpath was pushed above if none was open
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn shade(color: &Rgba) -> char {
        let luminance =
            (0.2126 * f64::from(color.r) + 0.7152 * f64::from(color.g) + 0.0722 * f64::from(color.b)) / 255.0;
        let level = (luminance * color.a.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
        // never pick the blank glyph for a visible fill
        LUMINOSITY_RAMP[level.clamp(1, LUMINOSITY_RAMP.len() - 1)]
    }

    fn to_color(color: &Rgba) -> Color {
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    /// Even-odd test of a surface point against every subpath
    fn inside(&self, px: f64, py: f64) -> bool {
        let mut inside = false;
        for subpath in &self.subpaths {
            let points = &subpath.points;
            if points.len() < 3 {
                continue;
            }
            let mut j = points.len() - 1;
            for i in 0..points.len() {
                let (xi, yi) = points[i];
                let (xj, yj) = points[j];
                if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.subpaths.iter().flat_map(|s| s.points.iter());
        let &(x, y) = points.next()?;
        Some(points.fold((x, y, x, y), |(min_x, min_y, max_x, max_y), &(x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        }))
    }

    fn plot_segment(&mut self, from: (f64, f64), to: (f64, f64), color: Color, recolor: bool) {
        let Some(((x0, y0), (x1, y1))) = clip_segment(
            (from.0, from.1 / CELL_ASPECT),
            (to.0, to.1 / CELL_ASPECT),
            (self.width as f64, self.height as f64),
        ) else {
            return;
        };
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let x = (x0 + (x1 - x0) * t).floor();
            let y = (y0 + (y1 - y0) * t).floor();
            if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
                continue;
            }

            let idx = y as usize * self.width + x as usize;
            if self.char_buffer[idx] == ' ' {
                self.char_buffer[idx] = STROKE_CHAR;
                self.color_buffer[idx] = Some(color);
            } else if recolor {
                self.color_buffer[idx] = Some(color);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx].unwrap_or(Color::Reset)))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Liang-Barsky clip of a segment (in cells) to `[0, width] x [0, height]`
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (width, height): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, from.0),
        (dx, width - from.0),
        (-dy, from.1),
        (dy, height - from.1),
    ] {
        if !q.is_finite() || !p.is_finite() {
            return None;
        }
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    (t0 <= t1).then(|| {
        (
            (from.0 + t0 * dx, from.1 + t0 * dy),
            (from.0 + t1 * dx, from.1 + t1 * dy),
        )
    })
}

impl DrawSurface for AsciiCanvas {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(None);
        self.subpaths.clear();
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(Subpath {
            points: vec![(x, y)],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.current().points.push((x, y));
    }

    fn close_path(&mut self) {
        if let Some(last) = self.subpaths.last_mut() {
            last.closed = true;
        }
    }

    fn fill(&mut self, style: &Style) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some((min_x, min_y, max_x, max_y)) = self.bounds() else {
            return;
        };

        // Clip to screen bounds
        let min_col = (min_x.floor().max(0.0)) as usize;
        let max_col = (max_x.ceil().min(self.width as f64 - 1.0)).max(0.0) as usize;
        let min_row = ((min_y / CELL_ASPECT).floor().max(0.0)) as usize;
        let max_row = ((max_y / CELL_ASPECT).ceil().min(self.height as f64 - 1.0)).max(0.0) as usize;

        let character = Self::shade(&style.color);
        let color = Self::to_color(&style.color);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let px = col as f64 + 0.5;
                let py = (row as f64 + 0.5) * CELL_ASPECT;
                if self.inside(px, py) {
                    let idx = row * self.width + col;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = Some(color);
                }
            }
        }
    }

    fn stroke(&mut self, style: &Style) {
        let color = Self::to_color(&style.color);
        let recolor = style.line_width >= MIN_VISIBLE_STROKE;
        let subpaths = std::mem::take(&mut self.subpaths);

        for subpath in &subpaths {
            for pair in subpath.points.windows(2) {
                self.plot_segment(pair[0], pair[1], color, recolor);
            }
            if subpath.closed && subpath.points.len() > 2 {
                let first = subpath.points[0];
                let last = subpath.points[subpath.points.len() - 1];
                self.plot_segment(last, first, color, recolor);
            }
        }

        self.subpaths = subpaths;
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = end - start;
        let segments = ((sweep.abs() / TAU) * radius.abs().max(4.0) * 2.0).ceil().max(8.0) as usize;
        let subpath = self.current();
        for i in 0..=segments {
            let angle = start + sweep * i as f64 / segments as f64;
            subpath.points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosphere_core::{CommandList, Mesh, PainterRenderer, RotationState, SceneConfig};

    fn filled(canvas: &AsciiCanvas) -> usize {
        canvas.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    #[test]
    fn test_fill_marks_interior_cells() {
        let mut canvas = AsciiCanvas::new(10, 5);
        canvas.begin_path();
        canvas.move_to(1.0, 2.0);
        canvas.line_to(9.0, 2.0);
        canvas.line_to(9.0, 8.0);
        canvas.line_to(1.0, 8.0);
        canvas.close_path();
        canvas.fill(&Style::fill(Rgba::opaque(255, 255, 255)));

        assert_eq!(canvas.char_at(5, 2), Some('@'));
        assert_eq!(canvas.char_at(0, 2), Some(' '));
        assert_eq!(canvas.char_at(5, 0), Some(' '));
        assert_eq!(canvas.char_at(5, 4), Some(' '));
        assert_eq!(filled(&canvas), 8 * 3);
    }

    #[test]
    fn test_dim_fill_is_never_blank() {
        assert_eq!(AsciiCanvas::shade(&Rgba::new(0, 0, 0, 1.0)), '.');
        assert_eq!(AsciiCanvas::shade(&Rgba::new(200, 200, 220, 0.75)), '+');
    }

    #[test]
    fn test_clear_resets() {
        let mut canvas = AsciiCanvas::new(4, 4);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(4.0, 0.0);
        canvas.line_to(4.0, 8.0);
        canvas.fill(&Style::fill(Rgba::opaque(255, 255, 255)));
        assert!(filled(&canvas) > 0);

        canvas.clear(4.0, 8.0);
        assert_eq!(filled(&canvas), 0);
    }

    #[test]
    fn test_arc_strokes_ring() {
        let mut canvas = AsciiCanvas::new(21, 11);
        canvas.begin_path();
        canvas.arc(10.5, 11.0, 8.0, 0.0, TAU);
        canvas.stroke(&Style::stroke(Rgba::opaque(128, 128, 128), 0.1));

        assert_eq!(canvas.char_at(18, 5), Some(STROKE_CHAR));
        assert_eq!(canvas.char_at(2, 5), Some(STROKE_CHAR));
        assert_eq!(canvas.char_at(10, 5), Some(' '));
    }

    #[test]
    fn test_thin_stroke_keeps_fill_glyph() {
        let mut canvas = AsciiCanvas::new(6, 3);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(6.0, 0.0);
        canvas.line_to(6.0, 6.0);
        canvas.line_to(0.0, 6.0);
        canvas.close_path();
        canvas.fill(&Style::fill(Rgba::opaque(255, 255, 255)));
        canvas.stroke(&Style::stroke(Rgba::opaque(0, 0, 0), 0.1));
        assert_eq!(canvas.char_at(0, 0), Some('@'));
    }

    #[test]
    fn test_far_off_segment_is_clipped() {
        let mut canvas = AsciiCanvas::new(10, 5);
        canvas.begin_path();
        canvas.move_to(-1e10, 5.0);
        canvas.line_to(1e10, 5.0);
        canvas.stroke(&Style::stroke(Rgba::opaque(128, 128, 128), 0.1));

        for col in 0..10 {
            assert_eq!(canvas.char_at(col, 2), Some(STROKE_CHAR));
        }
        assert_eq!(canvas.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_clip_segment() {
        assert_eq!(clip_segment((20.0, 1.0), (30.0, 1.0), (10.0, 5.0)), None);
        assert_eq!(
            clip_segment((-5.0, 1.0), (15.0, 1.0), (10.0, 5.0)),
            Some(((0.0, 1.0), (10.0, 1.0)))
        );
        assert_eq!(
            clip_segment((2.0, 2.0), (3.0, 3.0), (10.0, 5.0)),
            Some(((2.0, 2.0), (3.0, 3.0)))
        );
        assert_eq!(clip_segment((f64::NAN, 0.0), (1.0, 1.0), (10.0, 5.0)), None);
    }

    #[test]
    fn test_replayed_sphere_covers_center() {
        let mut canvas = AsciiCanvas::new(60, 30);
        let (width, height) = canvas.surface_size();
        let renderer = PainterRenderer::new(SceneConfig::for_surface(width, height));
        let mesh = Mesh::icosphere(1).unwrap();

        let mut list = CommandList::new();
        renderer.render(&mesh, &RotationState::from_slider(10, 20, 30), &mut list);
        list.replay(&mut canvas);

        assert_ne!(canvas.char_at(30, 15), Some(' '));
        assert_eq!(canvas.char_at(0, 0), Some(' '));
    }
}
