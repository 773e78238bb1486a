/// Minimal vector-path contract for 2D drawing back ends
use std::fmt;

/// An 8-bit RGB color with a fractional alpha, as canvas style strings use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// CSS color string, e.g. `rgba(200, 200, 220, 0.75)`
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Paint used by a fill or stroke call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Rgba,
    /// Stroke width in surface pixels; ignored by fills
    pub line_width: f64,
}

impl Style {
    pub const fn fill(color: Rgba) -> Self {
        Self {
            color,
            line_width: 0.0,
        }
    }

    pub const fn stroke(color: Rgba, line_width: f64) -> Self {
        Self { color, line_width }
    }
}

/// A 2D surface that accepts canvas-style path commands.
///
/// `fill` and `stroke` paint the current path without clearing it, so a
/// fill followed by a stroke outlines the same shape.
pub trait DrawSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self, style: &Style);
    fn stroke(&mut self, style: &Style);
    /// Adds a circular arc (angles in radians) to the current path.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
}

/// One recorded [`DrawSurface`] call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Fill(Style),
    Stroke(Style),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
}

impl DrawCommand {
    pub fn apply<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match *self {
            DrawCommand::Clear { width, height } => surface.clear(width, height),
            DrawCommand::BeginPath => surface.begin_path(),
            DrawCommand::MoveTo { x, y } => surface.move_to(x, y),
            DrawCommand::LineTo { x, y } => surface.line_to(x, y),
            DrawCommand::ClosePath => surface.close_path(),
            DrawCommand::Fill(ref style) => surface.fill(style),
            DrawCommand::Stroke(ref style) => surface.stroke(style),
            DrawCommand::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => surface.arc(cx, cy, radius, start, end),
        }
    }
}

/// A surface that records the ordered command stream of a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of fill calls, one per painted triangle
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill(_)))
            .count()
    }

    /// Re-issue every recorded command, in order, onto another surface.
    pub fn replay<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            command.apply(surface);
        }
    }
}

impl DrawSurface for CommandList {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, style: &Style) {
        self.commands.push(DrawCommand::Fill(*style));
    }

    fn stroke(&mut self, style: &Style) {
        self.commands.push(DrawCommand::Stroke(*style));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.commands.push(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }
}
