/// Terminal front end: owns the mesh and orientation, repaints on change
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use geosphere_core::{AxisGizmo, FrameStats, Mesh, PainterRenderer, RotationState, SceneConfig};
use std::io::{self, stdout, Write};

pub mod logging;
pub mod renderer;

pub use logging::Logger;
pub use renderer::AsciiCanvas;

/// Degrees per key press
pub const ANGLE_STEP: f64 = 5.0;

/// Orientation change requested by a key, if any
pub fn key_to_delta(code: KeyCode) -> Option<(f64, f64, f64)> {
    match code {
        KeyCode::Char('x') | KeyCode::Up => Some((ANGLE_STEP, 0.0, 0.0)),
        KeyCode::Char('X') | KeyCode::Down => Some((-ANGLE_STEP, 0.0, 0.0)),
        KeyCode::Char('y') | KeyCode::Right => Some((0.0, ANGLE_STEP, 0.0)),
        KeyCode::Char('Y') | KeyCode::Left => Some((0.0, -ANGLE_STEP, 0.0)),
        KeyCode::Char('z') => Some((0.0, 0.0, ANGLE_STEP)),
        KeyCode::Char('Z') => Some((0.0, 0.0, -ANGLE_STEP)),
        _ => None,
    }
}

/// Runs a cleanup closure when dropped, including on early `?` returns
pub struct OnDrop<F: FnMut()> {
    cleanup: F,
}

impl<F: FnMut()> OnDrop<F> {
    pub fn new(cleanup: F) -> Self {
        Self { cleanup }
    }
}

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.cleanup)();
    }
}

/// Main application struct for terminal sphere rendering
pub struct TerminalApp {
    mesh: Mesh,
    rotation: RotationState,
    renderer: PainterRenderer,
    gizmo: AxisGizmo,
    canvas: AsciiCanvas,
    last_frame: FrameStats,
    running: bool,
}

impl TerminalApp {
    /// `mesh` is built once by the caller and kept for the app's lifetime.
    pub fn new(mesh: Mesh, config: SceneConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let canvas = Self::canvas_for(width, height);
        let renderer = Self::renderer_for(&canvas, config);

        Ok(Self {
            mesh,
            rotation: RotationState::zero(),
            renderer,
            gizmo: AxisGizmo::default(),
            canvas,
            last_frame: FrameStats::default(),
            running: true,
        })
    }

    fn canvas_for(width: u16, height: u16) -> AsciiCanvas {
        // top row is the status line
        AsciiCanvas::new(width as usize, height.saturating_sub(1) as usize)
    }

    /// Keep depth and perspective from `config`, size the view to the canvas.
    fn renderer_for(canvas: &AsciiCanvas, config: SceneConfig) -> PainterRenderer {
        let (width, height) = canvas.surface_size();
        let sized = SceneConfig::for_surface(width, height);
        let mut style = config.style;
        style.line_width = sized.style.line_width;
        style.reference_radius = sized.style.reference_radius;
        PainterRenderer::new(SceneConfig {
            viewport: sized.viewport,
            style,
            ..config
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let _restore = OnDrop::new(|| {
            // Cleanup
            let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
            let _ = terminal::disable_raw_mode();
        });
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        self.main_loop()
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;

        while self.running {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => self.handle_key(code)?,
                Event::Resize(width, height) => {
                    log::info!("terminal resized to {}x{}", width, height);
                    self.canvas = Self::canvas_for(width, height);
                    self.renderer = Self::renderer_for(&self.canvas, *self.renderer.config());
                    self.render()?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> io::Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                Ok(())
            }
            KeyCode::Char('0') => self.on_orientation_changed(RotationState::zero()),
            code => match key_to_delta(code) {
                Some((dx, dy, dz)) => {
                    let mut rotation = self.rotation;
                    rotation.rotate(dx, dy, dz);
                    self.on_orientation_changed(rotation)
                }
                None => Ok(()),
            },
        }
    }

    /// Entry point for the control layer: store the angles and repaint.
    pub fn on_orientation_changed(&mut self, rotation: RotationState) -> io::Result<()> {
        self.rotation = rotation;
        self.render()
    }

    fn render(&mut self) -> io::Result<()> {
        self.last_frame = self.renderer.render(&self.mesh, &self.rotation, &mut self.canvas);
        self.gizmo
            .render(&self.rotation, &self.renderer.config().viewport, &mut self.canvas);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Geosphere | x {:>3.0} y {:>3.0} z {:>3.0} | faces {} | x/X y/Y z/Z=Rotate 0=Reset Q=Quit",
                self.rotation.x, self.rotation.y, self.rotation.z, self.last_frame.drawn
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}
