/// Geosphere Web - canvas 2D back end for browsers
///
/// The slider controls live in the host page; they call
/// [`WebRenderer::set_rotation`] and this module repaints synchronously.

use geosphere_core::{AxisGizmo, DrawSurface, Mesh, PainterRenderer, RotationState, SceneConfig, Style};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`DrawSurface`] over a browser 2D context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self, style: &Style) {
        self.context.set_fill_style_str(&style.color.to_css());
        self.context.fill();
    }

    fn stroke(&mut self, style: &Style) {
        self.context.set_stroke_style_str(&style.color.to_css());
        self.context.set_line_width(style.line_width);
        self.context.stroke();
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        // only fails for a negative radius
        if let Err(err) = self.context.arc(cx, cy, radius, start, end) {
            log::warn!("arc rejected: {:?}", err);
        }
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    mesh: Mesh,
    rotation: RotationState,
    renderer: PainterRenderer,
    gizmo: AxisGizmo,
    surface: Option<CanvasSurface>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Builds the mesh once for the lifetime of the renderer.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebRenderer, JsValue> {
        let config = SceneConfig::default();
        let mesh = Mesh::icosphere(config.subdivision_depth)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WebRenderer {
            mesh,
            rotation: RotationState::zero(),
            renderer: PainterRenderer::new(config),
            gizmo: AxisGizmo::default(),
            surface: None,
        })
    }

    /// Initialize the renderer with a canvas element
    pub fn init(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let config = SceneConfig::for_surface(f64::from(canvas.width()), f64::from(canvas.height()));
        self.renderer = PainterRenderer::new(SceneConfig {
            subdivision_depth: self.renderer.config().subdivision_depth,
            perspective: self.renderer.config().perspective,
            ..config
        });
        self.surface = Some(CanvasSurface::new(context));
        self.render()
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), JsValue> {
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| JsValue::from_str("renderer not initialized; call init() first"))?;
        self.renderer.render(&self.mesh, &self.rotation, surface);
        self.gizmo
            .render(&self.rotation, &self.renderer.config().viewport, surface);
        Ok(())
    }

    /// Slider values in `[0, 360]`; repaints immediately.
    pub fn set_rotation(&mut self, x: u16, y: u16, z: u16) -> Result<(), JsValue> {
        self.rotation = RotationState::from_slider(x, y, z);
        self.render()
    }

    /// Number of faces in the cached mesh
    pub fn face_count(&self) -> usize {
        self.mesh.len()
    }
}
