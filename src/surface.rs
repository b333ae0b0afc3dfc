// Drawing surface abstraction. The field only needs a handful of 2D
// primitives, so anything from a browser canvas to a test recorder can host it.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    /// Current size in CSS pixels
    fn size(&self) -> (u32, u32);

    /// Clears the whole surface to transparent
    fn clear(&mut self);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, style: &str);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, style: &str);

    /// False once the host has torn the surface down; the frame loop stops
    /// rescheduling itself when this turns false.
    fn is_attached(&self) -> bool {
        true
    }
}

// 2D canvas on the DOM. Holds the element alongside its context so the
// backing store can be resized to match the element's layout box.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    // Grabs the 2D context from the canvas and sizes the backing store to
    // the element's on-screen size
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut surface = CanvasSurface {
            canvas,
            context,
            width: 0,
            height: 0,
        };
        surface.measure();
        Ok(surface)
    }

    /// Re-reads the element's layout size and resizes the backing store to
    /// match, returning the new dimensions.
    pub fn measure(&mut self) -> (u32, u32) {
        self.width = self.canvas.offset_width().max(0) as u32;
        self.height = self.canvas.offset_height().max(0) as u32;
        self.canvas.set_width(self.width);
        self.canvas.set_height(self.height);
        (self.width, self.height)
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, style: &str) {
        self.context.begin_path();
        // arc only fails for a negative radius
        if let Err(e) = self
            .context
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0)
        {
            warn!(error = ?e, radius, "canvas rejected particle dot");
            return;
        }
        self.context.set_fill_style(&JsValue::from_str(style));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, style: &str) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style(&JsValue::from_str(style));
        self.context.set_line_width(width);
        self.context.stroke();
    }

    fn is_attached(&self) -> bool {
        self.canvas.is_connected()
    }
}
