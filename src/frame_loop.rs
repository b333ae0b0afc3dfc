// Browser host for the particle field: finds the canvas, keeps it sized to
// its layout box on window resize, and drives one field tick per animation
// frame until the canvas leaves the document or the handle is stopped.
//
// Everything here runs on the page's single thread. The frame closure and the
// resize closure share the field through Rc<RefCell<..>>, so a resize can
// never land halfway through a frame.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::surface::{CanvasSurface, Surface};
use crate::Timer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct State {
    field: ParticleField<StdRng>,
    surface: CanvasSurface,
    running: bool,
    window: Window,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl State {
    // Ends the animation once the canvas is gone or the loop was stopped
    fn frame(&mut self) -> ControlFlow<()> {
        if !self.running {
            return ControlFlow::Break(());
        }
        let flow = {
            let _timer = if self.field.config().profile {
                Some(Timer::new("ParticleField::tick"))
            } else {
                None
            };
            self.field.tick(&mut self.surface)
        };
        if let ControlFlow::Break(()) = flow {
            debug!("particle canvas left the document");
            self.teardown();
        }
        flow
    }

    fn resize(&mut self) {
        let (width, height) = self.surface.measure();
        self.field.resize(width, height);
    }

    // Shared by `stop`, drop and a detached canvas. Safe to repeat.
    fn teardown(&mut self) {
        self.running = false;
        if let Some(on_resize) = self.on_resize.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            {
                error!(error = ?e, "failed to remove resize listener");
            }
        }
    }
}

/// Handle to a running particle background. The animation keeps going for as
/// long as the canvas is in the document; dropping (or `free()`-ing) the
/// handle stops it.
#[wasm_bindgen]
pub struct ParticleBackground {
    state: Rc<RefCell<State>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Starts the background on the canvas with id `canvas_id` using the
    /// default look. Returns `undefined` without scheduling anything if the
    /// page has no such element.
    pub fn start(canvas_id: &str) -> Result<Option<ParticleBackground>, JsValue> {
        Self::launch(canvas_id, FieldConfig::default())
    }

    /// Like `start`, with a (possibly partial) options object overriding the
    /// defaults. Invalid options are logged and ignored.
    #[wasm_bindgen(js_name = startWithOptions)]
    pub fn start_with_options(
        canvas_id: &str,
        options: JsValue,
    ) -> Result<Option<ParticleBackground>, JsValue> {
        Self::launch(canvas_id, parse_options(&options))
    }

    /// Stops the animation after the current frame and detaches the resize
    /// listener. Safe to call more than once.
    pub fn stop(&mut self) {
        self.state.borrow_mut().teardown();
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.state.borrow().field.particles().len()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.state.borrow().running
    }
}

impl ParticleBackground {
    fn launch(canvas_id: &str, config: FieldConfig) -> Result<Option<ParticleBackground>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let element = match document.get_element_by_id(canvas_id) {
            Some(element) => element,
            None => {
                debug!(canvas_id, "no particle canvas on this page");
                return Ok(None);
            }
        };
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", canvas_id)))?;

        let surface = CanvasSurface::new(canvas)?;
        let (width, height) = surface.size();
        let field = ParticleField::with_config(width, height, StdRng::from_entropy(), config);
        let state = Rc::new(RefCell::new(State {
            field,
            surface,
            running: true,
            window: window.clone(),
            on_resize: None,
        }));

        // Weak, so the listener held inside the state does not keep it alive
        let resize_state = Rc::downgrade(&state);
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some(state) = resize_state.upgrade() {
                state.borrow_mut().resize();
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        state.borrow_mut().on_resize = Some(on_resize);

        run_frames(&window, state.clone())?;
        info!(canvas_id, width, height, "particle background started");

        Ok(Some(ParticleBackground { state }))
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

// `slot` holds the frame closure so it can re-request itself. Each frame
// performs one tick and asks for the next frame only while the tick says to
// continue; otherwise the closure drops its own handle, ending the loop.
fn run_frames(window: &Window, state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let frame_window = window.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let flow = state.borrow_mut().frame();
        let outcome = match flow {
            ControlFlow::Continue(()) => request_frame(&frame_window, &next),
            ControlFlow::Break(()) => {
                info!("particle background stopped");
                Ok(false)
            }
        };
        match outcome {
            Ok(true) => {}
            Ok(false) => {
                let _ = next.borrow_mut().take();
            }
            Err(e) => {
                error!(error = ?e, "requestAnimationFrame failed");
                state.borrow_mut().teardown();
                let _ = next.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut()>));

    request_frame(window, &slot).map(|_| ())
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Result<bool, JsValue> {
    match slot.borrow().as_ref() {
        Some(closure) => {
            window.request_animation_frame(closure.as_ref().unchecked_ref())?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn parse_options(options: &JsValue) -> FieldConfig {
    if options.is_undefined() || options.is_null() {
        return FieldConfig::default();
    }
    let text: String = match js_sys::JSON::stringify(options) {
        Ok(text) => text.into(),
        Err(e) => {
            warn!(error = ?e, "could not serialize particle options, using defaults");
            return FieldConfig::default();
        }
    };
    match FieldConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring particle options");
            FieldConfig::default()
        }
    }
}
