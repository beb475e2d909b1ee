// Browser side of the field: a 2D canvas as the surface, requestAnimationFrame
// as the clock and the window resize event as the resize signal.

use crate::animation::{Animation, FrameClock, ResizeSignal};
use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::surface::Surface;
#[cfg(feature = "frame-timing")]
use crate::utils::Timer;
use crate::utils::warn;
use js_sys::Function;
use std::f64;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, Window};

pub struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Looks up the canvas by element id and grabs its 2D context
    pub fn find(window: &Window, canvas_id: &str) -> Result<Self, FieldError> {
        let document = window.document().ok_or(FieldError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| FieldError::MissingSurface(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::NotACanvas(canvas_id.to_owned()))?;
        let context = canvas
            .get_context("2d")?
            .ok_or(FieldError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::ContextUnavailable)?;

        Ok(CanvasSurface {
            window: window.clone(),
            canvas,
            context,
        })
    }
}

impl Surface for CanvasSurface {
    fn viewport_size(&self) -> (u32, u32) {
        let width = self.window.inner_width().ok().and_then(|w| w.as_f64());
        let height = self.window.inner_height().ok().and_then(|h| h.as_f64());
        match (width, height) {
            (Some(width), Some(height)) => (width as u32, height as u32),
            _ => (self.canvas.width(), self.canvas.height()),
        }
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) {
        self.context.begin_path();
        if let Err(err) = self
            .context
            .arc(center[0], center[1], radius, 0.0, f64::consts::PI * 2.0)
        {
            console::warn_2(&"arc failed".into(), &err);
            return;
        }
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(width);
        self.context.stroke();
    }
}

pub struct WindowClock {
    window: Window,
}

impl WindowClock {
    pub fn new(window: Window) -> Self {
        WindowClock { window }
    }
}

impl FrameClock for WindowClock {
    type Request = i32;

    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) -> Option<i32> {
        #[cfg(feature = "frame-timing")]
        let callback: Box<dyn FnOnce()> = Box::new(move || {
            let _timer = Timer::new("ParticleField::render_frame");
            callback()
        });
        // The closure frees itself once it runs. A cancelled request leaks it,
        // it only owns a Weak to the field.
        let function = Closure::once_into_js(move || callback());
        match self
            .window
            .request_animation_frame(function.unchecked_ref::<Function>())
        {
            Ok(id) => Some(id),
            Err(err) => {
                console::warn_2(&"requestAnimationFrame failed".into(), &err);
                None
            }
        }
    }

    fn cancel_frame(&mut self, request: i32) {
        if let Err(err) = self.window.cancel_animation_frame(request) {
            console::warn_2(&"cancelAnimationFrame failed".into(), &err);
        }
    }
}

pub struct WindowResize {
    window: Window,
}

impl WindowResize {
    pub fn new(window: Window) -> Self {
        WindowResize { window }
    }
}

impl ResizeSignal for WindowResize {
    type Subscription = Closure<dyn FnMut()>;

    fn subscribe(&mut self, listener: Box<dyn FnMut()>) -> Option<Closure<dyn FnMut()>> {
        let closure = Closure::wrap(listener);
        match self
            .window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref::<Function>())
        {
            Ok(()) => Some(closure),
            Err(err) => {
                console::warn_2(&"failed to listen for resize".into(), &err);
                None
            }
        }
    }

    fn unsubscribe(&mut self, subscription: Closure<dyn FnMut()>) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(
                "resize",
                subscription.as_ref().unchecked_ref::<Function>(),
            )
        {
            console::warn_2(&"failed to remove resize listener".into(), &err);
        }
    }
}

type PageAnimation = Animation<CanvasSurface, WindowClock, WindowResize>;

// Animated particle background bound to a `<canvas>` element.
//
// Construction never throws. If the canvas can't be found the background is
// inert: it draws nothing and schedules no frames.
#[wasm_bindgen]
pub struct ParticleBackground {
    animation: Option<PageAnimation>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> ParticleBackground {
        ParticleBackground::start(canvas_id, FieldConfig::default())
    }

    pub fn with_config(canvas_id: &str, particle_count: u32, max_distance: f64) -> ParticleBackground {
        let mut config = FieldConfig::default().with_particle_count(particle_count as usize);
        if max_distance.is_finite() && max_distance > 0.0 {
            config = config.with_max_distance(max_distance);
        } else {
            warn(&format!(
                "ignoring max_distance {}, using {}",
                max_distance,
                FieldConfig::MAX_DISTANCE
            ));
        }
        ParticleBackground::start(canvas_id, config)
    }

    pub fn resize(&self) {
        if let Some(animation) = &self.animation {
            animation.resize();
        }
    }

    pub fn stop(&mut self) {
        if let Some(animation) = &mut self.animation {
            animation.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.animation
            .as_ref()
            .map_or(false, |animation| animation.is_running())
    }

    // Connection distance in use, 0 for an inert background
    pub fn max_distance(&self) -> f64 {
        self.animation
            .as_ref()
            .map_or(0.0, |animation| animation.field().config().max_distance)
    }

    pub fn particle_count(&self) -> u32 {
        self.animation
            .as_ref()
            .map_or(0, |animation| animation.field().particles().len() as u32)
    }
}

impl ParticleBackground {
    fn start(canvas_id: &str, config: FieldConfig) -> ParticleBackground {
        let window = match web_sys::window() {
            Some(window) => window,
            None => {
                warn(&FieldError::NoWindow.to_string());
                return ParticleBackground { animation: None };
            }
        };
        let surface = match CanvasSurface::find(&window, canvas_id) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn(&format!("particle background disabled: {}", err));
                None
            }
        };

        let mut rng = rand::thread_rng();
        let field = ParticleField::create(surface, config, &mut rng);
        let animation = Animation::start(
            field,
            WindowClock::new(window.clone()),
            WindowResize::new(window),
        );
        ParticleBackground {
            animation: Some(animation),
        }
    }
}
