// Errors raised while wiring a field to the page.
//
// These only come up at construction. The exported constructor logs them and
// falls back to an inert background instead of throwing into JS.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    // No global `window`, e.g. running inside a worker.
    NoWindow,
    NoDocument,
    // No element with the requested id.
    MissingSurface(String),
    // The element exists but is not a `<canvas>`.
    NotACanvas(String),
    // The canvas refused a 2D context.
    ContextUnavailable,
    // Any other failure reported by a JS call.
    Js(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NoWindow => write!(f, "no global window available"),
            FieldError::NoDocument => write!(f, "window has no document"),
            FieldError::MissingSurface(id) => write!(f, "no element with id '{}'", id),
            FieldError::NotACanvas(id) => write!(f, "element '{}' is not a canvas", id),
            FieldError::ContextUnavailable => write!(f, "canvas has no 2d context"),
            FieldError::Js(msg) => write!(f, "js error: {}", msg),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
