// The drawing contract a particle field needs from its host. Implementations
// swallow and log their own host failures, a decorative field never fails a frame.

use crate::color::Color;

pub trait Surface {
    // Size the surface should take, in whole pixels (the window viewport on the web)
    fn viewport_size(&self) -> (u32, u32);

    fn set_size(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64);
}
