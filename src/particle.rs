// Simple particle struct to keep track of individual position, velocity, size and opacity

use crate::config::FieldConfig;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    vel: [f64; 2],
    radius: f64,
    opacity: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
        }
    }

    // Uniform position on the surface, everything else drawn from the config ranges
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * config.velocity_span;
        let vel_y = (rng.gen::<f64>() - 0.5) * config.velocity_span;
        let radius = rng.gen::<f64>() * config.radius_span + config.radius_min;
        let opacity = rng.gen::<f64>() * config.opacity_span + config.opacity_min;
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, opacity)
    }

    pub fn vel(&self) -> [f64; 2] {
        self.vel
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    // Not used when drawing, fill is always the configured particle color
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    // One frame of linear motion followed by the edge wrap
    pub fn step(&mut self, width: f64, height: f64) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.wrap(width, height);
    }

    // Snaps to the opposite edge once, no modulo. A particle left outside the
    // bounds by a resize gets pulled back here on its next step.
    pub fn wrap(&mut self, width: f64, height: f64) {
        let [x, y] = &mut self.pos;
        if *x < 0.0 {
            *x = width;
        }
        if *x > width {
            *x = 0.0;
        }
        if *y < 0.0 {
            *y = height;
        }
        if *y > height {
            *y = 0.0;
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}
