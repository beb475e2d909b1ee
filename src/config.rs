// Tunables for a particle field. Defaults reproduce the stock background.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    // Pairs closer than this (strictly) get a connecting line.
    pub max_distance: f64,
    // Line alpha at distance zero, falls off linearly to 0 at `max_distance`.
    pub max_line_opacity: f64,
    pub line_width: f64,
    // Each velocity component is drawn from [-span / 2, span / 2).
    pub velocity_span: f64,
    pub radius_min: f64,
    pub radius_span: f64,
    pub opacity_min: f64,
    pub opacity_span: f64,
    pub particle_color: Color,
    pub line_color: Color,
}

impl FieldConfig {
    pub const PARTICLE_COUNT: usize = 100;
    pub const MAX_DISTANCE: f64 = 150.0;

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::PARTICLE_COUNT,
            max_distance: FieldConfig::MAX_DISTANCE,
            max_line_opacity: 0.05,
            line_width: 0.5,
            velocity_span: 0.5,
            radius_min: 1.0,
            radius_span: 2.0,
            opacity_min: 0.1,
            opacity_span: 0.3,
            particle_color: Color::WHITE,
            line_color: Color::WHITE,
        }
    }
}
