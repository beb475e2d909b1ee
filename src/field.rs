// A fixed population of drifting particles drawn onto a surface, with faint
// lines between pairs closer than the configured distance.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;

pub struct ParticleField<S: Surface> {
    surface: Option<S>,
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

// Line alpha for a pair at `distance`, None when they are too far apart to connect
pub fn connection_opacity(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.max_distance {
        Some((1.0 - distance / config.max_distance) * config.max_line_opacity)
    } else {
        None
    }
}

impl<S: Surface> ParticleField<S> {
    // Sizes the surface to the viewport and seeds the population. Without a
    // surface the field is inert: no particles, and every frame is a no-op.
    pub fn create<R: Rng + ?Sized>(surface: Option<S>, config: FieldConfig, rng: &mut R) -> Self {
        let mut field = ParticleField {
            surface,
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
        };
        if field.surface.is_some() {
            field.resize();
            field.seed(rng);
        }
        field
    }

    // Uses the given population as is instead of seeding one.
    pub fn from_particles(surface: S, config: FieldConfig, particles: Vec<Particle>) -> Self {
        let mut field = ParticleField {
            surface: Some(surface),
            config,
            width: 0.0,
            height: 0.0,
            particles,
        };
        field.resize();
        field
    }

    fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (width, height, config) = (self.width, self.height, self.config);
        self.particles = (0..config.particle_count)
            .map(|_| Particle::random(&mut *rng, width, height, &config))
            .collect();
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    // Re-reads the viewport into the surface and field bounds. Particles are
    // left where they are, ones now out of bounds wrap on their next step.
    pub fn resize(&mut self) {
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return,
        };
        let (width, height) = surface.viewport_size();
        surface.set_size(width, height);
        self.width = width as f64;
        self.height = height as f64;
    }

    pub fn render_frame(&mut self) {
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return,
        };
        let (width, height) = (self.width, self.height);
        let config = &self.config;
        surface.clear_rect(0.0, 0.0, width, height);

        for i in 0..self.particles.len() {
            // Later particles have not moved yet this frame, pairs are measured
            // against where they currently stand.
            let (head, rest) = self.particles.split_at_mut(i + 1);
            let particle = &mut head[i];
            particle.step(width, height);
            surface.fill_circle(particle.pos, particle.radius(), config.particle_color);

            for other in rest.iter() {
                let distance = particle.distance_to(other);
                if let Some(opacity) = connection_opacity(distance, config) {
                    surface.stroke_line(
                        particle.pos,
                        other.pos,
                        config.line_color.with_alpha(opacity),
                        config.line_width,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 2.0, 0.2)
    }

    fn fixed_field(width: u32, height: u32, particles: Vec<Particle>) -> ParticleField<RecordingSurface> {
        ParticleField::from_particles(
            RecordingSurface::new(width, height),
            FieldConfig::default(),
            particles,
        )
    }

    fn seeded_field(width: u32, height: u32) -> ParticleField<RecordingSurface> {
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::create(
            Some(RecordingSurface::new(width, height)),
            FieldConfig::default(),
            &mut rng,
        )
    }

    fn line_alphas(field: &ParticleField<RecordingSurface>) -> Vec<f64> {
        field
            .surface()
            .unwrap()
            .lines()
            .map(|cmd| match cmd {
                DrawCommand::Line { color, .. } => color.a,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn create_sizes_surface_and_seeds_population() {
        let field = seeded_field(1280, 720);
        assert_eq!(field.size(), (1280.0, 720.0));
        assert_eq!(field.surface().unwrap().size(), (1280, 720));
        assert_eq!(field.particles().len(), FieldConfig::PARTICLE_COUNT);
        assert!(!field.is_inert());
    }

    #[test]
    fn missing_surface_gives_inert_field() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field: ParticleField<RecordingSurface> =
            ParticleField::create(None, FieldConfig::default(), &mut rng);
        field.resize();
        field.render_frame();
        assert!(field.is_inert());
        assert!(field.particles().is_empty());
        assert_eq!(field.size(), (0.0, 0.0));
    }

    #[test]
    fn population_and_bounds_hold_over_many_frames() {
        let mut field = seeded_field(400, 300);
        for _ in 0..2000 {
            field.render_frame();
            assert_eq!(field.particles().len(), FieldConfig::PARTICLE_COUNT);
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 400.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 300.0);
            }
        }
    }

    #[test]
    fn velocity_radius_and_opacity_never_change() {
        let mut field = seeded_field(400, 300);
        let before: Vec<_> = field
            .particles()
            .iter()
            .map(|p| (p.vel(), p.radius(), p.opacity()))
            .collect();
        for _ in 0..50 {
            field.render_frame();
        }
        let after: Vec<_> = field
            .particles()
            .iter()
            .map(|p| (p.vel(), p.radius(), p.opacity()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn frame_clears_then_draws_every_particle_opaque() {
        let mut field = seeded_field(400, 300);
        field.render_frame();
        let surface = field.surface().unwrap();
        assert_eq!(
            surface.commands()[0],
            DrawCommand::Clear {
                width: 400.0,
                height: 300.0
            }
        );
        assert_eq!(surface.circles().count(), FieldConfig::PARTICLE_COUNT);
        for cmd in surface.circles() {
            if let DrawCommand::Circle { color, .. } = cmd {
                assert_eq!(*color, crate::color::Color::WHITE);
            }
        }
    }

    #[test]
    fn each_pair_is_connected_once() {
        let particles = (0..10).map(|_| still(50.0, 50.0)).collect();
        let mut field = fixed_field(100, 100, particles);
        field.render_frame();
        let alphas = line_alphas(&field);
        assert_eq!(alphas.len(), 10 * 9 / 2);
        assert!(alphas.iter().all(|a| (*a - 0.05).abs() < 1e-12));
    }

    #[test]
    fn threshold_is_strict() {
        let particles = vec![still(0.0, 10.0), still(150.0, 10.0)];
        let mut field = fixed_field(400, 400, particles);
        field.render_frame();
        assert!(line_alphas(&field).is_empty());

        let particles = vec![still(0.0, 10.0), still(149.999, 10.0)];
        let mut field = fixed_field(400, 400, particles);
        field.render_frame();
        let alphas = line_alphas(&field);
        assert_eq!(alphas.len(), 1);
        assert!((alphas[0] - (1.0 - 149.999 / 150.0) * 0.05).abs() < 1e-12);
        assert!(alphas[0] > 0.0 && alphas[0] < 1e-6);
    }

    #[test]
    fn opacity_falls_off_linearly() {
        let config = FieldConfig::default();
        assert_eq!(connection_opacity(0.0, &config), Some(0.05));
        assert!((connection_opacity(75.0, &config).unwrap() - 0.025).abs() < 1e-12);
        assert_eq!(connection_opacity(150.0, &config), None);
        assert_eq!(connection_opacity(151.0, &config), None);
    }

    #[test]
    fn pair_decision_does_not_depend_on_order() {
        let config = FieldConfig::default();
        let a = still(10.0, 20.0);
        let b = still(90.0, 80.0);
        assert_eq!(
            connection_opacity(a.distance_to(&b), &config),
            connection_opacity(b.distance_to(&a), &config)
        );
    }

    #[test]
    fn lines_use_configured_width() {
        let particles = vec![still(10.0, 10.0), still(20.0, 10.0)];
        let mut field = fixed_field(100, 100, particles);
        field.render_frame();
        let surface = field.surface().unwrap();
        let line = surface.lines().next().unwrap();
        assert_eq!(
            *line,
            DrawCommand::Line {
                from: [10.0, 10.0],
                to: [20.0, 10.0],
                color: crate::color::Color::WHITE.with_alpha((1.0 - 10.0 / 150.0) * 0.05),
                width: 0.5,
            }
        );
    }

    #[test]
    fn later_particles_are_measured_before_they_move() {
        let particles = vec![
            Particle::new([10.0, 10.0], [0.0, 0.0], 1.0, 0.2),
            Particle::new([20.0, 10.0], [0.25, 0.0], 1.0, 0.2),
        ];
        let mut field = fixed_field(100, 100, particles);
        field.render_frame();
        let surface = field.surface().unwrap();
        match surface.lines().next() {
            Some(DrawCommand::Line { to, .. }) => assert_eq!(*to, [20.0, 10.0]),
            other => panic!("expected a line, got {:?}", other),
        }
        assert_eq!(field.particles()[1].pos, [20.25, 10.0]);
    }

    #[test]
    fn resize_twice_is_idempotent() {
        let mut field = seeded_field(400, 300);
        let before = field.particles().to_vec();
        field.resize();
        field.resize();
        assert_eq!(field.size(), (400.0, 300.0));
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn resize_keeps_particles_and_wraps_them_later() {
        let particles = vec![Particle::new([350.0, 50.0], [0.1, 0.0], 1.0, 0.2)];
        let mut field = fixed_field(400, 300, particles);
        field.surface_mut().unwrap().set_viewport(200, 100);
        field.resize();
        assert_eq!(field.size(), (200.0, 100.0));
        assert_eq!(field.surface().unwrap().size(), (200, 100));
        assert_eq!(field.particles()[0].pos, [350.0, 50.0]);

        field.render_frame();
        assert_eq!(field.particles()[0].pos, [0.0, 50.0]);
    }

    #[test]
    fn custom_population_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::default().with_particle_count(12);
        let mut field = ParticleField::create(Some(RecordingSurface::new(50, 50)), config, &mut rng);
        field.render_frame();
        assert_eq!(field.particles().len(), 12);
        assert_eq!(field.surface().unwrap().circles().count(), 12);
    }
}
