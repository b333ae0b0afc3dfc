// The particle field: a bounded set of drifting dots over a rectangular
// surface, with faint lines joining any two that come close to each other.
// Owns the surface dimensions, the particle set and the random source, so
// resizing and frame ticks are just methods on one value.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;
use std::ops::ControlFlow;
use tracing::debug;

/// Number of particles a `width` x `height` surface holds:
/// `min(max_particles, floor(area / area_per_particle))`.
pub fn particle_count(width: u32, height: u32, config: &FieldConfig) -> usize {
    let area = width as f64 * height as f64;
    let count = (area / config.area_per_particle).floor() as usize;
    count.min(config.max_particles)
}

/// Opacity of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be linked. Falls linearly from `link_alpha` at
/// zero distance to 0 at `link_distance`.
pub fn connection_alpha(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.link_distance {
        Some(config.link_alpha * (1.0 - distance / config.link_distance))
    } else {
        None
    }
}

pub struct ParticleField<R: Rng> {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    rng: R,
    config: FieldConfig,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(width: u32, height: u32, rng: R) -> Self {
        Self::with_config(width, height, rng, FieldConfig::default())
    }

    pub fn with_config(width: u32, height: u32, rng: R, config: FieldConfig) -> Self {
        let mut field = ParticleField {
            width,
            height,
            particles: Vec::new(),
            rng,
            config,
        };
        field.seed();
        field
    }

    /// Records the new surface size and regenerates the whole particle set
    /// from it. Previous particles are discarded even if the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.seed();
    }

    fn seed(&mut self) {
        let count = particle_count(self.width, self.height, &self.config);
        let (width, height) = (self.width as f64, self.height as f64);
        let rng = &mut self.rng;
        let config = &self.config;
        self.particles = (0..count)
            .map(|_| Particle::random(rng, width, height, config))
            .collect();
        debug!(width = self.width, height = self.height, count, "seeded particle field");
    }

    /// Advances every particle by one frame without drawing anything.
    pub fn step(&mut self) {
        let (width, height) = (self.width as f64, self.height as f64);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    /// Draws the particle set as it currently stands: dots first, then every
    /// link between particles within range.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        let dot_color = self.config.dot_color;
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, &dot_color.css_rgba(p.alpha));
        }
        for i in 0..self.particles.len() {
            self.draw_links(i, surface);
        }
    }

    /// Runs one frame: clears the surface, then for each particle in order
    /// moves it, draws its dot and links it to every later particle. Later
    /// particles are linked at their previous-frame positions, exactly as a
    /// single pass over the set sees them.
    ///
    /// Returns `Break` once the surface has been detached, telling the frame
    /// scheduler not to request another tick.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ControlFlow<()> {
        if !surface.is_attached() {
            return ControlFlow::Break(());
        }

        surface.clear();
        let (width, height) = (self.width as f64, self.height as f64);
        let dot_color = self.config.dot_color;
        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.advance(width, height);
            surface.fill_circle(p.pos, p.radius, &dot_color.css_rgba(p.alpha));
            self.draw_links(i, surface);
        }
        ControlFlow::Continue(())
    }

    // Each unordered pair is visited once, from its lower index
    fn draw_links<S: Surface + ?Sized>(&self, i: usize, surface: &mut S) {
        let p = &self.particles[i];
        for other in &self.particles[i + 1..] {
            let distance = p.distance_to(other);
            if let Some(alpha) = connection_alpha(distance, &self.config) {
                surface.stroke_line(
                    p.pos,
                    other.pos,
                    self.config.link_width,
                    &self.config.link_color.css_rgba(alpha),
                );
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}
