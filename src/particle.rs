// Simple particle struct to keep track of individual position, velocity,
// dot size and opacity

use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub alpha: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64, alpha: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            alpha,
        }
    }

    /// Draws every attribute uniformly from the ranges in `config`, with the
    /// position anywhere on a `width` x `height` surface.
    pub fn random<R: Rng>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let speed = config.drift_speed;
        Particle::new(
            uniform(rng, 0.0, width),
            uniform(rng, 0.0, height),
            uniform(rng, -speed, speed),
            uniform(rng, -speed, speed),
            uniform(rng, config.min_radius, config.max_radius),
            uniform(rng, config.min_alpha, config.max_alpha),
        )
    }

    // Moves one frame worth of velocity, then teleports to the opposite edge
    // if it left the surface. Wrapping, not bouncing: velocity is untouched.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.pos[0] = wrap(self.pos[0], width);
        self.pos[1] = wrap(self.pos[1], height);
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

fn wrap(coord: f64, max: f64) -> f64 {
    if coord < 0.0 {
        max
    } else if coord > max {
        0.0
    } else {
        coord
    }
}

// gen_range panics on an empty range, which a degenerate config (or a zero
// sized surface) produces
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low < high {
        rng.gen_range(low, high)
    } else {
        low
    }
}
