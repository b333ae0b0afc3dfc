// Drives the field through its public API over many frames.

use particle_field::{connection_alpha, particle_count, FieldConfig, ParticleField, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;

#[derive(Default)]
struct Counting {
    width: u32,
    height: u32,
    clears: usize,
    dots: usize,
    lines: Vec<([f64; 2], [f64; 2], String)>,
}

impl Surface for Counting {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.dots = 0;
        self.lines.clear();
    }

    fn fill_circle(&mut self, _center: [f64; 2], _radius: f64, _style: &str) {
        self.dots += 1;
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], _width: f64, style: &str) {
        self.lines.push((from, to, style.to_owned()));
    }
}

fn surface(width: u32, height: u32) -> Counting {
    Counting {
        width,
        height,
        ..Counting::default()
    }
}

#[test]
fn frames_draw_one_dot_per_particle() {
    let mut field = ParticleField::new(1280, 720, StdRng::seed_from_u64(9));
    let mut canvas = surface(1280, 720);
    for frame in 1..=200 {
        assert_eq!(field.tick(&mut canvas), ControlFlow::Continue(()));
        assert_eq!(canvas.clears, frame);
        assert_eq!(canvas.dots, field.particles().len());
    }
    assert_eq!(field.particles().len(), 61);
}

#[test]
fn line_styles_match_link_opacity() {
    let config = FieldConfig::default();
    let mut field = ParticleField::new(800, 600, StdRng::seed_from_u64(11));
    let mut canvas = surface(800, 600);
    let mut seen = 0;
    for _ in 0..100 {
        field.tick(&mut canvas);
        for (from, to, style) in &canvas.lines {
            let (dx, dy) = (from[0] - to[0], from[1] - to[1]);
            let d = (dx * dx + dy * dy).sqrt();
            let alpha = connection_alpha(d, &config).expect("linked pair out of range");
            assert_eq!(style, &format!("rgba(124, 58, 237, {})", alpha));
            seen += 1;
        }
    }
    assert!(seen > 0);
}

#[test]
fn resize_tracks_window_changes() {
    let config = FieldConfig::default();
    let mut field = ParticleField::new(1920, 1080, StdRng::seed_from_u64(5));
    let sizes = [(400, 375), (100, 100), (0, 0), (1024, 768), (1024, 768), (3840, 2160)];
    for &(width, height) in sizes.iter() {
        field.resize(width, height);
        assert_eq!(field.particles().len(), particle_count(width, height, &config));

        let mut canvas = surface(width, height);
        for _ in 0..10 {
            field.tick(&mut canvas);
        }
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= width as f64);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= height as f64);
        }
    }
}

#[test]
fn options_from_json_shape_the_field() {
    let config = FieldConfig::from_json(r#"{"maxParticles": 12, "driftSpeed": 1.5}"#).unwrap();
    let field = ParticleField::with_config(1920, 1080, StdRng::seed_from_u64(2), config);
    assert_eq!(field.particles().len(), 12);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.vel[0].abs() <= 1.5 && p.vel[1].abs() <= 1.5));
}
