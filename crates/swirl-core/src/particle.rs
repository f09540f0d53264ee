use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg64;
use swirl_platform::{DrawSurface, Rgba};

use crate::TrailConfig;

/// One point on the fading trail.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames lived so far.
    pub age: u32,
    /// Frames until fully faded; fixed at spawn, never mutated.
    pub max_age: f32,
}

impl Particle {
    /// Spawn a trail point for one pointer-motion event. `delta` and `angle`
    /// describe the whole event's displacement, not this point's share of
    /// it: every particle from the same stroke draws from the same velocity
    /// distribution.
    pub fn spawn(
        pos: Vec2,
        delta: Vec2,
        angle: f32,
        config: &TrailConfig,
        rng: &mut Pcg64,
    ) -> Self {
        let mut vel = delta * config.swirl_intensity;
        // Sideways kick with random sign and magnitude. This is what fans
        // the stroke out into a swirl instead of a straight smear.
        let perpendicular = angle + FRAC_PI_2;
        let kick = (rng.gen::<f32>() - 0.5) * config.swirl_kick;
        vel += Vec2::new(perpendicular.cos(), perpendicular.sin()) * kick;

        Self {
            pos,
            vel,
            age: 0,
            max_age: config.lifespan_frames + rng.gen::<f32>() * config.lifespan_jitter,
        }
    }

    /// Advance one frame: exponential velocity decay, then explicit Euler.
    pub fn update(&mut self, damping: f32) {
        self.vel *= damping;
        self.pos += self.vel;
        self.age += 1;
    }

    /// Normalized age. Can sit just above 1.0 for the one frame before the
    /// simulator culls this particle.
    pub fn age_frac(&self) -> f32 {
        self.age as f32 / self.max_age
    }

    pub fn expired(&self) -> bool {
        self.age as f32 > self.max_age
    }

    /// Stamp this point as a single translucent dot. Each particle is an
    /// independent dot, never a segment of a polyline; fully faded ones
    /// draw nothing at all.
    pub fn draw(&self, surface: &mut dyn DrawSurface, config: &TrailConfig) {
        let f = self.age_frac();
        let opacity = 1.0 - f;
        if opacity <= 0.0 {
            return;
        }
        let color = config.color_start.lerp(config.color_end, f);
        surface.fill_circle(
            self.pos.x,
            self.pos.y,
            config.line_width * 0.5,
            Rgba::new(color.x, color.y, color.z, opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(42)
    }

    #[derive(Default)]
    struct RecordingSurface {
        dots: Vec<(f32, f32, f32, Rgba)>,
    }

    impl DrawSurface for RecordingSurface {
        fn width(&self) -> u32 {
            800
        }
        fn height(&self) -> u32 {
            600
        }
        fn clear(&mut self) {
            self.dots.clear();
        }
        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
            self.dots.push((x, y, radius, color));
        }
    }

    #[test]
    fn spawn_composes_stroke_velocity_and_sideways_kick() {
        let config = TrailConfig::default();
        let mut rng = rng();
        // Horizontal stroke: the perpendicular is vertical, so x velocity is
        // the scaled stroke share and y velocity is pure kick.
        let delta = Vec2::new(100.0, 0.0);
        for _ in 0..32 {
            let p = Particle::spawn(Vec2::ZERO, delta, 0.0, &config, &mut rng);
            assert!((p.vel.x - 100.0 * config.swirl_intensity).abs() < 1e-3);
            assert!(p.vel.y.abs() <= config.swirl_kick / 2.0);
            assert_eq!(p.age, 0);
        }
    }

    #[test]
    fn max_age_is_lifespan_plus_bounded_jitter() {
        let config = TrailConfig::default();
        let mut rng = rng();
        for _ in 0..64 {
            let p = Particle::spawn(Vec2::ZERO, Vec2::X, 0.0, &config, &mut rng);
            assert!(p.max_age >= config.lifespan_frames);
            assert!(p.max_age < config.lifespan_frames + config.lifespan_jitter);
        }
    }

    #[test]
    fn update_damps_before_integrating() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, -10.0),
            age: 0,
            max_age: 60.0,
        };
        p.update(0.9);
        assert!((p.vel.x - 9.0).abs() < 1e-6);
        assert!((p.pos.x - 9.0).abs() < 1e-6);
        assert!((p.pos.y + 9.0).abs() < 1e-6);
        assert_eq!(p.age, 1);
    }

    #[test]
    fn opacity_strictly_decreases_with_age() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age: 0,
            max_age: 60.0,
        };
        let mut previous = 1.0 - p.age_frac();
        for _ in 0..60 {
            p.update(0.9);
            let opacity = 1.0 - p.age_frac();
            assert!(opacity < previous);
            previous = opacity;
        }
        assert!(previous <= 0.0);
        assert!(!p.expired());
        p.update(0.9);
        assert!(p.expired());
    }

    #[test]
    fn draw_lerps_color_and_fades() {
        let config = TrailConfig::default();
        let mut surface = RecordingSurface::default();

        let fresh = Particle {
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::ZERO,
            age: 0,
            max_age: 60.0,
        };
        fresh.draw(&mut surface, &config);
        let (x, y, radius, color) = surface.dots[0];
        assert_eq!((x, y), (10.0, 20.0));
        assert!((radius - config.line_width / 2.0).abs() < 1e-6);
        assert!((color.r - config.color_start.x).abs() < 1e-6);
        assert!((color.a - 1.0).abs() < 1e-6);

        let midway = Particle { age: 30, ..fresh };
        midway.draw(&mut surface, &config);
        let (_, _, _, color) = surface.dots[1];
        let expected = (config.color_start + config.color_end) / 2.0;
        assert!((color.g - expected.y).abs() < 1e-6);
        assert!((color.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fully_faded_particles_draw_nothing() {
        let config = TrailConfig::default();
        let mut surface = RecordingSurface::default();
        let spent = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age: 60,
            max_age: 60.0,
        };
        spent.draw(&mut surface, &config);
        assert!(surface.dots.is_empty());
    }
}
