//! Particle simulation
//!
//! One `step()` is one 60 Hz frame. Particles are independent point
//! masses; the only interactions are the canvas edges and the pointer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Tunables for the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    /// Pointer influence radius (px)
    pub pointer_radius: f32,
    /// Push per frame is `offset / repel_divisor`
    pub repel_divisor: f32,
    /// Max distance for a connecting line (px)
    pub link_distance: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            pointer_radius: POINTER_RADIUS,
            repel_divisor: REPEL_DIVISOR,
            link_distance: LINK_DISTANCE,
        }
    }
}

/// A single background node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// px per frame
    pub vel: Vec2,
    pub size: f32,
}

impl Particle {
    fn spawn(rng: &mut Pcg32, bounds: Vec2) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
        );
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        Self {
            pos,
            vel,
            size: PARTICLE_MIN_SIZE + rng.random::<f32>() * PARTICLE_SIZE_RANGE,
        }
    }

    /// Advance one frame and bounce off the bounds.
    ///
    /// Velocity is pointed back inward rather than negated, so a particle
    /// pushed outside by the pointer returns instead of jittering on the edge.
    fn advance(&mut self, bounds: Vec2) {
        self.pos += self.vel;

        if self.pos.x < 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > bounds.x {
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y < 0.0 {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > bounds.y {
            self.vel.y = -self.vel.y.abs();
        }
    }

    fn repel(&mut self, pointer: Vec2, radius: f32, divisor: f32) {
        let offset = pointer - self.pos;
        if offset.length() < radius {
            self.pos -= offset / divisor;
        }
    }
}

/// A connecting line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

/// The whole background simulation
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    pointer: Option<Vec2>,
    config: ParticleConfig,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, width: f32, height: f32, seed: u64) -> Self {
        let bounds = Vec2::new(width.max(0.0), height.max(0.0));
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..config.count)
            .map(|_| Particle::spawn(&mut rng, bounds))
            .collect();

        Self {
            particles,
            bounds,
            pointer: None,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Canvas resized; particles outside drift back in on their own
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Simulate one frame
    pub fn step(&mut self) {
        let bounds = self.bounds;
        let pointer = self.pointer;
        let ParticleConfig {
            pointer_radius,
            repel_divisor,
            ..
        } = self.config;

        for p in &mut self.particles {
            p.advance(bounds);
            if let Some(pointer) = pointer {
                p.repel(pointer, pointer_radius, repel_divisor);
            }
        }
    }

    /// Pairs closer than `link_distance`, opacity fading linearly to zero
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max = self.config.link_distance;
        self.particles.iter().enumerate().flat_map(move |(a, pa)| {
            self.particles[a + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, pb)| {
                    let distance = pa.pos.distance(pb.pos);
                    (distance < max).then(|| Link {
                        a,
                        b: a + 1 + offset,
                        opacity: (1.0 - distance / max) * LINK_MAX_OPACITY,
                    })
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field_with(particles: Vec<Particle>, w: f32, h: f32) -> ParticleField {
        let mut field = ParticleField::new(
            ParticleConfig {
                count: 0,
                ..Default::default()
            },
            w,
            h,
            0,
        );
        field.particles = particles;
        field
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 1.0,
        }
    }

    #[test]
    fn test_spawn_within_ranges() {
        let field = ParticleField::new(ParticleConfig::default(), 800.0, 600.0, 42);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for p in field.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 600.0);
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(p.vel.x.abs() <= PARTICLE_MAX_SPEED);
            assert!(p.vel.y.abs() <= PARTICLE_MAX_SPEED);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::new(ParticleConfig::default(), 640.0, 480.0, 7);
        let b = ParticleField::new(ParticleConfig::default(), 640.0, 480.0, 7);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_moves_by_velocity() {
        let mut field = field_with(
            vec![Particle {
                pos: Vec2::new(10.0, 10.0),
                vel: Vec2::new(0.5, -0.25),
                size: 1.0,
            }],
            100.0,
            100.0,
        );
        field.step();
        assert_eq!(field.particles()[0].pos, Vec2::new(10.5, 9.75));
    }

    #[test]
    fn test_bounces_off_edges() {
        let mut field = field_with(
            vec![
                Particle {
                    pos: Vec2::new(99.9, 50.0),
                    vel: Vec2::new(0.25, 0.0),
                    size: 1.0,
                },
                Particle {
                    pos: Vec2::new(50.0, 0.1),
                    vel: Vec2::new(0.0, -0.25),
                    size: 1.0,
                },
            ],
            100.0,
            100.0,
        );
        field.step();
        assert!(field.particles()[0].vel.x < 0.0);
        assert!(field.particles()[1].vel.y > 0.0);
    }

    #[test]
    fn test_outside_particle_heads_back_in() {
        // Pushed far outside: velocity must keep pointing inward
        let mut field = field_with(
            vec![Particle {
                pos: Vec2::new(-20.0, 50.0),
                vel: Vec2::new(-0.25, 0.0),
                size: 1.0,
            }],
            100.0,
            100.0,
        );
        for _ in 0..3 {
            field.step();
            assert!(field.particles()[0].vel.x > 0.0);
        }
    }

    #[test]
    fn test_pointer_repels() {
        let mut field = field_with(vec![still(100.0, 100.0)], 400.0, 400.0);
        field.set_pointer(130.0, 100.0);
        field.step();
        // Pushed left by 30/150
        assert!((field.particles()[0].pos.x - 99.8).abs() < 1e-4);
        assert_eq!(field.particles()[0].pos.y, 100.0);
    }

    #[test]
    fn test_pointer_out_of_range() {
        let mut field = field_with(vec![still(100.0, 100.0)], 400.0, 400.0);
        field.set_pointer(300.0, 100.0);
        field.step();
        assert_eq!(field.particles()[0].pos, Vec2::new(100.0, 100.0));

        field.set_pointer(101.0, 100.0);
        field.clear_pointer();
        field.step();
        assert_eq!(field.particles()[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_links() {
        let field = field_with(
            vec![still(0.0, 0.0), still(75.0, 0.0), still(300.0, 0.0)],
            400.0,
            400.0,
        );
        let links: Vec<Link> = field.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].opacity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_link_opacity_falls_with_distance() {
        // Each partner sits at a growing distance from the origin node
        let field = field_with(
            vec![
                still(0.0, 0.0),
                still(10.0, 1000.0),
                still(-1000.0, 0.0),
                still(0.0, 40.0),
                still(90.0, 0.0),
                still(0.0, -149.0),
                still(-150.0, -150.0),
            ],
            2000.0,
            2000.0,
        );
        let from_origin: Vec<Link> = field.links().filter(|l| l.a == 0).collect();
        let partners: Vec<usize> = from_origin.iter().map(|l| l.b).collect();
        assert_eq!(partners, vec![3, 4, 5]);
        assert!(from_origin.windows(2).all(|w| w[0].opacity > w[1].opacity));
        assert!(from_origin.iter().all(|l| l.opacity > 0.0));
    }

    #[test]
    fn test_link_cutoff_is_exclusive() {
        let field = field_with(vec![still(0.0, 0.0), still(LINK_DISTANCE, 0.0)], 400.0, 400.0);
        assert_eq!(field.links().count(), 0);

        let field = field_with(vec![still(0.0, 0.0), still(LINK_DISTANCE - 0.5, 0.0)], 400.0, 400.0);
        assert_eq!(field.links().count(), 1);
    }

    #[test]
    fn test_links_skip_self_and_duplicates() {
        let field = field_with(vec![still(0.0, 0.0), still(1.0, 0.0)], 10.0, 10.0);
        assert_eq!(field.links().count(), 1);
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut field = ParticleField::new(ParticleConfig::default(), 800.0, 600.0, 1);
        let before = field.particles().to_vec();
        field.resize(400.0, 300.0);
        assert_eq!(field.bounds(), Vec2::new(400.0, 300.0));
        assert_eq!(field.particles(), &before[..]);
    }

    proptest! {
        #[test]
        fn prop_link_opacity_in_range(seed in any::<u64>()) {
            let field = ParticleField::new(ParticleConfig::default(), 300.0, 300.0, seed);
            for link in field.links() {
                prop_assert!(link.a < link.b);
                prop_assert!(link.opacity > 0.0 && link.opacity <= LINK_MAX_OPACITY);
            }
        }

        #[test]
        fn prop_particles_stay_near_bounds(seed in any::<u64>(), frames in 1usize..600) {
            let mut field = ParticleField::new(ParticleConfig::default(), 320.0, 240.0, seed);
            for _ in 0..frames {
                field.step();
            }
            let slack = PARTICLE_MAX_SPEED * 2.0;
            for p in field.particles() {
                prop_assert!(p.pos.x >= -slack && p.pos.x <= 320.0 + slack);
                prop_assert!(p.pos.y >= -slack && p.pos.y <= 240.0 + slack);
            }
        }
    }
}
