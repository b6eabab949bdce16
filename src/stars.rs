//! Background star field.
//!
//! A fixed backdrop of small white disks scattered uniformly over the
//! canvas. It does not pan or zoom with the bodies.

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest star diameter in pixels (exclusive).
pub const MAX_STAR_DIAMETER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: DVec2,
    pub diameter: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarField {
    stars: Vec<Star>,
    size: DVec2,
}

impl StarField {
    /// Scatter `count` stars over a canvas of `size` pixels.
    ///
    /// The same seed always yields the same field.
    pub fn generate(count: usize, size: DVec2, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                position: DVec2::new(rng.gen::<f64>() * size.x, rng.gen::<f64>() * size.y),
                diameter: rng.gen::<f64>() * MAX_STAR_DIAMETER,
            })
            .collect();

        Self { stars, size }
    }

    /// Scatter stars with a seed taken from the clock.
    pub fn random(count: usize, size: DVec2) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::generate(count, size, seed)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Canvas size the field was generated for.
    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_inside_canvas() {
        let size = DVec2::new(640.0, 480.0);
        let field = StarField::generate(500, size, 7);

        assert_eq!(field.len(), 500);
        for star in field.stars() {
            assert!(star.position.x >= 0.0 && star.position.x < size.x);
            assert!(star.position.y >= 0.0 && star.position.y < size.y);
            assert!(star.diameter >= 0.0 && star.diameter < MAX_STAR_DIAMETER);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let size = DVec2::new(100.0, 100.0);
        assert_eq!(StarField::generate(50, size, 3), StarField::generate(50, size, 3));
        assert_ne!(StarField::generate(50, size, 3), StarField::generate(50, size, 4));
    }

    #[test]
    fn test_empty_field() {
        let field = StarField::generate(0, DVec2::new(10.0, 10.0), 1);
        assert!(field.is_empty());
    }
}
