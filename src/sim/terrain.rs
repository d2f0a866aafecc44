//! Terrain height field
//!
//! The planetary surface is a piecewise-linear line through jittered samples
//! taken every `TERRAIN_SPACING` world units. Larger Y is lower on screen, so
//! "height" here is the Y coordinate of the ground line.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A sampled terrain profile covering the whole world width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    /// Distance between consecutive samples
    spacing: f32,
    /// Ground Y at x = i * spacing
    samples: Vec<f32>,
}

impl Terrain {
    /// Generate jittered terrain from a seed
    pub fn generate(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        // One sample past the world edge so the last segment spans x = W
        let count = (WORLD_WIDTH / TERRAIN_SPACING).ceil() as usize + 2;
        let samples = (0..count)
            .map(|_| GROUND_LEVEL + rng.random_range(-TERRAIN_JITTER..=TERRAIN_JITTER) as f32)
            .collect();
        Self {
            spacing: TERRAIN_SPACING,
            samples,
        }
    }

    /// Level ground at the given height (used by tests)
    pub fn flat(height: f32) -> Self {
        let count = (WORLD_WIDTH / TERRAIN_SPACING).ceil() as usize + 2;
        Self {
            spacing: TERRAIN_SPACING,
            samples: vec![height; count],
        }
    }

    /// Ground Y at world X, interpolated between samples and clamped at the edges
    pub fn height_at(&self, x: f32) -> f32 {
        let (Some(&first), Some(&last)) = (self.samples.first(), self.samples.last()) else {
            return GROUND_LEVEL;
        };
        if x.is_nan() || x <= 0.0 {
            return first;
        }

        // Checked before the cast so huge or infinite X cannot overflow the index
        let pos = x / self.spacing;
        if pos >= (self.samples.len() - 1) as f32 {
            return last;
        }

        let i = pos.floor() as usize;
        let t = pos - i as f32;
        let (y0, y1) = (self.samples[i], self.samples[i + 1]);
        y0 + (y1 - y0) * t
    }

    /// Sample points as (world X, ground Y) pairs for drawing the surface
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f32 * self.spacing, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = Terrain::generate(42);
        let b = Terrain::generate(42);
        assert_eq!(a.samples, b.samples);

        let c = Terrain::generate(43);
        assert_ne!(a.samples, c.samples);
    }

    #[test]
    fn test_samples_within_jitter() {
        let terrain = Terrain::generate(7);
        for (_, y) in terrain.points() {
            assert!(y >= GROUND_LEVEL - TERRAIN_JITTER as f32);
            assert!(y <= GROUND_LEVEL + TERRAIN_JITTER as f32);
        }
        let (last_x, _) = terrain.points().last().unwrap();
        assert!(last_x >= WORLD_WIDTH);
    }

    #[test]
    fn test_interpolation() {
        let terrain = Terrain {
            spacing: 60.0,
            samples: vec![500.0, 560.0, 530.0],
        };
        assert_eq!(terrain.height_at(0.0), 500.0);
        assert_eq!(terrain.height_at(30.0), 530.0);
        assert_eq!(terrain.height_at(60.0), 560.0);
        assert_eq!(terrain.height_at(90.0), 545.0);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let terrain = Terrain {
            spacing: 60.0,
            samples: vec![500.0, 560.0, 530.0],
        };
        assert_eq!(terrain.height_at(-100.0), 500.0);
        assert_eq!(terrain.height_at(120.0), 530.0);
        assert_eq!(terrain.height_at(10_000.0), 530.0);
        assert_eq!(terrain.height_at(f32::NAN), 500.0);
        assert_eq!(terrain.height_at(f32::NEG_INFINITY), 500.0);
        assert_eq!(terrain.height_at(1.0e30), 530.0);
        assert_eq!(terrain.height_at(f32::INFINITY), 530.0);
        assert_eq!(terrain.height_at(f32::MAX), 530.0);
    }

    #[test]
    fn test_flat() {
        let terrain = Terrain::flat(520.0);
        assert_eq!(terrain.height_at(0.0), 520.0);
        assert_eq!(terrain.height_at(1234.5), 520.0);
        assert_eq!(terrain.height_at(WORLD_WIDTH), 520.0);
    }
}
