//! Twinkling background stars
//!
//! Purely cosmetic. Generated from its own seeded stream so adding or
//! removing stars never changes gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use crate::consts::*;

pub const STAR_COUNT: usize = 150;
const STAR_MIN_Y: f32 = 50.0;
const STAR_MAX_Y: f32 = SCREEN_HEIGHT - 100.0;
/// Stars this far past a screen edge are still drawn
const STAR_MARGIN: f32 = 5.0;
const MIN_BRIGHTNESS: u8 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Phase advance per millisecond
    pub twinkle_speed: f32,
    pub twinkle_offset: f32,
}

impl Star {
    /// Grey level at a point in time
    pub fn brightness(&self, time_ticks: u64) -> u8 {
        let ms = time_ticks as f32 * 1000.0 / TICKS_PER_SECOND as f32;
        let level = 128.0 + 127.0 * (ms * self.twinkle_speed + self.twinkle_offset).sin();
        level.clamp(MIN_BRIGHTNESS as f32, 255.0) as u8
    }
}

/// A star as seen this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarView {
    pub screen: Vec2,
    pub brightness: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.rotate_left(17) ^ 0x5851_F42D_4C95_7F2D);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=WORLD_WIDTH),
                    rng.random_range(STAR_MIN_Y..=STAR_MAX_Y),
                ),
                twinkle_speed: rng.random_range(0.02..0.05),
                twinkle_offset: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self { stars }
    }

    /// Stars inside the view (plus a small margin) with their current brightness
    pub fn visible(&self, camera: &Camera, time_ticks: u64) -> Vec<StarView> {
        self.stars
            .iter()
            .filter_map(|star| {
                let screen = camera.world_to_screen(star.pos);
                (screen.x >= -STAR_MARGIN && screen.x <= SCREEN_WIDTH + STAR_MARGIN).then(|| {
                    StarView {
                        screen,
                        brightness: star.brightness(time_ticks),
                    }
                })
            })
            .collect()
    }
}
