//! Scrolling viewport and scanner (radar) mapping
//!
//! The camera only scrolls horizontally; world Y is already screen Y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal scrolling camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World X of the left screen edge
    pub x: f32,
}

impl Camera {
    /// Camera with `focus_x` in the middle of the screen
    pub fn centered_on(focus_x: f32) -> Self {
        Self {
            x: Self::clamp_x(focus_x - SCREEN_WIDTH / 2.0),
        }
    }

    /// Ease toward centring `focus_x`, staying inside the world
    pub fn follow(&mut self, focus_x: f32) {
        let target = focus_x - SCREEN_WIDTH / 2.0;
        self.x = Self::clamp_x(self.x + (target - self.x) * CAMERA_LERP);
    }

    fn clamp_x(x: f32) -> f32 {
        x.clamp(0.0, WORLD_WIDTH - SCREEN_WIDTH)
    }

    pub fn world_to_screen(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x - self.x, pos.y)
    }

    /// Whether world X is within the screen widened by `margin` on each side
    pub fn is_on_screen(&self, x: f32, margin: f32) -> bool {
        x > self.x - margin && x < self.x + SCREEN_WIDTH + margin
    }

    /// World X at the middle of the screen
    pub fn center_x(&self) -> f32 {
        self.x + SCREEN_WIDTH / 2.0
    }
}

/// Scanner strip geometry (screen pixels)
pub mod scanner {
    use super::*;

    pub const TOP: f32 = 10.0;
    pub const BOTTOM: f32 = 45.0;

    /// Horizontal scale from world to scanner
    pub fn scale() -> f32 {
        SCREEN_WIDTH / WORLD_WIDTH
    }

    /// Scanner position for a flying object
    pub fn map(pos: Vec2) -> Vec2 {
        let y = TOP + (pos.y - SCANNER_BOTTOM) / PLAYABLE_HEIGHT * (BOTTOM - TOP);
        Vec2::new(pos.x * scale(), y.clamp(TOP, BOTTOM))
    }

    /// Scanner position for a humanoid (always drawn on the bottom line)
    pub fn map_ground(x: f32) -> Vec2 {
        Vec2::new(x * scale(), BOTTOM)
    }

    /// Scanner X and width of the visible window
    pub fn view_window(camera: &Camera) -> (f32, f32) {
        (camera.x * scale(), SCREEN_WIDTH * scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_clamps_to_world() {
        assert_eq!(Camera::centered_on(WORLD_WIDTH / 2.0).x, WORLD_WIDTH / 2.0 - 400.0);
        assert_eq!(Camera::centered_on(10.0).x, 0.0);
        assert_eq!(Camera::centered_on(WORLD_WIDTH).x, WORLD_WIDTH - SCREEN_WIDTH);
    }

    #[test]
    fn test_follow_eases() {
        let mut camera = Camera { x: 1000.0 };
        camera.follow(1600.0); // target 1200
        assert!((camera.x - 1020.0).abs() < 1e-3);
        for _ in 0..200 {
            camera.follow(1600.0);
        }
        assert!((camera.x - 1200.0).abs() < 0.1);
    }

    #[test]
    fn test_on_screen() {
        let camera = Camera { x: 1000.0 };
        assert!(!camera.is_on_screen(1000.0, 0.0));
        assert!(camera.is_on_screen(1001.0, 0.0));
        assert!(camera.is_on_screen(960.0, BOMB_MARGIN));
        assert!(!camera.is_on_screen(940.0, BOMB_MARGIN));
        assert!(camera.is_on_screen(1840.0, BOMB_MARGIN));
        assert!(!camera.is_on_screen(1860.0, BOMB_MARGIN));
        assert_eq!(camera.world_to_screen(Vec2::new(1100.0, 42.0)), Vec2::new(100.0, 42.0));
    }

    #[test]
    fn test_scanner_mapping() {
        let top = scanner::map(Vec2::new(0.0, SCANNER_BOTTOM));
        assert_eq!(top, Vec2::new(0.0, scanner::TOP));
        let low = scanner::map(Vec2::new(WORLD_WIDTH, 10_000.0));
        assert_eq!(low, Vec2::new(SCREEN_WIDTH, scanner::BOTTOM));
        assert_eq!(scanner::map_ground(1600.0), Vec2::new(400.0, scanner::BOTTOM));

        let (start, width) = scanner::view_window(&Camera { x: 400.0 });
        assert_eq!(start, 100.0);
        assert_eq!(width, 200.0);
    }
}
