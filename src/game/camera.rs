//! Camera and Viewport
//!
//! Side-scrolling follow camera, parallax layer offsets and on-screen
//! culling. World coordinates stay canonical; screen coordinates exist
//! only in the values returned here.
//!
//! The camera is derived from the player position every frame and never
//! accumulated.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;

/// One background layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub name: String,
    /// 0.0 = fixed to the screen, 1.0 = moves with the world.
    pub scroll_factor: f32,
}

/// Camera tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Where the player sits across the viewport (1/3 from the left).
    pub lead_fraction: f32,
    /// Extra pixels on either side still counted as on-screen.
    pub cull_margin: f32,
    pub layers: Vec<ParallaxLayer>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lead_fraction: 1.0 / 3.0,
            cull_margin: 50.0,
            layers: vec![
                ParallaxLayer { name: "clouds".into(), scroll_factor: 0.3 },
                ParallaxLayer { name: "mountains".into(), scroll_factor: 0.2 },
            ],
        }
    }
}

/// Horizontal scroll state for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Left edge of the viewport in world space
    pub x: f32,
    pub viewport_width: f32,
}

impl Camera {
    /// Camera following `focus_x` across a level of `level_width`.
    ///
    /// Always within `[0, level_width - viewport_width]`; a level narrower
    /// than the viewport pins the camera at 0.
    pub fn follow(focus_x: f32, viewport_width: f32, level_width: f32, config: &CameraConfig) -> Self {
        let max_x = (level_width - viewport_width).max(0.0);
        let target = focus_x - viewport_width * config.lead_fraction;
        let x = if target.is_nan() { 0.0 } else { target.clamp(0.0, max_x) };
        Self { x, viewport_width }
    }

    /// World x to screen x.
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.x
    }

    /// Box moved into screen space.
    #[inline]
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        Rect::new(self.to_screen_x(rect.x), rect.y, rect.w, rect.h)
    }

    /// Whether a box should be drawn, using the configured cull margin.
    #[inline]
    pub fn is_visible(&self, rect: &Rect, config: &CameraConfig) -> bool {
        self.is_visible_within(rect, config.cull_margin)
    }

    /// Whether any part of a box falls within the viewport (plus margin).
    pub fn is_visible_within(&self, rect: &Rect, margin: f32) -> bool {
        let left = self.to_screen_x(rect.x);
        left + rect.w > -margin && left < self.viewport_width + margin
    }

    /// Horizontal offset of a background layer.
    #[inline]
    pub fn parallax_offset(&self, scroll_factor: f32) -> f32 {
        self.x * scroll_factor
    }

    /// Offsets for every configured layer, in order.
    pub fn layer_offsets(&self, config: &CameraConfig) -> Vec<(String, f32)> {
        config
            .layers
            .iter()
            .map(|layer| (layer.name.clone(), self.parallax_offset(layer.scroll_factor)))
            .collect()
    }
}
