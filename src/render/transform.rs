use super::ScreenProjection;
use glam::{Vec2, Vec3};

pub const DEFAULT_PANEL_SCALE: f32 = 800.0;

/// Zooming out stops once the panel is this many pixels per UV unit.
pub const MIN_ZOOM_SCALE: f32 = 100.0;

// Overlay depths, far to near.
pub const PANEL_DEPTH: f32 = 0.99999;
pub const WIREFRAME_DEPTH: f32 = 0.99998;
pub const DRAG_MARKER_DEPTH: f32 = 0.99996;
pub const SCREEN_MARKER_DEPTH: f32 = 0.0001;

/// Placement of the UV panel on screen: `screen = uv * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl Default for PanelTransform {
    fn default() -> Self {
        Self {
            scale: DEFAULT_PANEL_SCALE,
            offset: Vec2::ZERO,
        }
    }
}

impl PanelTransform {
    pub fn new(scale: f32, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    pub fn panel_to_screen(&self, uv: Vec2, depth: f32) -> Vec3 {
        (uv * self.scale + self.offset).extend(depth)
    }

    pub fn screen_to_panel(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    /// Project a panel-space point into the host's overlay space.
    pub fn panel_to_world<P: ScreenProjection>(
        &self,
        projection: &P,
        uv: Vec2,
        depth: f32,
    ) -> Vec3 {
        projection.screen_to_world(self.panel_to_screen(uv, depth))
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Grow the scale by `delta` pixels, shifting the offset by half of it so
    /// the zoom stays roughly centered. Returns the delta actually applied.
    pub fn zoom(&mut self, delta: f32) -> f32 {
        let mut delta = delta;
        if delta < 0.0 {
            delta = if self.scale < MIN_ZOOM_SCALE {
                0.0
            } else {
                delta.max(MIN_ZOOM_SCALE - self.scale)
            };
        }

        self.offset -= Vec2::splat(delta * 0.5);
        self.scale += delta;
        delta
    }
}
