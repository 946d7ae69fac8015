use super::ScreenProjection;
use glam::{Mat4, Vec3};

/// Screen projection of a fixed orthographic camera, used when no host
/// scene is available.
#[derive(Debug, Clone, Copy)]
pub struct OrthoViewport {
    width: f32,
    height: f32,
    view_projection: Mat4,
    inverse: Mat4,
}

impl OrthoViewport {
    pub fn new(width: u32, height: u32, view_projection: Mat4) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            view_projection,
            inverse: view_projection.inverse(),
        }
    }

    /// Camera on +Z looking at the origin, `zoom` world units from the
    /// center to the top edge of the screen.
    pub fn looking_down_z(width: u32, height: u32, zoom: f32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let projection =
            Mat4::orthographic_rh_gl(-aspect * zoom, aspect * zoom, -zoom, zoom, 0.0, 10.0);
        Self::new(width, height, projection * view)
    }

    pub fn world_to_screen(&self, world: Vec3) -> Vec3 {
        let ndc = self.view_projection.project_point3(world);
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
            (ndc.z + 1.0) * 0.5,
        )
    }
}

impl ScreenProjection for OrthoViewport {
    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let ndc = Vec3::new(
            screen.x / self.width * 2.0 - 1.0,
            1.0 - screen.y / self.height * 2.0,
            screen.z * 2.0 - 1.0,
        );
        self.inverse.project_point3(ndc)
    }
}
