//! View math for presentation adapters.

use glam::{IVec2, UVec2, Vec2};

use crate::entity::VisualEntity;

/// Viewpoint centred on a world position, usually the player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    /// World point shown in the middle of the surface.
    pub center: Vec2,
}

impl Camera {
    /// Creates a camera looking at `center`.
    #[must_use]
    pub const fn new(center: Vec2) -> Self {
        Self { center }
    }

    /// Converts a pixel on a surface of `surface_size` into world space.
    #[must_use]
    pub fn world_from_screen(&self, surface_size: UVec2, point: IVec2) -> Vec2 {
        self.center - surface_size.as_vec2() / 2.0 + point.as_vec2()
    }

    /// Reports whether any part of an actor's frame is on screen.
    #[must_use]
    pub fn can_see(&self, surface_size: UVec2, position: Vec2, visuals: &VisualEntity) -> bool {
        let view_min = self.world_from_screen(surface_size, IVec2::ZERO);
        let view_max = view_min + surface_size.as_vec2();
        let frame_min = visuals.top_left(position);
        let frame_max = frame_min + visuals.sprite_size.as_vec2();
        view_min.x < frame_max.x
            && frame_min.x < view_max.x
            && view_min.y < frame_max.y
            && frame_min.y < view_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::SpriteSheetId;

    #[test]
    fn screen_origin_is_half_a_surface_from_center() {
        let camera = Camera::new(Vec2::new(500.0, 400.0));
        let size = UVec2::new(1200, 800);
        assert_eq!(camera.world_from_screen(size, IVec2::ZERO), Vec2::new(-100.0, 0.0));
        assert_eq!(
            camera.world_from_screen(size, IVec2::new(600, 400)),
            Vec2::new(500.0, 400.0)
        );
    }

    #[test]
    fn frames_touching_the_edge_are_hidden() {
        let camera = Camera::new(Vec2::new(50.0, 50.0));
        let size = UVec2::new(100, 100);
        let visuals = VisualEntity::new(SpriteSheetId::new(0), UVec2::new(10, 10), 0);

        assert!(camera.can_see(size, Vec2::new(50.0, 50.0), &visuals));
        assert!(camera.can_see(size, Vec2::new(104.0, 50.0), &visuals));
        assert!(!camera.can_see(size, Vec2::new(105.0, 50.0), &visuals));
        assert!(!camera.can_see(size, Vec2::new(50.0, -1.0), &visuals));
    }
}
