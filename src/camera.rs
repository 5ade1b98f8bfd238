//! Exponential-follow chase camera.
//!
//! The camera keeps goal and smoothed values for both its own position and
//! the point it looks at; each frame the smoothed values move toward the
//! goals by a speed-scaled fraction of the remaining distance. Matrix
//! derivation is independent of the motion core's correctness.

use bevy::prelude::Resource;
use glam::{Mat4, Vec3};

/// Near clip plane of the projection.
const NEAR_PLANE: f32 = 0.1;
/// Far clip plane of the projection.
const FAR_PLANE: f32 = 100.0;

/// A 3D camera that looks at a target and can move slowly.
#[derive(Resource, Clone, Debug)]
pub struct ChaseCamera {
    goal_position: Vec3,
    goal_target: Vec3,
    smoothed_position: Vec3,
    smoothed_target: Vec3,
    field_of_view: f32,
    aspect_ratio: f32,
    moving_speed: f32,
}

impl ChaseCamera {
    /// Creates a camera already settled at its goals.
    ///
    /// `moving_speed` of zero makes the camera follow instantly.
    #[must_use]
    pub const fn new(
        position: Vec3,
        target: Vec3,
        field_of_view: f32,
        aspect_ratio: f32,
        moving_speed: f32,
    ) -> Self {
        Self {
            goal_position: position,
            goal_target: target,
            smoothed_position: position,
            smoothed_target: target,
            field_of_view,
            aspect_ratio,
            moving_speed,
        }
    }

    /// Smoothed camera position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.smoothed_position
    }

    /// Smoothed look-at target.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.smoothed_target
    }

    /// Sets the position the camera moves toward.
    pub const fn set_position(&mut self, position: Vec3) {
        self.goal_position = position;
    }

    /// Sets the point the camera turns toward.
    pub const fn set_target(&mut self, target: Vec3) {
        self.goal_target = target;
    }

    /// Updates the aspect ratio, typically on window resize.
    pub const fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Advances the smoothing toward the goals.
    pub fn update(&mut self, dt: f32) {
        if self.moving_speed > 0.0 {
            let step = self.moving_speed * dt;
            self.smoothed_position += (self.goal_position - self.smoothed_position) * step;
            self.smoothed_target += (self.goal_target - self.smoothed_target) * step;
        } else {
            self.smoothed_position = self.goal_position;
            self.smoothed_target = self.goal_target;
        }
    }

    /// View matrix for shading, looking from the smoothed position at the
    /// smoothed target with +Y up.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.smoothed_position, self.smoothed_target, Vec3::Y)
    }

    /// Perspective projection matrix for shading.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.field_of_view, self.aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::new(
            Vec3::new(-8.0, 10.0, -8.0),
            Vec3::ZERO,
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            4.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_speed_follows_instantly() {
        let mut camera = ChaseCamera::new(Vec3::ZERO, Vec3::ZERO, 1.0, 1.0, 0.0);
        camera.set_position(Vec3::new(3.0, 0.0, 0.0));
        camera.set_target(Vec3::new(0.0, 0.0, 5.0));
        camera.update(1.0 / 60.0);
        assert_relative_eq!(camera.position().x, 3.0);
        assert_relative_eq!(camera.target().z, 5.0);
    }

    #[test]
    fn positive_speed_converges_exponentially() {
        let mut camera = ChaseCamera::new(Vec3::ZERO, Vec3::ZERO, 1.0, 1.0, 4.0);
        camera.set_position(Vec3::new(10.0, 0.0, 0.0));

        let mut previous_gap = 10.0;
        for _ in 0..120 {
            camera.update(1.0 / 60.0);
            let gap = (camera.position().x - 10.0).abs();
            assert!(gap < previous_gap, "camera must close the gap every frame");
            previous_gap = gap;
        }
        assert!(previous_gap < 0.5);
    }
}
