//! Stateless pose recomputation.
//!
//! The tumbling-cube transform, the collision ("offsetted") position, the
//! predicted landing cell, and visibility are all pure functions of player
//! state, recomputed by the owner after each mutation. The collision
//! position transforms the local origin through the same matrix the mesh
//! renders with, so visual tumbling and collision geometry cannot drift
//! apart.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::barrier::Barrier;
use crate::motion::{Player, PlayerState};
use crate::numeric::sign3;

/// Render pose of the player: committed cell translation plus the local
/// tumbling matrix.
#[derive(Clone, Copy, Debug)]
pub struct PlayerPose {
    /// Committed cell position (the falling arc folds its vertical offset in
    /// here).
    pub translation: Vec3,
    /// Local tumbling rotation around the pivot edge.
    pub local_matrix: Mat4,
}

impl PlayerPose {
    /// Full world transform for the renderer.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * self.local_matrix
    }
}

/// Local transform of a cube mid-tumble.
///
/// The cube pivots by `offset * 90°` around a horizontal edge: its base edge
/// on open floor, or the swapped, sign-flipped edge shared with the obstacle
/// for [`Barrier::Step`] and [`Barrier::Wall`]. A 90° yaw is applied last
/// when travel runs along the X axis instead of Z.
#[must_use]
pub fn moving_matrix(offset: f32, barrier: Barrier, change_axis: bool) -> Mat4 {
    debug_assert!(offset.is_finite(), "pose offset must be finite");

    let mut pivot_y = 0.5;
    let mut pivot_z = -0.5f32.copysign(offset);
    if matches!(barrier, Barrier::Step | Barrier::Wall) {
        (pivot_y, pivot_z) = (pivot_z, -pivot_y);
        if offset < 0.0 {
            pivot_y = -pivot_y;
            pivot_z = -pivot_z;
        }
    }

    let pivot = Vec3::new(0.0, pivot_y, pivot_z);
    let matrix = Mat4::from_translation(-pivot)
        * Mat4::from_rotation_x(offset * FRAC_PI_2)
        * Mat4::from_translation(pivot);

    if change_axis {
        Mat4::from_rotation_y(FRAC_PI_2) * matrix
    } else {
        matrix
    }
}

/// Collision-relevant position including in-flight sub-step displacement.
#[must_use]
pub fn offsetted_position(player: &Player) -> Vec3 {
    match player.state() {
        PlayerState::Moving => {
            if player.barrier() == Barrier::Nothing {
                let (mut dx, mut dz) = (0.0, player.inner_offset());
                if player.facing().change_axis {
                    (dx, dz) = (dz, dx);
                }
                player.position() + Vec3::new(dx, 0.0, dz)
            } else {
                let matrix = moving_matrix(
                    player.inner_offset(),
                    player.barrier(),
                    player.facing().change_axis,
                );
                player.position() + matrix.transform_point3(Vec3::ZERO)
            }
        }
        PlayerState::Falling => player.position() + Vec3::new(0.0, player.inner_offset(), 0.0),
        PlayerState::Standing => player.position(),
    }
}

/// Cell the in-flight step lands on when it completes.
///
/// Only meaningful for barriers whose step can complete; a wall press never
/// advances, so the current position is returned unchanged.
#[must_use]
pub fn next_position(player: &Player) -> Vec3 {
    if player.state() != PlayerState::Moving || player.inner_offset() == 0.0 {
        return player.position();
    }
    let (dy, forward) = match player.barrier() {
        Barrier::Nothing => (0.0, sign3(player.inner_offset())),
        Barrier::Step => (1.0, sign3(player.inner_offset())),
        Barrier::Wall | Barrier::Unsuitable | Barrier::Trap => return player.position(),
    };
    let (mut dx, mut dz) = (0.0, forward);
    if player.facing().change_axis {
        (dx, dz) = (dz, dx);
    }
    player.position() + Vec3::new(dx, dy, dz)
}

/// Render pose for the player's current state.
///
/// While falling the cube translates vertically without rotating; grounded
/// motion renders the tumbling matrix around the committed cell.
#[must_use]
pub fn derive_pose(player: &Player) -> PlayerPose {
    match player.state() {
        PlayerState::Falling => PlayerPose {
            translation: player.position() + Vec3::new(0.0, player.inner_offset(), 0.0),
            local_matrix: Mat4::IDENTITY,
        },
        PlayerState::Standing | PlayerState::Moving => PlayerPose {
            translation: player.position(),
            local_matrix: moving_matrix(
                player.inner_offset(),
                player.barrier(),
                player.facing().change_axis,
            ),
        },
    }
}

/// Whether the player should be drawn. Rendering stops once the level is
/// finished; physics does not.
#[must_use]
pub const fn derive_visibility(render_flag: bool, level_finished: bool) -> bool {
    render_flag && !level_finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn origin_through(offset: f32, barrier: Barrier, change_axis: bool) -> Vec3 {
        moving_matrix(offset, barrier, change_axis).transform_point3(Vec3::ZERO)
    }

    #[test]
    fn rest_pose_is_identity() {
        let moved = origin_through(0.0, Barrier::Nothing, false);
        assert_relative_eq!(moved.length(), 0.0, epsilon = 1e-6);
    }

    #[rstest]
    #[case::full_flat_step(1.0, Barrier::Nothing, Vec3::new(0.0, 0.0, 1.0))]
    #[case::full_flat_step_back(-1.0, Barrier::Nothing, Vec3::new(0.0, 0.0, -1.0))]
    #[case::full_climb(2.0, Barrier::Step, Vec3::new(0.0, 1.0, 1.0))]
    #[case::full_climb_back(-2.0, Barrier::Step, Vec3::new(0.0, 1.0, -1.0))]
    #[case::wall_contact(1.0, Barrier::Wall, Vec3::new(0.0, 1.0, 0.0))]
    fn tumble_arc_lands_on_the_next_cell(
        #[case] offset: f32,
        #[case] barrier: Barrier,
        #[case] expected: Vec3,
    ) {
        let moved = origin_through(offset, barrier, false);
        assert_relative_eq!(moved.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(moved.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(moved.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn axis_change_swaps_travel_onto_x() {
        let moved = origin_through(1.0, Barrier::Nothing, true);
        assert_relative_eq!(moved.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(moved.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn half_tumble_lifts_the_centre() {
        // Mid-arc the pivoting centre must sit above the resting height.
        let moved = origin_through(0.5, Barrier::Nothing, false);
        assert!(moved.y > 0.0);
        assert!(moved.z > 0.0 && moved.z < 1.0);
    }

    #[test]
    fn visibility_truth_table() {
        assert!(derive_visibility(true, false));
        assert!(!derive_visibility(true, true));
        assert!(!derive_visibility(false, false));
        assert!(!derive_visibility(false, true));
    }
}
