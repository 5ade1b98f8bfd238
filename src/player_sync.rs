//! Systems wiring the motion core into a Bevy app.
//!
//! This module provides a [`PlayerPlugin`] that runs the frame-stepped
//! simulation: a cache system rebuilds the [`Level`] occupancy from ECS
//! [`Block`] components, a step system feeds the per-frame input latch and
//! the frame delta into each [`Player`], and an apply system writes the
//! derived pose back to `Transform` and retargets the chase camera. The
//! systems are chained, so the core's single-writer assumption holds.

use bevy::prelude::*;

use crate::camera::ChaseCamera;
use crate::level::{Block, Level};
use crate::motion::Player;
use crate::pose;

/// Camera offset from the player, chosen to look down the travel axes.
const CAMERA_SHOULDER: Vec3 = Vec3::new(-6.0, 8.0, -6.0);

/// One frame of movement intent.
#[derive(Clone, Copy, Debug)]
pub struct Steer {
    /// Travel backward along the current axis.
    pub reversed: bool,
    /// Travel along X instead of Z.
    pub change_axis: bool,
}

/// Per-frame movement intent latch.
///
/// Written by the input layer (or by tests), consumed exactly once by
/// [`step_player_system`]; anything left unread does not persist across
/// frames.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct MoveIntent {
    intent: Option<Steer>,
}

impl MoveIntent {
    /// Latches intent for this frame.
    pub const fn set(&mut self, reversed: bool, change_axis: bool) {
        self.intent = Some(Steer {
            reversed,
            change_axis,
        });
    }

    /// Takes the latched intent, leaving the latch empty.
    pub const fn take(&mut self) -> Option<Steer> {
        self.intent.take()
    }
}

/// Bevy plugin that runs the tumbling-cube simulation.
///
/// Inserts the [`Level`], [`MoveIntent`], and [`ChaseCamera`] resources and
/// registers the chained cache/step/apply systems on `Update`.
#[derive(Default)]
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Level>()
            .init_resource::<MoveIntent>()
            .init_resource::<ChaseCamera>()
            .add_systems(
                Update,
                (cache_level_system, step_player_system, apply_pose_system).chain(),
            );

        #[cfg(feature = "render")]
        app.add_systems(
            Update,
            (
                keyboard_intent_system.before(step_player_system),
                apply_visibility_system.after(apply_pose_system),
            ),
        );
    }
}

/// Rebuilds the level occupancy from [`Block`] components.
// TODO: rebuild only when the block set changed; levels are static between
// edits, so the per-frame rebuild is wasted work.
pub fn cache_level_system(mut level: ResMut<Level>, blocks: Query<&Block>) {
    level.clear_blocks();
    for block in &blocks {
        level.add_block(*block);
    }
}

/// Applies the frame's input latch and advances every player by `dt`.
pub fn step_player_system(
    time: Res<Time>,
    level: Res<Level>,
    mut intent: ResMut<MoveIntent>,
    mut players: Query<&mut Player>,
) {
    let steer = intent.take();
    for mut player in &mut players {
        if let Some(steer) = steer {
            player.steer(steer.reversed, steer.change_axis);
        }
        player.update(time.delta_secs(), &*level);
    }
}

/// Writes the derived pose into each player's `Transform` and follows it
/// with the chase camera.
pub fn apply_pose_system(
    time: Res<Time>,
    mut camera: ResMut<ChaseCamera>,
    mut players: Query<(&Player, &mut Transform)>,
) {
    for (player, mut transform) in &mut players {
        let pose = pose::derive_pose(player);
        *transform = Transform::from_matrix(pose.world_matrix());
        camera.set_target(pose.translation);
        camera.set_position(pose.translation + CAMERA_SHOULDER);
    }
    camera.update(time.delta_secs());
}

/// Translates arrow keys into the frame's movement intent.
#[cfg(feature = "render")]
pub fn keyboard_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<MoveIntent>,
) {
    if keys.pressed(KeyCode::ArrowUp) {
        intent.set(false, false);
    } else if keys.pressed(KeyCode::ArrowDown) {
        intent.set(true, false);
    } else if keys.pressed(KeyCode::ArrowRight) {
        intent.set(false, true);
    } else if keys.pressed(KeyCode::ArrowLeft) {
        intent.set(true, true);
    }
}

/// Hides players once the level is finished.
#[cfg(feature = "render")]
pub fn apply_visibility_system(
    level: Res<Level>,
    mut players: Query<&mut Visibility, With<Player>>,
) {
    for mut visibility in &mut players {
        *visibility = if pose::derive_visibility(true, level.is_finished()) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
