//! Shared fixtures for the tumble test suite.

use bevy::math::Vec3;
use tumble::level::{Block, Level};
use tumble::motion::{Player, PlayerState};

/// Frame delta used across the scenario tests, a steady 60 Hz.
pub const TEST_DT: f32 = 1.0 / 60.0;

/// Safety bound on scenario loops so a stuck state machine fails fast
/// instead of hanging the suite.
pub const FRAME_BUDGET: usize = 2_000;

/// A flat square of blocks at height zero, spanning `-extent..=extent` on
/// both axes, with the start cell at the origin's top face.
pub fn flat_level(extent: i32) -> Level {
    let mut level = Level::new(Vec3::new(0.0, 1.0, 0.0));
    for x in -extent..=extent {
        for z in -extent..=extent {
            level.add_block(Block { x, y: 0, z });
        }
    }
    level
}

/// Steps the player until it stands still, up to [`FRAME_BUDGET`] frames.
///
/// # Panics
/// Panics if the player never settles within the budget.
pub fn settle(player: &mut Player, level: &Level) {
    for _ in 0..FRAME_BUDGET {
        if player.state() == PlayerState::Standing {
            return;
        }
        player.update(TEST_DT, level);
    }
    panic!("player did not settle within {FRAME_BUDGET} frames");
}

/// Holds the given steer input until `done` reports true, up to
/// [`FRAME_BUDGET`] frames. Returns the number of frames simulated.
///
/// # Panics
/// Panics if `done` never reports true within the budget.
pub fn hold_steer(
    player: &mut Player,
    level: &Level,
    reversed: bool,
    change_axis: bool,
    mut done: impl FnMut(&Player) -> bool,
) -> usize {
    for frame in 0..FRAME_BUDGET {
        if done(player) {
            return frame;
        }
        player.steer(reversed, change_axis);
        player.update(TEST_DT, level);
    }
    panic!("scenario did not complete within {FRAME_BUDGET} frames");
}

/// Asserts the standing invariant: at rest, offset and velocity are zero.
///
/// # Panics
/// Panics if the player stands with residual sub-step state.
pub fn assert_standing_invariant(player: &Player) {
    if player.state() == PlayerState::Standing {
        assert_eq!(player.inner_offset(), 0.0, "standing with non-zero offset");
        assert_eq!(player.velocity(), 0.0, "standing with non-zero velocity");
    }
}
