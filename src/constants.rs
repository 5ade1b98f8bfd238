//! Tuning constants for the player motion core.

/// Movement strength applied when a step begins from rest.
pub const DEFAULT_ENERGY: f32 = 1.5;
/// Movement strength applied while a step is already in flight, so held
/// input cannot override the step's own dynamics.
pub const REDUCED_MOVE_FORCE: f32 = 0.5;
/// Magnitude of the restoring/tipping force while a sub-step is in progress.
pub const WEIGHT_FORCE: f32 = 0.25;
/// Offset past which a cube on open floor tips onward instead of settling back.
pub const TIP_POINT_FLAT: f32 = 0.5;
/// Offset past which a cube climbing a step tips onto the step's top.
pub const TIP_POINT_STEP: f32 = 1.5;
/// Offset at which an ordinary step commits to the next cell.
pub const CRITICAL_OFFSET: f32 = 1.0;
/// Offset at which a step climb commits; the climb arc spans two quarter turns.
pub const CRITICAL_OFFSET_STEP: f32 = 2.0;
/// Offset bound when tipped flush against a wall face. A wall press never
/// completes a step; the offset is clamped here instead.
pub const WALL_CONTACT_OFFSET: f32 = 1.0;
/// Maximum gap below the player that still counts as standing on support.
pub const SUPPORT_GRACE: f32 = 1.0;
/// Falling offset past which the fall is fatal and the player resets.
pub const FATAL_FALL_OFFSET: f32 = -10.0;
/// Depth, in cells, probed for support when classifying the cell ahead.
pub const FATAL_FALL_RANGE: i32 = 10;
/// Player mass used by the air drag term.
pub const PLAYER_MASS: f32 = 0.01;
/// Gravity constant used by the air drag term.
pub const GRAVITY_PULL: f32 = -9.81;
/// Offset from a block's base to its top face.
pub const BLOCK_TOP_OFFSET: f32 = 1.0;
