//! Core library for `tumble`, a block-grid puzzle game.
//!
//! The player is a cube that tumbles between integer-aligned cells under a
//! continuous physics approximation. The crate's heart is the motion state
//! machine in [`motion`], which composes the forward-barrier classifier in
//! [`barrier`] and the collision oracle exposed by [`level`]; the render
//! transform and collision position are recomputed from raw state by the
//! stateless functions in [`pose`]. [`player_sync`] wires the whole loop
//! into a Bevy app.

pub mod barrier;
pub mod camera;
pub mod constants;
pub mod level;
pub mod logging;
pub mod motion;
pub mod numeric;
pub mod player_sync;
pub mod pose;

pub use constants::*;

// Re-export commonly used items
pub use barrier::{classify, Barrier, Facing};
pub use camera::ChaseCamera;
pub use level::{BarrierOracle, Block, Level, LevelError};
pub use logging::init as init_logging;
pub use motion::{Player, PlayerState};
pub use player_sync::{
    apply_pose_system, cache_level_system, step_player_system, MoveIntent, PlayerPlugin, Steer,
};
pub use pose::{
    derive_pose, derive_visibility, moving_matrix, next_position, offsetted_position, PlayerPose,
};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tumble::prelude::*;
    //! ```

    pub use crate::barrier::{Barrier, Facing};
    pub use crate::level::{BarrierOracle, Block, Level};
    pub use crate::motion::{Player, PlayerState};
    pub use crate::player_sync::{MoveIntent, PlayerPlugin};
    pub use crate::pose::{derive_pose, offsetted_position};
}
