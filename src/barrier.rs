//! Forward-barrier classification.
//!
//! The classifier inspects the cell directly ahead of the player and the
//! cell above it, and reduces the neighbourhood to one of a small set of
//! obstacle shapes. It is consulted only while the player is at rest so the
//! barrier cannot flap mid-transition.

use bevy::math::Vec3;
use hashbrown::HashSet;
use serde::Serialize;

use crate::constants::{CRITICAL_OFFSET, CRITICAL_OFFSET_STEP, FATAL_FALL_RANGE};
use crate::numeric::round_to_i32;

/// Shape of the obstacle directly ahead of the player's travel direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Barrier {
    /// Open floor ahead; the player may step onward or tumble off an edge.
    #[default]
    Nothing,
    /// A climbable rise of exactly one unit.
    Step,
    /// Blocks at body level and above; impassable without redirection.
    Wall,
    /// An overhang blocks the tumble arc from above; the cell cannot be entered.
    Unsuitable,
    /// The column ahead has no support within falling range; entering is fatal.
    Trap,
}

impl Barrier {
    /// Whether movement input must be ignored against this barrier.
    #[must_use]
    pub const fn forbids_movement(self) -> bool {
        matches!(self, Self::Unsuitable | Self::Trap)
    }

    /// Offset magnitude at which a step against this barrier completes.
    ///
    /// A [`Barrier::Wall`] press never completes; callers clamp at the wall
    /// contact bound instead of consulting this threshold.
    #[must_use]
    pub const fn critical_offset(self) -> f32 {
        match self {
            Self::Step => CRITICAL_OFFSET_STEP,
            _ => CRITICAL_OFFSET,
        }
    }
}

/// Travel direction along the grid axes.
///
/// `change_axis` switches travel from the Z axis to the X axis; it may only
/// change while the player is at rest, which [`crate::motion::Player::steer`]
/// enforces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facing {
    /// Travel backward along the current axis.
    pub reversed: bool,
    /// Travel along X instead of Z.
    pub change_axis: bool,
}

impl Facing {
    /// Grid delta of one forward step as `(dx, dz)`.
    #[must_use]
    pub const fn step_delta(self) -> (i32, i32) {
        let sign = if self.reversed { -1 } else { 1 };
        if self.change_axis {
            (sign, 0)
        } else {
            (0, sign)
        }
    }
}

/// Classifies the obstacle ahead of `position` along `facing`.
///
/// `cells` is the level's full barrier-cell occupancy. The decision reads
/// the forward cell at the player's own height and the cell above it:
/// both occupied is a wall, only the lower one a step, only the upper one an
/// overhang. With both free, the forward column is probed downward for
/// support; a column that is empty all the way past the fatal-fall range is
/// a trap.
#[must_use]
pub fn classify(position: Vec3, facing: Facing, cells: &HashSet<(i32, i32, i32)>) -> Barrier {
    let (dx, dz) = facing.step_delta();
    let x = round_to_i32(position.x) + dx;
    let y = round_to_i32(position.y);
    let z = round_to_i32(position.z) + dz;

    let ahead = cells.contains(&(x, y, z));
    let ahead_up = cells.contains(&(x, y + 1, z));
    match (ahead, ahead_up) {
        (true, true) => Barrier::Wall,
        (true, false) => Barrier::Step,
        (false, true) => Barrier::Unsuitable,
        (false, false) => {
            let supported = (1..=FATAL_FALL_RANGE).any(|depth| cells.contains(&(x, y - depth, z)));
            if supported {
                Barrier::Nothing
            } else {
                Barrier::Trap
            }
        }
    }
}
