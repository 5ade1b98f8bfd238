//! Player motion state machine.
//!
//! One cube, one unit: the player rests on integer-aligned cells and moves
//! between them through a continuous sub-step scalar (the inner offset) and
//! its rate of change. Falling and grounded motion use disjoint integration
//! branches; the grounded branch is parameterized by the barrier shape
//! ahead. All collision knowledge comes through [`BarrierOracle`].

use bevy::math::Vec3;
use bevy::prelude::Component;
use log::debug;

use crate::barrier::{classify, Barrier, Facing};
use crate::constants::{
    BLOCK_TOP_OFFSET, DEFAULT_ENERGY, FATAL_FALL_OFFSET, GRAVITY_PULL, PLAYER_MASS,
    REDUCED_MOVE_FORCE, SUPPORT_GRACE, TIP_POINT_FLAT, TIP_POINT_STEP, WALL_CONTACT_OFFSET,
    WEIGHT_FORCE,
};
use crate::level::BarrierOracle;
use crate::numeric::{round_to_i32, sign3};
use crate::pose;

/// Discrete motion state. Exactly one holds at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum PlayerState {
    /// Airborne, integrating a vertical arc.
    #[default]
    Falling,
    /// At rest on an integer-aligned cell; offset and velocity are zero.
    Standing,
    /// A sub-step transition between cells is in flight.
    Moving,
}

/// The controllable cube.
///
/// State is mutated exclusively by [`Player::update`] and the external
/// [`Player::push`]; everything derived from it (render transform,
/// collision position, visibility) is recomputed by the stateless functions
/// in [`crate::pose`].
#[derive(Component, Clone, Debug)]
pub struct Player {
    position: Vec3,
    start_position: Vec3,
    state: PlayerState,
    barrier: Barrier,
    facing: Facing,
    inner_offset: f32,
    velocity: f32,
    energy: f32,
    key_pressed: bool,
    pushed: bool,
}

impl Player {
    /// Creates a player falling in from `start_position`.
    #[must_use]
    pub fn new(start_position: Vec3) -> Self {
        Self {
            position: start_position,
            start_position,
            state: PlayerState::Falling,
            barrier: Barrier::default(),
            facing: Facing::default(),
            inner_offset: 0.0,
            velocity: 0.0,
            energy: DEFAULT_ENERGY,
            key_pressed: false,
            pushed: false,
        }
    }

    /// Committed cell position. Excludes any in-flight sub-step displacement;
    /// see [`crate::pose::offsetted_position`] for the collision position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Position the player resets to after a fatal fall.
    #[must_use]
    pub const fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// Current discrete motion state.
    #[must_use]
    pub const fn state(&self) -> PlayerState {
        self.state
    }

    /// Barrier classified ahead at the last rest frame.
    #[must_use]
    pub const fn barrier(&self) -> Barrier {
        self.barrier
    }

    /// Current travel direction.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Signed sub-step progress toward the next cell.
    #[must_use]
    pub const fn inner_offset(&self) -> f32 {
        self.inner_offset
    }

    /// Rate of change of the inner offset.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Movement strength applied when a step begins from rest.
    #[must_use]
    pub const fn energy(&self) -> f32 {
        self.energy
    }

    /// Overrides the movement strength.
    pub const fn set_energy(&mut self, energy: f32) {
        self.energy = energy;
    }

    /// Latches movement intent for the current frame.
    ///
    /// Ignored entirely while falling. The travel axis only changes at rest
    /// (`inner_offset == 0`), so an axis change requested mid-step cannot
    /// alter the in-flight trajectory. Intent against a forbidding barrier
    /// is dropped.
    pub fn steer(&mut self, reversed: bool, change_axis: bool) {
        if self.state == PlayerState::Falling {
            return;
        }
        self.facing.reversed = reversed;
        if self.inner_offset == 0.0 {
            self.facing.change_axis = change_axis;
        }
        if self.facing.change_axis == change_axis {
            if self.barrier.forbids_movement() {
                debug!("steer ignored against {:?}", self.barrier);
            } else {
                self.key_pressed = true;
            }
        }
    }

    /// Displaces the player from outside, as another simulated block would.
    ///
    /// This is not a teleport: the frame is marked as externally disturbed so
    /// the grounded branch skips grid realignment until the push settles.
    pub fn push(&mut self, offset: Vec3) {
        self.position += offset;
        self.pushed = true;
    }

    /// Advances the simulation by one frame.
    ///
    /// `dt` is the caller's frame delta and is integrated as supplied; very
    /// large steps can tunnel through one-unit floors.
    pub fn update(&mut self, dt: f32, oracle: &dyn BarrierOracle) {
        // Air drag, applied in both branches.
        self.velocity += self.velocity * (PLAYER_MASS * GRAVITY_PULL) * dt;

        if self.state == PlayerState::Falling {
            self.update_falling(dt, oracle);
        } else {
            self.update_grounded(dt, oracle);
        }

        self.key_pressed = false;
        self.pushed = false;
    }

    fn update_falling(&mut self, dt: f32, oracle: &dyn BarrierOracle) {
        self.velocity -= dt;
        self.inner_offset += self.velocity;

        if self.inner_offset < FATAL_FALL_OFFSET {
            debug!("fatal fall at {:?}, resetting to start", self.position);
            let start = self.start_position;
            self.snap_to(start, oracle);
            return;
        }

        let x = round_to_i32(self.position.x);
        let z = round_to_i32(self.position.z);
        if let Some(block) = oracle.highest_barrier_below(x, z, self.position.y) {
            #[expect(
                clippy::cast_precision_loss,
                reason = "Grid heights are far below the f32 integer limit."
            )]
            let block_y = block.y as f32;
            if pose::offsetted_position(self).y - block_y < SUPPORT_GRACE {
                let landing =
                    Vec3::new(self.position.x, block_y + BLOCK_TOP_OFFSET, self.position.z);
                self.snap_to(landing, oracle);
            }
        }
    }

    fn update_grounded(&mut self, dt: f32, oracle: &dyn BarrierOracle) {
        if self.inner_offset == 0.0 && self.state == PlayerState::Standing {
            self.barrier = classify(self.position, self.facing, oracle.barrier_cells());
        }

        // After external pushes, settle back onto the grid once undisturbed.
        if !self.pushed && self.state == PlayerState::Standing && self.off_grid() {
            let aligned = Vec3::new(
                self.position.x.round(),
                self.position.y,
                self.position.z.round(),
            );
            self.snap_to(aligned, oracle);
            return;
        }

        if !self.barrier.forbids_movement() {
            if self.key_pressed {
                let strength = if self.velocity == 0.0 {
                    self.energy
                } else {
                    REDUCED_MOVE_FORCE
                };
                let signed = if self.facing.reversed { -strength } else { strength };
                self.velocity += signed * dt;
            }
            if self.inner_offset != 0.0 {
                self.velocity += weight_force(self.barrier, self.inner_offset) * dt;
            }
        }

        let previous_offset = self.inner_offset;
        self.inner_offset += self.velocity;

        if self.state == PlayerState::Moving && sign3(previous_offset) != sign3(self.inner_offset)
        {
            // The motion reversed before completing a step; abort it.
            let here = self.position;
            self.snap_to(here, oracle);
            return;
        }

        if self.inner_offset != 0.0 {
            self.state = PlayerState::Moving;
        }

        if self.barrier == Barrier::Wall {
            if self.inner_offset.abs() > WALL_CONTACT_OFFSET {
                // Tipped flush against the wall face; a wall press never
                // completes a step.
                self.inner_offset = WALL_CONTACT_OFFSET.copysign(self.inner_offset);
                self.velocity = 0.0;
            }
        } else if self.inner_offset.abs() > self.barrier.critical_offset() {
            let next = pose::next_position(self);
            self.snap_to(next, oracle);
        }
    }

    /// Commits `position` as the new resting cell ("process position").
    ///
    /// Resets the sub-step state, then immediately re-derives falling when
    /// the new cell has no support within [`SUPPORT_GRACE`] below it.
    pub fn snap_to(&mut self, position: Vec3, oracle: &dyn BarrierOracle) {
        self.inner_offset = 0.0;
        self.velocity = 0.0;
        self.state = PlayerState::Standing;
        self.position = position;

        let x = round_to_i32(position.x);
        let z = round_to_i32(position.z);
        #[expect(
            clippy::cast_precision_loss,
            reason = "Grid heights are far below the f32 integer limit."
        )]
        let supported = oracle
            .highest_barrier_below(x, z, position.y)
            .is_some_and(|block| position.y - block.y as f32 <= SUPPORT_GRACE);
        if !supported {
            self.state = PlayerState::Falling;
        }
        debug!("snapped to {:?}, now {:?}", self.position, self.state);
    }

    fn off_grid(&self) -> bool {
        self.position.x.fract() != 0.0 || self.position.z.fract() != 0.0
    }
}

/// Restoring/tipping force for the in-flight sub-step, per barrier kind.
///
/// Dispatches to one force function per kind so each formula stays
/// independently testable.
fn weight_force(barrier: Barrier, offset: f32) -> f32 {
    let force: fn(f32) -> f32 = match barrier {
        Barrier::Nothing => flat_weight,
        Barrier::Step => step_weight,
        Barrier::Wall => wall_weight,
        Barrier::Unsuitable | Barrier::Trap => |_| 0.0,
    };
    force(offset)
}

/// Open floor: settle back below the tipping point, tip onward past it.
const fn flat_weight(offset: f32) -> f32 {
    let strength = if offset.abs() > TIP_POINT_FLAT {
        WEIGHT_FORCE
    } else {
        -WEIGHT_FORCE
    };
    strength * sign3(offset)
}

/// Step climb: the arc resists until past the step's tipping point.
const fn step_weight(offset: f32) -> f32 {
    let strength = if offset.abs() < TIP_POINT_STEP {
        -WEIGHT_FORCE
    } else {
        WEIGHT_FORCE
    };
    strength * sign3(offset)
}

/// Wall: always pushes back toward rest.
const fn wall_weight(offset: f32) -> f32 {
    WEIGHT_FORCE.copysign(-offset)
}
