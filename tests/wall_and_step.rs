//! Barrier-shaped scenarios: pressing a wall and climbing a step.

use bevy::math::Vec3;
use test_utils::{assert_standing_invariant, flat_level, hold_steer, settle, TEST_DT};
use tumble::{Barrier, Block, Player, PlayerState};

#[test]
fn wall_press_never_completes_a_step() {
    let mut level = flat_level(2);
    // Two blocks ahead: body level and above it.
    level.add_block(Block { x: 0, y: 1, z: 1 });
    level.add_block(Block { x: 0, y: 2, z: 1 });

    let mut player = Player::new(level.start_position());
    settle(&mut player, &level);

    for _ in 0..600 {
        player.steer(false, false);
        player.update(TEST_DT, &level);
        assert_eq!(player.barrier(), Barrier::Wall);
        assert!(
            player.inner_offset().abs() <= 1.0 + 1e-4,
            "wall press must stay bounded, got {}",
            player.inner_offset()
        );
        assert_eq!(player.position(), Vec3::new(0.0, 1.0, 0.0));
    }

    // Released, the cube settles back to rest against the restoring force.
    for _ in 0..600 {
        player.update(TEST_DT, &level);
        if player.state() == PlayerState::Standing {
            break;
        }
    }
    assert_eq!(player.state(), PlayerState::Standing);
    assert_eq!(player.position(), Vec3::new(0.0, 1.0, 0.0));
    assert_standing_invariant(&player);
}

#[test]
fn step_climb_snaps_up_one_unit() {
    let mut level = flat_level(2);
    // One block ahead at body level, nothing above it.
    level.add_block(Block { x: 0, y: 1, z: 1 });

    let mut player = Player::new(level.start_position());
    settle(&mut player, &level);

    let mut past_tipping_point = false;
    hold_steer(&mut player, &level, false, false, |p| {
        assert_standing_invariant(p);
        past_tipping_point |= p.inner_offset() > 1.5;
        p.state() == PlayerState::Standing && p.position() == Vec3::new(0.0, 2.0, 1.0)
    });

    assert!(
        past_tipping_point,
        "the climb arc must pass the step's tipping point"
    );
    assert_eq!(player.position(), Vec3::new(0.0, 2.0, 1.0));
    assert_eq!(player.state(), PlayerState::Standing);
}

#[test]
fn step_abort_on_reversed_input_snaps_back() {
    let level = flat_level(2);
    let mut player = Player::new(level.start_position());
    settle(&mut player, &level);

    // Start a forward step, then hold the opposite direction before it
    // completes: the motion reverses across zero and aborts.
    hold_steer(&mut player, &level, false, false, |p| {
        p.state() == PlayerState::Moving && p.inner_offset() > 0.1
    });
    hold_steer(&mut player, &level, true, false, |p| {
        p.state() == PlayerState::Standing
    });

    assert_eq!(player.position(), Vec3::new(0.0, 1.0, 0.0));
    assert_standing_invariant(&player);
}
