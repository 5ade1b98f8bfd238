//! End-to-end test of the Bevy plugin wiring in a headless app.
//!
//! Uses a manually advanced `Time` resource so the frame delta is a steady
//! 60 Hz regardless of wall-clock behaviour.

use std::time::Duration;

use bevy::prelude::*;
use test_utils::TEST_DT;
use tumble::{Block, ChaseCamera, MoveIntent, Player, PlayerPlugin, PlayerState};

fn tick(app: &mut App) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(TEST_DT));
    app.update();
}

fn spawn_floor(app: &mut App, extent: i32) {
    for x in -extent..=extent {
        for z in -extent..=extent {
            app.world_mut().spawn(Block { x, y: 0, z });
        }
    }
}

#[test]
fn plugin_lands_and_walks_the_player() {
    let mut app = App::new();
    app.add_plugins(PlayerPlugin);
    app.insert_resource(Time::<()>::default());
    spawn_floor(&mut app, 1);
    let player = app
        .world_mut()
        .spawn((Player::new(Vec3::new(0.0, 3.0, 0.0)), Transform::default()))
        .id();

    // Fall in and settle.
    for _ in 0..600 {
        tick(&mut app);
        let state = app
            .world()
            .get::<Player>(player)
            .map(Player::state);
        if state == Some(PlayerState::Standing) {
            break;
        }
    }
    {
        let body = app.world().get::<Player>(player).unwrap();
        assert_eq!(body.state(), PlayerState::Standing);
        assert_eq!(body.position(), Vec3::new(0.0, 1.0, 0.0));
        let transform = app.world().get::<Transform>(player).unwrap();
        assert!((transform.translation - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-3);
    }

    // Walk one cell forward under held intent.
    for _ in 0..600 {
        let arrived = {
            let body = app.world().get::<Player>(player).unwrap();
            body.state() == PlayerState::Standing && body.position().z >= 1.0
        };
        if arrived {
            break;
        }
        app.world_mut().resource_mut::<MoveIntent>().set(false, false);
        tick(&mut app);
    }

    let body = app.world().get::<Player>(player).unwrap();
    assert_eq!(body.position(), Vec3::new(0.0, 1.0, 1.0));
    assert_eq!(body.state(), PlayerState::Standing);

    // The chase camera retargeted onto the player's new cell.
    let camera = app.world().resource::<ChaseCamera>();
    assert!((camera.target() - Vec3::new(0.0, 1.0, 1.0)).length() < 1.0);
}

#[test]
fn intent_latch_is_consumed_each_frame() {
    let mut app = App::new();
    app.add_plugins(PlayerPlugin);
    app.insert_resource(Time::<()>::default());
    spawn_floor(&mut app, 1);
    app.world_mut()
        .spawn((Player::new(Vec3::new(0.0, 1.0, 0.0)), Transform::default()));

    app.world_mut().resource_mut::<MoveIntent>().set(false, false);
    tick(&mut app);
    assert!(
        app.world_mut()
            .resource_mut::<MoveIntent>()
            .take()
            .is_none(),
        "the step system must drain the latch"
    );
}
