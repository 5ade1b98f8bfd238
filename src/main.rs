//! Game binary: parses arguments, builds the demo level, and runs the app.

use anyhow::Result;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use tumble::{init_logging, Level, Player, PlayerPlugin};

/// A tumbling-cube block-grid puzzle game
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Built-in demo level: a plateau with a step, a wall, and an open edge.
const DEMO_LAYOUT: &str = "\
33311
2..11
S1111
11111";

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let level = Level::from_layout(DEMO_LAYOUT)?;
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_plugins(PlayerPlugin)
        .insert_resource(level)
        .add_systems(Startup, spawn_scene);
    let _exit = app.run();
    Ok(())
}

fn spawn_scene(mut commands: Commands, level: Res<Level>) {
    for block in level.blocks() {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Grid coordinates are far below the f32 integer limit."
        )]
        let translation = Vec3::new(block.x as f32, block.y as f32, block.z as f32);
        commands.spawn((block, Transform::from_translation(translation), Visibility::default()));
    }
    commands.spawn((
        Player::new(level.start_position()),
        Transform::default(),
        Visibility::default(),
    ));
    info!("spawned {} blocks", level.block_count());
}
