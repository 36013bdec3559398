//! eeriecity - procedural PS1-horror cityscape generator
//!
//! Builds the block-grid world once at startup and reports entity totals.
//! Rendering, camera, and input live elsewhere; this binary is the
//! headless generation pass that fills the `CityWorld` resource a renderer
//! would consume.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

mod procgen;
mod world;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .add_plugins(LogPlugin::default())
        .add_plugins(world::WorldPlugin)
        .add_plugins(procgen::ProcgenPlugin)
        .run();
}
