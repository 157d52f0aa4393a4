use anyhow::Context;
use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use simulation::{Params, Simulation};

mod error;
mod simulation;

fn main() -> anyhow::Result<()> {
    let params = Params::default();
    params
        .validate()
        .context("invalid oscillator configuration")?;

    let window = params.layout().window_size();

    App::new()
        .insert_resource(WindowDescriptor {
            title: "Harmonic oscillator".to_string(),
            width: window.x,
            height: window.y,
            resizable: false,
            ..default()
        })
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Msaa { samples: 4 })
        .add_plugins(DefaultPlugins)
        .add_plugin(ShapePlugin)
        .add_plugin(Simulation::new(params))
        .run();

    Ok(())
}
