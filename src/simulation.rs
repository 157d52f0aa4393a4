use bevy::{prelude::*, time::FixedTimestep};
use bevy_egui::EguiPlugin;
use bevy_prototype_debug_lines::DebugLinesPlugin;
use std::f64::consts::FRAC_PI_2;

use crate::error::ConfigError;

mod physics;
mod render;
mod ui;
mod util;

use physics::{
    ActiveParameter, OscillatorParameters, OscillatorState, ParameterBounds, ParameterLimits,
};
use render::Presentation;
use ui::ControlEvent;
use util::Layout;

#[derive(Debug, Hash, PartialEq, Eq, Clone, StageLabel)]
struct FixedUpdateStage;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemLabel)]
pub enum OscillatorSystem {
    Input,
    Control,
    Physics,
}

pub struct Simulation {
    pub params: Params,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub screen_width: f32,
    pub screen_height: f32,
    pub side_panel_width: f32,
    pub tick_interval_ms: u64, // simulated and real milliseconds between samples
    pub mass: ParameterBounds,
    pub stiffness: ParameterBounds,
    pub displacement: ParameterBounds, // radians
    pub start_displacement: f64,
    pub presentation: Presentation,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            screen_width: 960.0,
            screen_height: 720.0,
            side_panel_width: 240.0,
            tick_interval_ms: 10,
            mass: ParameterBounds::new(5.0, 30.0, 1.0),
            stiffness: ParameterBounds::new(1.0, 5.0, 0.25),
            displacement: ParameterBounds::new(-FRAC_PI_2, FRAC_PI_2, 0.1),
            start_displacement: -1.0,
            presentation: Presentation::Pendulum,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (parameter, bounds) in [
            (ActiveParameter::Mass, &self.mass),
            (ActiveParameter::Stiffness, &self.stiffness),
            (ActiveParameter::InitialDisplacement, &self.displacement),
        ] {
            if bounds.min > bounds.max {
                return Err(ConfigError::InvertedBounds {
                    parameter: parameter.label(),
                    min: bounds.min,
                    max: bounds.max,
                });
            }
            if bounds.step <= 0.0 {
                return Err(ConfigError::NonPositiveStep {
                    parameter: parameter.label(),
                    step: bounds.step,
                });
            }
        }

        // Mass divides the stiffness in the displacement, stiffness the mass in the period.
        for (parameter, bounds) in [
            (ActiveParameter::Mass, &self.mass),
            (ActiveParameter::Stiffness, &self.stiffness),
        ] {
            if bounds.min <= 0.0 {
                return Err(ConfigError::NonPositiveLowerBound {
                    parameter: parameter.label(),
                    min: bounds.min,
                });
            }
        }

        if !self.displacement.contains(self.start_displacement) {
            return Err(ConfigError::DisplacementOutOfBounds {
                value: self.start_displacement,
                min: self.displacement.min,
                max: self.displacement.max,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let layout = self.layout();
        if layout.graph_capacity() == 0 || layout.graph_width() < layout.graph_capacity() as f32 {
            return Err(ConfigError::CanvasTooSmall {
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout {
            width: self.screen_width,
            height: self.screen_height,
            panel_width: self.side_panel_width,
        }
    }

    pub fn limits(&self) -> ParameterLimits {
        ParameterLimits {
            mass: self.mass,
            stiffness: self.stiffness,
            initial_displacement: self.displacement,
        }
    }

    /// Mass and stiffness start in the middle of their ranges.
    pub fn initial_state(&self) -> OscillatorState {
        let parameters = OscillatorParameters {
            mass: self.mass.midpoint(),
            stiffness: self.stiffness.midpoint(),
            initial_displacement: self.start_displacement,
        };
        OscillatorState::new(
            parameters,
            self.limits(),
            self.tick_interval_ms,
            self.layout().graph_capacity(),
        )
    }

    fn timestep(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}

impl Simulation {
    pub fn new(params: Params) -> Self {
        Simulation { params }
    }
}

impl Plugin for Simulation {
    fn build(&self, app: &mut App) {
        let state = self.params.initial_state();
        let parameters = state.parameters();
        info!(
            "starting oscillator: mass {}, stiffness {}, displacement {}, period {:.2} s",
            parameters.mass,
            parameters.stiffness,
            parameters.initial_displacement,
            parameters.period()
        );

        render::spawn_shapes(&mut app.world);

        app.world.spawn().insert_bundle(Camera2dBundle::default());

        app.insert_resource(self.params)
            .insert_resource(self.params.layout())
            .insert_resource(self.params.presentation)
            .insert_resource(state)
            .add_event::<ControlEvent>()
            .add_plugin(EguiPlugin)
            .add_plugin(DebugLinesPlugin::default())
            .add_system(ui::handle_keyboard_input.label(OscillatorSystem::Input))
            .add_system(ui::ui_side_panel.label(OscillatorSystem::Input))
            .add_system(
                apply_control_events
                    .label(OscillatorSystem::Control)
                    .after(OscillatorSystem::Input),
            )
            .add_system(render::draw_axes)
            .add_stage_after(
                CoreStage::Update,
                FixedUpdateStage,
                SystemStage::parallel()
                    .with_run_criteria(FixedTimestep::step(self.params.timestep()))
                    .with_system(physics::physics_update.label(OscillatorSystem::Physics))
                    .with_system(render::render_body.after(OscillatorSystem::Physics))
                    .with_system(render::render_graph.after(OscillatorSystem::Physics)),
            );
    }
}

/// Applies this frame's controls. Any parameter change restarts the motion.
pub fn apply_control_events(
    mut events: EventReader<ControlEvent>,
    mut state: ResMut<OscillatorState>,
    mut presentation: ResMut<Presentation>,
) {
    for event in events.iter() {
        match *event {
            ControlEvent::SelectNext => state.select_next(),
            ControlEvent::SelectPrevious => state.select_previous(),
            ControlEvent::Select(parameter) => state.select(parameter),
            ControlEvent::Increase | ControlEvent::Decrease => {
                let active = state.active();
                let changed = if *event == ControlEvent::Increase {
                    state.increase()
                } else {
                    state.decrease()
                };

                if changed {
                    let parameters = state.parameters();
                    info!(
                        "{} set to {:.2}, period {:.2} s",
                        active.label(),
                        parameters.get(active),
                        parameters.period()
                    );
                } else {
                    debug!("{} already at its bound", active.label());
                }
            }
            ControlEvent::Restart => {
                info!("restarting oscillation");
                state.restart();
            }
            ControlEvent::SwitchPresentation => {
                *presentation = presentation.next();
                info!("switched to {} view", presentation.label());
            }
        }
    }
}
