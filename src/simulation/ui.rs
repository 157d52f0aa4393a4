use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContext};

use super::physics::{ActiveParameter, OscillatorState};
use super::render::Presentation;
use super::util::Layout;
use super::Params;

/// Discrete user requests, applied to the oscillator once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    SelectNext,
    SelectPrevious,
    Select(ActiveParameter),
    Increase,
    Decrease,
    Restart,
    SwitchPresentation,
}

/// Keys act on release, holding a key down does not repeat.
pub fn control_for_key(key: KeyCode) -> Option<ControlEvent> {
    match key {
        KeyCode::Up => Some(ControlEvent::SelectPrevious),
        KeyCode::Down => Some(ControlEvent::SelectNext),
        KeyCode::Left => Some(ControlEvent::Decrease),
        KeyCode::Right => Some(ControlEvent::Increase),
        KeyCode::R => Some(ControlEvent::Restart),
        KeyCode::Tab => Some(ControlEvent::SwitchPresentation),
        _ => None,
    }
}

pub fn handle_keyboard_input(
    keys: Res<Input<KeyCode>>,
    mut controls: EventWriter<ControlEvent>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_released(KeyCode::Escape) {
        info!("escape released, exiting");
        exit.send(AppExit);
        return;
    }

    for key in keys.get_just_released() {
        if let Some(control) = control_for_key(*key) {
            controls.send(control);
        }
    }
}

pub fn ui_side_panel(
    mut egui_ctx: ResMut<EguiContext>,
    params: Res<Params>,
    layout: Res<Layout>,
    presentation: Res<Presentation>,
    state: Res<OscillatorState>,
    mut controls: EventWriter<ControlEvent>,
) {
    let parameters = state.parameters();

    egui::SidePanel::right("side_panel")
        .default_width(params.side_panel_width)
        .resizable(false)
        .show(egui_ctx.ctx_mut(), |ui| {
            ui.heading("Oscillator");

            for parameter in ActiveParameter::ALL {
                ui.horizontal(|ui| {
                    if ui.small_button("-").clicked() {
                        controls.send(ControlEvent::Select(parameter));
                        controls.send(ControlEvent::Decrease);
                    }
                    if ui.small_button("+").clicked() {
                        controls.send(ControlEvent::Select(parameter));
                        controls.send(ControlEvent::Increase);
                    }

                    let text = format!("{}: {:.2}", parameter.label(), parameters.get(parameter));
                    if ui
                        .selectable_label(state.active() == parameter, text)
                        .clicked()
                    {
                        controls.send(ControlEvent::Select(parameter));
                    }
                });
            }

            ui.separator();
            ui.heading("Motion");

            ui.label(format!(
                "Displacement: {}",
                presentation.format_displacement(&layout, state.current_displacement())
            ));
            ui.label(format!("Period: {:.2} s", parameters.period()));
            ui.label(format!("Frequency: {:.3} rad/s", parameters.frequency()));
            ui.label(format!("Time: {:.2} s", state.clock().seconds()));

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Restart").clicked() {
                    controls.send(ControlEvent::Restart);
                }
                if ui.button(format!("View: {}", presentation.label())).clicked() {
                    controls.send(ControlEvent::SwitchPresentation);
                }
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.small("Esc: quit");
                ui.small("R: restart, Tab: switch view");
                ui.small("Left / Right: change value");
                ui.small("Up / Down: choose parameter");
            });
        });
}
