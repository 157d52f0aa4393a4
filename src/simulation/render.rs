use bevy::prelude::*;
use bevy_prototype_debug_lines::DebugLines;
use bevy_prototype_lyon::prelude::*;

use super::physics::OscillatorState;
use super::util::Layout;

const COIL_TURNS: usize = 12;
const COIL_AMPLITUDE: f32 = 10.0;
const PIVOT_RADIUS: f32 = 2.0;

/// How the oscillating body is drawn. Both layers share the same kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Rod and bob swinging about the hang point, displacement read as an angle.
    Pendulum,
    /// Body on a horizontal spring, pulled out by `arm * sin(displacement)`.
    Spring,
}

impl Default for Presentation {
    fn default() -> Self {
        Presentation::Pendulum
    }
}

impl Presentation {
    pub fn next(self) -> Self {
        match self {
            Presentation::Pendulum => Presentation::Spring,
            Presentation::Spring => Presentation::Pendulum,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Presentation::Pendulum => "pendulum",
            Presentation::Spring => "spring",
        }
    }

    pub fn format_displacement(self, layout: &Layout, displacement: f64) -> String {
        match self {
            Presentation::Pendulum => format!("{:.3} rad", displacement),
            Presentation::Spring => format!(
                "{:.1} px",
                layout.arm_length() * (displacement as f32).sin()
            ),
        }
    }

    /// Screen-space outline of the body for the given displacement and mass.
    pub fn geometry(self, layout: &Layout, displacement: f64, mass: f64) -> BodyGeometry {
        let arm = layout.arm_length();
        let hang = layout.hang_point();
        let radius = mass as f32;
        let (sin, cos) = (displacement as f32).sin_cos();

        match self {
            Presentation::Pendulum => BodyGeometry {
                anchor: Outline::closed(circle_points(hang, PIVOT_RADIUS, 8)),
                link: Outline::open(vec![
                    hang,
                    hang + Vec2::new(sin, cos) * (arm - radius),
                ]),
                body_center: hang + Vec2::new(sin, cos) * arm,
                body_radius: radius,
            },
            Presentation::Spring => {
                let wall_x = layout.padding();
                let body_center = Vec2::new(hang.x + arm * sin, hang.y);
                BodyGeometry {
                    anchor: Outline::open(vec![
                        Vec2::new(wall_x, hang.y - arm / 2.0),
                        Vec2::new(wall_x, hang.y + arm / 2.0),
                    ]),
                    link: Outline::open(coil_points(
                        Vec2::new(wall_x, hang.y),
                        Vec2::new(body_center.x - radius, hang.y),
                    )),
                    body_center,
                    body_radius: radius,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

impl Outline {
    fn open(points: Vec<Vec2>) -> Self {
        Outline {
            points,
            closed: false,
        }
    }

    fn closed(points: Vec<Vec2>) -> Self {
        Outline {
            points,
            closed: true,
        }
    }

    fn to_world(&self, layout: &Layout) -> Outline {
        Outline {
            points: self.points.iter().map(|p| layout.to_world(*p)).collect(),
            closed: self.closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyGeometry {
    pub anchor: Outline,
    pub link: Outline,
    pub body_center: Vec2,
    pub body_radius: f32,
}

fn circle_points(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Zig-zag between `start` and `end`, flat at both ends.
fn coil_points(start: Vec2, end: Vec2) -> Vec<Vec2> {
    let segments = COIL_TURNS * 2;
    let step = (end - start) / (segments + 2) as f32;
    let normal = step.perp().normalize_or_zero() * COIL_AMPLITUDE;

    let mut points = Vec::with_capacity(segments + 3);
    points.push(start);
    for i in 1..=segments + 1 {
        let offset = if i == segments + 1 {
            Vec2::ZERO
        } else if i % 2 == 0 {
            -normal
        } else {
            normal
        };
        points.push(start + step * i as f32 + offset);
    }
    points.push(end);
    points
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPart {
    Anchor,
    Link,
    Body,
}

#[derive(Component)]
pub struct GraphCurve;

fn outline_path(outline: &Outline) -> Path {
    if outline.points.len() < 2 {
        return PathBuilder::new().build();
    }
    ShapePath::build_as(&shapes::Polygon {
        points: outline.points.clone(),
        closed: outline.closed,
    })
}

/// Spawns the entities whose paths are rebuilt every tick.
pub fn spawn_shapes(world: &mut World) {
    let placeholder = shapes::Line(Vec2::ZERO, Vec2::ZERO);

    for part in [BodyPart::Anchor, BodyPart::Link, BodyPart::Body] {
        world
            .spawn()
            .insert(part)
            .insert_bundle(GeometryBuilder::build_as(
                &placeholder,
                DrawMode::Stroke(StrokeMode::new(Color::WHITE, 1.0)),
                Transform::default(),
            ));
    }

    world
        .spawn()
        .insert(GraphCurve)
        .insert_bundle(GeometryBuilder::build_as(
            &placeholder,
            DrawMode::Stroke(StrokeMode::new(Color::YELLOW, 1.0)),
            Transform::default(),
        ));
}

pub fn render_body(
    layout: Res<Layout>,
    presentation: Res<Presentation>,
    state: Res<OscillatorState>,
    mut parts: Query<(&mut Path, &BodyPart)>,
) {
    let geometry = presentation.geometry(
        &layout,
        state.current_displacement(),
        state.parameters().mass,
    );

    for (mut path, part) in parts.iter_mut() {
        *path = match part {
            BodyPart::Anchor => outline_path(&geometry.anchor.to_world(&layout)),
            BodyPart::Link => outline_path(&geometry.link.to_world(&layout)),
            BodyPart::Body => ShapePath::build_as(&shapes::Circle {
                radius: geometry.body_radius,
                center: layout.to_world(geometry.body_center),
            }),
        };
    }
}

pub fn render_graph(
    layout: Res<Layout>,
    state: Res<OscillatorState>,
    mut curve: Query<&mut Path, With<GraphCurve>>,
) {
    let outline = Outline::open(
        state
            .history()
            .iter()
            .enumerate()
            .map(|(i, sample)| layout.to_world(layout.graph_point(i, *sample)))
            .collect(),
    );

    for mut path in curve.iter_mut() {
        *path = outline_path(&outline);
    }
}

/// Debug lines only live for one frame, so the axes are drawn every frame.
pub fn draw_axes(layout: Res<Layout>, mut lines: ResMut<DebugLines>) {
    for (start, end) in layout.axes() {
        lines.line(
            layout.to_world(start).extend(0.0),
            layout.to_world(end).extend(0.0),
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn layout() -> Layout {
        Layout {
            width: 960.0,
            height: 720.0,
            panel_width: 240.0,
        }
    }

    fn near(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn pendulum_hangs_straight_down_at_rest() {
        let geometry = Presentation::Pendulum.geometry(&layout(), 0.0, 20.0);

        assert!(near(geometry.body_center, Vec2::new(240.0, 520.0)));
        assert_eq!(geometry.body_radius, 20.0);
        assert_eq!(geometry.link.points.len(), 2);
        assert!(near(geometry.link.points[1], Vec2::new(240.0, 500.0)));
        assert!(geometry.anchor.closed);
    }

    #[test]
    fn pendulum_swings_sideways() {
        let geometry = Presentation::Pendulum.geometry(&layout(), FRAC_PI_2, 10.0);
        assert!(near(geometry.body_center, Vec2::new(400.0, 360.0)));
    }

    #[test]
    fn spring_stretches_along_axis() {
        let layout = layout();
        let geometry = Presentation::Spring.geometry(&layout, -FRAC_PI_2, 30.0);

        assert!(near(geometry.body_center, Vec2::new(80.0, 360.0)));
        let first = geometry.link.points.first().copied();
        let last = geometry.link.points.last().copied();
        assert_eq!(first, Some(Vec2::new(40.0, 360.0)));
        assert!(near(last.unwrap_or_default(), Vec2::new(50.0, 360.0)));
        assert!(geometry
            .link
            .points
            .iter()
            .all(|p| (p.y - 360.0).abs() <= COIL_AMPLITUDE + 1e-3));
    }

    #[test]
    fn presentation_cycles() {
        assert_eq!(Presentation::default().next(), Presentation::Spring);
        assert_eq!(Presentation::Spring.next(), Presentation::Pendulum);
    }

    #[test]
    fn displacement_text_depends_on_presentation() {
        let layout = layout();
        assert_eq!(
            Presentation::Pendulum.format_displacement(&layout, -1.0),
            "-1.000 rad"
        );
        assert_eq!(
            Presentation::Spring.format_displacement(&layout, FRAC_PI_2),
            "160.0 px"
        );
    }

    #[test]
    fn graph_follows_history() {
        let mut app = App::new();
        let params = crate::simulation::Params::default();
        let layout = params.layout();
        let mut state = params.initial_state();
        state.tick();
        state.tick();

        app.insert_resource(layout)
            .insert_resource(state)
            .add_system(render_graph);
        let curve = app
            .world
            .spawn()
            .insert(GraphCurve)
            .insert(PathBuilder::new().build())
            .id();

        app.update();

        assert!(app.world.get::<Path>(curve).is_some());
        assert_eq!(app.world.resource::<OscillatorState>().history().len(), 2);
    }
}
