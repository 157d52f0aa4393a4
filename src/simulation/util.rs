use bevy::prelude::*;

/// Screen geometry of the canvas, measured in pixels from the top-left corner
/// with y growing downwards. The egui side panel sits to the right of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub panel_width: f32,
}

impl Layout {
    pub fn padding(&self) -> f32 {
        self.width / 24.0
    }

    /// Pendulum length, also the graph's vertical scale.
    pub fn arm_length(&self) -> f32 {
        self.width / 4.0 - self.padding() * 2.0
    }

    pub fn hang_point(&self) -> Vec2 {
        Vec2::new(self.width / 4.0, self.height / 2.0)
    }

    pub fn graph_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0 + self.padding(), self.height / 2.0)
    }

    /// Number of samples the graph can show, one per pixel column.
    pub fn graph_capacity(&self) -> usize {
        (self.arm_length() * 2.0).max(0.0) as usize
    }

    /// Room left for the curve between the displacement axis and the right edge.
    pub fn graph_width(&self) -> f32 {
        self.width - self.padding() - self.graph_origin().x
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.width + self.panel_width, self.height)
    }

    /// Converts canvas pixels into world units of a 2d camera centred on the window.
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        let window = self.window_size();
        Vec2::new(screen.x - window.x / 2.0, window.y / 2.0 - screen.y)
    }

    /// Where the `index`-th history sample lands on the graph.
    pub fn graph_point(&self, index: usize, sample: f64) -> Vec2 {
        let origin = self.graph_origin();
        Vec2::new(
            origin.x + index as f32,
            origin.y - self.arm_length() * (sample as f32).sin(),
        )
    }

    /// Divider, time axis and displacement axis, as screen-space segments.
    pub fn axes(&self) -> [(Vec2, Vec2); 3] {
        let pad = self.padding();
        let arm = self.arm_length();
        let origin = self.graph_origin();
        [
            (
                Vec2::new(self.width / 2.0, 0.0),
                Vec2::new(self.width / 2.0, self.height),
            ),
            (origin, Vec2::new(self.width - pad, origin.y)),
            (
                Vec2::new(origin.x, origin.y - arm - pad),
                Vec2::new(origin.x, origin.y + arm + pad),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout {
            width: 960.0,
            height: 720.0,
            panel_width: 240.0,
        }
    }

    #[test]
    fn reproduces_reference_geometry() {
        let layout = layout();
        assert_eq!(layout.padding(), 40.0);
        assert_eq!(layout.arm_length(), 160.0);
        assert_eq!(layout.hang_point(), Vec2::new(240.0, 360.0));
        assert_eq!(layout.graph_origin(), Vec2::new(520.0, 360.0));
        assert_eq!(layout.graph_capacity(), 320);
        assert!(layout.graph_width() >= layout.graph_capacity() as f32);
    }

    #[test]
    fn world_origin_is_window_centre() {
        let layout = layout();
        assert_eq!(layout.to_world(Vec2::new(600.0, 360.0)), Vec2::ZERO);
        assert_eq!(layout.to_world(Vec2::new(0.0, 0.0)), Vec2::new(-600.0, 360.0));
    }

    #[test]
    fn graph_points_follow_sine_of_sample() {
        let layout = layout();
        assert_eq!(layout.graph_point(0, 0.0), Vec2::new(520.0, 360.0));

        let top = layout.graph_point(5, std::f64::consts::FRAC_PI_2);
        assert_eq!(top.x, 525.0);
        assert!((top.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn axes_span_the_graph() {
        let [divider, time, displacement] = layout().axes();
        assert_eq!(divider, (Vec2::new(480.0, 0.0), Vec2::new(480.0, 720.0)));
        assert_eq!(time, (Vec2::new(520.0, 360.0), Vec2::new(920.0, 360.0)));
        assert_eq!(
            displacement,
            (Vec2::new(520.0, 160.0), Vec2::new(520.0, 560.0))
        );
    }
}
