use engine::{camera_view, decay_towards_vec2, Mat4, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CameraRig {
    pub(crate) position: Vec2,
    pub(crate) follow_rate: f32,
    pub(crate) zoom: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            follow_rate: 30.0,
            zoom: 5.3,
        }
    }
}

impl CameraRig {
    pub(crate) fn follow(&mut self, target: Vec2, dt_seconds: f32) {
        self.position = decay_towards_vec2(self.position, target, dt_seconds, self.follow_rate);
    }

    pub(crate) fn view(&self) -> Mat4 {
        camera_view(self.position, self.zoom)
    }
}
