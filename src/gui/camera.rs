use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::model::{CameraRig, Direction};

// Free-flying camera. Unlike an ArcBall, it doesn't orbit a target: it sits
// at `position` and looks along the direction given by yaw and pitch, with +y
// as up. Keyboard and mouse input reach it through the scene's controls
// (`CameraRig`), not through `handle_event`.
pub struct FlyCamera {
    // -- position --
    position: Point3<f32>,
    yaw: f32,   // degrees, -90 looks down -z
    pitch: f32, // degrees
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- knobs to fiddle with --
    speed: f32,       // units per second
    sensitivity: f32, // degrees per pixel
    pitch_limit: f32,
}

impl FlyCamera {
    pub fn new(position: Point3<f32>) -> Self {
        FlyCamera {
            position,
            yaw: -90.0,
            pitch: 0.0,
            width: 800,
            height: 600,
            fovy: 45f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
            speed: 2.5,
            sensitivity: 0.1,
            pitch_limit: 89.0,
        }
    }

    pub fn front(&self) -> Vector3<f32> {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(&Vector3::y()).normalize()
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height.max(1) as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl CameraRig for FlyCamera {
    fn fly(&mut self, direction: Direction, elapsed: f32) {
        let distance = self.speed * elapsed;
        let offset = match direction {
            Direction::Forward => self.front(),
            Direction::Backward => -self.front(),
            Direction::Left => -self.right(),
            Direction::Right => self.right(),
        };
        self.position += offset * distance;
    }

    fn look(&mut self, dx: f32, dy: f32) {
        // Screen y grows downwards, so dragging up should pitch up
        self.yaw += dx * self.sensitivity;
        self.pitch = nalgebra::clamp(
            self.pitch - dy * self.sensitivity,
            -self.pitch_limit,
            self.pitch_limit,
        );
    }
}

impl Camera for FlyCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w;
            self.height = h;
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.position
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.position, &(self.position + self.front()), &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_starts_looking_down_negative_z() {
        let camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(camera.front(), -Vector3::z(), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_fly() {
        let mut camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0));
        camera.fly(Direction::Forward, 0.4);
        assert_relative_eq!(camera.eye(), Point3::new(0.0, 0.0, 2.0), epsilon = 1e-5);
        camera.fly(Direction::Right, 0.2);
        assert_relative_eq!(camera.eye(), Point3::new(0.5, 0.0, 2.0), epsilon = 1e-5);
        camera.fly(Direction::Backward, 0.4);
        camera.fly(Direction::Left, 0.2);
        assert_relative_eq!(camera.eye(), Point3::new(0.0, 0.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::new(Point3::origin());
        camera.look(0.0, -5000.0);
        assert_eq!(camera.pitch(), 89.0);
        camera.look(0.0, 10000.0);
        assert_eq!(camera.pitch(), -89.0);
        assert!(camera.front().y < 0.0);
    }

    #[test]
    fn test_view_transform_maps_eye_to_origin() {
        let mut camera = FlyCamera::new(Point3::new(1.0, 2.0, 3.0));
        camera.look(120.0, 35.0);
        let eye_in_view = camera.view_transform() * camera.eye();
        assert_relative_eq!(eye_in_view, Point3::origin(), epsilon = 1e-5);

        // Straight ahead is -z in view space
        let ahead = camera.view_transform() * (camera.eye() + camera.front());
        assert_relative_eq!(ahead, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }
}
