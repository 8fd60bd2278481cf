use nalgebra::{Matrix4, Point3, Vector3};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
}

/// Circular path in the horizontal (xz) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub rate: f32,
    pub angle: f32,
    pub center: Point3<f32>,
}

impl Orbit {
    pub fn new(radius: f32, rate: f32, center: Point3<f32>) -> Self {
        Orbit {
            radius: radius.max(0.0),
            rate: rate.max(0.0),
            angle: 0.0,
            center,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position_at_angle(self.angle)
    }

    pub fn position_at_angle(&self, angle: f32) -> Point3<f32> {
        self.center + self.radius * Vector3::new(angle.cos(), 0.0, angle.sin())
    }
}

/// A celestial body: spins about its own vertical axis, and optionally
/// circles an orbit center that can be moved from frame to frame.
///
/// `T` is the texture handle. The body owns it, so whatever resource it wraps
/// is released when the body is dropped.
#[derive(Debug)]
pub struct Body<T = ()> {
    pub id: BodyID,
    pub info: BodyInfo,
    texture: T,
    // -- spin --
    position: Point3<f32>,
    rotation_angle: f32,
    rotation_rate: f32,
    scale: f32,
    // -- orbit --
    orbit: Orbit,
}

impl<T> Body<T> {
    pub fn new(id: BodyID, info: BodyInfo, texture: T) -> Self {
        Body {
            id,
            info,
            texture,
            position: Point3::origin(),
            rotation_angle: 0.0,
            rotation_rate: 1.0,
            scale: 1.0,
            orbit: Orbit::new(0.0, 0.0, Point3::origin()),
        }
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Advances the body by `elapsed` seconds.
    ///
    /// The rotation angle is never wrapped; it only feeds `compute_transform`,
    /// where it's taken modulo 2pi by the trig functions.
    pub fn update(&mut self, elapsed: f32) {
        self.rotation_angle += self.rotation_rate * elapsed;

        if self.orbit.radius != 0.0 {
            self.orbit.angle += self.orbit.rate * elapsed;
            self.position = self.orbit.position();
        }
    }

    pub fn set_orbit(&mut self, radius: f32, rate: f32, center: Point3<f32>) {
        if radius < 0.0 || rate < 0.0 {
            log::warn!(
                "{}: negative orbit parameters (radius {}, rate {}) clamped to zero",
                self.info.name,
                radius,
                rate
            );
        }
        self.orbit = Orbit::new(radius, rate, center);
    }

    pub fn set_orbit_around_origin(&mut self, radius: f32, rate: f32) {
        self.set_orbit(radius, rate, Point3::origin());
    }

    /// Moves the orbit center, keeping the current orbit angle and radius.
    pub fn set_orbit_center(&mut self, center: Point3<f32>) {
        self.orbit.center = center;
    }

    pub fn adjust_rotation_rate(&mut self, delta: f32) {
        self.rotation_rate = (self.rotation_rate + delta).max(0.0);
    }

    pub fn adjust_orbit_rate(&mut self, delta: f32) {
        self.orbit.rate = (self.orbit.rate + delta).max(0.0);
    }

    /// Model matrix: translate, then rotate about y, then scale.
    pub fn compute_transform(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position.coords)
            * Matrix4::from_axis_angle(&Vector3::y_axis(), self.rotation_angle)
            * Matrix4::new_scaling(self.scale)
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn set_rotation_rate(&mut self, rate: f32) {
        if rate < 0.0 {
            log::warn!("{}: negative spin rate {} clamped to zero", self.info.name, rate);
        }
        self.rotation_rate = rate.max(0.0);
    }

    pub fn set_scale(&mut self, scale: f32) {
        if scale < 0.0 {
            log::warn!("{}: negative scale {} clamped to zero", self.info.name, scale);
        }
        self.scale = scale.max(0.0);
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit.radius
    }

    pub fn orbit_rate(&self) -> f32 {
        self.orbit.rate
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit.angle
    }

    pub fn orbit_center(&self) -> Point3<f32> {
        self.orbit.center
    }

    pub fn has_orbit(&self) -> bool {
        self.orbit.radius != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn test_body() -> Body {
        let info = BodyInfo {
            name: String::from("test"),
            radius: 0.1,
            sectors: 8,
            stacks: 4,
        };
        Body::new(BodyID(0), info, ())
    }

    #[test]
    fn test_rotation_is_additive() {
        let mut split = test_body();
        let mut whole = test_body();
        split.set_rotation_rate(2.3);
        whole.set_rotation_rate(2.3);

        for (t1, t2) in [(0.0, 0.5), (0.016, 0.017), (1.25, 3.5)] {
            split.update(t1);
            split.update(t2);
            whole.update(t1 + t2);
            assert_relative_eq!(split.rotation_angle(), whole.rotation_angle(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quarter_orbit() {
        let mut body = test_body();
        body.set_orbit_around_origin(2.0, 1.0);
        body.update(FRAC_PI_2);

        assert_relative_eq!(body.position(), Point3::new(0.0, 0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        let mut body = test_body();
        let center = Point3::new(1.0, -0.5, 3.0);
        body.set_orbit(0.75, 4.85, center);

        for i in 0..200 {
            body.update(0.013 * (i % 7) as f32);
            assert_relative_eq!((body.position() - center).norm(), 0.75, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_no_orbit_keeps_position() {
        let mut body = test_body();
        body.set_position(Point3::new(1.5, 0.0, 0.0));
        body.update(10.0);

        assert_eq!(body.position(), Point3::new(1.5, 0.0, 0.0));
        assert_eq!(body.orbit_angle(), 0.0);
    }

    #[test]
    fn test_retarget_center_keeps_angle() {
        let mut body = test_body();
        body.set_orbit_around_origin(1.0, 1.0);
        body.update(PI / 4.0);
        let angle = body.orbit_angle();

        let new_center = Point3::new(10.0, 0.0, 0.0);
        body.set_orbit_center(new_center);
        assert_eq!(body.orbit_angle(), angle);
        assert_eq!(body.orbit_radius(), 1.0);

        body.update(0.0);
        assert_relative_eq!((body.position() - new_center).norm(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(
            body.position(),
            new_center + Vector3::new(angle.cos(), 0.0, angle.sin()),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_rates_clamp_at_zero() {
        let mut body = test_body();
        body.set_rotation_rate(0.05);
        body.set_orbit_around_origin(1.0, 0.03);

        for _ in 0..100 {
            body.adjust_rotation_rate(-0.01);
            body.adjust_orbit_rate(-0.11);
            assert!(body.rotation_rate() >= 0.0);
            assert!(body.orbit_rate() >= 0.0);
        }
        assert_eq!(body.rotation_rate(), 0.0);
        assert_eq!(body.orbit_rate(), 0.0);

        body.adjust_rotation_rate(0.25);
        assert_relative_eq!(body.rotation_rate(), 0.25);
    }

    #[test]
    fn test_negative_inputs_are_clamped() {
        let mut body = test_body();
        body.set_scale(-2.0);
        body.set_orbit_around_origin(-1.0, -3.0);

        assert_eq!(body.scale(), 0.0);
        assert_eq!(body.orbit_radius(), 0.0);
        assert_eq!(body.orbit_rate(), 0.0);
        assert!(!body.has_orbit());
    }

    #[test]
    fn test_negative_spin_rate_is_clamped() {
        let mut body = test_body();
        body.set_rotation_rate(-1.0);
        assert_eq!(body.rotation_rate(), 0.0);

        // Doesn't spin backwards either
        body.update(5.0);
        assert_eq!(body.rotation_angle(), 0.0);
    }

    #[test]
    fn test_transform_order() {
        let mut body = test_body();
        body.set_position(Point3::new(1.0, 2.0, 3.0));
        body.set_scale(2.0);
        body.set_rotation_rate(1.0);
        body.update(FRAC_PI_2);

        // Scale first: x axis -> 2x; then a quarter turn about y sends +x to -z;
        // then translate.
        let m = body.compute_transform();
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 2.0, 1.0), epsilon = 1e-5);

        let origin = m.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(1.0, 2.0, 3.0), epsilon = 1e-5);
    }
}
