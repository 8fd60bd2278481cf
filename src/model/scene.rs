use nalgebra::Matrix4;

use super::body::{Body, BodyID, BodyInfo, Orbit};
use super::control::{CameraRig, Control, RateSteps, RunState};
use super::lighting::Lighting;
use crate::error::SceneError;

/// Whatever actually puts pixels on the screen.
pub trait RenderBackend {
    type Texture;

    /// Called once per frame, before any body is drawn.
    fn set_lighting(&mut self, lighting: &Lighting);
    fn draw_body(
        &mut self,
        id: BodyID,
        info: &BodyInfo,
        transform: &Matrix4<f32>,
        texture: &Self::Texture,
    );
    fn draw_orbit(&mut self, _orbit: &Orbit) {}
}

/// The ordered set of bodies, plus everything that's shared between them.
///
/// Bodies are updated and drawn in the order they were added. A body that
/// tracks a parent therefore always sees the parent's position from the
/// current frame, as long as the parent was added first (which `track`
/// enforces).
pub struct Scene<T> {
    bodies: Vec<Body<T>>,
    parents: Vec<Option<BodyID>>,
    lighting: Lighting,
    steps: RateSteps,
    paused: bool,
    show_orbit_paths: bool,
    run_state: RunState,
}

impl<T> Scene<T> {
    pub fn new(steps: RateSteps) -> Self {
        Scene {
            bodies: vec![],
            parents: vec![],
            lighting: Lighting::default(),
            steps,
            paused: false,
            show_orbit_paths: false,
            run_state: RunState::Running,
        }
    }

    pub fn add_body(&mut self, info: BodyInfo, texture: T) -> &mut Body<T> {
        let id = BodyID(self.bodies.len());
        self.bodies.push(Body::new(id, info, texture));
        self.parents.push(None);
        &mut self.bodies[id.0]
    }

    /// Makes `dependent`'s orbit center follow `parent` from now on.
    pub fn track(&mut self, dependent: BodyID, parent: BodyID) -> Result<(), SceneError> {
        let num_bodies = self.bodies.len();
        for id in [dependent, parent] {
            if id.0 >= num_bodies {
                return Err(SceneError::UnknownBody(id));
            }
        }
        if parent >= dependent {
            return Err(SceneError::TrackingOrder {
                dependent: self.bodies[dependent.0].info.name.clone(),
                parent: self.bodies[parent.0].info.name.clone(),
            });
        }
        self.parents[dependent.0] = Some(parent);
        Ok(())
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body<T>> {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> Option<&Body<T>> {
        self.bodies.get(id.0)
    }

    pub fn get_body_mut(&mut self, id: BodyID) -> Option<&mut Body<T>> {
        self.bodies.get_mut(id.0)
    }

    pub fn find_body(&self, name: &str) -> Option<BodyID> {
        self.bodies.iter().find(|b| b.info.name == name).map(|b| b.id)
    }

    pub fn parent_of(&self, id: BodyID) -> Option<BodyID> {
        self.parents.get(id.0).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut Lighting {
        &mut self.lighting
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Runs the update pass on its own, without drawing anything.
    pub fn advance(&mut self, elapsed: f32) {
        for idx in 0..self.bodies.len() {
            self.update_body(idx, elapsed);
        }
    }

    /// Advances by `duration` seconds in increments of `step`, finishing with
    /// whatever is left over. Non-positive or non-finite inputs do nothing.
    pub fn run_for(&mut self, duration: f32, step: f32) {
        if !duration.is_finite() || !step.is_finite() || duration <= 0.0 || step <= 0.0 {
            return;
        }

        // Count steps instead of accumulating time, which stalls in f32
        let (duration, step_f64) = (duration as f64, step as f64);
        let steps = (duration / step_f64).floor() as u64;
        for _ in 0..steps {
            self.advance(step);
        }

        let rest = (duration - steps as f64 * step_f64) as f32;
        if rest > 0.0 {
            self.advance(rest);
        }
    }

    /// One whole frame: apply input, then update and draw every body in order.
    pub fn frame<I, B>(
        &mut self,
        elapsed: f32,
        controls: I,
        camera: &mut dyn CameraRig,
        backend: &mut B,
    ) -> RunState
    where
        I: IntoIterator<Item = Control>,
        B: RenderBackend<Texture = T>,
    {
        for control in controls {
            self.apply(control, elapsed, camera);
        }

        self.place_point_light();
        backend.set_lighting(&self.lighting);

        let sim_elapsed = if self.paused { 0.0 } else { elapsed };
        for idx in 0..self.bodies.len() {
            self.update_body(idx, sim_elapsed);

            let body = &self.bodies[idx];
            if self.show_orbit_paths && body.has_orbit() {
                backend.draw_orbit(body.orbit());
            }
            backend.draw_body(
                body.id,
                &body.info,
                &body.compute_transform(),
                body.texture(),
            );
        }

        self.run_state
    }

    pub fn apply(&mut self, control: Control, elapsed: f32, camera: &mut dyn CameraRig) {
        match control {
            Control::Spin { body, change } => {
                let delta = self.steps.spin_delta(change);
                match self.bodies.get_mut(body.0) {
                    Some(b) => {
                        b.adjust_rotation_rate(delta);
                        log::debug!("{} spin rate: {:.3} rad/s", b.info.name, b.rotation_rate());
                    }
                    None => log::warn!("spin control for unknown body {:?}", body),
                }
            }
            Control::Orbit { body, change } => {
                let delta = self.steps.orbit_delta(change);
                match self.bodies.get_mut(body.0) {
                    Some(b) => {
                        b.adjust_orbit_rate(delta);
                        log::debug!("{} orbit rate: {:.3} rad/s", b.info.name, b.orbit_rate());
                    }
                    None => log::warn!("orbit control for unknown body {:?}", body),
                }
            }
            Control::Fly(direction) => camera.fly(direction, elapsed),
            Control::Look { dx, dy } => camera.look(dx, dy),
            Control::TogglePause => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            Control::ToggleOrbitPaths => self.show_orbit_paths = !self.show_orbit_paths,
            Control::Exit => self.run_state = RunState::Closing,
        }
    }

    fn update_body(&mut self, idx: usize, elapsed: f32) {
        // Parents always come earlier, so this is their current-frame position
        if let Some(parent) = self.parents[idx] {
            let center = self.bodies[parent.0].position();
            self.bodies[idx].set_orbit_center(center);
        }
        self.bodies[idx].update(elapsed);
    }

    fn place_point_light(&mut self) {
        let point = &mut self.lighting.point;
        if let Some(anchor) = point.anchor {
            if let Some(body) = self.bodies.get(anchor.0) {
                point.position = body.position() + point.offset;
            }
        }
    }
}
