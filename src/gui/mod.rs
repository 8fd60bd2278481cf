use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use nalgebra::Point3;

use self::camera::FlyCamera;
use self::controller::Controller;
use self::renderers::CompoundRenderer;
use self::timer::FrameTimer;
use crate::model::{RunState, Scene};

pub use self::texture::BodyTexture;

pub mod camera;
pub mod controller;
pub mod renderers;
pub mod texture;
pub mod timer;

pub struct Simulation {
    scene: Scene<BodyTexture>,
    controller: Controller,
    camera: FlyCamera,
    renderer: CompoundRenderer,
    timer: FrameTimer,
}

impl Simulation {
    /// Needs a live window, since the renderer compiles its shaders here.
    pub fn new(scene: Scene<BodyTexture>) -> Self {
        let body_names = scene.bodies().map(|b| b.info.name.clone()).collect();
        Self {
            scene,
            controller: Controller::new(body_names),
            camera: FlyCamera::new(Point3::new(0.0, 0.0, 3.0)),
            renderer: CompoundRenderer::new(),
            timer: FrameTimer::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller.process_event(&event.value);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        let elapsed = self.timer.tick();
        let controls = self.controller.controls();
        let state = self
            .scene
            .frame(elapsed, controls, &mut self.camera, &mut self.renderer);

        if state == RunState::Closing {
            log::info!("Closing");
            window.close();
        }
    }
}
