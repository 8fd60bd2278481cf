use std::f32::consts::TAU;

use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Matrix4, Point3};

use self::planet_renderer::PlanetRenderer;
use self::utils::{draw_path, path_iter_parametric};
use super::texture::BodyTexture;
use crate::model::{BodyID, BodyInfo, Lighting, Orbit, RenderBackend};

mod planet_renderer;
mod utils;

const ORBIT_SEGMENTS: usize = 120;

pub struct CompoundRenderer {
    planet_renderer: PlanetRenderer,
    line_renderer: LineRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            planet_renderer: PlanetRenderer::new(),
            line_renderer: LineRenderer::new(),
        }
    }
}

impl RenderBackend for CompoundRenderer {
    type Texture = BodyTexture;

    fn set_lighting(&mut self, lighting: &Lighting) {
        self.planet_renderer.set_lighting(lighting);
    }

    fn draw_body(
        &mut self,
        id: BodyID,
        info: &BodyInfo,
        transform: &Matrix4<f32>,
        texture: &BodyTexture,
    ) {
        self.planet_renderer
            .add_body(id, info, *transform, texture.texture().clone());
    }

    fn draw_orbit(&mut self, orbit: &Orbit) {
        let color = Point3::new(0.35, 0.35, 0.35);
        let points = path_iter_parametric(|t| orbit.position_at_angle(t), 0.0, TAU, ORBIT_SEGMENTS);
        draw_path(&mut self.line_renderer, points, &color);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.planet_renderer.render(pass, camera);
        self.line_renderer.render(pass, camera);
    }
}
