use std::collections::HashMap;
use std::rc::Rc;

use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform, Texture,
};
use nalgebra::{Matrix4, Point2, Point3};

use crate::math::sphere::SphereMesh;
use crate::model::{BodyID, BodyInfo, Lighting};

// Geometry never changes, so each body's sphere is uploaded once
struct SphereBuffers {
    positions: GPUVec<Point3<f32>>,
    normals: GPUVec<Point3<f32>>,
    uvs: GPUVec<Point2<f32>>,
}

impl SphereBuffers {
    fn new(info: &BodyInfo) -> Self {
        let mesh = SphereMesh::new(info.radius, info.sectors, info.stacks);
        SphereBuffers {
            positions: GPUVec::new(mesh.positions, BufferType::Array, AllocationType::StaticDraw),
            normals: GPUVec::new(mesh.normals, BufferType::Array, AllocationType::StaticDraw),
            uvs: GPUVec::new(mesh.uvs, BufferType::Array, AllocationType::StaticDraw),
        }
    }
}

struct DrawCall {
    body: BodyID,
    transform: Matrix4<f32>,
    texture: Rc<Texture>,
}

struct LightUniforms {
    dir_direction: ShaderUniform<Point3<f32>>,
    dir_ambient: ShaderUniform<Point3<f32>>,
    dir_diffuse: ShaderUniform<Point3<f32>>,
    dir_specular: ShaderUniform<Point3<f32>>,
    point_position: ShaderUniform<Point3<f32>>,
    point_ambient: ShaderUniform<Point3<f32>>,
    point_diffuse: ShaderUniform<Point3<f32>>,
    point_specular: ShaderUniform<Point3<f32>>,
    point_constant: ShaderUniform<f32>,
    point_linear: ShaderUniform<f32>,
    point_quadratic: ShaderUniform<f32>,
}

impl LightUniforms {
    fn new(shader: &mut Effect) -> Self {
        let vec3 = |name: &str| {
            shader
                .get_uniform::<Point3<f32>>(name)
                .expect("Failed to get shader uniform.")
        };
        let dir_direction = vec3("dir_light_direction");
        let dir_ambient = vec3("dir_light_ambient");
        let dir_diffuse = vec3("dir_light_diffuse");
        let dir_specular = vec3("dir_light_specular");
        let point_position = vec3("point_light_position");
        let point_ambient = vec3("point_light_ambient");
        let point_diffuse = vec3("point_light_diffuse");
        let point_specular = vec3("point_light_specular");

        let float = |name: &str| {
            shader
                .get_uniform::<f32>(name)
                .expect("Failed to get shader uniform.")
        };
        LightUniforms {
            dir_direction,
            dir_ambient,
            dir_diffuse,
            dir_specular,
            point_position,
            point_ambient,
            point_diffuse,
            point_specular,
            point_constant: float("point_light_constant"),
            point_linear: float("point_light_linear"),
            point_quadratic: float("point_light_quadratic"),
        }
    }

    fn upload(&mut self, lighting: &Lighting) {
        let dir = &lighting.directional;
        self.dir_direction.upload(&Point3::from(dir.direction));
        self.dir_ambient.upload(&dir.ambient);
        self.dir_diffuse.upload(&dir.diffuse);
        self.dir_specular.upload(&dir.specular);

        let point = &lighting.point;
        self.point_position.upload(&point.position);
        self.point_ambient.upload(&point.ambient);
        self.point_diffuse.upload(&point.diffuse);
        self.point_specular.upload(&point.specular);
        self.point_constant.upload(&point.constant);
        self.point_linear.upload(&point.linear);
        self.point_quadratic.upload(&point.quadratic);
    }
}

/// Draws textured spheres lit by one directional and one point light.
pub struct PlanetRenderer {
    // OpenGL stuff
    shader: Effect,
    position: ShaderAttribute<Point3<f32>>,
    normal: ShaderAttribute<Point3<f32>>,
    tex_coord: ShaderAttribute<Point2<f32>>,
    model: ShaderUniform<Matrix4<f32>>,
    view: ShaderUniform<Matrix4<f32>>,
    proj: ShaderUniform<Matrix4<f32>>,
    view_pos: ShaderUniform<Point3<f32>>,
    lights: LightUniforms,
    // Data storage
    lighting: Lighting,
    spheres: HashMap<BodyID, SphereBuffers>,
    draws: Vec<DrawCall>,
}

impl PlanetRenderer {
    pub fn new() -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        PlanetRenderer {
            position: shader
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            normal: shader
                .get_attrib::<Point3<f32>>("normal")
                .expect("Failed to get shader attribute."),
            tex_coord: shader
                .get_attrib::<Point2<f32>>("tex_coord")
                .expect("Failed to get shader attribute."),
            model: shader
                .get_uniform::<Matrix4<f32>>("model")
                .expect("Failed to get shader uniform."),
            view: shader
                .get_uniform::<Matrix4<f32>>("view")
                .expect("Failed to get shader uniform."),
            proj: shader
                .get_uniform::<Matrix4<f32>>("proj")
                .expect("Failed to get shader uniform."),
            view_pos: shader
                .get_uniform::<Point3<f32>>("view_pos")
                .expect("Failed to get shader uniform."),
            lights: LightUniforms::new(&mut shader),
            shader,
            lighting: Lighting::default(),
            spheres: HashMap::new(),
            draws: vec![],
        }
    }

    pub fn set_lighting(&mut self, lighting: &Lighting) {
        self.lighting = *lighting;
    }

    pub fn add_body(
        &mut self,
        id: BodyID,
        info: &BodyInfo,
        transform: Matrix4<f32>,
        texture: Rc<Texture>,
    ) {
        self.spheres
            .entry(id)
            .or_insert_with(|| SphereBuffers::new(info));
        self.draws.push(DrawCall {
            body: id,
            transform,
            texture,
        });
    }
}

impl Renderer for PlanetRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        if self.draws.is_empty() {
            return;
        }

        self.shader.use_program();
        self.position.enable();
        self.normal.enable();
        self.tex_coord.enable();

        camera.upload(pass, &mut self.proj, &mut self.view);
        self.view_pos.upload(&camera.eye());
        self.lights.upload(&self.lighting);

        let ctxt = Context::get();
        ctxt.active_texture(Context::TEXTURE0);

        for draw in self.draws.iter() {
            let sphere = match self.spheres.get_mut(&draw.body) {
                Some(sphere) => sphere,
                None => continue,
            };

            self.position.bind_sub_buffer(&mut sphere.positions, 0, 0);
            self.normal.bind_sub_buffer(&mut sphere.normals, 0, 0);
            self.tex_coord.bind_sub_buffer(&mut sphere.uvs, 0, 0);
            self.model.upload(&draw.transform);
            ctxt.bind_texture(Context::TEXTURE_2D, Some(&*draw.texture));

            ctxt.draw_arrays(Context::TRIANGLES, 0, sphere.positions.len() as i32);
        }

        self.position.disable();
        self.normal.disable();
        self.tex_coord.disable();

        self.draws.clear();
    }
}

static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 normal;
    attribute vec2 tex_coord;
    uniform   mat4 model;
    uniform   mat4 view;
    uniform   mat4 proj;
    varying   vec3 frag_pos;
    varying   vec3 frag_normal;
    varying   vec2 frag_uv;
    void main() {
        vec4 world_pos = model * vec4(position, 1.0);
        frag_pos = world_pos.xyz;
        // Scaling is uniform, so the model matrix is fine for normals too
        frag_normal = (model * vec4(normal, 0.0)).xyz;
        frag_uv = tex_coord;
        gl_Position = proj * view * world_pos;
    }";

static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 frag_pos;
    varying vec3 frag_normal;
    varying vec2 frag_uv;

    uniform sampler2D tex;
    uniform vec3 view_pos;

    uniform vec3 dir_light_direction;
    uniform vec3 dir_light_ambient;
    uniform vec3 dir_light_diffuse;
    uniform vec3 dir_light_specular;

    uniform vec3  point_light_position;
    uniform vec3  point_light_ambient;
    uniform vec3  point_light_diffuse;
    uniform vec3  point_light_specular;
    uniform float point_light_constant;
    uniform float point_light_linear;
    uniform float point_light_quadratic;

    const float SHININESS = 32.0;

    vec3 shade(vec3 to_light, vec3 ambient, vec3 diffuse, vec3 specular,
               vec3 normal, vec3 to_eye, vec3 albedo) {
        float diff = max(dot(normal, to_light), 0.0);
        vec3 reflected = reflect(-to_light, normal);
        float spec = pow(max(dot(to_eye, reflected), 0.0), SHININESS);
        return ambient * albedo + diffuse * diff * albedo + specular * spec * albedo;
    }

    void main() {
        vec3 albedo = texture2D(tex, frag_uv).rgb;
        vec3 normal = normalize(frag_normal);
        vec3 to_eye = normalize(view_pos - frag_pos);

        vec3 color = shade(normalize(-dir_light_direction), dir_light_ambient,
                           dir_light_diffuse, dir_light_specular, normal, to_eye, albedo);

        vec3 to_point = point_light_position - frag_pos;
        float dist = length(to_point);
        float attenuation = 1.0 / (point_light_constant + point_light_linear * dist
                                   + point_light_quadratic * dist * dist);
        color += attenuation * shade(normalize(to_point), point_light_ambient,
                                     point_light_diffuse, point_light_specular,
                                     normal, to_eye, albedo);

        gl_FragColor = vec4(color, 1.0);
    }";
