use nalgebra::{Point3, Vector3};

use super::BodyID;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: Point3<f32>,
    pub diffuse: Point3<f32>,
    pub specular: Point3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub ambient: Point3<f32>,
    pub diffuse: Point3<f32>,
    pub specular: Point3<f32>,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    // When set, the light is parked at this body's position plus `offset`
    // every frame.
    pub anchor: Option<BodyID>,
    pub offset: Vector3<f32>,
}

impl PointLight {
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            directional: DirectionalLight {
                direction: Vector3::new(-0.2, -1.0, -0.3),
                ambient: Point3::new(0.3, 0.3, 0.3),
                diffuse: Point3::new(1.1, 1.1, 0.4),
                specular: Point3::new(1.0, 1.0, 0.5),
            },
            point: PointLight {
                position: Point3::new(1.0, 1.0, 1.0),
                ambient: Point3::new(0.0, 0.0, 0.1),
                diffuse: Point3::new(0.2, 0.2, 0.2),
                specular: Point3::new(0.5, 0.5, 0.5),
                constant: 1.0,
                linear: 0.1,
                quadratic: 0.032,
                anchor: Some(BodyID(0)),
                offset: Vector3::new(1.0, 1.0, 1.0),
            },
        }
    }
}
