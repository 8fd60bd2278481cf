use std::f32::consts::{PI, TAU};

use nalgebra::{Point2, Point3};

/// A UV sphere as a flat triangle list (three vertices per triangle, no index
/// buffer).
///
/// Texture coordinates wrap once around the equator in u, and run from v = 1
/// at the north pole (+y) to v = 0 at the south pole.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub positions: Vec<Point3<f32>>,
    // Unit length; stored as points so they go through the same shader
    // attribute type as positions.
    pub normals: Vec<Point3<f32>>,
    pub uvs: Vec<Point2<f32>>,
}

impl SphereMesh {
    pub fn new(radius: f32, sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);

        // (normal, uv) on a grid of (stacks + 1) x (sectors + 1); the seam column
        // is duplicated so that u can reach 1.
        let grid_point = |stack: u32, sector: u32| {
            let v = stack as f32 / stacks as f32;
            let u = sector as f32 / sectors as f32;
            let polar = v * PI;
            let azimuth = u * TAU;
            let normal = Point3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            );
            (normal, Point2::new(u, 1.0 - v))
        };

        let num_vertices = (6 * sectors * (stacks - 1)) as usize;
        let mut mesh = SphereMesh {
            positions: Vec::with_capacity(num_vertices),
            normals: Vec::with_capacity(num_vertices),
            uvs: Vec::with_capacity(num_vertices),
        };

        for stack in 0..stacks {
            for sector in 0..sectors {
                let top_left = grid_point(stack, sector);
                let top_right = grid_point(stack, sector + 1);
                let bottom_left = grid_point(stack + 1, sector);
                let bottom_right = grid_point(stack + 1, sector + 1);

                // The pole rows collapse one edge of the quad, so they only
                // get one triangle each.
                if stack != 0 {
                    mesh.push_triangle(radius, [top_left, bottom_left, top_right]);
                }
                if stack != stacks - 1 {
                    mesh.push_triangle(radius, [top_right, bottom_left, bottom_right]);
                }
            }
        }

        mesh
    }

    fn push_triangle(&mut self, radius: f32, vertices: [(Point3<f32>, Point2<f32>); 3]) {
        for (normal, uv) in vertices.iter() {
            self.positions.push(Point3::from(normal.coords * radius));
            self.normals.push(*normal);
            self.uvs.push(*uv);
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
