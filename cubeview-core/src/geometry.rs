/// Geometry primitives for the rendered cube
use nalgebra::{Point3, Vector3};

/// A vertex with position and normal in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle with counter-clockwise winding when viewed from outside
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal derived from the winding order
    pub fn face_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = &self.vertices;
        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        edge1.cross(&edge2).normalize()
    }

    #[cfg(test)]
    pub fn centroid(&self) -> Point3<f32> {
        let [v0, v1, v2] = &self.vertices;
        Point3::from((v0.position.coords + v1.position.coords + v2.position.coords) / 3.0)
    }
}

/// Floats per vertex in [`Mesh::interleaved`]: position then normal
pub const FLOATS_PER_VERTEX: usize = 6;

/// A triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

/// Box faces as (outward normal, u axis, v axis); u x v == normal keeps CCW winding
const BOX_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned box centred on the origin, two triangles per face
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self {
            triangles: Vec::with_capacity(12),
        };

        for (normal, u, v) in BOX_FACES {
            let normal = Vector3::from(normal);
            let u = Vector3::from(u);
            let v = Vector3::from(v);
            let center = normal.component_mul(&half);
            let u_extent = u.component_mul(&half);
            let v_extent = v.component_mul(&half);

            let corner = |su: f32, sv: f32| {
                Vertex::new(Point3::from(center + u_extent * su + v_extent * sv), normal)
            };
            let (bl, br, tr, tl) = (
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            );

            mesh.add_triangle(Triangle::new(bl, br, tr));
            mesh.add_triangle(Triangle::new(bl, tr, tl));
        }

        mesh
    }

    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Flatten into `[px, py, pz, nx, ny, nz]` per vertex
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertex_count() * FLOATS_PER_VERTEX);
        for vertex in self.triangles.iter().flat_map(|t| t.vertices.iter()) {
            data.extend_from_slice(vertex.position.coords.as_slice());
            data.extend_from_slice(vertex.normal.as_slice());
        }
        data
    }
}
