/// Cube mesh data laid out for direct upload into a vertex buffer
use bytemuck::{Pod, Zeroable};
use nalgebra::{Point3, Vector3};

/// Number of vertices in the cube table (6 faces, 2 triangles each)
pub const CUBE_VERTEX_COUNT: usize = 36;

/// A vertex with position and face normal, six tightly packed f32s.
///
/// The field order and the absence of padding are read directly by the
/// vertex input stage, so this layout must not change.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<Vertex>() == 6 * std::mem::size_of::<f32>());

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: [x, y, z],
            normal: [nx, ny, nz],
        }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    pub fn normal(&self) -> Vector3<f32> {
        Vector3::from(self.normal)
    }
}

/// Unit cube centered at the origin, flat shaded.
///
/// Faces in order: -Y, +X, +Y, -X, +Z, -Z. Every triangle winds counter-clockwise
/// when seen from the side its normal points to.
#[rustfmt::skip]
pub static CUBE_VERTICES: [Vertex; CUBE_VERTEX_COUNT] = [
    Vertex::new( 0.5, -0.5,  0.5,  0.0, -1.0,  0.0),
    Vertex::new(-0.5, -0.5,  0.5,  0.0, -1.0,  0.0),
    Vertex::new(-0.5, -0.5, -0.5,  0.0, -1.0,  0.0),
    Vertex::new( 0.5, -0.5, -0.5,  0.0, -1.0,  0.0),
    Vertex::new( 0.5, -0.5,  0.5,  0.0, -1.0,  0.0),
    Vertex::new(-0.5, -0.5, -0.5,  0.0, -1.0,  0.0),

    Vertex::new( 0.5,  0.5,  0.5,  1.0,  0.0,  0.0),
    Vertex::new( 0.5, -0.5,  0.5,  1.0,  0.0,  0.0),
    Vertex::new( 0.5, -0.5, -0.5,  1.0,  0.0,  0.0),
    Vertex::new( 0.5,  0.5, -0.5,  1.0,  0.0,  0.0),
    Vertex::new( 0.5,  0.5,  0.5,  1.0,  0.0,  0.0),
    Vertex::new( 0.5, -0.5, -0.5,  1.0,  0.0,  0.0),

    Vertex::new(-0.5,  0.5,  0.5,  0.0,  1.0,  0.0),
    Vertex::new( 0.5,  0.5,  0.5,  0.0,  1.0,  0.0),
    Vertex::new( 0.5,  0.5, -0.5,  0.0,  1.0,  0.0),
    Vertex::new(-0.5,  0.5, -0.5,  0.0,  1.0,  0.0),
    Vertex::new(-0.5,  0.5,  0.5,  0.0,  1.0,  0.0),
    Vertex::new( 0.5,  0.5, -0.5,  0.0,  1.0,  0.0),

    Vertex::new(-0.5, -0.5,  0.5, -1.0,  0.0,  0.0),
    Vertex::new(-0.5,  0.5,  0.5, -1.0,  0.0,  0.0),
    Vertex::new(-0.5,  0.5, -0.5, -1.0,  0.0,  0.0),
    Vertex::new(-0.5, -0.5, -0.5, -1.0,  0.0,  0.0),
    Vertex::new(-0.5, -0.5,  0.5, -1.0,  0.0,  0.0),
    Vertex::new(-0.5,  0.5, -0.5, -1.0,  0.0,  0.0),

    Vertex::new( 0.5,  0.5,  0.5,  0.0,  0.0,  1.0),
    Vertex::new(-0.5,  0.5,  0.5,  0.0,  0.0,  1.0),
    Vertex::new(-0.5, -0.5,  0.5,  0.0,  0.0,  1.0),
    Vertex::new(-0.5, -0.5,  0.5,  0.0,  0.0,  1.0),
    Vertex::new( 0.5, -0.5,  0.5,  0.0,  0.0,  1.0),
    Vertex::new( 0.5,  0.5,  0.5,  0.0,  0.0,  1.0),

    Vertex::new( 0.5, -0.5, -0.5,  0.0,  0.0, -1.0),
    Vertex::new(-0.5, -0.5, -0.5,  0.0,  0.0, -1.0),
    Vertex::new(-0.5,  0.5, -0.5,  0.0,  0.0, -1.0),
    Vertex::new( 0.5,  0.5, -0.5,  0.0,  0.0, -1.0),
    Vertex::new( 0.5, -0.5, -0.5,  0.0,  0.0, -1.0),
    Vertex::new(-0.5,  0.5, -0.5,  0.0,  0.0, -1.0),
];

/// The cube table as raw bytes, ready for a vertex buffer upload
pub fn vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's winding
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position();
        let v1 = self.vertices[1].position();
        let v2 = self.vertices[2].position();

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    /// The normal stored on the first vertex
    pub fn face_normal(&self) -> Vector3<f32> {
        self.vertices[0].normal()
    }
}

/// Iterate a triangle list three vertices at a time; a trailing partial
/// triangle is ignored.
pub fn triangles(vertices: &[Vertex]) -> impl Iterator<Item = Triangle> + '_ {
    vertices
        .chunks_exact(3)
        .map(|tri| Triangle::new(tri[0], tri[1], tri[2]))
}
