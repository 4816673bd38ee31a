use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::vector::Vec3;

/// One STL facet: a normal plus three vertex positions.
///
/// The normal is stored exactly as read or supplied. It is never checked for
/// unit length or against the winding of the vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(normal: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self {
            normal,
            vertices: [v1, v2, v3],
        }
    }

    /// The twelve floats in storage order: normal, then vertex 1..3.
    pub fn to_floats(&self) -> [f32; 12] {
        let [v1, v2, v3] = self.vertices;
        [
            self.normal.x,
            self.normal.y,
            self.normal.z,
            v1.x,
            v1.y,
            v1.z,
            v2.x,
            v2.y,
            v2.z,
            v3.x,
            v3.y,
            v3.z,
        ]
    }

    /// Inverse of [`Triangle::to_floats`].
    pub fn from_floats(f: [f32; 12]) -> Self {
        Self::new(
            Vec3::new(f[0], f[1], f[2]),
            Vec3::new(f[3], f[4], f[5]),
            Vec3::new(f[6], f[7], f[8]),
            Vec3::new(f[9], f[10], f[11]),
        )
    }

    /// Bitwise equality of every component (see [`Vec3::bits_eq`]).
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.normal.bits_eq(&other.normal)
            && self
                .vertices
                .iter()
                .zip(other.vertices.iter())
                .all(|(a, b)| a.bits_eq(b))
    }
}

/// An ordered triangle list.
///
/// Order is storage order and is significant: consumers derive face indices
/// from a triangle's position in the sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Every vertex of every triangle, three per triangle, in mesh order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Axis-aligned bounds of all vertex positions, or `None` for an empty mesh.
    ///
    /// Normals do not contribute.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut vertices = self.vertices();
        let first = vertices.next()?;
        let mut bb = BoundingBox::new(*first, *first);
        for v in vertices {
            bb.expand_to_include(v);
        }
        Some(bb)
    }

    /// Bitwise equality of every triangle, in order.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .triangles
                .iter()
                .zip(other.triangles.iter())
                .all(|(a, b)| a.bits_eq(b))
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

impl IntoIterator for Mesh {
    type Item = Triangle;
    type IntoIter = std::vec::IntoIter<Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter()
    }
}
