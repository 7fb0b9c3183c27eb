/// Scene geometry
///
/// A `Model` is a small scene graph: a root transform over a flat list of
/// named parts, each with its own mesh, material and local transform.

use cgmath::prelude::*;
use cgmath::{Matrix4, Point3, Vector3};
use std::path::PathBuf;

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vector3<f32>>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Build a mesh from a flat triangle-list index buffer.
    ///
    /// Trailing indices and triangles that reference missing vertices are dropped.
    pub fn from_indexed(positions: Vec<Vector3<f32>>, indices: &[u32]) -> Self {
        let count = positions.len() as u32;
        let triangles = indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .filter(|tri| tri.iter().all(|&i| i < count))
            .collect();
        Self { positions, triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of one triangle
    pub fn corners(&self, triangle: &[u32; 3]) -> [Vector3<f32>; 3] {
        [
            self.positions[triangle[0] as usize],
            self.positions[triangle[1] as usize],
            self.positions[triangle[2] as usize],
        ]
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    fn around(point: Point3<f32>) -> Self {
        Self { min: point, max: point }
    }

    fn include(&mut self, p: Point3<f32>) {
        self.min = Point3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    /// Smallest box containing all points, `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = Point3<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::around(points.next()?);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Point3<f32> {
        self.min.midpoint(self.max)
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

/// Surface appearance of a part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGB in 0.0..=1.0
    pub color: [f32; 3],
    pub opacity: f32,
}

impl Material {
    pub fn opaque(color: [f32; 3]) -> Self {
        Self { color, opacity: 1.0 }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque([0.8, 0.8, 0.8])
    }
}

/// One named piece of a model
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub mesh: Mesh,
    pub material: Material,
    /// Part space to model space
    pub transform: Matrix4<f32>,
}

/// Where the displayed model came from
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    Placeholder,
    Asset(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub parts: Vec<Part>,
    /// Model space to world space (before user rotation)
    pub root: Matrix4<f32>,
    pub source: ModelSource,
}

impl Model {
    pub fn new(parts: Vec<Part>, source: ModelSource) -> Self {
        Self {
            parts,
            root: Matrix4::identity(),
            source,
        }
    }

    #[cfg(test)]
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|part| part.mesh.triangles.len()).sum()
    }

    /// Bounds of all vertices after part and root transforms
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.parts.iter().flat_map(|part| {
            let to_world = self.root * part.transform;
            part.mesh
                .positions
                .iter()
                .map(move |p| to_world.transform_point(Point3::from_vec(*p)))
        }))
    }

    /// Center the model at the origin and scale it uniformly so its largest
    /// bounding-box dimension equals `target_size`.
    pub fn normalize(&mut self, target_size: f32) {
        self.root = Matrix4::identity();
        let Some(bounds) = self.bounds() else {
            return;
        };

        let center = Matrix4::from_translation(-bounds.center().to_vec());
        let largest = bounds.max_dimension();
        self.root = if largest > f32::EPSILON {
            Matrix4::from_scale(target_size / largest) * center
        } else {
            center
        };
    }
}
