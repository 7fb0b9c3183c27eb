/// Procedural primitives and the placeholder head
///
/// The placeholder stands in for a real head model whenever no asset in the
/// model directory can be loaded.

use cgmath::{Matrix4, Rad, Vector3};
use std::f32::consts::PI;

use super::lighting::hex_rgb;
use super::mesh::{Material, Mesh, Model, ModelSource, Part};

pub const HEAD: &str = "head";
pub const LEFT_EYE: &str = "left_eye";
pub const RIGHT_EYE: &str = "right_eye";
pub const NOSE: &str = "nose";
pub const MOUTH: &str = "mouth";

const SKIN: u32 = 0xfdbcb4;
const EYE: u32 = 0x333333;
const LIPS: u32 = 0xb5524a;

/// UV sphere centered at the origin
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut positions = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            positions.push(Vector3::new(
                -radius * (u * 2.0 * PI).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * 2.0 * PI).sin() * (v * PI).sin(),
            ));
        }
    }

    let row = width_segments + 1;
    let mut triangles = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // The first and last rows collapse to a pole: one triangle per quad
            if iy != 0 {
                triangles.push([a, b, d]);
            }
            if iy != height_segments - 1 {
                triangles.push([b, c, d]);
            }
        }
    }

    Mesh { positions, triangles }
}

/// Cone with its apex on +y and a closed base on -y
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Mesh {
    let radial_segments = radial_segments.max(3);
    let half = height / 2.0;

    let mut positions = vec![Vector3::new(0.0, half, 0.0), Vector3::new(0.0, -half, 0.0)];
    for i in 0..radial_segments {
        let theta = i as f32 / radial_segments as f32 * 2.0 * PI;
        positions.push(Vector3::new(radius * theta.sin(), -half, radius * theta.cos()));
    }

    let apex = 0;
    let base = 1;
    let ring = |i: u32| 2 + i % radial_segments;
    let mut triangles = Vec::new();
    for i in 0..radial_segments {
        triangles.push([apex, ring(i), ring(i + 1)]);
        triangles.push([base, ring(i + 1), ring(i)]);
    }

    Mesh { positions, triangles }
}

fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Build the placeholder head: an ellipsoid with two eyes, a nose and
/// optionally a mouth.
pub fn placeholder_head(include_mouth: bool) -> Model {
    let skin = hex_rgb(SKIN);
    let eye_material = Material::opaque(hex_rgb(EYE));
    let eye = sphere(0.15, 16, 12);

    let mut parts = vec![
        Part {
            name: HEAD.to_string(),
            mesh: sphere(1.2, 32, 24),
            material: Material { color: skin, opacity: 0.9 },
            transform: Matrix4::from_nonuniform_scale(1.0, 1.1, 1.0),
        },
        Part {
            name: LEFT_EYE.to_string(),
            mesh: eye.clone(),
            material: eye_material,
            transform: translation(-0.3, 0.3, 1.0),
        },
        Part {
            name: RIGHT_EYE.to_string(),
            mesh: eye,
            material: eye_material,
            transform: translation(0.3, 0.3, 1.0),
        },
        Part {
            name: NOSE.to_string(),
            mesh: cone(0.1, 0.3, 8),
            material: Material::opaque(skin),
            transform: translation(0.0, 0.0, 1.1) * Matrix4::from_angle_x(Rad(PI)),
        },
    ];

    if include_mouth {
        parts.push(Part {
            name: MOUTH.to_string(),
            mesh: sphere(0.2, 16, 8),
            material: Material::opaque(hex_rgb(LIPS)),
            transform: translation(0.0, -0.45, 1.08) * Matrix4::from_nonuniform_scale(1.0, 0.25, 0.4),
        });
    }

    Model::new(parts, ModelSource::Placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::InnerSpace;

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = sphere(2.0, 12, 8);
        assert_eq!(mesh.positions.len(), 13 * 9);
        // Two pole rows with one triangle per quad, the rest with two
        assert_eq!(mesh.triangles.len(), (12 * 8 * 2 - 2 * 12) as usize);
        for p in &mesh.positions {
            assert_relative_eq!(p.magnitude(), 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let mesh = sphere(1.0, 16, 12);
        for tri in &mesh.triangles {
            let [a, b, c] = mesh.corners(tri);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_cone_faces_point_outward() {
        let mesh = cone(0.5, 1.0, 8);
        assert_eq!(mesh.triangles.len(), 16);
        for tri in &mesh.triangles {
            let [a, b, c] = mesh.corners(tri);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_placeholder_parts() {
        let head = placeholder_head(false);
        assert_eq!(head.source, ModelSource::Placeholder);
        for name in [HEAD, LEFT_EYE, RIGHT_EYE, NOSE] {
            assert!(head.part(name).is_some(), "missing {}", name);
        }
        assert!(head.part(MOUTH).is_none());

        let with_mouth = placeholder_head(true);
        assert_eq!(with_mouth.parts.len(), 5);
        assert!(with_mouth.part(MOUTH).is_some());
    }
}
