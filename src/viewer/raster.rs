/// Scene projection
///
/// Turns the current model into a depth-sorted list of flat-shaded screen
/// triangles (painter's algorithm). Drawing them back to front on a 2D
/// canvas reproduces the 3D view, including the translucent head.

use cgmath::prelude::*;
use cgmath::{Matrix4, Point2, Point3, Rad, Vector4};

use super::camera::Camera;
use super::controls::Rotation;
use super::lighting::LightSet;
use super::mesh::Model;

/// A triangle ready to be filled on a 2D surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedTriangle {
    /// Corners in surface pixels, origin at the top-left
    pub points: [Point2<f32>; 3],
    /// Lit RGBA color
    pub color: [f32; 4],
    /// Mean distance from the camera
    pub depth: f32,
}

/// Model orientation as a matrix (pitch applied after yaw)
pub fn rotation_matrix(rotation: Rotation) -> Matrix4<f32> {
    Matrix4::from_angle_x(Rad(rotation.pitch)) * Matrix4::from_angle_y(Rad(rotation.yaw))
}

/// Project a model onto a `width` x `height` surface.
///
/// Back faces and triangles crossing the near plane are dropped; the result
/// is ordered far to near.
pub fn project(
    model: &Model,
    camera: &Camera,
    rotation: Rotation,
    lights: &LightSet,
    width: f32,
    height: f32,
) -> Vec<ShadedTriangle> {
    if width < 1.0 || height < 1.0 {
        return Vec::new();
    }

    let view_projection = camera.view_projection();
    let eye = camera.eye();
    let world = rotation_matrix(rotation) * model.root;
    let mut out = Vec::with_capacity(model.triangle_count());

    for part in &model.parts {
        let to_world = world * part.transform;

        for triangle in &part.mesh.triangles {
            let corners = part
                .mesh
                .corners(triangle)
                .map(|p| to_world.transform_point(Point3::from_vec(p)));

            let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
            if normal.magnitude2() <= f32::EPSILON * f32::EPSILON {
                continue;
            }
            if normal.dot(eye - corners[0]) <= 0.0 {
                continue;
            }

            let Some(points) = to_screen(&corners, view_projection, camera.near, width, height) else {
                continue;
            };

            let [r, g, b] = lights.shade(part.material.color, normal.normalize());
            let depth = corners.iter().map(|c| (eye - *c).magnitude()).sum::<f32>() / 3.0;

            out.push(ShadedTriangle {
                points,
                color: [r, g, b, part.material.opacity],
                depth,
            });
        }
    }

    out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    out
}

fn to_screen(
    corners: &[Point3<f32>; 3],
    view_projection: Matrix4<f32>,
    near: f32,
    width: f32,
    height: f32,
) -> Option<[Point2<f32>; 3]> {
    let mut points = [Point2::new(0.0, 0.0); 3];
    for (point, corner) in points.iter_mut().zip(corners) {
        let clip: Vector4<f32> = view_projection * corner.to_homogeneous();
        if clip.w <= near {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        *point = Point2::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height);
    }
    Some(points)
}
