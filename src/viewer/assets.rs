/// Head model loading
///
/// Probes a fixed, ordered list of candidate files and returns the first
/// one that loads, centered and scaled to a common size. glTF/GLB files are
/// read with `gltf`, Wavefront OBJ files with `tobj`.

use cgmath::{Matrix4, SquareMatrix, Vector3};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::mesh::{Material, Mesh, Model, ModelSource, Part};
use crate::error::AssetError;

/// Try every candidate in order on a blocking worker
pub async fn probe_candidates(candidates: Vec<PathBuf>, target_size: f32) -> Result<Model, AssetError> {
    // Spawn blocking task for file IO and parsing
    tokio::task::spawn_blocking(move || probe_candidates_blocking(&candidates, target_size))
        .await
        .map_err(|e| AssetError::Join(e.to_string()))?
}

/// Blocking implementation of candidate probing
pub fn probe_candidates_blocking(candidates: &[PathBuf], target_size: f32) -> Result<Model, AssetError> {
    for path in candidates {
        match load_model(path) {
            Ok(mut model) => {
                model.normalize(target_size);
                log::info!(
                    "🗿 Loaded head model {} ({} triangles)",
                    path.display(),
                    model.triangle_count()
                );
                return Ok(model);
            }
            Err(e) => log::warn!("⚠️  {}", e),
        }
    }

    Err(AssetError::Exhausted { tried: candidates.len() })
}

/// Load a single model file, picking the parser from the extension
pub fn load_model(path: &Path) -> Result<Model, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let parts = match extension.as_str() {
        "glb" | "gltf" => load_gltf(path)?,
        "obj" => load_obj(path)?,
        _ => return Err(AssetError::UnsupportedFormat(path.to_path_buf())),
    };

    let model = Model::new(parts, ModelSource::Asset(path.to_path_buf()));
    if model.triangle_count() == 0 {
        return Err(AssetError::NoGeometry(path.to_path_buf()));
    }
    Ok(model)
}

fn parse_error(path: &Path, message: impl ToString) -> AssetError {
    AssetError::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Load every triangle primitive of the default scene (or of all meshes
/// when the file declares no scene)
fn load_gltf(path: &Path) -> Result<Vec<Part>, AssetError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|e| parse_error(path, e))?;
    let mut parts = Vec::new();

    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                collect_node(&node, Matrix4::identity(), &buffers, &mut parts);
            }
        }
        None => {
            for mesh in document.meshes() {
                collect_mesh(&mesh, Matrix4::identity(), &buffers, &mut parts);
            }
        }
    }

    Ok(parts)
}

fn collect_node(
    node: &gltf::Node,
    parent: Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
    parts: &mut Vec<Part>,
) {
    let transform = parent * Matrix4::from(node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        collect_mesh(&mesh, transform, buffers, parts);
    }
    for child in node.children() {
        collect_node(&child, transform, buffers, parts);
    }
}

fn collect_mesh(
    mesh: &gltf::Mesh,
    transform: Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
    parts: &mut Vec<Part>,
) {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vector3<f32>> = positions.map(Vector3::from).collect();

        // No indices: the positions are already a triangle list
        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let geometry = Mesh::from_indexed(positions, &indices);
        if geometry.is_empty() {
            continue;
        }

        let [r, g, b, a] = primitive.material().pbr_metallic_roughness().base_color_factor();
        parts.push(Part {
            name: mesh.name().unwrap_or("mesh").to_string(),
            mesh: geometry,
            material: Material { color: [r, g, b], opacity: a },
            transform,
        });
    }
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

fn load_obj(path: &Path) -> Result<Vec<Part>, AssetError> {
    let source = std::fs::read_to_string(path).map_err(|e| parse_error(path, e))?;
    parse_obj(&source, path)
}

/// Parse OBJ text. Material libraries are not read; parts get the default gray.
pub fn parse_obj(source: &str, path: &Path) -> Result<Vec<Part>, AssetError> {
    let mut reader = BufReader::new(source.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &obj_load_options(), |_| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|e| parse_error(path, e))?;
    Ok(obj_parts(models))
}

fn obj_parts(models: Vec<tobj::Model>) -> Vec<Part> {
    models
        .into_iter()
        .filter_map(|model| {
            let positions = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vector3::new(p[0], p[1], p[2]))
                .collect();
            let mesh = Mesh::from_indexed(positions, &model.mesh.indices);
            if mesh.is_empty() {
                return None;
            }
            Some(Part {
                name: model.name,
                mesh,
                material: Material::default(),
                transform: Matrix4::identity(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TETRAHEDRON: &str = "\
o tetra
v 10 0 0
v 14 0 0
v 10 2 0
v 10 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mirror-3d-assets-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_obj() {
        let parts = parse_obj(TETRAHEDRON, Path::new("tetra.obj")).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "tetra");
        assert_eq!(parts[0].mesh.positions.len(), 4);
        assert_eq!(parts[0].mesh.triangles.len(), 4);
    }

    #[test]
    fn test_missing_candidates_exhaust() {
        let dir = scratch_dir("missing");
        let candidates = vec![dir.join("head.glb"), dir.join("head.gltf"), dir.join("head.obj")];

        let result = probe_candidates_blocking(&candidates, 2.5);
        assert_eq!(result, Err(AssetError::Exhausted { tried: 3 }));
    }

    #[test]
    fn test_load_model_errors() {
        let dir = scratch_dir("errors");
        assert!(matches!(load_model(&dir.join("absent.obj")), Err(AssetError::NotFound(_))));

        let text = dir.join("head.txt");
        std::fs::write(&text, "hello").unwrap();
        assert!(matches!(load_model(&text), Err(AssetError::UnsupportedFormat(_))));

        let broken = dir.join("head.glb");
        std::fs::write(&broken, b"definitely not gltf").unwrap();
        assert!(matches!(load_model(&broken), Err(AssetError::Parse { .. })));

        let empty = dir.join("empty.obj");
        std::fs::write(&empty, "# nothing here\n").unwrap();
        assert!(matches!(load_model(&empty), Err(AssetError::NoGeometry(_))));
    }

    #[test]
    fn test_first_loadable_candidate_wins_and_is_normalized() {
        let dir = scratch_dir("probe");
        let obj = dir.join("head.obj");
        std::fs::write(&obj, TETRAHEDRON).unwrap();
        let broken = dir.join("head.glb");
        std::fs::write(&broken, b"not a model").unwrap();

        let candidates = vec![dir.join("missing.gltf"), broken, obj.clone()];
        let model = probe_candidates_blocking(&candidates, 2.5).unwrap();

        assert_eq!(model.source, ModelSource::Asset(obj));
        let bounds = model.bounds().unwrap();
        assert_relative_eq!(bounds.center().x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.center().y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.center().z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.max_dimension(), 2.5, epsilon = 1e-5);
    }

    #[tokio::test]
    async fn test_probe_candidates_async() {
        let result = probe_candidates(vec![PathBuf::from("/nonexistent/head.obj")], 2.5).await;
        assert!(matches!(result, Err(AssetError::Exhausted { tried: 1 })));
    }
}
