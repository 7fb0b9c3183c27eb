/// Interactive 3D head viewer
///
/// This module renders a single model that the user can rotate by dragging
/// and zoom with the wheel. It is drawn on an iced canvas by projecting
/// flat-shaded triangles on the CPU.
///
/// Architecture:
/// - `instance.rs` - viewer lifecycle (Idle → Initializing → Running → Disposed)
/// - `controls.rs` - pure pointer/wheel/frame handlers
/// - `camera.rs` - perspective camera and zoom range
/// - `lighting.rs` - ambient and directional lights
/// - `mesh.rs` - meshes, parts, bounds and normalization
/// - `primitives.rs` - procedural sphere/cone and the placeholder head
/// - `assets.rs` - candidate probing for glTF/OBJ head models
/// - `raster.rs` - projection to depth-sorted screen triangles

pub mod assets;
pub mod camera;
pub mod controls;
pub mod instance;
pub mod lighting;
pub mod mesh;
pub mod primitives;
pub mod raster;

pub use controls::InputEvent;
pub use instance::{Listener, Viewer, ViewerId};
pub use mesh::Model;
